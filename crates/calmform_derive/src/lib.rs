use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;
use syn::{Attribute, Data, DataEnum, DeriveInput, Fields, LitStr, parse_macro_input};

/// Implements `calmform::FormSchema`. Structs with named fields become
/// composites; enums with unit variants become enumerations labelled with
/// the humanized variant name, or `#[form(label = "...")]` when given.
#[proc_macro_derive(FormSchema, attributes(form))]
pub fn derive_form_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "FormSchema derive supports only non-generic types",
        ));
    }

    let calmform = calmform_path();
    let ident = input.ident;
    let type_name = ident.to_string();

    let schema = match input.data {
        Data::Struct(data) => {
            let Fields::Named(fields) = data.fields else {
                return Err(syn::Error::new(
                    Span::call_site(),
                    "FormSchema derive requires a struct with named fields",
                ));
            };
            let count = fields.named.len();
            let entries = fields.named.into_iter().filter_map(|field| {
                let name = field.ident?.to_string();
                let ty = field.ty;
                Some(quote! {
                    (#name, <#ty as #calmform::FormSchema>::form_schema())
                })
            });
            quote! {
                let fields: [(&'static str, ::std::sync::Arc<#calmform::Schema>); #count] = [
                    #(#entries),*
                ];
                #calmform::Schema::composite(#type_name, fields)
            }
        }
        Data::Enum(data) => {
            let members = enum_members(data)?;
            let count = members.len();
            let entries = members
                .into_iter()
                .map(|(key, label)| quote! { (#key, #label) });
            quote! {
                let members: [(&'static str, &'static str); #count] = [
                    #(#entries),*
                ];
                #calmform::Schema::enumeration(#type_name, members)
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new(
                Span::call_site(),
                "FormSchema derive is only supported on structs and enums",
            ));
        }
    };

    Ok(quote! {
        impl #calmform::FormSchema for #ident {
            fn form_schema() -> ::std::sync::Arc<#calmform::Schema> {
                static SCHEMA: ::std::sync::OnceLock<::std::sync::Arc<#calmform::Schema>> =
                    ::std::sync::OnceLock::new();
                SCHEMA
                    .get_or_init(|| {
                        #schema
                    })
                    .clone()
            }
        }
    })
}

fn enum_members(data: DataEnum) -> syn::Result<Vec<(String, String)>> {
    let mut members = Vec::with_capacity(data.variants.len());
    for variant in data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "FormSchema derive supports only unit enum variants",
            ));
        }
        let key = variant.ident.to_string();
        let label = match label_override(&variant.attrs)? {
            Some(label) => label,
            None => key.to_case(Case::Title),
        };
        members.push((key, label));
    }
    Ok(members)
}

fn label_override(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut label = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("form")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("label") {
                let value: LitStr = meta.value()?.parse()?;
                label = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported form attribute, expected `label`"))
            }
        })?;
    }
    Ok(label)
}

fn calmform_path() -> TokenStream2 {
    match crate_name("calmform") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) | Err(_) => quote!(::calmform),
    }
}
