use std::sync::Arc;

use crate::error::{FormError, FormResult};
use crate::schema::{Kind, Primitive, Schema};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConcreteKind {
    Primitive(Primitive),
    Enumeration,
    Composite,
}

#[derive(Clone, Debug)]
pub struct TypeInfo {
    pub kind: ConcreteKind,
    pub inner: Arc<Schema>,
    pub is_maybe: bool,
    pub is_subtype: bool,
}

/// Unwraps optional and refined layers down to the concrete schema a
/// component is built for.
pub fn type_info(schema: &Arc<Schema>) -> FormResult<TypeInfo> {
    let mut inner = schema.clone();
    let mut is_maybe = false;
    let mut is_subtype = false;
    let kind = loop {
        let next = match inner.kind() {
            Kind::Optional(wrapped) => {
                is_maybe = true;
                wrapped.clone()
            }
            Kind::Refined(refinement) => {
                is_subtype = true;
                refinement.inner.clone()
            }
            Kind::Primitive(primitive) => break ConcreteKind::Primitive(*primitive),
            Kind::Enumeration(_) => break ConcreteKind::Enumeration,
            Kind::Composite(_) => break ConcreteKind::Composite,
            Kind::List(_) => return Err(FormError::UnsupportedType { name: inner.name() }),
        };
        inner = next;
    };
    Ok(TypeInfo {
        kind,
        inner,
        is_maybe,
        is_subtype,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_every_wrapper_layer() {
        let schema = Schema::optional(Schema::integer());
        let info = type_info(&schema).expect("integer is supported");
        assert_eq!(info.kind, ConcreteKind::Primitive(Primitive::Number));
        assert!(info.is_maybe);
        assert!(info.is_subtype);
        assert_eq!(info.inner.name(), "Number");
    }

    #[test]
    fn plain_types_have_no_flags() {
        let schema = Schema::composite("Empty", Vec::<(&str, Arc<Schema>)>::new());
        let info = type_info(&schema).expect("composite is supported");
        assert_eq!(info.kind, ConcreteKind::Composite);
        assert!(!info.is_maybe);
        assert!(!info.is_subtype);
        assert!(Arc::ptr_eq(&info.inner, &schema));
    }

    #[test]
    fn lists_are_not_form_kinds() {
        let error = type_info(&Schema::optional(Schema::list(Schema::string())))
            .expect_err("lists have no component");
        assert_eq!(
            error,
            FormError::UnsupportedType {
                name: "Array<String>".into()
            }
        );
    }
}
