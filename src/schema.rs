use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use gpui::SharedString;
use indexmap::IndexMap;

use crate::value::Value;

pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Date,
}

impl Primitive {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_)) => true,
            (Self::Number, Value::Number(number)) => number.is_finite(),
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Date, Value::Date(_)) => true,
            _ => false,
        }
    }
}

#[derive(Clone)]
pub struct Refinement {
    pub inner: Arc<Schema>,
    pub predicate: Predicate,
    pub message: Option<SharedString>,
}

impl Debug for Refinement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refinement")
            .field("inner", &self.inner)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Enumeration {
    members: IndexMap<SharedString, SharedString>,
}

impl Enumeration {
    /// Members as `key -> label`, in declaration order.
    pub fn members(&self) -> &IndexMap<SharedString, SharedString> {
        &self.members
    }

    pub fn contains(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Composite {
    fields: IndexMap<SharedString, Arc<Schema>>,
}

impl Composite {
    pub fn fields(&self) -> &IndexMap<SharedString, Arc<Schema>> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Arc<Schema>> {
        self.fields.get(name)
    }
}

#[derive(Clone, Debug)]
pub enum Kind {
    Primitive(Primitive),
    Optional(Arc<Schema>),
    Refined(Refinement),
    Enumeration(Enumeration),
    Composite(Composite),
    List(Arc<Schema>),
}

/// A type descriptor. Components compare schemas by `Arc` identity, so keep
/// one `Arc<Schema>` alive per form instead of rebuilding it on every render.
#[derive(Clone, Debug)]
pub struct Schema {
    name: Option<SharedString>,
    kind: Kind,
}

impl Schema {
    pub fn new(kind: Kind) -> Arc<Self> {
        Arc::new(Self { name: None, kind })
    }

    pub fn named(name: impl Into<SharedString>, kind: Kind) -> Arc<Self> {
        Arc::new(Self {
            name: Some(name.into()),
            kind,
        })
    }

    pub fn string() -> Arc<Self> {
        Self::new(Kind::Primitive(Primitive::String))
    }

    pub fn number() -> Arc<Self> {
        Self::new(Kind::Primitive(Primitive::Number))
    }

    pub fn boolean() -> Arc<Self> {
        Self::new(Kind::Primitive(Primitive::Boolean))
    }

    pub fn date() -> Arc<Self> {
        Self::new(Kind::Primitive(Primitive::Date))
    }

    pub fn integer() -> Arc<Self> {
        Self::refined(Self::number(), "Integer", |value| {
            value.as_f64().is_some_and(|number| number.fract() == 0.0)
        })
    }

    pub fn optional(inner: Arc<Schema>) -> Arc<Self> {
        Self::new(Kind::Optional(inner))
    }

    pub fn list(inner: Arc<Schema>) -> Arc<Self> {
        Self::new(Kind::List(inner))
    }

    pub fn refined(
        inner: Arc<Schema>,
        name: impl Into<SharedString>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Arc<Self> {
        Self::named(
            name,
            Kind::Refined(Refinement {
                inner,
                predicate: Arc::new(predicate),
                message: None,
            }),
        )
    }

    /// A refinement whose failures report `message` instead of the generic text.
    pub fn refined_with_message(
        inner: Arc<Schema>,
        name: impl Into<SharedString>,
        message: impl Into<SharedString>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Arc<Self> {
        Self::named(
            name,
            Kind::Refined(Refinement {
                inner,
                predicate: Arc::new(predicate),
                message: Some(message.into()),
            }),
        )
    }

    pub fn enumeration<K, L>(
        name: impl Into<SharedString>,
        members: impl IntoIterator<Item = (K, L)>,
    ) -> Arc<Self>
    where
        K: Into<SharedString>,
        L: Into<SharedString>,
    {
        Self::named(
            name,
            Kind::Enumeration(Enumeration {
                members: members
                    .into_iter()
                    .map(|(key, label)| (key.into(), label.into()))
                    .collect(),
            }),
        )
    }

    pub fn composite<K>(
        name: impl Into<SharedString>,
        fields: impl IntoIterator<Item = (K, Arc<Schema>)>,
    ) -> Arc<Self>
    where
        K: Into<SharedString>,
    {
        Self::named(
            name,
            Kind::Composite(Composite {
                fields: fields
                    .into_iter()
                    .map(|(key, schema)| (key.into(), schema))
                    .collect(),
            }),
        )
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn name(&self) -> SharedString {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match &self.kind {
            Kind::Primitive(primitive) => primitive.as_str().into(),
            Kind::Optional(inner) => format!("?{}", inner.name()).into(),
            Kind::List(inner) => format!("Array<{}>", inner.name()).into(),
            Kind::Refined(refinement) => format!("{{{} | refinement}}", refinement.inner.name()).into(),
            Kind::Enumeration(enumeration) => enumeration
                .members
                .keys()
                .map(|key| format!("{:?}", key.to_string()))
                .collect::<Vec<_>>()
                .join(" | ")
                .into(),
            Kind::Composite(_) => "Struct".into(),
        }
    }
}

/// Rust types that know their form schema. `#[derive(FormSchema)]` implements
/// it for named-field structs and unit enums.
pub trait FormSchema {
    fn form_schema() -> Arc<Schema>;
}

impl FormSchema for String {
    fn form_schema() -> Arc<Schema> {
        Schema::string()
    }
}

impl FormSchema for SharedString {
    fn form_schema() -> Arc<Schema> {
        Schema::string()
    }
}

impl FormSchema for bool {
    fn form_schema() -> Arc<Schema> {
        Schema::boolean()
    }
}

impl<T: FormSchema> FormSchema for Option<T> {
    fn form_schema() -> Arc<Schema> {
        Schema::optional(T::form_schema())
    }
}

macro_rules! primitive_schema {
    ($schema:ident => $($ty:ty),*) => {
        $(
            impl FormSchema for $ty {
                fn form_schema() -> Arc<Schema> {
                    Schema::$schema()
                }
            }
        )*
    };
}

primitive_schema!(number => f32, f64);
primitive_schema!(integer => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
primitive_schema!(date => DateTime<Utc>, NaiveDate, NaiveDateTime);
