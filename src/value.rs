use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use gpui::SharedString;
use indexmap::IndexMap;

pub type Fields = IndexMap<SharedString, Value>;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(SharedString),
    Date(DateTime<Utc>),
    List(Vec<Value>),
    Object(Fields),
    Struct(StructValue),
}

/// A composite value that passed field-level validation for the named type.
#[derive(Clone, Debug, PartialEq)]
pub struct StructValue {
    pub type_name: SharedString,
    pub fields: Fields,
}

impl Value {
    pub fn string(value: impl Into<SharedString>) -> Self {
        Self::String(value.into())
    }

    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<SharedString>,
        V: Into<Value>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    /// Fields of either a plain object or a branded struct.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Self::Object(fields) => Some(fields),
            Self::Struct(value) => Some(&value.fields),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields().and_then(|fields| fields.get(key))
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<SharedString> for Value {
    fn from(value: SharedString) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::String(value) => {
                let text: &str = value.as_ref();
                write!(f, "{text:?}")
            }
            Self::Date(value) => f.write_str(&value.to_rfc3339()),
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(fields) => write_fields(f, fields),
            Self::Struct(value) => {
                f.write_str(value.type_name.as_ref())?;
                write_fields(f, &value.fields)
            }
        }
    }
}

fn write_fields(f: &mut Formatter<'_>, fields: &Fields) -> std::fmt::Result {
    f.write_str("{")?;
    for (index, (key, value)) in fields.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: {value}")?;
    }
    f.write_str("}")
}

/// Location of a component or error inside the form, as field names from the root.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Path(Vec<SharedString>);

impl Path {
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, segment: impl Into<SharedString>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[SharedString] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, segment) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.as_ref())?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Self(
            value
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(|segment| SharedString::from(segment.to_string()))
                .collect(),
        )
    }
}

impl From<Vec<SharedString>> for Path {
    fn from(value: Vec<SharedString>) -> Self {
        Self(value)
    }
}

impl From<&[&str]> for Path {
    fn from(value: &[&str]) -> Self {
        Self(
            value
                .iter()
                .map(|segment| SharedString::from(segment.to_string()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(value: [&str; N]) -> Self {
        Self::from(&value[..])
    }
}
