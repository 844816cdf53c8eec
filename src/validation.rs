use std::sync::Arc;

use gpui::SharedString;

use crate::schema::{Composite, Kind, Schema};
use crate::value::{Fields, Path, StructValue, Value};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: SharedString,
    pub actual: Value,
    pub expected: SharedString,
    pub path: Path,
}

impl ValidationError {
    fn new(actual: &Value, expected: &Schema, path: &Path) -> Self {
        let expected = expected.name();
        let message = if path.is_root() {
            format!("Invalid value {actual} supplied to {expected}")
        } else {
            format!("Invalid value {actual} supplied to {path} ({expected})")
        };
        Self {
            message: message.into(),
            actual: actual.clone(),
            expected,
            path: path.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub value: Value,
}

impl ValidationResult {
    pub fn new(value: Value, errors: Vec<ValidationError>) -> Self {
        Self { errors, value }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }
}

/// Checks `value` against `schema`. Composite values that pass are returned
/// in their branded [`Value::Struct`] form; failing composites keep the plain
/// object so callers can still show what was entered.
pub fn validate(value: &Value, schema: &Arc<Schema>, path: &Path) -> ValidationResult {
    let mut errors = Vec::new();
    let value = check(value, schema, path, &mut errors);
    tracing::trace!(%path, schema = %schema.name(), errors = errors.len(), "validated value");
    ValidationResult::new(value, errors)
}

fn check(value: &Value, schema: &Schema, path: &Path, errors: &mut Vec<ValidationError>) -> Value {
    match schema.kind() {
        Kind::Primitive(primitive) => {
            if !primitive.accepts(value) {
                errors.push(ValidationError::new(value, schema, path));
            }
            value.clone()
        }
        Kind::Optional(inner) => {
            if value.is_null() {
                Value::Null
            } else {
                check(value, inner, path, errors)
            }
        }
        Kind::Refined(refinement) => {
            let before = errors.len();
            let checked = check(value, &refinement.inner, path, errors);
            if errors.len() == before && !(refinement.predicate)(&checked) {
                let mut error = ValidationError::new(value, schema, path);
                if let Some(message) = &refinement.message {
                    error.message = message.clone();
                }
                errors.push(error);
            }
            checked
        }
        Kind::Enumeration(enumeration) => {
            if !value.as_str().is_some_and(|key| enumeration.contains(key)) {
                errors.push(ValidationError::new(value, schema, path));
            }
            value.clone()
        }
        Kind::Composite(composite) => check_composite(value, schema, composite, path, errors),
        Kind::List(inner) => {
            let Value::List(items) = value else {
                errors.push(ValidationError::new(value, schema, path));
                return value.clone();
            };
            Value::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| check(item, inner, &path.child(index.to_string()), errors))
                    .collect(),
            )
        }
    }
}

fn check_composite(
    value: &Value,
    schema: &Schema,
    composite: &Composite,
    path: &Path,
    errors: &mut Vec<ValidationError>,
) -> Value {
    let type_name = schema.name();
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Struct(branded) if branded.type_name == type_name => &branded.fields,
        _ => {
            errors.push(ValidationError::new(value, schema, path));
            return value.clone();
        }
    };

    let before = errors.len();
    let mut checked = Fields::with_capacity(composite.fields().len());
    for (name, field_schema) in composite.fields() {
        let field_value = fields.get(name).unwrap_or(&Value::Null);
        let field_value = check(field_value, field_schema, &path.child(name.clone()), errors);
        checked.insert(name.clone(), field_value);
    }

    if errors.len() == before {
        Value::Struct(StructValue {
            type_name,
            fields: checked,
        })
    } else {
        Value::Object(checked)
    }
}
