use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::Utc;
use gpui::SharedString;

use crate::value::Value;

pub type TransformFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Converts between the value a component receives and the value it edits.
#[derive(Clone)]
pub struct Transformer {
    format: TransformFn,
    parse: TransformFn,
}

impl Debug for Transformer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformer").finish_non_exhaustive()
    }
}

impl Transformer {
    pub fn new(
        format: impl Fn(&Value) -> Value + Send + Sync + 'static,
        parse: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            format: Arc::new(format),
            parse: Arc::new(parse),
        }
    }

    pub fn format(&self, value: &Value) -> Value {
        (self.format)(value)
    }

    pub fn parse(&self, value: &Value) -> Value {
        (self.parse)(value)
    }

    pub fn identity() -> Self {
        Self::new(Value::clone, Value::clone)
    }

    /// Free text: blank input parses to null.
    pub fn text() -> Self {
        Self::new(Value::clone, to_null)
    }

    pub fn number() -> Self {
        Self::new(format_number, parse_number)
    }

    pub fn checkbox() -> Self {
        Self::new(
            |value| match value {
                Value::Null => Value::Bool(false),
                other => other.clone(),
            },
            Value::clone,
        )
    }

    /// A missing date starts the picker at the current instant.
    pub fn date() -> Self {
        Self::new(
            |value| match value {
                Value::Null => Value::Date(Utc::now()),
                other => other.clone(),
            },
            Value::clone,
        )
    }

    /// Maps "no selection" onto the sentinel option value and back. Without a
    /// sentinel both directions are the identity.
    pub fn select(sentinel: Option<SharedString>) -> Self {
        let Some(sentinel) = sentinel else {
            return Self::identity();
        };
        let parse_sentinel = sentinel.clone();
        Self::new(
            move |value| match value {
                Value::Null => Value::String(sentinel.clone()),
                other => other.clone(),
            },
            move |value| match value {
                Value::String(selected) if *selected == parse_sentinel => Value::Null,
                other => other.clone(),
            },
        )
    }
}

fn to_null(value: &Value) -> Value {
    match value {
        Value::String(text) if text.trim().is_empty() => Value::Null,
        other => other.clone(),
    }
}

fn format_number(value: &Value) -> Value {
    match value {
        Value::Number(number) => Value::String(number.to_string().into()),
        other => other.clone(),
    }
}

/// Accepts only text that is a finite decimal number once trimmed. Anything
/// else follows the text rule, so a typo stays visible to validation.
fn parse_number(value: &Value) -> Value {
    let Value::String(text) = value else {
        return to_null(value);
    };
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() && is_decimal_literal(trimmed) => Value::Number(number),
        _ => to_null(value),
    }
}

fn is_decimal_literal(text: &str) -> bool {
    text.bytes()
        .all(|byte| byte.is_ascii_digit() || matches!(byte, b'.' | b'-' | b'+' | b'e' | b'E'))
}
