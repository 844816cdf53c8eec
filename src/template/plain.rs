use chrono::{DateTime, Duration, Utc};

use super::{
    BaseLocals, CheckboxLocals, DatePickerLocals, Locals, SelectLocals, StructLocals,
    Templates, TextboxLocals, template,
};
use crate::options::DatePickerMode;
use crate::value::Value;

const INDENT: &str = "  ";

impl Templates<String> {
    /// Line-oriented text rendering, for terminals, logs and tests.
    pub fn plain() -> Self {
        Self {
            textbox: template(|locals| match locals {
                Locals::Textbox(locals) => textbox(locals),
                other => mismatch(other),
            }),
            checkbox: template(|locals| match locals {
                Locals::Checkbox(locals) => checkbox(locals),
                other => mismatch(other),
            }),
            select: template(|locals| match locals {
                Locals::Select(locals) => select(locals),
                other => mismatch(other),
            }),
            date_picker: template(|locals| match locals {
                Locals::DatePicker(locals) => date_picker(locals),
                other => mismatch(other),
            }),
            structure: template(|locals| match locals {
                Locals::Struct(locals) => structure(locals),
                other => mismatch(other),
            }),
        }
    }
}

fn mismatch(locals: &Locals<String>) -> String {
    tracing::warn!(kind = locals.kind(), "plain template received foreign locals");
    line(locals.base(), display_text(&locals.base().value))
}

fn textbox(locals: &TextboxLocals) -> String {
    let text = display_text(&locals.base.value);
    let body = if text.is_empty() {
        locals
            .placeholder
            .as_ref()
            .map(|placeholder| format!("[{placeholder}]"))
            .unwrap_or_else(|| "[]".to_string())
    } else if locals.flags.is_secure() {
        format!("[{}]", "*".repeat(text.chars().count()))
    } else {
        format!("[{text}]")
    };
    line(&locals.base, body)
}

fn checkbox(locals: &CheckboxLocals) -> String {
    let mark = if locals.base.value.as_bool().unwrap_or(false) {
        "[x]"
    } else {
        "[ ]"
    };
    let body = match &locals.base.label {
        Some(label) => format!("{mark} {label}"),
        None => mark.to_string(),
    };
    decorate(&locals.base, body)
}

fn select(locals: &SelectLocals) -> String {
    let selected = locals.base.value.as_str().and_then(|value| {
        locals
            .options
            .iter()
            .find(|option| option.value.as_ref() == value)
    });
    let body = match selected {
        Some(option) => format!("<{}>", option.text),
        None => format!("<{}>", display_text(&locals.base.value)),
    };
    line(&locals.base, body)
}

fn date_picker(locals: &DatePickerLocals) -> String {
    let body = match locals.base.value.as_date() {
        Some(date) => format_date(
            date,
            locals.flags.mode.unwrap_or(DatePickerMode::Date),
            locals.flags.time_zone_offset_in_minutes,
        ),
        None => display_text(&locals.base.value),
    };
    line(&locals.base, body)
}

fn structure(locals: &StructLocals<String>) -> String {
    let mut lines = Vec::new();
    if let Some(legend) = &locals.base.label {
        lines.push(legend.to_string());
    }
    for name in &locals.order {
        let Some(input) = locals.inputs.get(name) else {
            continue;
        };
        for input_line in input.lines() {
            lines.push(format!("{INDENT}{input_line}"));
        }
    }
    if let Some(trailer) = trailer(&locals.base) {
        lines.push(trailer);
    }
    lines.join("\n")
}

fn line(base: &BaseLocals, body: String) -> String {
    let body = match &base.label {
        Some(label) => format!("{label}: {body}"),
        None => body,
    };
    decorate(base, body)
}

fn decorate(base: &BaseLocals, mut body: String) -> String {
    if let Some(trailer) = trailer(base) {
        body.push(' ');
        body.push_str(&trailer);
    }
    body
}

fn trailer(base: &BaseLocals) -> Option<String> {
    let mut parts = Vec::new();
    if base.has_error {
        parts.push(match &base.error {
            Some(error) => format!("! {error}"),
            None => "!".to_string(),
        });
    }
    if let Some(help) = &base.help {
        parts.push(format!("({help})"));
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.to_string(),
        other => other.to_string(),
    }
}

fn format_date(date: DateTime<Utc>, mode: DatePickerMode, offset_minutes: Option<i32>) -> String {
    let local = date.naive_utc() + Duration::minutes(i64::from(offset_minutes.unwrap_or(0)));
    let pattern = match mode {
        DatePickerMode::Date => "%Y-%m-%d",
        DatePickerMode::Time => "%H:%M",
        DatePickerMode::DateTime => "%Y-%m-%d %H:%M",
    };
    local.format(pattern).to_string()
}
