use std::sync::Arc;

use gpui::SharedString;
use indexmap::IndexMap;

use crate::context::Config;
use crate::options::{CheckboxFlags, DatePickerFlags, SelectOption, TextboxFlags};
use crate::theme::{ControlColors, Stylesheet};
use crate::value::{Path, Value};

mod plain;

/// Turns a component's locals into the rendered output.
pub type Template<R> = Arc<dyn Fn(&Locals<R>) -> R + Send + Sync>;

pub fn template<R>(render: impl Fn(&Locals<R>) -> R + Send + Sync + 'static) -> Template<R> {
    Arc::new(render)
}

/// Fields every component passes to its template.
#[derive(Clone, Debug)]
pub struct BaseLocals {
    pub path: Path,
    pub error: Option<SharedString>,
    pub has_error: bool,
    pub label: Option<SharedString>,
    pub help: Option<SharedString>,
    pub config: Config,
    /// The formatted edit value.
    pub value: Value,
    pub stylesheet: Arc<Stylesheet>,
    /// Stylesheet colors for this component, resolved for `has_error`.
    pub colors: ControlColors,
}

#[derive(Clone)]
pub struct TextboxLocals {
    pub base: BaseLocals,
    pub placeholder: Option<SharedString>,
    pub flags: TextboxFlags,
}

#[derive(Clone, Debug)]
pub struct CheckboxLocals {
    pub base: BaseLocals,
    pub flags: CheckboxFlags,
}

#[derive(Clone, Debug)]
pub struct SelectLocals {
    pub base: BaseLocals,
    pub options: Vec<SelectOption>,
}

#[derive(Clone, Debug)]
pub struct DatePickerLocals {
    pub base: BaseLocals,
    pub flags: DatePickerFlags,
}

/// `inputs` holds each child's rendered output keyed by field name; `order`
/// is the sequence the template should lay them out in.
pub struct StructLocals<R> {
    pub base: BaseLocals,
    pub order: Vec<SharedString>,
    pub inputs: IndexMap<SharedString, R>,
}

pub enum Locals<R> {
    Textbox(TextboxLocals),
    Checkbox(CheckboxLocals),
    Select(SelectLocals),
    DatePicker(DatePickerLocals),
    Struct(StructLocals<R>),
}

impl<R> Locals<R> {
    pub fn base(&self) -> &BaseLocals {
        match self {
            Self::Textbox(locals) => &locals.base,
            Self::Checkbox(locals) => &locals.base,
            Self::Select(locals) => &locals.base,
            Self::DatePicker(locals) => &locals.base,
            Self::Struct(locals) => &locals.base,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Textbox(_) => "textbox",
            Self::Checkbox(_) => "checkbox",
            Self::Select(_) => "select",
            Self::DatePicker(_) => "date_picker",
            Self::Struct(_) => "struct",
        }
    }
}

/// One template per built-in component.
pub struct Templates<R> {
    pub textbox: Template<R>,
    pub checkbox: Template<R>,
    pub select: Template<R>,
    pub date_picker: Template<R>,
    pub structure: Template<R>,
}

impl<R> Clone for Templates<R> {
    fn clone(&self) -> Self {
        Self {
            textbox: self.textbox.clone(),
            checkbox: self.checkbox.clone(),
            select: self.select.clone(),
            date_picker: self.date_picker.clone(),
            structure: self.structure.clone(),
        }
    }
}

impl<R> Templates<R> {
    /// Returns a copy with every template the patch names replaced.
    pub fn merged(&self, patch: Option<&TemplatePatch<R>>) -> Self {
        let mut merged = self.clone();
        let Some(patch) = patch else {
            return merged;
        };
        if let Some(textbox) = &patch.textbox {
            merged.textbox = textbox.clone();
        }
        if let Some(checkbox) = &patch.checkbox {
            merged.checkbox = checkbox.clone();
        }
        if let Some(select) = &patch.select {
            merged.select = select.clone();
        }
        if let Some(date_picker) = &patch.date_picker {
            merged.date_picker = date_picker.clone();
        }
        if let Some(structure) = &patch.structure {
            merged.structure = structure.clone();
        }
        merged
    }
}

/// Partial template set carried by a composite's options and applied to its
/// whole subtree.
pub struct TemplatePatch<R> {
    pub textbox: Option<Template<R>>,
    pub checkbox: Option<Template<R>>,
    pub select: Option<Template<R>>,
    pub date_picker: Option<Template<R>>,
    pub structure: Option<Template<R>>,
}

impl<R> Default for TemplatePatch<R> {
    fn default() -> Self {
        Self {
            textbox: None,
            checkbox: None,
            select: None,
            date_picker: None,
            structure: None,
        }
    }
}

impl<R> TemplatePatch<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn textbox(mut self, template: Template<R>) -> Self {
        self.textbox = Some(template);
        self
    }

    pub fn checkbox(mut self, template: Template<R>) -> Self {
        self.checkbox = Some(template);
        self
    }

    pub fn select(mut self, template: Template<R>) -> Self {
        self.select = Some(template);
        self
    }

    pub fn date_picker(mut self, template: Template<R>) -> Self {
        self.date_picker = Some(template);
        self
    }

    pub fn structure(mut self, template: Template<R>) -> Self {
        self.structure = Some(template);
        self
    }
}
