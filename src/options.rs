use std::sync::Arc;

use chrono::{DateTime, Utc};
use gpui::{Hsla, SharedString};
use indexmap::IndexMap;

use crate::components::Factory;
use crate::context::{AutoMode, Config};
use crate::i18n::I18n;
use crate::template::{Template, TemplatePatch};
use crate::theme::Stylesheet;
use crate::transformer::Transformer;
use crate::value::Value;

pub type Hook = Arc<dyn Fn() + Send + Sync>;
pub type ErrorFn = Arc<dyn Fn(&Value) -> Option<SharedString> + Send + Sync>;

#[derive(Clone)]
pub enum ErrorMessage {
    Static(SharedString),
    /// Computed from the component's current edit value.
    Computed(ErrorFn),
}

impl ErrorMessage {
    pub fn computed(f: impl Fn(&Value) -> Option<SharedString> + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    pub fn resolve(&self, value: &Value) -> Option<SharedString> {
        match self {
            Self::Static(message) => Some(message.clone()),
            Self::Computed(f) => f(value),
        }
    }
}

impl From<&'static str> for ErrorMessage {
    fn from(value: &'static str) -> Self {
        Self::Static(value.into())
    }
}

impl From<String> for ErrorMessage {
    fn from(value: String) -> Self {
        Self::Static(value.into())
    }
}

impl From<SharedString> for ErrorMessage {
    fn from(value: SharedString) -> Self {
        Self::Static(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectOption {
    pub value: SharedString,
    pub text: SharedString,
}

impl SelectOption {
    pub fn new(value: impl Into<SharedString>, text: impl Into<SharedString>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// The synthetic "no selection" entry of a select.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum NullOption {
    /// Empty value, localized placeholder text.
    #[default]
    Default,
    Custom(SelectOption),
    Disabled,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AutoCapitalize {
    None,
    Sentences,
    Words,
    Characters,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClearButtonMode {
    Never,
    WhileEditing,
    UnlessEditing,
    Always,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyboardType {
    Default,
    EmailAddress,
    Numeric,
    NumberPad,
    DecimalPad,
    PhonePad,
    Url,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReturnKeyType {
    Default,
    Done,
    Go,
    Next,
    Search,
    Send,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DatePickerMode {
    Date,
    Time,
    DateTime,
}

/// Caret or selected range inside a textbox, in character offsets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SelectionState {
    pub anchor: usize,
    pub focus: usize,
}

impl SelectionState {
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            focus: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// Display flags forwarded untouched to the textbox template.
#[derive(Clone, Default)]
pub struct TextboxFlags {
    pub auto_capitalize: Option<AutoCapitalize>,
    pub auto_correct: Option<bool>,
    pub auto_focus: Option<bool>,
    pub buffer_delay: Option<u32>,
    pub clear_button_mode: Option<ClearButtonMode>,
    pub editable: Option<bool>,
    pub enables_return_key_automatically: Option<bool>,
    pub keyboard_type: Option<KeyboardType>,
    pub multiline: Option<bool>,
    pub on_blur: Option<Hook>,
    pub on_end_editing: Option<Hook>,
    pub on_focus: Option<Hook>,
    pub on_submit_editing: Option<Hook>,
    pub password: Option<bool>,
    pub placeholder_text_color: Option<Hsla>,
    pub return_key_type: Option<ReturnKeyType>,
    pub select_text_on_focus: Option<bool>,
    pub secure_text_entry: Option<bool>,
    pub selection_state: Option<SelectionState>,
}

impl TextboxFlags {
    pub fn is_secure(&self) -> bool {
        self.password.unwrap_or(false) || self.secure_text_entry.unwrap_or(false)
    }
}

#[derive(Clone, Debug, Default)]
pub struct CheckboxFlags {
    pub disabled: Option<bool>,
    pub on_tint_color: Option<Hsla>,
    pub thumb_tint_color: Option<Hsla>,
    pub tint_color: Option<Hsla>,
}

#[derive(Clone, Debug, Default)]
pub struct DatePickerFlags {
    pub maximum_date: Option<DateTime<Utc>>,
    pub minimum_date: Option<DateTime<Utc>>,
    pub minute_interval: Option<u32>,
    pub mode: Option<DatePickerMode>,
    pub time_zone_offset_in_minutes: Option<i32>,
}

/// Per-field configuration. Components compare options by `Arc` identity to
/// decide whether to re-render, so share one `Arc<Options<R>>` per field.
pub struct Options<R> {
    pub factory: Option<Factory<R>>,
    pub transformer: Option<Transformer>,
    pub template: Option<Template<R>>,
    pub templates: Option<TemplatePatch<R>>,
    pub label: Option<SharedString>,
    pub legend: Option<SharedString>,
    pub placeholder: Option<SharedString>,
    pub help: Option<SharedString>,
    pub error: Option<ErrorMessage>,
    pub has_error: bool,
    pub auto: Option<AutoMode>,
    pub i18n: Option<Arc<I18n>>,
    pub config: Option<Config>,
    pub stylesheet: Option<Arc<Stylesheet>>,
    pub textbox: TextboxFlags,
    pub checkbox: CheckboxFlags,
    pub date_picker: DatePickerFlags,
    pub choices: Option<Vec<SelectOption>>,
    pub sort: Option<SortOrder>,
    pub null_option: NullOption,
    pub fields: IndexMap<SharedString, Arc<Options<R>>>,
    pub order: Option<Vec<SharedString>>,
}

impl<R> Default for Options<R> {
    fn default() -> Self {
        Self {
            factory: None,
            transformer: None,
            template: None,
            templates: None,
            label: None,
            legend: None,
            placeholder: None,
            help: None,
            error: None,
            has_error: false,
            auto: None,
            i18n: None,
            config: None,
            stylesheet: None,
            textbox: TextboxFlags::default(),
            checkbox: CheckboxFlags::default(),
            date_picker: DatePickerFlags::default(),
            choices: None,
            sort: None,
            null_option: NullOption::Default,
            fields: IndexMap::new(),
            order: None,
        }
    }
}

impl<R> Options<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factory(mut self, factory: Factory<R>) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn transformer(mut self, transformer: Transformer) -> Self {
        self.transformer = Some(transformer);
        self
    }

    pub fn template(mut self, template: Template<R>) -> Self {
        self.template = Some(template);
        self
    }

    pub fn templates(mut self, templates: TemplatePatch<R>) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn legend(mut self, legend: impl Into<SharedString>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn help(mut self, help: impl Into<SharedString>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn error(mut self, error: impl Into<ErrorMessage>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn has_error(mut self, has_error: bool) -> Self {
        self.has_error = has_error;
        self
    }

    pub fn auto(mut self, auto: AutoMode) -> Self {
        self.auto = Some(auto);
        self
    }

    pub fn i18n(mut self, i18n: I18n) -> Self {
        self.i18n = Some(Arc::new(i18n));
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = Some(Arc::new(stylesheet));
        self
    }

    pub fn textbox(mut self, configure: impl FnOnce(TextboxFlags) -> TextboxFlags) -> Self {
        self.textbox = configure(self.textbox);
        self
    }

    pub fn checkbox(mut self, configure: impl FnOnce(CheckboxFlags) -> CheckboxFlags) -> Self {
        self.checkbox = configure(self.checkbox);
        self
    }

    pub fn date_picker(
        mut self,
        configure: impl FnOnce(DatePickerFlags) -> DatePickerFlags,
    ) -> Self {
        self.date_picker = configure(self.date_picker);
        self
    }

    pub fn choices(mut self, choices: impl IntoIterator<Item = SelectOption>) -> Self {
        self.choices = Some(choices.into_iter().collect());
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }

    pub fn null_option(mut self, null_option: NullOption) -> Self {
        self.null_option = null_option;
        self
    }

    pub fn field(mut self, name: impl Into<SharedString>, options: Options<R>) -> Self {
        self.fields.insert(name.into(), Arc::new(options));
        self
    }

    pub fn shared_field(mut self, name: impl Into<SharedString>, options: Arc<Options<R>>) -> Self {
        self.fields.insert(name.into(), options);
        self
    }

    pub fn order<S: Into<SharedString>>(mut self, order: impl IntoIterator<Item = S>) -> Self {
        self.order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn field_options(&self, name: &str) -> Option<&Arc<Options<R>>> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computed_errors_see_the_current_value() {
        let error = ErrorMessage::computed(|value| {
            value
                .as_str()
                .filter(|text| text.len() < 3)
                .map(|text| format!("`{text}` is too short").into())
        });
        assert_eq!(
            error.resolve(&Value::string("ab")).map(|message| message.to_string()),
            Some("`ab` is too short".to_string())
        );
        assert_eq!(error.resolve(&Value::string("abcd")), None);
        assert_eq!(
            ErrorMessage::from("required").resolve(&Value::Null),
            Some("required".into())
        );
    }

    #[test]
    fn builders_nest_field_options() {
        let options = Options::<String>::new()
            .legend("Profile")
            .field("name", Options::new().label("Full name"))
            .order(["age", "name"]);
        assert_eq!(options.legend.as_ref().map(|legend| legend.to_string()), Some("Profile".to_string()));
        let name = options.field_options("name").expect("name options are registered");
        assert_eq!(name.label.as_ref().map(|label| label.to_string()), Some("Full name".to_string()));
        assert!(options.field_options("age").is_none());
        assert_eq!(options.order.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn password_and_secure_entry_both_mask() {
        let flags = TextboxFlags {
            password: Some(true),
            ..TextboxFlags::default()
        };
        assert!(flags.is_secure());
        assert!(!TextboxFlags::default().is_secure());
    }

    #[test]
    fn textbox_flags_carry_the_selection() {
        let options = Options::<String>::new().textbox(|flags| TextboxFlags {
            selection_state: Some(SelectionState { anchor: 2, focus: 5 }),
            ..flags
        });
        let selection = options.textbox.selection_state.expect("selection is forwarded");
        assert!(!selection.is_collapsed());
        assert!(SelectionState::caret(3).is_collapsed());
    }
}
