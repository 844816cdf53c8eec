use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use gpui::SharedString;

use crate::context::{AutoMode, Config, Context, merge_config};
use crate::error::{FormError, FormResult};
use crate::i18n::I18n;
use crate::introspect::{ConcreteKind, TypeInfo, type_info};
use crate::options::Options;
use crate::schema::{Kind, Primitive, Schema};
use crate::template::{BaseLocals, Locals, Template};
use crate::theme::{StyleRole, Stylesheet};
use crate::transformer::Transformer;
use crate::validation::{ValidationResult, validate};
use crate::value::{Path, Value};

mod checkbox;
mod date_picker;
mod select;
mod structure;
mod textbox;


pub use checkbox::Checkbox;
pub use date_picker::DatePicker;
pub use select::Select;
pub use structure::Struct;
pub use textbox::Textbox;

/// Everything a parent hands to a child component.
pub struct Props<R> {
    pub schema: Arc<Schema>,
    pub options: Arc<Options<R>>,
    /// The value in its parsed, domain-side form.
    pub value: Value,
    pub ctx: Context<R>,
}

impl<R> Clone for Props<R> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            options: self.options.clone(),
            value: self.value.clone(),
            ctx: self.ctx.clone(),
        }
    }
}

impl<R> Props<R> {
    /// Whether a component mounted from `self` can take `next` as new props.
    /// A different schema or factory needs a fresh mount.
    pub(crate) fn same_mount(&self, next: &Props<R>) -> bool {
        let same_factory = match (&self.options.factory, &next.options.factory) {
            (Some(current), Some(next)) => current.ptr_eq(next),
            (None, None) => true,
            _ => false,
        };
        Arc::ptr_eq(&self.schema, &next.schema) && same_factory
    }
}

/// Mutable part of a component: the formatted edit value and whether the
/// last validation failed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    pub value: Value,
    pub has_error: bool,
}

/// An edit reported upward. `value` is the edit value of the component that
/// sent it; `path` is where the edit originated.
#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    pub value: Value,
    pub path: Path,
}

/// Bookkeeping shared by every component kind.
pub struct Base<R> {
    props: Props<R>,
    type_info: TypeInfo,
    state: State,
}

impl<R> Base<R> {
    pub fn new(props: Props<R>) -> FormResult<Self> {
        let type_info = type_info(&props.schema)?;
        Ok(Self {
            props,
            type_info,
            state: State::default(),
        })
    }

    pub fn props(&self) -> &Props<R> {
        &self.props
    }

    pub fn options(&self) -> &Options<R> {
        &self.props.options
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn path(&self) -> &Path {
        &self.props.ctx.path
    }

    pub fn auto(&self) -> AutoMode {
        self.options().auto.unwrap_or(self.props.ctx.auto)
    }

    pub fn i18n(&self) -> Arc<I18n> {
        self.options()
            .i18n
            .clone()
            .unwrap_or_else(|| self.props.ctx.i18n.clone())
    }

    pub fn stylesheet(&self) -> Arc<Stylesheet> {
        self.options()
            .stylesheet
            .clone()
            .unwrap_or_else(|| self.props.ctx.stylesheet.clone())
    }

    pub fn config(&self) -> Config {
        merge_config(&self.props.ctx.config, self.options().config.as_ref())
    }

    /// The field name handed down by the parent plus the localized
    /// optional/required suffix.
    pub fn default_label(&self) -> Option<SharedString> {
        let label = self.props.ctx.label.as_ref()?;
        let suffix = self.i18n().suffix(self.type_info.is_maybe).clone();
        Some(format!("{label}{suffix}").into())
    }

    pub fn label(&self) -> Option<SharedString> {
        let options = self.options();
        options
            .label
            .clone()
            .or_else(|| options.legend.clone())
            .or_else(|| match self.auto() {
                AutoMode::Labels => self.default_label(),
                AutoMode::Placeholders | AutoMode::None => None,
            })
    }

    pub fn error(&self) -> Option<SharedString> {
        self.options()
            .error
            .as_ref()
            .and_then(|error| error.resolve(&self.state.value))
    }

    pub fn has_error(&self) -> bool {
        self.options().has_error || self.state.has_error
    }

    pub fn template_or(&self, ambient: &Template<R>) -> Template<R> {
        self.options()
            .template
            .clone()
            .unwrap_or_else(|| ambient.clone())
    }

    pub fn base_locals(&self, role: StyleRole) -> BaseLocals {
        let has_error = self.has_error();
        BaseLocals {
            path: self.path().clone(),
            error: self.error(),
            has_error,
            label: self.label(),
            help: self.options().help.clone(),
            config: self.config(),
            value: self.state.value.clone(),
            stylesheet: self.stylesheet(),
            colors: self.stylesheet().colors(role, has_error),
        }
    }

    /// True when rendering with `props` and `state` could produce different
    /// output. Options and schemas compare by identity.
    pub fn should_update(&self, props: &Props<R>, state: &State) -> bool {
        state.value != self.state.value
            || state.has_error != self.state.has_error
            || !Arc::ptr_eq(&props.options, &self.props.options)
            || !Arc::ptr_eq(&props.schema, &self.props.schema)
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.state.value = value;
    }

    pub(crate) fn set_has_error(&mut self, has_error: bool) {
        self.state.has_error = has_error;
    }

    pub(crate) fn reformat(&mut self, transformer: &Transformer) {
        self.state.value = transformer.format(&self.props.value);
    }

    /// Installs new props. Type information is recomputed only when the
    /// schema itself changed.
    pub(crate) fn replace_props(&mut self, props: Props<R>) -> FormResult<()> {
        if !Arc::ptr_eq(&props.schema, &self.props.schema) {
            self.type_info = type_info(&props.schema)?;
        }
        self.props = props;
        Ok(())
    }

    pub(crate) fn validate_with(&mut self, transformer: &Transformer) -> ValidationResult {
        let parsed = transformer.parse(&self.state.value);
        let result = validate(&parsed, &self.props.schema, self.path());
        self.state.has_error = !result.is_valid();
        result
    }

    pub(crate) fn change(&mut self, value: Value) -> Change {
        self.state.value = value.clone();
        Change {
            value,
            path: self.path().clone(),
        }
    }
}

/// A mounted node of the form tree.
pub trait Component<R> {
    fn base(&self) -> &Base<R>;

    fn base_mut(&mut self) -> &mut Base<R>;

    fn kind(&self) -> &'static str;

    fn transformer(&self) -> Transformer {
        self.base()
            .options()
            .transformer
            .clone()
            .unwrap_or_else(Transformer::identity)
    }

    fn template(&self) -> Template<R>;

    fn locals(&self) -> FormResult<Locals<R>>;

    fn render(&self) -> FormResult<R> {
        let template = self.template();
        let locals = self.locals()?;
        Ok(template(&locals))
    }

    /// Parses the edit value, validates it against the schema and records
    /// whether it failed.
    fn validate(&mut self) -> ValidationResult {
        let transformer = self.transformer();
        self.base_mut().validate_with(&transformer)
    }

    /// Stores a new edit value without validating it.
    fn on_change(&mut self, value: Value) -> Change {
        self.base_mut().change(value)
    }

    /// Routes an edit to the component at `path`, relative to this one.
    fn dispatch(&mut self, path: &[SharedString], value: Value) -> FormResult<Change> {
        match path.split_first() {
            None => Ok(self.on_change(value)),
            Some((field, _)) => Err(FormError::UnknownPath {
                path: self.base().path().child(field.clone()).to_string(),
            }),
        }
    }

    /// Replaces the props and re-derives the edit value from them.
    fn receive_props(&mut self, props: Props<R>) -> FormResult<()> {
        self.base_mut().replace_props(props)?;
        let transformer = self.transformer();
        self.base_mut().reformat(&transformer);
        Ok(())
    }

    fn should_update(&self, props: &Props<R>, state: &State) -> bool {
        self.base().should_update(props, state)
    }

    fn state<'a>(&'a self) -> &'a State
    where
        R: 'a,
    {
        self.base().state()
    }

    fn child(&self, _name: &str) -> Option<&(dyn Component<R> + 'static)> {
        None
    }

    fn child_mut(&mut self, _name: &str) -> Option<&mut (dyn Component<R> + 'static)> {
        None
    }
}

pub type MountFn<R> = dyn Fn(Props<R>) -> FormResult<Box<dyn Component<R>>> + Send + Sync;

/// A caller-supplied component constructor, set through [`Options::factory`].
pub struct Factory<R>(Arc<MountFn<R>>);

impl<R> Factory<R> {
    pub fn new(
        mount: impl Fn(Props<R>) -> FormResult<Box<dyn Component<R>>> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(mount))
    }

    pub fn mount(&self, props: Props<R>) -> FormResult<Box<dyn Component<R>>> {
        (self.0)(props)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<R> Clone for Factory<R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<R> Debug for Factory<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Factory").finish_non_exhaustive()
    }
}

pub enum Variant<R> {
    Textbox,
    Checkbox,
    Select,
    DatePicker,
    Struct,
    Custom(Factory<R>),
}

impl<R> Debug for Variant<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(factory) => f.debug_tuple("Custom").field(factory).finish(),
            other => f.write_str(other.name()),
        }
    }
}

impl<R> Variant<R> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Textbox => "Textbox",
            Self::Checkbox => "Checkbox",
            Self::Select => "Select",
            Self::DatePicker => "DatePicker",
            Self::Struct => "Struct",
            Self::Custom(_) => "Custom",
        }
    }
}

impl<R: 'static> Variant<R> {
    pub fn mount(&self, props: Props<R>) -> FormResult<Box<dyn Component<R>>> {
        let component: Box<dyn Component<R>> = match self {
            Self::Textbox => Box::new(Textbox::new(props)?),
            Self::Checkbox => Box::new(Checkbox::new(props)?),
            Self::Select => Box::new(Select::new(props)?),
            Self::DatePicker => Box::new(DatePicker::new(props)?),
            Self::Struct => Box::new(Struct::new(props)?),
            Self::Custom(factory) => factory.mount(props)?,
        };
        Ok(component)
    }
}

/// Picks the component for a schema. An explicit factory always wins;
/// optional and refined layers are looked through.
pub fn select_component<R>(schema: &Arc<Schema>, options: &Options<R>) -> FormResult<Variant<R>> {
    if let Some(factory) = &options.factory {
        return Ok(Variant::Custom(factory.clone()));
    }
    let mut current = schema;
    loop {
        match current.kind() {
            Kind::Primitive(Primitive::Boolean) => return Ok(Variant::Checkbox),
            Kind::Primitive(Primitive::Date) => return Ok(Variant::DatePicker),
            Kind::Primitive(_) => return Ok(Variant::Textbox),
            Kind::Enumeration(_) => return Ok(Variant::Select),
            Kind::Composite(_) => return Ok(Variant::Struct),
            Kind::Optional(inner) => current = inner,
            Kind::Refined(refinement) => current = &refinement.inner,
            Kind::List(_) => {
                return Err(FormError::UnsupportedType {
                    name: current.name(),
                });
            }
        }
    }
}

/// Chooses and constructs the component for `props`.
pub fn mount<R: 'static>(props: Props<R>) -> FormResult<Box<dyn Component<R>>> {
    let variant = select_component(&props.schema, &props.options)?;
    tracing::debug!(
        path = %props.ctx.path,
        schema = %props.schema.name(),
        component = variant.name(),
        "mounting component"
    );
    variant.mount(props)
}

/// Whether the concrete type edits numbers.
pub(crate) fn is_numeric(type_info: &TypeInfo) -> bool {
    type_info.kind == ConcreteKind::Primitive(Primitive::Number)
}
