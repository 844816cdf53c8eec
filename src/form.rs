use std::sync::Arc;

use crate::components::{Component, Props, mount};
use crate::context::{AutoMode, Config, Context};
use crate::error::{FormError, FormResult};
use crate::i18n::I18n;
use crate::options::Options;
use crate::schema::Schema;
use crate::template::Templates;
use crate::theme::Stylesheet;
use crate::validation::ValidationResult;
use crate::value::{Path, Value};

pub type ChangeCallback = Box<dyn FnMut(&Value, &Path)>;

/// Ambient settings for a form root. Every piece must be present when the
/// form is built.
pub struct FormConfig<R> {
    pub stylesheet: Option<Arc<Stylesheet>>,
    pub templates: Option<Templates<R>>,
    pub i18n: Option<Arc<I18n>>,
}

impl<R> Default for FormConfig<R> {
    fn default() -> Self {
        Self {
            stylesheet: Some(Arc::new(Stylesheet::default())),
            templates: None,
            i18n: Some(Arc::new(I18n::default())),
        }
    }
}

impl<R> FormConfig<R> {
    /// Default stylesheet and system-locale strings; templates still need
    /// to be supplied.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            stylesheet: None,
            templates: None,
            i18n: None,
        }
    }

    pub fn with_stylesheet(mut self, stylesheet: impl Into<Arc<Stylesheet>>) -> Self {
        self.stylesheet = Some(stylesheet.into());
        self
    }

    pub fn with_templates(mut self, templates: Templates<R>) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_i18n(mut self, i18n: impl Into<Arc<I18n>>) -> Self {
        self.i18n = Some(i18n.into());
        self
    }
}

impl FormConfig<String> {
    pub fn plain() -> Self {
        Self::new().with_templates(Templates::plain())
    }
}

/// The root of a form tree. Owns the root component and forwards edits to
/// the component they target.
pub struct Form<R: 'static> {
    schema: Arc<Schema>,
    options: Arc<Options<R>>,
    value: Value,
    ctx: Context<R>,
    root: Box<dyn Component<R>>,
    on_change: Option<ChangeCallback>,
}

impl<R: 'static> Form<R> {
    pub fn new(
        schema: Arc<Schema>,
        options: impl Into<Arc<Options<R>>>,
        value: Value,
        config: FormConfig<R>,
    ) -> FormResult<Self> {
        let ctx = root_context(config)?;
        let options = options.into();
        let root = mount(Props {
            schema: schema.clone(),
            options: options.clone(),
            value: value.clone(),
            ctx: ctx.clone(),
        })?;
        tracing::debug!(schema = %schema.name(), component = root.kind(), "form mounted");
        Ok(Self {
            schema,
            options,
            value,
            ctx,
            root,
            on_change: None,
        })
    }

    pub fn with_on_change(mut self, on_change: impl FnMut(&Value, &Path) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn options(&self) -> &Arc<Options<R>> {
        &self.options
    }

    pub fn root(&self) -> &dyn Component<R> {
        self.root.as_ref()
    }

    pub fn validate(&mut self) -> ValidationResult {
        let result = self.root.validate();
        tracing::debug!(errors = result.errors.len(), "form validated");
        result
    }

    /// The parsed value, or `None` when validation fails. Failing components
    /// are flagged so the next render shows them.
    pub fn get_value(&mut self) -> Option<Value> {
        let result = self.validate();
        result.is_valid().then_some(result.value)
    }

    pub fn get_raw_value(&mut self) -> ValidationResult {
        self.validate()
    }

    /// The component mounted at `path`, relative to the root.
    pub fn component(&self, path: impl Into<Path>) -> Option<&(dyn Component<R> + 'static)> {
        let path = path.into();
        let mut current: &(dyn Component<R> + 'static) = self.root.as_ref();
        for segment in path.segments() {
            current = current.child(segment)?;
        }
        Some(current)
    }

    pub fn component_mut(
        &mut self,
        path: impl Into<Path>,
    ) -> Option<&mut (dyn Component<R> + 'static)> {
        let path = path.into();
        let mut current: &mut (dyn Component<R> + 'static) = self.root.as_mut();
        for segment in path.segments() {
            current = current.child_mut(segment)?;
        }
        Some(current)
    }

    pub fn render(&self) -> FormResult<R> {
        self.root.render()
    }

    /// Applies an edit to the component at `path` and notifies the change
    /// callback with the root's new edit value and the edited path.
    pub fn on_change(&mut self, path: impl Into<Path>, value: Value) -> FormResult<()> {
        let path = path.into();
        let change = self
            .root
            .dispatch(path.segments(), value)
            .inspect_err(|error| tracing::warn!(%path, %error, "edit dropped"))?;
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&change.value, &change.path);
        }
        Ok(())
    }

    /// Replaces the externally supplied value. Edit state is re-derived from it.
    pub fn set_value(&mut self, value: Value) -> FormResult<()> {
        self.value = value;
        self.refresh()
    }

    pub fn set_options(&mut self, options: impl Into<Arc<Options<R>>>) -> FormResult<()> {
        self.options = options.into();
        self.refresh()
    }

    pub fn set_schema(&mut self, schema: Arc<Schema>) -> FormResult<()> {
        self.schema = schema;
        self.refresh()
    }

    pub fn set_config(&mut self, config: Config) -> FormResult<()> {
        self.ctx.config = config;
        self.refresh()
    }

    /// Hands the current props to the root. A root built for another schema,
    /// or by another factory, is replaced instead.
    fn refresh(&mut self) -> FormResult<()> {
        let props = Props {
            schema: self.schema.clone(),
            options: self.options.clone(),
            value: self.value.clone(),
            ctx: self.ctx.clone(),
        };
        if self.root.base().props().same_mount(&props) {
            return self.root.receive_props(props);
        }
        tracing::debug!(schema = %props.schema.name(), "remounting form root");
        self.root = mount(props)?;
        Ok(())
    }
}

fn root_context<R>(config: FormConfig<R>) -> FormResult<Context<R>> {
    let FormConfig {
        stylesheet,
        templates,
        i18n,
    } = config;
    Ok(Context {
        auto: AutoMode::Labels,
        label: None,
        path: Path::root(),
        stylesheet: stylesheet.ok_or(FormError::MissingConfig("stylesheet"))?,
        templates: templates.ok_or(FormError::MissingConfig("templates"))?,
        i18n: i18n.ok_or(FormError::MissingConfig("i18n"))?,
        config: Config::new(),
    })
}
