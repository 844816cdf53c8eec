use std::sync::Arc;

use convert_case::{Case, Casing};
use gpui::SharedString;
use indexmap::IndexMap;

use super::{Base, Change, Component, Props, mount};
use crate::context::Context;
use crate::error::{FormError, FormResult};
use crate::options::Options;
use crate::schema::{Composite, Kind, Schema};
use crate::template::{Locals, StructLocals, Template, Templates};
use crate::theme::StyleRole;
use crate::validation::{ValidationResult, validate};
use crate::value::{Fields, Path, StructValue, Value};

/// A group of child components, one per composite field.
pub struct Struct<R> {
    base: Base<R>,
    children: IndexMap<SharedString, Box<dyn Component<R>>>,
    no_options: Arc<Options<R>>,
}

impl<R: 'static> Struct<R> {
    pub fn new(props: Props<R>) -> FormResult<Self> {
        let mut structure = Self {
            base: Base::new(props)?,
            children: IndexMap::new(),
            no_options: Arc::new(Options::default()),
        };
        let transformer = structure.transformer();
        structure.base.reformat(&transformer);
        structure.mount_children()?;
        Ok(structure)
    }

    fn composite(&self) -> Option<&Composite> {
        match self.base.type_info().inner.kind() {
            Kind::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Ambient templates with this composite's patch applied.
    fn templates(&self) -> Templates<R> {
        self.base
            .props()
            .ctx
            .templates
            .merged(self.base.options().templates.as_ref())
    }

    fn child_props(&self, name: &SharedString, schema: &Arc<Schema>) -> Props<R> {
        let options = self
            .base
            .options()
            .field_options(name)
            .cloned()
            .unwrap_or_else(|| self.no_options.clone());
        let value = self
            .base
            .state()
            .value
            .get(name)
            .cloned()
            .unwrap_or_default();
        Props {
            schema: schema.clone(),
            options,
            value,
            ctx: Context {
                auto: self.base.auto(),
                label: Some(humanize(name)),
                path: self.base.path().child(name.clone()),
                stylesheet: self.base.stylesheet(),
                templates: self.templates(),
                i18n: self.base.i18n(),
                config: self.base.config(),
            },
        }
    }

    /// Hands fresh props to every child. Children whose field schema and
    /// factory are unchanged are kept; the rest are mounted anew.
    fn mount_children(&mut self) -> FormResult<()> {
        let fields = self
            .composite()
            .map(|composite| composite.fields().clone())
            .unwrap_or_default();
        let mut children = IndexMap::with_capacity(fields.len());
        for (name, schema) in fields {
            let props = self.child_props(&name, &schema);
            let child = match self.children.shift_remove(&name) {
                Some(mut child) if child.base().props().same_mount(&props) => {
                    child.receive_props(props)?;
                    child
                }
                _ => mount(props)?,
            };
            children.insert(name, child);
        }
        self.children = children;
        Ok(())
    }

    /// Folds a child's edit value into the aggregate and reports the
    /// aggregate upward, keeping the originating path.
    pub fn on_field_change(&mut self, field: SharedString, value: Value, path: Path) -> Change {
        let mut fields = self
            .base
            .state()
            .value
            .fields()
            .cloned()
            .unwrap_or_default();
        fields.insert(field, value);
        let aggregate = Value::Object(fields);
        self.base.set_value(aggregate.clone());
        Change {
            value: aggregate,
            path,
        }
    }

    fn field_order(&self) -> Vec<SharedString> {
        match &self.base.options().order {
            Some(order) => order.clone(),
            None => self.children.keys().cloned().collect(),
        }
    }
}

impl<R: 'static> Component<R> for Struct<R> {
    fn base(&self) -> &Base<R> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base<R> {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "struct"
    }

    fn template(&self) -> Template<R> {
        self.base.template_or(&self.templates().structure)
    }

    fn locals(&self) -> FormResult<Locals<R>> {
        let mut inputs = IndexMap::with_capacity(self.children.len());
        for (name, child) in &self.children {
            inputs.insert(name.clone(), child.render()?);
        }
        Ok(Locals::Struct(StructLocals {
            base: self.base.base_locals(StyleRole::Fieldset),
            order: self.field_order(),
            inputs,
        }))
    }

    /// Validates every child, then brands the aggregate with the composite's
    /// name when all of them passed. A refined composite is checked once
    /// more as a whole; its errors are appended to the field errors.
    fn validate(&mut self) -> ValidationResult {
        let mut fields = Fields::with_capacity(self.children.len());
        let mut errors = Vec::new();
        for (name, child) in self.children.iter_mut() {
            let result = child.validate();
            errors.extend(result.errors);
            fields.insert(name.clone(), result.value);
        }

        if !errors.is_empty() {
            self.base.set_has_error(true);
            return ValidationResult::new(Value::Object(fields), errors);
        }

        let value = Value::Struct(StructValue {
            type_name: self.base.type_info().inner.name(),
            fields,
        });
        if self.base.type_info().is_subtype {
            let whole = validate(&value, &self.base.props().schema, self.base.path());
            errors.extend(whole.errors);
        }
        self.base.set_has_error(!errors.is_empty());
        ValidationResult::new(value, errors)
    }

    fn dispatch(&mut self, path: &[SharedString], value: Value) -> FormResult<Change> {
        let Some((field, rest)) = path.split_first() else {
            let change = self.on_change(value);
            self.mount_children()?;
            return Ok(change);
        };
        let child = self
            .children
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownPath {
                path: self.base.path().child(field.clone()).to_string(),
            })?;
        let change = child.dispatch(rest, value)?;
        Ok(self.on_field_change(field.clone(), change.value, change.path))
    }

    fn receive_props(&mut self, props: Props<R>) -> FormResult<()> {
        self.base.replace_props(props)?;
        let transformer = self.transformer();
        self.base.reformat(&transformer);
        self.mount_children()
    }

    fn child(&self, name: &str) -> Option<&(dyn Component<R> + 'static)> {
        self.children.get(name).map(|child| child.as_ref())
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut (dyn Component<R> + 'static)> {
        self.children.get_mut(name).map(|child| child.as_mut())
    }
}

/// `first_name` and `firstName` both become "First Name".
pub(crate) fn humanize(name: &str) -> SharedString {
    name.to_case(Case::Title).into()
}
