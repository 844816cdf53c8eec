use super::{Base, Component, Props};
use crate::error::FormResult;
use crate::template::{CheckboxLocals, Locals, Template};
use crate::theme::StyleRole;
use crate::transformer::Transformer;

/// Boolean toggle. A checkbox has no placeholder, so it keeps its label
/// whatever the auto mode.
pub struct Checkbox<R> {
    base: Base<R>,
}

impl<R> Checkbox<R> {
    pub fn new(props: Props<R>) -> FormResult<Self> {
        let mut checkbox = Self {
            base: Base::new(props)?,
        };
        let transformer = checkbox.transformer();
        checkbox.base.reformat(&transformer);
        Ok(checkbox)
    }
}

impl<R> Component<R> for Checkbox<R> {
    fn base(&self) -> &Base<R> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base<R> {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "checkbox"
    }

    fn transformer(&self) -> Transformer {
        self.base
            .options()
            .transformer
            .clone()
            .unwrap_or_else(Transformer::checkbox)
    }

    fn template(&self) -> Template<R> {
        self.base.template_or(&self.base.props().ctx.templates.checkbox)
    }

    fn locals(&self) -> FormResult<Locals<R>> {
        let mut base = self.base.base_locals(StyleRole::Checkbox);
        if base.label.is_none() {
            base.label = self.base.default_label();
        }
        Ok(Locals::Checkbox(CheckboxLocals {
            base,
            flags: self.base.options().checkbox.clone(),
        }))
    }
}
