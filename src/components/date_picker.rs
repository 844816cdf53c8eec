use super::{Base, Component, Props};
use crate::error::FormResult;
use crate::template::{DatePickerLocals, Locals, Template};
use crate::theme::StyleRole;
use crate::transformer::Transformer;

pub struct DatePicker<R> {
    base: Base<R>,
}

impl<R> DatePicker<R> {
    pub fn new(props: Props<R>) -> FormResult<Self> {
        let mut picker = Self {
            base: Base::new(props)?,
        };
        let transformer = picker.transformer();
        picker.base.reformat(&transformer);
        Ok(picker)
    }
}

impl<R> Component<R> for DatePicker<R> {
    fn base(&self) -> &Base<R> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base<R> {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "date_picker"
    }

    fn transformer(&self) -> Transformer {
        self.base
            .options()
            .transformer
            .clone()
            .unwrap_or_else(Transformer::date)
    }

    fn template(&self) -> Template<R> {
        self.base
            .template_or(&self.base.props().ctx.templates.date_picker)
    }

    fn locals(&self) -> FormResult<Locals<R>> {
        Ok(Locals::DatePicker(DatePickerLocals {
            base: self.base.base_locals(StyleRole::DatePicker),
            flags: self.base.options().date_picker.clone(),
        }))
    }
}
