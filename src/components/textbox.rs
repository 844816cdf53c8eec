use gpui::SharedString;

use super::{Base, Component, Props, is_numeric};
use crate::context::AutoMode;
use crate::error::FormResult;
use crate::template::{Locals, Template, TextboxLocals};
use crate::theme::StyleRole;
use crate::transformer::Transformer;

/// Free text or numeric entry.
pub struct Textbox<R> {
    base: Base<R>,
}

impl<R> Textbox<R> {
    pub fn new(props: Props<R>) -> FormResult<Self> {
        let mut textbox = Self {
            base: Base::new(props)?,
        };
        let transformer = textbox.transformer();
        textbox.base.reformat(&transformer);
        Ok(textbox)
    }

    /// The explicit placeholder, or the default label when the field
    /// generates placeholders.
    pub fn placeholder(&self) -> Option<SharedString> {
        self.base.options().placeholder.clone().or_else(|| {
            (self.base.auto() == AutoMode::Placeholders)
                .then(|| self.base.default_label())
                .flatten()
        })
    }
}

impl<R> Component<R> for Textbox<R> {
    fn base(&self) -> &Base<R> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base<R> {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "textbox"
    }

    fn transformer(&self) -> Transformer {
        if let Some(transformer) = &self.base.options().transformer {
            return transformer.clone();
        }
        if is_numeric(self.base.type_info()) {
            Transformer::number()
        } else {
            Transformer::text()
        }
    }

    fn template(&self) -> Template<R> {
        self.base.template_or(&self.base.props().ctx.templates.textbox)
    }

    fn locals(&self) -> FormResult<Locals<R>> {
        Ok(Locals::Textbox(TextboxLocals {
            base: self.base.base_locals(StyleRole::Textbox),
            placeholder: self.placeholder(),
            flags: self.base.options().textbox.clone(),
        }))
    }
}
