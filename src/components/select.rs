use std::cmp::Ordering;

use super::{Base, Component, Props};
use crate::error::FormResult;
use crate::options::{NullOption, SelectOption, SortOrder};
use crate::schema::Kind;
use crate::template::{Locals, SelectLocals, Template};
use crate::theme::StyleRole;
use crate::transformer::Transformer;

/// Single choice from an enumeration or an explicit option list.
pub struct Select<R> {
    base: Base<R>,
}

impl<R> Select<R> {
    pub fn new(props: Props<R>) -> FormResult<Self> {
        let mut select = Self {
            base: Base::new(props)?,
        };
        let transformer = select.transformer();
        select.base.reformat(&transformer);
        Ok(select)
    }

    /// The "no selection" entry, unless disabled.
    pub fn null_option(&self) -> Option<SelectOption> {
        match &self.base.options().null_option {
            NullOption::Default => Some(SelectOption::new("", self.base.i18n().null_option.clone())),
            NullOption::Custom(option) => Some(option.clone()),
            NullOption::Disabled => None,
        }
    }

    /// Explicit choices, or the enumeration members in declaration order,
    /// then sorted by text if requested with the null option in front.
    pub fn choices(&self) -> Vec<SelectOption> {
        let options = self.base.options();
        let mut choices = match &options.choices {
            Some(choices) => choices.clone(),
            None => match self.base.type_info().inner.kind() {
                Kind::Enumeration(enumeration) => enumeration
                    .members()
                    .iter()
                    .map(|(value, text)| SelectOption::new(value.clone(), text.clone()))
                    .collect(),
                _ => Vec::new(),
            },
        };
        if let Some(order) = options.sort {
            choices.sort_by(|left, right| compare_text(left, right, order));
        }
        if let Some(null_option) = self.null_option() {
            choices.insert(0, null_option);
        }
        choices
    }
}

fn compare_text(left: &SelectOption, right: &SelectOption, order: SortOrder) -> Ordering {
    let ordering = left.text.as_ref().cmp(right.text.as_ref());
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

impl<R> Component<R> for Select<R> {
    fn base(&self) -> &Base<R> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base<R> {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "select"
    }

    fn transformer(&self) -> Transformer {
        if let Some(transformer) = &self.base.options().transformer {
            return transformer.clone();
        }
        Transformer::select(self.null_option().map(|option| option.value))
    }

    fn template(&self) -> Template<R> {
        self.base.template_or(&self.base.props().ctx.templates.select)
    }

    fn locals(&self) -> FormResult<Locals<R>> {
        Ok(Locals::Select(SelectLocals {
            base: self.base.base_locals(StyleRole::Select),
            options: self.choices(),
        }))
    }
}
