use std::sync::Arc;

use gpui::SharedString;
use indexmap::IndexMap;

use crate::i18n::I18n;
use crate::template::Templates;
use crate::theme::Stylesheet;
use crate::value::{Path, Value};

/// Free-form data forwarded to templates.
pub type Config = IndexMap<SharedString, Value>;

/// What a component generates from its field name when no explicit label or
/// placeholder is configured.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AutoMode {
    #[default]
    Labels,
    Placeholders,
    None,
}

/// Ambient settings a parent hands to each child component.
pub struct Context<R> {
    pub auto: AutoMode,
    pub label: Option<SharedString>,
    pub path: Path,
    pub stylesheet: Arc<Stylesheet>,
    pub templates: Templates<R>,
    pub i18n: Arc<I18n>,
    pub config: Config,
}

impl<R> Clone for Context<R> {
    fn clone(&self) -> Self {
        Self {
            auto: self.auto,
            label: self.label.clone(),
            path: self.path.clone(),
            stylesheet: self.stylesheet.clone(),
            templates: self.templates.clone(),
            i18n: self.i18n.clone(),
            config: self.config.clone(),
        }
    }
}

/// Option-level entries win over the ambient ones.
pub fn merge_config(ambient: &Config, overrides: Option<&Config>) -> Config {
    let mut merged = ambient.clone();
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_matching_keys_only() {
        let ambient = Config::from([
            (SharedString::from("density"), Value::string("compact")),
            (SharedString::from("columns"), Value::Number(2.0)),
        ]);
        let overrides = Config::from([(SharedString::from("columns"), Value::Number(3.0))]);

        let merged = merge_config(&ambient, Some(&overrides));
        assert_eq!(merged.get("density"), Some(&Value::string("compact")));
        assert_eq!(merged.get("columns"), Some(&Value::Number(3.0)));
        assert_eq!(merge_config(&ambient, None), ambient);
    }
}
