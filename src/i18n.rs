use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use gpui::SharedString;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/calmform_i18n_generated.rs"));
}

/// Strings the form layer itself needs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct I18n {
    pub optional: SharedString,
    pub required: SharedString,
    pub null_option: SharedString,
}

impl Default for I18n {
    fn default() -> Self {
        Localization::new().strings()
    }
}

impl I18n {
    pub fn for_locale(locale: impl Into<Locale>) -> Self {
        Localization::new().with_locale(locale).strings()
    }

    /// Suffix appended to an auto-generated label.
    pub fn suffix(&self, is_optional: bool) -> &SharedString {
        if is_optional {
            &self.optional
        } else {
            &self.required
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub enum Locale {
    #[default]
    System,
    Tag(String),
}

impl From<String> for Locale {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("system") {
            return Self::System;
        }
        Self::Tag(value.trim().to_string())
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

#[derive(Clone, Debug)]
pub struct Localization {
    catalog: Arc<Catalog>,
    locale: Locale,
}

impl Default for Localization {
    fn default() -> Self {
        Self::new()
    }
}

impl Localization {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::shared(),
            locale: Locale::System,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn default_locale(&self) -> &'static str {
        self.catalog.default_locale
    }

    pub fn resolved_locale(&self) -> &'static str {
        self.catalog.resolve_locale(self.requested_locale().as_deref())
    }

    pub fn t(&self, key: &str) -> SharedString {
        let resolved = self.resolved_locale();
        match self
            .catalog
            .lookup(resolved, key)
            .or_else(|| self.catalog.lookup(self.catalog.default_locale, key))
        {
            Some(value) => value.into(),
            None => key.to_string().into(),
        }
    }

    pub fn strings(&self) -> I18n {
        I18n {
            optional: self.t("form.optional"),
            required: self.t("form.required"),
            null_option: self.t("form.null_option"),
        }
    }

    #[cfg(feature = "i18n")]
    fn requested_locale(&self) -> Option<String> {
        match &self.locale {
            Locale::System => sys_locale::get_locale(),
            Locale::Tag(tag) => Some(tag.clone()),
        }
    }

    #[cfg(not(feature = "i18n"))]
    fn requested_locale(&self) -> Option<String> {
        match &self.locale {
            Locale::System => None,
            Locale::Tag(tag) => Some(tag.clone()),
        }
    }
}

#[derive(Debug)]
struct Catalog {
    default_locale: &'static str,
    locales: HashMap<&'static str, HashMap<&'static str, &'static str>>,
    normalized_locale_lookup: HashMap<String, &'static str>,
    language_lookup: HashMap<String, &'static str>,
}

impl Catalog {
    fn shared() -> Arc<Self> {
        static CATALOG: OnceLock<Arc<Catalog>> = OnceLock::new();
        CATALOG.get_or_init(|| Arc::new(Self::load())).clone()
    }

    fn load() -> Self {
        let mut locales = HashMap::new();
        let mut normalized_locale_lookup = HashMap::new();
        let mut language_lookup = HashMap::new();
        let mut ambiguous_languages = HashSet::new();

        for (locale, entries) in generated::LOCALES.iter().copied() {
            let normalized = normalize_locale_tag(locale);
            normalized_locale_lookup.insert(normalized.clone(), locale);

            let language = language_of(&normalized);
            match language_lookup.get(&language) {
                Some(existing) if *existing != locale => {
                    ambiguous_languages.insert(language);
                }
                Some(_) => {}
                None => {
                    language_lookup.insert(language, locale);
                }
            }

            locales.insert(locale, entries.iter().copied().collect::<HashMap<_, _>>());
        }

        for language in ambiguous_languages {
            language_lookup.remove(&language);
        }

        Self {
            default_locale: generated::DEFAULT_LOCALE,
            locales,
            normalized_locale_lookup,
            language_lookup,
        }
    }

    fn resolve_locale(&self, requested: Option<&str>) -> &'static str {
        let Some(requested) = requested else {
            return self.default_locale;
        };

        let normalized = normalize_locale_tag(requested);
        if let Some(locale) = self.normalized_locale_lookup.get(&normalized).copied() {
            return locale;
        }

        if let Some(locale) = self.language_lookup.get(&language_of(&normalized)).copied() {
            return locale;
        }

        self.default_locale
    }

    fn lookup(&self, locale: &'static str, key: &str) -> Option<&'static str> {
        self.locales
            .get(locale)
            .and_then(|entries| entries.get(key).copied())
    }
}

fn language_of(normalized: &str) -> String {
    normalized.split('-').next().unwrap_or_default().to_string()
}

fn normalize_locale_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    let without_encoding = trimmed.split('.').next().unwrap_or(trimmed);
    let without_variant = without_encoding
        .split('@')
        .next()
        .unwrap_or(without_encoding);
    without_variant
        .replace('_', "-")
        .split('-')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
