use std::sync::Arc;

use crate::form::FormConfig;
use crate::i18n::{I18n, Locale, Localization};
use crate::theme::Stylesheet;

/// App-wide form defaults, installed as a gpui global.
#[derive(Default)]
pub struct FormProvider {
    stylesheet: Arc<Stylesheet>,
    i18n: Arc<I18n>,
}

impl gpui::Global for FormProvider {}

impl FormProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stylesheet(mut self, configure: impl FnOnce(Arc<Stylesheet>) -> Stylesheet) -> Self {
        self.stylesheet = configure(self.stylesheet).into();
        self
    }

    pub fn set_locale(mut self, locale: impl Into<Locale>) -> Self {
        let localization = Localization::new().with_locale(locale);
        tracing::debug!(locale = localization.resolved_locale(), "form locale set");
        self.i18n = Arc::new(localization.strings());
        self
    }

    pub fn set_i18n(mut self, i18n: I18n) -> Self {
        self.i18n = Arc::new(i18n);
        self
    }

    pub fn init(self, cx: &mut gpui::App) {
        cx.set_global(self);
    }

    /// Config for a form rendered with `templates`, using this provider's
    /// stylesheet and strings.
    pub fn form_config<R>(&self) -> FormConfig<R> {
        FormConfig::empty()
            .with_stylesheet(self.stylesheet.clone())
            .with_i18n(self.i18n.clone())
    }

    pub fn stylesheet(cx: &gpui::App) -> Arc<Stylesheet> {
        Self::stylesheet_of(cx.try_global())
    }

    pub fn i18n(cx: &gpui::App) -> Arc<I18n> {
        Self::i18n_of(cx.try_global())
    }

    pub fn config<R>(cx: &gpui::App) -> FormConfig<R> {
        Self::config_of(cx.try_global())
    }

    fn stylesheet_of(provider: Option<&Self>) -> Arc<Stylesheet> {
        provider
            .map(|provider| provider.stylesheet.clone())
            .unwrap_or_default()
    }

    fn i18n_of(provider: Option<&Self>) -> Arc<I18n> {
        provider
            .map(|provider| provider.i18n.clone())
            .unwrap_or_default()
    }

    fn config_of<R>(provider: Option<&Self>) -> FormConfig<R> {
        match provider {
            Some(provider) => provider.form_config(),
            None => FormProvider::default().form_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorScheme, PaletteKey};

    #[test]
    fn builder_replaces_stylesheet_and_strings() {
        let provider = FormProvider::new()
            .set_stylesheet(|current| {
                (*current)
                    .clone()
                    .with_primary_color(PaletteKey::Green)
                    .with_color_scheme(ColorScheme::Dark)
            })
            .set_locale("it");

        let config = provider.form_config::<String>();
        let stylesheet = config.stylesheet.expect("provider sets a stylesheet");
        assert_eq!(stylesheet.primary_color, PaletteKey::Green);
        assert_eq!(stylesheet.color_scheme, ColorScheme::Dark);
        let i18n = config.i18n.expect("provider sets strings");
        assert_eq!(i18n.optional, " (opzionale)");
        assert!(config.templates.is_none());
    }

    #[test]
    fn missing_global_falls_back_to_defaults() {
        assert_eq!(*FormProvider::stylesheet_of(None), Stylesheet::default());
        assert_eq!(FormProvider::i18n_of(None).optional, I18n::default().optional);

        let config = FormProvider::config_of::<String>(None);
        assert_eq!(
            config.stylesheet.as_deref(),
            Some(&Stylesheet::default())
        );
        assert!(config.i18n.is_some());
        assert!(config.templates.is_none());
    }

    #[test]
    fn installed_global_is_shared_by_every_accessor() {
        let provider = FormProvider::new()
            .set_stylesheet(|current| (*current).clone().with_color_scheme(ColorScheme::Dark))
            .set_i18n(I18n::for_locale("de"));

        let stylesheet = FormProvider::stylesheet_of(Some(&provider));
        assert_eq!(stylesheet.color_scheme, ColorScheme::Dark);
        assert_eq!(
            FormProvider::i18n_of(Some(&provider)).optional,
            I18n::for_locale("de").optional
        );

        let config = FormProvider::config_of::<String>(Some(&provider));
        let shared = config.stylesheet.expect("provider sets a stylesheet");
        assert!(Arc::ptr_eq(&shared, &stylesheet));
    }
}
