use std::collections::BTreeMap;

use gpui::Hsla;

pub const COLOR_STOPS: usize = 10;
pub type ColorScale = [&'static str; COLOR_STOPS];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColorScheme {
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PaletteKey {
    Dark,
    Gray,
    Red,
    Blue,
    Green,
}

impl PaletteKey {
    pub const fn scale(self) -> ColorScale {
        match self {
            Self::Dark => [
                "#C9C9C9", "#b8b8b8", "#828282", "#696969", "#424242", "#3b3b3b", "#2e2e2e",
                "#242424", "#1f1f1f", "#141414",
            ],
            Self::Gray => [
                "#f8f9fa", "#f1f3f5", "#e9ecef", "#dee2e6", "#ced4da", "#adb5bd", "#868e96",
                "#495057", "#343a40", "#212529",
            ],
            Self::Red => [
                "#fff5f5", "#ffe3e3", "#ffc9c9", "#ffa8a8", "#ff8787", "#ff6b6b", "#fa5252",
                "#f03e3e", "#e03131", "#c92a2a",
            ],
            Self::Blue => [
                "#e7f5ff", "#d0ebff", "#a5d8ff", "#74c0fc", "#4dabf7", "#339af0", "#228be6",
                "#1c7ed6", "#1971c2", "#1864ab",
            ],
            Self::Green => [
                "#ebfbee", "#d3f9d8", "#b2f2bb", "#8ce99a", "#69db7c", "#51cf66", "#40c057",
                "#37b24d", "#2f9e44", "#2b8a3e",
            ],
        }
    }

    fn palette() -> BTreeMap<PaletteKey, ColorScale> {
        [Self::Dark, Self::Gray, Self::Red, Self::Blue, Self::Green]
            .into_iter()
            .map(|key| (key, key.scale()))
            .collect()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColorValue {
    Palette { key: PaletteKey, shade: u8 },
    White,
    Black,
    Custom(String),
}

impl ColorValue {
    pub const fn palette(key: PaletteKey, shade: u8) -> Self {
        Self::Palette { key, shade }
    }
}

/// Colors for a single-line control: textbox, select and date picker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldTokens {
    pub fg: ColorValue,
    pub border: ColorValue,
    pub border_error: ColorValue,
    pub label: ColorValue,
    pub help: ColorValue,
    pub error: ColorValue,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckboxTokens {
    pub track: ColorValue,
    pub label: ColorValue,
    pub label_error: ColorValue,
    pub help: ColorValue,
    pub error: ColorValue,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldsetTokens {
    pub legend: ColorValue,
    pub legend_error: ColorValue,
    pub border: ColorValue,
    pub help: ColorValue,
    pub error: ColorValue,
}

impl FieldTokens {
    fn defaults_for(primary: PaletteKey, scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                fg: ColorValue::palette(PaletteKey::Dark, 9),
                border: ColorValue::palette(primary, 4),
                border_error: ColorValue::palette(PaletteKey::Red, 6),
                label: ColorValue::palette(PaletteKey::Dark, 9),
                help: ColorValue::palette(PaletteKey::Gray, 7),
                error: ColorValue::palette(PaletteKey::Red, 6),
            },
            ColorScheme::Dark => Self {
                fg: ColorValue::palette(PaletteKey::Gray, 0),
                border: ColorValue::palette(primary, 7),
                border_error: ColorValue::palette(PaletteKey::Red, 4),
                label: ColorValue::palette(PaletteKey::Gray, 0),
                help: ColorValue::palette(PaletteKey::Gray, 3),
                error: ColorValue::palette(PaletteKey::Red, 4),
            },
        }
    }
}

impl CheckboxTokens {
    fn defaults_for(primary: PaletteKey, scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                track: ColorValue::palette(primary, 6),
                label: ColorValue::palette(PaletteKey::Dark, 9),
                label_error: ColorValue::palette(PaletteKey::Red, 6),
                help: ColorValue::palette(PaletteKey::Gray, 7),
                error: ColorValue::palette(PaletteKey::Red, 6),
            },
            ColorScheme::Dark => Self {
                track: ColorValue::palette(primary, 5),
                label: ColorValue::palette(PaletteKey::Gray, 0),
                label_error: ColorValue::palette(PaletteKey::Red, 4),
                help: ColorValue::palette(PaletteKey::Gray, 3),
                error: ColorValue::palette(PaletteKey::Red, 4),
            },
        }
    }
}

impl FieldsetTokens {
    fn defaults_for(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                legend: ColorValue::palette(PaletteKey::Dark, 9),
                legend_error: ColorValue::palette(PaletteKey::Red, 6),
                border: ColorValue::palette(PaletteKey::Gray, 3),
                help: ColorValue::palette(PaletteKey::Gray, 7),
                error: ColorValue::palette(PaletteKey::Red, 6),
            },
            ColorScheme::Dark => Self {
                legend: ColorValue::palette(PaletteKey::Gray, 0),
                legend_error: ColorValue::palette(PaletteKey::Red, 4),
                border: ColorValue::palette(PaletteKey::Dark, 4),
                help: ColorValue::palette(PaletteKey::Gray, 3),
                error: ColorValue::palette(PaletteKey::Red, 4),
            },
        }
    }
}

/// Which token set a component paints with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StyleRole {
    Textbox,
    Select,
    DatePicker,
    Checkbox,
    Fieldset,
}

/// Resolved colors for one control in its current error state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlColors {
    pub label: Hsla,
    pub text: Hsla,
    pub border: Hsla,
    pub help: Hsla,
    pub error: Hsla,
}

/// Visual theme handed to templates. An override on a field replaces the
/// ambient stylesheet as a whole.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stylesheet {
    pub white: &'static str,
    pub black: &'static str,
    pub primary_color: PaletteKey,
    pub color_scheme: ColorScheme,
    pub palette: BTreeMap<PaletteKey, ColorScale>,
    pub textbox: FieldTokens,
    pub select: FieldTokens,
    pub date_picker: FieldTokens,
    pub checkbox: CheckboxTokens,
    pub fieldset: FieldsetTokens,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::defaults_for(PaletteKey::Blue, ColorScheme::Light)
    }
}

impl Stylesheet {
    pub fn defaults_for(primary: PaletteKey, scheme: ColorScheme) -> Self {
        Self {
            white: "#fff",
            black: "#000",
            primary_color: primary,
            color_scheme: scheme,
            palette: PaletteKey::palette(),
            textbox: FieldTokens::defaults_for(primary, scheme),
            select: FieldTokens::defaults_for(primary, scheme),
            date_picker: FieldTokens::defaults_for(primary, scheme),
            checkbox: CheckboxTokens::defaults_for(primary, scheme),
            fieldset: FieldsetTokens::defaults_for(scheme),
        }
    }

    pub fn with_primary_color(self, primary: PaletteKey) -> Self {
        Self {
            palette: self.palette,
            ..Self::defaults_for(primary, self.color_scheme)
        }
    }

    pub fn with_color_scheme(self, scheme: ColorScheme) -> Self {
        Self {
            palette: self.palette,
            ..Self::defaults_for(self.primary_color, scheme)
        }
    }

    pub fn with_palette_override(mut self, key: PaletteKey, scale: ColorScale) -> Self {
        self.palette.insert(key, scale);
        self
    }

    pub fn resolve_color(&self, token: &ColorValue) -> String {
        match token {
            ColorValue::Palette { key, shade } => self
                .palette
                .get(key)
                .and_then(|scale| scale.get(*shade as usize))
                .unwrap_or(&self.black)
                .to_string(),
            ColorValue::White => self.white.to_string(),
            ColorValue::Black => self.black.to_string(),
            ColorValue::Custom(value) => value.clone(),
        }
    }

    pub fn resolve_hsla(&self, token: &ColorValue) -> Hsla {
        let raw = self.resolve_color(token);
        gpui::Rgba::try_from(raw.as_str())
            .map(Into::into)
            .unwrap_or_else(|_| gpui::black())
    }

    pub fn colors(&self, role: StyleRole, has_error: bool) -> ControlColors {
        let field = |tokens: &FieldTokens| ControlColors {
            label: self.resolve_hsla(&tokens.label),
            text: self.resolve_hsla(&tokens.fg),
            border: self.resolve_hsla(if has_error {
                &tokens.border_error
            } else {
                &tokens.border
            }),
            help: self.resolve_hsla(&tokens.help),
            error: self.resolve_hsla(&tokens.error),
        };
        match role {
            StyleRole::Textbox => field(&self.textbox),
            StyleRole::Select => field(&self.select),
            StyleRole::DatePicker => field(&self.date_picker),
            StyleRole::Checkbox => {
                let tokens = &self.checkbox;
                let label = self.resolve_hsla(if has_error {
                    &tokens.label_error
                } else {
                    &tokens.label
                });
                ControlColors {
                    label,
                    text: label,
                    border: self.resolve_hsla(&tokens.track),
                    help: self.resolve_hsla(&tokens.help),
                    error: self.resolve_hsla(&tokens.error),
                }
            }
            StyleRole::Fieldset => {
                let tokens = &self.fieldset;
                let legend = self.resolve_hsla(if has_error {
                    &tokens.legend_error
                } else {
                    &tokens.legend
                });
                ControlColors {
                    label: legend,
                    text: legend,
                    border: self.resolve_hsla(&tokens.border),
                    help: self.resolve_hsla(&tokens.help),
                    error: self.resolve_hsla(&tokens.error),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_scheme_switch_rebuilds_tokens() {
        let light = Stylesheet::default();
        let dark = light.clone().with_color_scheme(ColorScheme::Dark);
        assert_eq!(dark.color_scheme, ColorScheme::Dark);
        assert_ne!(light.textbox, dark.textbox);
        assert_eq!(dark.primary_color, PaletteKey::Blue);
    }

    #[test]
    fn palette_tokens_resolve_to_hex() {
        let stylesheet = Stylesheet::default();
        assert_eq!(
            stylesheet.resolve_color(&stylesheet.textbox.border_error),
            "#fa5252"
        );
        assert_eq!(
            stylesheet.resolve_color(&ColorValue::palette(PaletteKey::Gray, 42)),
            "#000"
        );
    }

    #[test]
    fn palette_overrides_survive_scheme_changes() {
        let custom = ["#000000"; COLOR_STOPS];
        let stylesheet = Stylesheet::default()
            .with_palette_override(PaletteKey::Red, custom)
            .with_color_scheme(ColorScheme::Dark);
        assert_eq!(stylesheet.resolve_color(&stylesheet.textbox.error), "#000000");
    }

    #[test]
    fn error_state_switches_border_and_label_colors() {
        let stylesheet = Stylesheet::default();
        let red = stylesheet.resolve_hsla(&ColorValue::palette(PaletteKey::Red, 6));

        let calm = stylesheet.colors(StyleRole::Textbox, false);
        let failing = stylesheet.colors(StyleRole::Textbox, true);
        assert_ne!(calm.border, red);
        assert_eq!(failing.border, red);
        assert_eq!(calm.label, failing.label);

        let checkbox = stylesheet.colors(StyleRole::Checkbox, true);
        assert_eq!(checkbox.label, red);
        assert_eq!(stylesheet.colors(StyleRole::Fieldset, true).label, red);
    }

    #[test]
    fn invalid_custom_colors_fall_back_to_black() {
        let stylesheet = Stylesheet::default();
        assert_eq!(
            stylesheet.resolve_hsla(&ColorValue::Custom("not-a-color".to_string())),
            gpui::black()
        );
    }
}
