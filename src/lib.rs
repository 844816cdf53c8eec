extern crate self as calmform;

pub mod components;
pub mod context;
pub mod error;
pub mod form;
pub mod i18n;
pub mod introspect;
pub mod options;
pub mod provider;
pub mod schema;
pub mod template;
pub mod theme;
pub mod transformer;
pub mod validation;
pub mod value;

pub use calmform_derive::FormSchema;
pub use components::{Change, Component, Factory, Props, State, Variant, select_component};
pub use context::{AutoMode, Config, Context};
pub use error::{FormError, FormResult};
pub use form::{Form, FormConfig};
pub use i18n::{I18n, Locale, Localization};
pub use options::{ErrorMessage, NullOption, Options, SelectOption, SortOrder};
pub use provider::FormProvider;
pub use schema::{FormSchema, Schema};
pub use template::{Locals, Template, TemplatePatch, Templates, template};
pub use theme::{ColorScheme, ControlColors, PaletteKey, StyleRole, Stylesheet};
pub use transformer::Transformer;
pub use validation::{ValidationError, ValidationResult, validate};
pub use value::{Path, Value};
