use gpui::SharedString;

/// Integrator mistakes. These are not user-recoverable; validation problems
/// travel inside [`crate::ValidationResult`] instead.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("unsupported type {name}")]
    UnsupportedType { name: SharedString },
    #[error("missing {0} config")]
    MissingConfig(&'static str),
    #[error("no component mounted at path `{path}`")]
    UnknownPath { path: String },
}

pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::FormError;

    #[test]
    fn messages_name_the_offending_piece() {
        assert_eq!(
            FormError::UnsupportedType {
                name: "Array<String>".into()
            }
            .to_string(),
            "unsupported type Array<String>"
        );
        assert_eq!(
            FormError::MissingConfig("templates").to_string(),
            "missing templates config"
        );
        assert_eq!(
            FormError::UnknownPath {
                path: "address.zip".to_string()
            }
            .to_string(),
            "no component mounted at path `address.zip`"
        );
    }
}
