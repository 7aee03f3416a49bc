use thiserror::Error;

/// Error returned when a field is looked up by a name the type does not have.
///
/// Generated code never produces this on its own: every accessor is bound to
/// a field at compile time. It only surfaces when a name comes from outside,
/// e.g. parsing a `FieldEnum` from a query string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field `{name}` on {type_name}")]
    UnknownField { type_name: &'static str, name: String },
}

impl FieldError {
    pub fn unknown(type_name: &'static str, name: impl Into<String>) -> Self {
        FieldError::UnknownField {
            type_name,
            name: name.into(),
        }
    }
}
