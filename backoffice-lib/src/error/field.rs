//! Record field access errors

/// Error type for typed field access on a [`Record`](crate::model::Record).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The record has no field at this path.
    #[error("Field '{path}' not found in record")]
    Missing { path: String },

    /// The field exists but holds a different kind of value.
    #[error("Field '{path}' holds {actual}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A dotted path walked into a value that is not a nested record.
    #[error("Cannot descend into '{segment}' of '{path}': not a record")]
    NotNested { path: String, segment: String },
}

impl FieldError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self::Missing { path: path.into() }
    }

    pub fn type_mismatch(path: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
            actual,
        }
    }
}
