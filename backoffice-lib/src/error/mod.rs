//! Error types

mod api;
mod field;
mod location;

pub use api::*;
pub use field::*;
pub use location::*;

/// Top-level error for the back-office core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Typed field access failed.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Location selector rejected a transition.
    #[error(transparent)]
    Location(#[from] LocationError),

    /// The requested operation is not valid in the current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
