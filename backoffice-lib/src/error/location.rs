//! Cascading location selection errors

/// Rejected transitions of the country → state → city selector.
///
/// A rejected transition leaves the selection untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// A state was chosen before any country.
    #[error("Cannot select state '{state}' without a country")]
    NoCountry { state: String },

    /// A city was chosen before both country and state.
    #[error("Cannot select city '{city}' without a country and state")]
    NoState { city: String },

    /// The reference hierarchy could not be parsed.
    #[error("Invalid location tree: {0}")]
    InvalidTree(String),
}
