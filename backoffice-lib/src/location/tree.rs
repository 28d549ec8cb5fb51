//! Read-only country → state → city reference data.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::LocationError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct City {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct State {
    pub name: String,
    #[serde(default)]
    pub cities: Vec<City>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub states: Vec<State>,
}

/// The location hierarchy shared by every address form.
///
/// Cloning is cheap and clones share the same data. Nothing mutates the
/// tree after it is built, so it is passed around without locking.
///
/// Lookups by name return an empty list when the parent is unknown.
///
/// # Example
///
/// ```
/// use backoffice_lib::location::LocationTree;
///
/// let tree = LocationTree::from_json(
///     r#"[{"name":"India","states":[{"name":"Gujarat","cities":[{"name":"Surat"}]}]}]"#,
/// )
/// .unwrap();
///
/// assert_eq!(tree.states_of("India"), ["Gujarat"]);
/// assert!(tree.cities_of("India", "Kerala").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationTree {
    countries: Arc<[Country]>,
}

impl LocationTree {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            countries: countries.into(),
        }
    }

    /// Parses `[{ name, states: [{ name, cities: [{ name }] }] }]`.
    /// Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, LocationError> {
        let countries: Vec<Country> =
            serde_json::from_str(json).map_err(|e| LocationError::InvalidTree(e.to_string()))?;
        Ok(Self::new(countries))
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn country_names(&self) -> Vec<&str> {
        self.countries.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.name == name)
    }

    pub fn state(&self, country: &str, state: &str) -> Option<&State> {
        self.country(country)?.states.iter().find(|s| s.name == state)
    }

    /// State names of `country`.
    pub fn states_of(&self, country: &str) -> Vec<&str> {
        self.country(country)
            .map(|c| c.states.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// City names of `state` within `country`.
    pub fn cities_of(&self, country: &str, state: &str) -> Vec<&str> {
        self.state(country, state)
            .map(|s| s.cities.iter().map(|c| c.name.as_str()).collect())
            .unwrap_or_default()
    }
}
