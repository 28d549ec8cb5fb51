//! Cascading country → state → city selection.

use super::LocationTree;
use crate::error::LocationError;
use crate::model::Record;
use crate::model::Value;

const ADDRESS: &str = "address";

/// The `{country, state, city}` triple held in a form's values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependentSelection {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl DependentSelection {
    /// Restores the triple from form values.
    ///
    /// Reads a nested `address` record when there is one, otherwise the
    /// top-level fields. Empty strings count as unset. No clearing rules
    /// run here: a saved address is taken as it was stored.
    pub fn from_record(record: &Record) -> Self {
        let read = |field: &str| -> Option<String> {
            let value = match record.get(ADDRESS) {
                Some(Value::Record(address)) => address.get(field),
                _ => record.get(field),
            };
            value
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            country: read("country"),
            state: read("state"),
            city: read("city"),
        }
    }

    /// Writes the triple back into form values, where
    /// [`DependentSelection::from_record`] would read it. Unset parts become
    /// `Value::Null`.
    pub fn write_to(&self, record: &mut Record) {
        if let Some(Value::Record(address)) = record.fields_mut().get_mut(ADDRESS) {
            self.fill(address);
            return;
        }
        self.fill(record);
    }

    fn fill(&self, target: &mut Record) {
        target.insert("country", self.country.clone());
        target.insert("state", self.state.clone());
        target.insert("city", self.city.clone());
    }
}

/// Drives a [`DependentSelection`] against a [`LocationTree`].
///
/// Choosing a parent always clears its children, even when the new parent
/// has children with the same names. A child chosen before its parent is
/// rejected and the selection is left as it was. Names are not checked
/// against the tree; the option lists are what keep choices valid.
///
/// # Example
///
/// ```
/// use backoffice_lib::location::{LocationResolver, LocationTree};
///
/// let tree = LocationTree::from_json(
///     r#"[{"name":"India","states":[{"name":"Gujarat","cities":[{"name":"Surat"}]}]}]"#,
/// )
/// .unwrap();
///
/// let mut resolver = LocationResolver::new(tree);
/// assert!(resolver.select_state("Gujarat").is_err());
///
/// resolver.select_country("India");
/// resolver.select_state("Gujarat").unwrap();
/// assert_eq!(resolver.city_options(), ["Surat"]);
/// ```
#[derive(Debug, Clone)]
pub struct LocationResolver {
    tree: LocationTree,
    selection: DependentSelection,
}

impl LocationResolver {
    pub fn new(tree: LocationTree) -> Self {
        Self::with_selection(tree, DependentSelection::default())
    }

    /// Starts from a restored selection, e.g. an edit form's saved address.
    pub fn with_selection(tree: LocationTree, selection: DependentSelection) -> Self {
        Self { tree, selection }
    }

    pub fn tree(&self) -> &LocationTree {
        &self.tree
    }

    pub fn selection(&self) -> &DependentSelection {
        &self.selection
    }

    pub fn into_selection(self) -> DependentSelection {
        self.selection
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Sets the country and clears state and city.
    pub fn select_country(&mut self, country: impl Into<String>) {
        self.selection = DependentSelection {
            country: Some(country.into()),
            state: None,
            city: None,
        };
        log::debug!("country -> {:?}", self.selection.country);
    }

    /// Sets the state and clears the city. Needs a country.
    pub fn select_state(&mut self, state: impl Into<String>) -> Result<(), LocationError> {
        let state = state.into();
        if self.selection.country.is_none() {
            return Err(LocationError::NoCountry { state });
        }
        self.selection.state = Some(state);
        self.selection.city = None;
        Ok(())
    }

    /// Sets the city. Needs a country and a state.
    pub fn select_city(&mut self, city: impl Into<String>) -> Result<(), LocationError> {
        let city = city.into();
        if self.selection.country.is_none() || self.selection.state.is_none() {
            return Err(LocationError::NoState { city });
        }
        self.selection.city = Some(city);
        Ok(())
    }

    /// Clears all three fields.
    pub fn clear(&mut self) {
        self.selection = DependentSelection::default();
    }

    // =========================================================================
    // Options
    // =========================================================================

    pub fn country_options(&self) -> Vec<&str> {
        self.tree.country_names()
    }

    /// States of the chosen country, empty when none is chosen.
    pub fn state_options(&self) -> Vec<&str> {
        match &self.selection.country {
            Some(country) => self.tree.states_of(country),
            None => Vec::new(),
        }
    }

    /// Cities of the chosen state, empty unless both parents are chosen.
    pub fn city_options(&self) -> Vec<&str> {
        match (&self.selection.country, &self.selection.state) {
            (Some(country), Some(state)) => self.tree.cities_of(country, state),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> LocationTree {
        LocationTree::from_json(
            r#"[
                {"name": "India", "states": [
                    {"name": "Gujarat", "cities": [{"name": "Surat"}]},
                    {"name": "Georgia", "cities": [{"name": "Nowhere"}]}
                ]},
                {"name": "USA", "states": [
                    {"name": "Georgia", "cities": [{"name": "Atlanta"}]},
                    {"name": "Texas", "cities": [{"name": "Austin"}]}
                ]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_changing_country_clears_children() {
        let mut resolver = LocationResolver::new(tree());
        resolver.select_country("India");
        resolver.select_state("Gujarat").unwrap();
        resolver.select_city("Surat").unwrap();

        resolver.select_country("USA");
        assert_eq!(resolver.selection().state, None);
        assert_eq!(resolver.selection().city, None);
        assert_eq!(resolver.state_options(), ["Georgia", "Texas"]);
    }

    #[test]
    fn test_same_named_state_is_not_carried_over() {
        let mut resolver = LocationResolver::new(tree());
        resolver.select_country("India");
        resolver.select_state("Georgia").unwrap();
        resolver.select_country("USA");
        assert_eq!(resolver.selection().state, None);
    }

    #[test]
    fn test_state_change_clears_city() {
        let mut resolver = LocationResolver::new(tree());
        resolver.select_country("USA");
        resolver.select_state("Texas").unwrap();
        resolver.select_city("Austin").unwrap();
        resolver.select_state("Georgia").unwrap();
        assert_eq!(resolver.selection().city, None);
        assert_eq!(resolver.city_options(), ["Atlanta"]);
    }

    #[test]
    fn test_child_before_parent_is_rejected() {
        let mut resolver = LocationResolver::new(tree());
        assert_eq!(
            resolver.select_state("Texas"),
            Err(LocationError::NoCountry { state: "Texas".into() })
        );
        resolver.select_country("USA");
        assert_eq!(
            resolver.select_city("Austin"),
            Err(LocationError::NoState { city: "Austin".into() })
        );
        assert_eq!(resolver.selection().city, None);
        assert!(resolver.city_options().is_empty());
    }

    #[test]
    fn test_restore_from_nested_address() {
        let values = Record::new().set(
            "address",
            Record::new()
                .set("country", "India")
                .set("state", "Gujarat")
                .set("city", ""),
        );
        let selection = DependentSelection::from_record(&values);
        assert_eq!(selection.country.as_deref(), Some("India"));
        assert_eq!(selection.city, None);

        let resolver = LocationResolver::with_selection(tree(), selection);
        assert_eq!(resolver.city_options(), ["Surat"]);
    }

    #[test]
    fn test_write_back_targets_address() {
        let mut values = Record::new().set("address", Record::new().set("street", "MG Road"));
        let selection = DependentSelection {
            country: Some("USA".into()),
            state: None,
            city: None,
        };
        selection.write_to(&mut values);
        assert_eq!(values.get_string("address.country").unwrap(), Some("USA"));
        assert_eq!(values.get_string("address.state").unwrap(), None);
        assert!(!values.contains("country"));
    }
}
