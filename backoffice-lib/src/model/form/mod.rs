//! Form default reconciliation
//!
//! Edit forms start from a constant set of defaults and then show whatever
//! the server returned for the record being edited. The merge runs as one
//! explicit step so the result never depends on when the fetch completes.

use super::Record;
use super::Value;

/// Overlays `fetched` onto `defaults`, field by field.
///
/// - Fetched values win, including explicit nulls.
/// - Nested records are merged recursively rather than replaced.
/// - Fields the fetched record does not mention keep their default.
/// - The fetched id, if any, becomes the result's id.
///
/// With no fetched record (a create form) the defaults are returned unchanged.
///
/// # Example
///
/// ```
/// use backoffice_lib::model::{Record, Value, reconcile};
///
/// let defaults = Record::new().set("firstName", "").set("dob", Value::Null);
/// let fetched = Record::with_id("e1").set("firstName", "Kiran");
///
/// let values = reconcile(&defaults, Some(&fetched));
/// assert_eq!(values.get_string("firstName").unwrap(), Some("Kiran"));
/// assert_eq!(values.get_string("dob").unwrap(), None);
/// ```
pub fn reconcile(defaults: &Record, fetched: Option<&Record>) -> Record {
    let mut merged = defaults.clone();
    if let Some(fetched) = fetched {
        overlay(&mut merged, fetched);
    }
    merged
}

fn overlay(target: &mut Record, source: &Record) {
    if let Some(id) = &source.id {
        target.id = Some(id.clone());
    }

    for (key, value) in &source.fields {
        if let (Some(Value::Record(existing)), Value::Record(incoming)) =
            (target.fields.get_mut(key), value)
        {
            overlay(existing, incoming);
            continue;
        }
        target.fields.insert(key.clone(), value.clone());
    }
}
