//! Dynamic entity record

use std::collections::HashMap;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;

/// Unique identifier of an entity record.
///
/// The back office hands out opaque string ids (document ids), so ordering
/// is plain byte order. That ordering is what bulk deletes use to fix their
/// processing order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of domain data: a student, an employee, an inquiry, ...
///
/// Records hold field values as a `HashMap<String, Value>`. Top-level records
/// carry a [`RecordId`]; nested records (an `address` object, say) do not.
/// Typed getters accept dotted paths such as `"customer.name"`.
///
/// # Example
///
/// ```
/// use backoffice_lib::model::Record;
///
/// let address = Record::new().set("city", "Surat");
/// let record = Record::with_id("66a1")
///     .set("firstName", "Asha")
///     .set("address", address);
///
/// assert_eq!(record.get_string("firstName").unwrap(), Some("Asha"));
/// assert_eq!(record.get_string("address.city").unwrap(), Some("Surat"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub(crate) id: Option<RecordId>,
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new record without an id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record with the given id.
    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            fields: HashMap::new(),
        }
    }

    /// Returns the record id, if set.
    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// Sets the record id.
    pub fn set_id(&mut self, id: impl Into<RecordId>) {
        self.id = Some(id.into());
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns the value of a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Resolves a dotted path through nested records.
    ///
    /// Returns `None` when any segment is missing or not a record.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        self.lookup(path).ok()
    }

    /// Resolves a dotted path, reporting where the walk stopped.
    pub fn lookup(&self, path: &str) -> Result<&Value, FieldError> {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or(path);
        let mut current = self
            .fields
            .get(first)
            .ok_or_else(|| FieldError::missing(path))?;

        for segment in segments {
            current = match current {
                Value::Record(nested) => nested
                    .fields
                    .get(segment)
                    .ok_or_else(|| FieldError::missing(path))?,
                _ => {
                    return Err(FieldError::NotNested {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    });
                }
            };
        }
        Ok(current)
    }

    /// Returns `true` if the record contains the given top-level field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns a mutable reference to all fields.
    pub fn fields_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Err if the path is missing or holds another type.
    // Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, path: &str) -> Result<Option<&str>, FieldError> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.as_str())),
            other => Err(FieldError::type_mismatch(path, "string", other.type_name())),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, path: &str) -> Result<Option<bool>, FieldError> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            other => Err(FieldError::type_mismatch(path, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, path: &str) -> Result<Option<i64>, FieldError> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            Value::Int(n) => Ok(Some(*n)),
            other => Err(FieldError::type_mismatch(path, "int", other.type_name())),
        }
    }

    /// Gets a numeric field value, widening integers.
    pub fn get_float(&self, path: &str) -> Result<Option<f64>, FieldError> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            Value::Float(n) => Ok(Some(*n)),
            Value::Int(n) => Ok(Some(*n as f64)),
            other => Err(FieldError::type_mismatch(path, "float", other.type_name())),
        }
    }

    /// Gets a date-time field value. ISO strings are parsed.
    pub fn get_datetime(&self, path: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            other => other
                .as_datetime()
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(path, "datetime", other.type_name())),
        }
    }

    /// Gets a nested record.
    pub fn get_record(&self, path: &str) -> Result<Option<&Record>, FieldError> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            Value::Record(r) => Ok(Some(r.as_ref())),
            other => Err(FieldError::type_mismatch(path, "record", other.type_name())),
        }
    }

    /// Gets a list field value.
    pub fn get_list(&self, path: &str) -> Result<Option<&[Value]>, FieldError> {
        match self.lookup(path)? {
            Value::Null => Ok(None),
            Value::List(items) => Ok(Some(items.as_slice())),
            other => Err(FieldError::type_mismatch(path, "list", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inquiry() -> Record {
        Record::with_id("a1")
            .set("studentName", "Riya")
            .set("fees", 1500i64)
            .set("note", Value::Null)
            .set("customer", Record::new().set("name", "Mehta"))
    }

    #[test]
    fn test_typed_getters() {
        let record = inquiry();
        assert_eq!(record.get_string("studentName").unwrap(), Some("Riya"));
        assert_eq!(record.get_int("fees").unwrap(), Some(1500));
        assert_eq!(record.get_float("fees").unwrap(), Some(1500.0));
        assert_eq!(record.get_string("note").unwrap(), None);
    }

    #[test]
    fn test_missing_and_mismatch() {
        let record = inquiry();
        assert_eq!(
            record.get_string("email"),
            Err(FieldError::missing("email"))
        );
        assert_eq!(
            record.get_int("studentName"),
            Err(FieldError::type_mismatch("studentName", "int", "string"))
        );
    }

    #[test]
    fn test_dotted_path() {
        let record = inquiry();
        assert_eq!(record.get_string("customer.name").unwrap(), Some("Mehta"));
        assert!(record.get_path("customer.email").is_none());
        assert!(matches!(
            record.lookup("studentName.first"),
            Err(FieldError::NotNested { .. })
        ));
    }
}
