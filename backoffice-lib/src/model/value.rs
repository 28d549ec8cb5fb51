//! Value enum for dynamic field values

use std::borrow::Cow;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;

use super::Record;

/// A dynamic value held by one field of a [`Record`].
///
/// The back-office API speaks JSON, so the variants follow the JSON data
/// model, with `DateTime` added for values built in code and `Record` for
/// nested objects (e.g. an employee's `address`).
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integral number | `Int` |
/// | fractional number | `Float` |
/// | string | `String` |
/// | array | `List` |
/// | object | `Record` |
///
/// # Example
///
/// ```
/// use backoffice_lib::model::Value;
///
/// let name = Value::from("Asha");
/// let fee = Value::from(12_500i64);
/// let empty = Value::Null;
/// assert!(empty.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value. ISO-8601 dates usually arrive as strings.
    String(String),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// JSON array.
    List(Vec<Value>),
    /// Nested object.
    Record(Box<Record>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value of `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Interprets the value as a point in time.
    ///
    /// Accepts `DateTime` values and strings in RFC 3339, `YYYY-MM-DDTHH:MM:SS`
    /// or plain `YYYY-MM-DD` form (midnight UTC).
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::String(s) => parse_datetime(s),
            _ => None,
        }
    }

    /// Interprets the value as a calendar date (UTC).
    pub fn as_date(&self) -> Option<NaiveDate> {
        self.as_datetime().map(|dt| dt.date_naive())
    }

    /// Text used by free-text search.
    ///
    /// Strings are returned as-is and numbers are rendered, so a numeric
    /// `contact` field is still searchable. Other variants are not text.
    pub fn search_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Int(n) => Some(Cow::Owned(n.to_string())),
            Value::Float(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        }
    }
}

pub(crate) fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(Box::new(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_as_datetime_accepts_iso_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 22, 0, 0, 0).unwrap();
        assert_eq!(Value::from("2024-05-22").as_datetime(), Some(expected));
        assert_eq!(
            Value::from("2024-05-22T00:00:00.000Z").as_datetime(),
            Some(expected)
        );
        assert_eq!(Value::from("2024-05-22T00:00:00").as_datetime(), Some(expected));
        assert_eq!(Value::from("yesterday").as_datetime(), None);
        assert_eq!(Value::Int(3).as_datetime(), None);
    }

    #[test]
    fn test_search_text() {
        assert_eq!(Value::from("Asha").search_text().as_deref(), Some("Asha"));
        assert_eq!(
            Value::from(9876543210i64).search_text().as_deref(),
            Some("9876543210")
        );
        assert!(Value::Null.search_text().is_none());
        assert!(Value::Bool(true).search_text().is_none());
    }
}
