//! Filter criteria and the filter pipeline.

use std::cmp::Ordering;

use chrono::NaiveDate;

use super::SortSpec;
use super::order::compare_int_float;
use super::sort_stable;
use crate::model::Record;
use crate::model::Value;

/// Status value that disables the status predicate.
pub const STATUS_ALL: &str = "all";

/// Which record fields the predicates of a list screen look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFields {
    search: Vec<String>,
    status: String,
    date: String,
}

impl FilterFields {
    pub fn new(
        search: impl IntoIterator<Item = impl Into<String>>,
        status: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            search: search.into_iter().map(Into::into).collect(),
            status: status.into(),
            date: date.into(),
        }
    }

    /// Fields (dotted paths allowed) searched by the free-text query.
    pub fn search(&self) -> &[String] {
        &self.search
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

/// Inclusive calendar date range.
///
/// The range only filters when both ends are set and `start` is not after
/// `end`. A reversed range is a "date error": it is shown to the user but
/// never blocks the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Returns `true` when both ends are set and `start` is after `end`.
    pub fn is_error(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// Returns the bounds when the range should filter.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }
}

/// The filter values of one list screen.
///
/// # Example
///
/// ```
/// use backoffice_lib::api::query::FilterCriteria;
///
/// let criteria = FilterCriteria::default().with_name("riya");
/// assert!(criteria.can_reset());
/// assert!(!FilterCriteria::default().can_reset());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Free-text query, matched case-insensitively.
    pub name: String,
    /// Exact status, or [`STATUS_ALL`].
    pub status: String,
    pub date: DateRange,
    /// Extra exact-match constraints on arbitrary fields.
    pub exact: Vec<(String, Value)>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            name: String::new(),
            status: STATUS_ALL.to_string(),
            date: DateRange::default(),
            exact: Vec::new(),
        }
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date = DateRange::new(start, end);
        self
    }

    pub fn with_exact(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.exact.push((field.into(), value.into()));
        self
    }

    /// Applies one keyed change.
    pub fn update(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Name(name) => self.name = name,
            FilterUpdate::Status(status) => self.status = status,
            FilterUpdate::StartDate(start) => self.date.start = start,
            FilterUpdate::EndDate(end) => self.date.end = end,
            FilterUpdate::Exact(field, value) => {
                self.exact.retain(|(f, _)| *f != field);
                if !value.is_null() {
                    self.exact.push((field, value));
                }
            }
        }
    }

    /// Returns `true` when the criteria differ from the defaults in a way
    /// that narrows the result (the "clear filters" control is offered).
    pub fn can_reset(&self) -> bool {
        !self.name.is_empty()
            || self.status != STATUS_ALL
            || (self.date.start.is_some() && self.date.end.is_some())
            || !self.exact.is_empty()
    }

    /// The active predicates for a collection with the given fields.
    pub fn predicates<'a>(&'a self, fields: &'a FilterFields) -> Vec<Predicate<'a>> {
        let mut predicates = Vec::new();

        if !self.name.is_empty() {
            predicates.push(Predicate::Text {
                fields: fields.search(),
                needle: self.name.to_lowercase(),
            });
        }
        if self.status != STATUS_ALL {
            predicates.push(Predicate::Exact {
                field: fields.status(),
                value: Value::String(self.status.clone()),
            });
        }
        for (field, value) in &self.exact {
            predicates.push(Predicate::Exact {
                field,
                value: value.clone(),
            });
        }
        if let Some((start, end)) = self.date.bounds() {
            predicates.push(Predicate::Between {
                field: fields.date(),
                start,
                end,
            });
        }

        predicates
    }
}

/// One keyed change to [`FilterCriteria`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Name(String),
    Status(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    /// Sets (or with `Value::Null`, clears) an exact-match constraint.
    Exact(String, Value),
}

/// A single active filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<'a> {
    /// Any of `fields` contains `needle` (already lowercased).
    Text { fields: &'a [String], needle: String },
    /// `field` equals `value`.
    Exact { field: &'a str, value: Value },
    /// `field` is a date within `[start, end]`.
    Between {
        field: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl Predicate<'_> {
    pub fn accepts(&self, record: &Record) -> bool {
        match self {
            Predicate::Text { fields, needle } => fields.iter().any(|field| {
                record
                    .get_path(field)
                    .and_then(Value::search_text)
                    .is_some_and(|text| text.to_lowercase().contains(needle.as_str()))
            }),
            Predicate::Exact { field, value } => {
                record.get_path(field).is_some_and(|v| exact_eq(v, value))
            }
            Predicate::Between { field, start, end } => record
                .get_path(field)
                .and_then(Value::as_date)
                .is_some_and(|date| *start <= date && date <= *end),
        }
    }
}

fn exact_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Int(a), Value::Float(e)) | (Value::Float(e), Value::Int(a)) => {
            compare_int_float(*a, *e) == Ordering::Equal
        }
        _ => actual == expected,
    }
}

/// Keeps the records every active predicate accepts, in input order.
///
/// Pure: the input is left untouched.
pub fn apply(records: &[Record], criteria: &FilterCriteria, fields: &FilterFields) -> Vec<Record> {
    let predicates = criteria.predicates(fields);
    records
        .iter()
        .filter(|record| predicates.iter().all(|p| p.accepts(record)))
        .cloned()
        .collect()
}

/// Stable sort, then filter. The order of the two steps is fixed.
pub fn sort_and_filter(
    records: &[Record],
    sort: &SortSpec,
    criteria: &FilterCriteria,
    fields: &FilterFields,
) -> Vec<Record> {
    let sorted = sort_stable(records, sort);
    apply(&sorted, criteria, fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FilterFields {
        FilterFields::new(["firstName", "email", "customer.name"], "status", "createdAt")
    }

    fn inquiries() -> Vec<Record> {
        vec![
            Record::with_id("1")
                .set("firstName", "Riya")
                .set("email", "riya@mail.in")
                .set("status", "pending")
                .set("createdAt", "2024-05-01T09:30:00.000Z"),
            Record::with_id("2")
                .set("firstName", "Arjun")
                .set("email", "arjun@mail.in")
                .set("status", "completed")
                .set("createdAt", "2024-05-10T18:00:00.000Z"),
            Record::with_id("3")
                .set("firstName", "Meera")
                .set("email", "MEERA@school.org")
                .set("status", "pending")
                .set("customer", Record::new().set("name", "Shah Traders"))
                .set("createdAt", "2024-06-02T00:00:00.000Z"),
        ]
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().filter_map(|r| r.id()).map(|id| id.as_str()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_empty_criteria_pass_everything() {
        let records = inquiries();
        assert_eq!(apply(&records, &FilterCriteria::default(), &fields()), records);
    }

    #[test]
    fn test_text_matches_any_field_case_insensitively() {
        let records = inquiries();
        let by_email = FilterCriteria::new().with_name("school");
        assert_eq!(ids(&apply(&records, &by_email, &fields())), ["3"]);

        let by_nested = FilterCriteria::new().with_name("TRADERS");
        assert_eq!(ids(&apply(&records, &by_nested, &fields())), ["3"]);

        let by_name = FilterCriteria::new().with_name("r");
        assert_eq!(ids(&apply(&records, &by_name, &fields())), ["1", "2", "3"]);
    }

    #[test]
    fn test_status_all_is_a_no_op() {
        let records = inquiries();
        let all = FilterCriteria::new().with_status(STATUS_ALL);
        assert_eq!(apply(&records, &all, &fields()), records);

        let pending = FilterCriteria::new().with_status("pending");
        assert_eq!(ids(&apply(&records, &pending, &fields())), ["1", "3"]);
    }

    #[test]
    fn test_date_range_is_inclusive_by_day() {
        let records = inquiries();
        let may = FilterCriteria::new().with_date_range(date(2024, 5, 1), date(2024, 5, 10));
        assert_eq!(ids(&apply(&records, &may, &fields())), ["1", "2"]);
    }

    #[test]
    fn test_reversed_date_range_is_inactive() {
        let records = inquiries();
        let reversed = FilterCriteria::new().with_date_range(date(2024, 6, 30), date(2024, 5, 1));
        assert!(reversed.date.is_error());
        assert_eq!(
            apply(&records, &reversed, &fields()),
            apply(&records, &FilterCriteria::default(), &fields())
        );
    }

    #[test]
    fn test_half_open_date_range_is_inactive() {
        let records = inquiries();
        let open = FilterCriteria::new().with_date_range(date(2024, 6, 1), None);
        assert!(!open.date.is_error());
        assert_eq!(apply(&records, &open, &fields()).len(), 3);
        assert!(!open.can_reset());
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let records = inquiries();
        let criteria = FilterCriteria::new()
            .with_name("mail.in")
            .with_status("pending")
            .with_date_range(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(ids(&apply(&records, &criteria, &fields())), ["1"]);
    }

    #[test]
    fn test_exact_update_sets_and_clears() {
        let mut criteria = FilterCriteria::new();
        criteria.update(FilterUpdate::Exact("firstName".into(), "Arjun".into()));
        assert_eq!(ids(&apply(&inquiries(), &criteria, &fields())), ["2"]);

        criteria.update(FilterUpdate::Exact("firstName".into(), Value::Null));
        assert!(criteria.exact.is_empty());
        assert!(!criteria.can_reset());
    }

    #[test]
    fn test_exact_numbers_match_across_int_and_float() {
        let big = (1i64 << 53) + 1;
        let records = vec![
            Record::with_id("f1").set("fees", 1500i64),
            Record::with_id("f2").set("fees", big),
        ];
        let fields = FilterFields::new(["fees"], "status", "createdAt");

        let whole = FilterCriteria::new().with_exact("fees", 1500.0f64);
        assert_eq!(apply(&records, &whole, &fields), records[..1]);

        let rounded = FilterCriteria::new().with_exact("fees", (1i64 << 53) as f64);
        assert!(apply(&records, &rounded, &fields).is_empty());
    }

    #[test]
    fn test_sort_then_filter() {
        let records = inquiries();
        let criteria = FilterCriteria::new().with_status("pending");
        let result = sort_and_filter(&records, &SortSpec::desc("firstName"), &criteria, &fields());
        assert_eq!(ids(&result), ["1", "3"]);
    }
}
