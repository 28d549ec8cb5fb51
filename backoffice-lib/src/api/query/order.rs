//! Sort specification and the comparator engine.

use std::cmp::Ordering;

use crate::model::Record;
use crate::model::Value;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// The active sort column and direction.
///
/// At most one column is sorted at a time.
///
/// # Example
///
/// ```
/// use backoffice_lib::api::query::{Direction, SortSpec};
///
/// let sort = SortSpec::asc("firstName");
/// assert_eq!(sort.direction, Direction::Asc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field (dotted path allowed) to sort by.
    pub field: String,
    pub direction: Direction,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }
}

/// Orders two records by one field.
///
/// Missing and null values sort below every defined value, so they come
/// first ascending and last descending. A field absent from both records
/// compares equal. The comparator is not stable by itself; see
/// [`sort_stable`].
pub fn compare(a: &Record, b: &Record, field: &str, direction: Direction) -> Ordering {
    let left = a.get_path(field).filter(|v| !v.is_null());
    let right = b.get_path(field).filter(|v| !v.is_null());

    let ordering = match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => compare_values(l, r),
    };
    direction.apply(ordering)
}

/// Total order over two defined values.
///
/// Numbers compare numerically, strings by byte order (case-sensitive, no
/// locale), date-times chronologically. A date-time against a string parses
/// the string as an ISO date. Values of unrelated kinds fall back to a fixed
/// kind rank so the order stays total.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::String(l), Value::String(r)) => l.as_bytes().cmp(r.as_bytes()),
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        (Value::Int(l), Value::Int(r)) => l.cmp(r),
        (Value::Float(l), Value::Float(r)) => compare_floats(*l, *r),
        (Value::Int(l), Value::Float(r)) => compare_int_float(*l, *r),
        (Value::Float(l), Value::Int(r)) => compare_int_float(*r, *l).reverse(),
        (Value::DateTime(l), Value::DateTime(r)) => l.cmp(r),
        (Value::DateTime(_), Value::String(_)) | (Value::String(_), Value::DateTime(_)) => {
            match (left.as_datetime(), right.as_datetime()) {
                (Some(l), Some(r)) => l.cmp(&r),
                _ => kind_rank(left).cmp(&kind_rank(right)),
            }
        }
        _ => kind_rank(left).cmp(&kind_rank(right)),
    }
}

/// Numeric order with `-0.0 == 0.0`. NaN sorts above every number when
/// positive and below when negative, as in [`f64::total_cmp`].
fn compare_floats(l: f64, r: f64) -> Ordering {
    l.partial_cmp(&r).unwrap_or_else(|| l.total_cmp(&r))
}

/// Exact comparison of an integer with a float.
///
/// Casting the integer to `f64` rounds above 2^53, which would make the
/// order non-transitive; the float is split into its integral part and
/// fraction instead.
pub(crate) fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, exactly representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    int.cmp(&(whole as i64)).then_with(|| {
        if float > whole {
            Ordering::Less
        } else if float < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::DateTime(_) => 3,
        Value::String(_) => 4,
        Value::List(_) => 5,
        Value::Record(_) => 6,
    }
}

/// Sorts a collection by `sort`, keeping equal rows in arrival order.
///
/// Each row is decorated with its original index, which breaks every tie in
/// ascending index order regardless of direction. The input is not mutated.
pub fn sort_stable(records: &[Record], sort: &SortSpec) -> Vec<Record> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_unstable_by(|&a, &b| {
        compare(&records[a], &records[b], &sort.field, sort.direction).then(a.cmp(&b))
    });
    order.into_iter().map(|i| records[i].clone()).collect()
}
