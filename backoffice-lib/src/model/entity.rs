//! Recognized back-office entity shapes

use crate::api::query::Direction;
use crate::api::query::FilterFields;
use crate::api::query::SortSpec;

/// The entity collections the back office manages.
///
/// Each variant knows where its collection lives on the API, where the rows
/// sit inside the list payload, and which fields the list screen searches,
/// filters and sorts by.
///
/// # Examples
///
/// ```
/// use backoffice_lib::model::Entity;
///
/// assert_eq!(Entity::Inquiry.collection(), "inquiry");
/// assert_eq!(Entity::Inquiry.delete_path("66a1"), "66a1/deleteInquiry");
/// assert_eq!(Entity::Inquiry.bulk_delete_path(), "delete/all-inquiry");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Student,
    Employee,
    Inquiry,
    Demo,
    Batch,
    Fee,
    Expense,
    Attendance,
}

impl Entity {
    pub const ALL: [Entity; 8] = [
        Entity::Student,
        Entity::Employee,
        Entity::Inquiry,
        Entity::Demo,
        Entity::Batch,
        Entity::Fee,
        Entity::Expense,
        Entity::Attendance,
    ];

    /// Path segment of the collection under `/api/company/{company}/`.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Employee => "employee",
            Self::Inquiry => "inquiry",
            Self::Demo => "demo",
            Self::Batch => "batch",
            Self::Fee => "fees",
            Self::Expense => "expense",
            Self::Attendance => "attendance",
        }
    }

    /// Key under `data` holding the rows, or `None` when `data` is the array.
    pub fn payload_key(&self) -> Option<&'static str> {
        match self {
            Self::Student => Some("students"),
            Self::Employee => Some("employees"),
            Self::Inquiry => Some("inquiry"),
            Self::Attendance => Some("attendance"),
            Self::Demo | Self::Batch | Self::Fee | Self::Expense => None,
        }
    }

    fn pascal_name(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Employee => "Employee",
            Self::Inquiry => "Inquiry",
            Self::Demo => "Demo",
            Self::Batch => "Batch",
            Self::Fee => "Fees",
            Self::Expense => "Expense",
            Self::Attendance => "Attendance",
        }
    }

    /// Relative path of the single-record delete endpoint.
    pub fn delete_path(&self, id: &str) -> String {
        format!(
            "{}/delete{}",
            urlencoding::encode(id),
            self.pascal_name()
        )
    }

    /// Relative path of the endpoint that deletes a list of ids at once.
    pub fn bulk_delete_path(&self) -> String {
        format!("delete/all-{}", self.collection())
    }

    /// Fields the list screen's predicates look at.
    pub fn filter_fields(&self) -> FilterFields {
        let search: &[&str] = match self {
            Self::Student => &["firstName", "lastName", "email", "contact", "enrollment_no"],
            Self::Employee => &["firstName", "lastName", "email", "contact", "role"],
            Self::Inquiry => &["firstName", "lastName", "email", "contact"],
            Self::Demo => &["faculty_name", "detail"],
            Self::Batch => &["batch_name", "technology"],
            Self::Fee => &["student.firstName", "student.lastName", "enrollment_no"],
            Self::Expense => &["type", "desc"],
            Self::Attendance => &["student_id.firstName", "student_id.lastName"],
        };
        let date = match self {
            Self::Student | Self::Employee => "joining_date",
            Self::Demo | Self::Expense | Self::Attendance => "date",
            Self::Inquiry | Self::Batch | Self::Fee => "createdAt",
        };
        FilterFields::new(search.iter().copied(), "status", date)
    }

    /// Sort applied when a list screen first mounts.
    pub fn default_sort(&self) -> SortSpec {
        match self {
            Self::Student | Self::Employee | Self::Inquiry => SortSpec::asc("firstName"),
            Self::Batch => SortSpec::asc("batch_name"),
            Self::Demo | Self::Expense | Self::Attendance => {
                SortSpec::new("date", Direction::Desc)
            }
            Self::Fee => SortSpec::new("createdAt", Direction::Desc),
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection())
    }
}
