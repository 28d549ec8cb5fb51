//! Back-office console core
//!
//! List presentation (sort, filter, page, select) over cached entity
//! collections, bulk deletes with per-id outcomes, and the cascading
//! country → state → city selector used by address forms.

pub mod api;
pub mod cache;
pub mod error;
pub mod location;
pub mod model;
pub mod notice;
pub mod response;
pub mod submit;
pub mod table;
pub mod view;

mod client;

pub use client::*;
pub use notice::Notice;
pub use notice::NoticeLevel;
pub use response::CacheStatus;
pub use response::Response;
pub use submit::SubmitGuard;
pub use view::DeleteReport;
pub use view::ListView;
