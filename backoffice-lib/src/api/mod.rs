//! Remote API operations

mod bulk;
pub mod query;
mod remote;

pub use bulk::*;
pub use remote::*;
