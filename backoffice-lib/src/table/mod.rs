//! List table state: paging, sort, density and row selection.

mod config;
mod selection;
mod state;

pub use config::*;
pub use selection::*;
pub use state::*;
