//! Country → state → city reference data and the dependent selector.

mod resolver;
mod tree;

pub use resolver::*;
pub use tree::*;
