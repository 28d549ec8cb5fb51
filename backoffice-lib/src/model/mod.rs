//! Typed models

mod entity;
mod form;
mod record;
mod record_serde;
mod value;

pub use entity::*;
pub use form::*;
pub use record::*;
pub use value::*;
