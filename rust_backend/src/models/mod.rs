//! Data model: the input visit record and the aggregate views built from it.

pub mod patient;
pub mod summary;

pub use patient::*;
pub use summary::*;
