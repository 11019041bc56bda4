//! Loaders for exported patient records.
//!
//! - [`json_parser`]: Parse the backend's JSON array of patient documents
//!
//! # Example
//!
//! ```no_run
//! use treatment_analytics::parsing::parse_patients_json;
//! use std::path::Path;
//!
//! let records = parse_patients_json(Path::new("patients.json"))
//!     .expect("Failed to parse patients");
//! ```

pub mod json_parser;


pub use json_parser::{parse_patients_json, parse_patients_json_str};
