//! Logo selection by hostname
//!
//! Maps the request's `Host` value to one of a fixed set of logo URLs using
//! ordered substring rules, falling back to a default.

pub mod table;

pub use table::{ImageRule, ImageTable};
