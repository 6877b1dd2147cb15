//! # Mesh Operations
//!
//! Operations on solids: boolean union and difference (CSG).

pub mod boolean;

pub use boolean::{difference, union, CsgMode};
