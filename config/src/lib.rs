//! # Config Crate
//!
//! Centralized configuration constants for the Geneva mechanism generator.
//! All tolerances, tessellation bounds and default mechanism parameters are
//! defined here so the mesh kernel and the assembler agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EXACT_PLANE_EPSILON, VERTEX_WELD_EPSILON, DEFAULT_VERTICES};
//!
//! // The weld tolerance must cover the thinnest sliver exact mode can emit
//! assert!(VERTEX_WELD_EPSILON > EXACT_PLANE_EPSILON);
//!
//! let requested: Option<u32> = None;
//! let vertices = requested.unwrap_or(DEFAULT_VERTICES);
//! assert_eq!(vertices, 128);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure constants and small helpers

pub mod constants;

#[cfg(test)]
mod tests;
