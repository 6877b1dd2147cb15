//! # Geneva Mesh
//!
//! Mesh kernel for the Geneva mechanism generator: polygon meshes, rigid
//! poses, primitive solids and BSP boolean operations.
//!
//! ## Architecture
//!
//! ```text
//! primitives (Mesh + Pose = Solid) → ops::boolean (Solid × Solid → Solid) → export
//! ```
//!
//! ## Algorithms
//!
//! - **Boolean Operations**: BSP trees (csg.js algorithm) with a fast and an
//!   exact plane classifier
//! - **Cleanup**: vertex welding, T-junction repair, closure check
//! - **Containment**: multi-ray parity vote
//!
//! ## Usage
//!
//! ```rust
//! use geneva_mesh::{difference, make_cylinder, CsgMode, Pose};
//! use glam::DVec3;
//!
//! let wheel = make_cylinder(3.0, 0.2, 64, Pose::identity())?;
//! let hole = make_cylinder(0.25, 0.8, 64, Pose::identity())?;
//! let wheel = difference(wheel, hole, CsgMode::Exact)?;
//! assert!(!wheel.contains_point(DVec3::ZERO));
//! # Ok::<(), geneva_mesh::MeshError>(())
//! ```

pub mod error;
pub mod export;
pub mod mesh;
pub mod ops;
pub mod pose;
pub mod primitives;
pub mod solid;

pub use error::{MeshError, MeshResult};
pub use mesh::Mesh;
pub use ops::boolean::{difference, union, CsgMode};
pub use pose::Pose;
pub use primitives::{make_cube, make_cylinder};
pub use solid::Solid;
