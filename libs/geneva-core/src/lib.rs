//! # Geneva Core
//!
//! Parametric Geneva drive generator. A [`Parameters`] record goes in; a
//! [`ResultSet`] of named, closed solids comes out.
//!
//! ## Architecture
//!
//! ```text
//! Parameters → DerivedDimensions → assemble (primitives + CSG)
//!            → ResultSet → ResultContainer
//! ```
//!
//! The crate performs no I/O. Hosts read meshes from the result set and
//! render or export them as they see fit.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use geneva_core::{assemble, AssemblyOptions, Parameters, Role};
//!
//! let set = assemble(&Parameters::default(), &AssemblyOptions::default())?;
//! let wheel = set.get(Role::WheelBody).expect("wheel is always produced");
//! println!("wheel has {} faces", wheel.face_count());
//! # Ok::<(), geneva_core::GenevaError>(())
//! ```

pub mod assembler;
pub mod derived;
pub mod error;
pub mod params;
pub mod result;

pub use assembler::{assemble, AssemblyOptions, ReliefHoles};
pub use derived::DerivedDimensions;
pub use error::{GenevaError, GenevaResult};
pub use params::Parameters;
pub use result::{NamedSolid, ResultContainer, ResultSet, Role};
