//! # Result Container
//!
//! Named solids produced by one generation run, and the container that
//! swaps them in once a run has fully succeeded.

use std::fmt;

use geneva_mesh::{Mesh, Solid};

use crate::assembler::{assemble, AssemblyOptions};
use crate::derived::DerivedDimensions;
use crate::error::GenevaResult;
use crate::params::Parameters;

/// Stable role of a solid in the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// The slotted Geneva wheel with its spoke hub.
    WheelBody,
    /// Crank base hub with pin and stop disc.
    CrankAssembly,
    /// Relief cutter that sits on the crank axis.
    CrankReliefCutter,
    /// Relief cutter that sits on the wheel axis.
    WheelReliefCutter,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::WheelBody,
        Role::CrankAssembly,
        Role::CrankReliefCutter,
        Role::WheelReliefCutter,
    ];

    /// Name exposed to hosts.
    pub fn name(self) -> &'static str {
        match self {
            Role::WheelBody => "wheel-body",
            Role::CrankAssembly => "crank-assembly",
            Role::CrankReliefCutter => "crank-relief-cutter",
            Role::WheelReliefCutter => "wheel-relief-cutter",
        }
    }

    /// Looks a role up by its host name.
    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A solid tagged with its role.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSolid {
    pub role: Role,
    pub solid: Solid,
}

impl NamedSolid {
    pub fn name(&self) -> &'static str {
        self.role.name()
    }

    /// World-space mesh for export or display.
    pub fn mesh(&self) -> Mesh {
        self.solid.world_mesh()
    }
}

/// Ordered output of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    params: Parameters,
    derived: DerivedDimensions,
    solids: Vec<NamedSolid>,
}

impl ResultSet {
    pub(crate) fn new(
        params: Parameters,
        derived: DerivedDimensions,
        solids: Vec<NamedSolid>,
    ) -> Self {
        Self {
            params,
            derived,
            solids,
        }
    }

    /// Parameters the set was generated from.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn derived(&self) -> &DerivedDimensions {
        &self.derived
    }

    /// Solid with the given role, if present.
    pub fn get(&self, role: Role) -> Option<&Solid> {
        self.solids.iter().find(|s| s.role == role).map(|s| &s.solid)
    }

    /// Role names in output order.
    pub fn names(&self) -> Vec<&'static str> {
        self.solids.iter().map(NamedSolid::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedSolid> {
        self.solids.iter()
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn into_solids(self) -> Vec<NamedSolid> {
        self.solids
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a NamedSolid;
    type IntoIter = std::slice::Iter<'a, NamedSolid>;

    fn into_iter(self) -> Self::IntoIter {
        self.solids.iter()
    }
}

/// Holds the latest successful result set.
///
/// A run builds its result set completely before the old one is dropped;
/// a failed run leaves the container untouched.
///
/// # Example
///
/// ```rust,no_run
/// use geneva_core::{AssemblyOptions, Parameters, ResultContainer};
///
/// let mut container = ResultContainer::new();
/// container.regenerate(&Parameters::default(), &AssemblyOptions::default())?;
/// assert_eq!(container.generation(), 1);
/// # Ok::<(), geneva_core::GenevaError>(())
/// ```
#[derive(Debug, Default)]
pub struct ResultContainer {
    current: Option<ResultSet>,
    generation: u64,
}

impl ResultContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the assembler and, on success, replaces the held result set.
    pub fn regenerate(
        &mut self,
        params: &Parameters,
        options: &AssemblyOptions,
    ) -> GenevaResult<&ResultSet> {
        let fresh = assemble(params, options)?;
        Ok(self.replace(fresh))
    }

    /// Installs a result set, dropping the previous one.
    pub fn replace(&mut self, set: ResultSet) -> &ResultSet {
        self.generation += 1;
        if let Some(previous) = self.current.take() {
            tracing::debug!(
                generation = self.generation,
                released = previous.len(),
                "previous result set released"
            );
        }
        self.current.insert(set)
    }

    /// Latest result set, if any run has succeeded.
    pub fn current(&self) -> Option<&ResultSet> {
        self.current.as_ref()
    }

    /// Number of successful runs so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Hands the result set to the caller, leaving the container empty.
    pub fn take(&mut self) -> Option<ResultSet> {
        self.current.take()
    }
}
