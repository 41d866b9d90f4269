//! External integral engines and integral bookkeeping.
//!
//! Integral evaluation is an external collaborator boundary: engines such as
//! libint-style libraries implement [`IntegralEngine`] and return dense
//! integral arrays of known shape. This module defines that boundary, the
//! index-ordering conventions of two-electron integrals, and a caching layer
//! over an engine.

use std::fmt;

use anyhow::{self, ensure};
use nalgebra::Point3;
use ndarray::{Array2, Array4, LinalgScalar};
use serde::{Deserialize, Serialize};

use crate::auxiliary::molecule::Molecule;

#[cfg(test)]
#[path = "integrals_tests.rs"]
mod integrals_tests;

// =================
// Trait definitions
// =================

/// Trait defining the behaviours of an external integral engine for a fixed
/// molecule and basis set.
///
/// Implementations are expected to be constructed from a molecular geometry
/// and a basis-set specification by an external integral library; this crate
/// only consumes the integral arrays they return.
pub trait IntegralEngine {
    /// The number of basis functions in the basis set of this engine.
    fn nbasis(&self) -> usize;

    /// Computes the two-centre overlap matrix.
    fn overlap(&self) -> Result<Array2<f64>, anyhow::Error>;

    /// Computes the kinetic-energy integral matrix.
    fn kinetic(&self) -> Result<Array2<f64>, anyhow::Error>;

    /// Computes the nuclear-attraction integral matrix for point charges
    /// `pseudo_numbers` located at `coordinates`.
    fn nuclear_attraction(
        &self,
        coordinates: &[Point3<f64>],
        pseudo_numbers: &[f64],
    ) -> Result<Array2<f64>, anyhow::Error>;

    /// Computes the electron-repulsion integral tensor in chemist's notation
    /// (see [`IndexConvention::Chemist`]).
    fn electron_repulsion(&self) -> Result<Array4<f64>, anyhow::Error>;
}

// ===============
// IndexConvention
// ===============

/// An enumerated type for the index-ordering conventions of two-electron
/// integral tensors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexConvention {
    /// Chemist's notation $`(11|22)`$: the first two indices belong to
    /// electron 1 and the last two to electron 2.
    #[default]
    Chemist,

    /// Physicist's notation $`\langle 12 \vert 12 \rangle`$: the first and
    /// third indices belong to electron 1, the second and fourth to
    /// electron 2.
    Physicist,
}

impl fmt::Display for IndexConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexConvention::Chemist => write!(f, "chemist (11|22)"),
            IndexConvention::Physicist => write!(f, "physicist ⟨12|12⟩"),
        }
    }
}

/// Converts a two-electron integral tensor between index conventions by
/// swapping its second and third axes. The conversion is an involution; when
/// `from` and `to` coincide the tensor is returned unchanged.
///
/// # Arguments
///
/// * `tensor` - A rank-4 tensor of two-electron integrals.
/// * `from` - The convention `tensor` is currently in.
/// * `to` - The requested convention.
///
/// # Returns
///
/// The tensor in the requested convention.
pub fn convert_convention<A>(
    tensor: &Array4<A>,
    from: IndexConvention,
    to: IndexConvention,
) -> Array4<A>
where
    A: LinalgScalar,
{
    if from == to {
        tensor.clone()
    } else {
        let mut permuted = tensor.view();
        permuted.swap_axes(1, 2);
        permuted.as_standard_layout().into_owned()
    }
}

// =======
// AOBasis
// =======

/// A structure caching the atomic-orbital integrals of a molecule computed by
/// an external engine.
///
/// Each integral set is computed at most once; the shapes of engine-returned
/// arrays are validated against the engine's basis size before being cached.
pub struct AOBasis<'a, E: IntegralEngine> {
    /// The external integral engine.
    engine: &'a E,

    /// The molecule the integrals refer to.
    molecule: &'a Molecule,

    /// The cached overlap matrix.
    overlap: Option<Array2<f64>>,

    /// The cached kinetic-energy integral matrix.
    kinetic: Option<Array2<f64>>,

    /// The cached nuclear-attraction integral matrix.
    nuclear_attraction: Option<Array2<f64>>,

    /// The cached electron-repulsion integral tensor in chemist's notation.
    electron_repulsion: Option<Array4<f64>>,
}

/// Verifies that a one-electron integral matrix has shape $`(n, n)`$.
fn check_one_electron_shape(
    matrix: &Array2<f64>,
    nbasis: usize,
    name: &str,
) -> Result<(), anyhow::Error> {
    ensure!(
        matrix.dim() == (nbasis, nbasis),
        "Engine returned a {name} matrix of shape ({}, {}) for a basis of {nbasis} functions.",
        matrix.nrows(),
        matrix.ncols()
    );
    Ok(())
}

/// Verifies that a two-electron integral tensor has shape $`(n, n, n, n)`$.
fn check_two_electron_shape(
    tensor: &Array4<f64>,
    nbasis: usize,
    name: &str,
) -> Result<(), anyhow::Error> {
    ensure!(
        tensor.dim() == (nbasis, nbasis, nbasis, nbasis),
        "Engine returned a {name} tensor of shape {:?} for a basis of {nbasis} functions.",
        tensor.dim()
    );
    Ok(())
}

impl<'a, E: IntegralEngine> AOBasis<'a, E> {
    /// Creates a new [`AOBasis`] for a molecule backed by an external engine.
    ///
    /// # Arguments
    ///
    /// * `engine` - The external integral engine.
    /// * `molecule` - The molecule the integrals refer to.
    pub fn new(engine: &'a E, molecule: &'a Molecule) -> Self {
        Self {
            engine,
            molecule,
            overlap: None,
            kinetic: None,
            nuclear_attraction: None,
            electron_repulsion: None,
        }
    }

    /// The number of basis functions in the basis set.
    pub fn nbasis(&self) -> usize {
        self.engine.nbasis()
    }

    /// Computes and caches the overlap matrix.
    pub fn compute_overlap(&mut self) -> Result<&Array2<f64>, anyhow::Error> {
        if self.overlap.is_none() {
            let smat = self.engine.overlap()?;
            check_one_electron_shape(&smat, self.nbasis(), "overlap")?;
            self.overlap = Some(smat);
        }
        Ok(self
            .overlap
            .as_ref()
            .expect("Overlap integrals have just been computed."))
    }

    /// Computes and caches the kinetic-energy integral matrix.
    pub fn compute_kinetic(&mut self) -> Result<&Array2<f64>, anyhow::Error> {
        if self.kinetic.is_none() {
            let tmat = self.engine.kinetic()?;
            check_one_electron_shape(&tmat, self.nbasis(), "kinetic-energy")?;
            self.kinetic = Some(tmat);
        }
        Ok(self
            .kinetic
            .as_ref()
            .expect("Kinetic-energy integrals have just been computed."))
    }

    /// Computes and caches the nuclear-attraction integral matrix using the
    /// coordinates and effective core charges of the molecule.
    pub fn compute_nuclear_attraction(&mut self) -> Result<&Array2<f64>, anyhow::Error> {
        if self.nuclear_attraction.is_none() {
            let vmat = self
                .engine
                .nuclear_attraction(&self.molecule.coordinates(), &self.molecule.pseudo_numbers())?;
            check_one_electron_shape(&vmat, self.nbasis(), "nuclear-attraction")?;
            self.nuclear_attraction = Some(vmat);
        }
        Ok(self
            .nuclear_attraction
            .as_ref()
            .expect("Nuclear-attraction integrals have just been computed."))
    }

    /// Computes and caches the electron-repulsion integral tensor in
    /// chemist's notation.
    pub fn compute_electron_repulsion(&mut self) -> Result<&Array4<f64>, anyhow::Error> {
        if self.electron_repulsion.is_none() {
            let gten = self.engine.electron_repulsion()?;
            check_two_electron_shape(&gten, self.nbasis(), "electron-repulsion")?;
            self.electron_repulsion = Some(gten);
        }
        Ok(self
            .electron_repulsion
            .as_ref()
            .expect("Electron-repulsion integrals have just been computed."))
    }

    /// Computes and caches all integral sets.
    pub fn compute_integrals(&mut self) -> Result<(), anyhow::Error> {
        self.compute_overlap()?;
        self.compute_kinetic()?;
        self.compute_nuclear_attraction()?;
        self.compute_electron_repulsion()?;
        Ok(())
    }

    /// The core Hamiltonian, the sum of the kinetic-energy and
    /// nuclear-attraction integral matrices.
    pub fn core_hamiltonian(&mut self) -> Result<Array2<f64>, anyhow::Error> {
        self.compute_kinetic()?;
        self.compute_nuclear_attraction()?;
        let tmat = self
            .kinetic
            .as_ref()
            .expect("Kinetic-energy integrals have just been computed.");
        let vmat = self
            .nuclear_attraction
            .as_ref()
            .expect("Nuclear-attraction integrals have just been computed.");
        Ok(tmat + vmat)
    }
}
