//! Spatial-orbital bases of transformed integrals.

use anyhow::{self, ensure};
use ndarray::{Array2, Array4};

use crate::transform::{
    jacobi_rotation_matrix, transform_one_electron_integrals, transform_two_electron_integrals,
};

#[cfg(test)]
#[path = "so_tests.rs"]
mod so_tests;

/// A structure holding one- and two-electron integrals in a spatial-orbital
/// basis obtained from an atomic-orbital basis by a coefficient matrix.
#[derive(Clone, Debug)]
pub struct SOBasis {
    /// The number of spatial orbitals.
    nbasis: usize,

    /// The one-electron (core Hamiltonian) integrals in the spatial-orbital
    /// basis.
    h_so: Array2<f64>,

    /// The two-electron repulsion integrals in the spatial-orbital basis.
    g_so: Array4<f64>,
}

impl SOBasis {
    /// Constructs a spatial-orbital basis from atomic-orbital integrals and a
    /// coefficient matrix $`\mathbf{C}`$ whose columns are the spatial
    /// orbitals expressed in the atomic-orbital basis.
    ///
    /// # Arguments
    ///
    /// * `h_ao` - The one-electron (core Hamiltonian) integrals in the
    ///   atomic-orbital basis.
    /// * `g_ao` - The two-electron repulsion integrals in the atomic-orbital
    ///   basis.
    /// * `cmat` - The spatial-orbital coefficient matrix.
    ///
    /// # Returns
    ///
    /// The transformed [`SOBasis`], or an error if the shapes are
    /// inconsistent.
    pub fn new(
        h_ao: &Array2<f64>,
        g_ao: &Array4<f64>,
        cmat: &Array2<f64>,
    ) -> Result<Self, anyhow::Error> {
        ensure!(
            h_ao.dim().0 == g_ao.dim().0,
            "One-electron ({}, {}) and two-electron {:?} integral dimensions disagree.",
            h_ao.nrows(),
            h_ao.ncols(),
            g_ao.dim()
        );
        let h_so = transform_one_electron_integrals(h_ao, cmat)?;
        let g_so = transform_two_electron_integrals(g_ao, cmat)?;
        Ok(Self {
            nbasis: h_so.nrows(),
            h_so,
            g_so,
        })
    }

    /// The number of spatial orbitals.
    pub fn nbasis(&self) -> usize {
        self.nbasis
    }

    /// The one-electron integrals in the spatial-orbital basis.
    pub fn h_so(&self) -> &Array2<f64> {
        &self.h_so
    }

    /// The two-electron repulsion integrals in the spatial-orbital basis.
    pub fn g_so(&self) -> &Array4<f64> {
        &self.g_so
    }

    /// Transforms the one- and two-electron integrals in-place according to a
    /// basis transformation matrix $`\mathbf{T}`$.
    ///
    /// # Arguments
    ///
    /// * `tmat` - The basis transformation matrix.
    pub fn transform(&mut self, tmat: &Array2<f64>) -> Result<&mut Self, anyhow::Error> {
        self.h_so = transform_one_electron_integrals(&self.h_so, tmat)?;
        self.g_so = transform_two_electron_integrals(&self.g_so, tmat)?;
        Ok(self)
    }

    /// Transforms the one- and two-electron integrals in-place by a Jacobi
    /// rotation of the orbitals `p` and `q` with angle `theta` in radians.
    ///
    /// # Arguments
    ///
    /// * `p` - The first orbital index (zero-based).
    /// * `q` - The second orbital index (zero-based), strictly greater than
    ///   `p`.
    /// * `theta` - The rotation angle in radians.
    pub fn rotate_jacobi(
        &mut self,
        p: usize,
        q: usize,
        theta: f64,
    ) -> Result<&mut Self, anyhow::Error> {
        let jmat = jacobi_rotation_matrix(p, q, theta, self.nbasis)?;
        self.transform(&jmat)
    }
}
