//! QcRef interface with binary data files.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use byteorder::{BigEndian, LittleEndian};
use derive_builder::Builder;
use nalgebra::Point3;
use ndarray::{Array2, Array4, ShapeBuilder};
use serde::{Deserialize, Serialize};

use crate::integrals::IntegralEngine;
use crate::io::numeric::NumericReader;

#[cfg(test)]
#[path = "binaries_tests.rs"]
mod binaries_tests;

// ================
// Enum definitions
// ================

/// Enumerated type indicating the order the matrix elements are traversed when stored into or
/// read in from a binary file.
#[derive(Clone, Copy, Serialize, Deserialize, Default)]
pub enum MatrixOrder {
    #[default]
    RowMajor,
    ColMajor,
}

/// Enumerated type indicating the byte order of numerical values in binary files.
#[derive(Clone, Copy, Serialize, Deserialize, Default)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

// ==================
// Struct definitions
// ==================

/// Serialisable/deserialisable structure acting as an integral engine whose atomic-orbital
/// integrals have been precomputed by an external program and stored in binary files.
#[derive(Clone, Builder, Serialize, Deserialize)]
pub struct BinariesIntegralSource {
    /// The number of basis functions the stored integrals refer to.
    pub nbasis: usize,

    /// Path to a binary file containing the two-centre atomic-orbital overlap matrix.
    pub overlap: PathBuf,

    /// Path to a binary file containing the atomic-orbital kinetic-energy matrix.
    pub kinetic: PathBuf,

    /// Path to a binary file containing the atomic-orbital nuclear-attraction matrix.
    pub nuclear_attraction: PathBuf,

    /// Path to a binary file containing the atomic-orbital electron-repulsion tensor in
    /// chemist's notation.
    pub electron_repulsion: PathBuf,

    /// Specification of the order matrix elements are packed in binary files.
    #[builder(default = "MatrixOrder::default()")]
    #[serde(default)]
    pub matrix_order: MatrixOrder,

    /// Specification of the byte order numerical values are stored in binary files.
    #[builder(default = "ByteOrder::default()")]
    #[serde(default)]
    pub byte_order: ByteOrder,
}

impl BinariesIntegralSource {
    /// Returns a builder to construct a structure for handling a binaries integral source.
    pub fn builder() -> BinariesIntegralSourceBuilder {
        BinariesIntegralSourceBuilder::default()
    }

    /// Reads all numerical values from a binary file in the byte order of this source.
    fn read_values(&self, path: &Path) -> Result<Vec<f64>, anyhow::Error> {
        let values = match self.byte_order {
            ByteOrder::LittleEndian => NumericReader::<_, LittleEndian, f64>::from_file(path)
                .with_context(|| format!("Unable to read `{}`.", path.display()))?
                .collect::<Vec<_>>(),
            ByteOrder::BigEndian => NumericReader::<_, BigEndian, f64>::from_file(path)
                .with_context(|| format!("Unable to read `{}`.", path.display()))?
                .collect::<Vec<_>>(),
        };
        Ok(values)
    }

    /// Reads a square matrix of dimension [`Self::nbasis`] from a binary file.
    fn read_matrix(&self, path: &Path) -> Result<Array2<f64>, anyhow::Error> {
        let n = self.nbasis;
        let values = self.read_values(path)?;
        ensure!(
            values.len() == n * n,
            "`{}` contains {} values, but {} are expected for a matrix of dimension {n}.",
            path.display(),
            values.len(),
            n * n
        );
        let matrix = match self.matrix_order {
            MatrixOrder::RowMajor => Array2::from_shape_vec((n, n), values)?,
            MatrixOrder::ColMajor => Array2::from_shape_vec((n, n).f(), values)?,
        };
        Ok(matrix)
    }

    /// Reads a rank-4 tensor of dimension [`Self::nbasis`] from a binary file.
    fn read_tensor(&self, path: &Path) -> Result<Array4<f64>, anyhow::Error> {
        let n = self.nbasis;
        let values = self.read_values(path)?;
        ensure!(
            values.len() == n * n * n * n,
            "`{}` contains {} values, but {} are expected for a tensor of dimension {n}.",
            path.display(),
            values.len(),
            n * n * n * n
        );
        let tensor = match self.matrix_order {
            MatrixOrder::RowMajor => Array4::from_shape_vec((n, n, n, n), values)?,
            MatrixOrder::ColMajor => Array4::from_shape_vec((n, n, n, n).f(), values)?,
        };
        Ok(tensor)
    }
}

impl Default for BinariesIntegralSource {
    fn default() -> Self {
        BinariesIntegralSource::builder()
            .nbasis(0)
            .overlap(PathBuf::from("path/to/ao/overlap/matrix"))
            .kinetic(PathBuf::from("path/to/ao/kinetic/matrix"))
            .nuclear_attraction(PathBuf::from("path/to/ao/nuclear/attraction/matrix"))
            .electron_repulsion(PathBuf::from("path/to/ao/repulsion/tensor"))
            .build()
            .expect("Unable to build a default `BinariesIntegralSource`.")
    }
}

impl IntegralEngine for BinariesIntegralSource {
    fn nbasis(&self) -> usize {
        self.nbasis
    }

    fn overlap(&self) -> Result<Array2<f64>, anyhow::Error> {
        self.read_matrix(&self.overlap)
    }

    fn kinetic(&self) -> Result<Array2<f64>, anyhow::Error> {
        self.read_matrix(&self.kinetic)
    }

    // The stored integrals were computed for a fixed geometry, so the point-charge
    // specification is not consulted.
    fn nuclear_attraction(
        &self,
        _coordinates: &[Point3<f64>],
        _pseudo_numbers: &[f64],
    ) -> Result<Array2<f64>, anyhow::Error> {
        self.read_matrix(&self.nuclear_attraction)
    }

    fn electron_repulsion(&self) -> Result<Array4<f64>, anyhow::Error> {
        self.read_tensor(&self.electron_repulsion)
    }
}
