use anyhow::format_err;
use approx::assert_relative_eq;
use nalgebra::Point3;
use ndarray::{Array2, Array4};

use crate::auxiliary::molecule::Molecule;
use crate::integrals::{convert_convention, AOBasis, IndexConvention, IntegralEngine};

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

/// A fake engine returning deterministic index-stencilled integrals.
struct StencilEngine {
    nbasis: usize,
}

impl IntegralEngine for StencilEngine {
    fn nbasis(&self) -> usize {
        self.nbasis
    }

    fn overlap(&self) -> Result<Array2<f64>, anyhow::Error> {
        Ok(Array2::eye(self.nbasis))
    }

    fn kinetic(&self) -> Result<Array2<f64>, anyhow::Error> {
        Ok(Array2::from_shape_fn((self.nbasis, self.nbasis), |(i, j)| {
            (i + j) as f64
        }))
    }

    fn nuclear_attraction(
        &self,
        _coordinates: &[Point3<f64>],
        pseudo_numbers: &[f64],
    ) -> Result<Array2<f64>, anyhow::Error> {
        let total_charge: f64 = pseudo_numbers.iter().sum();
        Ok(-total_charge * Array2::<f64>::eye(self.nbasis))
    }

    fn electron_repulsion(&self) -> Result<Array4<f64>, anyhow::Error> {
        let n = self.nbasis;
        Ok(Array4::from_shape_fn((n, n, n, n), |(i, j, k, l)| {
            (((i * n + j) * n + k) * n + l) as f64
        }))
    }
}

/// An engine whose returned arrays disagree with its declared basis size.
struct MisshapenEngine;

impl IntegralEngine for MisshapenEngine {
    fn nbasis(&self) -> usize {
        3
    }

    fn overlap(&self) -> Result<Array2<f64>, anyhow::Error> {
        Ok(Array2::eye(2))
    }

    fn kinetic(&self) -> Result<Array2<f64>, anyhow::Error> {
        Err(format_err!("Kinetic-energy integrals unavailable."))
    }

    fn nuclear_attraction(
        &self,
        _coordinates: &[Point3<f64>],
        _pseudo_numbers: &[f64],
    ) -> Result<Array2<f64>, anyhow::Error> {
        Ok(Array2::eye(3))
    }

    fn electron_repulsion(&self) -> Result<Array4<f64>, anyhow::Error> {
        Ok(Array4::zeros((3, 3, 3, 2)))
    }
}

fn water() -> Molecule {
    Molecule::from_xyz(format!("{ROOT}/tests/xyz/h2o.xyz")).unwrap()
}

#[test]
fn test_ao_basis_caches_and_shapes() {
    let mol = water();
    let engine = StencilEngine { nbasis: 3 };
    let mut ao = AOBasis::new(&engine, &mol);
    assert_eq!(ao.nbasis(), 3);
    ao.compute_integrals().unwrap();

    let smat = ao.compute_overlap().unwrap();
    assert_eq!(smat.dim(), (3, 3));
    assert_relative_eq!(smat[(0, 0)], 1.0);

    // Nuclear attraction sees the molecular pseudo-numbers (8 + 1 + 1).
    let vmat = ao.compute_nuclear_attraction().unwrap();
    assert_relative_eq!(vmat[(1, 1)], -10.0);

    let gten = ao.compute_electron_repulsion().unwrap();
    assert_eq!(gten.dim(), (3, 3, 3, 3));
    assert_relative_eq!(gten[(1, 0, 2, 1)], (((1 * 3) * 3 + 2) * 3 + 1) as f64);
}

#[test]
fn test_ao_basis_core_hamiltonian() {
    let mol = water();
    let engine = StencilEngine { nbasis: 2 };
    let mut ao = AOBasis::new(&engine, &mol);
    let hmat = ao.core_hamiltonian().unwrap();
    // T[(i, j)] = i + j, V = -10 I.
    assert_relative_eq!(hmat[(0, 0)], -10.0);
    assert_relative_eq!(hmat[(0, 1)], 1.0);
    assert_relative_eq!(hmat[(1, 1)], 2.0 - 10.0);
}

#[test]
fn test_ao_basis_rejects_misshapen_engine() {
    let mol = water();
    let engine = MisshapenEngine;
    let mut ao = AOBasis::new(&engine, &mol);
    assert!(ao.compute_overlap().is_err());
    assert!(ao.compute_kinetic().is_err());
    assert!(ao.compute_nuclear_attraction().is_ok());
    assert!(ao.compute_electron_repulsion().is_err());
}

#[test]
fn test_convert_convention_permutes_axes() {
    let engine = StencilEngine { nbasis: 2 };
    let g_chem = engine.electron_repulsion().unwrap();
    let g_phys = convert_convention(&g_chem, IndexConvention::Chemist, IndexConvention::Physicist);
    for ((i, j, k, l), v) in g_phys.indexed_iter() {
        assert_relative_eq!(*v, g_chem[(i, k, j, l)]);
    }
}

#[test]
fn test_convert_convention_involution() {
    let engine = StencilEngine { nbasis: 3 };
    let g_chem = engine.electron_repulsion().unwrap();
    let there = convert_convention(&g_chem, IndexConvention::Chemist, IndexConvention::Physicist);
    let back = convert_convention(&there, IndexConvention::Physicist, IndexConvention::Chemist);
    assert_eq!(back, g_chem);

    let same = convert_convention(&g_chem, IndexConvention::Chemist, IndexConvention::Chemist);
    assert_eq!(same, g_chem);
}
