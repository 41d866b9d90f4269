use approx::assert_relative_eq;
use ndarray::{array, Array2, Array4};

use crate::basis::so::SOBasis;
use crate::transform::{
    jacobi_rotation_matrix, transform_one_electron_integrals, transform_two_electron_integrals,
};

fn test_integrals(n: usize) -> (Array2<f64>, Array4<f64>) {
    let h_ao = Array2::from_shape_fn((n, n), |(i, j)| ((i + 2 * j + 1) as f64).cos());
    let g_ao = Array4::from_shape_fn((n, n, n, n), |(i, j, k, l)| {
        ((2 * i + 3 * j + 5 * k + 7 * l + 1) as f64).sin()
    });
    (h_ao, g_ao)
}

#[test]
fn test_so_basis_identity_coefficients() {
    let (h_ao, g_ao) = test_integrals(3);
    let so = SOBasis::new(&h_ao, &g_ao, &Array2::eye(3)).unwrap();
    assert_eq!(so.nbasis(), 3);
    for (v, w) in so.h_so().iter().zip(h_ao.iter()) {
        assert_relative_eq!(v, w, epsilon = 1e-12);
    }
    for (v, w) in so.g_so().iter().zip(g_ao.iter()) {
        assert_relative_eq!(v, w, epsilon = 1e-12);
    }
}

#[test]
fn test_so_basis_transform_matches_single_transformation() {
    let (h_ao, g_ao) = test_integrals(3);
    let cmat = array![[0.5, 1.0, 0.0], [1.5, -0.5, 2.0], [0.0, 1.0, -1.0]];
    let tmat = array![[1.0, 0.5, 0.5], [0.0, 2.0, -1.0], [1.0, 0.0, 1.0]];

    let mut so = SOBasis::new(&h_ao, &g_ao, &cmat).unwrap();
    so.transform(&tmat).unwrap();

    let combined = cmat.dot(&tmat);
    let h_expected = transform_one_electron_integrals(&h_ao, &combined).unwrap();
    let g_expected = transform_two_electron_integrals(&g_ao, &combined).unwrap();
    for (v, w) in so.h_so().iter().zip(h_expected.iter()) {
        assert_relative_eq!(v, w, epsilon = 1e-10);
    }
    for (v, w) in so.g_so().iter().zip(g_expected.iter()) {
        assert_relative_eq!(v, w, epsilon = 1e-10);
    }
}

#[test]
fn test_so_basis_rotate_jacobi() {
    let (h_ao, g_ao) = test_integrals(3);
    let theta = 0.3;
    let jmat = jacobi_rotation_matrix(0, 1, theta, 3).unwrap();

    let mut rotated = SOBasis::new(&h_ao, &g_ao, &Array2::eye(3)).unwrap();
    rotated.rotate_jacobi(0, 1, theta).unwrap();

    let reference = SOBasis::new(&h_ao, &g_ao, &jmat).unwrap();
    for (v, w) in rotated.h_so().iter().zip(reference.h_so().iter()) {
        assert_relative_eq!(v, w, epsilon = 1e-12);
    }
    for (v, w) in rotated.g_so().iter().zip(reference.g_so().iter()) {
        assert_relative_eq!(v, w, epsilon = 1e-12);
    }
}

#[test]
fn test_so_basis_shape_mismatch() {
    let (h_ao, g_ao) = test_integrals(2);
    assert!(SOBasis::new(&h_ao, &g_ao, &Array2::eye(3)).is_err());

    let (h3, _) = test_integrals(3);
    assert!(SOBasis::new(&h3, &g_ao, &Array2::eye(3)).is_err());
}
