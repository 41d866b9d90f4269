use std::env;
use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use ndarray::array;

use crate::integrals::IntegralEngine;
use crate::interfaces::binaries::{BinariesIntegralSource, ByteOrder, MatrixOrder};

fn write_f64_le(path: &PathBuf, values: &[f64]) {
    let bytes = values
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect::<Vec<_>>();
    fs::write(path, bytes).unwrap();
}

fn write_f64_be(path: &PathBuf, values: &[f64]) {
    let bytes = values
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect::<Vec<_>>();
    fs::write(path, bytes).unwrap();
}

fn two_basis_source(prefix: &str, matrix_order: MatrixOrder) -> BinariesIntegralSource {
    let dir = env::temp_dir();
    let overlap = dir.join(format!("{prefix}_ovl"));
    let kinetic = dir.join(format!("{prefix}_kin"));
    let nuclear = dir.join(format!("{prefix}_nuc"));
    let repulsion = dir.join(format!("{prefix}_eri"));
    write_f64_le(&overlap, &[1.0, 0.1, 0.1, 1.0]);
    write_f64_le(&kinetic, &[0.5, 0.2, 0.3, 0.7]);
    write_f64_le(&nuclear, &[-2.0, 0.0, 0.0, -2.5]);
    write_f64_le(&repulsion, &(0..16).map(f64::from).collect::<Vec<_>>());
    BinariesIntegralSource::builder()
        .nbasis(2)
        .overlap(overlap)
        .kinetic(kinetic)
        .nuclear_attraction(nuclear)
        .electron_repulsion(repulsion)
        .matrix_order(matrix_order)
        .build()
        .unwrap()
}

#[test]
fn test_interfaces_binaries_row_major() {
    let source = two_basis_source("binaries_rm", MatrixOrder::RowMajor);
    assert_eq!(source.nbasis(), 2);

    let smat = source.overlap().unwrap();
    assert_relative_eq!(smat, array![[1.0, 0.1], [0.1, 1.0]]);

    let tmat = source.kinetic().unwrap();
    assert_relative_eq!(tmat, array![[0.5, 0.2], [0.3, 0.7]]);

    let vmat = source.nuclear_attraction(&[], &[]).unwrap();
    assert_relative_eq!(vmat, array![[-2.0, 0.0], [0.0, -2.5]]);

    let gmat = source.electron_repulsion().unwrap();
    assert_relative_eq!(gmat[(0, 0, 0, 0)], 0.0);
    assert_relative_eq!(gmat[(0, 1, 0, 1)], 5.0);
    assert_relative_eq!(gmat[(1, 1, 1, 1)], 15.0);
}

#[test]
fn test_interfaces_binaries_col_major() {
    let source = two_basis_source("binaries_cm", MatrixOrder::ColMajor);

    // The kinetic fixture is asymmetric, so the two orders disagree.
    let tmat = source.kinetic().unwrap();
    assert_relative_eq!(tmat, array![[0.5, 0.3], [0.2, 0.7]]);

    // Column-major rank-4 packing reverses the index significance.
    let gmat = source.electron_repulsion().unwrap();
    assert_relative_eq!(gmat[(1, 0, 0, 0)], 1.0);
    assert_relative_eq!(gmat[(0, 0, 0, 1)], 8.0);
}

#[test]
fn test_interfaces_binaries_big_endian() {
    let dir = env::temp_dir();
    let overlap = dir.join("binaries_be_ovl");
    write_f64_be(&overlap, &[1.0, 0.0, 0.0, 1.0]);
    let source = BinariesIntegralSource {
        byte_order: ByteOrder::BigEndian,
        overlap: overlap.clone(),
        ..two_basis_source("binaries_be_rest", MatrixOrder::RowMajor)
    };
    let smat = source.overlap().unwrap();
    assert_relative_eq!(smat, array![[1.0, 0.0], [0.0, 1.0]]);
}

#[test]
fn test_interfaces_binaries_wrong_length() {
    let dir = env::temp_dir();
    let overlap = dir.join("binaries_short_ovl");
    write_f64_le(&overlap, &[1.0, 0.0, 0.0]);
    let source = BinariesIntegralSource {
        overlap,
        ..two_basis_source("binaries_short_rest", MatrixOrder::RowMajor)
    };
    assert!(source.overlap().is_err());
}

#[test]
fn test_interfaces_binaries_missing_file() {
    let source = BinariesIntegralSource {
        overlap: env::temp_dir().join("binaries_no_such_file"),
        ..two_basis_source("binaries_missing", MatrixOrder::RowMajor)
    };
    assert!(source.overlap().is_err());
}
