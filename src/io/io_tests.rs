use std::env;

use approx::assert_relative_eq;
use ndarray::{array, Array2, Array4};

use crate::io::{qcref_data_path, read_qcref_binary, write_qcref_binary, QcRefFileType};

#[test]
fn test_io_binary_matrix() {
    let smat = array![[1.0, 0.2, 0.0], [0.2, 1.0, 0.1], [0.0, 0.1, 1.0]];
    let name = env::temp_dir().join("io_binary_matrix");
    write_qcref_binary(&name, QcRefFileType::Overlap, &smat).unwrap();
    let smat_r: Array2<f64> = read_qcref_binary(&name, QcRefFileType::Overlap).unwrap();
    assert_eq!(smat_r.dim(), (3, 3));
    assert_relative_eq!(smat, smat_r);
}

#[test]
fn test_io_binary_tensor() {
    let n = 2;
    let gmat = Array4::from_shape_fn((n, n, n, n), |(i, j, k, l)| {
        (((i * n + j) * n + k) * n + l) as f64 / 10.0
    });
    let name = env::temp_dir().join("io_binary_tensor");
    write_qcref_binary(&name, QcRefFileType::ElectronRepulsion, &gmat).unwrap();
    let gmat_r: Array4<f64> =
        read_qcref_binary(&name, QcRefFileType::ElectronRepulsion).unwrap();
    assert_eq!(gmat_r.dim(), (n, n, n, n));
    assert_relative_eq!(gmat, gmat_r);
}

#[test]
fn test_io_data_path_dotted_stem() {
    // A dot in the save stem is part of the stem, not an extension to be
    // replaced.
    assert_eq!(
        qcref_data_path("data/h2o.v2", QcRefFileType::Overlap),
        std::path::PathBuf::from("data/h2o.v2.qcref.ovl")
    );
    assert_eq!(
        qcref_data_path("data/h2o", QcRefFileType::ElectronRepulsion),
        std::path::PathBuf::from("data/h2o.qcref.eri")
    );
}

#[test]
fn test_io_binary_dotted_stem_round_trip() {
    let smat = array![[1.0, 0.5], [0.5, 1.0]];
    let name = env::temp_dir().join("io_binary_matrix.v2");
    write_qcref_binary(&name, QcRefFileType::Overlap, &smat).unwrap();
    assert!(qcref_data_path(&name, QcRefFileType::Overlap).is_file());
    let smat_r: Array2<f64> = read_qcref_binary(&name, QcRefFileType::Overlap).unwrap();
    assert_relative_eq!(smat, smat_r);
}

#[test]
fn test_io_binary_missing_file() {
    assert!(read_qcref_binary::<Array2<f64>, _>(
        env::temp_dir().join("io_binary_no_such_file"),
        QcRefFileType::Kinetic
    )
    .is_err());
}

#[test]
fn test_io_file_type_ext() {
    assert_eq!(QcRefFileType::Overlap.ext(), "qcref.ovl");
    assert_eq!(QcRefFileType::Kinetic.ext(), "qcref.kin");
    assert_eq!(QcRefFileType::NuclearAttraction.ext(), "qcref.nuc");
    assert_eq!(QcRefFileType::ElectronRepulsion.ext(), "qcref.eri");
    assert_eq!(QcRefFileType::CoreHamiltonianSO.ext(), "qcref.hso");
    assert_eq!(QcRefFileType::ElectronRepulsionSO.ext(), "qcref.gso");
}
