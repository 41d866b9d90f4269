use approx::assert_relative_eq;

use crate::auxiliary::atom::{Atom, ElementMap};
use crate::auxiliary::molecule::Molecule;

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

#[test]
fn test_atom_from_xyz() {
    let emap = ElementMap::new();
    let atom = Atom::from_xyz("O 0.0 0.0 0.1173", &emap).unwrap();
    assert_eq!(atom.atomic_number, 8);
    assert_eq!(atom.atomic_symbol, "O");
    assert_relative_eq!(atom.pseudo_number, 8.0);
    assert_relative_eq!(atom.coordinates[2], 0.1173);

    assert!(Atom::from_xyz("O 0.0 0.0", &emap).is_err());
    assert!(Atom::from_xyz("Xx 0.0 0.0 0.0", &emap).is_err());
    assert!(Atom::from_xyz("O 0.0 zero 0.0", &emap).is_err());
}

#[test]
fn test_molecule_from_xyz() {
    let path = format!("{ROOT}/tests/xyz/h2o.xyz");
    let mol = Molecule::from_xyz(&path).unwrap();
    assert_eq!(mol.natoms(), 3);
    assert_eq!(mol.numbers(), vec![8, 1, 1]);
    assert_eq!(mol.pseudo_numbers(), vec![8.0, 1.0, 1.0]);
    let coords = mol.coordinates();
    assert_relative_eq!(coords[1][1], 0.7572);
    assert_relative_eq!(coords[2][1], -0.7572);
}

#[test]
fn test_molecule_from_xyz_missing_file() {
    assert!(Molecule::from_xyz("no/such/file.xyz").is_err());
}
