//! Molecules read from `xyz` geometry files.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{self, ensure, format_err, Context};
use nalgebra::Point3;

use crate::auxiliary::atom::{Atom, ElementMap};

#[cfg(test)]
#[path = "molecule_tests.rs"]
mod molecule_tests;

/// A struct containing the atoms constituting a molecule.
#[derive(Clone, Debug)]
pub struct Molecule {
    /// The atoms constituting this molecule.
    pub atoms: Vec<Atom>,
}

impl Molecule {
    /// Parses an `xyz` file to construct a molecule.
    ///
    /// The first line gives the number of atoms, the second line is a comment,
    /// and each subsequent line contains an atomic symbol followed by three
    /// Cartesian coordinates.
    ///
    /// # Arguments
    ///
    /// * `filename` - The `xyz` file to be parsed.
    ///
    /// # Returns
    ///
    /// The parsed [`Molecule`] struct, or an error if the file cannot be read
    /// or has an unexpected format.
    pub fn from_xyz<P: AsRef<Path>>(filename: P) -> Result<Molecule, anyhow::Error> {
        let contents = fs::read_to_string(&filename)
            .with_context(|| format!("Unable to read file {}", filename.as_ref().display()))?;

        let emap = ElementMap::new();
        let mut lines = contents.lines();
        let n_atoms = lines
            .next()
            .ok_or_else(|| format_err!("Empty xyz file."))?
            .trim()
            .parse::<usize>()
            .map_err(|err| format_err!("Unable to parse the atom count: {err}."))?;
        lines.next();

        let atoms = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| Atom::from_xyz(line, &emap))
            .collect::<Result<Vec<_>, _>>()?;
        ensure!(
            atoms.len() == n_atoms,
            "Expected {} atoms, got {} instead.",
            n_atoms,
            atoms.len()
        );
        Ok(Molecule { atoms })
    }

    /// The number of atoms in this molecule.
    pub fn natoms(&self) -> usize {
        self.atoms.len()
    }

    /// The Cartesian coordinates of all atoms in this molecule.
    pub fn coordinates(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|atom| atom.coordinates).collect()
    }

    /// The atomic numbers of all atoms in this molecule.
    pub fn numbers(&self) -> Vec<u32> {
        self.atoms.iter().map(|atom| atom.atomic_number).collect()
    }

    /// The effective core charges of all atoms in this molecule. These equal
    /// the atomic numbers unless effective core potentials are in use.
    pub fn pseudo_numbers(&self) -> Vec<f64> {
        self.atoms.iter().map(|atom| atom.pseudo_number).collect()
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for atom in self.atoms.iter() {
            writeln!(f, "  {atom}")?;
        }
        Ok(())
    }
}
