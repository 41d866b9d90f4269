//! QcRef input specifications read from YAML files.

use anyhow::{ensure, format_err, Context};
use serde::{Deserialize, Serialize};

use crate::auxiliary::molecule::Molecule;
use crate::basis::ao::{BasisShell, ShellOrder};
use crate::basis::ao_integrals::{BasisSet, BasisShellContraction, GaussianContraction};
use crate::drivers::reference_data::{ReferenceDataDriver, ReferenceDataParams};
use crate::drivers::QcRefDriver;
use crate::interfaces::binaries::BinariesIntegralSource;
use crate::interfaces::InputHandle;


// ==================
// Struct definitions
// ==================

/// Serialisable/deserialisable specification of one shell in an atomic-orbital basis set.
///
/// Only the structural information needed to determine basis function counts is retained.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct InputBasisShell {
    /// The angular momentum of the shell.
    pub l: u32,

    /// Boolean indicating if the shell is Cartesian rather than pure.
    #[serde(default)]
    pub cart: bool,
}

impl InputBasisShell {
    /// Converts this specification to a [`BasisShell`].
    pub fn to_basis_shell(self) -> BasisShell {
        BasisShell::new(
            self.l,
            if self.cart {
                ShellOrder::Cart
            } else {
                ShellOrder::Pure
            },
        )
    }
}

/// Serialisable/deserialisable specification of a basis set to be retrieved from
/// BasisSetExchange.
#[cfg(feature = "bse")]
#[derive(Clone, Serialize, Deserialize)]
pub struct InputBseBasis {
    /// The name of the basis set to be retrieved.
    pub name: String,

    /// Boolean indicating if the shells contain Cartesian rather than pure functions.
    ///
    /// # Default
    ///
    /// If not specified, this will be taken to be `false`.
    #[serde(default)]
    pub cart: bool,

    /// Boolean indicating if the optimised contraction version of shells should be
    /// requested.
    ///
    /// # Default
    ///
    /// If not specified, this will be taken to be `false`.
    #[serde(default)]
    pub optimised_contraction: bool,

    /// The requested version of the basis set information.
    ///
    /// # Default
    ///
    /// If not specified, this will be taken to be `1`.
    #[serde(default = "default_bse_version")]
    pub version: usize,
}

#[cfg(feature = "bse")]
fn default_bse_version() -> usize {
    1
}

/// Serialisable/deserialisable specification of the basis set the integrals were
/// computed with.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputBasisSpec {
    /// Variant giving the shell structure explicitly, one vector of shells per atom.
    Shells(Vec<Vec<InputBasisShell>>),

    /// Variant naming a basis set whose shell structure is to be retrieved from
    /// BasisSetExchange.
    #[cfg(feature = "bse")]
    Bse(InputBseBasis),
}

/// A structure containing `QcRef` input parameters which can be serialised into and deserialised
/// from a YAML input file.
#[derive(Clone, Serialize, Deserialize)]
pub struct Input {
    /// Specification of the binary files the precomputed atomic-orbital integrals are to be
    /// read from.
    pub source: BinariesIntegralSource,

    /// Optional structural specification of the basis set the integrals were computed with.
    /// If present, the basis dimension is cross-checked against [`Self::source`] and the
    /// shell structure is reported.
    ///
    /// # Default
    ///
    /// If not specified, this will be taken to be `None`.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub basis: Option<InputBasisSpec>,

    /// Control parameters for reference-data generation.
    pub generation: ReferenceDataParams,
}

impl Input {
    /// Constructs a structural [`BasisSet`] from the shell specification in [`Self::basis`],
    /// placing each atom's shells at that atom's position in `mol`.
    fn to_basis_set(
        shells: &[Vec<InputBasisShell>],
        mol: &Molecule,
    ) -> Result<BasisSet<f64, f64>, anyhow::Error> {
        ensure!(
            shells.len() == mol.natoms(),
            "The basis specification describes {} atoms, but the molecule has {}.",
            shells.len(),
            mol.natoms()
        );
        let batms = shells
            .iter()
            .zip(mol.coordinates())
            .map(|(atom_shells, origin)| {
                atom_shells
                    .iter()
                    .map(|input_shell| BasisShellContraction {
                        basis_shell: input_shell.to_basis_shell(),
                        contraction: GaussianContraction { primitives: vec![] },
                        cart_origin: origin,
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        Ok(BasisSet::new(batms))
    }
}

impl InputHandle for Input {
    /// Handles the main input section by generating the requested reference data files.
    fn handle(&self) -> Result<(), anyhow::Error> {
        let params = &self.generation;
        let basis_set = self
            .basis
            .as_ref()
            .map(|basis| {
                let mol = Molecule::from_xyz(&params.xyz_path).with_context(|| {
                    format!("Unable to parse the geometry in `{}`.", params.xyz_path.display())
                })?;
                match basis {
                    InputBasisSpec::Shells(shells) => Input::to_basis_set(shells, &mol),
                    #[cfg(feature = "bse")]
                    InputBasisSpec::Bse(bse) => BasisSet::from_bse(
                        &mol,
                        &bse.name,
                        bse.cart,
                        bse.optimised_contraction,
                        bse.version,
                        false,
                    ),
                }
            })
            .transpose()?;
        let mut driver = ReferenceDataDriver::builder()
            .parameters(params)
            .engine(&self.source)
            .basis_set(basis_set.as_ref())
            .build()
            .map_err(|err| format_err!(err))?;
        driver.run()
    }
}
