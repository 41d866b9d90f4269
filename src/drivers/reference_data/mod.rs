//! Driver for generating reference integral data files.

use std::fmt;
use std::path::PathBuf;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use itertools::Itertools;
use log;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::auxiliary::molecule::Molecule;
use crate::basis::ao_integrals::BasisSet;
use crate::basis::so::SOBasis;
use crate::drivers::QcRefDriver;
use crate::integrals::{convert_convention, AOBasis, IndexConvention, IntegralEngine};
use crate::io::format::{log_subtitle, log_title, nice_bool, QcRefOutput};
use crate::io::{qcref_data_path, write_qcref_binary, QcRefFileType};


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// A structure containing control parameters for reference-data generation.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ReferenceDataParams {
    /// A path to a `.xyz` file specifying the geometry of the molecule.
    pub xyz_path: PathBuf,

    /// The name of the basis set the integral engine has been set up with.
    /// This is only used for reporting.
    pub basis_name: String,

    /// The index convention in which two-electron integral tensors are to be
    /// written out.
    #[builder(default = "IndexConvention::Chemist")]
    #[serde(default)]
    pub convention: IndexConvention,

    /// The stem for the output data files. Each written file takes this stem
    /// with a `.qcref.*` extension appended.
    pub save_name: PathBuf,

    /// Optional spatial-orbital coefficient matrix. If present, spatial-orbital
    /// integrals are generated alongside the atomic-orbital ones.
    #[builder(default = "None")]
    pub coefficients: Option<Array2<f64>>,
}

impl ReferenceDataParams {
    /// Returns a builder to construct a [`ReferenceDataParams`] structure.
    pub fn builder() -> ReferenceDataParamsBuilder {
        ReferenceDataParamsBuilder::default()
    }
}

impl ReferenceDataParamsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(Some(cmat)) = self.coefficients.as_ref() {
            if cmat.nrows() != cmat.ncols() {
                return Err(format!(
                    "The coefficient matrix has shape ({}, {}), but a square matrix is required.",
                    cmat.nrows(),
                    cmat.ncols()
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ReferenceDataParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Molecule geometry: {}", self.xyz_path.display())?;
        writeln!(f, "Basis set: {}", self.basis_name)?;
        writeln!(f, "Two-electron index convention: {}", self.convention)?;
        writeln!(
            f,
            "Generate spatial-orbital integrals: {}",
            nice_bool(self.coefficients.is_some())
        )?;
        writeln!(
            f,
            "Save reference data to: {}.qcref.*",
            self.save_name.display()
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A structure to contain reference-data generation results.
#[derive(Clone, Builder, Debug)]
pub struct ReferenceDataResult {
    /// The number of basis functions the integrals were generated for.
    pub nbasis: usize,

    /// The paths of the data files that have been written.
    pub files: Vec<PathBuf>,
}

impl ReferenceDataResult {
    /// Returns a builder to construct a [`ReferenceDataResult`] structure.
    fn builder() -> ReferenceDataResultBuilder {
        ReferenceDataResultBuilder::default()
    }
}

impl fmt::Display for ReferenceDataResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Basis functions: {}", self.nbasis)?;
        writeln!(f, "Files written: {}", self.files.len())?;
        for file in self.files.iter() {
            writeln!(f, "  {}", file.display())?;
        }
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for generating reference integral data files for a molecule from
/// an external integral engine.
#[derive(Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ReferenceDataDriver<'a, E: IntegralEngine> {
    /// The control parameters for reference-data generation.
    parameters: &'a ReferenceDataParams,

    /// The external integral engine providing the atomic-orbital integrals.
    engine: &'a E,

    /// An optional structural description of the basis set the engine has been
    /// set up with, used to cross-check the basis dimension and to report the
    /// shell structure.
    #[builder(default = "None")]
    basis_set: Option<&'a BasisSet<f64, f64>>,

    /// The result of the reference-data generation.
    #[builder(setter(skip), default = "None")]
    result: Option<ReferenceDataResult>,
}

impl<'a, E: IntegralEngine> ReferenceDataDriverBuilder<'a, E> {
    fn validate(&self) -> Result<(), String> {
        let engine = self
            .engine
            .ok_or("No integral engine found.".to_string())?;
        if let Some(Some(bset)) = self.basis_set.as_ref() {
            if bset.n_funcs() != engine.nbasis() {
                return Err(format!(
                    "The basis set has {} functions, but the engine reports {}.",
                    bset.n_funcs(),
                    engine.nbasis()
                ));
            }
        }
        if let Some(params) = self.parameters {
            if let Some(cmat) = params.coefficients.as_ref() {
                if cmat.nrows() != engine.nbasis() {
                    return Err(format!(
                        "The coefficient matrix has dimension {}, but the engine reports {} basis functions.",
                        cmat.nrows(),
                        engine.nbasis()
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<'a, E: IntegralEngine> ReferenceDataDriver<'a, E> {
    /// Returns a builder to construct a [`ReferenceDataDriver`] structure.
    pub fn builder() -> ReferenceDataDriverBuilder<'a, E>
    where
        E: Clone,
    {
        ReferenceDataDriverBuilder::default()
    }

    /// Returns the path a data file of the given type will be written to.
    fn file_path(&self, file_type: QcRefFileType) -> PathBuf {
        qcref_data_path(&self.parameters.save_name, file_type)
    }

    /// Executes reference-data generation.
    fn generate_reference_data(&mut self) -> Result<(), anyhow::Error> {
        log_title("Reference Integral Data Generation");
        log::info!(target: "qcref-output", "");
        let params = self.parameters;
        params.log_output_display();

        let mol = Molecule::from_xyz(&params.xyz_path)?;
        log::info!(target: "qcref-output", "Molecule for reference-data generation:");
        mol.log_output_display();
        log::info!(target: "qcref-output", "");

        let nbasis = self.engine.nbasis();
        if let Some(bset) = self.basis_set {
            log_subtitle("Basis set structure");
            log::info!(target: "qcref-output", "");
            ensure!(
                bset.atom_boundaries().len() == mol.natoms(),
                "The basis set describes {} atoms, but the molecule has {}.",
                bset.atom_boundaries().len(),
                mol.natoms()
            );
            log::info!(
                target: "qcref-output",
                "{} shells, {} basis functions",
                bset.n_shells(),
                bset.n_funcs()
            );
            log::info!(
                target: "qcref-output",
                "Shell angular momenta: {}",
                bset.all_shells()
                    .map(|bsc| bsc.basis_shell().to_string())
                    .join(", ")
            );
            log::info!(target: "qcref-output", "");
        }

        log_subtitle("Atomic-orbital integrals");
        log::info!(target: "qcref-output", "");

        let mut ao_basis = AOBasis::new(self.engine, &mol);
        ao_basis.compute_integrals()?;

        let mut files = Vec::new();

        write_qcref_binary(
            &params.save_name,
            QcRefFileType::Overlap,
            ao_basis.compute_overlap()?,
        )?;
        log::info!(target: "qcref-output", "Written: {}", QcRefFileType::Overlap);
        files.push(self.file_path(QcRefFileType::Overlap));

        write_qcref_binary(
            &params.save_name,
            QcRefFileType::Kinetic,
            ao_basis.compute_kinetic()?,
        )?;
        log::info!(target: "qcref-output", "Written: {}", QcRefFileType::Kinetic);
        files.push(self.file_path(QcRefFileType::Kinetic));

        write_qcref_binary(
            &params.save_name,
            QcRefFileType::NuclearAttraction,
            ao_basis.compute_nuclear_attraction()?,
        )?;
        log::info!(target: "qcref-output", "Written: {}", QcRefFileType::NuclearAttraction);
        files.push(self.file_path(QcRefFileType::NuclearAttraction));

        let g_ao = convert_convention(
            ao_basis.compute_electron_repulsion()?,
            IndexConvention::Chemist,
            params.convention,
        );
        write_qcref_binary(&params.save_name, QcRefFileType::ElectronRepulsion, &g_ao)?;
        log::info!(target: "qcref-output", "Written: {}", QcRefFileType::ElectronRepulsion);
        files.push(self.file_path(QcRefFileType::ElectronRepulsion));
        log::info!(target: "qcref-output", "");

        if let Some(cmat) = params.coefficients.as_ref() {
            log_subtitle("Spatial-orbital integrals");
            log::info!(target: "qcref-output", "");

            let h_core = ao_basis.core_hamiltonian()?;
            let g_ao_chem = ao_basis.compute_electron_repulsion()?;
            let so_basis = SOBasis::new(&h_core, g_ao_chem, cmat)?;

            write_qcref_binary(
                &params.save_name,
                QcRefFileType::CoreHamiltonianSO,
                so_basis.h_so(),
            )?;
            log::info!(target: "qcref-output", "Written: {}", QcRefFileType::CoreHamiltonianSO);
            files.push(self.file_path(QcRefFileType::CoreHamiltonianSO));

            let g_so = convert_convention(
                so_basis.g_so(),
                IndexConvention::Chemist,
                params.convention,
            );
            write_qcref_binary(&params.save_name, QcRefFileType::ElectronRepulsionSO, &g_so)?;
            log::info!(target: "qcref-output", "Written: {}", QcRefFileType::ElectronRepulsionSO);
            files.push(self.file_path(QcRefFileType::ElectronRepulsionSO));
            log::info!(target: "qcref-output", "");
        }

        let result = ReferenceDataResult::builder()
            .nbasis(nbasis)
            .files(files)
            .build()
            .map_err(|err| format_err!(err))?;
        result.log_output_display();
        self.result = Some(result);

        Ok(())
    }
}

impl<'a, E: IntegralEngine> QcRefDriver for ReferenceDataDriver<'a, E> {
    type Params = ReferenceDataParams;

    type Outcome = ReferenceDataResult;

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.generate_reference_data()
    }

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No reference-data generation results found."))
    }
}
