//! Input/output for QcRef data.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::format_err;
use serde::{de::DeserializeOwned, Serialize};

pub(crate) mod format;
pub mod numeric;

#[cfg(test)]
#[path = "io_tests.rs"]
mod io_tests;

// ================
// Enum definitions
// ================

/// Enumerated type indicating the type of a QcRef data file.
#[derive(Clone, Copy, Debug)]
pub enum QcRefFileType {
    /// Variant indicating a file containing the atomic-orbital overlap matrix.
    Overlap,

    /// Variant indicating a file containing the atomic-orbital kinetic-energy matrix.
    Kinetic,

    /// Variant indicating a file containing the atomic-orbital nuclear-attraction matrix.
    NuclearAttraction,

    /// Variant indicating a file containing the atomic-orbital electron-repulsion tensor.
    ElectronRepulsion,

    /// Variant indicating a file containing the spatial-orbital core Hamiltonian matrix.
    CoreHamiltonianSO,

    /// Variant indicating a file containing the spatial-orbital electron-repulsion tensor.
    ElectronRepulsionSO,
}

impl QcRefFileType {
    /// Returns the extension associated with the file type.
    pub fn ext(&self) -> String {
        match self {
            QcRefFileType::Overlap => "qcref.ovl".to_string(),
            QcRefFileType::Kinetic => "qcref.kin".to_string(),
            QcRefFileType::NuclearAttraction => "qcref.nuc".to_string(),
            QcRefFileType::ElectronRepulsion => "qcref.eri".to_string(),
            QcRefFileType::CoreHamiltonianSO => "qcref.hso".to_string(),
            QcRefFileType::ElectronRepulsionSO => "qcref.gso".to_string(),
        }
    }
}

impl fmt::Display for QcRefFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QcRefFileType::Overlap => write!(f, "AO overlap"),
            QcRefFileType::Kinetic => write!(f, "AO kinetic energy"),
            QcRefFileType::NuclearAttraction => write!(f, "AO nuclear attraction"),
            QcRefFileType::ElectronRepulsion => write!(f, "AO electron repulsion"),
            QcRefFileType::CoreHamiltonianSO => write!(f, "SO core Hamiltonian"),
            QcRefFileType::ElectronRepulsionSO => write!(f, "SO electron repulsion"),
        }
    }
}

// =========
// Functions
// =========

/// Returns the path of a QcRef data file of a given type for a save stem.
///
/// The `.qcref.*` extension is appended to the stem rather than substituted
/// for an existing extension, so a stem such as `h2o.v2` yields
/// `h2o.v2.qcref.ovl`.
///
/// # Arguments
///
/// * `name` - The save stem.
/// * `file_type` - The type of the QcRef file.
///
/// # Returns
///
/// The full path of the data file.
pub fn qcref_data_path<P: AsRef<Path>>(name: P, file_type: QcRefFileType) -> PathBuf {
    let mut path = name.as_ref().as_os_str().to_os_string();
    path.push(".");
    path.push(file_type.ext());
    PathBuf::from(path)
}

/// Reads a QcRef binary file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (without `.qcref.*` extension).
/// * `file_type` - The type of the QcRef file to be read in.
///
/// # Returns
///
/// A [`Result`] containing the structure deserialised from the read-in file.
pub fn read_qcref_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: QcRefFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let path = qcref_data_path(name, file_type);
    let reader = BufReader::new(File::open(path)?);
    bincode::deserialize_from(reader).map_err(|err| format_err!(err))
}

/// Serialises a structure into binary and writes to a QcRef file.
///
/// # Arguments
///
/// * `name` - The name of the file to be written (without `.qcref.*` extension).
/// * `file_type` - The type of the QcRef file to be written.
/// * `value` - The structure to be serialised.
pub fn write_qcref_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: QcRefFileType,
    value: &T,
) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let path = qcref_data_path(name, file_type);
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, value).map_err(|err| format_err!(err))
}

/// Reads a YAML file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The path to the YAML file to be read in.
///
/// # Returns
///
/// A [`Result`] containing the structure deserialised from the read-in file.
pub fn read_qcref_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let reader = BufReader::new(File::open(name)?);
    serde_yaml::from_reader(reader).map_err(|err| format_err!(err))
}

/// Serialises a structure into YAML and writes to a file.
///
/// # Arguments
///
/// * `name` - The path to the YAML file to be written.
/// * `value` - The structure to be serialised.
pub fn write_qcref_yaml<T, P: AsRef<Path>>(name: P, value: &T) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let writer = BufWriter::new(File::create(name)?);
    serde_yaml::to_writer(writer, value).map_err(|err| format_err!(err))
}
