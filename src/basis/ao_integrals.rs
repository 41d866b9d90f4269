//! Basis-set bookkeeping for integral reference data.
//!
//! These structures describe the shell structure of a Gaussian basis set put
//! on a molecule. No integral evaluation happens here: integral engines are
//! external collaborators (see [`crate::integrals::IntegralEngine`]) and only
//! require the structural information managed by this module.

use std::ops::Index;

use derive_builder::Builder;
use nalgebra::Point3;

#[cfg(feature = "bse")]
use std::collections::HashMap;

#[cfg(feature = "bse")]
use anyhow::{self, format_err, Context};
#[cfg(feature = "bse")]
use itertools::Itertools;
#[cfg(feature = "bse")]
use rayon::prelude::*;
#[cfg(feature = "bse")]
use serde::Deserialize;

#[cfg(feature = "bse")]
use crate::auxiliary::atom::{ElementMap, ANGSTROM_TO_BOHR};
#[cfg(feature = "bse")]
use crate::auxiliary::molecule::Molecule;
use crate::basis::ao::BasisShell;
#[cfg(feature = "bse")]
use crate::basis::ao::ShellOrder;

#[cfg(test)]
#[path = "ao_integrals_tests.rs"]
mod ao_integrals_tests;

// -------------------
// GaussianContraction
// -------------------

/// A structure to handle primitives in a Gaussian contraction.
#[derive(Clone, Builder, Debug)]
pub struct GaussianContraction<E, C> {
    /// Constituent primitives in the contraction. Each primitive has the form
    /// $`c\exp\left[-\alpha\lvert \mathbf{r} - \mathbf{R} \rvert^2\right]`$
    /// and is characterised by a tuple of its exponent $`\alpha`$ and
    /// coefficient $`c`$, respectively.
    pub primitives: Vec<(E, C)>,
}

impl<E, C> GaussianContraction<E, C> {
    /// The number of primitive Gaussians in this contraction.
    pub fn contraction_length(&self) -> usize {
        self.primitives.len()
    }
}

// ---------------------
// BasisShellContraction
// ---------------------

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Deserialisable shell data from BasisSetExchange
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

#[cfg(feature = "bse")]
const BSE_API_ROOT: &str = "https://www.basissetexchange.org/api";

/// Primitive coefficients at or below this magnitude are treated as vanishing
/// and dropped from the contraction.
#[cfg(feature = "bse")]
const BSE_COEFF_THRESH: f64 = 1e-16;

/// A structure to represent a basis set definition retrieved from the
/// BasisSetExchange REST API. Fields of the payload not consulted here are
/// ignored on deserialisation.
#[cfg(feature = "bse")]
#[derive(Deserialize, Debug)]
struct BseBasisData {
    /// Name of the basis set.
    name: String,

    /// Shell data for the requested elements, keyed by atomic number. The
    /// raw payload gives the keys as decimal strings.
    elements: HashMap<String, BseElementData>,
}

/// A structure to hold the retrieved shell data for one element.
#[cfg(feature = "bse")]
#[derive(Deserialize, Debug)]
struct BseElementData {
    /// The shells of this element. One entry may describe several contracted
    /// functions sharing the same set of primitive exponents.
    electron_shells: Vec<BseShellData>,
}

/// A structure to hold the retrieved data for one set of primitives.
#[cfg(feature = "bse")]
#[derive(Deserialize, Debug)]
struct BseShellData {
    /// The angular momenta of the contracted functions built on these
    /// primitives. A single value applies to every coefficient vector;
    /// multiple values pair up cyclically with the coefficient vectors.
    angular_momentum: Vec<u32>,

    /// The primitive exponents, as decimal strings.
    exponents: Vec<String>,

    /// One vector of primitive coefficients, also as decimal strings, per
    /// contracted function.
    coefficients: Vec<Vec<String>>,
}

#[cfg(feature = "bse")]
impl BseBasisData {
    /// Converts the shell data retrieved for one element into structural
    /// shells with parsed contractions.
    ///
    /// # Arguments
    ///
    /// * `atomic_number` - The atomic number of the element.
    /// * `cart` - A boolean indicating if the shells are to contain Cartesian
    ///   functions rather than real solid harmonics.
    ///
    /// # Returns
    ///
    /// A vector of shells paired with their contractions, in the order the
    /// retrieved data lists them.
    fn to_element_shells(
        &self,
        atomic_number: u32,
        cart: bool,
    ) -> Result<Vec<(BasisShell, GaussianContraction<f64, f64>)>, anyhow::Error> {
        let element_data = self
            .elements
            .get(&atomic_number.to_string())
            .ok_or_else(|| {
                format_err!(
                    "No shell data for atomic number {atomic_number} in the retrieved `{}` definition.",
                    self.name
                )
            })?;
        element_data
            .electron_shells
            .iter()
            .flat_map(|shell| {
                shell
                    .angular_momentum
                    .iter()
                    .cycle()
                    .zip(shell.coefficients.iter())
                    .map(|(&l, coeffs)| {
                        let shell_order = if cart {
                            ShellOrder::Cart
                        } else {
                            ShellOrder::Pure
                        };
                        let primitives = shell
                            .exponents
                            .iter()
                            .zip(coeffs.iter())
                            .map(|(exp, coeff)| Ok((exp.parse::<f64>()?, coeff.parse::<f64>()?)))
                            .filter_ok(|(_, coeff)| coeff.abs() > BSE_COEFF_THRESH)
                            .collect::<Result<Vec<_>, std::num::ParseFloatError>>()?;
                        Ok((
                            BasisShell::new(l, shell_order),
                            GaussianContraction::<f64, f64> { primitives },
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()
    }
}

/// Retrieves the definition of a basis set for one element from
/// BasisSetExchange.
///
/// # Arguments
///
/// * `basis_name` - The name of the basis set to be retrieved.
/// * `element` - The symbol of the element.
/// * `optimised_contraction` - A boolean indicating if the optimised
///   contraction version of shells should be requested.
/// * `version` - The requested version of the basis set information.
///
/// # Returns
///
/// The deserialised basis set definition.
#[cfg(feature = "bse")]
fn fetch_bse_element(
    basis_name: &str,
    element: &str,
    optimised_contraction: bool,
    version: usize,
) -> Result<BseBasisData, anyhow::Error> {
    let api_url = format!(
        "{BSE_API_ROOT}/basis/{basis_name}/format/json\
        ?elements={element}\
        &optimize_general={optimised_contraction}\
        &version={version}"
    );
    reqwest::blocking::get(&api_url)
        .and_then(|response| response.json::<BseBasisData>())
        .with_context(|| {
            format!("Unable to retrieve the `{basis_name}` definition for element {element}.")
        })
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// BasisShellContraction definition
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// A structure to handle all structural information of a contracted shell.
#[derive(Clone, Builder, Debug)]
pub struct BasisShellContraction<E, C> {
    /// Basis function ordering information.
    pub basis_shell: BasisShell,

    /// The Gaussian primitives in the contraction of this shell.
    pub contraction: GaussianContraction<E, C>,

    /// The Cartesian origin $`\mathbf{R}`$ of this shell.
    pub cart_origin: Point3<f64>,
}

impl<E, C> BasisShellContraction<E, C> {
    /// The basis function ordering information of this shell.
    pub fn basis_shell(&self) -> &BasisShell {
        &self.basis_shell
    }

    /// The Cartesian origin $`\mathbf{R}`$ of this shell.
    pub fn cart_origin(&self) -> &Point3<f64> {
        &self.cart_origin
    }

    /// The number of primitive Gaussians in this shell.
    pub fn contraction_length(&self) -> usize {
        self.contraction.contraction_length()
    }
}

impl BasisShellContraction<f64, f64> {
    /// Retrieves basis information from BasisSetExchange and constructs a
    /// vector of vectors of [`Self`] for a specified molecule. Each inner
    /// vector is for one atom in the molecule.
    ///
    /// The definition for each distinct element in the molecule is fetched
    /// once, with the fetches running in parallel.
    ///
    /// # Arguments
    ///
    /// * `mol` - A molecule.
    /// * `basis_name` - The name of the basis set to be retrieved.
    /// * `cart` - A boolean indicating if the shells contain Cartesian
    ///   functions. If `false`, the shells contain real solid harmonics.
    /// * `optimised_contraction` - A boolean indicating if the optimised
    ///   contraction version of shells should be requested.
    /// * `version` - The requested version of the basis set information.
    /// * `mol_bohr` - A boolean indicating if the coordinates of the atoms in
    ///   `mol` are to be interpreted in units of Bohr. If `false`, they are
    ///   assumed to be in units of Ångström and will be converted to Bohr.
    ///
    /// # Returns
    ///
    /// A vector of vectors of [`Self`].
    #[cfg(feature = "bse")]
    pub fn from_bse(
        mol: &Molecule,
        basis_name: &str,
        cart: bool,
        optimised_contraction: bool,
        version: usize,
        mol_bohr: bool,
    ) -> Result<Vec<Vec<Self>>, anyhow::Error> {
        let emap = ElementMap::new();
        let elements = mol
            .atoms
            .iter()
            .map(|atom| atom.atomic_symbol.clone())
            .unique()
            .collect::<Vec<_>>();
        let element_shells = elements
            .par_iter()
            .map(|element| {
                let atomic_number = emap
                    .get(element)
                    .ok_or_else(|| format_err!("Element {element} not found."))?
                    .0;
                let data =
                    fetch_bse_element(basis_name, element, optimised_contraction, version)?;
                Ok((
                    element.clone(),
                    data.to_element_shells(atomic_number, cart)?,
                ))
            })
            .collect::<Result<HashMap<_, _>, anyhow::Error>>()?;
        mol.atoms
            .iter()
            .map(|atom| {
                let shells = element_shells.get(&atom.atomic_symbol).ok_or_else(|| {
                    format_err!("No shell data found for element {}.", atom.atomic_symbol)
                })?;
                let cart_origin = if mol_bohr {
                    atom.coordinates
                } else {
                    atom.coordinates * ANGSTROM_TO_BOHR
                };
                Ok(shells
                    .iter()
                    .cloned()
                    .map(|(basis_shell, contraction)| BasisShellContraction {
                        basis_shell,
                        contraction,
                        cart_origin,
                    })
                    .collect::<Vec<_>>())
            })
            .collect::<Result<Vec<_>, anyhow::Error>>()
    }
}

// --------
// BasisSet
// --------

/// A structure to manage structural basis information for a molecule.
#[derive(Clone, Debug)]
pub struct BasisSet<E, C> {
    /// A vector of vectors containing basis information for the atoms in this
    /// molecule. Each inner vector is for one atom.
    basis_atoms: Vec<Vec<BasisShellContraction<E, C>>>,

    /// The function boundaries for the atoms in the molecule.
    atom_boundaries: Vec<(usize, usize)>,

    /// The function boundaries for the shells in the molecule.
    shell_boundaries: Vec<(usize, usize)>,
}

impl<E, C> BasisSet<E, C> {
    /// Creates a new [`BasisSet`] structure from a vector of vectors of basis
    /// shells.
    ///
    /// # Arguments
    ///
    /// * `batms` - A vector of vectors of basis shells. Each inner vector is
    ///   for one atom.
    ///
    /// # Returns
    ///
    /// A new [`BasisSet`] structure.
    pub fn new(batms: Vec<Vec<BasisShellContraction<E, C>>>) -> Self {
        let atom_boundaries = batms
            .iter()
            .scan(0, |acc, batm| {
                let atom_length = batm
                    .iter()
                    .map(|bs| bs.basis_shell.n_funcs())
                    .sum::<usize>();
                let boundary = (*acc, *acc + atom_length);
                *acc += atom_length;
                Some(boundary)
            })
            .collect::<Vec<_>>();
        let shell_boundaries = batms
            .iter()
            .flatten()
            .scan(0, |acc, bsc| {
                let shell_length = bsc.basis_shell.n_funcs();
                let boundary = (*acc, *acc + shell_length);
                *acc += shell_length;
                Some(boundary)
            })
            .collect::<Vec<_>>();
        Self {
            basis_atoms: batms,
            atom_boundaries,
            shell_boundaries,
        }
    }

    /// The number of shells in the basis set.
    pub fn n_shells(&self) -> usize {
        self.basis_atoms
            .iter()
            .map(|batm| batm.len())
            .sum::<usize>()
    }

    /// The number of basis functions in the basis set.
    pub fn n_funcs(&self) -> usize {
        self.all_shells()
            .map(|shell| shell.basis_shell.n_funcs())
            .sum::<usize>()
    }

    /// Returns the function atom boundaries.
    pub fn atom_boundaries(&self) -> &Vec<(usize, usize)> {
        &self.atom_boundaries
    }

    /// Returns the function shell boundaries.
    pub fn shell_boundaries(&self) -> &Vec<(usize, usize)> {
        &self.shell_boundaries
    }

    /// Returns an iterator over all shells in the basis set.
    pub fn all_shells(&self) -> impl Iterator<Item = &BasisShellContraction<E, C>> {
        self.basis_atoms.iter().flatten()
    }
}

impl BasisSet<f64, f64> {
    /// Retrieves basis information from BasisSetExchange and constructs
    /// [`Self`] for a specified molecule.
    ///
    /// See [`BasisShellContraction::from_bse`] for the meanings of the
    /// arguments.
    ///
    /// # Returns
    ///
    /// A [`BasisSet`] structure.
    #[cfg(feature = "bse")]
    pub fn from_bse(
        mol: &Molecule,
        basis_name: &str,
        cart: bool,
        optimised_contraction: bool,
        version: usize,
        mol_bohr: bool,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self::new(BasisShellContraction::<f64, f64>::from_bse(
            mol,
            basis_name,
            cart,
            optimised_contraction,
            version,
            mol_bohr,
        )?))
    }
}

impl<E, C> Index<usize> for BasisSet<E, C> {
    type Output = BasisShellContraction<E, C>;

    fn index(&self, i: usize) -> &Self::Output {
        self.basis_atoms
            .iter()
            .flatten()
            .nth(i)
            .unwrap_or_else(|| panic!("Unable to obtain the basis shell with index {i}."))
    }
}
