//! Atoms and element data.

use std::collections::HashMap;
use std::fmt;

use anyhow::{self, format_err};
use nalgebra::Point3;
use periodic_table;

/// Conversion factor from Ångström to Bohr.
pub const ANGSTROM_TO_BOHR: f64 = 1.889_725_988_6;

/// A struct storing a look-up of element symbols to give atomic numbers and
/// atomic masses.
pub struct ElementMap<'a> {
    /// A [`HashMap`] from a symbol string to a tuple of atomic number and
    /// atomic mass.
    map: HashMap<&'a str, (u32, f64)>,
}

impl Default for ElementMap<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementMap<'static> {
    /// Creates a new [`ElementMap`] for all elements in the periodic table.
    #[must_use]
    pub fn new() -> ElementMap<'static> {
        let mut map = HashMap::new();
        let elements = periodic_table::periodic_table();
        for element in elements {
            let mass = parse_atomic_mass(element.atomic_mass);
            map.insert(element.symbol, (element.atomic_number, mass));
        }
        ElementMap { map }
    }

    /// Returns the atomic number and atomic mass for an element symbol, if
    /// the symbol is known.
    pub fn get(&self, symbol: &str) -> Option<&(u32, f64)> {
        self.map.get(symbol)
    }
}

/// Parses the atomic mass string in the format of [`periodic_table`] to a
/// single float value.
///
/// # Arguments
///
/// * `mass_str` - A string of mass value that is either `x.y(z)` where the
///     uncertain digit `z` is enclosed in parentheses, or `[x]` where `x` is
///     the mass number in place of precise experimental values.
///
/// # Returns
///
/// The numeric mass value.
fn parse_atomic_mass(mass_str: &str) -> f64 {
    let mass = mass_str.replace(&['(', ')', '[', ']'][..], "");
    mass.parse::<f64>()
        .unwrap_or_else(|_| panic!("Unable to parse atomic mass string {mass}."))
}

/// A struct representing an atom in a molecular geometry.
#[derive(Clone, Debug)]
pub struct Atom {
    /// The atomic number of the atom.
    pub atomic_number: u32,

    /// The atomic symbol of the atom.
    pub atomic_symbol: String,

    /// The weighted-average atomic mass for all naturally occurring isotopes.
    pub atomic_mass: f64,

    /// The position of the atom.
    pub coordinates: Point3<f64>,

    /// The effective core charge seen by the electrons. This equals the
    /// atomic number unless an effective core potential replaces some of the
    /// core electrons.
    pub pseudo_number: f64,
}

impl Atom {
    /// Parses an atom line in an `xyz` file to construct an [`Atom`].
    ///
    /// # Arguments
    ///
    /// * `line` - A line in an `xyz` file containing an atomic symbol and
    ///     three Cartesian coordinates.
    /// * `emap` - A hash map between atomic symbols and atomic numbers and
    ///     masses.
    ///
    /// # Returns
    ///
    /// The parsed [`Atom`] struct, or an error if the line does not have the
    /// correct format.
    pub fn from_xyz(line: &str, emap: &ElementMap<'static>) -> Result<Atom, anyhow::Error> {
        let split: Vec<&str> = line.split_whitespace().collect();
        if split.len() != 4 {
            return Err(format_err!("Unexpected xyz atom line: `{line}`."));
        }
        let atomic_symbol = split[0];
        let &(atomic_number, atomic_mass) = emap
            .get(atomic_symbol)
            .ok_or_else(|| format_err!("Unknown element symbol `{atomic_symbol}`."))?;
        let coordinates = Point3::new(
            split[1]
                .parse::<f64>()
                .map_err(|err| format_err!("Unable to parse the x coordinate: {err}."))?,
            split[2]
                .parse::<f64>()
                .map_err(|err| format_err!("Unable to parse the y coordinate: {err}."))?,
            split[3]
                .parse::<f64>()
                .map_err(|err| format_err!("Unable to parse the z coordinate: {err}."))?,
        );
        Ok(Atom {
            atomic_number,
            atomic_symbol: atomic_symbol.to_string(),
            atomic_mass,
            coordinates,
            pseudo_number: f64::from(atomic_number),
        })
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<3} {:+14.8} {:+14.8} {:+14.8}",
            self.atomic_symbol, self.coordinates[0], self.coordinates[1], self.coordinates[2]
        )
    }
}
