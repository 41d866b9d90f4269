//! Auxiliary structures for molecular geometries.

pub mod atom;
pub mod molecule;
