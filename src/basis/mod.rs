//! Structural description of Gaussian basis sets.

pub mod ao;
pub mod ao_integrals;
pub mod so;
