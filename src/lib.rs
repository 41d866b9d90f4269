//! # QcRef: reference integral data for quantum-chemistry integral libraries
//!
//! QcRef generates and validates reference numerical data for quantum-chemistry
//! integral libraries. It loads a molecular geometry, obtains one- and
//! two-electron integrals in a Gaussian basis from an external integral engine,
//! optionally changes the index convention of the two-electron tensor, applies
//! basis transformations, and serialises the results to binary files for later
//! exact-value comparison in a test suite.
//!
//! Integral evaluation itself is deliberately outside the crate: engines are
//! external collaborators implementing [`integrals::IntegralEngine`]. The only
//! algorithmic core authored here is the four-index tensor transformation in
//! [`transform`], carried out as four sequential single-index contractions.

pub mod auxiliary;
pub mod basis;
pub mod drivers;
pub mod integrals;
pub mod interfaces;
pub mod io;
pub mod transform;
