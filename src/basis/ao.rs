//! Atomic-orbital shell structure.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "ao_tests.rs"]
mod ao_tests;

/// An enumerated type indicating the kind of angular functions in a shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellOrder {
    /// This variant indicates that the angular functions are Cartesian
    /// functions. A Cartesian shell of angular momentum $`l`$ contains
    /// $`(l+1)(l+2)/2`$ functions.
    Cart,

    /// This variant indicates that the angular functions are real solid
    /// harmonics. A pure shell of angular momentum $`l`$ contains $`2l+1`$
    /// functions.
    Pure,
}

/// A structure representing a shell in an atomic-orbital basis set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisShell {
    /// A non-negative integer indicating the rank of the shell.
    pub l: u32,

    /// An enum indicating the type of the angular functions in the shell.
    pub shell_order: ShellOrder,
}

impl BasisShell {
    /// Constructs a new [`BasisShell`].
    ///
    /// # Arguments
    ///
    /// * `l` - The angular momentum of the shell.
    /// * `shell_order` - The kind of the angular functions in the shell.
    pub fn new(l: u32, shell_order: ShellOrder) -> Self {
        Self { l, shell_order }
    }

    /// The number of basis functions in this shell.
    pub fn n_funcs(&self) -> usize {
        let lsize = self.l as usize;
        match self.shell_order {
            ShellOrder::Cart => (lsize + 1) * (lsize + 2) / 2,
            ShellOrder::Pure => 2 * lsize + 1,
        }
    }
}

impl fmt::Display for BasisShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let angular = match self.shell_order {
            ShellOrder::Cart => "cart",
            ShellOrder::Pure => "pure",
        };
        write!(f, "l = {} ({angular}, {} functions)", self.l, self.n_funcs())
    }
}
