// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Chargestate assembles the rate equations governing charge-state fractions of a projectile
//!
//! # Overview
//! A projectile crossing a target medium is ionized and recombines as it goes, so the
//! fractions `F_k` of the beam in each charge state `k` evolve with the traversed thickness `x`.
//! Given the transition rates between the states, the fractions obey a linear system
//!
//! - `dF/dx = A F + c` in the dynamic formulation, where the last fraction has been eliminated
//!   through the conservation law `sum(F) = 1`,
//! - `M F = e_N` in the static formulation, where the last generator row has been replaced by the
//!   normalisation.
//!
//! This crate builds `A` and `c` (or `M`) from a sparse coefficient table. Solving the system is
//! left to the caller.
//!
//! # Usage
//! Chargestate is distributed as a binary crate which reads the coefficient table from a `.toml`
//! file:
//!
//! ```toml
//! [[coefficients]]
//! i = 1
//! j = 2
//! rate = 2.0
//! ```
//!
//! where additional transitions are appended with subsequent `coefficients` fields. The
//! candidate index windows, requested dimension and formulation are read from `.config/`.

#![warn(missing_docs)]

/// The command line global application, configuration and tracing
pub mod app;

/// Matrix elements of the rate equation system
pub mod element;

/// Static and dynamic assembly of the rate equation system
pub mod equations;

/// Error handling
mod error;

pub use element::ElementCalculator;
pub use equations::{Formulation, RateEquations, RateEquationsBuilder};
pub use error::BuildError;
