// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The coefficient network underlying a charge-state rate equation system
//!
//! A projectile traversing a target changes charge state through ionization and recombination.
//! The transition rates between states are supplied as a sparse table keyed by 1-based state
//! pairs `(i, j)`. This crate holds that table, finds the tight index range actually covered by
//! supplied coefficients and pads the range with zeros so the equation assembler downstream can
//! assume a dense table.
//!
//! ```ignore
//! let network = ReconcilerBuilder::new()
//!     .with_store(&mut store)
//!     .with_row_window(1..=9)
//!     .with_column_window(1..=9)
//!     .with_requested_dimension(Some(3))
//!     .build()?;
//! ```

#![warn(missing_docs)]

mod error;
mod range;
mod reconcile;
mod store;

pub use error::ReconcileError;
pub use range::IndexRange;
pub use reconcile::{ReconciledNetwork, ReconcilerBuilder};
pub use store::CoefficientStore;

use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A composite trait for the numeric type of a transition rate
///
/// Rates may be integral or floating point, all that is needed is the ring operations and
/// a unit for the normalisation row of the static system.
pub trait Rate:
    nalgebra::Scalar
    + Copy
    + num_traits::Zero
    + num_traits::One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + SubAssign
{
}

impl<T> Rate for T where
    T: nalgebra::Scalar
        + Copy
        + num_traits::Zero
        + num_traits::One
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + AddAssign
        + SubAssign
{
}

/// An InfoDesk trait providing everything the equation assembler needs to know about the network
pub trait CoefficientInfoDesk<T: Rate> {
    /// The transition rate for the ordered pair `(i, j)`
    ///
    /// Implementors must panic when the pair lies outside the zero-filled range, such an access is
    /// a broken invariant in the caller and not a recoverable condition.
    fn rate(&self, i: usize, j: usize) -> T;
    /// The reconciled index range, shared by rows and columns
    fn range(&self) -> IndexRange;
    /// The number of coupled charge states in the system
    fn dimension(&self) -> usize {
        self.range().size()
    }
}
