// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! Failures raised while building a rate equation system

use chargestate_network::{IndexRange, ReconcileError};
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// General error for equation construction
pub enum BuildError {
    /// The coefficient table could not be reconciled
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    /// The info desk dimension disagrees with the size of its range
    #[error("info desk reports dimension {dimension} but its range {range} holds {} states", .range.size())]
    #[diagnostic(code(chargestate::dimension_mismatch))]
    DimensionMismatch {
        /// The dimension reported by the info desk
        dimension: usize,
        /// The range reported by the info desk
        range: IndexRange,
    },
}
