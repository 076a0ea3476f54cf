// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! Failures raised while reconciling the coefficient table against the requested system

use crate::IndexRange;
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
/// The coefficient data cannot support the requested equation system
pub enum ReconcileError {
    /// No supplied coefficient was found inside the candidate windows
    #[error("no coefficients found in row window {row_window} and column window {column_window}")]
    #[diagnostic(
        code(chargestate::no_coefficients),
        help("check the coefficient indices against the configured windows")
    )]
    NoCoefficients {
        /// The candidate row window
        row_window: IndexRange,
        /// The candidate column window
        column_window: IndexRange,
    },
    /// The tight row and column ranges differ
    #[error("row range {rows} and column range {columns} differ and should be the same")]
    #[diagnostic(
        code(chargestate::range_mismatch),
        help("the coefficient table must cover the same charge states as rows and columns")
    )]
    RangeMismatch {
        /// The tight row range
        rows: IndexRange,
        /// The tight column range
        columns: IndexRange,
    },
    /// More coupled states were requested than the data covers
    #[error(
        "found matrix dimension (dim={found}, range {range}) is smaller than the requested dimension ({requested})"
    )]
    #[diagnostic(
        code(chargestate::insufficient_coverage),
        help("supply coefficients for the missing charge states or lower the requested dimension")
    )]
    InsufficientCoverage {
        /// The requested equation dimension
        requested: usize,
        /// The dimension supported by the coefficient data
        found: usize,
        /// The reconciled range
        range: IndexRange,
    },
}
