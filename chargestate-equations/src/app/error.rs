// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error type for the binary

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Failures surfaced by the command line application
pub enum ApplicationError {
    /// Reading the coefficient file or writing the report failed
    #[error(transparent)]
    #[diagnostic(code(chargestate::io_error))]
    IoError(#[from] std::io::Error),
    /// The configuration or the coefficient table could not be parsed
    #[error(transparent)]
    #[diagnostic(code(chargestate::config_error))]
    ConfigError(#[from] config::ConfigError),
    /// The equation system could not be built
    #[error(transparent)]
    Build(#[from] crate::error::BuildError),
}

impl From<chargestate_network::ReconcileError> for ApplicationError {
    fn from(error: chargestate_network::ReconcileError) -> Self {
        ApplicationError::Build(error.into())
    }
}
