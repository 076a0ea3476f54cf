// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Rate equation module
//!
//! Turns a reconciled coefficient network into the matrix form of the charge-state rate
//! equations. Two formulations are available:
//!
//! - `Dynamic`: `dF/dx = A F + c` with `dim(A) = N - 1`. The last fraction is eliminated through
//!   the conservation law `F_N = 1 - sum(F_k, k < N)`, which contributes the constant vector `c`.
//! - `Static`: `M F = e_N` with `dim(M) = N`. The generator rows are kept except the last, which
//!   is replaced by the normalisation row `sum(F_k) = 1`.
//!
//! The system is assembled through the `RateEquationsBuilder` from any implementation of
//! `CoefficientInfoDesk` as
//!
//! ```ignore
//! let equations: RateEquations<f64> = RateEquationsBuilder::new()
//!     .with_info_desk(&network)
//!     .with_formulation(Formulation::Dynamic)
//!     .build()?;
//! ```

mod dynamic_system;
mod static_system;

use crate::error::BuildError;
use chargestate_network::{CoefficientInfoDesk, Rate};
use nalgebra::{DMatrix, DVector};
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, clap::ArgEnum)]
#[serde(rename_all = "lowercase")]
/// Which matrix form of the rate equations to assemble
pub enum Formulation {
    /// Full rank generator with the normalisation row, for diagnostics and alternative solvers
    Static,
    /// Rank reduced system with a constant vector, the production path
    Dynamic,
}

impl Default for Formulation {
    fn default() -> Self {
        Formulation::Dynamic
    }
}

#[derive(Clone, Debug, PartialEq)]
/// The assembled matrix and, for the dynamic formulation, the constant vector
pub struct RateEquations<T: Rate> {
    matrix: DMatrix<T>,
    second_member: Option<DVector<T>>,
    formulation: Formulation,
    degenerate: bool,
}

impl<T: Rate> Default for RateEquations<T> {
    fn default() -> Self {
        Self {
            matrix: DMatrix::zeros(0, 0),
            second_member: None,
            formulation: Formulation::default(),
            degenerate: false,
        }
    }
}

impl<T: Rate> RateEquations<T> {
    /// An empty system, to be filled by `generate`
    pub fn new() -> Self {
        Self::default()
    }

    /// The assembled matrix
    pub fn output(&self) -> &DMatrix<T> {
        &self.matrix
    }

    /// Mutable access to the assembled matrix, for callers that scale or reuse it in place
    pub fn output_mut(&mut self) -> &mut DMatrix<T> {
        &mut self.matrix
    }

    /// The constant vector of the dynamic formulation, `None` for the static formulation
    pub fn second_member(&self) -> Option<&DVector<T>> {
        self.second_member.as_ref()
    }

    /// Mutable access to the constant vector, `None` when the static formulation was assembled
    pub fn second_member_mut(&mut self) -> Option<&mut DVector<T>> {
        self.second_member.as_mut()
    }

    /// The formulation of the last successful `generate`
    pub fn formulation(&self) -> Formulation {
        self.formulation
    }

    /// True when the last assembly had a single state, the fraction is then trivially one and
    /// there is nothing to solve
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Assemble the equations from `info_desk`, replacing any previous output
    ///
    /// On error the previous output is left untouched.
    #[tracing::instrument(name = "Rate equation assembly", level = "info", skip(self, info_desk))]
    pub fn generate<InfoDesk>(
        &mut self,
        info_desk: &InfoDesk,
        formulation: Formulation,
    ) -> Result<(), BuildError>
    where
        InfoDesk: CoefficientInfoDesk<T>,
    {
        let range = info_desk.range();
        let dimension = info_desk.dimension();
        if range.is_empty() || dimension != range.size() {
            return Err(BuildError::DimensionMismatch { dimension, range });
        }
        tracing::debug!(
            "generating equations: dim = {}, offset = {}, last index = {}",
            dimension,
            range.start(),
            range.end() - 1
        );

        match formulation {
            Formulation::Static if dimension <= 1 => {
                tracing::warn!(
                    "a single charge state in {} leaves nothing to solve",
                    range
                );
                self.matrix = DMatrix::zeros(0, 0);
                self.second_member = None;
                self.degenerate = true;
            }
            Formulation::Static => {
                self.matrix = static_system::assemble(info_desk);
                self.second_member = None;
                self.degenerate = false;
            }
            Formulation::Dynamic => match dynamic_system::assemble(info_desk) {
                Some((matrix, second_member)) => {
                    self.matrix = matrix;
                    self.second_member = Some(second_member);
                    self.degenerate = false;
                }
                None => {
                    tracing::warn!(
                        "a single charge state in {} leaves nothing to solve",
                        range
                    );
                    self.matrix = DMatrix::zeros(0, 0);
                    self.second_member = Some(DVector::zeros(0));
                    self.degenerate = true;
                }
            },
        }
        self.formulation = formulation;
        Ok(())
    }
}

/// Builder for `RateEquations` from a reference to an object implementing `CoefficientInfoDesk`
pub struct RateEquationsBuilder<RefInfoDesk> {
    info_desk: RefInfoDesk,
    formulation: Formulation,
}

impl Default for RateEquationsBuilder<()> {
    /// Initialize an empty instance of RateEquationsBuilder
    fn default() -> Self {
        Self {
            info_desk: (),
            formulation: Formulation::default(),
        }
    }
}

impl RateEquationsBuilder<()> {
    /// A builder with no info desk attached and the default formulation
    pub fn new() -> Self {
        Self::default()
    }
}

impl<RefInfoDesk> RateEquationsBuilder<RefInfoDesk> {
    /// Attach an implementation of `CoefficientInfoDesk`
    pub fn with_info_desk<InfoDesk>(self, info_desk: &InfoDesk) -> RateEquationsBuilder<&InfoDesk> {
        RateEquationsBuilder {
            info_desk,
            formulation: self.formulation,
        }
    }

    /// Select the formulation, the dynamic one is used when this is not called
    pub fn with_formulation(mut self, formulation: Formulation) -> Self {
        self.formulation = formulation;
        self
    }
}

impl<InfoDesk> RateEquationsBuilder<&InfoDesk> {
    /// Builds an instance of `RateEquations` from a `RateEquationsBuilder`
    pub fn build<T>(self) -> Result<RateEquations<T>, BuildError>
    where
        T: Rate,
        InfoDesk: CoefficientInfoDesk<T>,
    {
        let mut equations = RateEquations::new();
        equations.generate(self.info_desk, self.formulation)?;
        Ok(equations)
    }
}

#[cfg(test)]
mod test {
    use super::{Formulation, RateEquations, RateEquationsBuilder};
    use crate::error::BuildError;
    use approx::assert_relative_eq;
    use chargestate_network::{
        CoefficientInfoDesk, CoefficientStore, IndexRange, ReconcilerBuilder,
    };
    use matrixcompare::assert_matrix_eq;
    use nalgebra::{DMatrix, DVector};

    fn three_state_store() -> CoefficientStore<f64> {
        [((1, 2), 2.0), ((2, 1), 1.0), ((2, 3), 0.5), ((3, 2), 0.3)]
            .into_iter()
            .collect()
    }

    /// An info desk whose dimension disagrees with its range
    struct Inconsistent;

    impl CoefficientInfoDesk<f64> for Inconsistent {
        fn rate(&self, _i: usize, _j: usize) -> f64 {
            1.0
        }
        fn range(&self) -> IndexRange {
            IndexRange::from_bounds(1, 3)
        }
        fn dimension(&self) -> usize {
            2
        }
    }

    #[test]
    fn dynamic_system_of_three_states_matches_hand_computation() {
        let mut store = three_state_store();
        let network = ReconcilerBuilder::new()
            .with_store(&mut store)
            .with_requested_dimension(Some(3))
            .build()
            .unwrap();
        let equations: RateEquations<f64> = RateEquationsBuilder::new()
            .with_info_desk(&network)
            .build()
            .unwrap();

        let expected = DMatrix::from_row_slice(2, 2, &[-2.0, 1.0, 1.7, -1.8]);
        assert_matrix_eq!(equations.output().clone(), expected, comp = abs, tol = 1e-12);
        let second_member = equations.second_member().unwrap();
        assert_eq!(second_member.len(), 2);
        assert_relative_eq!(second_member[0], 0.0);
        assert_relative_eq!(second_member[1], 0.3);
        assert_eq!(equations.formulation(), Formulation::Dynamic);
    }

    #[test]
    fn static_system_replaces_the_last_row_with_the_normalisation() {
        let mut store = three_state_store();
        let network = ReconcilerBuilder::new()
            .with_store(&mut store)
            .build()
            .unwrap();
        let equations: RateEquations<f64> = RateEquationsBuilder::new()
            .with_info_desk(&network)
            .with_formulation(Formulation::Static)
            .build()
            .unwrap();

        let expected = DMatrix::from_row_slice(
            3,
            3,
            &[-2.0, 1.0, 0.0, 2.0, -1.5, 0.3, 1.0, 1.0, 1.0],
        );
        assert_matrix_eq!(equations.output().clone(), expected, comp = abs, tol = 1e-12);
        assert!(equations.second_member().is_none());
    }

    #[test]
    fn single_state_dynamic_system_is_degenerate_not_an_error() {
        let mut store: CoefficientStore<f64> = [((2, 2), 0.4)].into_iter().collect();
        let network = ReconcilerBuilder::new()
            .with_store(&mut store)
            .build()
            .unwrap();
        let equations: RateEquations<f64> = RateEquationsBuilder::new()
            .with_info_desk(&network)
            .build()
            .unwrap();
        assert!(equations.is_degenerate());
        assert_eq!(equations.output().shape(), (0, 0));
        assert_eq!(equations.second_member().map(|c| c.len()), Some(0));
    }

    #[test]
    fn single_state_static_system_is_degenerate_and_not_assembled() {
        let mut store: CoefficientStore<f64> = [((5, 5), 1.0)].into_iter().collect();
        let network = ReconcilerBuilder::new()
            .with_store(&mut store)
            .with_requested_dimension(Some(1))
            .build()
            .unwrap();
        let equations: RateEquations<f64> = RateEquationsBuilder::new()
            .with_info_desk(&network)
            .with_formulation(Formulation::Static)
            .build()
            .unwrap();
        assert!(equations.is_degenerate());
        assert_eq!(equations.output().shape(), (0, 0));
        assert!(equations.second_member().is_none());
        assert_eq!(equations.formulation(), Formulation::Static);
    }

    #[test]
    fn failed_generation_keeps_the_previous_output() {
        let mut store = three_state_store();
        let network = ReconcilerBuilder::new()
            .with_store(&mut store)
            .build()
            .unwrap();
        let mut equations = RateEquations::new();
        equations
            .generate(&network, Formulation::Dynamic)
            .unwrap();
        let previous = equations.clone();

        let result = equations.generate(&Inconsistent, Formulation::Static);
        assert!(matches!(
            result,
            Err(BuildError::DimensionMismatch { dimension: 2, .. })
        ));
        assert_eq!(equations, previous);
    }

    #[test]
    fn regenerating_replaces_the_output() {
        let mut store = three_state_store();
        let network = ReconcilerBuilder::new()
            .with_store(&mut store)
            .build()
            .unwrap();
        let mut equations = RateEquations::new();
        equations.generate(&network, Formulation::Dynamic).unwrap();
        equations.generate(&network, Formulation::Static).unwrap();
        assert_eq!(equations.output().shape(), (3, 3));
        assert!(equations.second_member().is_none());
        assert_eq!(equations.formulation(), Formulation::Static);
    }

    #[test]
    fn output_buffers_are_writable() {
        let mut store = three_state_store();
        let network = ReconcilerBuilder::new()
            .with_store(&mut store)
            .build()
            .unwrap();
        let mut equations: RateEquations<f64> = RateEquationsBuilder::new()
            .with_info_desk(&network)
            .build()
            .unwrap();
        equations.output_mut().neg_mut();
        if let Some(second_member) = equations.second_member_mut() {
            second_member.neg_mut();
        }
        assert_relative_eq!(equations.output()[(0, 0)], 2.0);
        assert_eq!(equations.second_member(), Some(&DVector::from_vec(vec![-0.0, -0.3])));
    }

    #[test]
    fn integer_rates_assemble_exactly() {
        let mut store: CoefficientStore<i64> = [((1, 2), 4), ((2, 1), 1), ((2, 3), 3), ((3, 2), 2)]
            .into_iter()
            .collect();
        let network = ReconcilerBuilder::new()
            .with_store(&mut store)
            .build()
            .unwrap();
        let equations: RateEquations<i64> = RateEquationsBuilder::new()
            .with_info_desk(&network)
            .build()
            .unwrap();
        assert_eq!(
            equations.output(),
            &DMatrix::from_row_slice(2, 2, &[-4, 1, 2, -6])
        );
        assert_eq!(
            equations.second_member(),
            Some(&DVector::from_vec(vec![0, 2]))
        );
    }

    #[test]
    fn default_formulation_is_dynamic() {
        assert_eq!(Formulation::default(), Formulation::Dynamic);
    }
}
