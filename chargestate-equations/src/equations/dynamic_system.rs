//! The dynamic system `dF/dx = A F + c` with `dim(A) = N - 1`
//!
//! Substituting `F_N = 1 - sum(F_k, k < N)` into the first `N - 1` equations turns the column of
//! the last state into the constant `c_p = m(p, N)` and shifts every other element of the row by
//! `-m(p, N)`. The substitution is exact, so the reduced system also carries the steady state
//! through `A F = -c`.

use crate::element::ElementCalculator;
use chargestate_network::{CoefficientInfoDesk, Rate};
use nalgebra::{DMatrix, DVector};

/// Assemble the reduced matrix and its constant vector, `None` when a single state is left
pub(super) fn assemble<T, InfoDesk>(info_desk: &InfoDesk) -> Option<(DMatrix<T>, DVector<T>)>
where
    T: Rate,
    InfoDesk: CoefficientInfoDesk<T>,
{
    let range = info_desk.range();
    let dim = range.size();
    if dim <= 1 {
        return None;
    }
    let offset = range.start();
    let last_index = offset + dim - 1;
    let reduced_range = range.reduced();
    let calculator = ElementCalculator::new(info_desk);

    let mut matrix = DMatrix::zeros(dim - 1, dim - 1);
    for p in reduced_range {
        for q in reduced_range {
            matrix[(p - offset, q - offset)] =
                calculator.matrix_element(p, q) - calculator.matrix_element(p, last_index);
            tracing::trace!("mat({},{}) = {:?}", p, q, matrix[(p - offset, q - offset)]);
        }
    }

    let mut second_member = DVector::zeros(reduced_range.size());
    for p in reduced_range {
        second_member[p - offset] = calculator.matrix_element(p, last_index);
        tracing::trace!("c({}) = {:?}", p, second_member[p - offset]);
    }

    Some((matrix, second_member))
}
