//! The static system `M F = e_N` with `dim(M) = N`

use crate::element::ElementCalculator;
use chargestate_network::{CoefficientInfoDesk, Rate};
use nalgebra::DMatrix;

/// Assemble the full generator with the last row replaced by the normalisation `sum(F) = 1`
///
/// The caller guarantees at least two states.
pub(super) fn assemble<T, InfoDesk>(info_desk: &InfoDesk) -> DMatrix<T>
where
    T: Rate,
    InfoDesk: CoefficientInfoDesk<T>,
{
    let range = info_desk.range();
    let dim = range.size();
    let offset = range.start();
    let last_index = offset + dim - 1;
    let calculator = ElementCalculator::new(info_desk);

    let mut matrix = DMatrix::zeros(dim, dim);
    for p in range {
        for q in range {
            if p != last_index {
                matrix[(p - offset, q - offset)] = calculator.matrix_element(p, q);
            } else {
                matrix[(dim - 1, q - offset)] = T::one();
            }
        }
    }
    matrix
}
