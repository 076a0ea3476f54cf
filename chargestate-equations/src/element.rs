//! Matrix elements of the rate equation system
//!
//! The element at row `p` and column `q` is the sum of three contributions, each projected on
//! column `q` through a Kronecker delta:
//!
//! - the ionization sum, inflow into `p` from the lower states,
//! - the recombination sum, inflow into `p` from the higher states,
//! - the diagonal sum, the total outflow from `p`, which only lands on `q == p`.
//!
//! For `q == p` the element is the negative total outflow from `p`, otherwise it is the inflow
//! rate from `q` into `p`. Every sum runs in ascending index order so floating point results are
//! reproducible.

use chargestate_network::{CoefficientInfoDesk, Rate};
use std::marker::PhantomData;

/// Computes matrix elements from an implementation of `CoefficientInfoDesk`
pub struct ElementCalculator<'a, T, InfoDesk> {
    info_desk: &'a InfoDesk,
    __marker: PhantomData<T>,
}

impl<'a, T, InfoDesk> ElementCalculator<'a, T, InfoDesk>
where
    T: Rate,
    InfoDesk: CoefficientInfoDesk<T>,
{
    /// Borrow `info_desk` for element evaluation
    pub fn new(info_desk: &'a InfoDesk) -> Self {
        Self {
            info_desk,
            __marker: PhantomData,
        }
    }

    /// Kronecker delta selecting the contributions that land in column `q`
    fn kronecker(k: usize, q: usize) -> T {
        if k == q {
            T::one()
        } else {
            T::zero()
        }
    }

    /// Element below the diagonal: inflow into `i` from every lower state `j`
    pub fn ionization_sum(&self, i: usize, q: usize) -> T {
        let range = self.info_desk.range();
        let mut value = T::zero();
        for j in range.start()..i {
            value += self.info_desk.rate(j, i) * Self::kronecker(j, q);
        }
        value
    }

    /// Element above the diagonal: inflow into `i` from every higher state `s`
    pub fn recombination_sum(&self, i: usize, q: usize) -> T {
        let range = self.info_desk.range();
        let mut value = T::zero();
        for s in (i + 1)..range.end() {
            value += self.info_desk.rate(s, i) * Self::kronecker(s, q);
        }
        value
    }

    /// Diagonal element: total outflow from `i` to every other state
    pub fn diagonal_sum(&self, i: usize, q: usize) -> T {
        let range = self.info_desk.range();
        let mut value = T::zero();
        for m in (i + 1)..range.end() {
            value += self.info_desk.rate(i, m) * Self::kronecker(i, q);
        }
        for k in range.start()..i {
            value += self.info_desk.rate(i, k) * Self::kronecker(i, q);
        }
        value
    }

    /// The matrix element at row `p`, column `q`
    pub fn matrix_element(&self, p: usize, q: usize) -> T {
        let mut value = self.ionization_sum(p, q);
        value += self.recombination_sum(p, q);
        value -= self.diagonal_sum(p, q);
        value
    }
}
