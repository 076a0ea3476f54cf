//! Range reconciliation
//!
//! Scans the supplied coefficients inside the candidate windows for the tight row and column
//! ranges, checks they agree and that they cover the requested number of states, then pads the
//! range with zeros. All checks run before the store is touched, so a failed reconciliation
//! leaves the store exactly as it was handed in.

use crate::{CoefficientInfoDesk, CoefficientStore, IndexRange, Rate, ReconcileError};

/// A coefficient table validated against, and zero-filled over, its reconciled range
#[derive(Debug)]
pub struct ReconciledNetwork<'a, T> {
    store: &'a CoefficientStore<T>,
    range: IndexRange,
    dimension: usize,
}

impl<'a, T: Rate> ReconciledNetwork<'a, T> {
    /// The tight range, identical for rows and columns
    pub fn range(&self) -> IndexRange {
        self.range
    }

    /// The effective equation dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The underlying store, dense over `range x range`
    pub fn store(&self) -> &'a CoefficientStore<T> {
        self.store
    }
}

impl<T: Rate> CoefficientInfoDesk<T> for ReconciledNetwork<'_, T> {
    fn rate(&self, i: usize, j: usize) -> T {
        assert!(
            self.range.contains(i) && self.range.contains(j),
            "coefficient ({}, {}) requested outside the reconciled range {}",
            i,
            j,
            self.range
        );
        self.store.rate(i, j)
    }

    fn range(&self) -> IndexRange {
        self.range
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Builder for a `ReconciledNetwork` from a mutable reference to a `CoefficientStore`
pub struct ReconcilerBuilder<RefStore> {
    store: RefStore,
    row_window: Option<IndexRange>,
    column_window: Option<IndexRange>,
    requested_dimension: Option<usize>,
}

impl Default for ReconcilerBuilder<()> {
    fn default() -> Self {
        Self {
            store: (),
            row_window: None,
            column_window: None,
            requested_dimension: None,
        }
    }
}

impl ReconcilerBuilder<()> {
    /// Initialise an empty builder, windows default to the whole table
    pub fn new() -> Self {
        Self::default()
    }
}

impl<RefStore> ReconcilerBuilder<RefStore> {
    /// Attach the coefficient store, it is zero-filled on a successful build
    pub fn with_store<T>(
        self,
        store: &mut CoefficientStore<T>,
    ) -> ReconcilerBuilder<&mut CoefficientStore<T>> {
        ReconcilerBuilder {
            store,
            row_window: self.row_window,
            column_window: self.column_window,
            requested_dimension: self.requested_dimension,
        }
    }

    /// Restrict the search for row indices `i` to the inclusive window
    pub fn with_row_window(mut self, window: impl Into<IndexRange>) -> Self {
        self.row_window = Some(window.into());
        self
    }

    /// Restrict the search for column indices `j` to the inclusive window
    pub fn with_column_window(mut self, window: impl Into<IndexRange>) -> Self {
        self.column_window = Some(window.into());
        self
    }

    /// The number of coupled states the caller expects, `None` or zero leaves it unset
    pub fn with_requested_dimension(mut self, dimension: Option<usize>) -> Self {
        self.requested_dimension = dimension.filter(|&dimension| dimension > 0);
        self
    }
}

impl<'a, T: Rate> ReconcilerBuilder<&'a mut CoefficientStore<T>> {
    /// Reconcile the store and zero-fill it over the tight range
    #[tracing::instrument(name = "Range reconciliation", level = "info", skip(self))]
    pub fn build(self) -> Result<ReconciledNetwork<'a, T>, ReconcileError> {
        let row_window = self.row_window;
        let column_window = self.column_window;
        let in_window = |window: Option<IndexRange>, index: usize| {
            window.map_or(true, |window| window.contains(index))
        };

        let mut i_min = usize::MAX;
        let mut i_max = usize::MIN;
        let mut j_min = usize::MAX;
        let mut j_max = usize::MIN;
        let mut found = false;
        for ((i, j), rate) in self.store.supplied() {
            if !(in_window(row_window, i) && in_window(column_window, j)) {
                continue;
            }
            tracing::debug!("found transition coefficient Q.{}.{} = {:?}", i, j, rate);
            found = true;
            i_min = i_min.min(i);
            i_max = i_max.max(i);
            j_min = j_min.min(j);
            j_max = j_max.max(j);
        }

        if !found {
            let everything = IndexRange::new(0, usize::MAX);
            return Err(ReconcileError::NoCoefficients {
                row_window: row_window.unwrap_or(everything),
                column_window: column_window.unwrap_or(everything),
            });
        }

        let rows = IndexRange::from_bounds(i_min, i_max);
        let columns = IndexRange::from_bounds(j_min, j_max);
        tracing::trace!(
            "row range {} (dim {}), column range {} (dim {})",
            rows,
            rows.size(),
            columns,
            columns.size()
        );
        if rows != columns {
            return Err(ReconcileError::RangeMismatch { rows, columns });
        }

        let dimension = match self.requested_dimension {
            Some(requested) if requested > rows.size() => {
                return Err(ReconcileError::InsufficientCoverage {
                    requested,
                    found: rows.size(),
                    range: rows,
                })
            }
            Some(requested) if requested < rows.size() => {
                tracing::warn!(
                    "requested dimension {} is smaller than the {} states covered by {}, using {}",
                    requested,
                    rows.size(),
                    rows,
                    rows.size()
                );
                rows.size()
            }
            _ => rows.size(),
        };

        let store = self.store;
        let filled = store.fill_missing(rows, columns);
        tracing::debug!("padded {} missing coefficients in {} with zeros", filled, rows);

        Ok(ReconciledNetwork {
            store,
            range: rows,
            dimension,
        })
    }
}
