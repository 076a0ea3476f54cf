//! # Store
//! Sparse storage of transition rates keyed by ordered state pairs

use crate::{IndexRange, Rate};
use std::collections::BTreeMap;

/// Where a stored rate came from
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Origin {
    /// Provided by the caller, counts as data even when the value is zero
    Supplied,
    /// Inserted by the zero-fill pass
    Filled,
}

#[derive(Copy, Clone, Debug)]
struct Entry<T> {
    rate: T,
    origin: Origin,
}

/// A sparse table of transition rates
///
/// Keys are 1-based `(i, j)` charge-state pairs. Missing pairs read as absent through
/// [`CoefficientStore::lookup`]; once a range has been zero-filled every pair inside it is present.
#[derive(Clone, Debug, Default)]
pub struct CoefficientStore<T> {
    entries: BTreeMap<(usize, usize), Entry<T>>,
}

impl<T: Rate> CoefficientStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert a caller supplied rate, returning the previous value at the key if there was one
    pub fn insert(&mut self, i: usize, j: usize, rate: T) -> Option<T> {
        self.entries
            .insert(
                (i, j),
                Entry {
                    rate,
                    origin: Origin::Supplied,
                },
            )
            .map(|previous| previous.rate)
    }

    /// Exact-key lookup
    pub fn lookup(&self, i: usize, j: usize) -> Option<T> {
        self.entries.get(&(i, j)).map(|entry| entry.rate)
    }

    /// Whether the caller supplied a value for `(i, j)`, zero-filled entries do not count
    pub fn is_supplied(&self, i: usize, j: usize) -> bool {
        matches!(
            self.entries.get(&(i, j)),
            Some(Entry {
                origin: Origin::Supplied,
                ..
            })
        )
    }

    /// The rate at `(i, j)`
    ///
    /// # Panics
    /// When the key is absent. Callers only reach for keys inside a zero-filled range, so an
    /// absent key means the reconciled range was not respected.
    pub fn rate(&self, i: usize, j: usize) -> T {
        match self.entries.get(&(i, j)) {
            Some(entry) => entry.rate,
            None => panic!(
                "coefficient ({}, {}) is absent: the element lies outside the zero-filled range",
                i, j
            ),
        }
    }

    /// Insert a zero at every pair in `rows x columns` that holds no value yet
    ///
    /// Returns the number of inserted zeros, so a second pass over the same ranges returns 0.
    pub fn fill_missing(&mut self, rows: IndexRange, columns: IndexRange) -> usize {
        let mut inserted = 0;
        for i in rows {
            for j in columns {
                self.entries.entry((i, j)).or_insert_with(|| {
                    inserted += 1;
                    Entry {
                        rate: T::zero(),
                        origin: Origin::Filled,
                    }
                });
            }
        }
        inserted
    }

    /// The number of stored entries, supplied or filled
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the caller supplied entries in key order
    pub fn supplied(&self) -> impl Iterator<Item = ((usize, usize), T)> + '_ {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.origin == Origin::Supplied)
            .map(|(&key, entry)| (key, entry.rate))
    }
}

impl<T: Rate> Extend<((usize, usize), T)> for CoefficientStore<T> {
    fn extend<I: IntoIterator<Item = ((usize, usize), T)>>(&mut self, iter: I) {
        for ((i, j), rate) in iter {
            self.insert(i, j, rate);
        }
    }
}

impl<T: Rate> FromIterator<((usize, usize), T)> for CoefficientStore<T> {
    fn from_iter<I: IntoIterator<Item = ((usize, usize), T)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod test {
    use super::CoefficientStore;
    use crate::IndexRange;

    fn scenario() -> CoefficientStore<f64> {
        [((1, 2), 2.0), ((2, 1), 1.0), ((2, 3), 0.5), ((3, 2), 0.3)]
            .into_iter()
            .collect()
    }

    #[test]
    fn lookup_is_exact() {
        let store = scenario();
        assert_eq!(store.lookup(1, 2), Some(2.0));
        assert_eq!(store.lookup(2, 2), None);
        assert_eq!(store.lookup(3, 1), None);
    }

    #[test]
    fn fill_missing_pads_the_product_of_ranges_with_zeros() {
        let mut store = scenario();
        let range = IndexRange::from_bounds(1, 3);
        let inserted = store.fill_missing(range, range);
        assert_eq!(inserted, 5);
        assert_eq!(store.len(), 9);
        for i in range {
            for j in range {
                assert!(store.lookup(i, j).is_some());
            }
        }
        assert_eq!(store.lookup(1, 3), Some(0.0));
        assert_eq!(store.lookup(2, 3), Some(0.5));
    }

    #[test]
    fn fill_missing_is_idempotent() {
        let mut store = scenario();
        let range = IndexRange::from_bounds(1, 3);
        store.fill_missing(range, range);
        assert_eq!(store.fill_missing(range, range), 0);
        assert_eq!(store.len(), 9);
    }

    #[test]
    fn filled_entries_are_not_supplied() {
        let mut store = scenario();
        store.insert(1, 1, 0.0);
        let range = IndexRange::from_bounds(1, 3);
        store.fill_missing(range, range);
        assert!(store.is_supplied(1, 1));
        assert!(!store.is_supplied(3, 3));
        assert_eq!(store.supplied().count(), 5);
    }

    #[test]
    fn insert_replaces_a_previous_value() {
        let mut store = scenario();
        assert_eq!(store.insert(1, 2, 4.0), Some(2.0));
        assert_eq!(store.rate(1, 2), 4.0);
    }

    #[test]
    #[should_panic(expected = "outside the zero-filled range")]
    fn rate_panics_on_an_absent_key() {
        let store = scenario();
        store.rate(7, 7);
    }
}
