use std::fmt;
use std::ops::RangeInclusive;

/// A contiguous interval of state indices `[start, start + size)`
///
/// Used for the candidate windows supplied by the caller, for the tight range covered by the
/// coefficient table and for the reduced range of the dynamic system.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndexRange {
    start: usize,
    size: usize,
}

impl IndexRange {
    /// Construct from the first index and the number of indices
    ///
    /// The size is clamped so that `end` never exceeds `usize::MAX`.
    pub fn new(start: usize, size: usize) -> Self {
        Self {
            start,
            size: size.min(usize::MAX - start),
        }
    }

    /// Construct from inclusive bounds, an inverted pair yields an empty range
    ///
    /// An upper bound of `usize::MAX` is treated as unbounded and is itself excluded.
    pub fn from_bounds(min: usize, max: usize) -> Self {
        if max < min {
            Self::new(min, 0)
        } else {
            Self::new(min, (max - min).saturating_add(1))
        }
    }

    /// The first index in the range
    pub fn start(&self) -> usize {
        self.start
    }

    /// The number of indices in the range
    pub fn size(&self) -> usize {
        self.size
    }

    /// One past the final index
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    /// The final index, or `None` for an empty range
    pub fn last(&self) -> Option<usize> {
        (self.size > 0).then(|| self.end() - 1)
    }

    /// True when the range holds no indices
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// True when `index` lies in `[start, end)`
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    /// The range with its final index removed
    ///
    /// The dynamic system eliminates the last state through the conservation law, so it is
    /// assembled over this range.
    pub fn reduced(&self) -> Self {
        Self::new(self.start, self.size.saturating_sub(1))
    }

    /// Iterate the indices in ascending order
    pub fn iter(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }
}

impl From<RangeInclusive<usize>> for IndexRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        Self::from_bounds(*range.start(), *range.end())
    }
}

impl IntoIterator for IndexRange {
    type Item = usize;
    type IntoIter = std::ops::Range<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last() {
            Some(last) => write!(f, "[{}, {}]", self.start, last),
            None => write!(f, "[{}, empty]", self.start),
        }
    }
}
