//! Growable bit set of selected column positions.
//!
//! Columns are recorded once, while the header row is evaluated, and then
//! queried for every field of every data row. Storage is a vector of 64-bit
//! words that doubles whenever a set index lands past the end.

const WORD_BITS: usize = u64::BITS as usize;

/// Bit-indexed set of zero-based column indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    words: Vec<u64>,
}

impl ColumnSet {
    /// Create an empty set with room for at least `columns` indices before
    /// the first growth.
    pub fn with_capacity(columns: usize) -> Self {
        let words = columns.div_ceil(WORD_BITS).max(1);
        Self {
            words: vec![0; words],
        }
    }

    /// Number of 64-bit words currently allocated.
    pub fn capacity(&self) -> usize {
        self.words.len()
    }

    /// Mark `index` as selected, growing storage if needed.
    ///
    /// Growth doubles the word count until `index` fits; the new words are
    /// zeroed so previously set bits are untouched.
    pub fn set(&mut self, index: usize) {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            self.grow_to_fit(word);
        }
        self.words[word] |= 1u64 << (index % WORD_BITS);
    }

    /// Whether `index` was selected. Indices past the allocated range are
    /// never selected.
    pub fn contains(&self, index: usize) -> bool {
        match self.words.get(index / WORD_BITS) {
            Some(word) => word & (1u64 << (index % WORD_BITS)) != 0,
            None => false,
        }
    }

    /// True when no column has been selected.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of selected columns.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Selected indices in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            (0..WORD_BITS)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| i * WORD_BITS + bit)
        })
    }

    fn grow_to_fit(&mut self, word: usize) {
        let mut capacity = self.words.len().max(1);
        while word >= capacity {
            capacity *= 2;
        }
        self.words.resize(capacity, 0);
    }
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::with_capacity(WORD_BITS)
    }
}
