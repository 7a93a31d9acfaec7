use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Occurrence counts for each symbol in an input, ordered by symbol value.
///
/// Only symbols that actually occur are stored, so every entry has a
/// positive count and the sum of all counts equals the input length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, usize>,
}

impl FrequencyTable {
    /// Count every symbol of `symbols` in a single pass.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if `symbols` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use huffpack::huffman::FrequencyTable;
    ///
    /// let freq = FrequencyTable::from_symbols(b"aabccc").unwrap();
    /// assert_eq!(freq.count(b'a'), 2);
    /// assert_eq!(freq.count(b'c'), 3);
    /// assert_eq!(freq.total(), 6);
    /// ```
    pub fn from_symbols(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut counts = BTreeMap::new();
        for &symbol in symbols {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Ok(FrequencyTable { counts })
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Zero counts are skipped and repeated symbols accumulate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if no count is positive, and
    /// [`Error::Overflow`] if the counts sum past `usize::MAX`.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, usize)>,
    {
        let mut table = FrequencyTable::default();
        let mut total = 0usize;
        for (symbol, count) in pairs {
            if count > 0 {
                total = checked_total(total, count)?;
                table.add(symbol, count);
            }
        }
        if table.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(table)
    }

    /// Fold the counts of `other` into this table.
    ///
    /// Merging is commutative, so counting shards of an input separately and
    /// merging them gives the same table as counting the whole input. On
    /// [`Error::Overflow`] this table is left unchanged.
    pub fn merge(&mut self, other: &FrequencyTable) -> Result<()> {
        checked_total(self.total(), other.total())?;
        for (symbol, count) in other.iter() {
            self.add(symbol, count);
        }
        Ok(())
    }

    // Callers guarantee the table total stays representable, so no single
    // entry can overflow either.
    fn add(&mut self, symbol: u8, count: usize) {
        *self.counts.entry(symbol).or_insert(0) += count;
    }

    /// Occurrences of `symbol`, zero if it never appeared.
    pub fn count(&self, symbol: u8) -> usize {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Sum of all counts. Never overflows: construction rejects tables whose
    /// total would not fit.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(symbol, count)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

fn checked_total(total: usize, count: usize) -> Result<usize> {
    total
        .checked_add(count)
        .ok_or_else(|| Error::Overflow(format!("{total} + {count} exceeds usize::MAX")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_table() {
        let freq = FrequencyTable::from_symbols(b"aabccc").unwrap();
        assert_eq!(freq.count(b'a'), 2);
        assert_eq!(freq.count(b'b'), 1);
        assert_eq!(freq.count(b'c'), 3);
        assert_eq!(freq.count(b'z'), 0);
        assert_eq!(freq.len(), 3);
    }

    #[test]
    fn test_total_matches_input_length() {
        let input = b"this is an example for huffman encoding";
        let freq = FrequencyTable::from_symbols(input).unwrap();
        assert_eq!(freq.total(), input.len());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            FrequencyTable::from_symbols(&[]),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            FrequencyTable::from_counts(vec![(b'a', 0)]),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_iteration_is_sorted_by_symbol() {
        let freq = FrequencyTable::from_symbols(b"zyxzy").unwrap();
        let pairs: Vec<_> = freq.iter().collect();
        assert_eq!(pairs, vec![(b'x', 1), (b'y', 2), (b'z', 2)]);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let input = b"aaaaaaabbbbbbbcccd";
        let (left, right) = input.split_at(7);
        let mut merged = FrequencyTable::from_symbols(left).unwrap();
        merged
            .merge(&FrequencyTable::from_symbols(right).unwrap())
            .unwrap();
        assert_eq!(merged, FrequencyTable::from_symbols(input).unwrap());
    }

    #[test]
    fn test_counts_that_overflow() {
        assert!(matches!(
            FrequencyTable::from_counts(vec![(0, usize::MAX), (1, 1)]),
            Err(Error::Overflow(_))
        ));
        assert!(matches!(
            FrequencyTable::from_counts(vec![(0, usize::MAX), (0, 1)]),
            Err(Error::Overflow(_))
        ));

        let mut big = FrequencyTable::from_counts(vec![(0, usize::MAX - 1)]).unwrap();
        let before = big.clone();
        let extra = FrequencyTable::from_counts(vec![(1, 2)]).unwrap();
        assert!(matches!(big.merge(&extra), Err(Error::Overflow(_))));
        assert_eq!(big, before);

        let fits = FrequencyTable::from_counts(vec![(1, 1)]).unwrap();
        big.merge(&fits).unwrap();
        assert_eq!(big.total(), usize::MAX);
    }

    #[test]
    fn test_from_counts_skips_zero() {
        let freq = FrequencyTable::from_counts(vec![(1, 3), (2, 0), (1, 2)]).unwrap();
        assert_eq!(freq.len(), 1);
        assert_eq!(freq.count(1), 5);
    }
}
