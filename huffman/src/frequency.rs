use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::Hash;
use std::slice;

use super::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Frequency<S> {
    pub symbol: S,
    pub count: u64,
}

/// Ordered list of distinct symbols with their non-zero counts.
///
/// The order is the tie-break input of tree construction: among candidates
/// of equal weight, the one appearing first ends up on the left.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrequencyTable<S> {
    entries: Vec<Frequency<S>>,
    total: u64,
}

impl<S: Copy + Eq + Hash> FrequencyTable<S> {
    pub fn from_entries(entries: Vec<Frequency<S>>) -> Result<FrequencyTable<S>, Error> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut total: u64 = 0;
        for (index, entry) in entries.iter().enumerate() {
            if entry.count == 0 {
                return Err(Error::ZeroCount { index });
            }
            if !seen.insert(entry.symbol) {
                return Err(Error::DuplicateSymbol { index });
            }
            total = total.checked_add(entry.count).ok_or(Error::CountOverflow)?;
        }
        Ok(FrequencyTable { entries, total })
    }
    /// Counts the symbols of `symbols`.
    ///
    /// Entries are sorted by ascending count. Symbols with equal counts are
    /// listed in reverse order of their first occurrence.
    pub fn count<I: IntoIterator<Item = S>>(symbols: I) -> FrequencyTable<S> {
        let mut indices: HashMap<S, usize> = HashMap::new();
        let mut entries: Vec<Frequency<S>> = Vec::new();
        let mut total: u64 = 0;
        for symbol in symbols {
            let index = *indices.entry(symbol).or_insert_with(|| {
                entries.push(Frequency { symbol, count: 0 });
                entries.len() - 1
            });
            entries[index].count += 1;
            total += 1;
        }
        // Most common first, keeping first-seen order for ties, then flip
        // the whole list around.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.reverse();
        FrequencyTable { entries, total }
    }
    pub fn get(&self, symbol: S) -> Option<u64> {
        self.entries.iter().find(|e| e.symbol == symbol).map(|e| e.count)
    }
}

impl<S> FrequencyTable<S> {
    pub fn entries(&self) -> &[Frequency<S>] {
        &self.entries
    }
    pub fn iter(&self) -> slice::Iter<Frequency<S>> {
        self.entries.iter()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Sum of all counts, i.e. the length of the counted sequence.
    pub fn total(&self) -> u64 {
        self.total
    }
    /// Whether the counts are in ascending order.
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].count <= w[1].count)
    }
}

impl<'a, S> IntoIterator for &'a FrequencyTable<S> {
    type Item = &'a Frequency<S>;
    type IntoIter = slice::Iter<'a, Frequency<S>>;
    fn into_iter(self) -> slice::Iter<'a, Frequency<S>> {
        self.entries.iter()
    }
}
