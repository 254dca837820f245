//! The concurrent word→count ledger at the heart of webtally.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A single `(word, count)` pair copied out of the tally by
/// [`WordTally::snapshot`]. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TallyEntry {
    /// The word itself.
    pub word: String,
    /// Occurrences recorded for the word. Always at least 1.
    pub count: u64,
}

/// Thread-safe word-occurrence ledger.
///
/// One mutex guards the whole mapping, making every [`add`](Self::add) and
/// [`remove`](Self::remove) a single atomic read-modify-write: two
/// concurrent increments of the same word can never lose an update, and no
/// entry is ever observable with a count of zero. Ordering is deferred
/// entirely to reporting time; the map itself is unordered.
///
/// The empty string is a valid key like any other.
#[derive(Debug, Default)]
pub struct WordTally {
    counts: Mutex<HashMap<String, u64>>,
}

impl WordTally {
    /// Create an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        // Each critical section is one complete map update, so a panic in
        // another holder cannot leave a half-applied entry behind and the
        // poisoned state is safe to take over.
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one occurrence of `word`, inserting it at count 1 if absent.
    pub fn add(&self, word: &str) {
        let mut counts = self.lock();
        match counts.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                counts.insert(word.to_owned(), 1);
            }
        }
    }

    /// Erase one occurrence of `word`, deleting the entry outright when its
    /// count would reach zero. Removing an absent word is a no-op, not an
    /// error.
    pub fn remove(&self, word: &str) {
        let mut counts = self.lock();
        if let Some(count) = counts.get_mut(word) {
            if *count > 1 {
                *count -= 1;
            } else {
                counts.remove(word);
            }
        }
    }

    /// Current count for `word`, or `None` if absent. Present words always
    /// have a count of at least 1.
    #[must_use]
    pub fn count(&self, word: &str) -> Option<u64> {
        self.lock().get(word).copied()
    }

    /// Number of distinct words currently tallied.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` if no words have been tallied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Point-in-time copy of every entry.
    ///
    /// Taken in one critical section, so no entry can be torn by a
    /// concurrent writer; iteration order is unspecified (ranking belongs
    /// to [`crate::report`]).
    #[must_use]
    pub fn snapshot(&self) -> Vec<TallyEntry> {
        self.lock()
            .iter()
            .map(|(word, &count)| TallyEntry {
                word: word.clone(),
                count,
            })
            .collect()
    }
}
