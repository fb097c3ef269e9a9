//! Attempt log.
//!
//! The day's submitted guesses, in order. Append-only and bounded by the
//! attempt limit.

use serde_json::Value;

use super::storage::{Storage, StorageError, ATTEMPTS_KEY};
use super::words::normalize;

/// Default number of guesses per day.
pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

/// Ordered list of submitted words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptLog {
    attempts: Vec<String>,
    max_attempts: usize,
}

impl AttemptLog {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            attempts: Vec::with_capacity(max_attempts),
            max_attempts,
        }
    }

    /// Restore a log from previously stored words.
    ///
    /// Anything beyond the limit is dropped.
    pub fn from_words(words: Vec<String>, max_attempts: usize) -> Self {
        let mut attempts = words;
        if attempts.len() > max_attempts {
            tracing::warn!(
                stored = attempts.len(),
                max_attempts,
                "Truncating stored attempt log"
            );
            attempts.truncate(max_attempts);
        }
        Self {
            attempts,
            max_attempts,
        }
    }

    /// Load the log from storage.
    ///
    /// Missing state is an empty log. Entries that are not five-letter words
    /// are dropped, and a stored value that is not a list is treated as an
    /// empty log.
    pub fn load<S: Storage + ?Sized>(
        storage: &S,
        max_attempts: usize,
    ) -> Result<Self, StorageError> {
        let entries = match storage.get(ATTEMPTS_KEY)? {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                tracing::warn!(value = %other, "Ignoring stored attempt log that is not a list");
                Vec::new()
            }
        };

        let words = entries
            .into_iter()
            .filter_map(|entry| {
                let normalized = entry.as_str().and_then(normalize);
                if normalized.is_none() {
                    tracing::warn!(entry = %entry, "Dropping malformed stored attempt");
                }
                normalized
            })
            .collect();
        Ok(Self::from_words(words, max_attempts))
    }

    /// Write the log as it would look with `next` appended.
    ///
    /// The log itself is untouched so a failed write leaves nothing to undo.
    pub fn save_with<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        next: &str,
    ) -> Result<(), StorageError> {
        let mut words: Vec<Value> = self
            .attempts
            .iter()
            .map(|w| Value::String(w.clone()))
            .collect();
        words.push(Value::String(next.to_string()));
        storage.set(ATTEMPTS_KEY, Value::Array(words))
    }

    /// Clear the stored log.
    pub fn clear_stored<S: Storage + ?Sized>(storage: &mut S) -> Result<(), StorageError> {
        storage.set(ATTEMPTS_KEY, Value::Array(Vec::new()))
    }

    /// Append a word. Returns false if the log is already full.
    pub fn push(&mut self, word: String) -> bool {
        if self.is_full() {
            return false;
        }
        self.attempts.push(word);
        true
    }

    pub fn is_full(&self) -> bool {
        self.attempts.len() >= self.max_attempts
    }

    pub fn remaining(&self) -> usize {
        self.max_attempts.saturating_sub(self.attempts.len())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.attempts.iter().any(|w| w == word)
    }

    pub fn last(&self) -> Option<&str> {
        self.attempts.last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.attempts.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.attempts
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl Default for AttemptLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
