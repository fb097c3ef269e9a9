//! Daily answer rotation.
//!
//! The answer is stored as an index into the word list together with the
//! time it was picked. Once the rotation period has passed, a new index is
//! drawn and the attempt log is cleared.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde_json::{json, Value};

use super::attempts::AttemptLog;
use super::storage::{
    read_i64, Storage, StorageError, ANSWER_INDEX_KEY, ATTEMPTS_KEY, LAST_ROTATION_KEY,
};
use super::words::WordList;

/// Default hours between answer rotations.
pub const DEFAULT_ROTATION_HOURS: i64 = 24;

/// The answer in effect for the current period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAnswer {
    /// Index into the word list
    pub index: usize,

    /// The answer word
    pub word: String,

    /// When this answer was picked
    pub rotated_at: DateTime<Utc>,

    /// Whether this call picked a new answer
    pub rotated: bool,
}

impl DailyAnswer {
    /// When the next rotation becomes due.
    pub fn expires_at(&self, period: Duration) -> DateTime<Utc> {
        self.rotated_at + period
    }
}

/// Rotation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRotation {
    period: Duration,
}

impl DailyRotation {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Check if a rotation recorded at `last` has expired.
    ///
    /// Only strictly more than one period counts. A timestamp in the future
    /// never expires.
    pub fn is_due(&self, last: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - last > self.period
    }

    /// Get the current answer, rotating if needed.
    ///
    /// Missing or unreadable state counts as "needs rotation". A rotation
    /// clears the stored attempt log before recording the new index and
    /// timestamp.
    pub fn current<S, R>(
        &self,
        storage: &mut S,
        words: &WordList,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<DailyAnswer, StorageError>
    where
        S: Storage + ?Sized,
        R: Rng + ?Sized,
    {
        if let Some(existing) = self.stored(storage, words, now) {
            return Ok(existing);
        }
        self.rotate(storage, words, now, rng)
    }

    /// Force a new answer.
    ///
    /// The attempt log is cleared first and the timestamp is written last.
    /// If any write fails, the stored attempts and index are put back so
    /// storage still describes the old day.
    pub fn rotate<S, R>(
        &self,
        storage: &mut S,
        words: &WordList,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<DailyAnswer, StorageError>
    where
        S: Storage + ?Sized,
        R: Rng + ?Sized,
    {
        let (index, word) = words.choose(rng);
        let previous = [
            (ATTEMPTS_KEY, storage.get(ATTEMPTS_KEY)?),
            (ANSWER_INDEX_KEY, storage.get(ANSWER_INDEX_KEY)?),
        ];

        let written = AttemptLog::clear_stored(storage)
            .and_then(|()| storage.set(ANSWER_INDEX_KEY, json!(index)))
            .and_then(|()| storage.set(LAST_ROTATION_KEY, json!(now.timestamp())));
        if let Err(e) = written {
            tracing::error!(error = %e, "Rotation failed, restoring previous day");
            restore(storage, previous);
            return Err(e);
        }

        tracing::info!(index, at = now.timestamp(), "Rotated daily answer");

        Ok(DailyAnswer {
            index,
            word: word.to_string(),
            rotated_at: now,
            rotated: true,
        })
    }

    /// Recover a still-valid answer from storage.
    fn stored<S: Storage + ?Sized>(
        &self,
        storage: &S,
        words: &WordList,
        now: DateTime<Utc>,
    ) -> Option<DailyAnswer> {
        let index = read_or_warn(storage, ANSWER_INDEX_KEY)?;
        let last = read_or_warn(storage, LAST_ROTATION_KEY)?;

        let index = usize::try_from(index).ok()?;
        let word = words.get(index)?;
        let rotated_at = DateTime::from_timestamp(last, 0)?;

        if self.is_due(rotated_at, now) {
            return None;
        }

        Some(DailyAnswer {
            index,
            word: word.to_string(),
            rotated_at,
            rotated: false,
        })
    }
}

impl Default for DailyRotation {
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_ROTATION_HOURS))
    }
}

fn restore<S: Storage + ?Sized>(storage: &mut S, previous: [(&str, Option<Value>); 2]) {
    for (key, value) in previous {
        let result = match value {
            Some(value) => storage.set(key, value),
            None => storage.remove(key),
        };
        if let Err(e) = result {
            tracing::error!(key, error = %e, "Failed to restore rotation state");
        }
    }
}

fn read_or_warn<S: Storage + ?Sized>(storage: &S, key: &str) -> Option<i64> {
    match read_i64(storage, key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring unreadable rotation state");
            None
        }
    }
}
