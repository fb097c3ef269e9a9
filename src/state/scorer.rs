//! Guess scoring.
//!
//! Compares an attempt against the answer letter by letter.
//!
//! Two rules are available:
//!
//! - `Positional` - a letter is `Present` whenever it occurs anywhere in the
//!   answer, regardless of how many times it was already matched. With
//!   answer `sugar` and attempt `grass`, the single `s` in the answer marks
//!   both `s` tiles of the attempt.
//! - `CountLimited` - exact matches are resolved first, then each remaining
//!   answer letter accounts for at most one `Present` mark.

use serde::{Deserialize, Serialize};

use super::words::WORD_LENGTH;

/// Per-letter feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterVerdict {
    /// Right letter, right position
    Correct,
    /// Letter occurs elsewhere in the answer
    Present,
    /// Letter not in the answer
    Absent,
}

impl LetterVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    /// Strength used when merging verdicts for the same letter.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }
}

/// Verdicts for a full word, one per position.
pub type WordVerdict = [LetterVerdict; WORD_LENGTH];

/// How repeated letters are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    #[default]
    Positional,
    CountLimited,
}

impl ScoringRule {
    /// Score an attempt against the answer with this rule.
    ///
    /// Both words must be [`WORD_LENGTH`] ASCII letters.
    pub fn score(&self, attempt: &str, answer: &str) -> WordVerdict {
        match self {
            Self::Positional => score(attempt, answer),
            Self::CountLimited => score_count_limited(attempt, answer),
        }
    }
}

/// Score an attempt with the positional rule.
///
/// # Panics
///
/// Panics if either word is shorter than [`WORD_LENGTH`] bytes. Callers
/// pass words that came through the word list.
pub fn score(attempt: &str, answer: &str) -> WordVerdict {
    debug_assert_eq!(attempt.len(), WORD_LENGTH, "attempt '{}'", attempt);
    debug_assert_eq!(answer.len(), WORD_LENGTH, "answer '{}'", answer);
    let attempt = attempt.as_bytes();
    let answer = answer.as_bytes();
    let mut verdicts = [LetterVerdict::Absent; WORD_LENGTH];

    for (i, verdict) in verdicts.iter_mut().enumerate() {
        *verdict = if attempt[i] == answer[i] {
            LetterVerdict::Correct
        } else if answer.contains(&attempt[i]) {
            LetterVerdict::Present
        } else {
            LetterVerdict::Absent
        };
    }

    verdicts
}

/// Score an attempt so each answer letter is matched at most once.
///
/// # Panics
///
/// Same length requirement as [`score`].
pub fn score_count_limited(attempt: &str, answer: &str) -> WordVerdict {
    debug_assert_eq!(attempt.len(), WORD_LENGTH, "attempt '{}'", attempt);
    debug_assert_eq!(answer.len(), WORD_LENGTH, "answer '{}'", answer);
    let attempt = attempt.as_bytes();
    let answer = answer.as_bytes();
    let mut verdicts = [LetterVerdict::Absent; WORD_LENGTH];
    let mut unmatched = [0u8; 26];

    for i in 0..WORD_LENGTH {
        if attempt[i] == answer[i] {
            verdicts[i] = LetterVerdict::Correct;
        } else {
            unmatched[letter_slot(answer[i])] += 1;
        }
    }

    for i in 0..WORD_LENGTH {
        if verdicts[i] == LetterVerdict::Correct {
            continue;
        }
        let slot = letter_slot(attempt[i]);
        if unmatched[slot] > 0 {
            unmatched[slot] -= 1;
            verdicts[i] = LetterVerdict::Present;
        }
    }

    verdicts
}

/// Check if every letter is correct.
pub fn is_solved(verdicts: &WordVerdict) -> bool {
    verdicts.iter().all(|v| *v == LetterVerdict::Correct)
}

fn letter_slot(byte: u8) -> usize {
    (byte.to_ascii_lowercase().wrapping_sub(b'a') % 26) as usize
}
