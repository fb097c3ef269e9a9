//! On-screen keyboard state.
//!
//! Tracks the strongest verdict seen for each letter across the day's
//! attempts. A letter never moves down: once `Correct`, a later `Present`
//! for the same letter leaves it `Correct`.

use std::collections::BTreeMap;

use super::scorer::LetterVerdict;

/// Keyboard rows, top to bottom.
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Best-known verdict per letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    letters: BTreeMap<char, LetterVerdict>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one scored letter.
    pub fn record(&mut self, letter: char, verdict: LetterVerdict) {
        let letter = letter.to_ascii_lowercase();
        self.letters
            .entry(letter)
            .and_modify(|current| {
                if verdict.rank() > current.rank() {
                    *current = verdict;
                }
            })
            .or_insert(verdict);
    }

    /// Merge a scored word.
    pub fn record_word<I>(&mut self, scored: I)
    where
        I: IntoIterator<Item = (char, LetterVerdict)>,
    {
        for (letter, verdict) in scored {
            self.record(letter, verdict);
        }
    }

    /// Verdict for a letter, `None` if it has not been played.
    pub fn get(&self, letter: char) -> Option<LetterVerdict> {
        self.letters.get(&letter.to_ascii_lowercase()).copied()
    }

    pub fn clear(&mut self) {
        self.letters.clear();
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .letters
            .iter()
            .map(|(letter, verdict)| (letter.to_string(), serde_json::json!(verdict.as_str())))
            .collect();
        serde_json::Value::Object(map)
    }
}
