//! Word store.
//!
//! Holds the fixed list of valid guesses. The same list is the universe the
//! daily answer is drawn from, so order matters: the persisted answer index
//! points into it.

use std::collections::HashSet;
use std::path::Path;

use rand::Rng;
use thiserror::Error;

/// Letters per word.
pub const WORD_LENGTH: usize = 5;

/// Words shipped with the game.
pub const DEFAULT_WORDS: [&str; 9] = [
    "apple", "spice", "space", "power", "sugar", "grass", "sword", "house", "water",
];

/// Word list errors.
#[derive(Debug, Error)]
pub enum WordListError {
    #[error("Word list is empty")]
    Empty,

    #[error("Invalid word '{0}': words must be five latin letters")]
    InvalidWord(String),

    #[error("Failed to read word list from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered, read-only list of valid words.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl WordList {
    /// Build a word list, rejecting any entry that is not a five-letter word.
    ///
    /// Entries are lowercased. Duplicates keep their first position.
    pub fn new<I, W>(words: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut list = Vec::new();
        let mut lookup = HashSet::new();

        for word in words {
            let word = normalize(word.as_ref())
                .ok_or_else(|| WordListError::InvalidWord(word.as_ref().to_string()))?;
            if lookup.insert(word.clone()) {
                list.push(word);
            }
        }

        if list.is_empty() {
            return Err(WordListError::Empty);
        }

        Ok(Self {
            words: list,
            lookup,
        })
    }

    /// Parse one word per line. Blank lines are ignored and malformed
    /// entries are skipped.
    pub fn parse(content: &str) -> Result<Self, WordListError> {
        let words: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| match normalize(line) {
                Some(word) => Some(word),
                None => {
                    tracing::warn!(entry = line, "Skipping invalid word list entry");
                    None
                }
            })
            .collect();

        Self::new(words)
    }

    /// Load a word list from a file with one word per line.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let list = Self::parse(&content)?;
        tracing::info!("Loaded {} words into word list", list.len());
        Ok(list)
    }

    /// Check if a word is valid (case insensitive).
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(&word.to_ascii_lowercase())
    }

    /// Get the word at an index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Draw a word uniformly at random, together with its index.
    ///
    /// Every constructor rejects an empty list, so there is always a word to
    /// draw.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, &str) {
        let index = rng.random_range(0..self.words.len());
        (index, &self.words[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordList {
    fn default() -> Self {
        let words: Vec<String> = DEFAULT_WORDS.iter().map(|w| w.to_string()).collect();
        let lookup = words.iter().cloned().collect();
        Self { words, lookup }
    }
}

/// Check that a character is a latin letter.
pub fn is_latin_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Lowercase a candidate word, returning `None` unless it is exactly
/// [`WORD_LENGTH`] latin letters.
pub fn normalize(word: &str) -> Option<String> {
    let word = word.trim();
    if word.chars().count() == WORD_LENGTH && word.chars().all(is_latin_letter) {
        Some(word.to_ascii_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_list() {
        let words = WordList::default();
        assert_eq!(words.len(), DEFAULT_WORDS.len());
        assert!(words.contains("house"));
        assert!(words.contains("HOUSE"));
        assert!(!words.contains("mouse"));
        assert_eq!(words.get(0), Some("apple"));
    }

    #[test]
    fn test_new_normalizes_and_dedupes() {
        let words = WordList::new(["Crane", "slate", "CRANE"]).unwrap();
        assert_eq!(words.iter().collect::<Vec<_>>(), vec!["crane", "slate"]);
    }

    #[test]
    fn test_new_rejects_bad_words() {
        assert!(matches!(
            WordList::new(["toolong"]),
            Err(WordListError::InvalidWord(_))
        ));
        assert!(matches!(
            WordList::new(["ab1de"]),
            Err(WordListError::InvalidWord(_))
        ));
        assert!(matches!(
            WordList::new(Vec::<String>::new()),
            Err(WordListError::Empty)
        ));
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let words = WordList::parse("apple\n\n  grass \nnope\nwätér\nsword\n").unwrap();
        assert_eq!(
            words.iter().collect::<Vec<_>>(),
            vec!["apple", "grass", "sword"]
        );
    }

    #[test]
    fn test_parse_all_invalid_is_empty() {
        assert!(matches!(WordList::parse("a\nbb\n"), Err(WordListError::Empty)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = WordList::load("/nonexistent/words.txt");
        assert!(matches!(result, Err(WordListError::Io { .. })));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("HoUsE"), Some("house".to_string()));
        assert_eq!(normalize("hous"), None);
        assert_eq!(normalize("hous3"), None);
    }

    #[test]
    fn test_choose_matches_index() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let words = WordList::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let (index, word) = words.choose(&mut rng);
            assert_eq!(words.get(index), Some(word));
        }
    }
}
