//! Game state machine.
//!
//! Holds the current input, the attempt log and the status for one answer.
//! This type never touches storage; [`GameSession`](super::GameSession)
//! persists a submission before committing it here.
//!
//! # State Diagram
//!
//! ```text
//!              submit == answer
//!   ┌────────────┐ ─────────────────▶ ┌─────┐
//!   │ InProgress │                    │ Won │
//!   └────────────┘ ─────────────────▶ └─────┘
//!      │  ▲   log full, no win     ┌──────┐
//!      │  │  ───────────────────▶  │ Lost │
//!      └──┘                        └──────┘
//!   add_letter / remove_letter /
//!   non-final submit
//! ```

use thiserror::Error;

use super::attempts::AttemptLog;
use super::events::ScoredLetter;
use super::keyboard::KeyboardState;
use super::scorer::{ScoringRule, WordVerdict};
use super::words::{is_latin_letter, WordList, WORD_LENGTH};

/// Game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Accepting input
    #[default]
    InProgress,
    /// Answer guessed
    Won,
    /// Ran out of attempts
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// Check if game is active (can receive input).
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Check if game is terminal (cannot change).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Letter(char),
    Backspace,
    Enter,
}

impl GameInput {
    /// Map a key name to an input.
    ///
    /// Single latin letters, `Backspace`/`<` and `Enter`/`enter` are
    /// recognised. Anything else is not game input.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Backspace" | "<" => Some(Self::Backspace),
            "Enter" | "enter" => Some(Self::Enter),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if is_latin_letter(ch) => Some(Self::Letter(ch)),
                    _ => None,
                }
            }
        }
    }
}

/// Rejected actions. None of these change any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("The game is already finished")]
    GameOver,

    #[error("Only latin letters are allowed, got '{0}'")]
    InvalidLetter(char),

    #[error("Words can only be five letters long")]
    InputFull,

    #[error("Words must have five letters")]
    IncompleteWord,

    #[error("Invalid word {0}")]
    UnknownWord(String),
}

/// A validated, scored attempt that has not been applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub attempt: String,
    pub verdicts: WordVerdict,
    /// Board row this attempt fills
    pub row: usize,
    /// Status once this attempt is applied
    pub status: GameStatus,
}

impl Submission {
    pub fn letters(&self) -> Vec<ScoredLetter> {
        self.attempt
            .chars()
            .zip(self.verdicts)
            .map(|(letter, verdict)| ScoredLetter { letter, verdict })
            .collect()
    }
}

/// Game state for one answer.
#[derive(Debug, Clone)]
pub struct Game {
    answer: String,
    status: GameStatus,
    attempts: AttemptLog,
    input: String,
    scoring: ScoringRule,
    keyboard: KeyboardState,
}

impl Game {
    /// Create a new game.
    pub fn new(answer: String, max_attempts: usize, scoring: ScoringRule) -> Self {
        Self::restore(answer, AttemptLog::new(max_attempts), scoring)
    }

    /// Rebuild a game from a stored attempt log.
    ///
    /// Status and keyboard state are replayed from the attempts.
    pub fn restore(answer: String, attempts: AttemptLog, scoring: ScoringRule) -> Self {
        let mut keyboard = KeyboardState::new();
        for attempt in attempts.iter() {
            keyboard.record_word(attempt.chars().zip(scoring.score(attempt, &answer)));
        }

        let status = if attempts.contains(&answer) {
            GameStatus::Won
        } else if attempts.is_full() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };

        Self {
            answer,
            status,
            attempts,
            input: String::with_capacity(WORD_LENGTH),
            scoring,
            keyboard,
        }
    }

    /// Append a letter to the current input.
    pub fn add_letter(&mut self, letter: char) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if !is_latin_letter(letter) {
            return Err(GameError::InvalidLetter(letter));
        }
        if self.input.len() >= WORD_LENGTH {
            return Err(GameError::InputFull);
        }

        self.input.push(letter.to_ascii_lowercase());
        Ok(())
    }

    /// Append a letter given as a string.
    ///
    /// # Panics
    ///
    /// Panics unless `letter` is exactly one character. That is a caller
    /// bug, not player input.
    pub fn add_letter_str(&mut self, letter: &str) -> Result<(), GameError> {
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.add_letter(ch),
            _ => panic!("add_letter_str accepts exactly one letter, '{}' was passed", letter),
        }
    }

    /// Drop the last letter of the current input, if any.
    pub fn remove_letter(&mut self) -> Option<char> {
        self.input.pop()
    }

    /// Validate and score the current input without applying it.
    pub fn plan_submit(&self, words: &WordList) -> Result<Submission, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.input.len() < WORD_LENGTH {
            return Err(GameError::IncompleteWord);
        }
        if !words.contains(&self.input) {
            return Err(GameError::UnknownWord(self.input.clone()));
        }

        let verdicts = self.scoring.score(&self.input, &self.answer);
        let status = if self.input == self.answer {
            GameStatus::Won
        } else if self.attempts.len() + 1 >= self.attempts.max_attempts() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };

        Ok(Submission {
            attempt: self.input.clone(),
            verdicts,
            row: self.attempts.len(),
            status,
        })
    }

    /// Apply a submission produced by [`Game::plan_submit`].
    pub fn commit(&mut self, submission: &Submission) {
        self.keyboard
            .record_word(submission.attempt.chars().zip(submission.verdicts));
        self.attempts.push(submission.attempt.clone());
        self.status = submission.status;
        self.input.clear();
    }

    /// Validate, score and apply the current input.
    pub fn submit(&mut self, words: &WordList) -> Result<Submission, GameError> {
        let submission = self.plan_submit(words)?;
        self.commit(&submission);
        Ok(submission)
    }

    /// Scored rows so far, oldest first.
    pub fn rows(&self) -> Vec<(String, WordVerdict)> {
        self.attempts
            .iter()
            .map(|a| (a.to_string(), self.scoring.score(a, &self.answer)))
            .collect()
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn attempts(&self) -> &AttemptLog {
        &self.attempts
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn scoring(&self) -> ScoringRule {
        self.scoring
    }

    /// Snapshot for presentation. The answer is only included once the game
    /// is over.
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows()
            .into_iter()
            .map(|(attempt, verdicts)| {
                let letters: Vec<serde_json::Value> = attempt
                    .chars()
                    .zip(verdicts)
                    .map(|(letter, verdict)| {
                        serde_json::json!({
                            "letter": letter.to_string(),
                            "verdict": verdict.as_str()
                        })
                    })
                    .collect();
                serde_json::Value::Array(letters)
            })
            .collect();

        let mut obj = serde_json::json!({
            "status": self.status.as_str(),
            "rows": rows,
            "input": self.input,
            "attempts_remaining": self.attempts.remaining(),
            "max_attempts": self.attempts.max_attempts(),
            "keyboard": self.keyboard.to_json()
        });
        if self.status.is_terminal() {
            obj["answer"] = serde_json::json!(self.answer);
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scorer::LetterVerdict::*;
    use pretty_assertions::assert_eq;

    fn make_game(answer: &str) -> Game {
        Game::new(answer.to_string(), 6, ScoringRule::Positional)
    }

    fn type_word(game: &mut Game, word: &str) {
        for ch in word.chars() {
            game.add_letter(ch).unwrap();
        }
    }

    #[test]
    fn test_game_new() {
        let game = make_game("house");
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.input(), "");
        assert!(game.attempts().is_empty());
    }

    #[test]
    fn test_add_letter_normalizes_case() {
        let mut game = make_game("house");
        game.add_letter('H').unwrap();
        game.add_letter('o').unwrap();
        assert_eq!(game.input(), "ho");
    }

    #[test]
    fn test_add_letter_limits() {
        let mut game = make_game("house");
        type_word(&mut game, "spice");

        assert_eq!(game.add_letter('x'), Err(GameError::InputFull));
        assert_eq!(game.input(), "spice");

        assert_eq!(game.add_letter('1'), Err(GameError::InvalidLetter('1')));
        assert_eq!(game.add_letter('é'), Err(GameError::InvalidLetter('é')));
        assert_eq!(game.input(), "spice");
    }

    #[test]
    #[should_panic(expected = "exactly one letter")]
    fn test_add_letter_str_rejects_words() {
        let mut game = make_game("house");
        let _ = game.add_letter_str("ab");
    }

    #[test]
    fn test_add_letter_str_single() {
        let mut game = make_game("house");
        game.add_letter_str("Q").unwrap();
        assert_eq!(game.input(), "q");
    }

    #[test]
    fn test_remove_letter() {
        let mut game = make_game("house");
        assert_eq!(game.remove_letter(), None);

        type_word(&mut game, "sp");
        assert_eq!(game.remove_letter(), Some('p'));
        assert_eq!(game.input(), "s");
    }

    #[test]
    fn test_submit_rejections() {
        let words = WordList::default();
        let mut game = make_game("house");

        type_word(&mut game, "spi");
        assert_eq!(game.submit(&words), Err(GameError::IncompleteWord));

        type_word(&mut game, "ke");
        assert_eq!(
            game.submit(&words),
            Err(GameError::UnknownWord("spike".to_string()))
        );
        assert_eq!(game.input(), "spike");
        assert!(game.attempts().is_empty());
    }

    #[test]
    fn test_submit_scores_and_clears() {
        let words = WordList::default();
        let mut game = make_game("house");
        type_word(&mut game, "spice");

        let submission = game.submit(&words).unwrap();

        assert_eq!(
            submission.verdicts,
            [Present, Absent, Absent, Absent, Correct]
        );
        assert_eq!(submission.row, 0);
        assert_eq!(submission.status, GameStatus::InProgress);
        assert_eq!(game.input(), "");
        assert_eq!(game.attempts().as_slice(), &["spice".to_string()]);
        assert_eq!(game.keyboard().get('e'), Some(Correct));
    }

    #[test]
    fn test_win() {
        let words = WordList::default();
        let mut game = make_game("house");
        type_word(&mut game, "house");

        let submission = game.submit(&words).unwrap();

        assert_eq!(submission.verdicts, [Correct; WORD_LENGTH]);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.add_letter('a'), Err(GameError::GameOver));
        assert_eq!(game.submit(&words), Err(GameError::GameOver));
    }

    #[test]
    fn test_lose_after_max_attempts() {
        let words = WordList::default();
        let mut game = make_game("house");

        for i in 0..6 {
            type_word(&mut game, "grass");
            let submission = game.submit(&words).unwrap();
            assert_eq!(submission.row, i);
        }

        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.attempts().len(), 6);
        assert_eq!(game.add_letter('g'), Err(GameError::GameOver));
        assert_eq!(game.submit(&words), Err(GameError::GameOver));
        assert_eq!(game.attempts().len(), 6);
    }

    #[test]
    fn test_win_on_last_attempt() {
        let words = WordList::default();
        let mut game = make_game("house");
        for _ in 0..5 {
            type_word(&mut game, "grass");
            game.submit(&words).unwrap();
        }
        type_word(&mut game, "house");
        assert_eq!(game.submit(&words).unwrap().status, GameStatus::Won);
    }

    #[test]
    fn test_plan_does_not_apply() {
        let words = WordList::default();
        let mut game = make_game("house");
        type_word(&mut game, "water");

        let plan = game.plan_submit(&words).unwrap();
        assert_eq!(plan.attempt, "water");
        assert_eq!(game.input(), "water");
        assert!(game.attempts().is_empty());
    }

    #[test]
    fn test_restore() {
        let log = AttemptLog::from_words(vec!["grass".to_string(), "house".to_string()], 6);
        let game = Game::restore("house".to_string(), log, ScoringRule::Positional);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.keyboard().get('h'), Some(Correct));

        let log = AttemptLog::from_words(vec!["grass".to_string(); 6], 6);
        let game = Game::restore("house".to_string(), log, ScoringRule::Positional);
        assert_eq!(game.status(), GameStatus::Lost);

        let log = AttemptLog::from_words(vec!["grass".to_string()], 6);
        let game = Game::restore("house".to_string(), log, ScoringRule::Positional);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_input_from_key() {
        assert_eq!(GameInput::from_key("a"), Some(GameInput::Letter('a')));
        assert_eq!(GameInput::from_key("Z"), Some(GameInput::Letter('Z')));
        assert_eq!(GameInput::from_key("Backspace"), Some(GameInput::Backspace));
        assert_eq!(GameInput::from_key("<"), Some(GameInput::Backspace));
        assert_eq!(GameInput::from_key("Enter"), Some(GameInput::Enter));
        assert_eq!(GameInput::from_key("enter"), Some(GameInput::Enter));
        assert_eq!(GameInput::from_key("Shift"), None);
        assert_eq!(GameInput::from_key("1"), None);
        assert_eq!(GameInput::from_key(""), None);
    }

    #[test]
    fn test_snapshot_hides_answer_until_over() {
        let words = WordList::default();
        let mut game = make_game("house");
        type_word(&mut game, "spice");
        game.submit(&words).unwrap();
        type_word(&mut game, "ho");

        let json = game.to_json();
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["input"], "ho");
        assert_eq!(json["attempts_remaining"], 5);
        assert_eq!(json["rows"][0][4]["verdict"], "correct");
        assert!(json.get("answer").is_none());

        type_word(&mut game, "use");
        game.submit(&words).unwrap();
        assert_eq!(game.to_json()["answer"], "house");
    }

    #[test]
    fn test_status_helpers() {
        assert!(GameStatus::InProgress.is_active());
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
        assert_eq!(GameStatus::Lost.as_str(), "lost");
    }
}
