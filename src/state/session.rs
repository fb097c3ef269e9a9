//! Game session.
//!
//! Owns everything one player's device needs: the word list, the storage
//! provider, the day's answer, the game state machine and the event
//! listeners. There is exactly one writer, the caller holding `&mut`.
//!
//! Every accepted action mutates and persists state first, then emits
//! events. Emission never blocks, so presentation timing cannot drift from
//! what is stored.

use std::sync::mpsc::Receiver;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

use super::attempts::AttemptLog;
use super::config::GameConfig;
use super::events::{EventBus, GameEvent, RevealPlan};
use super::game::{Game, GameError, GameInput, GameStatus, Submission};
use super::keyboard::KeyboardState;
use super::rotation::{DailyAnswer, DailyRotation};
use super::storage::{Storage, StorageError};
use super::words::WordList;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Player action rejected, nothing applied
    #[error(transparent)]
    Rejected(#[from] GameError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// The rejection reason, if this was a player-facing rejection.
    pub fn rejection(&self) -> Option<&GameError> {
        match self {
            Self::Rejected(e) => Some(e),
            Self::Storage(_) => None,
        }
    }
}

/// A player's game on one device.
#[derive(Debug)]
pub struct GameSession<S: Storage> {
    words: WordList,
    storage: S,
    config: GameConfig,
    rotation: DailyRotation,
    daily: DailyAnswer,
    game: Game,
    events: EventBus,
}

impl<S: Storage> GameSession<S> {
    /// Open a session for the current time.
    pub fn open(words: WordList, storage: S, config: GameConfig) -> Result<Self, SessionError> {
        Self::open_at(words, storage, config, Utc::now(), &mut rand::rng())
    }

    /// Open a session, rotating the answer if the stored one has expired
    /// and restoring any attempts already made today.
    pub fn open_at<R: Rng + ?Sized>(
        words: WordList,
        mut storage: S,
        config: GameConfig,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let rotation = config.rotation();
        let daily = rotation.current(&mut storage, &words, now, rng)?;
        let log = AttemptLog::load(&storage, config.max_attempts)?;
        let game = Game::restore(daily.word.clone(), log, config.scoring);

        tracing::debug!(
            rotated = daily.rotated,
            attempts = game.attempts().len(),
            status = game.status().as_str(),
            "Opened game session"
        );

        Ok(Self {
            words,
            storage,
            config,
            rotation,
            daily,
            game,
            events: EventBus::new(),
        })
    }

    /// Register a listener for game events.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Start a new day if the current one has expired.
    pub fn rotate_if_due(&mut self) -> Result<bool, SessionError> {
        self.rotate_if_due_at(Utc::now(), &mut rand::rng())
    }

    /// Start a new day if the current one has expired at `now`.
    ///
    /// Returns true if a rotation happened.
    pub fn rotate_if_due_at<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<bool, SessionError> {
        if !self.rotation.is_due(self.daily.rotated_at, now) {
            return Ok(false);
        }

        self.daily = self.rotation.rotate(&mut self.storage, &self.words, now, rng)?;
        self.game = Game::new(
            self.daily.word.clone(),
            self.config.max_attempts,
            self.config.scoring,
        );
        self.events.emit(GameEvent::Rotated);
        Ok(true)
    }

    /// Append a letter to the current input.
    pub fn add_letter(&mut self, letter: char) -> Result<(), SessionError> {
        match self.game.add_letter(letter) {
            Ok(()) => {
                let letter = letter.to_ascii_lowercase();
                tracing::debug!(%letter, input = self.game.input(), "Letter added");
                self.events.emit(GameEvent::LetterAdded {
                    letter,
                    input: self.game.input().to_string(),
                });
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Drop the last letter of the current input. Always allowed.
    pub fn remove_letter(&mut self) -> Option<char> {
        let removed = self.game.remove_letter();
        if removed.is_some() {
            self.events.emit(GameEvent::LetterRemoved {
                input: self.game.input().to_string(),
            });
        }
        removed
    }

    /// Submit the current input.
    ///
    /// The extended attempt log is written before anything changes in
    /// memory. If the write fails the submission is dropped and the input
    /// is kept.
    pub fn submit(&mut self) -> Result<Submission, SessionError> {
        let submission = match self.game.plan_submit(&self.words) {
            Ok(submission) => submission,
            Err(e) => return Err(self.reject(e)),
        };

        if let Err(e) = self
            .game
            .attempts()
            .save_with(&mut self.storage, &submission.attempt)
        {
            tracing::error!(error = %e, "Failed to persist attempt");
            return Err(e.into());
        }

        self.game.commit(&submission);
        tracing::debug!(
            attempt = %submission.attempt,
            row = submission.row,
            "Attempt accepted"
        );

        let letters = submission.letters();
        let reveal = RevealPlan::sequential(submission.row, &letters, self.config.reveal_step());
        self.events.emit(GameEvent::AttemptScored {
            attempt: submission.attempt.clone(),
            letters,
            reveal,
        });

        if submission.status.is_terminal() {
            tracing::info!(
                status = submission.status.as_str(),
                attempts = self.game.attempts().len(),
                "Game finished"
            );
            self.events.emit(GameEvent::StatusChanged(submission.status));
        }

        Ok(submission)
    }

    /// Apply one input.
    pub fn handle_input(&mut self, input: GameInput) -> Result<(), SessionError> {
        match input {
            GameInput::Letter(letter) => self.add_letter(letter),
            GameInput::Backspace => {
                self.remove_letter();
                Ok(())
            }
            GameInput::Enter => self.submit().map(|_| ()),
        }
    }

    /// Apply a raw key name. Keys that are not game input are ignored.
    pub fn handle_key(&mut self, key: &str) -> Result<(), SessionError> {
        match GameInput::from_key(key) {
            Some(input) => self.handle_input(input),
            None => Ok(()),
        }
    }

    fn reject(&mut self, error: GameError) -> SessionError {
        tracing::warn!(error = %error, "Action rejected");
        self.events.emit(GameEvent::Rejected(error.clone()));
        SessionError::Rejected(error)
    }

    /// Today's answer.
    pub fn answer(&self) -> &str {
        &self.daily.word
    }

    /// The day's answer with its index and rotation time.
    pub fn daily(&self) -> &DailyAnswer {
        &self.daily
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    /// Letters typed but not yet submitted.
    pub fn input(&self) -> &str {
        self.game.input()
    }

    /// Attempts accepted today.
    pub fn attempts(&self) -> &AttemptLog {
        self.game.attempts()
    }

    /// Best verdict seen so far for each letter.
    pub fn keyboard(&self) -> &KeyboardState {
        self.game.keyboard()
    }

    /// The underlying state machine.
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Close the session, handing back the storage provider.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Snapshot for presentation.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = self.game.to_json();
        obj["day_started_at"] = serde_json::json!(self.daily.rotated_at.to_rfc3339());
        obj["next_rotation_at"] = serde_json::json!(self
            .daily
            .expires_at(self.rotation.period())
            .to_rfc3339());
        obj
    }
}
