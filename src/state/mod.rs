//! State management module for the daily word game.
//!
//! This module provides the core state types:
//!
//! - `words` - The word list (valid guesses and answer pool)
//! - `scorer` - Per-letter feedback for an attempt
//! - `attempts` - The day's attempt log
//! - `rotation` - Daily answer rotation
//! - `storage` - Key-value persistence providers
//! - `game` - Input rules and the win/lose state machine
//! - `keyboard` - Best-known verdict per letter
//! - `events` - Event fan-out and reveal instructions
//! - `session` - Ties the above together for one device
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                           GameSession                              │
//! │                                                                    │
//! │  ┌────────────┐   ┌───────────────┐   ┌─────────────────────────┐  │
//! │  │  WordList  │   │ DailyRotation │   │     Storage (trait)     │  │
//! │  │            │──▶│               │──▶│ answerIndex             │  │
//! │  │ index →    │   │ index + time  │   │ lastRotationEpochSeconds│  │
//! │  │   word     │   │ → DailyAnswer │   │ attempts                │  │
//! │  └────────────┘   └───────┬───────┘   └────────────▲────────────┘  │
//! │                           │                        │ persist first │
//! │                           ▼                        │               │
//! │  ┌─────────────────────────────────────────────────┴────────────┐  │
//! │  │ Game: input ─▶ Scorer ─▶ AttemptLog ─▶ InProgress/Won/Lost   │  │
//! │  └──────────────────────────────┬───────────────────────────────┘  │
//! │                                 │ then emit                        │
//! │                                 ▼                                  │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │ EventBus ─▶ grid listener, keyboard listener, ...            │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use wordle_state::state::{GameConfig, GameSession, MemoryStorage, WordList};
//!
//! let mut session = GameSession::open(WordList::default(), MemoryStorage::new(), GameConfig::default())?;
//! let events = session.subscribe();
//!
//! for key in ["s", "p", "i", "c", "e", "Enter"] {
//!     let _ = session.handle_key(key);
//! }
//! ```

pub mod attempts;
pub mod config;
pub mod events;
pub mod game;
pub mod keyboard;
pub mod rotation;
pub mod scorer;
pub mod session;
pub mod storage;
pub mod words;

// Re-export commonly used types
pub use attempts::{AttemptLog, DEFAULT_MAX_ATTEMPTS};
pub use config::{ConfigError, GameConfig};
pub use events::{EventBus, GameEvent, RevealPlan, RevealStep, ScoredLetter};
pub use game::{Game, GameError, GameInput, GameStatus, Submission};
pub use keyboard::{KeyboardState, KEYBOARD_ROWS};
pub use rotation::{DailyAnswer, DailyRotation};
pub use scorer::{score, score_count_limited, LetterVerdict, ScoringRule, WordVerdict};
pub use session::{GameSession, SessionError};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use words::{WordList, WordListError, WORD_LENGTH};
