//! Wordle State Library
//!
//! This crate provides state management for a daily five-letter word
//! guessing game.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Scoring** - Each attempt is scored letter by letter as correct,
//!   present or absent.
//!
//! - **Game State Machine** - Tracks the current input and the day's attempts,
//!   and moves from in progress to won or lost with validated actions.
//!
//! - **Daily Rotation** - Picks a new answer once per day and clears the
//!   attempt log.
//!
//! - **Persistence** - Attempts and the day's answer survive restarts through
//!   a pluggable key-value store.
//!
//! - **Events** - Presentation layers subscribe to scored attempts, status
//!   changes and timed reveal instructions.
//!
//! # Design Principles
//!
//! 1. **State machines validate transitions** - Rejected actions change nothing
//!    and report why.
//!
//! 2. **Persist, then notify** - Stored state is updated before any listener
//!    hears about it.
//!
//! 3. **No rendering** - This crate is pure state, no DOM or terminal output.
//!
//! 4. **Serialization-ready** - Snapshots and events convert to JSON for
//!    clients.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rand::SeedableRng;
//! use wordle_state::state::{
//!     GameConfig, GameEvent, GameSession, GameStatus, MemoryStorage, WordList,
//! };
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
//!
//! let mut session = GameSession::open_at(
//!     WordList::default(),
//!     MemoryStorage::new(),
//!     GameConfig::default(),
//!     now,
//!     &mut rng,
//! )
//! .unwrap();
//! let events = session.subscribe();
//!
//! let answer = session.answer().to_string();
//! for letter in answer.chars() {
//!     session.add_letter(letter).unwrap();
//! }
//! session.submit().unwrap();
//!
//! assert_eq!(session.status(), GameStatus::Won);
//! assert!(events
//!     .try_iter()
//!     .any(|e| e == GameEvent::StatusChanged(GameStatus::Won)));
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
