//! Events emitted to presentation listeners.
//!
//! Listeners subscribe to an [`EventBus`] and receive [`GameEvent`]s over
//! unbounded channels. Sending never waits on a listener, so a slow grid or
//! keyboard renderer cannot hold up input handling. Listeners whose receiver
//! has been dropped are pruned on the next emit.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use serde::Serialize;

use super::game::{GameError, GameStatus};
use super::scorer::LetterVerdict;

/// One letter of a scored attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredLetter {
    pub letter: char,
    pub verdict: LetterVerdict,
}

/// Instruction to reveal one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevealStep {
    /// Tile position within the row
    pub index: usize,
    pub letter: char,
    pub verdict: LetterVerdict,
    /// Offset from the start of the reveal
    #[serde(serialize_with = "serialize_millis")]
    pub delay: Duration,
}

/// Timed tile reveals for one attempt, issued after the state change is
/// already committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealPlan {
    /// Board row the attempt occupies
    pub row: usize,
    pub steps: Vec<RevealStep>,
}

impl RevealPlan {
    /// Reveal letters left to right, `step` apart.
    pub fn sequential(row: usize, letters: &[ScoredLetter], step: Duration) -> Self {
        let steps = letters
            .iter()
            .enumerate()
            .map(|(index, scored)| RevealStep {
                index,
                letter: scored.letter,
                verdict: scored.verdict,
                delay: step * index as u32,
            })
            .collect();
        Self { row, steps }
    }

    /// Time until the last tile is revealed.
    pub fn total_duration(&self) -> Duration {
        self.steps.last().map(|s| s.delay).unwrap_or_default()
    }
}

/// Game events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A letter was appended to the current input
    LetterAdded { letter: char, input: String },

    /// The last letter was removed from the current input
    LetterRemoved { input: String },

    /// An attempt was accepted and scored
    AttemptScored {
        attempt: String,
        letters: Vec<ScoredLetter>,
        reveal: RevealPlan,
    },

    /// The game reached a terminal status
    StatusChanged(GameStatus),

    /// A new answer period began
    Rotated,

    /// An action was rejected and not applied
    Rejected(GameError),
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LetterAdded { .. } => "letter_added",
            Self::LetterRemoved { .. } => "letter_removed",
            Self::AttemptScored { .. } => "attempt_scored",
            Self::StatusChanged(_) => "status_changed",
            Self::Rotated => "rotated",
            Self::Rejected(_) => "rejected",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({ "type": self.as_str() });
        match self {
            Self::LetterAdded { letter, input } => {
                obj["letter"] = serde_json::json!(letter.to_string());
                obj["input"] = serde_json::json!(input);
            }
            Self::LetterRemoved { input } => {
                obj["input"] = serde_json::json!(input);
            }
            Self::AttemptScored {
                attempt,
                letters,
                reveal,
            } => {
                obj["attempt"] = serde_json::json!(attempt);
                obj["letters"] = serde_json::json!(letters);
                obj["reveal"] = serde_json::json!(reveal);
            }
            Self::StatusChanged(status) => {
                obj["status"] = serde_json::json!(status.as_str());
            }
            Self::Rotated => {}
            Self::Rejected(reason) => {
                obj["reason"] = serde_json::json!(reason.to_string());
            }
        }
        obj
    }
}

/// Fan-out of game events to any number of listeners.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send an event to every live listener.
    pub fn emit(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

fn serialize_millis<S: serde::Serializer>(delay: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(delay.as_millis() as u64)
}
