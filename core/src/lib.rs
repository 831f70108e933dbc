// SPDX-License-Identifier: MIT OR Apache-2.0

//! Yes/No Othello Core - Game Rules and Turn Logic
//!
//! This crate provides the core game functionality including:
//! - Othello board representation with capture/flip legality
//! - The turn engine that reconciles board state with remote answers
//! - Per-side prefetch cache and thread-safe result delivery
//! - The computer opponent policy

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod engine;
pub mod policy;
pub mod prefetch;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two competing players.
///
/// The YES player always moves first. A side and the stone that side gets to
/// place on a given turn are distinct concepts: the remote answer can hand a
/// player the opponent's stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The YES player (moves first)
    Yes,
    /// The NO player
    No,
}

impl Side {
    /// Returns the opposing side
    pub fn opponent(&self) -> Self {
        match self {
            Side::Yes => Side::No,
            Side::No => Side::Yes,
        }
    }

    /// User-facing label for this side's stones
    pub fn label(&self) -> &'static str {
        match self {
            Side::Yes => "YES",
            Side::No => "NO",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized reply from the remote answer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    /// The service said "yes"
    Yes,
    /// The service said "no"
    No,
    /// The service said "maybe"
    Maybe,
    /// Network failure, non-success status, or an unclassifiable reply.
    /// Resolved by coin flip in the engine; never reaches the board logic.
    Unknown,
}

impl AnswerOutcome {
    /// Classify the wire-level answer string, case-insensitively.
    pub fn parse(answer: &str) -> Self {
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("yes") {
            AnswerOutcome::Yes
        } else if answer.eq_ignore_ascii_case("no") {
            AnswerOutcome::No
        } else if answer.eq_ignore_ascii_case("maybe") {
            AnswerOutcome::Maybe
        } else {
            AnswerOutcome::Unknown
        }
    }

    /// Label shown in the status panel's API row
    pub fn label(&self) -> &'static str {
        match self {
            AnswerOutcome::Yes => "YES",
            AnswerOutcome::No => "NO",
            AnswerOutcome::Maybe => "MAYBE",
            AnswerOutcome::Unknown => "RANDOM",
        }
    }
}

/// Opaque handle to a downloaded answer animation.
///
/// The core never decodes the payload; it only tracks presence and hands the
/// bytes to the presentation layer.
#[derive(Clone, PartialEq, Eq)]
pub struct AnimationHandle {
    bytes: Bytes,
}

impl AnimationHandle {
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimationHandle({} bytes)", self.bytes.len())
    }
}

/// Completed background fetch, routed by the engine at delivery time.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The side this fetch was started for
    pub side: Side,
    /// Normalized service reply
    pub outcome: AnswerOutcome,
    /// Downloaded animation, if overlays are enabled and the download worked
    pub image: Option<AnimationHandle>,
}

/// Kind of opponent driving the NO side, selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentMode {
    /// Two humans share the mouse
    Human,
    /// Uniform random choice among legal moves
    Random,
    /// One-ply greedy stone-count maximizer
    Greedy,
}

pub use board::{Board, BOARD_SIZE};
pub use engine::{AnswerOverlay, FetchBackend, Game, GameConfig, Phase, PlaceError};
pub use prefetch::{delivery_channel, DeliverySink, DeliverySource, PrefetchCache};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_symmetric() {
        assert_eq!(Side::Yes.opponent(), Side::No);
        assert_eq!(Side::No.opponent(), Side::Yes);
        assert_eq!(Side::Yes.opponent().opponent(), Side::Yes);
    }

    #[test]
    fn answer_parsing_is_case_insensitive() {
        assert_eq!(AnswerOutcome::parse("yes"), AnswerOutcome::Yes);
        assert_eq!(AnswerOutcome::parse("YES"), AnswerOutcome::Yes);
        assert_eq!(AnswerOutcome::parse("No"), AnswerOutcome::No);
        assert_eq!(AnswerOutcome::parse(" maybe "), AnswerOutcome::Maybe);
        assert_eq!(AnswerOutcome::parse("perhaps"), AnswerOutcome::Unknown);
        assert_eq!(AnswerOutcome::parse(""), AnswerOutcome::Unknown);
    }
}
