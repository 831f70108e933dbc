// SPDX-License-Identifier: MIT OR Apache-2.0

//! The turn engine: a state machine reconciling Othello legality, the
//! remote answer that decides each turn's stone, and the prefetch cache.
//!
//! All mutation happens on the caller's thread (the UI frame loop).
//! Background fetches only ever produce [`FetchResult`] values that funnel
//! through the delivery channel into [`Game::poll`].

use crate::board::Board;
use crate::policy;
use crate::prefetch::{DeliverySource, PrefetchCache};
use crate::{AnimationHandle, AnswerOutcome, FetchResult, OpponentMode, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long the turn banner stays up
const TURN_BANNER: Duration = Duration::from_millis(1500);

/// Bounds of the opponent's simulated thinking delay, in seconds
const AI_DELAY_SECS: (f32, f32) = (0.5, 3.0);

/// Ticks the MAYBE flash overlay stays visible (one tick per poll)
const MAYBE_FLASH_TICKS: u8 = 30;

/// Seam between the engine and whatever launches background fetches.
///
/// Implementations must return immediately; the result arrives later through
/// the delivery channel. The engine's cache guarantees it never asks for a
/// second fetch while one is in flight for the same side.
pub trait FetchBackend: Send {
    /// Launch a background fetch for `side`'s next answer
    fn start_fetch(&mut self, side: Side);
}

/// Startup configuration, fixed for the lifetime of a match.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Who plays the NO side
    pub opponent: OpponentMode,
    /// Show the answer animation overlay after each fetch
    pub overlays: bool,
    /// Show the 1.5 s turn banner between turns
    pub banners: bool,
    /// Seed for the engine RNG; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opponent: OpponentMode::Human,
            overlays: false,
            banners: false,
            seed: None,
        }
    }
}

/// Coarse engine state exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Blocked on the current side's turn-determining fetch
    AwaitingAnswer,
    /// A banner or answer overlay is showing; input is deferred
    Paused,
    /// The active stone is known and a placement is accepted
    ReadyToPlace,
    /// The match is over
    Terminal,
}

/// Why a placement attempt was rejected. Expected steady-state traffic from
/// a human probing the board, not an exceptional condition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// The match is already over
    #[error("the game is over")]
    GameOver,
    /// The current side's answer has not arrived yet
    #[error("still waiting for the answer service")]
    AwaitingAnswer,
    /// A banner or overlay is showing
    #[error("paused for a banner or overlay")]
    Paused,
    /// Not a capturing move for the side whose turn it is
    #[error("not a legal move")]
    IllegalMove,
}

/// Content of the answer overlay while the engine is paused on it.
#[derive(Debug, Clone)]
pub struct AnswerOverlay {
    /// The answer being presented
    pub answer: AnswerOutcome,
    /// Whose turn the answer applies to
    pub turn: Side,
    /// The downloaded animation payload
    pub image: AnimationHandle,
}

/// The game: board, turn state, prefetch cache, and the opponent clock.
pub struct Game {
    board: Board,
    current_side: Side,
    active_stone: Option<Side>,
    last_answer: Option<AnswerOutcome>,
    awaiting_answer: bool,
    pass_count: u8,
    running: bool,
    status: String,
    maybe_flash_ticks: u8,
    opponent: OpponentMode,
    ai_side: Option<Side>,
    ai_ready_at: Option<Instant>,
    overlays: bool,
    banners: bool,
    banner_until: Option<Instant>,
    overlay: Option<AnswerOverlay>,
    cache: PrefetchCache,
    backend: Box<dyn FetchBackend>,
    deliveries: DeliverySource,
    rng: StdRng,
    clock: Instant,
}

impl Game {
    /// Start a match from the standard opening position and immediately
    /// request the first answer for the YES side.
    pub fn new(
        config: GameConfig,
        backend: Box<dyn FetchBackend>,
        deliveries: DeliverySource,
    ) -> Self {
        Self::from_position(Board::standard_start(), Side::Yes, config, backend, deliveries)
    }

    /// Start from an arbitrary position. The first answer fetch for
    /// `current_side` is requested immediately, exactly as in [`Game::new`].
    pub fn from_position(
        board: Board,
        current_side: Side,
        config: GameConfig,
        backend: Box<dyn FetchBackend>,
        deliveries: DeliverySource,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ai_side = match config.opponent {
            OpponentMode::Human => None,
            _ => Some(Side::No),
        };
        let mut game = Self {
            board,
            current_side,
            active_stone: None,
            last_answer: None,
            awaiting_answer: false,
            pass_count: 0,
            running: true,
            status: "Game start".to_string(),
            maybe_flash_ticks: 0,
            opponent: config.opponent,
            ai_side,
            ai_ready_at: None,
            overlays: config.overlays,
            banners: config.banners,
            banner_until: None,
            overlay: None,
            cache: PrefetchCache::new(),
            backend,
            deliveries,
            rng,
            clock: Instant::now(),
        };
        game.prepare_active_stone();
        game.schedule_ai_delay();
        game
    }

    /// Per-tick housekeeping: drain delivered fetch results (routing each
    /// against the state at delivery time), expire the banner, and count the
    /// MAYBE flash down. Call once per frame before anything else.
    pub fn poll(&mut self, now: Instant) {
        self.clock = now;
        for result in self.deliveries.drain() {
            self.handle_delivery(result);
        }
        if let Some(until) = self.banner_until {
            if now >= until {
                self.banner_until = None;
            }
        }
        if self.maybe_flash_ticks > 0 {
            self.maybe_flash_ticks -= 1;
        }
    }

    /// Route one delivered result: satisfy the current wait if it matches,
    /// otherwise stash it for that side's next turn. Late results after the
    /// match ended are discarded.
    fn handle_delivery(&mut self, result: FetchResult) {
        if !self.running {
            return;
        }
        self.cache.finish_fetch(result.side);
        if self.awaiting_answer && result.side == self.current_side {
            self.awaiting_answer = false;
            self.finalize_answer(result.outcome, result.image);
        } else {
            self.cache.store(result.side, result.outcome, result.image);
        }
    }

    /// Attempt to place this turn's active stone at (row, col).
    ///
    /// Legality is always judged for `current_side`, independent of which
    /// stone will actually land on the board.
    pub fn attempt_placement(&mut self, row: usize, col: usize) -> Result<(), PlaceError> {
        if !self.running {
            return Err(PlaceError::GameOver);
        }
        if self.awaiting_answer {
            return Err(PlaceError::AwaitingAnswer);
        }
        if self.is_paused() {
            return Err(PlaceError::Paused);
        }
        let Some(stone) = self.active_stone else {
            return Err(PlaceError::AwaitingAnswer);
        };
        if !self.board.is_valid_move(row, col, self.current_side) {
            return Err(PlaceError::IllegalMove);
        }

        let owner = self.current_side;
        let flipped = self.board.place(row, col, stone);
        self.status = if stone != owner && flipped == 0 {
            format!("{} placed {}, but nothing flipped", owner.label(), stone.label())
        } else {
            format!("{} placed {}", owner.label(), stone.label())
        };
        if self.last_answer == Some(AnswerOutcome::Maybe) {
            let radius = self.board.flip_adjacent(row, col, stone);
            tracing::debug!(row, col, radius, "maybe event flipped neighbors");
        }
        self.pass_count = 0;
        tracing::info!(row, col, side = ?owner, ?stone, flipped, "stone placed");
        self.advance_turn();
        Ok(())
    }

    /// Switch to the next player, or finish the game if the board is full.
    fn advance_turn(&mut self) {
        if self.board.is_full() {
            self.finish("Board is full");
            return;
        }
        self.current_side = self.current_side.opponent();
        self.prepare_active_stone();
        self.schedule_ai_delay();
        if !self.board.has_legal_move(self.current_side) {
            self.handle_pass();
        }
    }

    /// The current side has no legal move. Two consecutive passes end the
    /// match; chained passes recurse and terminate through that guard.
    fn handle_pass(&mut self) {
        self.pass_count += 1;
        self.status = format!("{} must pass", self.current_side.label());
        tracing::info!(side = ?self.current_side, passes = self.pass_count, "forced pass");
        if self.pass_count >= 2 || self.board.is_full() {
            self.running = false;
            return;
        }
        self.current_side = self.current_side.opponent();
        self.prepare_active_stone();
        self.schedule_ai_delay();
        if !self.board.has_legal_move(self.current_side) {
            self.handle_pass();
        }
    }

    fn finish(&mut self, status: &str) {
        self.status = status.to_string();
        self.running = false;
        tracing::info!(scores = ?self.board.scores(), "game over");
    }

    /// Resolve the current side's answer: consume the cache if a result is
    /// already waiting, otherwise request a fetch and block on the answer.
    fn prepare_active_stone(&mut self) {
        if !self.running {
            self.active_stone = None;
            return;
        }
        let side = self.current_side;
        if let Some((outcome, image)) = self.cache.take(side) {
            // Prefetched result exists, consume immediately without waiting.
            self.awaiting_answer = false;
            self.finalize_answer(outcome, image);
            return;
        }
        self.awaiting_answer = true;
        self.request_fetch(side);
    }

    /// Ask the backend for an answer unless the cache says one is already in
    /// flight or waiting.
    fn request_fetch(&mut self, side: Side) {
        if self.cache.begin_fetch(side) {
            tracing::debug!(?side, "starting answer fetch");
            self.backend.start_fetch(side);
        }
    }

    /// Turn an answer into this turn's active stone and kick off the
    /// prefetch for the opponent so the next turn's latency overlaps with
    /// this turn's play.
    fn finalize_answer(&mut self, outcome: AnswerOutcome, image: Option<AnimationHandle>) {
        self.last_answer = Some(outcome);
        let (stone, message) = match outcome {
            AnswerOutcome::Yes => (Side::Yes, "YES stone ready"),
            AnswerOutcome::No => (Side::No, "NO stone ready"),
            AnswerOutcome::Maybe => (self.current_side, "MAYBE! Flipping surrounding stones"),
            AnswerOutcome::Unknown => {
                let stone = if self.rng.gen_bool(0.5) {
                    Side::Yes
                } else {
                    Side::No
                };
                (stone, "Random stone ready")
            }
        };
        self.maybe_flash_ticks = if outcome == AnswerOutcome::Maybe {
            MAYBE_FLASH_TICKS
        } else {
            0
        };
        self.active_stone = Some(stone);
        if self.ai_side != Some(self.current_side) {
            self.status = message.to_string();
        }
        tracing::debug!(?outcome, ?stone, side = ?self.current_side, "answer resolved");

        match image {
            Some(image) if self.overlays => {
                // Banner follows once the overlay is dismissed.
                self.overlay = Some(AnswerOverlay {
                    answer: outcome,
                    turn: self.current_side,
                    image,
                });
            }
            _ => {
                if self.banners {
                    self.banner_until = Some(self.clock + TURN_BANNER);
                }
            }
        }

        self.request_fetch(self.current_side.opponent());
    }

    /// Randomize the "thinking" delay before the automated side may act
    fn schedule_ai_delay(&mut self) {
        if self.ai_side == Some(self.current_side) && self.running {
            let secs = self.rng.gen_range(AI_DELAY_SECS.0..AI_DELAY_SECS.1);
            self.ai_ready_at = Some(self.clock + Duration::from_secs_f32(secs));
            self.status = "AI is thinking...".to_string();
        } else {
            self.ai_ready_at = None;
        }
    }

    /// Let the automated opponent move if it is its turn, its answer has
    /// arrived, no pause is showing, and its thinking delay has elapsed.
    /// Returns true if a move or pass happened.
    pub fn ai_act(&mut self, now: Instant) -> bool {
        self.clock = now;
        if self.ai_side != Some(self.current_side)
            || self.awaiting_answer
            || !self.running
            || self.is_paused()
        {
            return false;
        }
        match self.ai_ready_at {
            None => {
                self.schedule_ai_delay();
                return false;
            }
            Some(ready) if now < ready => return false,
            Some(_) => {}
        }
        self.ai_ready_at = None;

        let moves = self.board.legal_moves(self.current_side);
        if moves.is_empty() {
            self.handle_pass();
            return true;
        }
        let maybe_armed = self.last_answer == Some(AnswerOutcome::Maybe);
        let Some(stone) = self.active_stone else {
            return false;
        };
        let chosen = policy::choose_move(
            self.opponent,
            &self.board,
            &moves,
            self.current_side,
            stone,
            maybe_armed,
            &mut self.rng,
        );
        match chosen {
            Some((row, col)) => self.attempt_placement(row, col).is_ok(),
            None => false,
        }
    }

    /// Dismiss the answer overlay after a click; starts the turn banner.
    pub fn dismiss_overlay(&mut self) {
        if self.overlay.take().is_some() && self.banners && self.running {
            self.banner_until = Some(self.clock + TURN_BANNER);
        }
    }

    // --- read-only queries for the presentation layer ---

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn scores(&self) -> (usize, usize) {
        self.board.scores()
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn active_stone(&self) -> Option<Side> {
        self.active_stone
    }

    pub fn last_answer(&self) -> Option<AnswerOutcome> {
        self.last_answer
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn awaiting_answer(&self) -> bool {
        self.awaiting_answer
    }

    pub fn maybe_flash_ticks(&self) -> u8 {
        self.maybe_flash_ticks
    }

    pub fn pass_count(&self) -> u8 {
        self.pass_count
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ai_side(&self) -> Option<Side> {
        self.ai_side
    }

    pub fn overlay(&self) -> Option<&AnswerOverlay> {
        self.overlay.as_ref()
    }

    pub fn banner_active(&self) -> bool {
        self.banner_until.is_some_and(|until| self.clock < until)
    }

    pub fn is_paused(&self) -> bool {
        self.overlay.is_some() || self.banner_active()
    }

    pub fn phase(&self) -> Phase {
        if !self.running {
            Phase::Terminal
        } else if self.awaiting_answer {
            Phase::AwaitingAnswer
        } else if self.is_paused() {
            Phase::Paused
        } else {
            Phase::ReadyToPlace
        }
    }

    /// The side with strictly more stones, or `None` for a draw. Meaningful
    /// once the game has stopped running.
    pub fn winner(&self) -> Option<Side> {
        let (yes, no) = self.board.scores();
        match yes.cmp(&no) {
            std::cmp::Ordering::Greater => Some(Side::Yes),
            std::cmp::Ordering::Less => Some(Side::No),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Outcome string for the final screen
    pub fn winner_text(&self) -> &'static str {
        match self.winner() {
            Some(Side::Yes) => "Yes player wins!",
            Some(Side::No) => "No player wins!",
            None => "Draw!",
        }
    }
}
