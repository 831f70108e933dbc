// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-side answer prefetching and the cross-thread delivery channel.
//!
//! The cache hides fetch latency by letting the next player's request run
//! while the current player is still thinking. It holds at most one pending
//! fetch and at most one ready result per side; everything else is the turn
//! engine's routing decision at delivery time.

use crate::{AnimationHandle, AnswerOutcome, FetchResult, Side};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// A ready answer waiting for its side's turn to come around
pub type CachedAnswer = (AnswerOutcome, Option<AnimationHandle>);

/// Tracks, per side, one in-flight background fetch and one cached result.
#[derive(Debug, Default)]
pub struct PrefetchCache {
    slots: [Option<CachedAnswer>; 2],
    in_flight: [bool; 2],
}

fn idx(side: Side) -> usize {
    match side {
        Side::Yes => 0,
        Side::No => 1,
    }
}

impl PrefetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Is a background fetch currently running for this side?
    pub fn is_in_flight(&self, side: Side) -> bool {
        self.in_flight[idx(side)]
    }

    /// Is a ready result waiting for this side?
    pub fn has_cached(&self, side: Side) -> bool {
        self.slots[idx(side)].is_some()
    }

    /// Mark a fetch as started for `side` and return true, unless one is
    /// already in flight or a result is already cached — then nothing needs
    /// to be launched and this returns false. Keeps the single-flight
    /// invariant in one place.
    pub fn begin_fetch(&mut self, side: Side) -> bool {
        let i = idx(side);
        if self.in_flight[i] || self.slots[i].is_some() {
            return false;
        }
        self.in_flight[i] = true;
        true
    }

    /// Clear the in-flight flag once a fetch for `side` has delivered
    pub fn finish_fetch(&mut self, side: Side) {
        self.in_flight[idx(side)] = false;
    }

    /// Store a result for a side whose turn it is not yet. Overwrites any
    /// previous result; with single-flight fetches that only happens if a
    /// stale fetch raced a game restart, and the newest answer wins.
    pub fn store(&mut self, side: Side, outcome: AnswerOutcome, image: Option<AnimationHandle>) {
        let i = idx(side);
        if self.slots[i].is_some() {
            tracing::debug!(?side, "overwriting cached answer");
        }
        self.slots[i] = Some((outcome, image));
    }

    /// Take and clear the cached result for `side`, if any
    pub fn take(&mut self, side: Side) -> Option<CachedAnswer> {
        self.slots[idx(side)].take()
    }
}

/// Default capacity of the bounded delivery channel. Far beyond what two
/// single-flight fetches can queue; the overflow queue covers the rest.
pub const DELIVERY_CAPACITY: usize = 16;

/// Producer half of the delivery pair, cloned into background fetch tasks.
///
/// Results go through a bounded channel; if the channel is full or the
/// consumer is gone, they land in a shared overflow queue instead so that a
/// completed fetch is never silently lost.
#[derive(Debug, Clone)]
pub struct DeliverySink {
    tx: Sender<FetchResult>,
    overflow: Arc<Mutex<VecDeque<FetchResult>>>,
}

impl DeliverySink {
    /// Hand a completed fetch to the engine thread
    pub fn deliver(&self, result: FetchResult) {
        match self.tx.try_send(result) {
            Ok(()) => {}
            Err(TrySendError::Full(result)) | Err(TrySendError::Disconnected(result)) => {
                tracing::debug!(side = ?result.side, "delivery channel unavailable, queueing");
                self.overflow.lock().push_back(result);
            }
        }
    }
}

/// Consumer half of the delivery pair, owned by the turn engine and drained
/// once per tick.
#[derive(Debug)]
pub struct DeliverySource {
    rx: Receiver<FetchResult>,
    overflow: Arc<Mutex<VecDeque<FetchResult>>>,
}

impl DeliverySource {
    /// Collect everything that has arrived since the last tick, channel
    /// first, then the overflow queue. Per-side arrival order is preserved
    /// within each path.
    pub fn drain(&mut self) -> Vec<FetchResult> {
        let mut results: Vec<FetchResult> = self.rx.try_iter().collect();
        let mut queued = self.overflow.lock();
        while let Some(result) = queued.pop_front() {
            results.push(result);
        }
        results
    }
}

/// Create a connected sink/source pair with the default capacity
pub fn delivery_channel() -> (DeliverySink, DeliverySource) {
    let (tx, rx) = crossbeam_channel::bounded(DELIVERY_CAPACITY);
    let overflow = Arc::new(Mutex::new(VecDeque::new()));
    (
        DeliverySink {
            tx,
            overflow: Arc::clone(&overflow),
        },
        DeliverySource { rx, overflow },
    )
}
