//! Round controller - match resolution and round state
//!
//! Owns the cards of the current round, the pending-reveal buffer, score,
//! combo, the remaining-pair counter and the countdown clock.
//!
//! # Flow
//!
//! 1. [`RoundController::reveal`] asks a card to flip, handing it the
//!    admission gate (`running && !paused && !resolving`).
//! 2. When the flip completes during [`RoundController::tick`], the card is
//!    reported through [`RoundController::on_card_revealed`] and appended to
//!    the pending buffer.
//! 3. The second admitted card starts a resolution: after `REVEAL_DELAY_MS`
//!    both ids are compared, the outcome (finalize or revert) is issued to both
//!    cards in the same tick, and the resolution ends once both transitions
//!    settle.
//!
//! Pausing freezes the clock and the gate but never an in-flight resolution.
//! After the round ends, a resolution still plays out on the cards but no
//! longer changes score, combo or the remaining-pair counter.

use arrayvec::ArrayVec;

use crate::card::{Card, CardPhase, CardSignal, RevealGate};
use crate::generator::{matchable_pairs, CardRecord};
use crate::scoring::{apply_miss_penalty, match_points};
use crate::snapshot::{CardView, RoundSnapshot};
use crate::types::*;

/// Gate state captured at request time and handed to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionGate {
    pub running: bool,
    pub paused: bool,
    pub resolving: bool,
}

impl RevealGate for AdmissionGate {
    fn can_accept_reveal(&self) -> bool {
        self.running && !self.paused && !self.resolving
    }
}

/// In-flight judgment of the two pending cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    /// Both faces are visible; judge when the delay runs out.
    Delay { remaining_ms: u32 },
    /// Outcome issued to both cards; waiting for their transitions to settle.
    Settling,
}

#[derive(Debug, Clone, Default)]
pub struct RoundController {
    rows: u16,
    cols: u16,
    cards: Vec<Card>,
    /// Monotonic round id (increments on every new round).
    round_id: u32,
    started: bool,
    running: bool,
    paused: bool,
    outcome: Option<RoundOutcome>,
    pending: ArrayVec<usize, MAX_PENDING>,
    resolution: Option<Resolution>,
    /// Cards whose reveal flip is running, in request order.
    in_flight: Vec<usize>,
    /// Scratch list of reveals completed in the current tick.
    completed: Vec<usize>,
    score: u32,
    combo: u32,
    remaining_pairs: u32,
    time_left_ms: u32,
    starting_time_ms: u32,
    events: Vec<RoundEvent>,
}

impl RoundController {
    /// Create an idle controller; nothing is accepted until a round starts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every piece of round state with a fresh round.
    ///
    /// Anything in flight for the previous cards (flips, a pending judgment,
    /// undrained events) is discarded with them.
    pub(crate) fn begin(&mut self, rows: u16, cols: u16, records: Vec<CardRecord>, starting_time_ms: u32) {
        self.rows = rows;
        self.cols = cols;
        self.remaining_pairs = matchable_pairs(records.len()) as u32;
        self.cards = records.into_iter().map(Card::new).collect();
        self.round_id = self.round_id.wrapping_add(1);
        self.started = true;
        self.running = true;
        self.paused = false;
        self.outcome = None;
        self.pending.clear();
        self.resolution = None;
        self.in_flight.clear();
        self.completed.clear();
        self.score = 0;
        self.combo = 0;
        self.time_left_ms = starting_time_ms;
        self.starting_time_ms = starting_time_ms;
        self.events.clear();

        tracing::info!(
            round_id = self.round_id,
            rows,
            cols,
            pairs = self.remaining_pairs,
            starting_time_ms,
            "round started"
        );

        // A board without a single pair has nothing left to match.
        if self.remaining_pairs == 0 {
            self.finish(RoundOutcome::Won);
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn resolving(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn phase(&self) -> RoundPhase {
        if !self.started {
            return RoundPhase::NotStarted;
        }
        if let Some(outcome) = self.outcome {
            return outcome.phase();
        }
        if self.paused {
            RoundPhase::Paused
        } else {
            RoundPhase::Running
        }
    }

    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn remaining_pairs(&self) -> u32 {
        self.remaining_pairs
    }

    pub fn time_left_ms(&self) -> u32 {
        self.time_left_ms
    }

    pub fn starting_time_ms(&self) -> u32 {
        self.starting_time_ms
    }

    pub fn gate(&self) -> AdmissionGate {
        AdmissionGate {
            running: self.running,
            paused: self.paused,
            resolving: self.resolving(),
        }
    }

    /// The single admission check: `running && !paused && !resolving`.
    pub fn can_accept_reveal(&self) -> bool {
        self.gate().can_accept_reveal()
    }

    /// A reveal request for the card at `index` arrived.
    ///
    /// Returns whether the card started flipping. Out-of-range indices, a
    /// closed gate and cards that cannot flip are all silently ignored.
    pub fn reveal(&mut self, index: usize) -> bool {
        let gate = self.gate();
        let Some(card) = self.cards.get_mut(index) else {
            return false;
        };
        if !card.request_reveal(&gate) {
            return false;
        }
        self.in_flight.push(index);
        self.events.push(RoundEvent::Flip { index });
        true
    }

    /// A card finished its reveal flip.
    ///
    /// Duplicate reports for a pending card are ignored. A card turned away
    /// (closed gate, or a third reveal racing a full buffer) is flipped back
    /// so it never stays face up outside the pending buffer.
    pub fn on_card_revealed(&mut self, index: usize) {
        let Some(card) = self.cards.get(index) else {
            return;
        };
        if card.phase() != CardPhase::FaceUp {
            return;
        }
        if self.pending.contains(&index) {
            return;
        }

        if !self.can_accept_reveal() || self.pending.is_full() {
            tracing::debug!(round_id = self.round_id, index, "reveal turned away");
            self.cards[index].revert();
            return;
        }

        self.pending.push(index);
        if self.pending.is_full() {
            self.resolution = Some(Resolution::Delay {
                remaining_ms: REVEAL_DELAY_MS,
            });
        }
    }

    /// Advance the round by one scheduling step.
    ///
    /// Card transitions and an in-flight resolution advance even while paused
    /// or after the round ended; the clock only runs while `running && !paused`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.started {
            return;
        }

        let mut completed = std::mem::take(&mut self.completed);
        completed.clear();
        for (index, card) in self.cards.iter_mut().enumerate() {
            match card.advance(elapsed_ms) {
                Some(CardSignal::Revealed) => completed.push(index),
                Some(signal) => tracing::trace!(index, ?signal, "card settled"),
                None => {}
            }
        }

        self.advance_resolution(elapsed_ms);

        // Report completed reveals in the order they were requested.
        if !completed.is_empty() {
            let mut k = 0;
            while k < self.in_flight.len() {
                let index = self.in_flight[k];
                if completed.contains(&index) {
                    self.in_flight.remove(k);
                    self.on_card_revealed(index);
                } else {
                    k += 1;
                }
            }
        }
        self.completed = completed;

        self.advance_clock(elapsed_ms);
    }

    fn advance_resolution(&mut self, elapsed_ms: u32) {
        match self.resolution {
            Some(Resolution::Delay { remaining_ms }) => {
                let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
                if remaining_ms == 0 {
                    self.judge();
                } else {
                    self.resolution = Some(Resolution::Delay { remaining_ms });
                }
            }
            Some(Resolution::Settling) => {
                let settled = self
                    .pending
                    .iter()
                    .all(|&index| !self.cards[index].is_animating());
                if settled {
                    self.pending.clear();
                    self.resolution = None;
                }
            }
            None => {}
        }
    }

    /// Compare the two pending cards and issue the outcome to both.
    fn judge(&mut self) {
        let (a, b) = (self.pending[0], self.pending[1]);
        let matched = self.cards[a].card_id() == self.cards[b].card_id();
        let counts = self.running;

        // A pair judged after the round ended is turned back so the final board
        // only shows counted matches.
        if matched && counts {
            self.cards[a].finalize();
            self.cards[b].finalize();
        } else {
            self.cards[a].revert();
            self.cards[b].revert();
        }
        self.resolution = Some(Resolution::Settling);

        if !counts {
            tracing::debug!(round_id = self.round_id, matched, "judged after round end");
            return;
        }

        if matched {
            self.combo += 1;
            let points = match_points(self.combo);
            self.score = self.score.saturating_add(points);
            self.remaining_pairs = self.remaining_pairs.saturating_sub(1);
            self.events.push(RoundEvent::Match {
                combo: self.combo,
                points,
            });
            tracing::debug!(
                round_id = self.round_id,
                a,
                b,
                combo = self.combo,
                points,
                remaining = self.remaining_pairs,
                "match"
            );
            if self.remaining_pairs == 0 {
                self.finish(RoundOutcome::Won);
            }
        } else {
            self.combo = 0;
            let (score, penalty) = apply_miss_penalty(self.score);
            self.score = score;
            self.events.push(RoundEvent::Miss { penalty });
            tracing::debug!(round_id = self.round_id, a, b, penalty, "miss");
        }
    }

    fn advance_clock(&mut self, elapsed_ms: u32) {
        if !self.running || self.paused {
            return;
        }
        self.time_left_ms = self.time_left_ms.saturating_sub(elapsed_ms);
        if self.time_left_ms == 0 {
            self.finish(RoundOutcome::TimedOut);
        }
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.running = false;
        self.paused = false;
        let score = self.score;
        self.events.push(match outcome {
            RoundOutcome::Won => RoundEvent::Won { score },
            RoundOutcome::TimedOut => RoundEvent::TimedOut { score },
        });
        tracing::info!(round_id = self.round_id, ?outcome, score, "round over");
    }

    /// Pause a running round. Ignored before start and after the round ended.
    pub fn pause(&mut self) -> bool {
        if !self.running || self.paused {
            return false;
        }
        self.paused = true;
        tracing::debug!(round_id = self.round_id, "paused");
        true
    }

    /// Resume a paused round. Ignored before start and after the round ended.
    pub fn resume(&mut self) -> bool {
        if !self.running || !self.paused {
            return false;
        }
        self.paused = false;
        tracing::debug!(round_id = self.round_id, "resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Take and clear the events raised since the last call.
    pub fn take_events(&mut self) -> std::vec::Drain<'_, RoundEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.rows = self.rows;
        out.cols = self.cols;
        out.cards.clear();
        out.cards.extend(self.cards.iter().map(CardView::from));
        out.phase = self.phase();
        out.round_id = self.round_id;
        out.score = self.score;
        out.combo = self.combo;
        out.remaining_pairs = self.remaining_pairs;
        out.time_left_ms = self.time_left_ms;
        out.pending = self.pending.len() as u8;
        out.resolving = self.resolving();
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl RevealGate for RoundController {
    fn can_accept_reveal(&self) -> bool {
        RoundController::can_accept_reveal(self)
    }
}
