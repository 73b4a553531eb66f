//! Card entity - per-cell flip state machine
//!
//! ```text
//! FaceDown --request_reveal--> Revealing --FLIP_MS--> FaceUp
//! FaceUp   --revert----------> Reverting --FLIP_MS--> FaceDown
//! FaceUp   --finalize--------> Matched (terminal, fades out over FADE_MS)
//! ```
//!
//! "Locked" is not a phase of its own: it holds while a card is revealing,
//! reverting or matched. Transitions are timers advanced by [`Card::advance`],
//! so a flip never blocks the tick loop. Requests whose preconditions fail are
//! silent no-ops; racing inputs are expected and absorbed here.

use crate::generator::CardRecord;
use crate::types::{CardId, FaceRef, FADE_MS, FLIP_MS};

/// Admission capability handed to a card when a reveal is requested.
///
/// A card needs nothing else from the round that owns it.
pub trait RevealGate {
    fn can_accept_reveal(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardPhase {
    FaceDown,
    Revealing { remaining_ms: u32 },
    FaceUp,
    Reverting { remaining_ms: u32 },
    /// Terminal. `fade_ms` counts down the presentational fade-out.
    Matched { fade_ms: u32 },
}

/// Completion signal produced when a transition finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSignal {
    /// Reveal finished; the card is face up and should be reported to the round.
    Revealed,
    /// Revert finished; the card is face down again.
    Reverted,
    /// Fade-out of a matched card finished.
    Faded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    record: CardRecord,
    phase: CardPhase,
}

impl Card {
    pub fn new(record: CardRecord) -> Self {
        Self {
            record,
            phase: CardPhase::FaceDown,
        }
    }

    pub fn record(&self) -> CardRecord {
        self.record
    }

    pub fn card_id(&self) -> CardId {
        self.record.card_id
    }

    pub fn face(&self) -> Option<FaceRef> {
        self.record.face
    }

    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    /// Whether the face is logically showing.
    ///
    /// A revealing card only counts as face up once its flip completes; a
    /// reverting card stays face up until its flip back completes.
    pub fn is_face_up(&self) -> bool {
        matches!(
            self.phase,
            CardPhase::FaceUp | CardPhase::Reverting { .. } | CardPhase::Matched { .. }
        )
    }

    pub fn is_matched(&self) -> bool {
        matches!(self.phase, CardPhase::Matched { .. })
    }

    pub fn is_locked(&self) -> bool {
        matches!(
            self.phase,
            CardPhase::Revealing { .. } | CardPhase::Reverting { .. } | CardPhase::Matched { .. }
        )
    }

    /// True while any timed transition (including the matched fade) is running.
    pub fn is_animating(&self) -> bool {
        match self.phase {
            CardPhase::Revealing { .. } | CardPhase::Reverting { .. } => true,
            CardPhase::Matched { fade_ms } => fade_ms > 0,
            CardPhase::FaceDown | CardPhase::FaceUp => false,
        }
    }

    /// Remaining visibility of a matched card in permille (1000 = opaque).
    pub fn opacity_permille(&self) -> u16 {
        match self.phase {
            CardPhase::Matched { fade_ms } => ((fade_ms as u64 * 1000) / FADE_MS as u64) as u16,
            _ => 1000,
        }
    }

    /// Start flipping face up.
    ///
    /// Requires an open gate and a card that is face down, unlocked and not
    /// matched. Returns whether the flip started.
    pub fn request_reveal<G: RevealGate + ?Sized>(&mut self, gate: &G) -> bool {
        if !gate.can_accept_reveal() {
            return false;
        }
        if self.phase != CardPhase::FaceDown {
            return false;
        }
        self.phase = CardPhase::Revealing {
            remaining_ms: FLIP_MS,
        };
        true
    }

    /// Start flipping back face down after a miss.
    ///
    /// Only a settled face-up card can revert. Returns whether the flip started.
    pub fn revert(&mut self) -> bool {
        if self.phase != CardPhase::FaceUp {
            return false;
        }
        self.phase = CardPhase::Reverting {
            remaining_ms: FLIP_MS,
        };
        true
    }

    /// Mark the card matched.
    ///
    /// The matched state is authoritative immediately; the fade that follows is
    /// presentation only and the card keeps its board slot.
    pub fn finalize(&mut self) -> bool {
        if self.is_matched() {
            return false;
        }
        self.phase = CardPhase::Matched { fade_ms: FADE_MS };
        true
    }

    /// Advance any running transition by `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<CardSignal> {
        match self.phase {
            CardPhase::Revealing { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
                if remaining_ms == 0 {
                    self.phase = CardPhase::FaceUp;
                    Some(CardSignal::Revealed)
                } else {
                    self.phase = CardPhase::Revealing { remaining_ms };
                    None
                }
            }
            CardPhase::Reverting { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
                if remaining_ms == 0 {
                    self.phase = CardPhase::FaceDown;
                    Some(CardSignal::Reverted)
                } else {
                    self.phase = CardPhase::Reverting { remaining_ms };
                    None
                }
            }
            CardPhase::Matched { fade_ms } if fade_ms > 0 => {
                let fade_ms = fade_ms.saturating_sub(elapsed_ms);
                self.phase = CardPhase::Matched { fade_ms };
                (fade_ms == 0).then_some(CardSignal::Faded)
            }
            _ => None,
        }
    }
}
