use crate::card::{Card, CardPhase};
use crate::types::{CardId, FaceRef, RoundPhase};

/// Read-only view of one card for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardView {
    pub card_id: CardId,
    pub face: Option<FaceRef>,
    pub phase: CardPhase,
    pub face_up: bool,
    pub matched: bool,
    pub locked: bool,
    pub opacity_permille: u16,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            card_id: card.card_id(),
            face: card.face(),
            phase: card.phase(),
            face_up: card.is_face_up(),
            matched: card.is_matched(),
            locked: card.is_locked(),
            opacity_permille: card.opacity_permille(),
        }
    }
}

impl CardView {
    /// Whether a renderer should draw the face rather than the back.
    ///
    /// Revealing cards already show their face, matching the flip animation.
    pub fn shows_face(&self) -> bool {
        match self.phase {
            CardPhase::FaceDown => false,
            CardPhase::Revealing { .. } | CardPhase::FaceUp | CardPhase::Reverting { .. } => true,
            CardPhase::Matched { fade_ms } => fade_ms > 0,
        }
    }

    /// Whether the slot should be drawn empty (matched and fully faded).
    pub fn vanished(&self) -> bool {
        matches!(self.phase, CardPhase::Matched { fade_ms: 0 })
    }
}

/// HUD and render snapshot of a round.
///
/// Reused across frames via `snapshot_into` so the card vector keeps its allocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundSnapshot {
    pub rows: u16,
    pub cols: u16,
    pub cards: Vec<CardView>,
    pub phase: RoundPhase,
    pub round_id: u32,
    pub score: u32,
    pub combo: u32,
    pub best_score: u32,
    pub remaining_pairs: u32,
    pub time_left_ms: u32,
    pub pending: u8,
    pub resolving: bool,
}

impl RoundSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.cards.clear();
        self.phase = RoundPhase::NotStarted;
        self.round_id = 0;
        self.score = 0;
        self.combo = 0;
        self.best_score = 0;
        self.remaining_pairs = 0;
        self.time_left_ms = 0;
        self.pending = 0;
        self.resolving = false;
    }

    pub fn playable(&self) -> bool {
        self.phase == RoundPhase::Running && !self.resolving
    }

    pub fn card(&self, row: u16, col: u16) -> Option<&CardView> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cards.get(row as usize * self.cols as usize + col as usize)
    }

    /// Remaining time as `(minutes, seconds)`, rounding partial seconds up.
    pub fn clock(&self) -> (u32, u32) {
        let secs = self.time_left_ms.div_ceil(1000);
        (secs / 60, secs % 60)
    }
}
