//! Board generator - shuffled pair layouts
//!
//! A board of `rows * cols` cells receives `ceil(total / 2)` pair identities,
//! two cards each, truncated to `total` cards. On odd boards this leaves exactly
//! one card without a partner. The sequence is then shuffled with Fisher-Yates;
//! the resulting order is the row-major placement on the board.

use rand::Rng;

use crate::types::{CardId, FaceRef};

/// A generated card: its pair identity and the face it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardRecord {
    pub card_id: CardId,
    /// `None` when the generator has no faces; front-ends draw a placeholder.
    pub face: Option<FaceRef>,
}

/// Produces card layouts, cycling identities through a finite face list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardGenerator {
    face_count: u16,
}

impl BoardGenerator {
    /// Create a generator for a face list of `face_count` entries.
    pub fn new(face_count: usize) -> Self {
        Self {
            face_count: face_count.min(u16::MAX as usize) as u16,
        }
    }

    pub fn face_count(&self) -> usize {
        self.face_count as usize
    }

    /// Face assigned to a pair identity (`id mod face_count`).
    pub fn face_for(&self, card_id: CardId) -> Option<FaceRef> {
        if self.face_count == 0 {
            return None;
        }
        Some(FaceRef((card_id % self.face_count as CardId) as u16))
    }

    /// Generate a shuffled layout for a `rows` x `cols` board.
    ///
    /// Callers guarantee `rows >= 1` and `cols >= 1`. Deterministic for a fixed
    /// `rng` stream; the only side effect is consuming RNG draws.
    pub fn generate<R: Rng + ?Sized>(&self, rows: u16, cols: u16, rng: &mut R) -> Vec<CardRecord> {
        let total = rows as usize * cols as usize;
        let pairs = pair_count(total);

        let mut cards = Vec::with_capacity(pairs * 2);
        for id in 0..pairs {
            let card_id = id as CardId;
            let record = CardRecord {
                card_id,
                face: self.face_for(card_id),
            };
            cards.push(record);
            cards.push(record);
        }
        // Odd boards drop the last duplicate.
        cards.truncate(total);

        shuffle(&mut cards, rng);
        cards
    }
}

/// Number of pair identities needed for `total` cells.
pub fn pair_count(total: usize) -> usize {
    (total + 1) / 2
}

/// Number of matchable pairs on a board of `total` cells.
///
/// The unpaired card of an odd board is not counted.
pub fn matchable_pairs(total: usize) -> usize {
    total / 2
}

/// Shuffle a slice in place using Fisher-Yates
pub fn shuffle<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}
