//! Terminal bell audio cues.

use crate::core::AudioCues;

/// Rings the terminal bell on match, win and timeout.
///
/// The sink only latches a request; the runner forwards it to
/// [`TerminalRenderer::ring_bell`](crate::TerminalRenderer::ring_bell) so the
/// bell goes out with the next frame.
#[derive(Debug, Default)]
pub struct BellCues {
    pending: bool,
}

impl BellCues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a cue fired since the last call.
    pub fn take_ring(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl AudioCues for BellCues {
    fn on_match(&mut self, _combo: u32) {
        self.pending = true;
    }

    fn on_win(&mut self) {
        self.pending = true;
    }

    fn on_timeout(&mut self) {
        self.pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch_cue;
    use crate::types::RoundEvent;

    #[test]
    fn rings_on_match_but_not_flip() {
        let mut bell = BellCues::new();
        dispatch_cue(&mut bell, &RoundEvent::Flip { index: 0 });
        dispatch_cue(&mut bell, &RoundEvent::Miss { penalty: 25 });
        assert!(!bell.take_ring());

        dispatch_cue(&mut bell, &RoundEvent::Match { combo: 1, points: 100 });
        assert!(bell.take_ring());
        assert!(!bell.take_ring());
    }

    #[test]
    fn rings_on_round_end() {
        let mut bell = BellCues::new();
        dispatch_cue(&mut bell, &RoundEvent::TimedOut { score: 0 });
        assert!(bell.take_ring());
        dispatch_cue(&mut bell, &RoundEvent::Won { score: 10 });
        assert!(bell.take_ring());
    }
}
