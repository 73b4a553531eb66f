//! Audio cue dispatch.
//!
//! Cues are fire-and-forget: every method has an empty default, a sink may
//! implement only the cues it cares about, and nothing a sink does can reach
//! back into round state.

use crate::types::RoundEvent;

pub trait AudioCues {
    fn on_flip(&mut self) {}
    fn on_match(&mut self, _combo: u32) {}
    fn on_miss(&mut self) {}
    fn on_win(&mut self) {}
    fn on_timeout(&mut self) {}
}

/// Sink used when no audio collaborator is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl AudioCues for SilentCues {}

/// Route a round event to the matching cue.
pub fn dispatch_cue<C: AudioCues + ?Sized>(cues: &mut C, event: &RoundEvent) {
    match *event {
        RoundEvent::Flip { .. } => cues.on_flip(),
        RoundEvent::Match { combo, .. } => cues.on_match(combo),
        RoundEvent::Miss { .. } => cues.on_miss(),
        RoundEvent::Won { .. } => cues.on_win(),
        RoundEvent::TimedOut { .. } => cues.on_timeout(),
    }
}
