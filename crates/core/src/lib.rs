//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides the outcome of a round lives here: dealing the
//! board, the per-card flip machine, pair resolution, scoring and the clock.
//! There is no terminal I/O; renderers read [`RoundSnapshot`]s and audio sinks
//! receive [`RoundEvent`](types::RoundEvent)s.
//!
//! # Module Structure
//!
//! - [`generator`]: paired identities and an unbiased Fisher-Yates shuffle
//! - [`card`]: per-card phase machine and the [`RevealGate`] capability
//! - [`round`]: pending reveals, resolution, score, combo and the clock
//! - [`lifecycle`]: validated [`RoundConfig`], new rounds and the [`Session`]
//! - [`scoring`]: match reward with streak bonus, floored miss penalty
//! - [`rng`]: seedable board rng
//! - [`cues`]: fire-and-forget audio cue dispatch
//! - [`snapshot`]: read-only views for the HUD and renderers
//!
//! # Example
//!
//! ```
//! use tui_pairs_core::{BoardGenerator, BoardRng, RoundConfig, Session};
//! use tui_pairs_core::types::{RoundPhase, TICK_MS};
//!
//! let config = RoundConfig::new(2, 2, 30).unwrap();
//! let mut session = Session::new(config, BoardGenerator::new(8), BoardRng::new(12345));
//! session.start_new_round();
//!
//! assert!(session.reveal(0));
//! session.tick(TICK_MS);
//! assert_eq!(session.controller().phase(), RoundPhase::Running);
//! ```
//!
//! # Timing
//!
//! Waits are timers advanced by `tick(elapsed_ms)`, never blocking calls.
//! Card flips take `FLIP_MS`, matched cards fade over `FADE_MS`, and a pair
//! stays visible for `REVEAL_DELAY_MS` before it is judged.

pub mod card;
pub mod cues;
pub mod error;
pub mod generator;
pub mod lifecycle;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod snapshot;

pub use tui_pairs_types as types;

pub use card::{Card, CardPhase, CardSignal, RevealGate};
pub use cues::{dispatch_cue, AudioCues, SilentCues};
pub use error::ConfigError;
pub use generator::{BoardGenerator, CardRecord};
pub use lifecycle::{start_new_round, RoundConfig, Session};
pub use rng::BoardRng;
pub use round::{AdmissionGate, RoundController};
pub use snapshot::{CardView, RoundSnapshot};
