//! Round lifecycle - configuration, new rounds and the session best score

use rand::Rng;

use crate::error::{ConfigError, Result};
use crate::generator::BoardGenerator;
use crate::rng::BoardRng;
use crate::round::RoundController;
use crate::snapshot::RoundSnapshot;
use crate::types::*;

/// Board size and clock for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    rows: u16,
    cols: u16,
    starting_time_secs: u32,
}

impl RoundConfig {
    pub fn new(rows: u16, cols: u16, starting_time_secs: u32) -> Result<Self> {
        let err = if rows == 0 {
            Some(ConfigError::InvalidRows)
        } else if cols == 0 {
            Some(ConfigError::InvalidCols)
        } else if rows > MAX_BOARD_DIM || cols > MAX_BOARD_DIM {
            Some(ConfigError::BoardTooLarge { rows, cols })
        } else if starting_time_secs == 0 {
            Some(ConfigError::InvalidStartingTime)
        } else {
            None
        };

        if let Some(err) = err {
            tracing::debug!(rows, cols, starting_time_secs, %err, "round config rejected");
            return Err(err);
        }
        Ok(Self {
            rows,
            cols,
            starting_time_secs,
        })
    }

    pub fn from_preset(preset: Preset) -> Self {
        Self {
            rows: preset.rows(),
            cols: preset.cols(),
            starting_time_secs: preset.starting_time_secs(),
        }
    }

    /// Custom values from the menu: raised to the custom minimums, then validated.
    pub fn custom_clamped(rows: u16, cols: u16, starting_time_secs: u32) -> Result<Self> {
        Self::new(
            rows.max(CUSTOM_MIN_DIM),
            cols.max(CUSTOM_MIN_DIM),
            starting_time_secs.max(CUSTOM_MIN_TIME_SECS),
        )
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn starting_time_secs(&self) -> u32 {
        self.starting_time_secs
    }

    pub fn starting_time_ms(&self) -> u32 {
        self.starting_time_secs.saturating_mul(1000)
    }

    pub fn total_cards(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            starting_time_secs: DEFAULT_STARTING_TIME_SECS,
        }
    }
}

/// Deal a fresh board into `controller` and start its clock.
///
/// Callable from any state. Pause, a pending resolution and every card of the
/// previous round are discarded.
pub fn start_new_round<R: Rng + ?Sized>(
    controller: &mut RoundController,
    config: &RoundConfig,
    generator: &BoardGenerator,
    rng: &mut R,
) {
    let records = generator.generate(config.rows, config.cols, rng);
    controller.begin(config.rows, config.cols, records, config.starting_time_ms());
}

/// A sequence of rounds sharing one configuration, rng stream and best score.
#[derive(Debug, Clone)]
pub struct Session {
    config: RoundConfig,
    generator: BoardGenerator,
    rng: BoardRng,
    controller: RoundController,
    best_score: u32,
    /// Round id whose outcome was already folded into `best_score`.
    recorded_round: u32,
    new_best: Option<u32>,
}

impl Session {
    /// Create a session. No round is running until [`Session::start_new_round`].
    pub fn new(config: RoundConfig, generator: BoardGenerator, rng: BoardRng) -> Self {
        Self {
            config,
            generator,
            rng,
            controller: RoundController::new(),
            best_score: 0,
            recorded_round: 0,
            new_best: None,
        }
    }

    /// Seed the session with a previously stored best score.
    pub fn with_best_score(mut self, best_score: u32) -> Self {
        self.best_score = best_score;
        self
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn start_new_round(&mut self) {
        start_new_round(&mut self.controller, &self.config, &self.generator, &mut self.rng);
        self.record_outcome();
    }

    /// Switch configuration and start a round with it.
    pub fn start_new_round_with(&mut self, config: RoundConfig) {
        self.config = config;
        self.start_new_round();
    }

    /// Fresh board, same configuration.
    pub fn restart(&mut self) {
        self.start_new_round();
    }

    pub fn reveal(&mut self, index: usize) -> bool {
        self.controller.reveal(index)
    }

    pub fn pause(&mut self) -> bool {
        self.controller.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.controller.resume()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.controller.toggle_pause()
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.controller.tick(elapsed_ms);
        self.record_outcome();
    }

    pub fn take_events(&mut self) -> std::vec::Drain<'_, RoundEvent> {
        self.controller.take_events()
    }

    /// Score that beat the stored best since the last call, if any.
    pub fn take_new_best(&mut self) -> Option<u32> {
        self.new_best.take()
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        self.controller.snapshot_into(out);
        out.best_score = self.best_score;
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn record_outcome(&mut self) {
        let round_id = self.controller.round_id();
        if !self.controller.phase().is_terminal() || self.recorded_round == round_id {
            return;
        }
        self.recorded_round = round_id;

        let score = self.controller.score();
        if score > self.best_score {
            tracing::info!(round_id, score, previous = self.best_score, "new best score");
            self.best_score = score;
            self.new_best = Some(score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    fn session(rows: u16, cols: u16, secs: u32, seed: u64) -> Session {
        let config = RoundConfig::new(rows, cols, secs).unwrap();
        Session::new(config, BoardGenerator::new(8), BoardRng::new(seed))
    }

    /// Reveal every pair by id until the round is won.
    fn solve(s: &mut Session) {
        let cards: Vec<Card> = s.controller().cards().to_vec();
        for (a, card) in cards.iter().enumerate() {
            let Some(b) = (a + 1..cards.len()).find(|&b| cards[b].card_id() == card.card_id()) else {
                continue;
            };
            assert!(s.reveal(a));
            assert!(s.reveal(b));
            for _ in 0..100 {
                s.tick(TICK_MS);
                let settled = s.controller().cards().iter().all(|c| !c.is_animating());
                if settled && !s.controller().resolving() {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(RoundConfig::new(0, 4, 30), Err(ConfigError::InvalidRows));
        assert_eq!(RoundConfig::new(4, 0, 30), Err(ConfigError::InvalidCols));
        assert_eq!(
            RoundConfig::new(11, 4, 30),
            Err(ConfigError::BoardTooLarge { rows: 11, cols: 4 })
        );
        assert_eq!(RoundConfig::new(4, 4, 0), Err(ConfigError::InvalidStartingTime));

        let c = RoundConfig::new(1, 1, 1).unwrap();
        assert_eq!(c.total_cards(), 1);
        assert_eq!(c.starting_time_ms(), 1000);
    }

    #[test]
    fn test_custom_config_is_clamped() {
        let c = RoundConfig::custom_clamped(0, 1, 3).unwrap();
        assert_eq!((c.rows(), c.cols(), c.starting_time_secs()), (2, 2, 10));
        assert!(RoundConfig::custom_clamped(12, 2, 60).is_err());
    }

    #[test]
    fn test_preset_configs() {
        let c = RoundConfig::from_preset(Preset::Hard);
        assert_eq!((c.rows(), c.cols(), c.starting_time_secs()), (5, 6, 60));
        for preset in Preset::ALL {
            let c = RoundConfig::from_preset(preset);
            assert!(RoundConfig::new(c.rows(), c.cols(), c.starting_time_secs()).is_ok());
        }
    }

    #[test]
    fn test_start_new_round_free_function() {
        let mut rc = RoundController::new();
        let config = RoundConfig::new(3, 4, 30).unwrap();
        let mut rng = BoardRng::new(9);
        start_new_round(&mut rc, &config, &BoardGenerator::new(4), &mut rng);

        assert_eq!(rc.phase(), RoundPhase::Running);
        assert_eq!(rc.cards().len(), 12);
        assert_eq!(rc.remaining_pairs(), 6);
        assert_eq!(rc.time_left_ms(), 30_000);
    }

    #[test]
    fn test_session_is_deterministic_per_seed() {
        let mut a = session(4, 4, 60, 42);
        let mut b = session(4, 4, 60, 42);
        a.start_new_round();
        b.start_new_round();
        assert_eq!(a.controller().cards(), b.controller().cards());

        // The rng stream advances, so the next board differs.
        let first: Vec<Card> = a.controller().cards().to_vec();
        a.restart();
        assert_ne!(a.controller().cards(), first.as_slice());
    }

    #[test]
    fn test_restart_clears_pause_and_resolution() {
        let mut s = session(2, 2, 30, 1);
        s.start_new_round();
        let cards = s.controller().cards().to_vec();
        let a = 0;
        let b = (1..4).find(|&b| cards[b].card_id() != cards[a].card_id()).unwrap();
        s.reveal(a);
        s.reveal(b);
        s.tick(FLIP_MS);
        s.pause();
        assert!(s.controller().resolving());

        s.restart();
        assert_eq!(s.controller().round_id(), 2);
        assert_eq!(s.controller().phase(), RoundPhase::Running);
        assert!(!s.controller().resolving());
        assert_eq!(s.controller().time_left_ms(), 30_000);
        assert_eq!(s.take_events().count(), 0);
    }

    #[test]
    fn test_win_records_best_once() {
        let mut s = session(2, 2, 30, 7).with_best_score(150);
        s.start_new_round();
        solve(&mut s);

        assert_eq!(s.controller().phase(), RoundPhase::Won);
        assert_eq!(s.controller().score(), 210);
        assert_eq!(s.best_score(), 210);
        assert_eq!(s.take_new_best(), Some(210));

        // Further ticks on the ended round do not record again.
        s.tick(1000);
        assert_eq!(s.take_new_best(), None);
        assert_eq!(s.snapshot().best_score, 210);
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let mut s = session(2, 2, 1, 3).with_best_score(500);
        s.start_new_round();
        s.tick(1000);
        assert_eq!(s.controller().phase(), RoundPhase::TimedOut);
        assert_eq!(s.best_score(), 500);
        assert_eq!(s.take_new_best(), None);
    }

    #[test]
    fn test_start_with_new_config() {
        let mut s = session(2, 2, 30, 5);
        s.start_new_round();
        s.start_new_round_with(RoundConfig::from_preset(Preset::Normal));
        assert_eq!(s.config().rows(), 3);
        assert_eq!(s.controller().cards().len(), 12);
        assert_eq!(s.controller().time_left_ms(), 30_000);
    }
}
