//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FLIP_MS` | 220 | Card flip (reveal or revert) duration |
//! | `FADE_MS` | 200 | Fade-out of a matched card |
//! | `REVEAL_DELAY_MS` | 250 | Both faces stay visible before a pair is judged |
//!
//! # Scoring Constants
//!
//! A match awards `MATCH_REWARD + (combo - 1) * STREAK_BONUS`; a miss deducts
//! `MISS_PENALTY`, flooring the score at zero.
//!
//! # Examples
//!
//! ```
//! use tui_pairs_types::{GameAction, Preset, RoundPhase};
//!
//! let action = GameAction::from_str("reveal").unwrap();
//! assert_eq!(action, GameAction::Reveal);
//!
//! let preset = Preset::from_str("normal").unwrap();
//! assert_eq!((preset.rows(), preset.cols()), (3, 4));
//!
//! assert!(RoundPhase::Won.is_terminal());
//! assert!(!RoundPhase::Paused.is_terminal());
//! ```

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Duration of a single card flip, face-down to face-up or back.
pub const FLIP_MS: u32 = 220;

/// Fade-out duration of a matched card. Purely presentational.
pub const FADE_MS: u32 = 200;

/// Time both faces of a pending pair stay visible before judgment.
pub const REVEAL_DELAY_MS: u32 = 250;

/// Base points for a confirmed match.
pub const MATCH_REWARD: u32 = 100;

/// Extra points per combo step beyond the first match of a streak.
pub const STREAK_BONUS: u32 = 10;

/// Points deducted on a miss (score never drops below zero).
pub const MISS_PENALTY: u32 = 25;

/// Maximum number of reveals awaiting resolution at any time.
pub const MAX_PENDING: usize = 2;

/// Largest accepted row or column count.
pub const MAX_BOARD_DIM: u16 = 10;

/// Default board rows when nothing else is configured.
pub const DEFAULT_ROWS: u16 = 4;

/// Default board columns when nothing else is configured.
pub const DEFAULT_COLS: u16 = 4;

/// Default round length in seconds.
pub const DEFAULT_STARTING_TIME_SECS: u32 = 90;

/// Lower bounds applied to custom settings picked from the menu.
pub const CUSTOM_MIN_DIM: u16 = 2;
pub const CUSTOM_MIN_TIME_SECS: u32 = 10;

/// Upper bound and step for the menu's custom time editor.
pub const CUSTOM_MAX_TIME_SECS: u32 = 600;
pub const CUSTOM_TIME_STEP_SECS: u32 = 5;

/// Pair identity shared by the two cards of a pair.
pub type CardId = u32;

/// Opaque handle to a face asset.
///
/// The core never interprets it; front-ends index their own face table with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceRef(pub u16);

impl FaceRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Observable lifecycle of a round.
///
/// `Won` and `TimedOut` are terminal until a new round is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundPhase {
    #[default]
    NotStarted,
    Running,
    Paused,
    Won,
    TimedOut,
}

impl RoundPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::TimedOut)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::NotStarted => "not_started",
            RoundPhase::Running => "running",
            RoundPhase::Paused => "paused",
            RoundPhase::Won => "won",
            RoundPhase::TimedOut => "timed_out",
        }
    }
}

/// How a finished round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    Won,
    TimedOut,
}

impl RoundOutcome {
    pub fn phase(&self) -> RoundPhase {
        match self {
            RoundOutcome::Won => RoundPhase::Won,
            RoundOutcome::TimedOut => RoundPhase::TimedOut,
        }
    }
}

/// Board presets offered by the main menu
///
/// - **Easy**: 2x2, 15 seconds
/// - **Normal**: 3x4, 30 seconds
/// - **Hard**: 5x6, 60 seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Easy,
    Normal,
    Hard,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Easy, Preset::Normal, Preset::Hard];

    pub fn rows(&self) -> u16 {
        match self {
            Preset::Easy => 2,
            Preset::Normal => 3,
            Preset::Hard => 5,
        }
    }

    pub fn cols(&self) -> u16 {
        match self {
            Preset::Easy => 2,
            Preset::Normal => 4,
            Preset::Hard => 6,
        }
    }

    pub fn starting_time_secs(&self) -> u32 {
        match self {
            Preset::Easy => 15,
            Preset::Normal => 30,
            Preset::Hard => 60,
        }
    }

    /// Parse preset from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_pairs_types::Preset;
    ///
    /// assert_eq!(Preset::from_str("EASY"), Some(Preset::Easy));
    /// assert_eq!(Preset::from_str("hard"), Some(Preset::Hard));
    /// assert_eq!(Preset::from_str("nightmare"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Preset::Easy),
            "normal" => Some(Preset::Normal),
            "hard" => Some(Preset::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Easy => "easy",
            Preset::Normal => "normal",
            Preset::Hard => "hard",
        }
    }

    /// Menu label, e.g. `Normal  3x4  0:30`.
    pub fn label(&self) -> &'static str {
        match self {
            Preset::Easy => "Easy    2x2  0:15",
            Preset::Normal => "Normal  3x4  0:30",
            Preset::Hard => "Hard    5x6  1:00",
        }
    }
}

/// Player actions produced by the input layer
///
/// Cursor actions move the board cursor during a round and the selection in
/// the menu. `Reveal` doubles as "confirm" outside of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Reveal the card under the cursor (or confirm a menu entry)
    Reveal,
    /// Toggle pause state
    Pause,
    /// Start a fresh board with the current configuration
    Restart,
    /// Leave the round and return to the main menu
    Menu,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_pairs_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(GameAction::from_str("PAUSE"), Some(GameAction::Pause));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "reveal" => Some(GameAction::Reveal),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "menu" => Some(GameAction::Menu),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Reveal => "reveal",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::Menu => "menu",
        }
    }
}

/// Event emitted by the round controller for audio and logging collaborators.
///
/// Drained with `RoundController::take_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// A card started flipping face up.
    Flip { index: usize },
    /// A pair was judged a match; `combo` is the streak including this match.
    Match { combo: u32, points: u32 },
    /// A pair was judged a miss.
    Miss { penalty: u32 },
    Won { score: u32 },
    TimedOut { score: u32 },
}
