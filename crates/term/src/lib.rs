//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views draw into a framebuffer
//! which the [`TerminalRenderer`] diffs and flushes to the terminal. No
//! widget toolkit is involved.
//!
//! - [`fb`]: framebuffer, cells and styles
//! - [`game_view`]: board, HUD and round overlays
//! - [`menu_view`]: main menu
//! - [`renderer`]: diffing crossterm backend
//! - [`bell`]: terminal-bell audio cues

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod renderer;

pub use tui_pairs_core as core;
pub use tui_pairs_types as types;

pub use bell::BellCues;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{face_glyph, GameView, Viewport, FACE_GLYPHS};
pub use menu_view::MenuView;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
