use thiserror::Error;

use crate::types::MAX_BOARD_DIM;

/// Rejected round configuration.
///
/// Raised by the lifecycle layer before a board is ever generated; gameplay
/// itself never fails.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board needs at least one row")]
    InvalidRows,
    #[error("Board needs at least one column")]
    InvalidCols,
    #[error("Board {rows}x{cols} is too large (at most {max}x{max})", max = MAX_BOARD_DIM)]
    BoardTooLarge { rows: u16, cols: u16 },
    #[error("Starting time must be at least one second")]
    InvalidStartingTime,
}

pub type Result<T> = core::result::Result<T, ConfigError>;
