//! Error types for grid lookups and edits
//!
//! Every variant here is a caller defect: the grid model has no recoverable
//! runtime failures of its own.

use crate::position::SubGridKey;

/// Errors raised by position lookups and grid edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Key is not one of the nine canonical positions
    #[error("unknown grid key: {0:?}")]
    UnknownKey(String),

    /// Cell index outside 0..=8
    #[error("cell index {0} out of range (expected 0..=8)")]
    CellIndexOutOfRange(usize),

    /// The center position has no sub-grid
    #[error("center position has no sub-grid")]
    CenterNotSatellite,

    /// Satellite has not been expanded into a sub-grid yet
    #[error("satellite '{0}' has not been expanded")]
    NotExpanded(SubGridKey),

    /// Satellite already owns a sub-grid
    #[error("satellite '{0}' is already expanded")]
    AlreadyExpanded(SubGridKey),
}
