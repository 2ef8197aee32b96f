//! Mandalart Grid
//!
//! The 9x9 goal board and the operations that recompose it.
//!
//! # Overview
//!
//! - **Position**: canonical slot layout of a 3x3 block ([`CANONICAL_ORDER`])
//! - **Cell / CenterGrid**: the atomic unit and exactly-nine-cell blocks
//! - **Grid**: center block plus a partial map of expanded satellites
//! - **Permutation**: validated satellite reordering, center fixed
//!
//! # Example
//!
//! ```rust
//! use mandalart_grid::{reorder, Coordinate, Grid, GridKey, Position, SubGridKey};
//!
//! let mut grid = Grid::empty();
//! grid.set_label(Coordinate::try_new(GridKey::Center, 1).unwrap(), "Health").unwrap();
//! grid.expand(SubGridKey::North).unwrap();
//!
//! // Move North's content to South
//! use Position::*;
//! let order = [NorthWest, South, NorthEast, West, Center, East, SouthWest, North, SouthEast];
//! let moved = reorder(&grid, &order).unwrap();
//!
//! assert_eq!(moved.seed(SubGridKey::South).label, "Health");
//! assert!(moved.is_expanded(SubGridKey::South));
//! assert!(!moved.is_expanded(SubGridKey::North));
//! ```

#![warn(missing_docs)]

pub mod cell;
pub mod error;
pub mod grid;
pub mod position;
pub mod reorder;

// Re-exports
pub use cell::{Cell, CellIndex, CenterGrid};
pub use error::GridError;
pub use grid::{Coordinate, Grid, GridKey, Progress, SeedRename};
pub use position::{
    center_index_for_sub_grid_key, index_of, Position, SubGridKey, CANONICAL_ORDER, CENTER_INDEX,
    SLOT_COUNT,
};
pub use reorder::{reorder, Permutation, ReorderError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for grid operations
    pub use crate::{
        Cell, CellIndex, CenterGrid, Coordinate, Grid, GridError, GridKey, Permutation, Position,
        ReorderError, SubGridKey,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
