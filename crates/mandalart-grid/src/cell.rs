//! Cells and 3x3 blocks
//!
//! A [`Cell`] is the atomic unit of a board. A [`CenterGrid`] is exactly nine
//! cells in reading order; the fixed-size array makes the length invariant a
//! property of the type, and deserializing any other length fails.

use crate::error::GridError;
use crate::position::{Position, CENTER_INDEX, SLOT_COUNT};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use uuid::Uuid;

/// A single goal or task cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Stable identifier
    pub id: String,
    /// Free text
    pub label: String,
    /// Checkbox state
    pub completed: bool,
    /// Optional display color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Cell {
    /// Create a blank cell with a fresh id
    #[must_use]
    pub fn empty() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Create a blank cell with the given id
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            completed: false,
            color: None,
        }
    }

    /// Set label (builder style)
    #[inline]
    #[must_use]
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Whether the label is blank (whitespace counts as blank)
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.label.trim().is_empty()
    }
}

/// Validated index (0..=8) of a cell within a 3x3 block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CellIndex(usize);

impl CellIndex {
    /// The center cell of a block
    pub const CENTER: CellIndex = CellIndex(CENTER_INDEX);

    /// Validate a raw index
    pub fn new(index: usize) -> Result<Self, GridError> {
        if index < SLOT_COUNT {
            Ok(Self(index))
        } else {
            Err(GridError::CellIndexOutOfRange(index))
        }
    }

    /// Raw index
    #[inline]
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    /// Whether this is the center cell of its block
    #[inline]
    #[must_use]
    pub fn is_center(self) -> bool {
        self.0 == CENTER_INDEX
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = GridError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<CellIndex> for usize {
    fn from(index: CellIndex) -> Self {
        index.0
    }
}

impl From<Position> for CellIndex {
    fn from(position: Position) -> Self {
        Self(position.index())
    }
}

/// Exactly nine cells in reading order; index 4 is the block's center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CenterGrid([Cell; SLOT_COUNT]);

impl CenterGrid {
    /// Nine blank cells with fresh ids
    #[must_use]
    pub fn empty() -> Self {
        Self(std::array::from_fn(|_| Cell::empty()))
    }

    /// Nine blank cells whose center carries `seed` as its label
    #[must_use]
    pub fn seeded(seed: impl Into<String>) -> Self {
        let mut grid = Self::empty();
        grid.0[CENTER_INDEX].label = seed.into();
        grid
    }

    /// Wrap an existing array of cells
    #[inline]
    #[must_use]
    pub fn from_cells(cells: [Cell; SLOT_COUNT]) -> Self {
        Self(cells)
    }

    /// Cells in reading order
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell; SLOT_COUNT] {
        &self.0
    }

    /// Center cell of this block
    #[inline]
    #[must_use]
    pub fn center(&self) -> &Cell {
        &self.0[CENTER_INDEX]
    }

    /// Iterate cells in reading order
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.0.iter()
    }

    /// Whether any cell has a non-blank label
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.0.iter().any(|c| !c.is_blank())
    }
}

impl Index<CellIndex> for CenterGrid {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Cell {
        &self.0[index.0]
    }
}

impl IndexMut<CellIndex> for CenterGrid {
    fn index_mut(&mut self, index: CellIndex) -> &mut Cell {
        &mut self.0[index.0]
    }
}

impl Index<Position> for CenterGrid {
    type Output = Cell;

    fn index(&self, position: Position) -> &Cell {
        &self.0[position.index()]
    }
}

impl IndexMut<Position> for CenterGrid {
    fn index_mut(&mut self, position: Position) -> &mut Cell {
        &mut self.0[position.index()]
    }
}

impl<'a> IntoIterator for &'a CenterGrid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_have_unique_ids() {
        let grid = CenterGrid::empty();
        let mut ids: Vec<&str> = grid.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SLOT_COUNT);
        assert!(!grid.has_content());
    }

    #[test]
    fn seeded_grid_labels_center_only() {
        let grid = CenterGrid::seeded("Health");
        assert_eq!(grid.center().label, "Health");
        assert_eq!(grid.iter().filter(|c| !c.is_blank()).count(), 1);
    }

    #[test]
    fn cell_index_bounds() {
        assert!(CellIndex::new(8).is_ok());
        assert_eq!(CellIndex::new(9), Err(GridError::CellIndexOutOfRange(9)));
        assert!(CellIndex::CENTER.is_center());
        assert!(!CellIndex::new(0).unwrap().is_center());
    }

    #[test]
    fn whitespace_label_is_blank() {
        assert!(Cell::with_id("a").labeled("   ").is_blank());
        assert!(!Cell::with_id("a").labeled("run").is_blank());
    }

    #[test]
    fn deserialize_rejects_short_grid() {
        let cells: Vec<Cell> = (0..8).map(|i| Cell::with_id(format!("c{i}"))).collect();
        let json = serde_json::to_string(&cells).unwrap();
        assert!(serde_json::from_str::<CenterGrid>(&json).is_err());
    }

    #[test]
    fn color_omitted_when_absent() {
        let json = serde_json::to_value(Cell::with_id("x")).unwrap();
        assert!(json.get("color").is_none());
        assert_eq!(json["completed"], false);
    }
}
