//! Pending edits between saves
//!
//! [`EditBatch`] applies edits to a [`Grid`] and remembers which coordinates
//! actually changed, so a save can be tagged with a single category.

use crate::category::{self, VersionCategory};
use mandalart_grid::{CellIndex, Coordinate, Grid, GridError, GridKey, Position, SeedRename, SubGridKey};

/// Coordinates touched since the last save, in first-touched order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBatch {
    touched: Vec<Coordinate>,
}

impl EditBatch {
    /// Empty batch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touched coordinate (duplicates are ignored)
    pub fn record(&mut self, coord: Coordinate) {
        if !self.touched.contains(&coord) {
            self.touched.push(coord);
        }
    }

    /// Touched coordinates
    #[inline]
    #[must_use]
    pub fn touched(&self) -> &[Coordinate] {
        &self.touched
    }

    /// Number of distinct touched coordinates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.touched.len()
    }

    /// Whether nothing was touched
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    /// Forget all touched coordinates (after a successful save)
    pub fn clear(&mut self) {
        self.touched.clear();
    }

    /// Single category for the whole batch
    #[must_use]
    pub fn resolve(&self) -> Option<VersionCategory> {
        category::resolve(self.touched.iter().copied())
    }

    /// Set a label and record the coordinate if it changed
    pub fn set_label(
        &mut self,
        grid: &mut Grid,
        coord: Coordinate,
        label: impl Into<String>,
    ) -> Result<bool, GridError> {
        let changed = grid.set_label(coord, label)?;
        if changed {
            self.record(coord);
        }
        Ok(changed)
    }

    /// Set a completion flag and record the coordinate if it changed
    pub fn set_completed(
        &mut self,
        grid: &mut Grid,
        coord: Coordinate,
        completed: bool,
    ) -> Result<bool, GridError> {
        let changed = grid.set_completed(coord, completed)?;
        if changed {
            self.record(coord);
        }
        Ok(changed)
    }

    /// Rename a seed cell and record it as a center-block edit
    pub fn rename_seed(
        &mut self,
        grid: &mut Grid,
        key: SubGridKey,
        label: impl Into<String>,
        mode: SeedRename,
    ) -> bool {
        let changed = grid.rename_seed(key, label, mode);
        if changed {
            let seed = CellIndex::from(Position::from(key));
            self.record(Coordinate::new(GridKey::Center, seed));
        }
        changed
    }
}

impl Extend<Coordinate> for EditBatch {
    fn extend<T: IntoIterator<Item = Coordinate>>(&mut self, iter: T) {
        for coord in iter {
            self.record(coord);
        }
    }
}

impl FromIterator<Coordinate> for EditBatch {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        let mut batch = Self::new();
        batch.extend(iter);
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(grid: impl Into<GridKey>, index: usize) -> Coordinate {
        Coordinate::try_new(grid, index).unwrap()
    }

    #[test]
    fn unchanged_edit_is_not_recorded() {
        let mut grid = Grid::empty();
        let mut batch = EditBatch::new();
        assert!(!batch.set_label(&mut grid, at(GridKey::Center, 4), "").unwrap());
        assert!(batch.is_empty());
        assert_eq!(batch.resolve(), None);
    }

    #[test]
    fn records_distinct_coordinates() {
        let mut grid = Grid::empty();
        grid.expand(SubGridKey::North).unwrap();
        let mut batch = EditBatch::new();

        batch.set_label(&mut grid, at(SubGridKey::North, 0), "a").unwrap();
        batch.set_label(&mut grid, at(SubGridKey::North, 0), "b").unwrap();
        batch.set_completed(&mut grid, at(SubGridKey::North, 1), true).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.resolve(), Some(VersionCategory::EditTask));
    }

    #[test]
    fn seed_rename_counts_as_sub_goal() {
        let mut grid = Grid::empty();
        let mut batch = EditBatch::new();
        assert!(batch.rename_seed(&mut grid, SubGridKey::SouthEast, "Travel", SeedRename::KeepSubGrid));
        assert_eq!(batch.touched(), &[at(GridKey::Center, 8)]);
        assert_eq!(batch.resolve(), Some(VersionCategory::EditSub));
    }

    #[test]
    fn failed_edit_leaves_batch_unchanged() {
        let mut grid = Grid::empty();
        let mut batch = EditBatch::new();
        assert!(batch.set_label(&mut grid, at(SubGridKey::West, 2), "x").is_err());
        assert!(batch.is_empty());
    }

    #[test]
    fn collects_from_iterator() {
        let batch: EditBatch = [at(GridKey::Center, 1), at(GridKey::Center, 1), at(GridKey::Center, 4)]
            .into_iter()
            .collect();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.resolve(), Some(VersionCategory::EditMain));
    }
}
