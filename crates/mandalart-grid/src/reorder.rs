//! Satellite reordering
//!
//! A [`Permutation`] says, for every physical slot `t`, which position's
//! content should end up at `t`. Applying it relocates the seed cells of the
//! center block together with their sub-grids. The center slot always maps to
//! itself.
//!
//! # Example
//!
//! ```
//! use mandalart_grid::{Grid, Permutation, SubGridKey};
//!
//! let grid = Grid::empty();
//! let mut order = Permutation::identity();
//! order.swap(SubGridKey::North, SubGridKey::South);
//!
//! let reordered = grid.reordered(&order);
//! assert_eq!(reordered.center.cells()[1], grid.center.cells()[7]);
//! ```

use crate::cell::CenterGrid;
use crate::grid::Grid;
use crate::position::{index_of, Position, SubGridKey, CANONICAL_ORDER, CENTER_INDEX, SLOT_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reasons a requested ordering is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// Same key listed twice
    #[error("key '{key}' appears at slots {first} and {second}")]
    DuplicateKey {
        /// Repeated key
        key: Position,
        /// First slot listing it
        first: usize,
        /// Second slot listing it
        second: usize,
    },

    /// A canonical key is absent from the ordering
    #[error("key '{0}' is missing from the ordering")]
    MissingKey(Position),

    /// The center key is not at the center slot
    #[error("center must stay at slot 4, found at slot {found_at}")]
    CenterMoved {
        /// Slot holding the center key
        found_at: usize,
    },
}

/// Validated bijection over the nine canonical positions, center fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct Permutation([Position; SLOT_COUNT]);

impl Permutation {
    /// The canonical order (no-op reorder)
    #[inline]
    #[must_use]
    pub fn identity() -> Self {
        Self(CANONICAL_ORDER)
    }

    /// Validate an ordering supplied by the caller
    ///
    /// `order[t]` is the key whose content should land on slot `t`.
    ///
    /// # Errors
    /// - [`ReorderError::DuplicateKey`] if a key repeats
    /// - [`ReorderError::MissingKey`] if a canonical key is absent
    /// - [`ReorderError::CenterMoved`] if `center` is not at slot 4
    pub fn new(order: &[Position]) -> Result<Self, ReorderError> {
        let mut seen: [Option<usize>; SLOT_COUNT] = [None; SLOT_COUNT];
        for (slot, key) in order.iter().enumerate() {
            if let Some(first) = seen[key.index()] {
                return Err(ReorderError::DuplicateKey {
                    key: *key,
                    first,
                    second: slot,
                });
            }
            seen[key.index()] = Some(slot);
        }

        if let Some(missing) = CANONICAL_ORDER.iter().find(|p| seen[p.index()].is_none()) {
            return Err(ReorderError::MissingKey(*missing));
        }

        // Distinct and complete: exactly one entry per slot from here on.
        if order[CENTER_INDEX] != Position::Center {
            let found_at = seen[CENTER_INDEX].unwrap_or(CENTER_INDEX);
            return Err(ReorderError::CenterMoved { found_at });
        }

        Ok(Self(std::array::from_fn(|slot| order[slot])))
    }

    /// Exchange the slots currently holding `a` and `b`
    ///
    /// This is the single drag-and-drop step; repeated swaps compose into an
    /// arbitrary permutation of the satellites.
    pub fn swap(&mut self, a: SubGridKey, b: SubGridKey) {
        let slot_a = self.slot_of(a.into());
        let slot_b = self.slot_of(b.into());
        self.0.swap(slot_a, slot_b);
    }

    /// Builder form of [`Permutation::swap`]
    #[inline]
    #[must_use]
    pub fn swapped(mut self, a: SubGridKey, b: SubGridKey) -> Self {
        self.swap(a, b);
        self
    }

    /// Key whose content lands on `target`
    #[inline]
    #[must_use]
    pub fn source_of(&self, target: Position) -> Position {
        self.0[target.index()]
    }

    /// Slot that currently lists `key`
    fn slot_of(&self, key: Position) -> usize {
        // Bijection: every key is present exactly once.
        self.0
            .iter()
            .position(|p| *p == key)
            .unwrap_or_else(|| key.index())
    }

    /// Whether this is the canonical order
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.0 == CANONICAL_ORDER
    }

    /// Keys in slot order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Position] {
        &self.0
    }

    /// Satellites whose content changes slot
    pub fn moved(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        CANONICAL_ORDER
            .iter()
            .zip(self.0.iter())
            .filter(|(target, source)| target != source)
            .map(|(target, source)| (*source, *target))
    }
}

impl Default for Permutation {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<Vec<Position>> for Permutation {
    type Error = ReorderError;

    fn try_from(order: Vec<Position>) -> Result<Self, Self::Error> {
        Self::new(&order)
    }
}

impl From<Permutation> for Vec<Position> {
    fn from(permutation: Permutation) -> Self {
        permutation.0.to_vec()
    }
}

/// Validate `new_order` and apply it to `grid`
///
/// The input grid is never modified; a new value is returned.
///
/// # Errors
/// Any [`ReorderError`] from [`Permutation::new`]. Nothing is computed for a
/// malformed ordering.
pub fn reorder(grid: &Grid, new_order: &[Position]) -> Result<Grid, ReorderError> {
    let permutation = Permutation::new(new_order)?;
    Ok(grid.reordered(&permutation))
}

impl Grid {
    /// Relocate seed cells and sub-grids according to `permutation`
    ///
    /// For each slot `t`, the seed cell at `t` becomes the old seed of
    /// `permutation[t]`, and the satellite at `t` receives that key's sub-grid.
    /// A source satellite that was never expanded leaves `t` unexpanded.
    #[must_use]
    pub fn reordered(&self, permutation: &Permutation) -> Grid {
        let cells = self.center.cells();
        let center = CenterGrid::from_cells(std::array::from_fn(|target| {
            cells[index_of(permutation.0[target])].clone()
        }));

        let mut sub_grids = BTreeMap::new();
        for (target, source) in CANONICAL_ORDER.iter().zip(permutation.0.iter()) {
            let (Some(target_key), Some(source_key)) = (target.sub_grid_key(), source.sub_grid_key())
            else {
                continue;
            };
            if let Some(sub) = self.sub_grids.get(&source_key) {
                sub_grids.insert(target_key, sub.clone());
            }
        }

        tracing::debug!(
            moved = permutation.moved().count(),
            expanded = sub_grids.len(),
            "reordered satellites"
        );

        Grid { center, sub_grids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use pretty_assertions::assert_eq;

    use Position::{Center as C, East as E, North as N, NorthEast as NE, NorthWest as NW};
    use Position::{South as S, SouthEast as SE, SouthWest as SW, West as W};

    fn labeled_grid() -> Grid {
        let center = CenterGrid::from_cells(std::array::from_fn(|i| {
            Cell::with_id(format!("c{i}")).labeled(CANONICAL_ORDER[i].as_str())
        }));
        let mut grid = Grid::new(center, BTreeMap::new());
        grid.expand(SubGridKey::North).unwrap();
        grid.expand(SubGridKey::East).unwrap();
        grid
    }

    #[test]
    fn identity_is_value_equal() {
        let grid = labeled_grid();
        let out = reorder(&grid, &CANONICAL_ORDER).unwrap();
        assert_eq!(out, grid);
        assert!(Permutation::identity().is_identity());
    }

    #[test]
    fn swap_north_south_moves_seed_and_sub_grid() {
        let grid = labeled_grid();
        let order = [NW, S, NE, W, C, E, SW, N, SE];
        let out = reorder(&grid, &order).unwrap();

        assert_eq!(out.center.cells()[1], grid.center.cells()[7]);
        assert_eq!(out.center.cells()[7], grid.center.cells()[1]);
        for i in [0, 2, 3, 4, 5, 6, 8] {
            assert_eq!(out.center.cells()[i], grid.center.cells()[i]);
        }

        // North was expanded, South was not: the omission follows the move.
        assert_eq!(out.sub_grid(SubGridKey::South), grid.sub_grid(SubGridKey::North));
        assert!(!out.is_expanded(SubGridKey::North));
        assert_eq!(out.sub_grid(SubGridKey::East), grid.sub_grid(SubGridKey::East));
    }

    #[test]
    fn swap_builder_matches_explicit_order() {
        let perm = Permutation::identity().swapped(SubGridKey::North, SubGridKey::South);
        assert_eq!(perm.as_slice(), &[NW, S, NE, W, C, E, SW, N, SE]);
        assert_eq!(perm.source_of(N), S);
    }

    #[test]
    fn swaps_compose_into_rotation() {
        // NW <- N <- NE <- NW
        let perm = Permutation::identity()
            .swapped(SubGridKey::NorthWest, SubGridKey::North)
            .swapped(SubGridKey::NorthWest, SubGridKey::NorthEast);
        assert_eq!(perm.as_slice()[..3], [N, NE, NW][..]);
        assert_eq!(perm.moved().count(), 3);
    }

    #[test]
    fn input_grid_is_untouched() {
        let grid = labeled_grid();
        let before = grid.clone();
        let _ = reorder(&grid, &[SE, N, NE, W, C, E, SW, S, NW]).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn rejects_short_ordering_with_missing_key() {
        let err = Permutation::new(&[NW, N, NE, W, C, E, SW, S]).unwrap_err();
        assert_eq!(err, ReorderError::MissingKey(SE));
    }

    #[test]
    fn rejects_long_ordering_as_duplicate() {
        let err = Permutation::new(&[NW, N, NE, W, C, E, SW, S, SE, NW]).unwrap_err();
        assert_eq!(err, ReorderError::DuplicateKey { key: NW, first: 0, second: 9 });
    }

    #[test]
    fn rejects_duplicate_key() {
        let err = Permutation::new(&[NW, N, N, W, C, E, SW, S, SE]).unwrap_err();
        assert_eq!(err, ReorderError::DuplicateKey { key: N, first: 1, second: 2 });
    }

    #[test]
    fn rejects_moved_center() {
        let err = Permutation::new(&[C, N, NE, W, NW, E, SW, S, SE]).unwrap_err();
        assert_eq!(err, ReorderError::CenterMoved { found_at: 0 });
    }

    #[test]
    fn permutation_deserializes_with_validation() {
        let ok: Permutation = serde_json::from_str(
            r#"["northWest","south","northEast","west","center","east","southWest","north","southEast"]"#,
        )
        .unwrap();
        assert_eq!(ok.source_of(S), N);

        let bad = serde_json::from_str::<Permutation>(r#"["center"]"#);
        assert!(bad.is_err());
    }
}
