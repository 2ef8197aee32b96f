//! The full 9x9 board
//!
//! A [`Grid`] is one center block plus a *partial* map of satellite
//! sub-grids. An absent entry means the satellite was never expanded, which
//! is distinct from an expanded-but-blank sub-grid; reordering depends on the
//! difference.

use crate::cell::{Cell, CellIndex, CenterGrid};
use crate::error::GridError;
use crate::position::{Position, SubGridKey, CENTER_INDEX};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Which 3x3 block of the board a coordinate refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Position", into = "Position")]
pub enum GridKey {
    /// The center block
    Center,
    /// A satellite sub-grid
    Sub(SubGridKey),
}

impl From<Position> for GridKey {
    fn from(position: Position) -> Self {
        position.sub_grid_key().map_or(GridKey::Center, GridKey::Sub)
    }
}

impl From<GridKey> for Position {
    fn from(key: GridKey) -> Self {
        match key {
            GridKey::Center => Position::Center,
            GridKey::Sub(sub) => sub.into(),
        }
    }
}

impl From<SubGridKey> for GridKey {
    fn from(key: SubGridKey) -> Self {
        GridKey::Sub(key)
    }
}

impl FromStr for GridKey {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_str(s).map(Self::from)
    }
}

impl Display for GridKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&Position::from(*self), f)
    }
}

/// Address of one cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Block containing the cell
    pub grid: GridKey,
    /// Index within that block
    pub cell: CellIndex,
}

impl Coordinate {
    /// Create coordinate from already-validated parts
    #[inline]
    #[must_use]
    pub fn new(grid: impl Into<GridKey>, cell: CellIndex) -> Self {
        Self {
            grid: grid.into(),
            cell,
        }
    }

    /// Create coordinate from a raw cell index
    pub fn try_new(grid: impl Into<GridKey>, index: usize) -> Result<Self, GridError> {
        Ok(Self::new(grid, CellIndex::new(index)?))
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.grid, self.cell.get())
    }
}

/// What to do with an expanded satellite when its seed is renamed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedRename {
    /// Change the seed label only
    #[default]
    KeepSubGrid,
    /// Replace the satellite's sub-grid with a blank one seeded by the new label
    ResetSubGrid,
}

/// Completion counts over non-blank task cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    /// Completed tasks
    pub completed: usize,
    /// Non-blank tasks
    pub total: usize,
}

impl Progress {
    /// Fraction completed, `0.0` when there are no tasks
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Full 9x9 board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    /// Center block; cell 4 is the main goal, the rest are seeds
    pub center: CenterGrid,
    /// Expanded satellites only
    #[serde(default, deserialize_with = "skip_null_sub_grids")]
    pub sub_grids: BTreeMap<SubGridKey, CenterGrid>,
}

// `{"north": null}` is how an unexpanded satellite sometimes arrives from storage.
fn skip_null_sub_grids<'de, D>(deserializer: D) -> Result<BTreeMap<SubGridKey, CenterGrid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<SubGridKey, Option<CenterGrid>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, grid)| grid.map(|g| (key, g)))
        .collect())
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// Blank board with no expanded satellites
    #[must_use]
    pub fn empty() -> Self {
        Self {
            center: CenterGrid::empty(),
            sub_grids: BTreeMap::new(),
        }
    }

    /// Board from parts
    #[inline]
    #[must_use]
    pub fn new(center: CenterGrid, sub_grids: BTreeMap<SubGridKey, CenterGrid>) -> Self {
        Self { center, sub_grids }
    }

    /// The top-level goal (center cell of the center block)
    #[inline]
    #[must_use]
    pub fn main_goal(&self) -> &Cell {
        self.center.center()
    }

    /// Seed cell of a satellite within the center block
    #[inline]
    #[must_use]
    pub fn seed(&self, key: SubGridKey) -> &Cell {
        &self.center[Position::from(key)]
    }

    /// Sub-grid of a satellite, if expanded
    #[inline]
    #[must_use]
    pub fn sub_grid(&self, key: SubGridKey) -> Option<&CenterGrid> {
        self.sub_grids.get(&key)
    }

    /// Whether a satellite owns a sub-grid
    #[inline]
    #[must_use]
    pub fn is_expanded(&self, key: SubGridKey) -> bool {
        self.sub_grids.contains_key(&key)
    }

    /// Whether a satellite is expanded and has any non-blank cell
    #[must_use]
    pub fn has_content(&self, key: SubGridKey) -> bool {
        self.sub_grid(key).is_some_and(CenterGrid::has_content)
    }

    /// Look up a cell
    pub fn cell(&self, coord: Coordinate) -> Result<&Cell, GridError> {
        match coord.grid {
            GridKey::Center => Ok(&self.center[coord.cell]),
            GridKey::Sub(key) => self
                .sub_grids
                .get(&key)
                .map(|g| &g[coord.cell])
                .ok_or(GridError::NotExpanded(key)),
        }
    }

    fn cell_mut(&mut self, coord: Coordinate) -> Result<&mut Cell, GridError> {
        match coord.grid {
            GridKey::Center => Ok(&mut self.center[coord.cell]),
            GridKey::Sub(key) => self
                .sub_grids
                .get_mut(&key)
                .map(|g| &mut g[coord.cell])
                .ok_or(GridError::NotExpanded(key)),
        }
    }

    /// Expand a satellite into a blank sub-grid seeded with its current label
    pub fn expand(&mut self, key: SubGridKey) -> Result<&CenterGrid, GridError> {
        if self.is_expanded(key) {
            return Err(GridError::AlreadyExpanded(key));
        }
        let seed = self.seed(key).label.clone();
        tracing::debug!(satellite = %key, seed = %seed, "expanding satellite");
        Ok(&*self
            .sub_grids
            .entry(key)
            .or_insert_with(|| CenterGrid::seeded(seed)))
    }

    /// Set a cell's label
    ///
    /// Returns `Ok(false)` when the label is unchanged.
    pub fn set_label(&mut self, coord: Coordinate, label: impl Into<String>) -> Result<bool, GridError> {
        let label = label.into();
        let cell = self.cell_mut(coord)?;
        if cell.label == label {
            return Ok(false);
        }
        cell.label = label;
        Ok(true)
    }

    /// Set a cell's completion state
    ///
    /// Returns `Ok(false)` when the state is unchanged.
    pub fn set_completed(&mut self, coord: Coordinate, completed: bool) -> Result<bool, GridError> {
        let cell = self.cell_mut(coord)?;
        if cell.completed == completed {
            return Ok(false);
        }
        cell.completed = completed;
        Ok(true)
    }

    /// Rename a satellite's seed cell in the center block
    ///
    /// With [`SeedRename::ResetSubGrid`] an expanded satellite is replaced by a
    /// blank sub-grid seeded with the new label; an unexpanded one stays
    /// unexpanded. Returns `false` when the label is unchanged (nothing reset).
    pub fn rename_seed(&mut self, key: SubGridKey, label: impl Into<String>, mode: SeedRename) -> bool {
        let label = label.into();
        let seed = &mut self.center[Position::from(key)];
        if seed.label == label {
            return false;
        }
        seed.label.clone_from(&label);

        if mode == SeedRename::ResetSubGrid {
            if let Some(sub) = self.sub_grids.get_mut(&key) {
                tracing::debug!(satellite = %key, "resetting sub-grid after seed rename");
                *sub = CenterGrid::seeded(label);
            }
        }
        true
    }

    /// Satellites whose sub-grid center no longer matches the seed label
    #[must_use]
    pub fn drifted_seeds(&self) -> Vec<SubGridKey> {
        self.sub_grids
            .iter()
            .filter(|(key, sub)| sub.center().label != self.seed(**key).label)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Completion counts over non-blank task cells of expanded satellites
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.sub_grids
            .values()
            .flat_map(|sub| {
                sub.iter()
                    .enumerate()
                    .filter(|(i, c)| *i != CENTER_INDEX && !c.is_blank())
                    .map(|(_, c)| c)
            })
            .fold(Progress::default(), |mut acc, cell| {
                acc.total += 1;
                if cell.completed {
                    acc.completed += 1;
                }
                acc
            })
    }
}
