//! Version categories and edit classification
//!
//! Every saved version carries one [`VersionCategory`]. Edits are classified
//! from the coordinate that was touched; a batch of edits resolves to the
//! highest-priority category among them.

use mandalart_grid::{CellIndex, Coordinate, GridKey};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Kind of change a saved version records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionCategory {
    /// First version of a project
    Create,
    /// Main goal (center of the center block) changed
    EditMain,
    /// A sub-goal changed (center seed, or a satellite's own center)
    EditSub,
    /// A task cell of a satellite changed
    EditTask,
    /// Satellites were permuted
    Reorder,
}

impl VersionCategory {
    /// All categories
    pub const ALL: [VersionCategory; 5] = [
        VersionCategory::Create,
        VersionCategory::EditMain,
        VersionCategory::EditSub,
        VersionCategory::EditTask,
        VersionCategory::Reorder,
    ];

    /// Wire tag (`"EDIT_MAIN"`, ...)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VersionCategory::Create => "CREATE",
            VersionCategory::EditMain => "EDIT_MAIN",
            VersionCategory::EditSub => "EDIT_SUB",
            VersionCategory::EditTask => "EDIT_TASK",
            VersionCategory::Reorder => "REORDER",
        }
    }

    /// Human-readable label for history views
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VersionCategory::Create => "Created",
            VersionCategory::EditMain => "Main goal",
            VersionCategory::EditSub => "Sub goal",
            VersionCategory::EditTask => "Task",
            VersionCategory::Reorder => "Reorder",
        }
    }

    /// Rank among cell-edit categories; `None` for `Create` and `Reorder`
    #[must_use]
    pub fn edit_rank(self) -> Option<u8> {
        match self {
            VersionCategory::EditMain => Some(3),
            VersionCategory::EditSub => Some(2),
            VersionCategory::EditTask => Some(1),
            VersionCategory::Create | VersionCategory::Reorder => None,
        }
    }
}

impl Display for VersionCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized category tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown version category: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for VersionCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Category of a single cell edit
///
/// | grid      | cell | category    |
/// |-----------|------|-------------|
/// | center    | 4    | `EditMain`  |
/// | center    | ≠4   | `EditSub`   |
/// | satellite | 4    | `EditSub`   |
/// | satellite | ≠4   | `EditTask`  |
#[must_use]
pub fn classify(grid: GridKey, cell: CellIndex) -> VersionCategory {
    match (grid, cell.is_center()) {
        (GridKey::Center, true) => VersionCategory::EditMain,
        (GridKey::Center, false) | (GridKey::Sub(_), true) => VersionCategory::EditSub,
        (GridKey::Sub(_), false) => VersionCategory::EditTask,
    }
}

/// [`classify`] for a [`Coordinate`]
#[inline]
#[must_use]
pub fn classify_coordinate(coord: Coordinate) -> VersionCategory {
    classify(coord.grid, coord.cell)
}

/// Resolve a batch of touched coordinates to one category
///
/// Priority is `EditMain > EditSub > EditTask`; scanning stops at the first
/// `EditMain`. Returns `None` for an empty batch.
pub fn resolve<I>(touched: I) -> Option<VersionCategory>
where
    I: IntoIterator<Item = Coordinate>,
{
    let mut best: Option<VersionCategory> = None;
    for coord in touched {
        let category = classify_coordinate(coord);
        if category == VersionCategory::EditMain {
            return Some(category);
        }
        if best.and_then(VersionCategory::edit_rank) < category.edit_rank() {
            best = Some(category);
        }
    }
    best
}
