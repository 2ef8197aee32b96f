//! Testing utilities for the mandalart workspace
//!
//! Shared fixtures with deterministic cell ids, so tests can compare boards
//! by value and trace where a cell came from.

#![allow(missing_docs)]

use mandalart_grid::{Cell, CellIndex, CenterGrid, Coordinate, Grid, GridKey, SubGridKey, CANONICAL_ORDER};
use mandalart_version::{InMemoryVersionStore, ServiceConfig, StaticAccessControl, UserId, VersionService};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const TEST_USER: &str = "test-user";

pub type TestService = VersionService<InMemoryVersionStore, StaticAccessControl>;

/// Block of nine blank cells with ids `{prefix}-0` .. `{prefix}-8`
pub fn block(prefix: &str) -> CenterGrid {
    CenterGrid::from_cells(std::array::from_fn(|i| Cell::with_id(format!("{prefix}-{i}"))))
}

/// Center block whose seeds are labeled with their compass names and whose
/// center reads `"main"`
pub fn labeled_center() -> CenterGrid {
    CenterGrid::from_cells(std::array::from_fn(|i| {
        let label = match CANONICAL_ORDER[i].sub_grid_key() {
            Some(key) => key.as_str().to_string(),
            None => "main".to_string(),
        };
        Cell::with_id(format!("center-{i}")).labeled(label)
    }))
}

/// Labeled board with the given satellites expanded
///
/// Each expanded sub-grid has ids `{key}-{i}` and its center mirrors the seed.
pub fn grid_with_expanded(keys: &[SubGridKey]) -> Grid {
    let mut sub_grids = BTreeMap::new();
    for key in keys {
        let mut sub = block(key.as_str());
        sub[CellIndex::CENTER].label = key.as_str().to_string();
        sub_grids.insert(*key, sub);
    }
    Grid::new(labeled_center(), sub_grids)
}

/// Labeled board with every satellite expanded
pub fn full_grid() -> Grid {
    grid_with_expanded(&SubGridKey::ALL)
}

/// Coordinate shorthand; panics on an out-of-range index
pub fn coord(grid: impl Into<GridKey>, index: usize) -> Coordinate {
    Coordinate::try_new(grid, index).unwrap()
}

pub fn test_user() -> UserId {
    UserId::new(TEST_USER)
}

/// Service over fresh in-memory collaborators with [`TEST_USER`] authenticated
pub fn setup_test_service() -> (TestService, Arc<InMemoryVersionStore>, Arc<StaticAccessControl>) {
    setup_test_service_with(ServiceConfig::default())
}

pub fn setup_test_service_with(
    config: ServiceConfig,
) -> (TestService, Arc<InMemoryVersionStore>, Arc<StaticAccessControl>) {
    let store = Arc::new(InMemoryVersionStore::new());
    let access = Arc::new(StaticAccessControl::with_users([TEST_USER]));
    let service = VersionService::new(Arc::clone(&store), Arc::clone(&access), config);
    (service, store, access)
}
