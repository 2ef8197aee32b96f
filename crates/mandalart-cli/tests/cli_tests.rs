use mandalart_cli::{parse_swap, read_grid, replay, Step};
use mandalart_grid::{Coordinate, GridKey, Permutation, SubGridKey};
use mandalart_test_utils::{full_grid, grid_with_expanded};
use mandalart_version::{ServiceConfig, VersionCategory};
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn grid_file_round_trips_through_reader() {
    let grid = grid_with_expanded(&[SubGridKey::East, SubGridKey::SouthWest]);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&grid).unwrap().as_bytes())
        .unwrap();

    let loaded = read_grid(file.path()).unwrap();
    assert_eq!(loaded, grid);
}

#[test]
fn malformed_grid_file_names_the_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"center": [], "subGrids": {}}"#).unwrap();

    let err = read_grid(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains(&file.path().display().to_string()));
}

#[test]
fn swaps_from_arguments_match_full_order() {
    let grid = full_grid();
    let by_swaps = ["north:south", "east:north"]
        .iter()
        .map(|s| parse_swap(s).unwrap())
        .fold(Permutation::identity(), |p, (a, b)| p.swapped(a, b));

    let reordered = grid.reordered(&by_swaps);
    let by_order = mandalart_grid::reorder(&grid, by_swaps.as_slice()).unwrap();
    assert_eq!(reordered, by_order);
}

#[tokio::test]
async fn replay_from_existing_board() {
    let initial = full_grid();
    let script = vec![
        Step::Complete {
            at: Coordinate::try_new(SubGridKey::North, 0).unwrap(),
            completed: true,
        },
        Step::Save { note: None },
        Step::RenameSeed {
            key: SubGridKey::West,
            label: "Family".into(),
            reset: false,
        },
        Step::Label {
            at: Coordinate::try_new(GridKey::Center, 4).unwrap(),
            label: "Best year".into(),
        },
        Step::Save {
            note: Some("big change".into()),
        },
    ];

    let report = replay(initial, &script, ServiceConfig::default()).await.unwrap();
    let categories: Vec<_> = report.saved().map(|s| s.category).collect();
    assert_eq!(
        categories,
        vec![
            VersionCategory::Create,
            VersionCategory::EditTask,
            VersionCategory::EditMain,
        ]
    );
    assert_eq!(report.history[2].note, "big change");
    assert_eq!(report.grid.drifted_seeds(), vec![SubGridKey::West]);
}
