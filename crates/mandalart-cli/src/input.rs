//! Command-line argument parsing and grid input

use anyhow::{Context, Result};
use mandalart_grid::{Coordinate, Grid, GridKey, Position, SubGridKey};
use std::io::Read;
use std::path::Path;

/// Parse `grid:cell`, e.g. `center:4` or `north:7`
pub fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (grid, cell) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <grid>:<cell>, got {s:?}"))?;
    let grid: GridKey = grid.parse().map_err(|e| format!("{e}"))?;
    let cell: usize = cell
        .parse()
        .map_err(|_| format!("cell index must be a number, got {cell:?}"))?;
    Coordinate::try_new(grid, cell).map_err(|e| e.to_string())
}

/// Parse `a:b`, a pair of satellites to swap
pub fn parse_swap(s: &str) -> Result<(SubGridKey, SubGridKey), String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <satellite>:<satellite>, got {s:?}"))?;
    let a: SubGridKey = a.parse().map_err(|e| format!("{e}"))?;
    let b: SubGridKey = b.parse().map_err(|e| format!("{e}"))?;
    Ok((a, b))
}

/// Parse a comma-separated list of nine keys
///
/// Only the key names are checked here; bijection rules are checked when the
/// permutation is built.
pub fn parse_order(s: &str) -> Result<Vec<Position>, String> {
    s.split(',')
        .map(|key| key.trim().parse::<Position>().map_err(|e| e.to_string()))
        .collect()
}

/// Read a grid as JSON from a file, or from stdin when `path` is `-`
pub fn read_grid(path: &Path) -> Result<Grid> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading grid from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing grid JSON from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_parses() {
        let c = parse_coordinate("north:7").unwrap();
        assert_eq!(c.grid, GridKey::Sub(SubGridKey::North));
        assert_eq!(c.cell.get(), 7);
        assert_eq!(parse_coordinate("center:4").unwrap().grid, GridKey::Center);
    }

    #[test]
    fn coordinate_rejects_bad_input() {
        assert!(parse_coordinate("north").is_err());
        assert!(parse_coordinate("north:x").is_err());
        assert!(parse_coordinate("north:9").is_err());
        assert!(parse_coordinate("up:1").is_err());
    }

    #[test]
    fn swap_rejects_center() {
        assert!(parse_swap("center:north").is_err());
        assert_eq!(
            parse_swap("east:west").unwrap(),
            (SubGridKey::East, SubGridKey::West)
        );
    }

    #[test]
    fn order_parses_names() {
        let order = parse_order("northWest, south,northEast,west,center,east,southWest,north,southEast")
            .unwrap();
        assert_eq!(order.len(), 9);
        assert_eq!(order[1], Position::South);
        assert!(parse_order("northWest,nowhere").is_err());
    }
}
