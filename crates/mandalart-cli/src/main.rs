//! `mandalart` command-line tool for composing and reordering goal boards

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mandalart_cli::{init_logging, parse_coordinate, parse_order, parse_swap, read_grid, replay, Step};
use mandalart_grid::{Coordinate, Grid, Permutation, Position, SubGridKey};
use mandalart_version::{classify_coordinate, resolve, ServiceConfig};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .default_value("-")
        .value_parser(value_parser!(PathBuf))
        .help("Grid JSON file, or - for stdin")
}

fn cli() -> Command {
    Command::new("mandalart")
        .version(mandalart_grid::VERSION)
        .about("Compose, classify and reorder 9x9 mandalart boards")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Service configuration (TOML)"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Pretty-print JSON output"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(Command::new("new").about("Print an empty board"))
        .subcommand(
            Command::new("classify")
                .about("Classify edited cells into a version category")
                .arg(
                    Arg::new("at")
                        .long("at")
                        .required(true)
                        .action(ArgAction::Append)
                        .value_parser(parse_coordinate)
                        .help("Edited cell as <grid>:<index>, e.g. north:7"),
                ),
        )
        .subcommand(
            Command::new("reorder")
                .about("Move satellites to new slots")
                .arg(input_arg())
                .arg(
                    Arg::new("order")
                        .long("order")
                        .value_parser(parse_order)
                        .conflicts_with("swap")
                        .help("Nine comma-separated keys, the source for each slot"),
                )
                .arg(
                    Arg::new("swap")
                        .long("swap")
                        .action(ArgAction::Append)
                        .value_parser(parse_swap)
                        .help("Exchange two satellites, e.g. north:south (repeatable)"),
                ),
        )
        .subcommand(
            Command::new("expand")
                .about("Expand a satellite into its own block")
                .arg(input_arg())
                .arg(
                    Arg::new("key")
                        .long("key")
                        .required(true)
                        .value_parser(|s: &str| s.parse::<SubGridKey>().map_err(|e| e.to_string()))
                        .help("Satellite to expand"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Report progress and seeds out of sync with their blocks")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("replay")
                .about("Run a scripted editing session and print its history")
                .arg(
                    Arg::new("script")
                        .long("script")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of steps"),
                )
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .value_parser(value_parser!(PathBuf))
                        .help("Initial grid JSON (defaults to an empty board)"),
                ),
        )
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<ServiceConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(ServiceConfig::default()),
    }
}

fn input_path(args: &ArgMatches) -> &Path {
    args.get_one::<PathBuf>("input")
        .map_or(Path::new("-"), PathBuf::as_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("log-json"));
    let pretty = matches.get_flag("pretty");

    match matches.subcommand() {
        Some(("new", _)) => emit(&Grid::empty(), pretty),
        Some(("classify", args)) => {
            let coords: Vec<Coordinate> = args
                .get_many::<Coordinate>("at")
                .into_iter()
                .flatten()
                .copied()
                .collect();
            let edits: Vec<_> = coords
                .iter()
                .map(|c| json!({ "at": c.to_string(), "category": classify_coordinate(*c) }))
                .collect();
            let resolved = resolve(coords.iter().copied());
            tracing::debug!(count = coords.len(), ?resolved, "classified edits");
            emit(&json!({ "edits": edits, "resolved": resolved }), pretty)
        }
        Some(("reorder", args)) => {
            let grid = read_grid(input_path(args))?;
            let reordered = if let Some(order) = args.get_one::<Vec<Position>>("order") {
                mandalart_grid::reorder(&grid, order).context("invalid ordering")?
            } else {
                let permutation = args
                    .get_many::<(SubGridKey, SubGridKey)>("swap")
                    .into_iter()
                    .flatten()
                    .fold(Permutation::identity(), |p, &(a, b)| p.swapped(a, b));
                tracing::info!(moved = permutation.moved().count(), "applying swaps");
                grid.reordered(&permutation)
            };
            emit(&reordered, pretty)
        }
        Some(("expand", args)) => {
            let mut grid = read_grid(input_path(args))?;
            let key = *args
                .get_one::<SubGridKey>("key")
                .context("missing --key")?;
            grid.expand(key)?;
            emit(&grid, pretty)
        }
        Some(("inspect", args)) => {
            let grid = read_grid(input_path(args))?;
            let progress = grid.progress();
            let expanded: Vec<SubGridKey> = SubGridKey::ALL
                .into_iter()
                .filter(|k| grid.is_expanded(*k))
                .collect();
            emit(
                &json!({
                    "mainGoal": grid.main_goal().label,
                    "expanded": expanded,
                    "driftedSeeds": grid.drifted_seeds(),
                    "progress": progress,
                    "ratio": progress.ratio(),
                }),
                pretty,
            )
        }
        Some(("replay", args)) => {
            let config = load_config(&matches)?;
            let script = args
                .get_one::<PathBuf>("script")
                .context("missing --script")?;
            let text = std::fs::read_to_string(script)
                .with_context(|| format!("reading {}", script.display()))?;
            let steps: Vec<Step> = serde_json::from_str(&text)
                .with_context(|| format!("parsing steps from {}", script.display()))?;
            let initial = match args.get_one::<PathBuf>("input") {
                Some(path) => read_grid(path)?,
                None => Grid::empty(),
            };
            let report = replay(initial, &steps, config).await?;
            tracing::info!(
                versions = report.history.len(),
                skipped = report.skipped,
                "replay finished"
            );
            emit(&report, pretty)
        }
        _ => unreachable!("subcommand_required is set"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn order_and_swap_conflict() {
        let result = cli().try_get_matches_from([
            "mandalart",
            "reorder",
            "--order",
            "northWest,north,northEast,west,center,east,southWest,south,southEast",
            "--swap",
            "north:south",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn classify_collects_repeated_coordinates() {
        let matches = cli()
            .try_get_matches_from(["mandalart", "classify", "--at", "center:4", "--at", "north:7"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let coords: Vec<&Coordinate> = args.get_many::<Coordinate>("at").unwrap().collect();
        assert_eq!(coords.len(), 2);
        assert_eq!(
            resolve(coords.into_iter().copied()),
            Some(mandalart_version::VersionCategory::EditMain)
        );
    }
}
