//! Support code for the `mandalart` binary
//!
//! Argument parsers, grid I/O and the replay driver live here so they can be
//! tested without spawning the binary.

#![warn(missing_docs)]

pub mod input;
pub mod replay;

pub use input::{parse_coordinate, parse_order, parse_swap, read_grid};
pub use replay::{replay, ReplayReport, Step};

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`; defaults to `info`. Logs go to stderr so stdout stays
/// valid JSON.
pub fn init_logging(json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
