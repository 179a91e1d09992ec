//! `env_logger` backend for the `mediadex` binary.
//!
//! Library code only talks to the `log` facade, mostly through
//! [`LogReporter`](crate::reporter::LogReporter). When `RUST_LOG` is set it
//! is used as is. Otherwise `-q` keeps errors only, `-v` turns on debug and
//! `-vv` trace for mediadex itself; other crates (`trash`, `walkdir`) stay at
//! warn so their chatter does not drown the index report.

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

const CRATE_TARGET: &str = "mediadex";

/// Install the global logger. Call once, before anything logs.
///
/// # Panics
///
/// Panics if a logger is already installed.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    match env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder
                .filter_level(dependency_level(quiet))
                .filter_module(CRATE_TARGET, crate_level(verbose, quiet));
        }
    }

    let with_target = verbose > 0;
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if with_target {
            writeln!(
                buf,
                "{style}{:<5}{style:#} {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        }
    });
    builder.init();

    log::debug!("Logging at {} for {}", log::max_level(), CRATE_TARGET);
}

// -q beats -v
fn crate_level(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

fn dependency_level(quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    }
}
