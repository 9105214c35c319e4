//! Logger setup.
//!
//! Info-level records print bare so they read as normal command output.
//! Warnings and errors carry a colored level tag. `--verbose` adds debug
//! records and timestamps; `RUST_LOG` overrides the level entirely.

use std::io::Write;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

pub(crate) fn init(quiet: bool, verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(quiet, verbose));
    builder.parse_default_env();

    builder.format(move |buf, record| {
        if verbose {
            write!(buf, "{} ", buf.timestamp_millis())?;
        }
        match record.level() {
            Level::Info => {}
            Level::Error => write!(
                buf,
                "{} ",
                "error:".if_supports_color(Stderr, |t| t.red())
            )?,
            Level::Warn => write!(
                buf,
                "{} ",
                "warning:".if_supports_color(Stderr, |t| t.yellow())
            )?,
            level => write!(
                buf,
                "{} ",
                format!("[{level}]").if_supports_color(Stderr, |t| t.dimmed())
            )?,
        }
        writeln!(buf, "{}", record.args())
    });

    // A second init (tests) is harmless
    let _ = builder.try_init();
}
