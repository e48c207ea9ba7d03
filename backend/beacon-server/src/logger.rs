use crate::error::{Result as ServerErrorResult, ServerError};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, info};

/// Crates whose handshake and frame logs drown out session events
const NOISY_TARGETS: &[&str] = &["hyper", "hyper_util", "tungstenite", "tokio_tungstenite"];

/// Where log lines end up
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stdout { colored: bool },
    File(PathBuf),
}

impl LogTarget {
    /// File when a path is configured, stdout otherwise.
    pub fn from_config(log_file: Option<PathBuf>, colored: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None => Self::Stdout { colored },
        }
    }
}

/// Install the global `fern` logger.
///
/// Session ids travel in the message text, so one line format serves stdout and
/// file output; only the level column differs when colors are on.
pub fn initialize(log_level: beacon_config::LogLevel, target: LogTarget) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let mut dispatch = Dispatch::new().level(level_filter);
    for noisy in NOISY_TARGETS {
        dispatch = dispatch.level_for(*noisy, level_filter.min(LevelFilter::Warn));
    }

    let dispatch = match target {
        LogTarget::File(ref path) => {
            let file = fern::log_file(path).map_err(|e| ServerError::Logger {
                message: format!("Failed to open log file {}: {}", path.display(), e),
            })?;
            dispatch.format(plain_format).chain(file)
        }
        LogTarget::Stdout { colored: true } => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            dispatch
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {} [{}]",
                        humantime::format_rfc3339_millis(SystemTime::now()),
                        colors.color(record.level()),
                        message,
                        record.target(),
                    ))
                })
                .chain(std::io::stdout())
        }
        // Plain output for non-TTY (systemd, docker logs)
        LogTarget::Stdout { colored: false } => {
            dispatch.format(plain_format).chain(std::io::stdout())
        }
    };

    dispatch.apply().map_err(|e| ServerError::Logger {
        message: format!("Failed to initialize logger: {e}"),
    })?;

    match target {
        LogTarget::File(ref path) => info!(
            "Logger initialized: level={}, file={}",
            level_filter,
            path.display()
        ),
        LogTarget::Stdout { colored } => info!(
            "Logger initialized: level={}, stdout (colored: {})",
            level_filter, colored
        ),
    }

    Ok(())
}

fn plain_format(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    out.finish(format_args!(
        "[{} - {}] {} [{}]",
        humantime::format_rfc3339_millis(SystemTime::now()),
        record.level(),
        message,
        record.target(),
    ))
}
