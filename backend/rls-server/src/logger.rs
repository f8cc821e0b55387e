use crate::error::{Result as ServerErrorResult, ServerError};

use rls_config::{Config, LoggingConfig};

use std::fmt::Arguments;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// Install the global logger described by `[logging]`.
///
/// Writes to `<config dir>/<logging.dir>/<logging.file>` when a file is set,
/// otherwise to stdout (colored if `logging.colored`).
pub fn initialize(logging: &LoggingConfig) -> ServerErrorResult<()> {
    let level = *logging.level;
    let path = log_path(logging)?;

    let sink = match &path {
        Some(path) => {
            let file = fern::log_file(path).map_err(|e| ServerError::Logger {
                message: format!("Failed to open log file {}: {e}", path.display()),
            })?;
            Dispatch::new().format(plain_line).chain(file)
        }
        None if logging.colored => {
            let colors = level_colors();
            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        None => Dispatch::new().format(plain_line).chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level)
        // sqlx logs every statement at info
        .level_for("sqlx", LevelFilter::Warn)
        .chain(sink)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    let target = path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| String::from("stdout"));
    info!("Logger initialized: level={level:?}, output={target}");

    Ok(())
}

fn log_path(logging: &LoggingConfig) -> ServerErrorResult<Option<PathBuf>> {
    let Some(file) = &logging.file else {
        return Ok(None);
    };

    let dir = Config::config_dir()?.join(&logging.dir);
    std::fs::create_dir_all(&dir)?;

    Ok(Some(dir.join(file)))
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

fn plain_line(out: FormatCallback<'_>, message: &Arguments<'_>, record: &Record<'_>) {
    write_line(out, message, record, record.level())
}

fn write_line(
    out: FormatCallback<'_>,
    message: &Arguments<'_>,
    record: &Record<'_>,
    level: impl std::fmt::Display,
) {
    out.finish(format_args!(
        "[{date} {level} {target}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339_seconds(SystemTime::now()),
        target = record.target(),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}
