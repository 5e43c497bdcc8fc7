use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Message surfaced to the shopper in the storefront status area
#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub level: Level,
    pub message: String,
    pub timestamp: Instant,
}

/// Logger for the terminal storefront.
///
/// The terminal is owned by the UI, so records go to a rotating log file,
/// and those at or above `flash_level` are also forwarded to the UI.
struct StorefrontLogger {
    file_writer: Arc<Mutex<RollingFileAppender>>,
    flash_tx: Option<Arc<Mutex<Sender<FlashMessage>>>>,
    file_level: LevelFilter,
    flash_level: LevelFilter,
}

impl StorefrontLogger {
    fn write_file(&self, level: Level, target: &str, message: &str) {
        let Ok(mut writer) = self.file_writer.lock() else {
            return;
        };
        let _ = writeln!(
            writer,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level,
            target,
            message
        );
    }

    fn flash(&self, level: Level, message: String) {
        let Some(tx) = &self.flash_tx else {
            return;
        };
        if let Ok(tx) = tx.lock() {
            let _ = tx.send(FlashMessage {
                level,
                message,
                timestamp: Instant::now(),
            });
        }
    }
}

impl Log for StorefrontLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.file_level.max(self.flash_level)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let message = record.args().to_string();

        if level <= self.file_level {
            self.write_file(level, record.target(), &message);
        }

        // Only this crate's own messages are meant for the shopper
        if level <= self.flash_level && record.target().starts_with("scent") {
            self.flash(level, message);
        }
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.file_writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// Parse a configured level name; unknown names fall back to info
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

/// Install the storefront logger as the global `log` backend.
///
/// Log files rotate daily next to `log_file_path`, keeping three.
pub fn init_logger(
    log_file_path: &Path,
    flash_tx: Option<Sender<FlashMessage>>,
    file_level: &str,
    flash_level: &str,
) -> Result<()> {
    let log_dir = log_file_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Invalid log file path {:?}", log_file_path))?;
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let prefix = log_file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scent");
    let suffix = log_file_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("log");

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(3)
        .filename_prefix(prefix)
        .filename_suffix(suffix)
        .build(log_dir)
        .context("Failed to create rotating file appender")?;

    let file_level = parse_level(file_level);
    let flash_level = parse_level(flash_level);

    let logger = StorefrontLogger {
        file_writer: Arc::new(Mutex::new(file_appender)),
        flash_tx: flash_tx.map(|tx| Arc::new(Mutex::new(tx))),
        file_level,
        flash_level,
    };

    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(file_level.max(flash_level));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
