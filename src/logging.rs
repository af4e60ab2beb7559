//! File logging for hosts of the extractor
//!
//! The library only emits records through the `log` facade. Hosts that have no
//! logger of their own can install this one.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use log::{LevelFilter, Log, Metadata, Record};

/// Writes `[timestamp] [LEVEL] message` lines for records at or above `level`
struct FileLogger {
    file: Mutex<std::fs::File>,
    level: LevelFilter,
}

impl FileLogger {
    fn new(file_path: &Path, level: LevelFilter) -> io::Result<Self> {
        // Create parent directories if they don't exist
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(file_path)?;
        
        Ok(FileLogger {
            file: Mutex::new(file),
            level,
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = self.file.lock() {
                let _ = writeln!(
                    file,
                    "[{}] [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                );
                let _ = file.flush();
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Get the platform-specific log file path
pub fn default_log_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data_dir = dirs::data_local_dir()
        .ok_or("Could not determine local data directory")?;
    
    Ok(data_dir.join("CssVarExtract").join("css_var_extract.log"))
}

/// Initialize the logger to write to a single file in local app data, overwriting previous logs
pub fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    let log_file_path = default_log_file_path()?;
    init_logger_at(&log_file_path, LevelFilter::Info)
}

/// Initialize the logger to write to the given file, overwriting previous logs
pub fn init_logger_at(log_file_path: &Path, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let logger = FileLogger::new(log_file_path, level)?;
    
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(level))?;
    
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_file_logger_writes_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("extract.log");
        let logger = FileLogger::new(&path, LevelFilter::Info).unwrap();

        logger.log(
            &Record::builder()
                .args(format_args!("Ignored variable in keyframe"))
                .level(Level::Warn)
                .build(),
        );
        logger.flush();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[WARN] Ignored variable in keyframe"));
    }

    #[test]
    fn test_file_logger_skips_records_below_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extract.log");
        let logger = FileLogger::new(&path, LevelFilter::Info).unwrap();

        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
        logger.log(
            &Record::builder()
                .args(format_args!("Found 3 root variables"))
                .level(Level::Debug)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("Skipping ERROR node"))
                .level(Level::Warn)
                .build(),
        );
        logger.flush();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("Found 3 root variables"));
        assert!(written.contains("[WARN] Skipping ERROR node"));
    }

    #[test]
    fn test_default_log_file_path() {
        if let Ok(path) = default_log_file_path() {
            assert!(path.ends_with("CssVarExtract/css_var_extract.log"));
        }
    }
}
