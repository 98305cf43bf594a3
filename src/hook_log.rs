//! Append-only daily attempt log.
//!
//! Each line is `[<timestamp>] [<LEVEL>] <message>` in
//! `<dir>/web-search-hook-<YYYY-MM-DD>.log`. Every line is mirrored to
//! `tracing`. Write failures are reported through `tracing` only and never
//! reach the caller.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};

const FILE_PREFIX: &str = "web-search-hook";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct HookLog {
    dir: PathBuf,
}

impl HookLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, now: DateTime<Utc>) -> PathBuf {
        self.dir
            .join(format!("{}-{}.log", FILE_PREFIX, now.format("%Y-%m-%d")))
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn log(&self, level: Level, message: &str) {
        match level {
            Level::Info => tracing::info!("{}", message),
            Level::Error => tracing::error!("{}", message),
        }

        let now = Utc::now();
        if let Err(e) = self.append(now, &format_line(now, level, message)) {
            tracing::debug!(dir = %self.dir.display(), error = %e, "Could not write hook log");
        }
    }

    fn append(&self, now: DateTime<Utc>, line: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(now))?;
        file.write_all(line.as_bytes())
    }
}

pub fn format_line(at: DateTime<Utc>, level: Level, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        level,
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn line_format_matches_layout() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(
            format_line(at, Level::Error, "Firecrawl failed"),
            "[2025-03-14T09:26:53.000Z] [ERROR] Firecrawl failed\n"
        );
    }

    #[test]
    fn file_is_named_by_day() {
        let log = HookLog::new("/var/log/hook");
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 23, 59, 0).unwrap();
        assert_eq!(
            log.path_for(at),
            PathBuf::from("/var/log/hook/web-search-hook-2025-01-02.log")
        );
    }

    #[test]
    fn lines_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let log = HookLog::new(dir.path().join("nested"));
        log.info("first");
        log.error("second");

        let contents = fs::read_to_string(log.path_for(Utc::now())).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO] first"));
        assert!(lines[1].ends_with("[ERROR] second"));
    }

    #[test]
    fn unwritable_directory_is_ignored() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot be used as the log directory.
        let log = HookLog::new(file.path());
        log.error("nobody will see this");
    }
}
