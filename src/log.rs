//! Simple log file writer with timestamps

use crate::{Error, Result};
use chrono::{Local, Utc};
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Timestamped log shared between readers and writers.
///
/// Every line is prefixed with the seconds since the log was opened and
/// the seconds since the previous entry. Cloning yields another handle to
/// the same file.
#[derive(Clone)]
pub struct LogFile {
    inner: Arc<LogFileInner>,
}

struct LogFileInner {
    state: Mutex<LogState>,
    start: Instant,
    output_to_console: bool,
}

struct LogState {
    writer: BufWriter<File>,
    last_seconds: f32,
}

impl LogFile {
    /// Open a log file.
    ///
    /// Without a path, a file named after the current date and time is
    /// created in the system temp directory.
    pub fn new(path: Option<&Path>, output_to_console: bool) -> Result<Self> {
        let path = match path {
            Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
            _ => default_path(),
        };

        let file = File::create(&path).map_err(|e| {
            Error::FileSave(format!("Unable to create file {}: {}", path.display(), e))
        })?;

        let log = Self {
            inner: Arc::new(LogFileInner {
                state: Mutex::new(LogState {
                    writer: BufWriter::new(file),
                    last_seconds: 0.0,
                }),
                start: Instant::now(),
                output_to_console,
            }),
        };

        log.log(format!("Opened {}", path.display()))?;
        log.log("\n----------------------------------------\n")?;
        log.log_time()?;
        log.log(format!(
            "stlmesh:              {}",
            env!("CARGO_PKG_VERSION")
        ))?;
        log.log(format!("Operating System      {}", env::consts::OS))?;
        log.log("\n----------------------------------------\n")?;

        Ok(log)
    }

    pub fn log(&self, message: impl AsRef<str>) -> Result<()> {
        self.inner.log_lines(message.as_ref())
    }

    pub fn log_time(&self) -> Result<()> {
        self.log(format!(
            "Current time (UTC): {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S (UTC)")
        ))?;
        self.log(format!(
            "Current local time: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S (%z)")
        ))?;
        Ok(())
    }
}

impl LogFileInner {
    fn log_lines(&self, message: &str) -> Result<()> {
        let seconds = self.start.elapsed().as_secs_f32();

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let diff = seconds - state.last_seconds;
        let prefix = format!("{:7.0}s {:6.1}+ ", seconds, diff);

        for line in message.split('\n') {
            if self.output_to_console {
                println!("{}{}", prefix, line);
            }
            state.writer.write_all(prefix.as_bytes())?;
            state.writer.write_all(line.as_bytes())?;
            state.writer.write_all(b"\n")?;
            state.writer.flush()?;
            state.last_seconds = seconds;
        }

        Ok(())
    }
}

impl Drop for LogFileInner {
    fn drop(&mut self) {
        let _ = self.log_lines("\n----------------------------------------\n");
        let _ = self.log_lines("Closing log file.");
        let _ = self.log_lines(&format!(
            "Current time (UTC): {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S (UTC)")
        ));
        let _ = self.log_lines("Done.");
    }
}

fn default_path() -> PathBuf {
    let name = format!("stlmesh_{}.log", Local::now().format("%Y%m%d_%H%M%S"));
    env::temp_dir().join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TempFolder;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial]
    fn test_log_lines_are_prefixed() {
        let tmp = TempFolder::new().unwrap();
        let path = tmp.path().join("test.log");
        {
            let log = LogFile::new(Some(path.as_path()), false).unwrap();
            log.log("first\nsecond").unwrap();
        }

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Opened"));
        let first = text.lines().find(|l| l.ends_with("first")).unwrap();
        assert!(first.contains("s "));
        assert!(first.contains("+ "));
        assert!(text.lines().any(|l| l.ends_with("second")));
        assert!(text.lines().any(|l| l.ends_with("Done.")));
    }
}
