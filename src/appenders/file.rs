//! File sink writer
//!
//! Each delivered entry becomes exactly one line:
//!
//! ```text
//! [!] [2025-01-08 10:30:45.123] [Warning] Network#1 (net.rs:42): handshake slow
//! ```

use crate::core::{LogEntry, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only writer owning one open stream for its lifetime.
pub struct FileAppender {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileAppender {
    /// Open `path` for append, creating it if missing.
    ///
    /// Fails with `InvalidArgument` for an empty path or a file that cannot be
    /// opened.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(LoggerError::invalid_argument(
                "file path for file callback cannot be empty",
            ));
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::invalid_argument(format!(
                    "invalid log file path '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render one entry as a newline-terminated line.
    ///
    /// Control characters in the message are escaped so an entry can never
    /// span more than one line.
    pub fn format_line(entry: &LogEntry) -> String {
        format!(
            "{} [{}] [{}] {} ({}:{}): {}\n",
            entry.severity.marker(),
            entry.timestamp,
            entry.severity,
            entry.component,
            entry.file,
            entry.line,
            escape_message(&entry.message)
        )
    }

    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        let line = Self::format_line(entry);
        let mut file = self.file.lock();
        self.write_line(&mut file, line.as_bytes())
            .map_err(|e| LoggerError::io_operation("writing log file", self.path.display().to_string(), e))
    }

    #[cfg(feature = "file-lock")]
    fn write_line(&self, file: &mut File, line: &[u8]) -> std::io::Result<()> {
        use fs2::FileExt;

        FileExt::lock_exclusive(&*file)?;
        let written = file.write_all(line).and_then(|()| file.flush());
        let unlocked = FileExt::unlock(&*file);
        written.and(unlocked)
    }

    #[cfg(not(feature = "file-lock"))]
    fn write_line(&self, file: &mut File, line: &[u8]) -> std::io::Result<()> {
        file.write_all(line)?;
        file.flush()
    }
}

fn escape_message(message: &str) -> std::borrow::Cow<'_, str> {
    if message.contains(['\n', '\r', '\t']) {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
            .into()
    } else {
        message.into()
    }
}

impl std::fmt::Debug for FileAppender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAppender")
            .field("path", &self.path)
            .finish()
    }
}
