//! Log entry structure

use super::component::ComponentId;
use super::error::{LoggerError, Result};
use super::severity::Severity;
use super::timestamp;
use serde::{Serialize, Serializer};

/// One log call, shared read-only by every delivery derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub severity: Severity,
    #[serde(serialize_with = "serialize_component")]
    pub component: ComponentId,
    pub message: String,
    pub file: String,
    pub line: u32,
    /// Captured at the `log()` call, see [`timestamp::TIMESTAMP_FORMAT`]
    pub timestamp: String,
}

fn serialize_component<S: Serializer>(
    component: &ComponentId,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(component)
}

impl LogEntry {
    /// Build and validate an entry stamped with the current time.
    ///
    /// Rejects empty messages, empty origin files, line 0 and severities
    /// outside `Debug..=Fatal`.
    pub fn new(
        severity: Severity,
        component: ComponentId,
        message: String,
        file: String,
        line: u32,
    ) -> Result<Self> {
        if message.is_empty() {
            return Err(LoggerError::invalid_entry("cannot log an empty message"));
        }
        if file.is_empty() {
            return Err(LoggerError::invalid_entry("cannot log without a file name"));
        }
        if line == 0 {
            return Err(LoggerError::invalid_entry("line number must be positive"));
        }
        if !severity.is_valid() {
            return Err(LoggerError::invalid_entry(format!(
                "invalid severity level: {}",
                severity.rank()
            )));
        }

        Ok(Self {
            severity,
            component,
            message,
            file,
            line,
            timestamp: timestamp::now(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp() -> ComponentId {
        ComponentId::named("Core", 2)
    }

    #[test]
    fn test_valid_entry() {
        let entry = LogEntry::new(
            Severity::Info,
            comp(),
            "hello".into(),
            "main.rs".into(),
            12,
        )
        .expect("valid entry");
        assert_eq!(entry.message, "hello");
        assert_eq!(entry.timestamp.len(), 23);
    }

    #[test]
    fn test_rejections() {
        let cases = [
            (Severity::Info, "", "main.rs", 1),
            (Severity::Info, "msg", "", 1),
            (Severity::Info, "msg", "main.rs", 0),
            (Severity::Uninitialized, "msg", "main.rs", 1),
        ];
        for (severity, message, file, line) in cases {
            let result = LogEntry::new(severity, comp(), message.into(), file.into(), line);
            assert!(
                matches!(result, Err(LoggerError::InvalidEntry { .. })),
                "expected rejection for {:?}",
                (severity, message, file, line)
            );
        }
    }

    #[test]
    fn test_json() {
        let entry =
            LogEntry::new(Severity::Error, comp(), "disk full".into(), "io.rs".into(), 7).unwrap();
        let value: serde_json::Value = serde_json::from_str(&entry.to_json().unwrap()).unwrap();
        assert_eq!(value["severity"], "Error");
        assert_eq!(value["component"], "Core#2");
        assert_eq!(value["line"], 7);
    }
}
