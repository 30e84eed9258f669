//! Severity ladder

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity of a log entry.
///
/// `Uninitialized` sorts below every real severity. It is a sentinel and never
/// the severity of an accepted entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(i8)]
pub enum Severity {
    #[default]
    Uninitialized = -1,
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    /// Every severity an entry may carry, lowest first
    pub const VALID: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Uninitialized => "UnknownSeverity",
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }

    /// True for `Debug..=Fatal`
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self >= Severity::Debug
    }

    /// Integer rank, `-1` for `Uninitialized`
    #[inline]
    pub fn rank(&self) -> i8 {
        *self as i8
    }

    /// Line marker used by the file sink
    pub fn marker(&self) -> &'static str {
        if *self >= Severity::Warning {
            "[!]"
        } else {
            "[*]"
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            "uninitialized" => Ok(Severity::Uninitialized),
            _ => Err(LoggerError::invalid_argument(format!(
                "invalid severity: '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<i32> for Severity {
    type Error = LoggerError;

    fn try_from(rank: i32) -> Result<Self, LoggerError> {
        match rank {
            -1 => Ok(Severity::Uninitialized),
            0 => Ok(Severity::Debug),
            1 => Ok(Severity::Info),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Error),
            4 => Ok(Severity::Fatal),
            other => Err(LoggerError::invalid_argument(format!(
                "severity rank {} is outside [-1, 4]",
                other
            ))),
        }
    }
}
