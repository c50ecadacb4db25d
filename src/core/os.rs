//! Operating system identifiers as they appear in the `disabled` table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Target operating system of a resolution run.
///
/// Known systems compare case-insensitively against descriptor entries;
/// anything else is carried verbatim and matched exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Os {
    Linux,
    Macos,
    Windows,
    Other(String),
}

impl Os {
    /// The OS this binary was compiled for.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "linux" => Os::Linux,
            "macos" => Os::Macos,
            "windows" => Os::Windows,
            other => Os::Other(other.to_string()),
        }
    }

    /// Canonical descriptor spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Os::Linux => "Linux",
            Os::Macos => "Macos",
            Os::Windows => "Windows",
            Os::Other(name) => name,
        }
    }

    /// Check whether a descriptor entry names this OS.
    pub fn matches(&self, entry: &str) -> bool {
        match self {
            Os::Other(name) => name == entry,
            known => known.as_str().eq_ignore_ascii_case(entry),
        }
    }
}

impl Default for Os {
    fn default() -> Self {
        Os::host()
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "linux" => Os::Linux,
            "macos" | "darwin" => Os::Macos,
            "windows" => Os::Windows,
            _ => Os::Other(s.to_string()),
        })
    }
}

impl Serialize for Os {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Os {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_else(|never| match never {}))
    }
}
