//! Concrete external package coordinates.
//!
//! A coordinate looks like `name/version[@user/channel][#revision]`.
//! Only the name matters to the engine; the rest is passed through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A concrete external package reference, e.g. `zlib/1.3.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageRef {
    coordinate: String,
}

impl PackageRef {
    /// Wrap a coordinate string.
    pub fn new(coordinate: impl Into<String>) -> Self {
        PackageRef {
            coordinate: coordinate.into(),
        }
    }

    /// Full coordinate as written in the requirement descriptor.
    pub fn as_str(&self) -> &str {
        &self.coordinate
    }

    /// Package name: the portion before the first `/`.
    ///
    /// A coordinate without a version separator is all name.
    pub fn name(&self) -> &str {
        match self.coordinate.find('/') {
            Some(idx) => &self.coordinate[..idx],
            None => &self.coordinate,
        }
    }

    /// Version portion, if any, without user/channel or revision.
    pub fn version(&self) -> Option<&str> {
        let rest = &self.coordinate[self.coordinate.find('/')? + 1..];
        let end = rest.find(['@', '#']).unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// Self-referencing component reference (`pkg::pkg`) used in
    /// published requirement lists.
    pub fn component_ref(&self) -> String {
        let name = self.name();
        format!("{}::{}", name, name)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinate)
    }
}

impl FromStr for PackageRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PackageRef::new(s.trim()))
    }
}

impl From<&str> for PackageRef {
    fn from(s: &str) -> Self {
        PackageRef::new(s)
    }
}

impl Serialize for PackageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.coordinate)
    }
}

impl<'de> Deserialize<'de> for PackageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(PackageRef::new)
    }
}
