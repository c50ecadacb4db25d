//! Per-package option overrides.
//!
//! The requirement descriptor can force options on external packages
//! (e.g. `boost: { without_python: true }`). They are applied through a
//! single explicit step onto a [`DependencyOptions`] map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A forced option value.
///
/// Scalars keep their type. Anything else (null, lists, maps) is carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Other(serde_yaml::Value),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Float(x) => write!(f, "{}", x),
            OptionValue::Str(s) => f.write_str(s),
            OptionValue::Other(serde_yaml::Value::Null) => f.write_str("None"),
            OptionValue::Other(v) => {
                let s = serde_yaml::to_string(v).map_err(|_| fmt::Error)?;
                f.write_str(s.trim_end())
            }
        }
    }
}

/// Options of the build, keyed by package scope pattern (`zlib*`) and then
/// option name.
pub type DependencyOptions = BTreeMap<String, BTreeMap<String, OptionValue>>;

/// Overrides from the requirement descriptor: package -> option -> value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageOptions {
    packages: BTreeMap<String, BTreeMap<String, OptionValue>>,
}

impl PackageOptions {
    /// Create an empty override table.
    pub fn new() -> Self {
        PackageOptions::default()
    }

    /// Add or replace one override.
    pub fn set(
        &mut self,
        package: impl Into<String>,
        option: impl Into<String>,
        value: OptionValue,
    ) {
        self.packages
            .entry(package.into())
            .or_default()
            .insert(option.into(), value);
    }

    /// Overrides for one package.
    pub fn get(&self, package: &str) -> Option<&BTreeMap<String, OptionValue>> {
        self.packages.get(package)
    }

    /// Iterate over `(package, options)`.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, OptionValue>)> {
        self.packages.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Scope pattern an override applies to.
    pub fn scope(package: &str) -> String {
        format!("{}*", package)
    }

    /// Write every override into `dest`, replacing existing values.
    pub fn apply_overrides(&self, dest: &mut DependencyOptions) {
        for (package, options) in &self.packages {
            let scoped = dest.entry(Self::scope(package)).or_default();
            for (option, value) in options {
                tracing::debug!("option {}:{}={}", package, option, value);
                scoped.insert(option.clone(), value.clone());
            }
        }
    }
}
