//! Requirement Translator.
//!
//! Maps abstract requirement keys onto concrete package coordinates. Rules,
//! in order: alias normalization, per-OS disablement, internal mapping (when
//! internal visibility is on), public mapping, otherwise nothing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{Graph, Os, PackageRef, RequirementTables};

/// Substring marking any module of the Boost collection.
pub const BOOST_MARKER: &str = "Boost";

/// Canonical requirement key for every Boost module.
pub const BOOST_KEY: &str = "Boost";

/// Ambient settings a translation depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile {
    /// OS the build targets.
    pub os: Os,
    /// Prefer internal-only requirement mappings.
    pub internal: bool,
}

impl Profile {
    pub fn new(os: Os, internal: bool) -> Self {
        Profile { os, internal }
    }
}

/// Collapse multi-module collection keys onto their canonical key.
pub fn normalize_key(key: &str) -> &str {
    if key.contains(BOOST_MARKER) {
        BOOST_KEY
    } else {
        key
    }
}

/// Translates requirement keys for one profile.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    tables: &'a RequirementTables,
    profile: &'a Profile,
}

impl<'a> Translator<'a> {
    pub fn new(tables: &'a RequirementTables, profile: &'a Profile) -> Self {
        Translator { tables, profile }
    }

    /// Translate one key.
    ///
    /// `None` means the key contributes nothing: it is disabled on this OS
    /// or has no mapping at all.
    pub fn translate(&self, key: &str) -> Option<&'a [PackageRef]> {
        let key = normalize_key(key);

        if let Some(systems) = self.tables.disabled.get(key) {
            if systems.iter().any(|os| self.profile.os.matches(os)) {
                tracing::debug!("requirement `{}` is disabled on {}", key, self.profile.os);
                return None;
            }
        }

        if self.profile.internal {
            if let Some(pkgs) = self.tables.internal.get(key) {
                return Some(pkgs.as_slice());
            }
        }

        match self.tables.public.get(key) {
            Some(pkgs) => Some(pkgs.as_slice()),
            None => {
                tracing::debug!("requirement `{}` has no package mapping", key);
                None
            }
        }
    }

    /// Translate several keys and union the results.
    pub fn translate_all<'k, I>(&self, keys: I) -> BTreeSet<PackageRef>
    where
        I: IntoIterator<Item = &'k str>,
    {
        keys.into_iter()
            .filter_map(|key| self.translate(key))
            .flatten()
            .cloned()
            .collect()
    }
}

/// Every requirement key referenced by `components` and their libraries.
pub fn requirement_keys<'c, I>(graph: &Graph, components: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'c str>,
{
    components
        .into_iter()
        .flat_map(|component| graph.component_requirement_keys(component))
        .cloned()
        .collect()
}

/// External packages required to build `components` under `profile`.
pub fn required_packages<'c, I>(
    graph: &Graph,
    components: I,
    profile: &Profile,
) -> BTreeSet<PackageRef>
where
    I: IntoIterator<Item = &'c str>,
{
    let keys = requirement_keys(graph, components);
    let packages =
        Translator::new(graph.tables(), profile).translate_all(keys.iter().map(String::as_str));

    for pkg in &packages {
        tracing::info!("package requires {}", pkg);
    }

    packages
}
