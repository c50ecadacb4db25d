//! Descriptor fixtures.
//!
//! [`GraphFixture`] builds small component graphs in memory, or writes them
//! out as the two YAML descriptor files for tests that go through the store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{
    DependencyDescriptor, Graph, OptionValue, PackageOptions, PackageRef, RequirementTables,
};

/// Builder for a toolkit graph.
#[derive(Debug, Clone, Default)]
pub struct GraphFixture {
    deps: DependencyDescriptor,
    tables: RequirementTables,
}

#[derive(Serialize)]
struct DependencyDocument<'a> {
    components: &'a [String],
    libraries: &'a BTreeMap<String, Vec<String>>,
    dependencies: &'a BTreeMap<String, Vec<String>>,
    requirements: &'a BTreeMap<String, Vec<String>>,
    #[serde(rename = "component-requirements")]
    component_requirements: &'a BTreeMap<String, Vec<String>>,
}

#[derive(Serialize)]
struct RequirementDocument<'a> {
    requirements: &'a BTreeMap<String, Vec<PackageRef>>,
    #[serde(rename = "internal-requirements")]
    internal_requirements: &'a BTreeMap<String, Vec<PackageRef>>,
    disabled: &'a BTreeMap<String, Vec<String>>,
    options: &'a PackageOptions,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn refs(items: &[&str]) -> Vec<PackageRef> {
    items.iter().map(|s| PackageRef::new(*s)).collect()
}

impl GraphFixture {
    pub fn new() -> Self {
        GraphFixture::default()
    }

    /// Declare a component with its libraries and dependencies.
    pub fn component(mut self, name: &str, libraries: &[&str], dependencies: &[&str]) -> Self {
        self.deps.components.push(name.to_string());
        self.deps.libraries.insert(name.to_string(), owned(libraries));
        self.deps
            .dependencies
            .insert(name.to_string(), owned(dependencies));
        self
    }

    /// Attach requirement keys to a library.
    pub fn requires(mut self, library: &str, keys: &[&str]) -> Self {
        self.deps.requirements.insert(library.to_string(), owned(keys));
        self
    }

    /// Attach requirement keys to a component itself.
    pub fn component_requires(mut self, component: &str, keys: &[&str]) -> Self {
        self.deps
            .component_requirements
            .insert(component.to_string(), owned(keys));
        self
    }

    pub fn public(mut self, key: &str, packages: &[&str]) -> Self {
        self.tables.public.insert(key.to_string(), refs(packages));
        self
    }

    pub fn internal(mut self, key: &str, packages: &[&str]) -> Self {
        self.tables.internal.insert(key.to_string(), refs(packages));
        self
    }

    pub fn disabled(mut self, key: &str, systems: &[&str]) -> Self {
        self.tables.disabled.insert(key.to_string(), owned(systems));
        self
    }

    pub fn option(mut self, package: &str, option: &str, value: OptionValue) -> Self {
        self.tables.options.set(package, option, value);
        self
    }

    /// Validate into a [`Graph`].
    pub fn build(self) -> Graph {
        Graph::new(self.deps, self.tables).expect("fixture graph is valid")
    }

    /// Write `dependencies.yml` and `requirements.yml` into `dir`.
    pub fn write_to(&self, dir: &Path) -> (PathBuf, PathBuf) {
        let deps_path = dir.join("dependencies.yml");
        let reqs_path = dir.join("requirements.yml");

        let deps = DependencyDocument {
            components: &self.deps.components,
            libraries: &self.deps.libraries,
            dependencies: &self.deps.dependencies,
            requirements: &self.deps.requirements,
            component_requirements: &self.deps.component_requirements,
        };
        let reqs = RequirementDocument {
            requirements: &self.tables.public,
            internal_requirements: &self.tables.internal,
            disabled: &self.tables.disabled,
            options: &self.tables.options,
        };

        std::fs::write(&deps_path, serde_yaml::to_string(&deps).unwrap()).unwrap();
        std::fs::write(&reqs_path, serde_yaml::to_string(&reqs).unwrap()).unwrap();

        (deps_path, reqs_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor;
    use tempfile::TempDir;

    #[test]
    fn test_written_fixture_round_trips_through_loader() {
        let fixture = GraphFixture::new()
            .component("core", &["xncbi"], &[])
            .component("seq", &["seq"], &["core"])
            .requires("seq", &["BZ2"])
            .component("meta", &[], &["seq"])
            .component_requires("meta", &["BZ2"])
            .public("BZ2", &["bzip2/1.0.8"])
            .disabled("BZ2", &["Windows"])
            .option("bzip2", "shared", OptionValue::Bool(false));

        let tmp = TempDir::new().unwrap();
        let (deps, reqs) = fixture.write_to(tmp.path());
        let loaded = descriptor::load(&deps, &reqs).unwrap();

        let built = fixture.clone().build();
        assert_eq!(loaded.components(), built.components());
        assert_eq!(
            loaded.component_requirement_keys("meta").collect::<Vec<_>>(),
            ["BZ2"]
        );
        assert_eq!(loaded.tables(), fixture.build().tables());
    }
}
