//! Dependency Descriptor Store.
//!
//! Two YAML documents describe the toolkit:
//!
//! - the dependency descriptor (`dependencies-X.Y.yml`): `components`,
//!   `libraries` (component -> libraries), `dependencies`
//!   (component -> components) and optionally `requirements`
//!   (library -> requirement keys) and `component-requirements`
//!   (component -> requirement keys, for interface-only components);
//! - the requirement descriptor (`requirements-X.Y.yml`): `requirements`
//!   (key -> package coordinates), `internal-requirements`, `disabled`
//!   (key -> OS names) and `options` (package -> option -> value).
//!
//! Both are loaded once per run and are read-only afterwards.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use semver::Version;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::Value;

use crate::core::errors::DescriptorError;
use crate::core::options::PackageOptions;
use crate::core::package_ref::PackageRef;

/// Required top-level keys of the dependency descriptor.
pub const DEPENDENCY_KEYS: &[&str] = &["components", "libraries", "dependencies"];

/// Required top-level keys of the requirement descriptor.
pub const REQUIREMENT_KEYS: &[&str] = &["requirements", "disabled"];

/// Component graph as declared by the dependency descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyDescriptor {
    /// Component names in declaration order.
    pub components: Vec<String>,
    /// Member libraries per component.
    pub libraries: BTreeMap<String, Vec<String>>,
    /// Dependency components per component.
    pub dependencies: BTreeMap<String, Vec<String>>,
    /// Abstract requirement keys per library.
    pub requirements: BTreeMap<String, Vec<String>>,
    /// Requirement keys carried by a component itself.
    pub component_requirements: BTreeMap<String, Vec<String>>,
}

/// Requirement translation tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementTables {
    /// Default mapping: key -> package coordinates.
    pub public: BTreeMap<String, Vec<PackageRef>>,
    /// Consulted first when internal visibility is on.
    pub internal: BTreeMap<String, Vec<PackageRef>>,
    /// key -> OS names on which the key resolves to nothing.
    pub disabled: BTreeMap<String, Vec<String>>,
    /// Forced options on external packages.
    pub options: PackageOptions,
}

#[derive(Deserialize)]
struct RawDependencies {
    components: Option<Vec<String>>,
    libraries: Option<BTreeMap<String, Option<Vec<String>>>>,
    dependencies: Option<BTreeMap<String, Option<Vec<String>>>>,
    #[serde(default)]
    requirements: Option<BTreeMap<String, Option<Vec<String>>>>,
    #[serde(default, rename = "component-requirements")]
    component_requirements: Option<BTreeMap<String, Option<Vec<String>>>>,
}

#[derive(Deserialize)]
struct RawRequirements {
    requirements: Option<BTreeMap<String, Option<Vec<PackageRef>>>>,
    #[serde(default, rename = "internal-requirements")]
    internal_requirements: Option<BTreeMap<String, Option<Vec<PackageRef>>>>,
    disabled: Option<BTreeMap<String, Option<Vec<String>>>>,
    #[serde(default)]
    options: Option<PackageOptions>,
}

fn flatten<T>(map: Option<BTreeMap<String, Option<Vec<T>>>>) -> BTreeMap<String, Vec<T>> {
    map.unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect()
}

/// Read a YAML document, check its required keys, then decode it.
fn read_document<T: DeserializeOwned>(
    path: &Path,
    required: &[&str],
) -> Result<T, DescriptorError> {
    if !path.is_file() {
        return Err(DescriptorError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value =
        serde_yaml::from_str(&contents).map_err(|source| DescriptorError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mapping = value.as_mapping();
    for key in required {
        let present = mapping.is_some_and(|m| m.contains_key(*key));
        if !present {
            return Err(DescriptorError::Schema {
                path: path.to_path_buf(),
                key: key.to_string(),
            });
        }
    }

    serde_yaml::from_value(value).map_err(|source| DescriptorError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the dependency descriptor.
pub fn load_dependency_descriptor(path: &Path) -> Result<DependencyDescriptor, DescriptorError> {
    let raw: RawDependencies = read_document(path, DEPENDENCY_KEYS)?;

    Ok(DependencyDescriptor {
        components: raw.components.unwrap_or_default(),
        libraries: flatten(raw.libraries),
        dependencies: flatten(raw.dependencies),
        requirements: flatten(raw.requirements),
        component_requirements: flatten(raw.component_requirements),
    })
}

/// Load the requirement descriptor.
pub fn load_requirement_descriptor(path: &Path) -> Result<RequirementTables, DescriptorError> {
    let raw: RawRequirements = read_document(path, REQUIREMENT_KEYS)?;

    Ok(RequirementTables {
        public: flatten(raw.requirements),
        internal: flatten(raw.internal_requirements),
        disabled: flatten(raw.disabled),
        options: raw.options.unwrap_or_default(),
    })
}

/// Load both descriptors into a validated [`Graph`].
pub fn load(dependencies: &Path, requirements: &Path) -> Result<Graph, DescriptorError> {
    let deps = load_dependency_descriptor(dependencies)?;
    let tables = load_requirement_descriptor(requirements)?;
    let graph = Graph::new(deps, tables)?;

    tracing::debug!(
        "loaded {} components from {}",
        graph.components().len(),
        dependencies.display()
    );

    Ok(graph)
}

/// The immutable toolkit graph plus its translation tables.
#[derive(Debug, Clone)]
pub struct Graph {
    deps: DependencyDescriptor,
    tables: RequirementTables,
    known: HashSet<String>,
    /// library -> owning component
    owners: HashMap<String, String>,
}

impl Graph {
    /// Validate and index the descriptors.
    ///
    /// A library declared by two components is rejected.
    pub fn new(
        deps: DependencyDescriptor,
        tables: RequirementTables,
    ) -> Result<Self, DescriptorError> {
        let mut owners: HashMap<String, String> = HashMap::new();

        for component in &deps.components {
            let Some(libraries) = deps.libraries.get(component) else {
                continue;
            };
            for library in libraries {
                if let Some(first) = owners.get(library) {
                    if first != component {
                        return Err(DescriptorError::DuplicateLibrary {
                            library: library.clone(),
                            first: first.clone(),
                            second: component.clone(),
                        });
                    }
                    continue;
                }
                owners.insert(library.clone(), component.clone());
            }
        }

        let known = deps.components.iter().cloned().collect();

        Ok(Graph {
            deps,
            tables,
            known,
            owners,
        })
    }

    /// All component names, in declaration order.
    pub fn components(&self) -> &[String] {
        &self.deps.components
    }

    /// Check whether `name` is a declared component.
    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Member libraries of a component (empty when undeclared).
    pub fn libraries(&self, component: &str) -> &[String] {
        self.deps
            .libraries
            .get(component)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Declared dependency components of a component.
    pub fn dependencies(&self, component: &str) -> &[String] {
        self.deps
            .dependencies
            .get(component)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Abstract requirement keys of a library.
    pub fn requirement_keys(&self, library: &str) -> &[String] {
        self.deps
            .requirements
            .get(library)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Requirement keys of a component: its own `component-requirements`
    /// entry plus those of its libraries.
    ///
    /// The library table is never consulted under the component's name, so a
    /// component named like another component's library does not pick up
    /// that library's keys.
    pub fn component_requirement_keys<'a>(
        &'a self,
        component: &str,
    ) -> impl Iterator<Item = &'a String> + 'a {
        let own = self
            .deps
            .component_requirements
            .get(component)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        own.iter().chain(
            self.libraries(component)
                .iter()
                .flat_map(move |library| self.requirement_keys(library)),
        )
    }

    /// Component that owns `library`, if any.
    pub fn component_of(&self, library: &str) -> Option<&str> {
        self.owners.get(library).map(String::as_str)
    }

    /// Requirement translation tables.
    pub fn tables(&self) -> &RequirementTables {
        &self.tables
    }
}

/// Parse a toolkit version, accepting `major.minor` as well as full semver.
pub fn toolkit_version(s: &str) -> Result<Version, semver::Error> {
    let s = s.trim();
    match s.matches('.').count() {
        0 => Version::parse(&format!("{}.0.0", s)),
        1 => Version::parse(&format!("{}.0", s)),
        _ => Version::parse(s),
    }
}

/// File name of the dependency descriptor for a toolkit version.
pub fn dependencies_filename(version: &Version) -> String {
    format!("dependencies-{}.{}.yml", version.major, version.minor)
}

/// File name of the requirement descriptor for a toolkit version.
pub fn requirements_filename(version: &Version) -> String {
    format!("requirements-{}.{}.yml", version.major, version.minor)
}

/// Load-once holder for the graph.
#[derive(Debug)]
pub struct DescriptorStore {
    dependencies: PathBuf,
    requirements: PathBuf,
    graph: OnceLock<Graph>,
}

impl DescriptorStore {
    /// Store reading the two given files.
    pub fn new(dependencies: impl Into<PathBuf>, requirements: impl Into<PathBuf>) -> Self {
        DescriptorStore {
            dependencies: dependencies.into(),
            requirements: requirements.into(),
            graph: OnceLock::new(),
        }
    }

    /// Store reading the versioned descriptor files in `dir`.
    pub fn for_version(dir: &Path, version: &Version) -> Self {
        DescriptorStore::new(
            dir.join(dependencies_filename(version)),
            dir.join(requirements_filename(version)),
        )
    }

    pub fn dependencies_path(&self) -> &Path {
        &self.dependencies
    }

    pub fn requirements_path(&self) -> &Path {
        &self.requirements
    }

    /// The graph, loaded on first access and cached afterwards.
    pub fn graph(&self) -> Result<&Graph, DescriptorError> {
        if let Some(graph) = self.graph.get() {
            return Ok(graph);
        }

        let graph = load(&self.dependencies, &self.requirements)?;
        Ok(self.graph.get_or_init(|| graph))
    }
}
