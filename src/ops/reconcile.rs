//! Export reconciliation.
//!
//! After the build, compare what the graph declared against the libraries
//! the build actually exported and produce the per-component metadata to
//! publish. Components whose libraries all failed to materialize are
//! absent; no published component may depend on one.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;

use crate::core::{DescriptorError, Graph};
use crate::resolver::translate::{Profile, Translator};

/// Published metadata of one component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    /// Libraries that were actually built.
    pub libs: BTreeSet<String>,
    /// Sibling components and `pkg::pkg` references of external packages.
    pub requires: BTreeSet<String>,
}

/// Read the whitespace-delimited export listing written by the install step.
pub fn read_export_listing(path: &Path) -> Result<BTreeSet<String>, DescriptorError> {
    if !path.is_file() {
        return Err(DescriptorError::ExportsNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents.split_whitespace().map(str::to_string).collect())
}

/// Components that declare libraries but exported none of them.
///
/// Components without libraries are never absent.
pub fn absent_components(graph: &Graph, exports: &BTreeSet<String>) -> BTreeSet<String> {
    graph
        .components()
        .iter()
        .filter(|component| {
            let libraries = graph.libraries(component);
            !libraries.is_empty() && !libraries.iter().any(|lib| exports.contains(lib))
        })
        .cloned()
        .collect()
}

/// Record under construction. Component edges are kept apart from package
/// references so repair only ever touches the former.
#[derive(Debug)]
struct Draft {
    libs: BTreeSet<String>,
    deps: BTreeSet<String>,
    packages: BTreeSet<String>,
    interface_only: bool,
}

impl Draft {
    fn emitted(&self) -> bool {
        !self.libs.is_empty()
            || (self.interface_only && !(self.deps.is_empty() && self.packages.is_empty()))
    }

    fn into_record(self) -> ComponentRecord {
        let mut requires = self.deps;
        requires.extend(self.packages);
        ComponentRecord {
            libs: self.libs,
            requires,
        }
    }
}

/// Build the publishable component metadata.
///
/// The result is independent of declaration order. Every component named in
/// a `requires` list is itself part of the result.
///
/// Edges are pruned beyond the absent components: dependencies on names the
/// graph never declared, and on interface-only components that end up with
/// nothing to forward, are removed too. Dropping such an edge can empty
/// another interface-only component, so callers may see fewer records than
/// absence pruning alone would leave.
pub fn reconcile(
    graph: &Graph,
    exports: &BTreeSet<String>,
    profile: &Profile,
) -> BTreeMap<String, ComponentRecord> {
    let absent = absent_components(graph, exports);
    for component in &absent {
        tracing::debug!("component `{}` is absent", component);
    }

    let translator = Translator::new(graph.tables(), profile);

    let mut drafts: BTreeMap<String, Draft> = graph
        .components()
        .iter()
        .map(|component| {
            let libraries = graph.libraries(component);

            let libs = libraries
                .iter()
                .filter(|lib| exports.contains(*lib))
                .cloned()
                .collect();

            let deps = graph
                .dependencies(component)
                .iter()
                .filter(|dep| !absent.contains(*dep) && graph.contains(dep))
                .cloned()
                .collect();

            let keys = graph
                .component_requirement_keys(component)
                .map(String::as_str);
            let packages = translator
                .translate_all(keys)
                .iter()
                .map(|pkg| pkg.component_ref())
                .collect();

            let draft = Draft {
                libs,
                deps,
                packages,
                interface_only: libraries.is_empty(),
            };
            (component.clone(), draft)
        })
        .collect();

    // Dropping an unemitted component from a requires list can leave an
    // interface component with nothing to forward; repeat until stable.
    loop {
        let dropped: BTreeSet<String> = drafts
            .iter()
            .filter(|(_, draft)| !draft.emitted())
            .map(|(name, _)| name.clone())
            .collect();

        let mut changed = false;
        for (name, draft) in drafts.iter_mut() {
            let before = draft.deps.len();
            draft.deps.retain(|dep| !dropped.contains(dep));
            if draft.deps.len() != before {
                tracing::debug!("pruned {} dangling edge(s) from `{}`", before - draft.deps.len(), name);
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    drafts
        .into_iter()
        .filter(|(_, draft)| draft.emitted())
        .map(|(name, draft)| (name, draft.into_record()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Os;
    use crate::test_support::fixtures::GraphFixture;
    use tempfile::TempDir;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn linux() -> Profile {
        Profile::new(Os::Linux, false)
    }

    #[test]
    fn test_absent_dependency_pruned() {
        let graph = GraphFixture::new()
            .component("X", &["x1"], &[])
            .component("Y", &["y1"], &["X"])
            .build();

        let exports = set(&["y1"]);
        assert_eq!(absent_components(&graph, &exports), set(&["X"]));

        let records = reconcile(&graph, &exports, &linux());

        assert!(!records.contains_key("X"));
        assert_eq!(records["Y"].libs, set(&["y1"]));
        assert!(records["Y"].requires.is_empty());
    }

    #[test]
    fn test_interface_only_component_emitted() {
        let graph = GraphFixture::new()
            .component("Z", &[], &[])
            .component_requires("Z", &["FOO"])
            .public("FOO", &["foo/1.0"])
            .build();

        let records = reconcile(&graph, &BTreeSet::new(), &linux());

        assert!(records["Z"].libs.is_empty());
        assert_eq!(records["Z"].requires, set(&["foo::foo"]));
    }

    #[test]
    fn test_interface_only_without_requires_dropped() {
        let graph = GraphFixture::new()
            .component("Z", &[], &[])
            .component_requires("Z", &["UNMAPPED"])
            .build();

        assert!(reconcile(&graph, &BTreeSet::new(), &linux()).is_empty());
    }

    #[test]
    fn test_translated_requirements_become_component_refs() {
        let graph = GraphFixture::new()
            .component("compress", &["xcompress", "xcompress_extra"], &[])
            .requires("xcompress", &["BZ2", "Boost.Iostreams"])
            .requires("xcompress_extra", &["BZ2"])
            .public("BZ2", &["bzip2/1.0.8"])
            .public("Boost", &["boost/1.84.0@ncbi/stable"])
            .build();

        let records = reconcile(&graph, &set(&["xcompress"]), &linux());

        assert_eq!(records["compress"].libs, set(&["xcompress"]));
        assert_eq!(records["compress"].requires, set(&["bzip2::bzip2", "boost::boost"]));
    }

    #[test]
    fn test_component_name_does_not_pick_up_library_keys() {
        let graph = GraphFixture::new()
            .component("seq", &["seqlib"], &[])
            .component("objects", &["seq"], &[])
            .requires("seq", &["BZ2"])
            .public("BZ2", &["bzip2/1.0.8"])
            .build();

        let records = reconcile(&graph, &set(&["seqlib", "seq"]), &linux());

        assert!(records["seq"].requires.is_empty());
        assert_eq!(records["objects"].requires, set(&["bzip2::bzip2"]));
    }

    #[test]
    fn test_internal_visibility() {
        let graph = GraphFixture::new()
            .component("compress", &["xcompress"], &[])
            .requires("xcompress", &["Z", "LZO", "GRPC"])
            .public("Z", &["zlib/1.3.1"])
            .internal("LZO", &["lzo/2.10@ncbi/internal"])
            .public("GRPC", &["grpc/1.50.1"])
            .internal("GRPC", &["grpc/1.50.1@ncbi/internal"])
            .disabled("GRPC", &["Linux"])
            .build();
        let exports = set(&["xcompress"]);

        // Internal-only keys only resolve with internal visibility, and a
        // disabled key stays disabled even when an internal mapping exists.
        let internal = reconcile(&graph, &exports, &Profile::new(Os::Linux, true));
        assert_eq!(internal["compress"].requires, set(&["zlib::zlib", "lzo::lzo"]));

        let public = reconcile(&graph, &exports, &linux());
        assert_eq!(public["compress"].requires, set(&["zlib::zlib"]));

        let windows = reconcile(&graph, &exports, &Profile::new(Os::Windows, true));
        assert_eq!(
            windows["compress"].requires,
            set(&["zlib::zlib", "lzo::lzo", "grpc::grpc"])
        );
    }

    #[test]
    fn test_disabled_requirement_not_published() {
        let graph = GraphFixture::new()
            .component("grpc", &["grpc_integration"], &[])
            .requires("grpc_integration", &["GRPC"])
            .public("GRPC", &["grpc/1.50.1"])
            .disabled("GRPC", &["Windows"])
            .build();
        let exports = set(&["grpc_integration"]);

        let linux = reconcile(&graph, &exports, &linux());
        assert_eq!(linux["grpc"].requires, set(&["grpc::grpc"]));

        let windows = reconcile(&graph, &exports, &Profile::new(Os::Windows, false));
        assert!(windows["grpc"].requires.is_empty());
    }

    #[test]
    fn test_phantom_and_unemitted_edges_repaired() {
        let graph = GraphFixture::new()
            .component("core", &["xncbi"], &[])
            .component("empty_meta", &[], &["gone"])
            .component("gone", &["xgone"], &[])
            .component("app", &["xapp"], &["core", "empty_meta", "Ghost"])
            .build();

        let records = reconcile(&graph, &set(&["xncbi", "xapp"]), &linux());

        assert_eq!(records.keys().collect::<Vec<_>>(), ["app", "core"]);
        assert_eq!(records["app"].requires, set(&["core"]));
    }

    #[test]
    fn test_no_requires_points_outside_result() {
        let graph = GraphFixture::new()
            .component("a", &["la"], &[])
            .component("b", &["lb"], &["a"])
            .component("m1", &[], &["a"])
            .component("m2", &[], &["m1", "b"])
            .component("c", &["lc"], &["m2", "b"])
            .build();

        let records = reconcile(&graph, &set(&["lb", "lc"]), &linux());

        for record in records.values() {
            for req in &record.requires {
                assert!(records.contains_key(req), "dangling edge to `{}`", req);
            }
        }
        assert!(!records.contains_key("m1"));
        assert_eq!(records["m2"].requires, set(&["b"]));
    }

    #[test]
    fn test_order_independent() {
        let forward = GraphFixture::new()
            .component("a", &["la"], &[])
            .component("b", &["lb"], &["a"])
            .component("c", &[], &["b"])
            .build();
        let reversed = GraphFixture::new()
            .component("c", &[], &["b"])
            .component("b", &["lb"], &["a"])
            .component("a", &["la"], &[])
            .build();
        let exports = set(&["lb"]);

        assert_eq!(
            reconcile(&forward, &exports, &linux()),
            reconcile(&reversed, &exports, &linux())
        );
    }

    #[test]
    fn test_read_export_listing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("toolkit.imports");
        std::fs::write(&path, "xncbi xutil\n\txser\n\n").unwrap();

        assert_eq!(read_export_listing(&path).unwrap(), set(&["xncbi", "xutil", "xser"]));

        let err = read_export_listing(&tmp.path().join("missing.imports")).unwrap_err();
        assert!(matches!(err, DescriptorError::ExportsNotFound { .. }));
    }
}
