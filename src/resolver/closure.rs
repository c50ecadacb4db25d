//! Component Closure Resolver.
//!
//! Turns requested target libraries and component names into the full set
//! of components that must be built. Nothing requested means everything.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::{Graph, RequestedSet};

/// The resolved set of components for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Closure {
    components: BTreeSet<String>,
    universal: bool,
}

impl Closure {
    /// Component names in the closure.
    pub fn components(&self) -> &BTreeSet<String> {
        &self.components
    }

    /// True when nothing was requested and the closure is every component.
    pub fn is_universal(&self) -> bool {
        self.universal
    }

    pub fn contains(&self, component: &str) -> bool {
        self.components.contains(component)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn into_set(self) -> BTreeSet<String> {
        self.components
    }

    /// Libraries the build must be restricted to.
    ///
    /// Empty for a universal closure, which places no restriction.
    pub fn component_targets(&self, graph: &Graph) -> BTreeSet<String> {
        if self.universal {
            return BTreeSet::new();
        }

        self.iter()
            .flat_map(|component| graph.libraries(component))
            .cloned()
            .collect()
    }
}

/// Resolve a [`RequestedSet`] against the graph.
pub fn resolve(request: &RequestedSet, graph: &Graph) -> Closure {
    resolve_components(&request.targets, &request.components, graph)
}

/// Compute the component closure for requested targets and components.
///
/// Targets owned by no component are ignored. Requested component names are
/// taken verbatim; dependency edges to undeclared components are skipped.
/// Already-visited components are never expanded twice, so cycles terminate.
pub fn resolve_components(
    targets: &BTreeSet<String>,
    components: &BTreeSet<String>,
    graph: &Graph,
) -> Closure {
    let mut seeds = BTreeSet::new();
    for target in targets {
        match graph.component_of(target) {
            Some(component) => {
                seeds.insert(component.to_string());
            }
            None => tracing::debug!("target `{}` is not in any component", target),
        }
    }
    seeds.extend(components.iter().cloned());

    let mut result = BTreeSet::new();
    let mut frontier = seeds;

    while !frontier.is_empty() {
        let mut next = BTreeSet::new();

        for component in frontier {
            if result.contains(&component) {
                continue;
            }

            for dep in graph.dependencies(&component) {
                if !graph.contains(dep) {
                    tracing::debug!("`{}` depends on unknown component `{}`", component, dep);
                    continue;
                }
                if !result.contains(dep) {
                    next.insert(dep.clone());
                }
            }

            result.insert(component);
        }

        frontier = next;
    }

    if result.is_empty() {
        return Closure {
            components: graph.components().iter().cloned().collect(),
            universal: true,
        };
    }

    Closure {
        components: result,
        universal: false,
    }
}
