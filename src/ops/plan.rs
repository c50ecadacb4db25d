//! Build planning.
//!
//! A plan is everything the (external) build step needs from the engine:
//! the component closure, the libraries to restrict the build to, the
//! external packages to require and the option overrides to apply. It is a
//! plain return value; nothing is accumulated in shared state.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::core::{DependencyOptions, Graph, PackageRef, RequestedSet};
use crate::resolver::closure;
use crate::resolver::translate::{requirement_keys, required_packages, Profile};

/// Result of planning one resolution run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildPlan {
    /// Profile the plan was computed for.
    pub profile: Profile,
    /// True when nothing was requested and every component is built.
    pub universal: bool,
    /// Component closure.
    pub components: BTreeSet<String>,
    /// Libraries to restrict the build to (empty when universal).
    pub component_targets: BTreeSet<String>,
    /// Requirement keys referenced by the closure.
    pub requirement_keys: BTreeSet<String>,
    /// External packages to require.
    pub packages: BTreeSet<PackageRef>,
    /// Option overrides for external packages.
    pub options: DependencyOptions,
}

/// Plan a build of `request` for one profile.
pub fn plan(graph: &Graph, request: &RequestedSet, profile: &Profile) -> BuildPlan {
    let closure = closure::resolve(request, graph);

    tracing::debug!(
        "{} of {} components selected for {}",
        closure.len(),
        graph.components().len(),
        profile.os
    );

    let component_targets = closure.component_targets(graph);
    let requirement_keys = requirement_keys(graph, closure.iter());
    let packages = required_packages(graph, closure.iter(), profile);

    let mut options = DependencyOptions::new();
    graph.tables().options.apply_overrides(&mut options);

    BuildPlan {
        profile: profile.clone(),
        universal: closure.is_universal(),
        components: closure.into_set(),
        component_targets,
        requirement_keys,
        packages,
        options,
    }
}

/// Plan the same request for several profiles in parallel.
///
/// Runs share only the read-only graph. Results come back in `profiles`
/// order.
pub fn plan_many(graph: &Graph, request: &RequestedSet, profiles: &[Profile]) -> Vec<BuildPlan> {
    profiles
        .par_iter()
        .map(|profile| plan(graph, request, profile))
        .collect()
}
