//! High-level operations.
//!
//! This module contains the implementation of tkdeps commands.

pub mod graph;
pub mod plan;
pub mod reconcile;

pub use graph::to_dot;
pub use plan::{plan, plan_many, BuildPlan};
pub use reconcile::{absent_components, read_export_listing, reconcile, ComponentRecord};
