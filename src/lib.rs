//! tkdeps - component resolution for modular C++ toolkits
//!
//! This crate decides which components of a large toolkit must be built for
//! a request, which external packages they need, and, after the build,
//! which components actually survived and what to publish for them.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and graph fixtures for tkdeps unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{DescriptorStore, Graph, Os, PackageRef, RequestedSet};
pub use ops::{BuildPlan, ComponentRecord};
pub use resolver::{Closure, Profile};
pub use util::context::GlobalContext;
