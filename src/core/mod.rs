//! Core data structures for tkdeps.
//!
//! This module contains the types the engine works on:
//! - The descriptor store and its immutable component graph
//! - Package coordinates and OS identifiers
//! - Requested sets and option overrides
//! - Load errors

pub mod descriptor;
pub mod errors;
pub mod options;
pub mod os;
pub mod package_ref;
pub mod request;

pub use descriptor::{DependencyDescriptor, DescriptorStore, Graph, RequirementTables};
pub use errors::DescriptorError;
pub use options::{DependencyOptions, OptionValue, PackageOptions};
pub use os::Os;
pub use package_ref::PackageRef;
pub use request::{parse_name_list, RequestedSet};
