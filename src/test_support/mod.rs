//! Test utilities for tkdeps unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::fixtures::GraphFixture;
//!
//! let graph = GraphFixture::new()
//!     .component("core", &["xncbi"], &[])
//!     .component("seq", &["seq"], &["core"])
//!     .requires("seq", &["BZ2"])
//!     .public("BZ2", &["bzip2/1.0.8"])
//!     .build();
//! ```

pub mod fixtures;

pub use fixtures::*;
