//! Component resolution and requirement translation.
//!
//! Both are pure functions over the read-only [`Graph`](crate::core::Graph);
//! all I/O happens before they run.

pub mod closure;
pub mod translate;

pub use closure::{resolve, resolve_components, Closure};
pub use translate::{normalize_key, Profile, Translator};
