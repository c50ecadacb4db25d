//! Descriptor and export-listing error types.
//!
//! Every variant here is fatal: it aborts the run at the point of load.
//! Soft misses (unknown targets, untranslated keys, phantom edges) never
//! become errors.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised while loading descriptors or the export listing.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum DescriptorError {
    #[error("cannot find descriptor `{}`", .path.display())]
    #[diagnostic(
        code(tkdeps::descriptor::not_found),
        help("check `[descriptors]` in .tkdeps/config.toml or pass --descriptors")
    )]
    NotFound { path: PathBuf },

    #[error("failed to read `{}`", .path.display())]
    #[diagnostic(code(tkdeps::descriptor::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse descriptor `{}`", .path.display())]
    #[diagnostic(code(tkdeps::descriptor::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("descriptor `{}` is missing required key `{key}`", .path.display())]
    #[diagnostic(code(tkdeps::descriptor::schema))]
    Schema { path: PathBuf, key: String },

    #[error("library `{library}` is declared by both `{first}` and `{second}`")]
    #[diagnostic(
        code(tkdeps::descriptor::duplicate_library),
        help("library names must be unique across all components")
    )]
    DuplicateLibrary {
        library: String,
        first: String,
        second: String,
    },

    #[error("cannot find export listing `{}`", .path.display())]
    #[diagnostic(code(tkdeps::reconcile::exports_not_found))]
    ExportsNotFound { path: PathBuf },
}

impl DescriptorError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DescriptorError::NotFound { path } => {
                Diagnostic::error(format!("cannot find descriptor `{}`", path.display()))
                    .with_location(path)
                    .with_suggestion(suggestions::DESCRIPTORS_DIR)
                    .with_suggestion(suggestions::TOOLKIT_VERSION)
            }

            DescriptorError::Io { path, source } => {
                Diagnostic::error(format!("failed to read `{}`", path.display()))
                    .with_location(path)
                    .with_context(source.to_string())
            }

            DescriptorError::Parse { path, source } => {
                Diagnostic::error(format!("failed to parse descriptor `{}`", path.display()))
                    .with_location(path)
                    .with_context(source.to_string())
            }

            DescriptorError::Schema { path, key } => Diagnostic::error(format!(
                "descriptor is missing required key `{}`",
                key
            ))
            .with_location(path)
            .with_suggestion(format!("Add a top-level `{}:` entry", key)),

            DescriptorError::DuplicateLibrary {
                library,
                first,
                second,
            } => Diagnostic::error(format!("library `{}` is declared twice", library))
                .with_context(format!("declared by component `{}`", first))
                .with_context(format!("declared again by component `{}`", second))
                .with_suggestion(format!(
                    "Remove `{}` from one of the components",
                    library
                )),

            DescriptorError::ExportsNotFound { path } => {
                Diagnostic::error(format!("cannot find export listing `{}`", path.display()))
                    .with_location(path)
                    .with_suggestion(suggestions::EXPORTS_MISSING)
            }
        }
    }
}
