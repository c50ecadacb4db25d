//! Command implementations

pub mod completions;
pub mod graph;
pub mod options;
pub mod plan;
pub mod reconcile;
pub mod translate;

use anyhow::Result;

use crate::cli::{Cli, RequestArgs};
use tkdeps::core::RequestedSet;
use tkdeps::{GlobalContext, Os, Profile};

/// Build the context and apply the global config and descriptor flags.
pub fn context(cli: &Cli) -> Result<GlobalContext> {
    let mut ctx = GlobalContext::new(cli.config_dir.clone())?;
    ctx.set_color(!cli.no_color);

    let config = ctx.config_mut();
    if let Some(dir) = &cli.descriptors.descriptors {
        config.descriptors.dir = Some(dir.clone());
    }
    if let Some(version) = &cli.descriptors.toolkit_version {
        config.descriptors.version = Some(version.clone());
    }

    Ok(ctx)
}

/// Request from the flags, falling back to the configured default request
/// when neither flag is given.
pub fn request(ctx: &GlobalContext, args: &RequestArgs) -> RequestedSet {
    if args.targets.is_none() && args.components.is_none() {
        return ctx.config().request();
    }

    RequestedSet::parse(
        args.targets.as_deref().unwrap_or(""),
        args.components.as_deref().unwrap_or(""),
    )
}

/// Profile from the flags layered over the configured profile.
pub fn profile(ctx: &GlobalContext, os: Option<Os>, internal: bool) -> Profile {
    let mut profile = ctx.config().profile();
    if let Some(os) = os {
        profile.os = os;
    }
    if internal {
        profile.internal = true;
    }
    profile
}
