//! `tkdeps reconcile` command

use anyhow::{Context, Result};

use crate::cli::ReconcileArgs;
use crate::commands::profile;
use tkdeps::ops::reconcile::{absent_components, read_export_listing, reconcile};
use tkdeps::util::diagnostic::{self, Diagnostic};
use tkdeps::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: ReconcileArgs) -> Result<()> {
    let store = ctx.descriptor_store()?;
    let graph = store.graph()?;
    let exports = read_export_listing(&ctx.cwd().join(&args.exports))?;
    let profile = profile(ctx, args.os, args.internal);

    for component in absent_components(graph, &exports) {
        let warning = Diagnostic::warning(format!("component `{}` is absent", component))
            .with_context(format!(
                "none of its libraries were exported: {}",
                graph.libraries(&component).join(" ")
            ));
        diagnostic::emit(&warning, ctx.color());
    }

    let records = reconcile(graph, &exports, &profile);

    let json = serde_json::to_string_pretty(&records)
        .context("failed to serialize component metadata")?;
    println!("{}", json);

    Ok(())
}
