//! `tkdeps graph` command

use anyhow::Result;

use crate::cli::GraphArgs;
use crate::commands::request;
use tkdeps::ops::to_dot;
use tkdeps::resolver::resolve;
use tkdeps::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: GraphArgs) -> Result<()> {
    let store = ctx.descriptor_store()?;
    let graph = store.graph()?;
    let closure = resolve(&request(ctx, &args.request), graph);

    print!("{}", to_dot(graph, &closure));

    Ok(())
}
