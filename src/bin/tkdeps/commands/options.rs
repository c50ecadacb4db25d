//! `tkdeps options` command

use anyhow::Result;

use tkdeps::core::DependencyOptions;
use tkdeps::GlobalContext;

pub fn execute(ctx: &GlobalContext) -> Result<()> {
    let store = ctx.descriptor_store()?;
    let graph = store.graph()?;

    let mut options = DependencyOptions::new();
    graph.tables().options.apply_overrides(&mut options);

    for (scope, values) in &options {
        for (name, value) in values {
            println!("{}:{}={}", scope, name, value);
        }
    }

    Ok(())
}
