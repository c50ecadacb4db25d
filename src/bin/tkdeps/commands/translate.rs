//! `tkdeps translate` command

use anyhow::Result;

use crate::cli::TranslateArgs;
use crate::commands::profile;
use tkdeps::resolver::{normalize_key, Translator};
use tkdeps::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: TranslateArgs) -> Result<()> {
    let store = ctx.descriptor_store()?;
    let graph = store.graph()?;
    let profile = profile(ctx, args.os, args.internal);
    let translator = Translator::new(graph.tables(), &profile);

    for key in &args.keys {
        let canonical = normalize_key(key);
        let label = if canonical == key {
            key.clone()
        } else {
            format!("{} ({})", key, canonical)
        };

        match translator.translate(key) {
            Some(pkgs) if !pkgs.is_empty() => {
                let pkgs: Vec<_> = pkgs.iter().map(|p| p.as_str()).collect();
                println!("{} -> {}", label, pkgs.join(" "));
            }
            _ => println!("{} -> (none)", label),
        }
    }

    Ok(())
}
