//! `tkdeps plan` command

use anyhow::{Context, Result};

use crate::cli::PlanArgs;
use crate::commands::{profile, request};
use tkdeps::ops::plan::{plan_many, BuildPlan};
use tkdeps::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: PlanArgs) -> Result<()> {
    let store = ctx.descriptor_store()?;
    let graph = store.graph()?;
    let request = request(ctx, &args.request);

    let profiles = if args.os.is_empty() {
        vec![profile(ctx, None, args.internal)]
    } else {
        args.os
            .iter()
            .map(|os| profile(ctx, Some(os.clone()), args.internal))
            .collect()
    };

    let plans = plan_many(graph, &request, &profiles);

    if args.json {
        let json = match plans.as_slice() {
            [single] => serde_json::to_string_pretty(single),
            all => serde_json::to_string_pretty(all),
        };
        let json = json.context("failed to serialize build plan")?;
        println!("{}", json);
        return Ok(());
    }

    for plan in &plans {
        print_plan(plan);
    }

    Ok(())
}

fn print_plan(plan: &BuildPlan) {
    let visibility = if plan.profile.internal { "internal" } else { "public" };
    println!("[{} / {}]", plan.profile.os, visibility);

    if plan.universal {
        println!("components: all ({})", plan.components.len());
    } else {
        println!(
            "components: {}",
            plan.components.iter().cloned().collect::<Vec<_>>().join(" ")
        );
        println!(
            "targets: {}",
            plan.component_targets.iter().cloned().collect::<Vec<_>>().join(" ")
        );
    }

    println!("packages:");
    for pkg in &plan.packages {
        println!("  {}", pkg);
    }
}
