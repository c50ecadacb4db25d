//! tkdeps CLI - component resolution for modular C++ toolkits

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use tkdeps::core::DescriptorError;
use tkdeps::util::diagnostic;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<DescriptorError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("tkdeps=debug")
    } else {
        EnvFilter::new("tkdeps=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::context(&cli)?;

    match cli.command {
        Commands::Plan(args) => commands::plan::execute(&ctx, args),
        Commands::Translate(args) => commands::translate::execute(&ctx, args),
        Commands::Reconcile(args) => commands::reconcile::execute(&ctx, args),
        Commands::Graph(args) => commands::graph::execute(&ctx, args),
        Commands::Options => commands::options::execute(&ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
