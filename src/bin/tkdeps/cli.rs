//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use tkdeps::Os;

/// tkdeps - component resolution for modular C++ toolkits
#[derive(Parser)]
#[command(name = "tkdeps")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Global config directory (defaults to ~/.tkdeps)
    #[arg(long, global = true, env = "TKDEPS_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(flatten)]
    pub descriptors: DescriptorArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Descriptor location overrides.
#[derive(Args)]
pub struct DescriptorArgs {
    /// Directory holding the descriptor files
    #[arg(long, global = true, env = "TKDEPS_DESCRIPTORS")]
    pub descriptors: Option<PathBuf>,

    /// Toolkit version selecting `dependencies-X.Y.yml`
    #[arg(long, global = true)]
    pub toolkit_version: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the components and external packages to build
    Plan(PlanArgs),

    /// Translate requirement keys into package coordinates
    Translate(TranslateArgs),

    /// Reconcile the graph with what a build exported
    Reconcile(ReconcileArgs),

    /// Print the component graph as Graphviz DOT
    Graph(GraphArgs),

    /// Show the option overrides applied to external packages
    Options,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Requested targets and components.
#[derive(Args)]
pub struct RequestArgs {
    /// Target libraries to build (comma, semicolon or space separated)
    #[arg(long)]
    pub targets: Option<String>,

    /// Components to build (comma, semicolon or space separated)
    #[arg(long)]
    pub components: Option<String>,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Target OS; repeat or separate with commas to plan for several
    #[arg(long, value_delimiter = ',')]
    pub os: Vec<Os>,

    /// Prefer internal-only requirement mappings
    #[arg(long)]
    pub internal: bool,

    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct TranslateArgs {
    /// Requirement keys to translate
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Target OS
    #[arg(long)]
    pub os: Option<Os>,

    /// Prefer internal-only requirement mappings
    #[arg(long)]
    pub internal: bool,
}

#[derive(Args)]
pub struct ReconcileArgs {
    /// Export listing produced by the build
    #[arg(long)]
    pub exports: PathBuf,

    /// Target OS
    #[arg(long)]
    pub os: Option<Os>,

    /// Prefer internal-only requirement mappings
    #[arg(long)]
    pub internal: bool,
}

#[derive(Args)]
pub struct GraphArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
