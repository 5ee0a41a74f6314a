use crate::prelude::*;
use clap::Parser;

mod compare;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Compare two PDF files word by word and write a side-by-side copy with the differences highlighted"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "PDFDIFF_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Compare two PDF files and highlight their differences
    Compare(crate::compare::CompareArgs),
}

/// Default `env_logger` filter, overridden by `RUST_LOG`.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,pdfdiff=debug,pdf=debug,pdfdiff_core=debug"
    } else {
        "warn,pdfdiff=info,pdf=info,pdfdiff_core=info"
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(app.global.verbose)),
    )
    .init();

    match app.command {
        SubCommands::Compare(args) => crate::compare::run(args, app.global),
    }
}
