//! probe-harness CLI
//!
//! Runs the standard error probes and prints one line per probe.

use clap::{Args, Parser, Subcommand};
use probe_harness::commands;
use probe_harness::fixtures::standard_probes;
use tracing::warn;

#[derive(Parser)]
#[command(name = "probe-harness")]
#[command(about = "Runs error probes and reports whether each failed as expected")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the probes (default when no command is given)
    Run(RunArgs),
    /// List the probes and the failure kind each expects
    List,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Only run the named probe (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Exit with status 1 if any probe is not matched
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // The runner records panics inside probe bodies as Unmatched outcomes;
    // log every panic instead of printing the default banner
    std::panic::set_hook(Box::new(|info| {
        warn!(panic = %info, "panic");
    }));

    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::List => {
            print!("{}", commands::list::render_list(&standard_probes()));
            Ok(())
        }
        Commands::Run(args) => {
            let config = commands::run::RunConfig {
                only: args.only,
                json: args.json,
                strict: args.strict,
            };

            let report = commands::run::run(&config)?;
            println!("{}", commands::run::format_report(&report, &config)?.trim_end());

            if config.strict && !report.summary.all_matched() {
                std::process::exit(1);
            }

            Ok(())
        }
    }
}
