use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cyclewise-cli", version, about = "Cyclewise CLI")]
struct Cli {
    /// Debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Advise whether a task suits a cycle phase
    Advise(commands::advise::AdviseArgs),
    /// Search the knowledge base
    Search(commands::search::SearchArgs),
    /// Phase metadata
    Phase {
        #[command(subcommand)]
        action: commands::phase::PhaseAction,
    },
    /// Engine health
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("CYCLEWISE_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Advise(args) => commands::advise::run(args).await,
        Commands::Search(args) => commands::search::run(args),
        Commands::Phase { action } => commands::phase::run(action),
        Commands::Health { json } => commands::health::run(json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
