//! astrobiomers - CLI for the space-biology literature knowledge-graph ETL
//! pipeline (§6 "CLI commands").

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "astrobiomers")]
#[command(about = "Space-biology literature knowledge-graph ETL pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the flat key/value config file (default: ./.env)
    #[arg(long, global = true, default_value = ".env")]
    config: std::path::PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pipeline
    Build(cmd::build::BuildArgs),
    /// Report readiness (models loaded, database reachable)
    Status(cmd::status::StatusArgs),
    /// Query the graph and print node/edge counts by kind/type
    Stats(cmd::stats::StatsArgs),
    /// Create constraints and indexes (idempotent)
    InitDb,
    /// Run only the acquisition stage
    AcquireCurated(cmd::acquire_curated::AcquireCuratedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let multi = indicatif::MultiProgress::new();
    astrobiomers_core::init_logging(false, cli.verbose, Some(&multi));

    install_shutdown_handler();

    let env = astrobiomers_pipeline::config::EnvConfig::load(&cli.config)?;

    match cli.command {
        Command::Build(args) => cmd::build::run(args, &env).await,
        Command::Status(args) => cmd::status::run(args, &env).await,
        Command::Stats(args) => cmd::stats::run(args, &env).await,
        Command::InitDb => cmd::init_db::run(&env).await,
        Command::AcquireCurated(args) => cmd::acquire_curated::run(args, &env).await,
    }
}

/// Cooperative shutdown on Ctrl-C / SIGTERM (§5 "Cancellation & timeouts").
fn install_shutdown_handler() {
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("shutdown requested (SIGINT)");
            astrobiomers_core::request_shutdown();
        }
    });

    #[cfg(unix)]
    tokio::spawn(async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut term) = signal(SignalKind::terminate()) {
            term.recv().await;
            log::warn!("shutdown requested (SIGTERM)");
            astrobiomers_core::request_shutdown();
        }
    });
}
