#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    AskInput, AskStrategy, CommandStrategy, InfoStrategy, InitStrategy, RunInput, RunStrategy,
    VersionStrategy,
};

#[derive(Parser)]
#[command(name = "jarvis")]
#[command(about = "jarvis voice-style command assistant", long_about = None)]
struct Cli {
    /// Log interpreter decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Run {
        /// Text-to-speech program to read responses aloud (e.g. say, espeak)
        #[arg(long)]
        tts: Option<String>,

        /// Seconds to wait for each utterance before asking again
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Interpret a single utterance and print the response
    Ask {
        /// What to say to the assistant
        #[arg(short = 'm', long)]
        message: String,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and intent precedence
    Info,
    /// Show version
    Version,
}

/// Level used when `RUST_LOG` is unset.
const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(cli.verbose)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run { tts, timeout } => {
            RunStrategy.execute(RunInput { tts, timeout }).await?;
            // Tokio's stdin reader sits on a blocking thread that would keep
            // the runtime alive until another line arrives.
            std::process::exit(0);
        }
        Commands::Ask { message } => AskStrategy.execute(AskInput { message }).await?,
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Info => InfoStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
