//! CLI entry and dispatch.

use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use clap::Parser;
use maxx_core::config::{self, paths};
use maxx_core::interrupt;
use maxx_core::logging::{self, WorkerGuard};

mod commands;

#[derive(Parser)]
#[command(name = "maxx")]
#[command(version)]
#[command(about = "GPT_MAXX: ask politely, keep your answer secret")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the model from config
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Do not record prompts and responses
    #[arg(long = "no-history", global = true)]
    no_history: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sends one prompt and prints the response
    Ask {
        /// The prompt to send (raw, unmasked)
        #[arg(short, long)]
        prompt: String,
    },

    /// Prints how a prompt is shown on screen
    Mask {
        /// The raw prompt text
        #[arg(value_name = "TEXT")]
        text: String,

        /// Cover phrase to overlay on the secret
        #[arg(long, value_name = "PHRASE")]
        cover: Option<String>,
    },

    /// Inspect saved prompts and responses
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum HistoryCommands {
    /// Lists recent exchanges, newest last
    List {
        /// Maximum number of exchanges to show
        #[arg(short, long, default_value = "20")]
        limit: NonZeroUsize,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print a fresh config generated from defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.command.is_none());
    interrupt::init()?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// The TUI owns the terminal, so it logs to a file; everything else logs to
/// stderr. A logging failure is reported and otherwise ignored.
fn init_logging(interactive: bool) -> Option<WorkerGuard> {
    let result = if interactive {
        logging::init_file_logging(&paths::logs_dir()).map(Some)
    } else {
        logging::init_stderr_logging().map(|()| None)
    };

    result.unwrap_or_else(|e| {
        eprintln!("Warning: Could not initialize logging: {e:#}");
        None
    })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;

    let Cli {
        command,
        model,
        no_history,
    } = cli;

    if let Some(model) = model {
        config.model = model;
    }
    if no_history {
        config.history.enabled = false;
    }

    // default to chat mode
    let Some(command) = command else {
        return commands::chat::run(&config).await;
    };

    match command {
        Commands::Ask { prompt } => commands::ask::run(&prompt, &config).await,
        Commands::Mask { text, cover } => {
            commands::mask::run(&text, cover.as_deref(), &config);
            Ok(())
        }
        Commands::History { command } => match command {
            HistoryCommands::List { limit } => commands::history::list(limit.get()),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}
