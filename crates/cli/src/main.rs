//! evalboard CLI
//!
//! Command-line interface for evaluating system outputs and uploading
//! benchmark results.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use evalboard_cli::commands::evaluate::EvaluateArgs;
use evalboard_cli::commands::upload_benchmark::UploadBenchmarkArgs;
use evalboard_cli::commands::{config as config_cmd, evaluate, upload_benchmark, CommandContext};
use evalboard_cli::config::Config;
use evalboard_sdk::Environment;

/// Service deployment
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ServerArg {
    /// Production service
    Main,
    /// Pre-release service
    Staging,
    /// Service running on this machine
    Local,
}

impl From<ServerArg> for Environment {
    fn from(s: ServerArg) -> Self {
        match s {
            ServerArg::Main => Environment::Main,
            ServerArg::Staging => Environment::Staging,
            ServerArg::Local => Environment::Local,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "evalboard")]
#[command(author, version, about = "evalboard CLI")]
#[command(long_about = "Command-line interface for the evalboard evaluation service.\n\n\
    Evaluate system output files and upload results for whole benchmarks.")]
#[command(propagate_version = true)]
struct Cli {
    /// Account email (overrides config)
    #[arg(long, global = true, env = "EB_USERNAME")]
    username: Option<String>,

    /// API key (overrides config)
    #[arg(long, global = true, env = "EB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Service deployment (overrides config)
    #[arg(long, global = true, value_enum)]
    server: Option<ServerArg>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a single system output file
    #[command(alias = "e")]
    Evaluate(EvaluateArgs),

    /// Upload system outputs for every dataset of a benchmark
    #[command(alias = "ub")]
    UploadBenchmark(UploadBenchmarkArgs),

    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Reset configuration to defaults
    Reset,
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "evalboard", &mut std::io::stdout());
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    // Flags override config file and environment
    if let Some(username) = cli.username {
        config.username = Some(username);
    }
    if let Some(api_key) = cli.api_key {
        config.api_key = Some(api_key);
    }
    if let Some(server) = cli.server {
        config.environment = server.into();
        config.api_url = None;
    }
    if cli.verbose {
        config.debug = true;
    }
    if cli.no_color || !config.colored {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => config_cmd::show(&config),
            Some(ConfigCommands::Get { key }) => config_cmd::get(&config, &key),
            Some(ConfigCommands::Set { key, value }) => {
                // Persist only what the file held, not flag or environment overrides
                let mut stored = Config::load_file()?;
                config_cmd::set(&mut stored, &key, &value)
            }
            Some(ConfigCommands::Reset) => config_cmd::reset(),
        },

        Commands::Evaluate(args) => {
            let ctx = CommandContext::new(config)?;
            evaluate::evaluate(&ctx, args).await
        }

        Commands::UploadBenchmark(args) => {
            let ctx = CommandContext::new(config)?;
            upload_benchmark::upload_benchmark(&ctx, args).await
        }

        Commands::Completions { .. } => {
            // Already handled in main
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    // Handle completions command early (doesn't need config)
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    let verbose = cli.verbose;
    if let Err(e) = run(cli).await {
        use colored::Colorize;
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if verbose {
            eprintln!("\n{}", "Backtrace:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
