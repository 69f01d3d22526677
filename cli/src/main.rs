//! snapctl - Command-line interface for volume snapshot schedules

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

mod client;
mod commands;
mod config;
mod output;

use commands::{config as config_cmd, crd, create, delete, get};

/// snapctl - Manage volume snapshot schedules
#[derive(Parser, Debug)]
#[command(name = "snapctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(long, global = true, env = "SNAPCTL_CONFIG")]
    config: Option<String>,

    /// Namespace to operate in
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    output: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create resources
    Create(create::CreateArgs),

    /// Display resources
    Get(get::GetArgs),

    /// Delete resources
    Delete(delete::DeleteArgs),

    /// Print the VolumeSnapshotSchedule CustomResourceDefinition
    Crd,

    /// Configuration management
    Config(config_cmd::ConfigArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn log_level(name: &str, verbose: bool) -> Level {
    if verbose {
        return Level::DEBUG;
    }
    match name {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(log_level(&cli.log_level, cli.verbose))
        .with_target(true)
        .with_writer(std::io::stderr);

    if cli.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = config::Config::load(cli.config.as_deref())?;
    let namespace = cli.namespace.unwrap_or_else(|| cfg.namespace.clone());
    let format = cli
        .output
        .unwrap_or_else(|| output::OutputFormat::from_config(&cfg.output));

    debug!(namespace = %namespace, ?format, "Resolved invocation settings");

    match cli.command {
        Commands::Create(args) => create::execute(args, &cfg, &namespace).await,
        Commands::Get(args) => get::execute(args, &cfg, &namespace, format).await,
        Commands::Delete(args) => delete::execute(args, &cfg, &namespace).await,
        Commands::Crd => crd::execute(format),
        Commands::Config(args) => config_cmd::execute(args, cli.config.as_deref()),
        Commands::Completion { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "snapctl", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_logging(&cli)?;

    let verbose = cli.verbose;
    if let Err(e) = run(cli).await {
        if verbose {
            output::error(format!("{:?}", e));
        } else {
            output::error(e);
        }
        std::process::exit(1);
    }

    Ok(())
}
