//! Configuration management commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Initialize configuration
    Init {
        /// Default namespace
        #[arg(long)]
        namespace: Option<String>,

        /// Kubeconfig context
        #[arg(long)]
        context: Option<String>,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}

pub fn execute(args: ConfigArgs, path: Option<&str>) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let config = Config::load(path)?;

            output::print_header("Current Configuration");
            output::print_kv("Namespace", &config.namespace);
            output::print_kv("Context", config.context.as_deref().unwrap_or("(current)"));
            output::print_kv("Output", &config.output);
            output::print_kv("Timeout", format!("{}s", config.timeout));
        }

        ConfigCommands::Init {
            namespace,
            context,
            force,
        } => {
            let target = path
                .map(std::path::PathBuf::from)
                .or_else(Config::default_config_path);

            if let Some(ref existing) = target {
                if existing.exists() && !force {
                    output::warning(format!(
                        "Configuration file already exists at {:?}. Use --force to overwrite.",
                        existing
                    ));
                    return Ok(());
                }
            }

            let mut config = Config::default();
            if let Some(namespace) = namespace {
                config.namespace = namespace;
            }
            config.context = context;

            let written = config.save(path)?;
            output::success(format!("Configuration written to {:?}", written));
        }

        ConfigCommands::Path => match path.map(std::path::PathBuf::from).or_else(Config::default_config_path) {
            Some(p) => println!("{}", p.display()),
            None => output::warning("No configuration directory available"),
        },
    }

    Ok(())
}
