//! Skillgraph CLI - validates skill registry link graphs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use skillgraph_core::commands::{reachable, show, validate};
use skillgraph_core::config::Config;
use skillgraph_core::registry::Registry;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skillgraph")]
#[command(author, version, about = "Validate a skill registry's link graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Registry root (overrides SKILLGRAPH_REGISTRY and the config file)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Check links, skill reachability, and orphan nodes (default)
    Validate,

    /// Show a graph node's frontmatter and links
    Show {
        /// Graph node id (file name without .md)
        id: String,
    },

    /// List everything reachable from the root node
    Reachable,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter())
        .init();

    let cli = Cli::parse();

    // Config is loaded lazily so `config reset` still works on a broken file
    let resolve = || resolve_registry(cli.registry.as_deref(), cli.format);

    match cli.command.unwrap_or(Commands::Validate) {
        Commands::Validate => {
            let (registry, format) = resolve()?;
            cmd_validate(&registry, format, cli.quiet)
        }
        Commands::Show { id } => {
            let (registry, format) = resolve()?;
            cmd_show(&registry, &id, format).map(|_| ExitCode::SUCCESS)
        }
        Commands::Reachable => {
            let (registry, format) = resolve()?;
            cmd_reachable(&registry, format).map(|_| ExitCode::SUCCESS)
        }
        Commands::Config { action } => cmd_config(action, cli.quiet).map(|_| ExitCode::SUCCESS),
    }
}

/// `RUST_LOG` when set, otherwise warnings and above
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Registry and output format from flags, environment, and config file
fn resolve_registry(
    flag: Option<&Path>,
    format: Option<OutputFormat>,
) -> anyhow::Result<(Registry, OutputFormat)> {
    let config = Config::load()?;
    let format = match format {
        Some(format) => format,
        None if config.output.format == "json" => OutputFormat::Json,
        None => OutputFormat::Text,
    };

    let registry_config = config.registry.with_root_override(flag);
    debug!(root = %registry_config.root.display(), "Using registry");
    Ok((Registry::new(registry_config), format))
}

// ============================================================================
// Command Implementations
// ============================================================================

fn cmd_validate(
    registry: &Registry,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<ExitCode> {
    let report = match format {
        OutputFormat::Text => {
            let report = validate::run(registry, |line| {
                if !quiet {
                    println!("{}", line);
                }
            })?;
            if quiet {
                for issue in report.errors.iter().chain(&report.warnings) {
                    println!("{}", issue);
                }
            } else {
                print!("{}", validate::format_summary(&report, registry.root_node()));
            }
            report
        }
        OutputFormat::Json => {
            let report = validate::run(registry, |_| {})?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            report
        }
    };

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_show(registry: &Registry, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    let details = show::show_node(registry, id)?;
    match format {
        OutputFormat::Text => print!("{}", show::format_node(&details)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&details)?),
    }
    Ok(())
}

fn cmd_reachable(registry: &Registry, format: OutputFormat) -> anyhow::Result<()> {
    let entities = reachable::list_reachable(registry)?;
    match format {
        OutputFormat::Text => print!(
            "{}",
            reachable::format_reachable(&entities, registry.root_node())
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entities)?),
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for (key, value) in config.list()? {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }
    Ok(())
}
