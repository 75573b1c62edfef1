use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use widgetlab::backend::{HttpBackend, MemoryBackend, SettingsBackend};
use widgetlab::commands;
use widgetlab::config;
use widgetlab::fixtures;
use widgetlab::store::ConfigStore;
use widgetlab::widget::{
    WidgetKind, SECTION_EYECATCHER, SECTION_GREETING, SECTION_MODIFIER,
};

/// Log level used when neither the CLI nor the config file sets one
const DEFAULT_LOG_LEVEL: &str = "info";

/// Log destination when none is configured (logging disabled)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "widgetlab")]
#[command(
    about = "Customer engagement widget configurator",
    long_about = "Customer engagement widget configurator\n\nIf no command is specified, every canonical configuration section is shown."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Settings backend base URL (overrides the config file)
    #[arg(short = 'b', long, global = true)]
    backend_url: Option<String>,

    /// Use the in-memory backend preloaded with sample sections
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    /// Chat bubble launcher
    #[value(name = "bubble")]
    Bubble,
    /// Docked chat bar
    #[value(name = "chat-bar")]
    ChatBar,
    /// Open chat panel
    #[value(name = "chat-widget-open")]
    ChatWidgetOpen,
    /// Eyecatcher teaser
    #[value(name = "eyecatcher")]
    Eyecatcher,
    /// Greeting prompt
    #[value(name = "greeting")]
    Greeting,
}

impl KindArg {
    /// Convert CLI KindArg enum to widget::WidgetKind
    fn to_widget_kind(self) -> WidgetKind {
        match self {
            KindArg::Bubble => WidgetKind::Bubble,
            KindArg::ChatBar => WidgetKind::ChatBar,
            KindArg::ChatWidgetOpen => WidgetKind::ChatWidgetOpen,
            KindArg::Eyecatcher => WidgetKind::Eyecatcher,
            KindArg::Greeting => WidgetKind::Greeting,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show a configuration section, fetched with fallback to the defaults
    Show {
        /// Section name (e.g. modifier, eyecatcher, greeting)
        section: String,

        /// Print the raw payload as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set one field in a section and persist it
    Set {
        /// Section name (e.g. modifier, eyecatcher, greeting)
        section: String,

        /// Field name (e.g. bubbleSize)
        field: String,

        /// New value; parsed as bool, number, or text
        value: String,
    },
    /// List the editing ranges of all constrained numeric fields
    Ranges,
    /// Print the static default settings for a widget variant
    Defaults {
        /// Widget variant
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// Display current configuration
    Config,
}

fn create_backend(
    mock: bool,
    backend_url: Option<&str>,
    config: &config::Config,
) -> Arc<dyn SettingsBackend> {
    if mock {
        return Arc::new(MemoryBackend::with_sections(fixtures::preloaded_sections()));
    }

    let url = backend_url
        .map(|url| url.to_string())
        .or_else(|| config.backend_url.clone());
    let url = match url {
        Some(url) => url,
        None => {
            eprintln!(
                "No backend URL configured. Pass --backend-url, set backend_url in config.toml, or use --mock."
            );
            std::process::exit(1);
        }
    };

    match HttpBackend::new(&url, config.request_timeout_secs) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            let error_msg = format!("Failed to create settings backend client: {:#}", e);
            tracing::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    }
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Print the operator configuration and where it was read from
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!(
        "Configuration File: {} (Exists: {})",
        path_str,
        if exists { "yes" } else { "no" }
    );
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!(
        "backend_url: {}",
        cfg.backend_url.as_deref().unwrap_or("(not set)")
    );
    println!("request_timeout_secs: {}", cfg.request_timeout_secs);
}

/// Pick the effective log level and file, CLI flags winning over the
/// config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Show every canonical section in one pass
async fn run_overview(store: &ConfigStore) -> anyhow::Result<()> {
    for section in [SECTION_MODIFIER, SECTION_EYECATCHER, SECTION_GREETING] {
        commands::show::run(store, section, false).await?;
        println!();
    }
    Ok(())
}

/// Dispatch a backend-requiring command to its handler
async fn execute_command(store: &ConfigStore, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Config | Commands::Ranges | Commands::Defaults { .. } => {
            unreachable!("command should be handled before execute_command")
        }
        Commands::Show { section, json } => commands::show::run(store, &section, json).await,
        Commands::Set {
            section,
            field,
            value,
        } => commands::set::run(store, &section, &field, &value).await,
    }
}

/// Print a command failure and exit non-zero
fn finish(result: anyhow::Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // If no subcommand, show every canonical section
    if cli.command.is_none() {
        let backend = create_backend(cli.mock, cli.backend_url.as_deref(), &config);
        let store = ConfigStore::new(backend);
        finish(run_overview(&store).await);
        return;
    }

    let command = cli.command.unwrap();

    // Handle commands that need no backend
    match command {
        Commands::Config => {
            handle_config_command();
            return;
        }
        Commands::Ranges => {
            finish(commands::ranges::run());
            return;
        }
        Commands::Defaults { kind } => {
            finish(commands::defaults::run(kind.to_widget_kind()));
            return;
        }
        _ => {}
    }

    // Create backend and execute command
    let backend = create_backend(cli.mock, cli.backend_url.as_deref(), &config);
    let store = ConfigStore::new(backend);
    finish(execute_command(&store, command).await);
}
