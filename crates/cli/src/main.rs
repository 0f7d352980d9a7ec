mod page_commands;
mod plugin_commands;

use {
    clap::{Parser, Subcommand},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "filaman", about = "FilaMan plugin-managed markdown site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plugin management.
    Plugins {
        #[command(subcommand)]
        action: plugin_commands::PluginAction,
    },
    /// Markdown page inspection.
    Pages {
        #[command(subcommand)]
        action: page_commands::PageAction,
    },
}

fn init_tracing(level: &str, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    let config = filaman_config::discover_and_load();

    let ok = match cli.command {
        Commands::Plugins { action } => plugin_commands::run(action, &config).await?,
        Commands::Pages { action } => page_commands::run(action, &config)?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
