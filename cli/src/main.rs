//! Beszel CLI — command-line interface for a Beszel monitoring hub
//!
//! Uses the `beszel` client to talk to the hub's collection API.

mod commands;
mod output;

use std::path::PathBuf;

use beszel::RecordType;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "beszel", version, about = "Manage your Beszel server monitoring from the command line")]
struct Cli {
    /// Hub URL (falls back to the saved config)
    #[arg(long, global = true, env = "BESZEL_URL")]
    url: Option<String>,

    /// Auth token (falls back to the saved config)
    #[arg(long, global = true, env = "BESZEL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and save credentials
    Login {
        /// Hub URL
        #[arg(long = "server", short = 's')]
        server: Option<String>,
        /// Email address
        #[arg(long, short = 'e')]
        email: Option<String>,
        /// Password
        #[arg(long, short = 'p')]
        password: Option<String>,
    },
    /// Clear saved credentials
    Logout,
    /// Show current configuration
    ConfigShow,
    /// Set the hub URL
    ConfigSetUrl {
        #[arg(value_name = "URL")]
        hub_url: String,
    },
    /// Show current user info
    Whoami,
    /// List all monitored systems
    Systems {
        /// Hub filter expression
        #[arg(long, short = 'f', default_value = "")]
        filter: String,
    },
    /// Show system details
    System {
        system_id: String,
    },
    /// Update a system
    SystemUpdate {
        system_id: String,
        #[arg(long, short = 'n')]
        name: Option<String>,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Delete a system
    SystemDelete {
        system_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show system stats history
    Stats {
        system_id: String,
        /// Aggregation window
        #[arg(long = "type", short = 't', default_value = "1m")]
        record_type: RecordType,
        /// Number of records to show
        #[arg(long, short = 'l', default_value_t = 10)]
        limit: u32,
    },
    /// List containers for a system
    Containers {
        system_id: String,
    },
    /// List alerts
    Alerts {
        /// Only alerts of this system
        #[arg(long = "system", short = 's', default_value = "")]
        system_id: String,
    },
    /// Delete an alert
    AlertDelete {
        alert_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show alert history
    AlertHistory {
        /// Number of records to show
        #[arg(long, short = 'l', default_value_t = beszel::DEFAULT_HISTORY_PER_PAGE)]
        limit: u32,
    },
    /// List records from any collection
    Records {
        collection: String,
        #[arg(long, short = 'f', default_value = "")]
        filter: String,
        /// Sort expression (e.g. -created)
        #[arg(long, short = 's', default_value = "")]
        sort: String,
        #[arg(long, short = 'l', default_value_t = 30)]
        limit: u32,
        /// Relations to expand
        #[arg(long, short = 'e', default_value = "")]
        expand: String,
    },
    /// Show a single record from any collection
    Record {
        collection: String,
        record_id: String,
        #[arg(long, short = 'e', default_value = "")]
        expand: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context::new(cli.url, cli.token, cli.config, cli.format);

    let result = match cli.command {
        Commands::Login { server, email, password } => commands::run_login(&ctx, server, email, password),
        Commands::Logout => commands::run_logout(&ctx),
        Commands::ConfigShow => commands::run_config_show(&ctx),
        Commands::ConfigSetUrl { hub_url } => commands::run_config_set_url(&ctx, &hub_url),
        Commands::Whoami => commands::run_whoami(&ctx),
        Commands::Systems { filter } => commands::run_systems(&ctx, &filter),
        Commands::System { system_id } => commands::run_system(&ctx, &system_id),
        Commands::SystemUpdate { system_id, name, host, port } => {
            commands::run_system_update(&ctx, &system_id, name, host, port)
        }
        Commands::SystemDelete { system_id, yes } => commands::run_system_delete(&ctx, &system_id, yes),
        Commands::Stats { system_id, record_type, limit } => {
            commands::run_stats(&ctx, &system_id, record_type, limit)
        }
        Commands::Containers { system_id } => commands::run_containers(&ctx, &system_id),
        Commands::Alerts { system_id } => commands::run_alerts(&ctx, &system_id),
        Commands::AlertDelete { alert_id, yes } => commands::run_alert_delete(&ctx, &alert_id, yes),
        Commands::AlertHistory { limit } => commands::run_alert_history(&ctx, limit),
        Commands::Records { collection, filter, sort, limit, expand } => {
            commands::run_records(&ctx, &collection, &filter, &sort, limit, &expand)
        }
        Commands::Record { collection, record_id, expand } => {
            commands::run_record(&ctx, &collection, &record_id, &expand)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
