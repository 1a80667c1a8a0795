use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use people_api::{logging, Config, Server, Store};

#[derive(Parser)]
#[command(name = "people-api")]
#[command(version)]
#[command(about = "HTTP CRUD service for people records", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Apply pending schema migrations and exit
    Migrate {
        /// SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("invalid configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.json_logs {
        config.json_logs = true;
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            database,
        } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(database) = database {
                config.database_path = database;
            }
            logging::init_logging(&config.log_level, config.json_logs);
            serve(config).await
        }
        Commands::Migrate { database } => {
            if let Some(database) = database {
                config.database_path = database;
            }
            logging::init_logging(&config.log_level, config.json_logs);
            migrate(&config)
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    let addr = config
        .listen_addr()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    let store = open_store(&config)?;
    if config.migrate_on_start {
        store.migrate().context("failed to apply migrations")?;
    }

    Server::new(addr, store)
        .run()
        .await
        .context("server error")
}

fn migrate(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let applied = store.migrate().context("failed to apply migrations")?;

    if applied.is_empty() {
        println!("Database is up to date");
    } else {
        for id in applied {
            println!("Applied {id}");
        }
    }
    Ok(())
}

fn open_store(config: &Config) -> Result<Store> {
    Store::open(&config.database_path).with_context(|| {
        format!(
            "failed to open database {}",
            config.database_path.display()
        )
    })
}
