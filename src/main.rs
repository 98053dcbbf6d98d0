use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use guideresto::config::{self, Config};
use guideresto::console::{self, commands};
use guideresto::error::AppError;
use guideresto::runtime;

/// Restaurant guide: browse, vote and review restaurants.
#[derive(Parser)]
#[command(name = "guideresto")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQLite connection string, overrides DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Print results (and errors) as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,
    /// List every restaurant
    List,
    /// Show one restaurant with its ratings
    Show {
        /// Restaurant id
        id: i64,
    },
    /// List the evaluation criteria
    Criteria,
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env(cli.database_url)?;
    init_tracing(&config);
    config.print_summary();

    let state = runtime::init(&config).await?;

    let outcome = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => console::run(&state).await,
        Commands::List => commands::list(&state, cli.json).await,
        Commands::Show { id } => commands::show(&state, id, cli.json).await,
        Commands::Criteria => commands::criteria(&state, cli.json).await,
    };

    if let Err(err) = outcome {
        if cli.json
            && let Some(app_err) = err.downcast_ref::<AppError>()
        {
            println!("{}", serde_json::to_string_pretty(&app_err.info())?);
            std::process::exit(1);
        }
        return Err(err);
    }

    state.pool.close().await;
    Ok(())
}
