use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jobly_api::app::app;
use jobly_api::auth::create_token;
use jobly_api::config;
use jobly_api::database::DatabaseManager;
use jobly_api::handlers::AppState;

#[derive(Parser)]
#[command(name = "jobly-api")]
#[command(about = "Job board API - companies and jobs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Bind address, overrides JOBLY_API_HOST")]
        host: Option<String>,
        #[arg(long, help = "Port, overrides JOBLY_API_PORT / PORT")]
        port: Option<u16>,
    },

    #[command(about = "Create the companies and jobs tables in the configured database")]
    InitSchema,

    #[command(about = "Print a signed bearer token")]
    Token {
        #[arg(long)]
        username: String,
        #[arg(long, help = "Grant admin rights")]
        admin: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting Jobly API in {:?} mode", config.environment);

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => serve(host, port).await,
        Commands::InitSchema => {
            let pool = DatabaseManager::connect(&config.database).await?;
            DatabaseManager::apply_schema(&pool).await?;
            pool.close().await;
            Ok(())
        }
        Commands::Token { username, admin } => {
            println!("{}", create_token(&username, admin)?);
            Ok(())
        }
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let bind_addr = format!(
        "{}:{}",
        host.unwrap_or_else(|| config.api.host.clone()),
        port.unwrap_or(config.api.port)
    );
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Jobly API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(pool.clone())))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    pool.close().await;
    tracing::info!("Closed database pool");
    Ok(())
}
