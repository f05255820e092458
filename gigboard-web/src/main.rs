//! gigboard-web - Venue/artist/show booking directory
//!
//! Serves the browsing, search and booking-form UI over a SQLite
//! database. Zero-config startup: the database is created on first run
//! inside the resolved data folder.

use anyhow::Result;
use clap::Parser;
use gigboard_common::config;
use gigboard_common::db::init_database;
use gigboard_web::{build_router, AppState};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "gigboard-web", about = "Venue/artist/show booking directory")]
struct Args {
    /// Data folder holding the SQLite database
    #[arg(long, env = "GIGBOARD_DATA")]
    data_dir: Option<String>,

    /// Address to bind the HTTP server to
    #[arg(long, env = "GIGBOARD_BIND", default_value = config::DEFAULT_BIND)]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting gigboard-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let data_dir = config::resolve_data_dir(args.data_dir.as_deref(), "GIGBOARD_DATA");
    let db_path = config::database_path(&data_dir);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("gigboard-web listening on http://{}", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
