/// Lyra Server - song catalog API and web player host
use clap::{Parser, Subcommand};
use lyra_server::{config::ServerConfig, create_router, state::AppState, StaticDirs};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lyra-server")]
#[command(about = "Lyra music player server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "LYRA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Add a song row for every audio file in the music directory
    Seed {
        /// Directory to scan (defaults to the configured music directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// URL prefix the files are served under
        #[arg(long, default_value = "/music")]
        url_prefix: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyra_server=info,lyra_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await?,
        Commands::Seed { dir, url_prefix } => seed(config, dir, &url_prefix).await?,
    }

    Ok(())
}

async fn open_database(config: &ServerConfig) -> anyhow::Result<sqlx::SqlitePool> {
    ensure_parent_dir(&config.storage.database_url).await?;

    let pool = lyra_storage::create_pool(&config.storage.database_url).await?;
    lyra_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    Ok(pool)
}

/// Create the directory holding a file-backed `SQLite` database
async fn ensure_parent_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = PathBuf::from(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Lyra Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = open_database(&config).await?;

    let dirs = StaticDirs::from_config(&config);
    if !dirs.music_dir.is_dir() {
        tracing::warn!(dir = %dirs.music_dir.display(), "Music directory does not exist");
    }
    if !dirs.web_dir.join("index.html").is_file() {
        tracing::warn!(dir = %dirs.web_dir.display(), "No index.html in web directory");
    }

    // Build router
    let app = create_router(AppState::new(pool), &dirs);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn seed(config: ServerConfig, dir: Option<PathBuf>, url_prefix: &str) -> anyhow::Result<()> {
    let pool = open_database(&config).await?;
    let dir = dir.unwrap_or_else(|| config.storage.music_dir.clone());

    let report = lyra_storage::songs::seed_from_dir(&pool, &dir, url_prefix).await?;

    println!(
        "Seeded {}: {} inserted, {} already present",
        dir.display(),
        report.inserted,
        report.skipped
    );

    Ok(())
}
