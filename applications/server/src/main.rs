/// Musicapp Server - playlist REST backend
use clap::{Parser, Subcommand};
use musicapp_server::{
    config::ServerConfig,
    create_router,
    services::{cache, AuthService, MessageProducer, RedisProducer},
    state::AppState,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "musicapp-server")]
#[command(about = "Playlist REST backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "MUSICAPP_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Apply pending database migrations and exit
    Migrate {
        /// Configuration file path
        #[arg(short, long, env = "MUSICAPP_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musicapp_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Migrate { config } => {
            migrate(config).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load_from(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn connect_database(config: &ServerConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool = musicapp_storage::create_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.acquire_timeout_secs,
    )
    .await?;
    musicapp_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");
    Ok(pool)
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting Musicapp Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = connect_database(&config).await?;

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ));

    let cache_backend = cache::create_cache_backend(&config.redis).await;
    tracing::info!(
        mode = cache_backend.mode(),
        ttl_secs = config.cache.ttl_seconds,
        "Cache initialized"
    );

    // Exports always go through Redis, even when the cache runs locally
    let producer: Arc<dyn MessageProducer> =
        Arc::new(RedisProducer::new(cache::create_redis_pool(&config.redis)?));

    let app_state = AppState::new(
        pool,
        auth_service,
        cache_backend,
        config.cache.ttl(),
        producer,
    );

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn migrate(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Only the database section matters here
    let config = ServerConfig::load_from(config_path.as_deref())?;
    connect_database(&config).await?;
    tracing::info!("Migrations applied");
    Ok(())
}
