use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use casting_agency::config::Config;
use casting_agency::db::{self, AppState};
use casting_agency::jwt::{JwksCache, TokenVerifier};

#[derive(Debug, Parser)]
#[command(name = "casting-agency", version, about = "Casting agency actors and movies API")]
struct Cli {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database file (overrides DATABASE_PATH)
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casting_agency=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(path) = cli.database {
        config.database_path = path;
    }

    let pool = db::create_pool(&config.database_path)
        .with_context(|| format!("opening database {}", config.database_path))?;

    let keys = JwksCache::remote(&config.jwks_url, config.jwks_timeout, config.jwks_cache_ttl)?;
    let verifier = TokenVerifier::new(keys, config.issuer(), &config.api_audience)
        .with_leeway(config.jwt_leeway);

    let state = AppState {
        db: pool,
        verifier: Arc::new(verifier),
    };

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("Verifying tokens for {} against {}", config.api_audience, config.jwks_url);
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, casting_agency::app(state)).await?;
    Ok(())
}
