mod auth;
mod config;
mod database;
mod entities;
mod error;
mod reports;
mod router;
mod routes;
#[cfg(test)]
mod test_support;

use config::Config;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = database::setup_database(&config.database_url).await?;
    let app = router::create_router(db, config.jwt_secret.clone());

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(router::shutdown_signal())
        .await?;

    Ok(())
}
