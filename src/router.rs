use axum::Router;
use sea_orm::DatabaseConnection;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{auth, routes};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
}

pub fn create_router(db: DatabaseConnection, jwt_secret: String) -> Router {
    let state = AppState { db, jwt_secret };

    Router::new()
        .merge(auth::router::router())
        .merge(routes::profile::routes())
        .merge(routes::availability::routes())
        .merge(routes::skills::routes())
        .merge(routes::events::routes())
        .merge(routes::users::routes())
        .merge(routes::history::routes())
        .merge(routes::notifications::routes())
        .merge(routes::reports::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
