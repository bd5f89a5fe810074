use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

use crate::{
    auth::user::CurrentUser,
    entities::{notification, prelude::*},
    error::AppError,
    router::AppState,
    routes::profile::get_or_create_profile,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}", delete(delete_notification))
}

async fn list_notifications(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<notification::Model>>, AppError> {
    let profile = get_or_create_profile(&state.db, user.0.id).await?;
    let rows = Notification::find()
        .filter(notification::Column::ProfileId.eq(profile.id))
        .order_by_desc(notification::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

/// Owner-scoped delete; a notification belonging to another profile reads as
/// missing.
async fn delete_notification(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let profile = get_or_create_profile(&state.db, user.0.id).await?;

    let row = Notification::find_by_id(id)
        .one(&state.db)
        .await?
        .filter(|n| n.profile_id == profile.id)
        .ok_or(AppError::NotFound("notification"))?;

    row.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}
