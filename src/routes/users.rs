use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::{
    auth::user::CurrentUser,
    entities::{prelude::*, profile, user},
    error::AppError,
    router::AppState,
    routes::profile::{ProfileOut, skill_names},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
}

#[derive(Serialize)]
struct UserOut {
    id: i32,
    email: String,
    is_admin: bool,
}

impl From<user::Model> for UserOut {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Serialize)]
struct UserDetailOut {
    id: i32,
    email: String,
    is_admin: bool,
    profile: Option<ProfileOut>,
}

async fn list_users(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<UserOut>>, AppError> {
    let users = User::find()
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(users.into_iter().map(UserOut::from).collect()))
}

async fn get_user(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<UserDetailOut>, AppError> {
    let user = User::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let profile = Profile::find()
        .filter(profile::Column::UserId.eq(user.id))
        .one(&state.db)
        .await?;

    let profile = match profile {
        Some(profile) => {
            let skills = skill_names(&state.db, profile.id).await?;
            Some(ProfileOut::new(profile, skills))
        }
        None => None,
    };

    Ok(Json(UserDetailOut {
        id: user.id,
        email: user.email,
        is_admin: user.is_admin,
        profile,
    }))
}
