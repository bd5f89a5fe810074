use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    auth::{password, token},
    entities::{prelude::*, user},
    error::{AppError, AppJson},
    router::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct UserOut {
    id: i32,
    email: String,
    is_admin: bool,
}

#[derive(Serialize)]
struct RegisterResponse {
    user: UserOut,
    access: String,
    refresh: String,
    is_admin: bool,
}

#[derive(Serialize)]
struct LoginResponse {
    access: String,
    refresh: String,
    is_admin: bool,
}

pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::Validation("Enter a valid email address.".into()));
    }
    password::validate_strength(&payload.password)?;

    let existing = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation(
            "A user with this email already exists.".into(),
        ));
    }

    let user_model = user::ActiveModel {
        email: Set(email),
        password_hash: Set(password::hash_password(&payload.password)?),
        is_admin: Set(payload.is_admin),
        ..Default::default()
    };
    let user = user_model.insert(&state.db).await?;
    debug!("registered user {}", user.id);

    let tokens = token::issue_pair(&state.jwt_secret, user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserOut {
                id: user.id,
                email: user.email,
                is_admin: user.is_admin,
            },
            access: tokens.access,
            refresh: tokens.refresh,
            is_admin: user.is_admin,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    let user = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !password::verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let tokens = token::issue_pair(&state.jwt_secret, user.id)?;

    Ok(Json(LoginResponse {
        access: tokens.access,
        refresh: tokens.refresh,
        is_admin: user.is_admin,
    }))
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    fn register(email: &str, password: &str) -> AppJson<RegisterPayload> {
        AppJson(RegisterPayload {
            email: email.into(),
            password: password.into(),
            is_admin: false,
        })
    }

    #[tokio::test]
    async fn duplicate_email_fails_validation() {
        let state = test_state().await;

        signup(State(state.clone()), register("testuser@example.com", "testpass123"))
            .await
            .unwrap();

        let err = signup(State(state), register("testuser@example.com", "otherpass123"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn login_returns_tokens_for_correct_credentials() {
        let state = test_state().await;
        signup(State(state.clone()), register("testuser@example.com", "testpass123"))
            .await
            .unwrap();

        let Json(response) = login(
            State(state),
            AppJson(LoginPayload {
                email: "testuser@example.com".into(),
                password: "testpass123".into(),
            }),
        )
        .await
        .unwrap();

        assert!(!response.access.is_empty());
        assert!(!response.refresh.is_empty());
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let state = test_state().await;
        signup(State(state.clone()), register("testuser@example.com", "testpass123"))
            .await
            .unwrap();

        let err = login(
            State(state),
            AppJson(LoginPayload {
                email: "testuser@example.com".into(),
                password: "wrongpass".into(),
            }),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@nodot"));
    }
}
