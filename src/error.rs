use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Admin privileges required")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),

    #[error("Password hashing failed")]
    PasswordHash(#[from] argon2::password_hash::Error),

    #[error("Invalid token")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("CSV rendering failed")]
    Csv(#[from] csv::Error),

    #[error("Report rendering failed: {0}")]
    Render(String),
}

#[derive(Serialize)]
struct ErrorMessage {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            // The original backend answers 401 for admin-privilege failures
            // as well as missing credentials; kept as observed.
            AppError::Unauthorized | AppError::Forbidden | AppError::Token(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::PasswordHash(_) | AppError::Csv(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {self:?}");
        }

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorMessage { error: message })).into_response()
    }
}

/// JSON body extractor whose rejections surface as 400 ValidationErrors
/// instead of axum's default 422.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| AppError::Validation(err.body_text()))?;

        Ok(Self(value))
    }
}
