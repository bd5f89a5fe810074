use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use sea_orm::EntityTrait;

use crate::{
    auth::token,
    entities::{prelude::*, user},
    error::AppError,
    router::AppState,
};

/// Authenticated caller, resolved from the bearer token on every request.
///
/// The admin flag is re-read from the database rather than trusted from the
/// claim, so privilege changes take effect on the next request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

impl CurrentUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.0.is_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Unauthorized)?;

        let claims = token::decode_access(&state.jwt_secret, bearer.token())?;

        let user = User::find_by_id(claims.sub)
            .one(&state.db)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(Self(user))
    }
}
