use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    auth::user::CurrentUser,
    entities::{prelude::*, profile, skill},
    error::{AppError, AppJson},
    router::AppState,
};

/// The 51 jurisdiction codes accepted for the profile state field.
pub const STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY", "DC",
];

pub fn routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

#[derive(Serialize)]
pub struct ProfileOut {
    pub id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub preferences: Option<String>,
    pub skills: Vec<String>,
}

impl ProfileOut {
    pub fn new(profile: profile::Model, skills: Vec<String>) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            full_name: profile.full_name,
            address1: profile.address1,
            address2: profile.address2,
            city: profile.city,
            state: profile.state,
            zip_code: profile.zip_code,
            preferences: profile.preferences,
            skills,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub preferences: Option<String>,
}

/// Returns the caller's profile, creating an empty one on first access.
/// The unique index on `user_id` keeps this one-per-user.
pub async fn get_or_create_profile(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<profile::Model, AppError> {
    let existing = Profile::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    match existing {
        Some(profile) => Ok(profile),
        None => {
            debug!("creating empty profile for user {user_id}");
            let model = profile::ActiveModel {
                user_id: Set(user_id),
                full_name: Set(String::new()),
                address1: Set(String::new()),
                city: Set(String::new()),
                state: Set(String::new()),
                zip_code: Set(String::new()),
                ..Default::default()
            };
            Ok(model.insert(db).await?)
        }
    }
}

pub async fn skill_names(db: &DatabaseConnection, profile_id: i32) -> Result<Vec<String>, AppError> {
    let skills = Skill::find()
        .filter(skill::Column::ProfileId.eq(profile_id))
        .order_by_asc(skill::Column::Id)
        .all(db)
        .await?;

    Ok(skills.into_iter().map(|s| s.name).collect())
}

async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ProfileOut>, AppError> {
    let profile = get_or_create_profile(&state.db, user.0.id).await?;
    let skills = skill_names(&state.db, profile.id).await?;

    Ok(Json(ProfileOut::new(profile, skills)))
}

async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(payload): AppJson<ProfileUpdate>,
) -> Result<Json<ProfileOut>, AppError> {
    validate_update(&payload)?;

    let profile = get_or_create_profile(&state.db, user.0.id).await?;
    let mut model = profile.into_active_model();
    model.full_name = Set(payload.full_name);
    model.address1 = Set(payload.address1);
    model.address2 = Set(payload.address2);
    model.city = Set(payload.city);
    model.state = Set(payload.state);
    model.zip_code = Set(payload.zip_code);
    model.preferences = Set(payload.preferences);
    let profile = model.update(&state.db).await?;

    let skills = skill_names(&state.db, profile.id).await?;

    Ok(Json(ProfileOut::new(profile, skills)))
}

fn validate_update(payload: &ProfileUpdate) -> Result<(), AppError> {
    check_length("full_name", &payload.full_name, 50)?;
    check_length("address1", &payload.address1, 100)?;
    if let Some(address2) = &payload.address2 {
        check_length("address2", address2, 100)?;
    }
    check_length("city", &payload.city, 100)?;

    if !STATE_CODES.contains(&payload.state.as_str()) {
        return Err(AppError::Validation(format!(
            "\"{}\" is not a valid state code.",
            payload.state
        )));
    }

    let zip_len = payload.zip_code.chars().count();
    if !(5..=9).contains(&zip_len) {
        return Err(AppError::Validation(
            "zip_code must be between 5 and 9 characters.".into(),
        ));
    }

    Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_user, test_db};

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let db = test_db().await;
        let user = seed_user(&db, "testuser@example.com", false).await;

        let first = get_or_create_profile(&db, user.id).await.unwrap();
        let second = get_or_create_profile(&db, user.id).await.unwrap();

        assert_eq!(first.id, second.id);
    }

    #[test]
    fn state_code_must_be_known() {
        let mut payload = ProfileUpdate {
            full_name: "Test User".into(),
            address1: "123 Test St".into(),
            address2: None,
            city: "Test City".into(),
            state: "TX".into(),
            zip_code: "12345".into(),
            preferences: None,
        };
        assert!(validate_update(&payload).is_ok());

        payload.state = "XX".into();
        assert!(validate_update(&payload).is_err());
    }

    #[test]
    fn field_lengths_are_bounded() {
        let payload = ProfileUpdate {
            full_name: "x".repeat(51),
            address1: "123 Test St".into(),
            address2: None,
            city: "Test City".into(),
            state: "TX".into(),
            zip_code: "12345".into(),
            preferences: None,
        };
        assert!(validate_update(&payload).is_err());
    }
}
