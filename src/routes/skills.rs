use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    auth::user::CurrentUser,
    entities::{prelude::*, skill},
    error::{AppError, AppJson},
    router::AppState,
    routes::profile::get_or_create_profile,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/skills", get(list_skills).post(upsert_skills_batch))
}

async fn list_skills(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<skill::Model>>, AppError> {
    let profile = get_or_create_profile(&state.db, user.0.id).await?;
    let rows = Skill::find()
        .filter(skill::Column::ProfileId.eq(profile.id))
        .order_by_asc(skill::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

async fn upsert_skills_batch(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(names): AppJson<Vec<String>>,
) -> Result<impl IntoResponse, AppError> {
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(AppError::Validation("Skill names must not be empty.".into()));
    }

    let profile = get_or_create_profile(&state.db, user.0.id).await?;
    let rows = upsert_skills(&state.db, profile.id, &names).await?;

    Ok((StatusCode::CREATED, Json(rows)))
}

/// Additive upsert keyed on (profile, name); omitted names are never removed.
pub async fn upsert_skills(
    db: &DatabaseConnection,
    profile_id: i32,
    names: &[String],
) -> Result<Vec<skill::Model>, AppError> {
    let txn = db.begin().await?;

    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        let existing = Skill::find()
            .filter(skill::Column::ProfileId.eq(profile_id))
            .filter(skill::Column::Name.eq(name))
            .one(&txn)
            .await?;

        let row = match existing {
            Some(row) => row,
            None => {
                skill::ActiveModel {
                    profile_id: Set(profile_id),
                    name: Set(name.clone()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };
        rows.push(row);
    }

    txn.commit().await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_profile, seed_user, test_db};

    #[tokio::test]
    async fn resubmitting_a_skill_does_not_duplicate_it() {
        let db = test_db().await;
        let user = seed_user(&db, "testuser@example.com", false).await;
        let profile = seed_profile(&db, user.id, "Test User").await;

        upsert_skills(&db, profile.id, &["First Aid".into(), "Cooking".into()])
            .await
            .unwrap();
        upsert_skills(&db, profile.id, &["First Aid".into(), "Driving".into()])
            .await
            .unwrap();

        let all = Skill::find()
            .filter(skill::Column::ProfileId.eq(profile.id))
            .all(&db)
            .await
            .unwrap();

        let mut names: Vec<_> = all.into_iter().map(|s| s.name).collect();
        names.sort();
        assert_eq!(names, ["Cooking", "Driving", "First Aid"]);
    }
}
