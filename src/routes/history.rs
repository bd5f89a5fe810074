use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    auth::user::CurrentUser,
    entities::{notification, prelude::*, volunteer_history, volunteer_history::HistoryStatus},
    error::{AppError, AppJson},
    router::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/volunteer-history", get(list_history))
        .route("/volunteer-history/bulk-create", post(bulk_create))
        .route("/history/{id}", get(get_history))
}

#[derive(Debug, Deserialize)]
pub struct BulkAssignPayload {
    pub event: i32,
    pub user_profiles: Vec<i32>,
}

async fn list_history(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<volunteer_history::Model>>, AppError> {
    let rows = VolunteerHistory::find()
        .order_by_asc(volunteer_history::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

async fn get_history(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<volunteer_history::Model>, AppError> {
    let row = VolunteerHistory::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("history"))?;

    Ok(Json(row))
}

async fn bulk_create(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(payload): AppJson<BulkAssignPayload>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    let rows = assign_volunteers(&state.db, payload.event, &payload.user_profiles).await?;

    Ok((StatusCode::CREATED, Json(rows)))
}

/// Bulk assignment: for each profile, write an assignment notification and
/// upsert the (profile, event) history row with status reset to Pending.
/// Unknown profile ids are skipped without error. The batch is atomic; any
/// storage failure rolls back every row and notification from this call.
pub async fn assign_volunteers(
    db: &DatabaseConnection,
    event_id: i32,
    profile_ids: &[i32],
) -> Result<Vec<volunteer_history::Model>, AppError> {
    let txn = db.begin().await?;

    let event = Event::find_by_id(event_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("event"))?;

    let mut rows = Vec::new();
    for &profile_id in profile_ids {
        let Some(profile) = Profile::find_by_id(profile_id).one(&txn).await? else {
            debug!("skipping unknown profile {profile_id}");
            continue;
        };

        notification::ActiveModel {
            profile_id: Set(profile.id),
            message: Set(format!(
                "You have been assigned to Event '{}' Please check the details.",
                event.event_name
            )),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let existing = VolunteerHistory::find()
            .filter(volunteer_history::Column::ProfileId.eq(profile.id))
            .filter(volunteer_history::Column::EventId.eq(event.id))
            .one(&txn)
            .await?;

        let row = match existing {
            // Reassignment resets the status; the participation timestamp is
            // never touched after creation.
            Some(existing) => {
                let mut history = existing.into_active_model();
                history.status = Set(HistoryStatus::Pending);
                history.update(&txn).await?
            }
            None => {
                volunteer_history::ActiveModel {
                    profile_id: Set(profile.id),
                    event_id: Set(event.id),
                    status: Set(HistoryStatus::Pending),
                    participation_date: Set(Utc::now().naive_utc()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };
        rows.push(row);
    }

    txn.commit().await?;
    info!(event = event.id, assigned = rows.len(), "bulk assignment committed");

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_event, seed_profile, seed_user, test_db};

    #[tokio::test]
    async fn missing_profiles_are_skipped_silently() {
        let db = test_db().await;
        let event = seed_event(&db, "Test Event").await;
        let user = seed_user(&db, "testuser@example.com", false).await;
        let profile = seed_profile(&db, user.id, "Test User").await;

        let rows = assign_volunteers(&db, event.id, &[profile.id, 9999])
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].profile_id, profile.id);
        assert_eq!(Notification::find().all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reassignment_resets_status_to_pending() {
        let db = test_db().await;
        let event = seed_event(&db, "Test Event").await;
        let user = seed_user(&db, "testuser@example.com", false).await;
        let profile = seed_profile(&db, user.id, "Test User").await;

        let first = assign_volunteers(&db, event.id, &[profile.id]).await.unwrap();
        let mut history = first[0].clone().into_active_model();
        history.status = Set(HistoryStatus::Completed);
        history.update(&db).await.unwrap();

        let second = assign_volunteers(&db, event.id, &[profile.id]).await.unwrap();

        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, first[0].id);
        assert_eq!(second[0].status, HistoryStatus::Pending);
        assert_eq!(second[0].participation_date, first[0].participation_date);
    }

    #[tokio::test]
    async fn beach_cleanup_with_one_unknown_profile() {
        let db = test_db().await;
        let event = seed_event(&db, "Beach Cleanup").await;
        let jane = seed_user(&db, "jane@example.com", false).await;
        let jane = seed_profile(&db, jane.id, "Jane Doe").await;
        let john = seed_user(&db, "john@example.com", false).await;
        let john = seed_profile(&db, john.id, "John Doe").await;
        let missing = john.id + 1000;

        let rows = assign_volunteers(&db, event.id, &[jane.id, missing, john.id])
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.status == HistoryStatus::Pending));
        assert_eq!(Notification::find().all(&db).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn assigning_to_missing_event_is_not_found() {
        let db = test_db().await;
        let err = assign_volunteers(&db, 999, &[1]).await.err().unwrap();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
