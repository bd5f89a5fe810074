use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    auth::user::CurrentUser,
    entities::{event, event_skill, notification, prelude::*, volunteer_history},
    error::{AppError, AppJson},
    router::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/event-skills", get(list_event_skills).post(create_event_skill))
}

#[derive(Debug, Deserialize)]
pub struct EventPayload {
    pub event_name: String,
    pub description: String,
    pub location: String,
    pub urgency: String,
    pub event_date: NaiveDateTime,
    pub status: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Serialize)]
pub struct EventOut {
    pub id: i32,
    pub event_name: String,
    pub description: String,
    pub location: String,
    pub urgency: String,
    pub event_date: NaiveDateTime,
    pub status: String,
    pub skills: Vec<String>,
}

impl EventOut {
    fn new(event: event::Model, skills: Vec<event_skill::Model>) -> Self {
        Self {
            id: event.id,
            event_name: event.event_name,
            description: event.description,
            location: event.location,
            urgency: event.urgency,
            event_date: event.event_date,
            status: event.status,
            skills: skills.into_iter().map(|s| s.name).collect(),
        }
    }
}

async fn list_events(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<EventOut>>, AppError> {
    let events = Event::find()
        .order_by_asc(event::Column::Id)
        .find_with_related(EventSkill)
        .all(&state.db)
        .await?;

    Ok(Json(
        events
            .into_iter()
            .map(|(event, skills)| EventOut::new(event, skills))
            .collect(),
    ))
}

async fn get_event(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<EventOut>, AppError> {
    let event = Event::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("event"))?;
    let skills = EventSkill::find()
        .filter(event_skill::Column::EventId.eq(event.id))
        .order_by_asc(event_skill::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(EventOut::new(event, skills)))
}

async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(payload): AppJson<EventPayload>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    let (event, skills) = insert_event(&state.db, payload).await?;
    info!("created event {}", event.id);

    Ok((StatusCode::CREATED, Json(EventOut::new(event, skills))))
}

async fn update_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<EventPayload>,
) -> Result<Json<EventOut>, AppError> {
    user.require_admin()?;

    let (event, skills) = apply_event_update(&state.db, id, payload).await?;

    Ok(Json(EventOut::new(event, skills)))
}

async fn delete_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;

    remove_event(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn list_event_skills(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<event_skill::Model>>, AppError> {
    let rows = EventSkill::find()
        .order_by_asc(event_skill::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct EventSkillPayload {
    pub event: i32,
    pub name: String,
}

async fn create_event_skill(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(payload): AppJson<EventSkillPayload>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    Event::find_by_id(payload.event)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("event"))?;

    let row = event_skill::ActiveModel {
        event_id: Set(payload.event),
        name: Set(payload.name),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Creates the event plus one skill row per submitted name, unconditionally.
pub async fn insert_event(
    db: &DatabaseConnection,
    payload: EventPayload,
) -> Result<(event::Model, Vec<event_skill::Model>), AppError> {
    let txn = db.begin().await?;

    let event = event::ActiveModel {
        event_name: Set(payload.event_name),
        description: Set(payload.description),
        location: Set(payload.location),
        urgency: Set(payload.urgency),
        event_date: Set(payload.event_date),
        status: Set(payload.status),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut skills = Vec::with_capacity(payload.skills.len());
    for name in payload.skills {
        let row = event_skill::ActiveModel {
            event_id: Set(event.id),
            name: Set(name),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        skills.push(row);
    }

    txn.commit().await?;
    Ok((event, skills))
}

/// Updates the event fields, diffs its skill tags, and notifies every profile
/// holding a history row on the event. One transaction for the whole step.
pub async fn apply_event_update(
    db: &DatabaseConnection,
    event_id: i32,
    payload: EventPayload,
) -> Result<(event::Model, Vec<event_skill::Model>), AppError> {
    let txn = db.begin().await?;

    let event = Event::find_by_id(event_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("event"))?;

    let mut model = event.into_active_model();
    model.event_name = Set(payload.event_name);
    model.description = Set(payload.description);
    model.location = Set(payload.location);
    model.urgency = Set(payload.urgency);
    model.event_date = Set(payload.event_date);
    model.status = Set(payload.status);
    let event = model.update(&txn).await?;

    let skills = sync_event_skills(&txn, event.id, &payload.skills).await?;
    notify_event_volunteers(&txn, &event).await?;

    txn.commit().await?;
    Ok((event, skills))
}

/// Skill names absent from `names` are deleted; present ones are upserted.
async fn sync_event_skills(
    txn: &DatabaseTransaction,
    event_id: i32,
    names: &[String],
) -> Result<Vec<event_skill::Model>, AppError> {
    let existing = EventSkill::find()
        .filter(event_skill::Column::EventId.eq(event_id))
        .all(txn)
        .await?;

    let mut skills = Vec::with_capacity(names.len());
    for row in existing {
        if names.contains(&row.name) {
            skills.push(row);
        } else {
            row.delete(txn).await?;
        }
    }

    for name in names {
        if !skills.iter().any(|s| &s.name == name) {
            let row = event_skill::ActiveModel {
                event_id: Set(event_id),
                name: Set(name.clone()),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            skills.push(row);
        }
    }

    Ok(skills)
}

async fn notify_event_volunteers(
    txn: &DatabaseTransaction,
    event: &event::Model,
) -> Result<(), AppError> {
    let histories = VolunteerHistory::find()
        .filter(volunteer_history::Column::EventId.eq(event.id))
        .all(txn)
        .await?;

    for history in histories {
        notification::ActiveModel {
            profile_id: Set(history.profile_id),
            message: Set(format!(
                "Event '{}' has been updated. Please check the details.",
                event.event_name
            )),
            ..Default::default()
        }
        .insert(txn)
        .await?;
    }

    Ok(())
}

/// Deletes the event and its dependents explicitly, in one transaction.
pub async fn remove_event(db: &DatabaseConnection, event_id: i32) -> Result<(), AppError> {
    let txn = db.begin().await?;

    let event = Event::find_by_id(event_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("event"))?;

    EventSkill::delete_many()
        .filter(event_skill::Column::EventId.eq(event.id))
        .exec(&txn)
        .await?;
    VolunteerHistory::delete_many()
        .filter(volunteer_history::Column::EventId.eq(event.id))
        .exec(&txn)
        .await?;
    event.delete(&txn).await?;

    txn.commit().await?;
    info!("deleted event {event_id}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::history::assign_volunteers;
    use crate::test_support::{seed_event, seed_profile, seed_user, test_db};

    fn payload(name: &str, skills: &[&str]) -> EventPayload {
        EventPayload {
            event_name: name.into(),
            description: "This is a test event.".into(),
            location: "Test Location".into(),
            urgency: "High".into(),
            event_date: "2024-06-01T09:00:00".parse().unwrap(),
            status: "Pending".into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn skill_diff_keeps_shared_removes_absent_adds_new() {
        let db = test_db().await;
        let (event, initial) = insert_event(&db, payload("Test Event", &["A", "B"]))
            .await
            .unwrap();
        let kept_id = initial.iter().find(|s| s.name == "B").unwrap().id;

        let (_, updated) = apply_event_update(&db, event.id, payload("Test Event", &["B", "C"]))
            .await
            .unwrap();

        let mut names: Vec<_> = updated.iter().map(|s| s.name.clone()).collect();
        names.sort();
        assert_eq!(names, ["B", "C"]);

        // B survived the diff rather than being recreated.
        let survivor = updated.iter().find(|s| s.name == "B").unwrap();
        assert_eq!(survivor.id, kept_id);

        let remaining = EventSkill::find()
            .filter(event_skill::Column::EventId.eq(event.id))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 2);
    }

    #[tokio::test]
    async fn update_notifies_each_profile_with_history() {
        let db = test_db().await;
        let event = seed_event(&db, "Beach Cleanup").await;

        let alice = seed_user(&db, "alice@example.com", false).await;
        let alice = seed_profile(&db, alice.id, "Alice").await;
        let bob = seed_user(&db, "bob@example.com", false).await;
        let bob = seed_profile(&db, bob.id, "Bob").await;

        assign_volunteers(&db, event.id, &[alice.id, bob.id])
            .await
            .unwrap();
        let assigned = Notification::find().all(&db).await.unwrap().len();

        apply_event_update(&db, event.id, payload("Beach Cleanup", &[]))
            .await
            .unwrap();

        let update_notes = Notification::find()
            .filter(
                notification::Column::Message
                    .eq("Event 'Beach Cleanup' has been updated. Please check the details."),
            )
            .all(&db)
            .await
            .unwrap();
        assert_eq!(update_notes.len(), 2);
        assert_eq!(Notification::find().all(&db).await.unwrap().len(), assigned + 2);
    }

    #[tokio::test]
    async fn delete_removes_skills_and_history() {
        let db = test_db().await;
        let (event, _) = insert_event(&db, payload("Test Event", &["A"])).await.unwrap();
        let user = seed_user(&db, "testuser@example.com", false).await;
        let profile = seed_profile(&db, user.id, "Test User").await;
        assign_volunteers(&db, event.id, &[profile.id]).await.unwrap();

        remove_event(&db, event.id).await.unwrap();

        assert!(Event::find_by_id(event.id).one(&db).await.unwrap().is_none());
        assert!(EventSkill::find().all(&db).await.unwrap().is_empty());
        assert!(VolunteerHistory::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn updating_missing_event_is_not_found() {
        let db = test_db().await;
        let err = apply_event_update(&db, 999, payload("Ghost", &[]))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
