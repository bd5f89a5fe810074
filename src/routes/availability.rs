use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    auth::user::CurrentUser,
    entities::{availability, prelude::*},
    error::{AppError, AppJson},
    router::AppState,
    routes::profile::get_or_create_profile,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/availabilities", get(list_availability).post(upsert_availability_batch))
}

async fn list_availability(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<availability::Model>>, AppError> {
    let profile = get_or_create_profile(&state.db, user.0.id).await?;
    let rows = Availability::find()
        .filter(availability::Column::ProfileId.eq(profile.id))
        .order_by_asc(availability::Column::Date)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

async fn upsert_availability_batch(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(dates): AppJson<Vec<NaiveDate>>,
) -> Result<impl IntoResponse, AppError> {
    let profile = get_or_create_profile(&state.db, user.0.id).await?;
    let rows = upsert_availability(&state.db, profile.id, &dates).await?;

    Ok((StatusCode::CREATED, Json(rows)))
}

/// Additive upsert keyed on (profile, date): existing dates are left as they
/// are, new ones inserted, nothing deleted. The batch is one transaction.
pub async fn upsert_availability(
    db: &DatabaseConnection,
    profile_id: i32,
    dates: &[NaiveDate],
) -> Result<Vec<availability::Model>, AppError> {
    let txn = db.begin().await?;

    let mut rows = Vec::with_capacity(dates.len());
    for date in dates {
        let existing = Availability::find()
            .filter(availability::Column::ProfileId.eq(profile_id))
            .filter(availability::Column::Date.eq(*date))
            .one(&txn)
            .await?;

        let row = match existing {
            Some(row) => row,
            None => {
                availability::ActiveModel {
                    profile_id: Set(profile_id),
                    date: Set(*date),
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

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn upsert_is_additive_and_keeps_existing_rows() {
        let db = test_db().await;
        let user = seed_user(&db, "testuser@example.com", false).await;
        let profile = seed_profile(&db, user.id, "Test User").await;

        let first = upsert_availability(&db, profile.id, &[date("2024-06-01"), date("2024-06-02")])
            .await
            .unwrap();
        assert_eq!(first.len(), 2);

        // Re-submitting one old date plus one new one must not touch or
        // delete anything already stored.
        let second = upsert_availability(&db, profile.id, &[date("2024-06-02"), date("2024-06-03")])
            .await
            .unwrap();
        assert_eq!(second.len(), 2);

        let all = Availability::find()
            .filter(availability::Column::ProfileId.eq(profile.id))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let existing = first.iter().find(|r| r.date == date("2024-06-02")).unwrap();
        let resubmitted = second.iter().find(|r| r.date == date("2024-06-02")).unwrap();
        assert_eq!(existing.id, resubmitted.id);
    }
}
