use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use crate::{
    entities::{event, profile, user},
    router::AppState,
};

pub async fn test_db() -> DatabaseConnection {
    // A single connection keeps the in-memory database alive across queries.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Cannot connect to db");
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn test_state() -> AppState {
    AppState {
        db: test_db().await,
        jwt_secret: "test-secret".into(),
    }
}

pub async fn seed_user(db: &DatabaseConnection, email: &str, is_admin: bool) -> user::Model {
    user::ActiveModel {
        email: Set(email.into()),
        password_hash: Set("unused".into()),
        is_admin: Set(is_admin),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_profile(db: &DatabaseConnection, user_id: i32, full_name: &str) -> profile::Model {
    profile::ActiveModel {
        user_id: Set(user_id),
        full_name: Set(full_name.into()),
        address1: Set("123 Test St".into()),
        city: Set("Test City".into()),
        state: Set("TX".into()),
        zip_code: Set("12345".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_event(db: &DatabaseConnection, name: &str) -> event::Model {
    event::ActiveModel {
        event_name: Set(name.into()),
        description: Set("This is a test event.".into()),
        location: Set("Test Location".into()),
        urgency: Set("High".into()),
        event_date: Set(NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()),
        status: Set("Pending".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
