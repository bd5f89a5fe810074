pub mod csv;
pub mod pdf;

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sea_orm::{ActiveEnum, DatabaseConnection, EntityTrait, QueryOrder};

use crate::{
    entities::{event, prelude::*, volunteer_history},
    error::AppError,
};

pub struct EventReportRow {
    pub event_name: String,
    pub description: String,
    pub location: String,
    pub urgency: String,
    pub event_date: NaiveDateTime,
    pub status: String,
    pub required_skills: Vec<String>,
    pub volunteers: Vec<String>,
}

pub struct VolunteerReportRow {
    pub volunteer: String,
    pub event_name: String,
    pub status: String,
    pub event_date: NaiveDateTime,
}

/// One row per event, with its required-skill names and the full names of
/// every assigned volunteer.
pub async fn event_report_rows(db: &DatabaseConnection) -> Result<Vec<EventReportRow>, AppError> {
    let events = Event::find()
        .order_by_asc(event::Column::Id)
        .find_with_related(EventSkill)
        .all(db)
        .await?;

    let histories = VolunteerHistory::find()
        .order_by_asc(volunteer_history::Column::Id)
        .find_also_related(Profile)
        .all(db)
        .await?;

    let mut volunteers_by_event: HashMap<i32, Vec<String>> = HashMap::new();
    for (history, profile) in histories {
        if let Some(profile) = profile {
            volunteers_by_event
                .entry(history.event_id)
                .or_default()
                .push(profile.full_name);
        }
    }

    Ok(events
        .into_iter()
        .map(|(event, skills)| EventReportRow {
            volunteers: volunteers_by_event.remove(&event.id).unwrap_or_default(),
            event_name: event.event_name,
            description: event.description,
            location: event.location,
            urgency: event.urgency,
            event_date: event.event_date,
            status: event.status,
            required_skills: skills.into_iter().map(|s| s.name).collect(),
        })
        .collect())
}

/// One row per history record: volunteer name, event name, status, event date.
pub async fn volunteer_report_rows(
    db: &DatabaseConnection,
) -> Result<Vec<VolunteerReportRow>, AppError> {
    let events: HashMap<i32, event::Model> = Event::find()
        .all(db)
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    let histories = VolunteerHistory::find()
        .order_by_asc(volunteer_history::Column::Id)
        .find_also_related(Profile)
        .all(db)
        .await?;

    let mut rows = Vec::with_capacity(histories.len());
    for (history, profile) in histories {
        let (Some(profile), Some(event)) = (profile, events.get(&history.event_id)) else {
            continue;
        };
        rows.push(VolunteerReportRow {
            volunteer: profile.full_name,
            event_name: event.event_name.clone(),
            status: history.status.to_value(),
            event_date: event.event_date,
        });
    }

    Ok(rows)
}

pub(crate) fn format_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}
