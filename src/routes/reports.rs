use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{auth::user::CurrentUser, error::AppError, reports, router::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/report/events/csv", get(events_csv))
        .route("/report/events/pdf", get(events_pdf))
        .route("/report/volunteer-history/csv", get(volunteer_csv))
        .route("/report/volunteer-history/pdf", get(volunteer_pdf))
}

async fn events_csv(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    user.require_admin()?;

    let rows = reports::event_report_rows(&state.db).await?;
    let bytes = reports::csv::render_event_csv(&rows)?;

    Ok(attachment(bytes, "text/csv", "event_report.csv"))
}

async fn events_pdf(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    user.require_admin()?;

    let rows = reports::event_report_rows(&state.db).await?;
    let bytes = reports::pdf::render_event_pdf(&rows)?;

    Ok(attachment(bytes, "application/pdf", "event_report.pdf"))
}

async fn volunteer_csv(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    user.require_admin()?;

    let rows = reports::volunteer_report_rows(&state.db).await?;
    let bytes = reports::csv::render_volunteer_csv(&rows)?;

    Ok(attachment(bytes, "text/csv", "volunteer_history_report.csv"))
}

async fn volunteer_pdf(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    user.require_admin()?;

    let rows = reports::volunteer_report_rows(&state.db).await?;
    let bytes = reports::pdf::render_volunteer_pdf(&rows)?;

    Ok(attachment(bytes, "application/pdf", "volunteer_history_report.pdf"))
}

fn attachment(bytes: Vec<u8>, content_type: &'static str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
