use crate::error::AppError;

use super::{EventReportRow, VolunteerReportRow, format_date};

pub fn render_event_csv(rows: &[EventReportRow]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "event_name",
        "description",
        "location",
        "urgency",
        "event_date",
        "status",
        "required_skills",
        "volunteers",
    ])?;

    for row in rows {
        let event_date = format_date(&row.event_date);
        let skills = row.required_skills.join(", ");
        let volunteers = row.volunteers.join(", ");
        writer.write_record([
            row.event_name.as_str(),
            row.description.as_str(),
            row.location.as_str(),
            row.urgency.as_str(),
            event_date.as_str(),
            row.status.as_str(),
            skills.as_str(),
            volunteers.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Render(e.to_string()))
}

pub fn render_volunteer_csv(rows: &[VolunteerReportRow]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["volunteer", "event_name", "status", "event_date"])?;

    for row in rows {
        let event_date = format_date(&row.event_date);
        writer.write_record([
            row.volunteer.as_str(),
            row.event_name.as_str(),
            row.status.as_str(),
            event_date.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event_row() -> EventReportRow {
        EventReportRow {
            event_name: "Beach Cleanup".into(),
            description: "Shoreline litter pickup".into(),
            location: "Galveston".into(),
            urgency: "High".into(),
            event_date: "2024-06-01T09:00:00".parse().unwrap(),
            status: "Pending".into(),
            required_skills: vec!["First Aid".into()],
            volunteers: vec!["Jane Doe".into()],
        }
    }

    #[test]
    fn event_row_ends_with_skills_and_volunteers() {
        let bytes = render_event_csv(&[sample_event_row()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let data_line = text.lines().nth(1).unwrap();
        assert!(data_line.ends_with("First Aid,Jane Doe"));
    }

    #[test]
    fn multiple_names_are_joined_inside_one_field() {
        let mut row = sample_event_row();
        row.required_skills.push("Cooking".into());
        let bytes = render_event_csv(&[row]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("\"First Aid, Cooking\""));
    }

    #[test]
    fn volunteer_report_has_expected_header_and_row() {
        let rows = vec![VolunteerReportRow {
            volunteer: "Jane Doe".into(),
            event_name: "Beach Cleanup".into(),
            status: "Pending".into(),
            event_date: "2024-06-01T09:00:00".parse().unwrap(),
        }];
        let text = String::from_utf8(render_volunteer_csv(&rows).unwrap()).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "volunteer,event_name,status,event_date");
        assert_eq!(
            lines.next().unwrap(),
            "Jane Doe,Beach Cleanup,Pending,2024-06-01 09:00:00"
        );
    }
}
