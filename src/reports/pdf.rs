use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::AppError;

use super::{EventReportRow, VolunteerReportRow, format_date};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT_MARGIN: f32 = 14.0;
const TOP_CURSOR: f32 = 277.0;
const BOTTOM_MARGIN: f32 = 20.0;
const LINE_STEP: f32 = 7.0;

pub fn render_event_pdf(rows: &[EventReportRow]) -> Result<Vec<u8>, AppError> {
    let lines = rows
        .iter()
        .map(|row| {
            format!(
                "{} | {} | {} | {} | {} | skills: {} | volunteers: {}",
                row.event_name,
                row.location,
                row.urgency,
                format_date(&row.event_date),
                row.status,
                row.required_skills.join(", "),
                row.volunteers.join(", "),
            )
        })
        .collect::<Vec<_>>();

    render_lines("Event Report", &lines)
}

pub fn render_volunteer_pdf(rows: &[VolunteerReportRow]) -> Result<Vec<u8>, AppError> {
    let lines = rows
        .iter()
        .map(|row| {
            format!(
                "{} | {} | {} | {}",
                row.volunteer,
                row.event_name,
                row.status,
                format_date(&row.event_date),
            )
        })
        .collect::<Vec<_>>();

    render_lines("Volunteer History Report", &lines)
}

/// Writes one text line per row, moving a vertical cursor down the page and
/// starting a fresh page whenever the cursor crosses the bottom margin.
fn render_lines(title: &str, lines: &[String]) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Render(e.to_string()))?;

    let mut current = doc.get_page(page).get_layer(layer);
    current.use_text(title, 14.0, Mm(LEFT_MARGIN), Mm(TOP_CURSOR), &font);

    let mut y = TOP_CURSOR - 2.0 * LINE_STEP;
    for line in lines {
        if y < BOTTOM_MARGIN {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            current = doc.get_page(page).get_layer(layer);
            y = TOP_CURSOR;
        }
        current.use_text(line.as_str(), 10.0, Mm(LEFT_MARGIN), Mm(y), &font);
        y -= LINE_STEP;
    }

    doc.save_to_bytes().map_err(|e| AppError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volunteer_rows(n: usize) -> Vec<VolunteerReportRow> {
        (0..n)
            .map(|i| VolunteerReportRow {
                volunteer: format!("Volunteer {i}"),
                event_name: "Beach Cleanup".into(),
                status: "Pending".into(),
                event_date: "2024-06-01T09:00:00".parse().unwrap(),
            })
            .collect()
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_volunteer_pdf(&volunteer_rows(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_reports_spill_onto_additional_pages() {
        let short = render_volunteer_pdf(&volunteer_rows(3)).unwrap();
        let long = render_volunteer_pdf(&volunteer_rows(200)).unwrap();

        let needle: &[u8] = b"/Type /Page";
        let pages = |bytes: &[u8]| bytes.windows(needle.len()).filter(|w| *w == needle).count();
        assert!(pages(&long) > pages(&short));
    }
}
