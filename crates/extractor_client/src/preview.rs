use extractor_core::{CellLink, PreviewCell, PreviewTable};

use crate::RawRecord;

/// Column subset shown in the preview panel, in display order.
pub const PREVIEW_COLUMNS: &[&str] = &[
    "Company Name",
    "Area",
    "Phone (Maps)",
    "Website",
    "Email (Website)",
];

/// Rows shown before the "open the full file" hint takes over.
pub const MAX_PREVIEW_ROWS: usize = 10;

const MAX_CELL_CHARS: usize = 30;

const WEBSITE_COLUMN: &str = "Website";
const EMAIL_COLUMN: &str = "Email (Website)";

/// Projects raw result records onto the preview table: fixed column subset,
/// first [`MAX_PREVIEW_ROWS`] rows, truncated cells, link classification for
/// the website and email columns.
pub fn shape_preview(records: &[RawRecord]) -> PreviewTable {
    let rows = records
        .iter()
        .take(MAX_PREVIEW_ROWS)
        .map(|record| {
            PREVIEW_COLUMNS
                .iter()
                .map(|column| shape_cell(column, field_text(record, column)))
                .collect()
        })
        .collect();

    PreviewTable {
        columns: PREVIEW_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
        total_rows: records.len(),
    }
}

fn field_text(record: &RawRecord, column: &str) -> String {
    match record.get(column) {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn shape_cell(column: &str, value: String) -> PreviewCell {
    let link = match column {
        WEBSITE_COLUMN => classify(&value).map(|site| {
            if site.starts_with("http") {
                CellLink::Website(site.to_string())
            } else {
                CellLink::Website(format!("http://{site}"))
            }
        }),
        EMAIL_COLUMN => classify(&value).map(|emails| {
            let first = emails.split(',').next().unwrap_or(emails).trim();
            CellLink::Email(first.to_string())
        }),
        _ => None,
    };

    PreviewCell {
        text: truncate(&value),
        link,
    }
}

/// Placeholder values from the scraper mean "nothing found" and must render
/// as plain text.
fn classify(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "Not Found" {
        None
    } else {
        Some(trimmed)
    }
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_CHARS {
        value.to_string()
    } else {
        let head: String = value.chars().take(MAX_CELL_CHARS).collect();
        format!("{head}...")
    }
}
