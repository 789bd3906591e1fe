//! File download endpoints
//!
//! Each form posts `client_name` plus repeated `event` / `date` fields, one
//! pair per row of the (possibly edited) deadline table.

use axum::{
    Form, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
};
use deadline_core::entry::entries_from_pairs;
use deadline_core::{ExportFormat, ExportRequest, ExportedFile};

use crate::routes::{AppError, FormFields};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/download_ics", post(download_ics))
        .route("/download_csv", post(download_csv))
        .route("/generate", post(generate_document))
}

/// POST /download_ics - Calendar file
async fn download_ics(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    export(&state, ExportFormat::Ics, &FormFields(fields))
}

/// POST /download_csv - Spreadsheet for calendar import
async fn download_csv(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    export(&state, ExportFormat::Csv, &FormFields(fields))
}

/// POST /generate - Word summary document
async fn generate_document(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    export(&state, ExportFormat::Docx, &FormFields(fields))
}

fn export(state: &AppState, format: ExportFormat, fields: &FormFields) -> Result<Response, AppError> {
    let entries = entries_from_pairs(fields.get_all("event"), fields.get_all("date"));
    let request = ExportRequest::new(fields.get("client_name"), entries)
        .with_trial_date(fields.get("trial_date"));

    let file = state.exporter().export(format, &request)?;

    log::info!(
        "Exported {} ({} entries, {} skipped)",
        file.filename,
        request.entries().len(),
        file.skipped
    );

    Ok(attachment(file))
}

fn attachment(file: ExportedFile) -> Response {
    let disposition = content_disposition(&file.filename);
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}

/// `attachment` disposition with an ASCII fallback name plus the UTF-8
/// name (RFC 6266), since client names may contain any character.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}
