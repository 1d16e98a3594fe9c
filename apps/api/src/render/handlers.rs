//! Axum route handler for document generation.

use anyhow::Context;
use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::render::{display_name, render_resume, DOCX_MIME};
use crate::resume::models::{
    education_from_value, experience_from_value, ContactInfo, ResumeRecord,
};
use crate::routes::form::FormFields;

/// POST /generate
///
/// Builds a `.docx` resume from form fields and returns it as a download.
/// Malformed `education_json` / `experience_json` yields an empty section, not an error.
pub async fn handle_generate(form: FormFields) -> Result<Response, AppError> {
    let contact = ContactInfo {
        name: form.require("name")?.to_string(),
        email: form.require("email")?.to_string(),
        phone: form.require("phone")?.to_string(),
        location: form.require("location")?.to_string(),
    };

    let record = ResumeRecord {
        summary: form.text("summary").unwrap_or_default().to_string(),
        skills: split_skills(form.text("skills").unwrap_or_default()),
        experience: experience_from_value(&lenient_array(
            "experience_json",
            form.text("experience_json"),
        )),
        education: education_from_value(&lenient_array(
            "education_json",
            form.text("education_json"),
        )),
    };

    let filename = download_name(&contact.name);

    // Packing is blocking zip work; keep it off the request threads.
    let bytes = tokio::task::spawn_blocking(move || render_resume(&contact, &record))
        .await
        .context("resume render task did not complete")?
        .map_err(|e| AppError::Generation(format!("Resume generation failed: {e}")))?;

    info!("Generated {filename} ({} bytes)", bytes.len());

    Ok((
        [
            (CONTENT_TYPE, DOCX_MIME.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Comma-separated skills, trimmed, empties dropped.
fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parses a JSON form field that should hold an array. Absent means `[]`;
/// anything unparseable or non-array is logged and treated as `[]`.
fn lenient_array(field: &str, raw: Option<&str>) -> Value {
    let Some(raw) = raw else {
        return Value::Array(Vec::new());
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Array(_)) => value,
        Ok(_) => {
            warn!("{field} is not a JSON array; rendering no entries");
            Value::Array(Vec::new())
        }
        Err(e) => {
            warn!("{field} is not valid JSON ({e}); rendering no entries");
            Value::Array(Vec::new())
        }
    }
}

/// `{name}_resume.docx` with spaces as underscores, safe to quote in a header.
pub fn download_name(name: &str) -> String {
    let stem: String = display_name(name)
        .chars()
        .map(|c| match c {
            ' ' | '"' | '\\' => '_',
            c if c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();
    format!("{stem}_resume.docx")
}
