//! Document Generator — lays out a ResumeRecord as a `.docx` package.
//!
//! Layout: centered bold name, centered contact line, then Professional
//! Summary, Key Skills, Work Experience, Education. Empty sections are
//! omitted. Output is an in-memory buffer.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, Paragraph, Run, SpecialIndentType, Start,
};
use thiserror::Error;

use crate::resume::models::{ContactInfo, ResumeRecord};

pub mod handlers;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Sizes are in half-points.
const NAME_SIZE: usize = 36;
const HEADING_SIZE: usize = 28;

const BULLET_NUMBERING_ID: usize = 2;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write document package: {0}")]
    Pack(String),
}

/// Renders the resume and returns the packed `.docx` bytes.
pub fn render_resume(contact: &ContactInfo, record: &ResumeRecord) -> Result<Vec<u8>, RenderError> {
    let name = display_name(&contact.name);
    let contact_line = [&contact.email, &contact.phone, &contact.location]
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" | ");

    let mut docx = Docx::new()
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
            Level::new(
                0,
                Start::new(1),
                NumberFormat::new("bullet"),
                LevelText::new("•"),
                LevelJc::new("left"),
            )
            .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
        ))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(name).bold().size(NAME_SIZE))
                .align(AlignmentType::Center),
        )
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(contact_line))
                .align(AlignmentType::Center),
        )
        .add_paragraph(Paragraph::new());

    let summary = record.summary.trim();
    if !summary.is_empty() {
        docx = docx
            .add_paragraph(heading("Professional Summary"))
            .add_paragraph(plain(summary));
    }

    let skills: Vec<&str> = record
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !skills.is_empty() {
        docx = docx.add_paragraph(heading("Key Skills"));
        for skill in skills {
            docx = docx.add_paragraph(bullet(skill));
        }
    }

    let experience: Vec<_> = record.experience.iter().filter(|e| !e.is_blank()).collect();
    if !experience.is_empty() {
        docx = docx.add_paragraph(heading("Work Experience"));
        for entry in experience {
            docx = docx.add_paragraph(bold_line(&format!(
                "{} — {} ({})",
                entry.title.trim(),
                entry.company.trim(),
                entry.duration.trim()
            )));
            for line in entry.description.lines().map(str::trim).filter(|l| !l.is_empty()) {
                docx = docx.add_paragraph(bullet(line));
            }
        }
    }

    let education: Vec<_> = record.education.iter().filter(|e| !e.is_blank()).collect();
    if !education.is_empty() {
        docx = docx.add_paragraph(heading("Education"));
        for entry in education {
            docx = docx.add_paragraph(bold_line(&format!(
                "{}, {} ({})",
                entry.degree.trim(),
                entry.institution.trim(),
                entry.year.trim()
            )));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Pack(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Trimmed name, or "resume" when blank. Used for the header and the download name.
pub fn display_name(name: &str) -> &str {
    let name = name.trim();
    if name.is_empty() {
        "resume"
    } else {
        name
    }
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(HEADING_SIZE))
}

fn bold_line(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold())
}

fn plain(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn bullet(text: &str) -> Paragraph {
    plain(text).numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0))
}
