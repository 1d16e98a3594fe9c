use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The structured four-field representation of a parsed resume.
/// Every field is always present, even when the model omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Contact block printed at the top of a generated document.
#[derive(Debug, Clone, Default)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

impl ExperienceEntry {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            title: field_text(obj, "title"),
            company: field_text(obj, "company"),
            duration: field_text(obj, "duration"),
            description: field_text(obj, "description"),
        }
    }

    /// True when the entry has nothing to put on its header line.
    pub fn is_blank(&self) -> bool {
        [&self.title, &self.company, &self.duration]
            .iter()
            .all(|s| s.trim().is_empty())
    }
}

impl EducationEntry {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            degree: field_text(obj, "degree"),
            institution: field_text(obj, "institution"),
            year: field_text(obj, "year"),
        }
    }

    pub fn is_blank(&self) -> bool {
        [&self.degree, &self.institution, &self.year]
            .iter()
            .all(|s| s.trim().is_empty())
    }
}

/// Reads an array of experience objects leniently. Non-objects are skipped.
pub fn experience_from_value(value: &Value) -> Vec<ExperienceEntry> {
    objects(value).map(ExperienceEntry::from_object).collect()
}

/// Reads an array of education objects leniently. Non-objects are skipped.
pub fn education_from_value(value: &Value) -> Vec<EducationEntry> {
    objects(value).map(EducationEntry::from_object).collect()
}

fn objects(value: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Strings as-is, numbers and booleans in textual form, anything else empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn field_text(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).map(value_text).unwrap_or_default()
}
