//! Structured resume produced once per request by extraction.
//!
//! Every field is optional or defaultable; an empty resume is valid.

use serde::{Deserialize, Serialize};

use crate::schema::{Field, FieldKind, Schema};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub level: Option<SkillLevel>,
    pub years_experience: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: Option<bool>,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub impact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaInfo {
    pub seniority_level: Option<String>,
    pub domains: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeStructured {
    pub contact_info: ContactInfo,
    pub skills: Vec<Skill>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub projects: Vec<ProjectItem>,
    pub meta: MetaInfo,
}

// ────────────────────────────────────────────────────────────────────────────
// Field tables
// ────────────────────────────────────────────────────────────────────────────

const CONTACT_FIELDS: &[Field] = &[
    Field::optional("name", FieldKind::OptionalText),
    Field::optional("email", FieldKind::OptionalText),
    Field::optional("phone", FieldKind::OptionalText),
    Field::optional("location", FieldKind::OptionalText),
];

const SKILL_FIELDS: &[Field] = &[
    Field::optional("name", FieldKind::Text),
    Field::optional(
        "level",
        FieldKind::Choice(&["beginner", "intermediate", "expert"]),
    ),
    Field::optional("years_experience", FieldKind::OptionalNumber),
];

const EXPERIENCE_FIELDS: &[Field] = &[
    Field::optional("job_title", FieldKind::OptionalText),
    Field::optional("company", FieldKind::OptionalText),
    Field::optional("start_date", FieldKind::OptionalText),
    Field::optional("end_date", FieldKind::OptionalText),
    Field::optional("is_current", FieldKind::OptionalBool),
    Field::optional("responsibilities", FieldKind::TextList),
];

const EDUCATION_FIELDS: &[Field] = &[
    Field::optional("degree", FieldKind::OptionalText),
    Field::optional("field_of_study", FieldKind::OptionalText),
    Field::optional("institution", FieldKind::OptionalText),
    Field::optional("start_date", FieldKind::OptionalText),
    Field::optional("end_date", FieldKind::OptionalText),
];

const PROJECT_FIELDS: &[Field] = &[
    Field::optional("name", FieldKind::OptionalText),
    Field::optional("description", FieldKind::OptionalText),
    Field::optional("technologies", FieldKind::TextList),
    Field::optional("impact", FieldKind::OptionalText),
];

const META_FIELDS: &[Field] = &[
    Field::optional("seniority_level", FieldKind::OptionalText),
    Field::optional("domains", FieldKind::TextList),
    Field::optional("languages", FieldKind::TextList),
];

impl Schema for ResumeStructured {
    const NAME: &'static str = "ResumeStructured";
    const FIELDS: &'static [Field] = &[
        Field::optional("contact_info", FieldKind::Object(CONTACT_FIELDS)),
        Field::optional("skills", FieldKind::ObjectList(SKILL_FIELDS)),
        Field::optional("experience", FieldKind::ObjectList(EXPERIENCE_FIELDS)),
        Field::optional("education", FieldKind::ObjectList(EDUCATION_FIELDS)),
        Field::optional("projects", FieldKind::ObjectList(PROJECT_FIELDS)),
        Field::optional("meta", FieldKind::Object(META_FIELDS)),
    ];
}

impl ResumeStructured {
    /// Comma-joined skill names, skipping blanks.
    pub fn skill_names(&self) -> String {
        self.skills
            .iter()
            .map(|s| s.name.trim())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
