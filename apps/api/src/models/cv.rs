//! The CV document assembled by the interview and consumed by projection/enhancement.
//!
//! Every leaf is a `String` or `Vec<String>`. Unset fields are empty strings, never
//! absent, so template substitution never meets a missing key. Deserialization is
//! lenient: a missing key falls back to its empty default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub tech_stack: Vec<String>,
}

/// Full CV document. The interview only ever writes index 0 of the entry lists,
/// but projection handles any number of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvDocument {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
}

impl CvDocument {
    /// The shape a fresh interview starts from: all strings empty, one blank
    /// entry in each of experience, education and projects.
    pub fn empty() -> Self {
        Self {
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            projects: vec![ProjectEntry::default()],
            ..Self::default()
        }
    }

    pub fn first_experience_mut(&mut self) -> &mut ExperienceEntry {
        first_or_insert(&mut self.experience)
    }

    pub fn first_education_mut(&mut self) -> &mut EducationEntry {
        first_or_insert(&mut self.education)
    }

    pub fn first_project_mut(&mut self) -> &mut ProjectEntry {
        first_or_insert(&mut self.projects)
    }
}

fn first_or_insert<T: Default>(entries: &mut Vec<T>) -> &mut T {
    if entries.is_empty() {
        entries.push(T::default());
    }
    &mut entries[0]
}
