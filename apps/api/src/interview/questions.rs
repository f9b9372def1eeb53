//! Question sequence: the step table driving the CV interview.
//!
//! Each step maps to one prompt, one field of `CvDocument`, and one input
//! transform. Reordering or adding questions is a change to this table only.

use thiserror::Error;

use crate::models::cv::{CvDocument, ProjectEntry};

/// Keyword that leaves an optional field at its current value.
pub const SKIP_KEYWORD: &str = "skip";

// ────────────────────────────────────────────────────────────────────────────
// Field paths and transforms
// ────────────────────────────────────────────────────────────────────────────

/// A writable location inside `CvDocument`. Entry-list fields target index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    FullName,
    Email,
    Phone,
    Address,
    Linkedin,
    Portfolio,
    Summary,
    Skills,
    ExperienceJobTitle,
    ExperienceCompany,
    ExperienceStartDate,
    ExperienceEndDate,
    ExperienceDescription,
    EducationDegree,
    EducationInstitution,
    EducationStartDate,
    EducationEndDate,
    Project,
}

/// The shape of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    List,
    Project,
}

/// How raw input is turned into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Trim surrounding whitespace.
    Trim,
    /// Trim; the skip keyword (any case) leaves the field untouched.
    Skippable,
    /// Split on commas and trim each segment. Empty segments are kept.
    CommaList,
    /// `name, description, tech, tech, ...`
    ProjectTriple,
}

/// Output of a transform, ready to be written at a `FieldPath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Project(ProjectEntry),
    Unchanged,
}

impl Transform {
    pub fn produces(self) -> FieldKind {
        match self {
            Transform::Trim | Transform::Skippable => FieldKind::Text,
            Transform::CommaList => FieldKind::List,
            Transform::ProjectTriple => FieldKind::Project,
        }
    }

    pub fn apply(self, raw: &str) -> FieldValue {
        match self {
            Transform::Trim => FieldValue::Text(raw.trim().to_string()),
            Transform::Skippable => {
                let trimmed = raw.trim();
                if trimmed.eq_ignore_ascii_case(SKIP_KEYWORD) {
                    FieldValue::Unchanged
                } else {
                    FieldValue::Text(trimmed.to_string())
                }
            }
            Transform::CommaList => FieldValue::List(split_trimmed(raw)),
            Transform::ProjectTriple => {
                let mut segments = split_trimmed(raw).into_iter();
                let name = segments.next().unwrap_or_default();
                let description = segments.next().unwrap_or_default();
                FieldValue::Project(ProjectEntry {
                    name,
                    description,
                    tech_stack: segments.collect(),
                })
            }
        }
    }
}

fn split_trimmed(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

impl FieldPath {
    pub fn kind(self) -> FieldKind {
        match self {
            FieldPath::Skills => FieldKind::List,
            FieldPath::Project => FieldKind::Project,
            _ => FieldKind::Text,
        }
    }

    /// Writes `value` into `doc`. `Unchanged` and kind-mismatched values are no-ops;
    /// `QuestionSequence::new` rejects mismatched steps up front.
    pub fn write(self, doc: &mut CvDocument, value: FieldValue) {
        match value {
            FieldValue::Unchanged => {}
            FieldValue::Text(text) => {
                if let Some(slot) = self.text_slot(doc) {
                    *slot = text;
                }
            }
            FieldValue::List(items) => {
                if self == FieldPath::Skills {
                    doc.skills = items;
                }
            }
            FieldValue::Project(project) => {
                if self == FieldPath::Project {
                    *doc.first_project_mut() = project;
                }
            }
        }
    }

    fn text_slot(self, doc: &mut CvDocument) -> Option<&mut String> {
        let slot = match self {
            FieldPath::FullName => &mut doc.personal_info.full_name,
            FieldPath::Email => &mut doc.personal_info.email,
            FieldPath::Phone => &mut doc.personal_info.phone,
            FieldPath::Address => &mut doc.personal_info.address,
            FieldPath::Linkedin => &mut doc.personal_info.linkedin,
            FieldPath::Portfolio => &mut doc.personal_info.portfolio,
            FieldPath::Summary => &mut doc.summary,
            FieldPath::ExperienceJobTitle => &mut doc.first_experience_mut().job_title,
            FieldPath::ExperienceCompany => &mut doc.first_experience_mut().company,
            FieldPath::ExperienceStartDate => &mut doc.first_experience_mut().start_date,
            FieldPath::ExperienceEndDate => &mut doc.first_experience_mut().end_date,
            FieldPath::ExperienceDescription => &mut doc.first_experience_mut().description,
            FieldPath::EducationDegree => &mut doc.first_education_mut().degree,
            FieldPath::EducationInstitution => &mut doc.first_education_mut().institution,
            FieldPath::EducationStartDate => &mut doc.first_education_mut().start_date,
            FieldPath::EducationEndDate => &mut doc.first_education_mut().end_date,
            FieldPath::Skills | FieldPath::Project => return None,
        };
        Some(slot)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sequence
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub field: FieldPath,
    pub transform: Transform,
}

impl Question {
    pub fn new(prompt: &str, field: FieldPath, transform: Transform) -> Self {
        Self {
            prompt: prompt.to_string(),
            field,
            transform,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Question sequence is empty")]
    Empty,

    #[error("Step {step}: transform {transform:?} cannot write field {field:?}")]
    KindMismatch {
        step: usize,
        field: FieldPath,
        transform: Transform,
    },
}

/// Immutable, ordered step table. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct QuestionSequence {
    questions: Vec<Question>,
}

impl QuestionSequence {
    pub fn new(questions: Vec<Question>) -> Result<Self, SequenceError> {
        if questions.is_empty() {
            return Err(SequenceError::Empty);
        }
        for (step, q) in questions.iter().enumerate() {
            if q.transform.produces() != q.field.kind() {
                return Err(SequenceError::KindMismatch {
                    step,
                    field: q.field,
                    transform: q.transform,
                });
            }
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn get(&self, step: usize) -> Option<&Question> {
        self.questions.get(step)
    }
}

impl Default for QuestionSequence {
    /// The 18-step CV interview.
    fn default() -> Self {
        use FieldPath::*;
        use Transform::*;

        let questions = vec![
            Question::new("Let's start building your CV! What's your full name?", FullName, Trim),
            Question::new("What's your email address?", Email, Trim),
            Question::new("What's your phone number?", Phone, Trim),
            Question::new("What's your address?", Address, Trim),
            Question::new("Share your LinkedIn profile URL (or type 'skip').", Linkedin, Skippable),
            Question::new("Share your portfolio/website (or type 'skip').", Portfolio, Skippable),
            Question::new(
                "Write a short professional summary about yourself (2-3 sentences).",
                Summary,
                Trim,
            ),
            Question::new("List your key skills (comma-separated).", Skills, CommaList),
            Question::new("What's your most recent job title?", ExperienceJobTitle, Trim),
            Question::new("Which company did/do you work for?", ExperienceCompany, Trim),
            Question::new("Job start date (Month/Year)?", ExperienceStartDate, Trim),
            Question::new("Job end date (or type 'Present').", ExperienceEndDate, Trim),
            Question::new(
                "Describe your role & key achievements in this job.",
                ExperienceDescription,
                Trim,
            ),
            Question::new("What's your highest degree or qualification?", EducationDegree, Trim),
            Question::new(
                "Which institution/university did you study at?",
                EducationInstitution,
                Trim,
            ),
            Question::new("Education start year?", EducationStartDate, Trim),
            Question::new("Education end year (or expected)?", EducationEndDate, Trim),
            Question::new(
                "Tell me about a project: name, short description, and tech stack used.",
                Project,
                ProjectTriple,
            ),
        ];

        Self { questions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sequence_has_18_valid_steps() {
        let seq = QuestionSequence::default();
        assert_eq!(seq.len(), 18);
        // The default table must pass the same validation as a configured one.
        let rebuilt = QuestionSequence::new(seq.questions.clone()).unwrap();
        assert_eq!(rebuilt.len(), 18);
    }

    #[test]
    fn test_default_sequence_order_matches_document_layout() {
        let seq = QuestionSequence::default();
        assert_eq!(seq.get(0).unwrap().field, FieldPath::FullName);
        assert_eq!(seq.get(4).unwrap().field, FieldPath::Linkedin);
        assert_eq!(seq.get(7).unwrap().field, FieldPath::Skills);
        assert_eq!(seq.get(17).unwrap().field, FieldPath::Project);
        assert!(seq.get(18).is_none());
    }

    #[test]
    fn test_new_rejects_empty_sequence() {
        assert_eq!(QuestionSequence::new(vec![]).unwrap_err(), SequenceError::Empty);
    }

    #[test]
    fn test_new_rejects_kind_mismatch() {
        let err = QuestionSequence::new(vec![
            Question::new("Name?", FieldPath::FullName, Transform::Trim),
            Question::new("Skills?", FieldPath::Skills, Transform::Trim),
        ])
        .unwrap_err();
        assert!(matches!(err, SequenceError::KindMismatch { step: 1, .. }));
    }

    #[test]
    fn test_comma_list_keeps_empty_segments() {
        assert_eq!(
            Transform::CommaList.apply("Go, Rust,  C++ ,"),
            FieldValue::List(vec![
                "Go".to_string(),
                "Rust".to_string(),
                "C++".to_string(),
                String::new()
            ])
        );
    }

    #[test]
    fn test_project_triple_splits_name_description_and_stack() {
        let value = Transform::ProjectTriple.apply("Tracker, Tracks tasks, Go, Postgres");
        assert_eq!(
            value,
            FieldValue::Project(ProjectEntry {
                name: "Tracker".to_string(),
                description: "Tracks tasks".to_string(),
                tech_stack: vec!["Go".to_string(), "Postgres".to_string()],
            })
        );
    }

    #[test]
    fn test_project_triple_defaults_missing_segments() {
        let value = Transform::ProjectTriple.apply("Solo");
        assert_eq!(
            value,
            FieldValue::Project(ProjectEntry {
                name: "Solo".to_string(),
                description: String::new(),
                tech_stack: vec![],
            })
        );
    }

    #[test]
    fn test_skippable_recognises_keyword_in_any_case() {
        assert_eq!(Transform::Skippable.apply("skip"), FieldValue::Unchanged);
        assert_eq!(Transform::Skippable.apply("  SKIP "), FieldValue::Unchanged);
        assert_eq!(
            Transform::Skippable.apply("https://x.com"),
            FieldValue::Text("https://x.com".to_string())
        );
    }

    #[test]
    fn test_write_targets_first_entry() {
        let mut doc = CvDocument::empty();
        FieldPath::EducationDegree.write(&mut doc, FieldValue::Text("BSc".to_string()));
        assert_eq!(doc.education[0].degree, "BSc");
        assert_eq!(doc.education.len(), 1);
    }
}
