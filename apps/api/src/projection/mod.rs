//! Template projection: substitutes a `CvDocument` into an HTML template.
//!
//! Tokens use `{{name}}` syntax. The template is scanned once; inserted values
//! are never re-scanned, so a value that happens to contain `{{summary}}` is
//! emitted as text. Any `{{...}}` marker that is not a known token fails the
//! projection with `ProjectionError::UnmatchedTokens`.

use std::str::FromStr;

use thiserror::Error;

use crate::models::cv::{CvDocument, EducationEntry, ExperienceEntry, ProjectEntry};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// The 11 substitution tokens understood by the projector.
pub const TOKENS: [&str; 11] = [
    "fullName",
    "email",
    "phone",
    "address",
    "linkedin",
    "portfolio",
    "summary",
    "skills",
    "experience",
    "education",
    "projects",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Template contains unknown tokens: {0:?}")]
    UnmatchedTokens(Vec<String>),

    #[error("Unknown escape policy '{0}' (expected 'html' or 'raw')")]
    UnknownEscaping(String),
}

/// How field values are written into markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escaping {
    /// Escape `& < > " '` in every inserted value.
    #[default]
    Html,
    /// Insert values verbatim (legacy output).
    Raw,
}

impl FromStr for Escaping {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Escaping::Html),
            "raw" => Ok(Escaping::Raw),
            other => Err(ProjectionError::UnknownEscaping(other.to_string())),
        }
    }
}

impl Escaping {
    fn apply(self, value: &str) -> String {
        match self {
            Escaping::Html => escape_html(value),
            Escaping::Raw => value.to_string(),
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ────────────────────────────────────────────────────────────────────────────
// Fragments
// ────────────────────────────────────────────────────────────────────────────

/// Render-ready values for every token, computed once per projection.
#[derive(Debug, Clone)]
struct Fragments {
    values: [String; 11],
}

impl Fragments {
    fn build(doc: &CvDocument, escaping: Escaping) -> Self {
        let e = |s: &str| escaping.apply(s);
        let info = &doc.personal_info;

        Self {
            values: [
                e(&info.full_name),
                e(&info.email),
                e(&info.phone),
                e(&info.address),
                e(&info.linkedin),
                e(&info.portfolio),
                e(&doc.summary),
                doc.skills
                    .iter()
                    .map(|s| format!("<li>{}</li>", e(s)))
                    .collect(),
                doc.experience
                    .iter()
                    .map(|x| experience_fragment(x, escaping))
                    .collect(),
                doc.education
                    .iter()
                    .map(|x| education_fragment(x, escaping))
                    .collect(),
                doc.projects
                    .iter()
                    .map(|x| project_fragment(x, escaping))
                    .collect(),
            ],
        }
    }

    fn get(&self, token: &str) -> Option<&str> {
        TOKENS
            .iter()
            .position(|t| *t == token)
            .map(|i| self.values[i].as_str())
    }
}

fn experience_fragment(x: &ExperienceEntry, escaping: Escaping) -> String {
    let e = |s: &str| escaping.apply(s);
    format!(
        "<p><strong>{}</strong> at {} ({} - {})</p>\n<p>{}</p>\n",
        e(&x.job_title),
        e(&x.company),
        e(&x.start_date),
        e(&x.end_date),
        e(&x.description)
    )
}

fn education_fragment(x: &EducationEntry, escaping: Escaping) -> String {
    let e = |s: &str| escaping.apply(s);
    format!(
        "<p>{} - {} ({} - {})</p>",
        e(&x.degree),
        e(&x.institution),
        e(&x.start_date),
        e(&x.end_date)
    )
}

fn project_fragment(x: &ProjectEntry, escaping: Escaping) -> String {
    let e = |s: &str| escaping.apply(s);
    format!(
        "<p><strong>{}</strong>: {}</p>\n<p><em>Tech Stack:</em> {}</p>\n",
        e(&x.name),
        e(&x.description),
        e(&x.tech_stack.join(", "))
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

/// Substitutes every token occurrence in `template` with the document's values.
pub fn project(
    doc: &CvDocument,
    template: &str,
    escaping: Escaping,
) -> Result<String, ProjectionError> {
    let fragments = Fragments::build(doc, escaping);
    let mut out = String::with_capacity(template.len() * 2);
    let mut unmatched: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + OPEN.len()..];

        let Some(close) = after_open.find(CLOSE) else {
            // Unterminated marker: keep it and report it.
            unmatched.push(after_open.to_string());
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };

        let name = &after_open[..close];
        match fragments.get(name.trim()) {
            Some(value) => out.push_str(value),
            None => {
                if !unmatched.iter().any(|u| u == name) {
                    unmatched.push(name.to_string());
                }
                out.push_str(&rest[open..open + OPEN.len() + close + CLOSE.len()]);
            }
        }
        rest = &after_open[close + CLOSE.len()..];
    }
    out.push_str(rest);

    if unmatched.is_empty() {
        Ok(out)
    } else {
        Err(ProjectionError::UnmatchedTokens(unmatched))
    }
}

/// Lists the known tokens a template references, in `TOKENS` order.
/// Used at startup to log which sections a configured template renders.
pub fn referenced_tokens(template: &str) -> Vec<&'static str> {
    TOKENS
        .iter()
        .copied()
        .filter(|t| template.contains(&format!("{OPEN}{t}{CLOSE}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> CvDocument {
        let mut doc = CvDocument::empty();
        doc.personal_info.full_name = "Ada Lovelace".to_string();
        doc.personal_info.email = "ada@example.com".to_string();
        doc.summary = "Analyst".to_string();
        doc
    }

    #[test]
    fn test_skills_project_to_list_items_in_order() {
        let mut d = doc();
        d.skills = vec!["A".to_string(), "B".to_string()];
        let html = project(&d, "<ul>{{skills}}</ul>", Escaping::Html).unwrap();
        assert_eq!(html, "<ul><li>A</li><li>B</li></ul>");
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(!html.contains("{{skills}}"));
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let html = project(&doc(), "{{fullName}} / {{fullName}} <{{email}}>", Escaping::Html).unwrap();
        assert_eq!(html, "Ada Lovelace / Ada Lovelace <ada@example.com>");
    }

    #[test]
    fn test_unset_fields_project_as_empty() {
        let html = project(&doc(), "[{{linkedin}}][{{portfolio}}][{{phone}}]", Escaping::Html).unwrap();
        assert_eq!(html, "[][][]");
    }

    #[test]
    fn test_unknown_token_fails_projection() {
        let err = project(&doc(), "{{fullName}} {{hobbies}} {{hobbies}}", Escaping::Html).unwrap_err();
        assert_eq!(err, ProjectionError::UnmatchedTokens(vec!["hobbies".to_string()]));
    }

    #[test]
    fn test_unterminated_marker_fails_projection() {
        let err = project(&doc(), "{{fullName}} {{summary", Escaping::Html).unwrap_err();
        assert!(matches!(err, ProjectionError::UnmatchedTokens(_)));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let mut d = doc();
        d.summary = "I like {{fullName}}".to_string();
        let html = project(&d, "{{summary}}", Escaping::Raw).unwrap();
        assert_eq!(html, "I like {{fullName}}");
    }

    #[test]
    fn test_html_escaping_is_default() {
        let mut d = doc();
        d.summary = "<script>alert('x')</script> & co".to_string();
        let html = project(&d, "{{summary}}", Escaping::default()).unwrap();
        assert_eq!(
            html,
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"
        );
    }

    #[test]
    fn test_raw_escaping_inserts_verbatim() {
        let mut d = doc();
        d.summary = "<b>bold</b>".to_string();
        assert_eq!(project(&d, "{{summary}}", Escaping::Raw).unwrap(), "<b>bold</b>");
    }

    #[test]
    fn test_entry_lists_project_every_entry_in_order() {
        let mut d = doc();
        d.experience = vec![
            ExperienceEntry {
                job_title: "Engineer".to_string(),
                company: "ACME".to_string(),
                start_date: "2020".to_string(),
                end_date: "Present".to_string(),
                description: "Built".to_string(),
            },
            ExperienceEntry {
                job_title: "Intern".to_string(),
                company: "Initech".to_string(),
                ..Default::default()
            },
        ];
        d.education = vec![EducationEntry {
            degree: "BSc".to_string(),
            institution: "MIT".to_string(),
            start_date: "2014".to_string(),
            end_date: "2018".to_string(),
        }];
        d.projects = vec![ProjectEntry {
            name: "Tracker".to_string(),
            description: "Tracks tasks".to_string(),
            tech_stack: vec!["Go".to_string(), "Postgres".to_string()],
        }];

        let html = project(&d, "{{experience}}|{{education}}|{{projects}}", Escaping::Html).unwrap();
        let engineer = html.find("<strong>Engineer</strong> at ACME (2020 - Present)").unwrap();
        let intern = html.find("<strong>Intern</strong> at Initech ( - )").unwrap();
        assert!(engineer < intern);
        assert!(html.contains("<p>BSc - MIT (2014 - 2018)</p>"));
        assert!(html.contains("<p><strong>Tracker</strong>: Tracks tasks</p>"));
        assert!(html.contains("<em>Tech Stack:</em> Go, Postgres"));
    }

    #[test]
    fn test_default_template_has_every_token() {
        let template = include_str!("../../templates/cv-template.html");
        assert_eq!(referenced_tokens(template), TOKENS.to_vec());
        let html = project(&doc(), template, Escaping::Html).unwrap();
        assert!(!html.contains(OPEN));
        assert!(html.contains("Ada Lovelace"));
    }

    #[test]
    fn test_escaping_from_str() {
        assert_eq!("HTML".parse::<Escaping>().unwrap(), Escaping::Html);
        assert_eq!(" raw ".parse::<Escaping>().unwrap(), Escaping::Raw);
        assert!("none".parse::<Escaping>().is_err());
    }
}
