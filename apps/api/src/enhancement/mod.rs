//! CV enhancement: best-effort rewrite of a finished document's text.
//!
//! The response must keep the input's exact JSON shape. Anything else is an
//! `EnhancementError`, and `enhance_or_fallback` turns every error into the
//! original document.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::enhancement::prompts::{ENHANCE_PROMPT_TEMPLATE, ENHANCE_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::cv::CvDocument;

#[derive(Debug, Error)]
pub enum EnhancementError {
    #[error("Enhancement call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Enhanced document does not match input structure at {path}")]
    ShapeMismatch { path: String },

    #[error("Enhanced document could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait EnhancementGateway: Send + Sync {
    async fn enhance(&self, document: &CvDocument) -> Result<CvDocument, EnhancementError>;
}

/// Enhancer backed by the shared LLM client.
pub struct LlmEnhancer(pub LlmClient);

#[async_trait]
impl EnhancementGateway for LlmEnhancer {
    async fn enhance(&self, document: &CvDocument) -> Result<CvDocument, EnhancementError> {
        let original = serde_json::to_value(document)?;
        let prompt = ENHANCE_PROMPT_TEMPLATE.replace("{cv_json}", &original.to_string());
        let system = format!("{ENHANCE_SYSTEM} {JSON_ONLY_SYSTEM}");

        let enhanced: Value = self.0.call_json(&prompt, &system).await?;
        accept_enhanced(&original, enhanced)
    }
}

/// Accepts `enhanced` only if it has the same structure as `original`.
pub fn accept_enhanced(original: &Value, enhanced: Value) -> Result<CvDocument, EnhancementError> {
    check_shape(original, &enhanced, "$")?;
    Ok(serde_json::from_value(enhanced)?)
}

/// Objects must carry identical key sets, strings stay strings, arrays stay
/// arrays. Array lengths may change (rewritten skill lists, for instance), but
/// every element must match the shape of the original's first element.
fn check_shape(original: &Value, candidate: &Value, path: &str) -> Result<(), EnhancementError> {
    let mismatch = || EnhancementError::ShapeMismatch {
        path: path.to_string(),
    };

    match (original, candidate) {
        (Value::String(_), Value::String(_)) => Ok(()),
        (Value::Object(a), Value::Object(b)) => {
            if a.len() != b.len() || a.keys().any(|k| !b.contains_key(k)) {
                return Err(mismatch());
            }
            for (key, value) in a {
                check_shape(value, &b[key.as_str()], &format!("{path}.{key}"))?;
            }
            Ok(())
        }
        (Value::Array(a), Value::Array(b)) => match a.first() {
            Some(template) => b
                .iter()
                .enumerate()
                .try_for_each(|(i, item)| check_shape(template, item, &format!("{path}[{i}]"))),
            // An empty original list only admits strings (skills, tech stack).
            None => {
                if b.iter().all(Value::is_string) {
                    Ok(())
                } else {
                    Err(mismatch())
                }
            }
        },
        _ => Err(mismatch()),
    }
}

/// Runs the gateway and degrades to `document` on any error.
pub async fn enhance_or_fallback(
    gateway: &dyn EnhancementGateway,
    document: &CvDocument,
) -> CvDocument {
    match gateway.enhance(document).await {
        Ok(enhanced) => {
            info!("CV enhancement accepted");
            enhanced
        }
        Err(e) => {
            warn!("CV enhancement failed, keeping original document: {e}");
            document.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::ProjectEntry;
    use serde_json::json;

    fn sample() -> CvDocument {
        let mut doc = CvDocument::empty();
        doc.personal_info.full_name = "Ada Lovelace".to_string();
        doc.summary = "Wrote programs".to_string();
        doc.skills = vec!["Math".to_string(), "Engines".to_string()];
        doc.projects[0] = ProjectEntry {
            name: "Notes".to_string(),
            description: "Annotated a paper".to_string(),
            tech_stack: vec!["Paper".to_string()],
        };
        doc
    }

    struct FixedEnhancer(Result<Value, ()>);

    #[async_trait]
    impl EnhancementGateway for FixedEnhancer {
        async fn enhance(&self, document: &CvDocument) -> Result<CvDocument, EnhancementError> {
            let original = serde_json::to_value(document)?;
            match &self.0 {
                Ok(value) => accept_enhanced(&original, value.clone()),
                Err(()) => Err(EnhancementError::Llm(LlmError::EmptyContent)),
            }
        }
    }

    #[test]
    fn test_same_shape_is_accepted() {
        let doc = sample();
        let mut value = serde_json::to_value(&doc).unwrap();
        value["summary"] = json!("Authored the first published algorithm");
        value["skills"] = json!(["Mathematics", "Analytical Engines", "Writing"]);

        let enhanced = accept_enhanced(&serde_json::to_value(&doc).unwrap(), value).unwrap();
        assert_eq!(enhanced.summary, "Authored the first published algorithm");
        assert_eq!(enhanced.skills.len(), 3);
        assert_eq!(enhanced.personal_info.full_name, "Ada Lovelace");
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let original = serde_json::to_value(sample()).unwrap();
        let mut value = original.clone();
        value["personalInfo"].as_object_mut().unwrap().remove("phone");
        let err = accept_enhanced(&original, value).unwrap_err();
        assert!(matches!(err, EnhancementError::ShapeMismatch { ref path } if path == "$.personalInfo"));
    }

    #[test]
    fn test_extra_key_is_rejected() {
        let original = serde_json::to_value(sample()).unwrap();
        let mut value = original.clone();
        value["hobbies"] = json!("chess");
        assert!(accept_enhanced(&original, value).is_err());
    }

    #[test]
    fn test_type_change_is_rejected() {
        let original = serde_json::to_value(sample()).unwrap();
        let mut value = original.clone();
        value["skills"] = json!("Math, Engines");
        assert!(accept_enhanced(&original, value).is_err());

        let mut value = original.clone();
        value["experience"][0]["company"] = json!(null);
        assert!(accept_enhanced(&original, value).is_err());
    }

    #[test]
    fn test_empty_object_is_rejected() {
        let original = serde_json::to_value(sample()).unwrap();
        assert!(accept_enhanced(&original, json!({})).is_err());
    }

    #[tokio::test]
    async fn test_unparseable_payload_falls_back_to_identical_document() {
        let doc = sample();
        let gateway = FixedEnhancer(Ok(json!(["not", "a", "cv"])));
        let result = enhance_or_fallback(&gateway, &doc).await;
        assert_eq!(
            serde_json::to_vec(&result).unwrap(),
            serde_json::to_vec(&doc).unwrap()
        );
    }

    #[tokio::test]
    async fn test_gateway_error_falls_back_to_original() {
        let doc = sample();
        let gateway = FixedEnhancer(Err(()));
        assert_eq!(enhance_or_fallback(&gateway, &doc).await, doc);
    }

    #[tokio::test]
    async fn test_valid_payload_replaces_document() {
        let doc = sample();
        let mut value = serde_json::to_value(&doc).unwrap();
        value["experience"][0]["description"] = json!("Led engine design reviews");
        let gateway = FixedEnhancer(Ok(value));
        let result = enhance_or_fallback(&gateway, &doc).await;
        assert_eq!(result.experience[0].description, "Led engine design reviews");
    }
}
