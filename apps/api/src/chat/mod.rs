//! Career chat: the free-text path outside the CV interview.
//!
//! Stateless per call: the caller supplies the recent user utterances, capped at
//! `history::MAX_CONTEXT`.

pub mod handlers;
pub mod history;
pub mod prompts;

use async_trait::async_trait;

use crate::chat::history::bounded_context;
use crate::chat::prompts::{CHAT_SYSTEM_TEMPLATE, FALLBACK_REPLY};
use crate::llm_client::{LlmClient, LlmError};

#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn reply(&self, message: &str, recent: &[String]) -> Result<String, LlmError>;
}

/// Chat backed by the shared LLM client.
pub struct LlmChat(pub LlmClient);

#[async_trait]
impl ChatGateway for LlmChat {
    async fn reply(&self, message: &str, recent: &[String]) -> Result<String, LlmError> {
        let system = build_chat_system(recent);
        let response = self.0.call(message, &system).await?;
        Ok(response
            .text()
            .map(str::to_string)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}

/// Fills the system template with at most the last `MAX_CONTEXT` utterances.
pub fn build_chat_system(recent: &[String]) -> String {
    let recent = bounded_context(recent);
    let context = if recent.is_empty() {
        String::new()
    } else {
        format!(
            "Here are the user's recent messages for context:\n{}\n\n",
            recent.join("\n")
        )
    };
    CHAT_SYSTEM_TEMPLATE.replace("{context}", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_without_history_has_no_context_block() {
        let system = build_chat_system(&[]);
        assert!(!system.contains("recent messages"));
        assert!(!system.contains("{context}"));
    }

    #[test]
    fn test_system_includes_only_last_ten_utterances() {
        let recent: Vec<String> = (0..12).map(|i| format!("utterance-{i:02}")).collect();
        let system = build_chat_system(&recent);
        assert!(system.contains("recent messages"));
        assert!(!system.contains("utterance-00"));
        assert!(!system.contains("utterance-01"));
        assert!(system.contains("utterance-02"));
        assert!(system.contains("utterance-11"));
    }
}
