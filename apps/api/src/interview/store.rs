//! Per-conversation state behind a concurrent map.
//!
//! Each conversation owns its own interview session and chat history; nothing is
//! shared between conversations. Shard locks are held only for the synchronous
//! state transition, never across enhancement or rendering.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::chat::history::RecentUtterances;
use crate::interview::engine::{
    InterviewEngine, InterviewError, InterviewSession, Mode, Prompt, StepResult,
};
use crate::models::cv::CvDocument;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Interview(#[from] InterviewError),
}

#[derive(Debug, Clone)]
pub struct Conversation {
    pub interview: InterviewSession,
    pub history: RecentUtterances,
    /// Enhanced document from the most recent finished interview.
    pub completed: Option<CvDocument>,
    /// Bumped on every interview start; completions from older flows are dropped.
    pub generation: u64,
    pub last_active: DateTime<Utc>,
}

impl Conversation {
    fn new() -> Self {
        Self {
            interview: InterviewSession::default(),
            history: RecentUtterances::default(),
            completed: None,
            generation: 0,
            last_active: Utc::now(),
        }
    }
}

/// What a user message turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// The message answered an interview step.
    Interview { result: StepResult, generation: u64 },
    /// No interview in progress: answer via chat with these prior utterances.
    Chat { context: Vec<String> },
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Conversation>>,
    engine: InterviewEngine,
}

impl SessionStore {
    pub fn new(engine: InterviewEngine) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            engine,
        }
    }

    pub fn engine(&self) -> &InterviewEngine {
        &self.engine
    }

    /// Creates an idle conversation and returns its ID.
    pub fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), Conversation::new());
        id
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<Conversation> {
        self.sessions.get(id).map(|c| c.clone())
    }

    /// Starts (or restarts) the CV interview for a conversation.
    pub fn start_interview(&self, id: &str) -> Result<Prompt, StoreError> {
        let mut conv = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        conv.generation += 1;
        conv.completed = None;
        conv.last_active = Utc::now();
        let first = self.engine.start(&mut conv.interview);
        info!("Interview started for session {id} (generation {})", conv.generation);
        Ok(first)
    }

    /// Feeds one interview answer. Rejected unless the interview is collecting.
    pub fn submit_answer(&self, id: &str, input: &str) -> Result<(StepResult, u64), StoreError> {
        let mut conv = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let result = self.answer(id, &mut conv, input)?;
        Ok((result, conv.generation))
    }

    /// Routes a user message: interview answer while collecting, chat otherwise.
    /// The message is recorded in the conversation's history either way.
    pub fn handle_message(&self, id: &str, message: &str) -> Result<Turn, StoreError> {
        let mut conv = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        conv.last_active = Utc::now();

        if conv.interview.mode == Mode::Collecting {
            let result = self.answer(id, &mut conv, message)?;
            return Ok(Turn::Interview {
                result,
                generation: conv.generation,
            });
        }

        let context = conv.history.to_vec();
        conv.history.push(message);
        Ok(Turn::Chat { context })
    }

    fn answer(
        &self,
        id: &str,
        conv: &mut Conversation,
        input: &str,
    ) -> Result<StepResult, InterviewError> {
        conv.last_active = Utc::now();
        let result = self.engine.submit(&mut conv.interview, input)?;
        conv.history.push(input);
        if let StepResult::Complete { document } = &result {
            // Stored before enhancement; the enhanced copy replaces it later.
            conv.completed = Some(document.clone());
            info!("Interview completed for session {id}");
        }
        Ok(result)
    }

    /// Replaces the collected document with its enhanced version. Returns false
    /// when the conversation is gone or a newer interview has started since.
    pub fn store_completed(&self, id: &str, generation: u64, document: CvDocument) -> bool {
        match self.sessions.get_mut(id) {
            Some(mut conv) if conv.generation == generation => {
                conv.completed = Some(document);
                true
            }
            _ => false,
        }
    }

    /// Reading the document counts as activity for idle eviction.
    pub fn completed_document(&self, id: &str) -> Result<Option<CvDocument>, StoreError> {
        let mut conv = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        conv.last_active = Utc::now();
        Ok(conv.completed.clone())
    }

    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drops conversations idle for longer than `max_idle`. Returns how many.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let before = self.sessions.len();
        self.sessions.retain(|_, conv| conv.last_active >= cutoff);
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            info!("Evicted {evicted} idle sessions");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}
