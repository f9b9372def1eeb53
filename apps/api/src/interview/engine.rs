//! Interview engine: the step state machine that fills a `CvDocument`.
//!
//! `start` resets a session to step 0 and returns the first prompt. Each `submit`
//! applies the current step's transform, writes the result, and advances by one.
//! After the last step the session drops back to `Idle` and keeps its document;
//! nothing resets until the next `start`.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::interview::questions::QuestionSequence;
use crate::models::cv::CvDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Idle,
    Collecting,
}

/// Per-conversation interview state. Owned by exactly one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewSession {
    pub mode: Mode,
    pub current_step: usize,
    pub document: CvDocument,
}

/// A question to put to the user, with its position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub step: usize,
    pub total: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    NextPrompt(Prompt),
    Complete { document: CvDocument },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterviewError {
    #[error("No interview in progress")]
    NotCollecting,
}

#[derive(Debug, Clone)]
pub struct InterviewEngine {
    sequence: Arc<QuestionSequence>,
}

impl InterviewEngine {
    pub fn new(sequence: Arc<QuestionSequence>) -> Self {
        Self { sequence }
    }

    pub fn total_steps(&self) -> usize {
        self.sequence.len()
    }

    /// Resets `session` regardless of its prior state and returns the first prompt.
    pub fn start(&self, session: &mut InterviewSession) -> Prompt {
        *session = InterviewSession {
            mode: Mode::Collecting,
            current_step: 0,
            document: CvDocument::empty(),
        };
        self.prompt_at(0)
    }

    /// Consumes one user turn. Any text is accepted; only calling outside
    /// `Collecting` is an error.
    pub fn submit(
        &self,
        session: &mut InterviewSession,
        raw_input: &str,
    ) -> Result<StepResult, InterviewError> {
        if session.mode != Mode::Collecting {
            return Err(InterviewError::NotCollecting);
        }
        let question = self
            .sequence
            .get(session.current_step)
            .ok_or(InterviewError::NotCollecting)?;

        let value = question.transform.apply(raw_input);
        question.field.write(&mut session.document, value);
        session.current_step += 1;

        if session.current_step < self.sequence.len() {
            Ok(StepResult::NextPrompt(self.prompt_at(session.current_step)))
        } else {
            session.mode = Mode::Idle;
            Ok(StepResult::Complete {
                document: session.document.clone(),
            })
        }
    }

    fn prompt_at(&self, step: usize) -> Prompt {
        // `step` is always < len here: 0 is valid because sequences are non-empty.
        let text = self
            .sequence
            .get(step)
            .map(|q| q.prompt.clone())
            .unwrap_or_default();
        Prompt {
            step,
            total: self.sequence.len(),
            text,
        }
    }
}
