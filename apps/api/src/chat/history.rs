use std::collections::VecDeque;

/// Maximum number of prior user utterances passed to the chat model.
pub const MAX_CONTEXT: usize = 10;

/// Bounded ring of a conversation's most recent user utterances, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentUtterances {
    items: VecDeque<String>,
}

impl RecentUtterances {
    pub fn push(&mut self, utterance: &str) {
        if self.items.len() == MAX_CONTEXT {
            self.items.pop_front();
        }
        self.items.push_back(utterance.to_string());
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Keeps only the last `MAX_CONTEXT` entries of a client-supplied context list.
pub fn bounded_context(context: &[String]) -> &[String] {
    let start = context.len().saturating_sub(MAX_CONTEXT);
    &context[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest_beyond_capacity() {
        let mut history = RecentUtterances::default();
        for i in 0..13 {
            history.push(&format!("msg {i}"));
        }
        assert_eq!(history.len(), MAX_CONTEXT);
        let items = history.to_vec();
        assert_eq!(items.first().unwrap(), "msg 3");
        assert_eq!(items.last().unwrap(), "msg 12");
    }

    #[test]
    fn test_bounded_context_keeps_tail() {
        let context: Vec<String> = (0..15).map(|i| i.to_string()).collect();
        let bounded = bounded_context(&context);
        assert_eq!(bounded.len(), MAX_CONTEXT);
        assert_eq!(bounded[0], "5");
        assert_eq!(bounded[9], "14");
    }

    #[test]
    fn test_bounded_context_short_list_unchanged() {
        let context = vec!["a".to_string(), "b".to_string()];
        assert_eq!(bounded_context(&context), context.as_slice());
    }
}
