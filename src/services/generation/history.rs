//! Retained conversation turns of one generation client.

use crate::types::{Content, Part, Role};

/// Bounded, ordered list of conversation turns.
///
/// Owned by exactly one [`GenerationClient`](super::GenerationClient); callers
/// only ever see it as a slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationHistory {
    turns: Vec<Content>,
    limit: Option<usize>,
}

impl ConversationHistory {
    /// Empty history keeping at most `limit` turns, or all turns when `None`.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            turns: Vec::new(),
            limit,
        }
    }

    /// The configured turn limit.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Retained turns, oldest first.
    pub fn turns(&self) -> &[Content] {
        &self.turns
    }

    /// Number of retained turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn is retained.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends the non-empty turns and drops the oldest ones beyond the limit.
    pub fn extend<I>(&mut self, turns: I)
    where
        I: IntoIterator<Item = Content>,
    {
        self.turns.extend(turns.into_iter().filter(|c| !c.is_empty()));
        self.truncate();
    }

    /// Appends one turn; empty turns are ignored.
    pub fn push(&mut self, turn: Content) {
        self.extend(std::iter::once(turn));
    }

    /// Records a model turn describing a failed call.
    pub fn record_failure(&mut self, message: &str) {
        self.push(Content {
            role: Some(Role::Model),
            parts: vec![Part::text(message)],
        });
    }

    fn truncate(&mut self) {
        if let Some(limit) = self.limit {
            if self.turns.len() > limit {
                let excess = self.turns.len() - limit;
                self.turns.drain(..excess);
            }
        }
    }
}
