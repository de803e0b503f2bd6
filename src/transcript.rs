//! The conversation transcript sent to the model on every round.
//!
//! A [`Transcript`] is an append-only list of role-tagged [`Entry`] values.
//! Index 0 always holds the system prompt. There is no API to
//! remove, reorder, or edit entries; [`Transcript::push`] is the only
//! mutator.

use serde::Serialize;

use crate::step::Step;

/// Who produced an entry.
///
/// `Developer` is the tool-result channel: observations injected by the loop
/// use it so the model can tell real tool output apart from its own claims.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Developer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "you"),
            Role::Assistant => write!(f, "model"),
            Role::Developer => write!(f, "tool"),
        }
    }
}

/// A single transcript entry, serialized exactly as the chat API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub role: Role,
    pub content: String,
}

impl Entry {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    /// A user request, wrapped as a `user` step.
    pub fn user_step(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Step::user(text).to_json(),
        }
    }

    /// An assistant message, stored verbatim.
    pub fn assistant(raw: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: raw.into(),
        }
    }

    /// A loop-injected observation on the tool-result channel.
    pub fn observation(text: impl Into<String>) -> Self {
        Self {
            role: Role::Developer,
            content: Step::observation(text).to_json(),
        }
    }
}

/// Append-only conversation history.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    /// Creates a transcript seeded with the system prompt.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            entries: vec![Entry::system(system_prompt)],
        }
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// The full, ordered history, as sent to the completion endpoint.
    pub fn snapshot(&self) -> &[Entry] {
        &self.entries
    }

    pub fn system(&self) -> &Entry {
        &self.entries[0]
    }

    /// Entries after the system prompt.
    pub fn conversation(&self) -> &[Entry] {
        &self.entries[1..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn last(&self) -> &Entry {
        // Never empty: the system entry is placed at construction.
        &self.entries[self.entries.len() - 1]
    }
}
