//! Comparison Workspace
//!
//! The ordered set of words currently compared on the trend chart.
//! Insertion order drives both tag display order and series colors.

use thiserror::Error;

/// Maximum number of words compared at once
pub const MAX_WORKSPACE_WORDS: usize = 5;

/// Reasons an add is rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("Word is empty")]
    EmptyWord,

    #[error("\"{0}\" is already in the comparison list")]
    Duplicate(String),

    #[error("At most {} words can be compared", MAX_WORKSPACE_WORDS)]
    Full,
}

/// What a removal left behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The word was not present
    Absent,
    /// The word was removed and others remain
    Removed,
    /// The word was removed and the workspace is now empty
    Emptied,
}

/// Ordered, duplicate-free set of at most five words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    words: Vec<String>,
}

impl Workspace {
    /// Create an empty workspace
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word.
    ///
    /// The word is trimmed first. On success the stored word is returned.
    pub fn add(&mut self, word: &str) -> Result<&str, WorkspaceError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(WorkspaceError::EmptyWord);
        }
        if self.contains(word) {
            return Err(WorkspaceError::Duplicate(word.to_string()));
        }
        if self.words.len() >= MAX_WORKSPACE_WORDS {
            return Err(WorkspaceError::Full);
        }

        self.words.push(word.to_string());
        Ok(self.words.last().map(String::as_str).unwrap_or_default())
    }

    /// Remove a word if present
    pub fn remove(&mut self, word: &str) -> Removal {
        let before = self.words.len();
        self.words.retain(|w| w != word);

        if self.words.len() == before {
            Removal::Absent
        } else if self.words.is_empty() {
            Removal::Emptied
        } else {
            Removal::Removed
        }
    }

    /// Replace the whole set with a single word
    pub fn quick_preview(&mut self, word: &str) {
        self.words = vec![word.to_string()];
    }

    /// Drop every word
    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.words.len() >= MAX_WORKSPACE_WORDS
    }
}
