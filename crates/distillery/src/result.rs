// ABOUTME: DistillResult struct holding the distilled content and facts about how it was chosen.
// ABOUTME: Serializes to JSON for the CLI's --json mode.

use serde::{Deserialize, Serialize};

use crate::options::ContentType;

/// The result of distilling a document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DistillResult {
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub excerpt: Option<String>,
    pub word_count: i32,
    /// Structural path of the top scoring element.
    pub top_candidate: String,
    pub top_score: f64,
    /// Number of top-level elements merged into the content.
    pub selected: usize,
}

/// Count words in a text string using whitespace splitting.
pub fn word_count(text: &str) -> i32 {
    text.split_whitespace().count() as i32
}
