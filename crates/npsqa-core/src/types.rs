//! Domain types shared by the retriever, the pipeline and the CLI.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::language::LanguageCode;

pub type DocId = String;

/// Longest source excerpt returned with an answer, in characters.
pub const SOURCE_EXCERPT_CHARS: usize = 200;
/// Longest accepted question, in characters.
pub const MAX_QUERY_CHARS: usize = 2000;
pub const MIN_TOP_K: usize = 1;
pub const MAX_TOP_K: usize = 10;

/// A passage of the knowledge base as it is stored.
///
/// - `id`: unique document identifier (`nps_doc_3`, `faq:0`)
/// - `source`: where the passage came from (corpus name or relative path)
/// - `doc_index`: position within its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub id: DocId,
    pub content: String,
    pub source: String,
    pub doc_index: usize,
}

/// One nearest-neighbour hit. Lower `distance` is more relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: DocId,
    pub text: String,
    pub distance: f32,
}

/// A retrieved document as shown to the caller next to an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: DocId,
    pub text: String,
    pub distance: f32,
}

impl SourceDocument {
    /// Copies id and distance, shortening the text to an excerpt.
    pub fn from_retrieved(doc: &RetrievedDocument) -> Self {
        Self { id: doc.id.clone(), text: excerpt(&doc.text, SOURCE_EXCERPT_CHARS), distance: doc.distance }
    }
}

/// Cut `text` to `max_chars` characters, appending `...` when anything was dropped.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Sampling options handed to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self { temperature: 0.7, max_tokens: 1024 }
    }
}

/// Wall-clock time spent in each pipeline stage, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimings {
    pub total: f64,
    pub detection: f64,
    pub translation_q: f64,
    pub retrieval: f64,
    pub generation: f64,
    pub translation_r: f64,
}

/// Outcome of one question. Built once per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    #[serde(rename = "response")]
    pub final_response: String,
    pub detected_language: LanguageCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_response: Option<String>,
    #[serde(rename = "retrieved_documents", default)]
    pub retrieved_count: usize,
    #[serde(default)]
    pub sources: Vec<SourceDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<StageTimings>,
}

impl PipelineResult {
    /// Result for a request that failed outside the stages that absorb their own errors.
    pub fn failure(message: &str, error: String) -> Self {
        Self {
            final_response: message.to_string(),
            detected_language: LanguageCode::En,
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A question as submitted by a caller before it reaches the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_top_k() -> usize { 5 }
fn default_temperature() -> f32 { 0.7 }

impl ChatRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), language: None, top_k: default_top_k(), temperature: default_temperature() }
    }

    /// Check bounds and return the forced language, if one was given. A
    /// blank `language` counts as not given.
    pub fn validate(&self) -> Result<Option<LanguageCode>> {
        if self.query.trim().is_empty() {
            return Err(Error::InvalidRequest("query must not be empty".into()));
        }
        let len = self.query.chars().count();
        if len > MAX_QUERY_CHARS {
            return Err(Error::InvalidRequest(format!("query is {len} characters, limit is {MAX_QUERY_CHARS}")));
        }
        if !(MIN_TOP_K..=MAX_TOP_K).contains(&self.top_k) {
            return Err(Error::InvalidRequest(format!("top_k must be in {MIN_TOP_K}..={MAX_TOP_K}, got {}", self.top_k)));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::InvalidRequest(format!("temperature must be in 0.0..=1.0, got {}", self.temperature)));
        }
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::parse::<LanguageCode>)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let tamil = "த".repeat(205);
        let cut = excerpt(&tamil, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt("short", 200), "short");
    }

    #[test]
    fn failure_result_serializes_like_the_api() {
        let r = PipelineResult::failure("sorry", "boom".into());
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["response"], "sorry");
        assert_eq!(v["detected_language"], "en");
        assert_eq!(v["error"], "boom");
        assert_eq!(v["retrieved_documents"], 0);
        assert!(v.get("english_query").is_none());
    }
}
