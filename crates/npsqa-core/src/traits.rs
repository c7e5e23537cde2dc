use crate::types::{GenerationOptions, KnowledgeDocument, RetrievedDocument};

pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// General-purpose language classifier. Returns a raw ISO 639-1 code that
/// may fall outside the supported set.
pub trait StatisticalDetector: Send + Sync {
    fn detect(&self, text: &str) -> anyhow::Result<String>;
}

/// Text translation between two system translation codes (e.g. `tam_Taml`).
///
/// Infallible by contract: implementations return `text` unchanged when
/// they cannot translate it.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source: &str, target: &str) -> String;
}

/// Semantic nearest-neighbour search, closest first. A blank query yields
/// no documents.
pub trait Retriever: Send + Sync {
    fn search(&self, query: &str, k: usize) -> anyhow::Result<Vec<RetrievedDocument>>;
}

pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str, options: &GenerationOptions) -> anyhow::Result<String>;
}

/// Write side of the knowledge base.
pub trait DocumentStore: Send + Sync {
    fn add_documents(&self, docs: &[KnowledgeDocument]) -> anyhow::Result<usize>;
    fn count(&self) -> anyhow::Result<usize>;
    fn clear(&self) -> anyhow::Result<()>;
}
