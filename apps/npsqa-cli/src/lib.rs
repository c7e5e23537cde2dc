//! Wiring shared by the `npsqa` and `npsqa-ingest` binaries.
use anyhow::Result;
use tracing_subscriber::EnvFilter;

use npsqa_core::config::{expand_path, Settings};
use npsqa_core::knowledge_base::KnowledgeBase;
use npsqa_core::traits::DocumentStore;
use npsqa_core::types::KnowledgeDocument;
use npsqa_lang::{LanguageResolver, NgramDetector};
use npsqa_llm::{translator_from_settings, OllamaClient};
use npsqa_pipeline::RagPipeline;
use npsqa_vector::LanceVectorStore;

/// Log to stderr; `RUST_LOG` wins over `log.level`.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

pub fn build_resolver(settings: &Settings) -> LanguageResolver {
    LanguageResolver::with_supported(Box::new(NgramDetector::new()), settings.languages.supported.clone())
}

pub fn build_pipeline(settings: &Settings) -> Result<RagPipeline> {
    let translator = translator_from_settings(&settings.translator)?;
    let retriever = npsqa_vector::open_from_settings(settings)?;
    let generator = OllamaClient::from_settings(&settings.ollama)?;
    Ok(RagPipeline::new(
        build_resolver(settings),
        translator,
        Box::new(retriever),
        Box::new(generator),
        settings.pipeline.clone(),
    ))
}

/// Built-in corpus (unless skipped) followed by every `.txt` passage under `dir`.
pub fn collect_documents(dir: Option<&std::path::Path>, skip_builtin: bool) -> Result<Vec<KnowledgeDocument>> {
    let kb = KnowledgeBase::new();
    let mut docs = if skip_builtin { Vec::new() } else { kb.builtin() };
    if let Some(dir) = dir {
        docs.extend(kb.load_directory(&expand_path(dir.to_string_lossy()))?);
    }
    Ok(docs)
}

/// Optionally clear, then add `docs`. Returns the row count afterwards.
pub fn ingest(store: &LanceVectorStore, docs: &[KnowledgeDocument], reset: bool) -> Result<usize> {
    if reset {
        store.clear()?;
    }
    store.add_documents(docs)?;
    store.count()
}
