//! npsqa-llm
//!
//! HTTP clients for the model servers the pipeline depends on: Ollama for
//! answer generation and an NLLB server for translation.
mod error;
pub mod ollama;
pub mod translator;

pub use error::ClientError;
pub use ollama::OllamaClient;
pub use translator::{NllbHttpTranslator, PassthroughTranslator};

use npsqa_core::config::TranslatorSettings;
use npsqa_core::traits::Translator;

/// The configured translator, or a passthrough one when translation is disabled.
pub fn translator_from_settings(settings: &TranslatorSettings) -> Result<Box<dyn Translator>, ClientError> {
    if settings.enabled {
        Ok(Box::new(NllbHttpTranslator::from_settings(settings)?))
    } else {
        tracing::info!("translation disabled, using passthrough translator");
        Ok(Box::new(PassthroughTranslator))
    }
}
