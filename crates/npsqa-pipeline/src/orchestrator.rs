use std::time::Instant;

use anyhow::Result;
use tracing::{error, info, warn};

use npsqa_core::config::{PipelineSettings, ResponseMode};
use npsqa_core::traits::{Generator, Retriever, Translator};
use npsqa_core::types::{
    excerpt, ChatRequest, GenerationOptions, PipelineResult, SourceDocument, StageTimings, MAX_TOP_K, MIN_TOP_K,
};
use npsqa_core::LanguageCode;
use npsqa_lang::table::ENGLISH_SYSTEM_CODE;
use npsqa_lang::{LanguageResolver, TranslationTable};

use crate::context::build_context;
use crate::prompt::build_prompt;

pub const PIPELINE_APOLOGY: &str = "I apologize, but I encountered an error processing your question. Please try again.";
pub const GENERATION_APOLOGY: &str =
    "I apologize, but I encountered an error while processing your question. Please try again or rephrase your question.";
pub const NO_VALID_QUESTION: &str = "I didn't receive a valid question. Please try again.";

/// Number of retrieved documents echoed back as sources.
pub const MAX_SOURCES: usize = 3;

/// Answers one question: resolve language → translate → retrieve → generate
/// → (optionally) translate back.
pub struct RagPipeline {
    resolver: LanguageResolver,
    translator: Box<dyn Translator>,
    retriever: Box<dyn Retriever>,
    generator: Box<dyn Generator>,
    table: TranslationTable,
    settings: PipelineSettings,
}

impl RagPipeline {
    pub fn new(
        resolver: LanguageResolver,
        translator: Box<dyn Translator>,
        retriever: Box<dyn Retriever>,
        generator: Box<dyn Generator>,
        settings: PipelineSettings,
    ) -> Self {
        info!(mode = ?settings.response_mode, top_k = settings.top_k, "rag pipeline ready");
        Self { resolver, translator, retriever, generator, table: TranslationTable::new(), settings }
    }

    pub fn resolver(&self) -> &LanguageResolver {
        &self.resolver
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Validate a request, then run it.
    pub fn handle(&self, request: &ChatRequest) -> npsqa_core::error::Result<PipelineResult> {
        let forced = request.validate()?;
        Ok(self.process(&request.query, request.top_k, request.temperature, forced))
    }

    /// Run the pipeline. Never fails: unexpected errors come back as a
    /// result carrying `error` and the pipeline apology.
    pub fn process(&self, query: &str, top_k: usize, temperature: f32, forced: Option<LanguageCode>) -> PipelineResult {
        let top_k = self.clamp_top_k(top_k);
        let temperature = self.clamp_temperature(temperature);
        match self.run(query, top_k, temperature, forced) {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "error in rag pipeline");
                PipelineResult::failure(PIPELINE_APOLOGY, e.to_string())
            }
        }
    }

    fn clamp_top_k(&self, top_k: usize) -> usize {
        let clamped = top_k.clamp(MIN_TOP_K, MAX_TOP_K);
        if clamped != top_k {
            warn!(requested = top_k, using = clamped, "top_k out of range");
        }
        clamped
    }

    fn clamp_temperature(&self, temperature: f32) -> f32 {
        if temperature.is_nan() {
            warn!(using = self.settings.temperature, "temperature is NaN");
            return self.settings.temperature;
        }
        let clamped = temperature.clamp(0.0, 1.0);
        if (clamped - temperature).abs() > f32::EPSILON {
            warn!(requested = temperature, using = clamped, "temperature out of range");
        }
        clamped
    }

    fn run(&self, query: &str, top_k: usize, temperature: f32, forced: Option<LanguageCode>) -> Result<PipelineResult> {
        let start = Instant::now();
        let mut timing = StageTimings::default();

        let t = Instant::now();
        let language = self.resolver.resolve(query, forced, self.settings.auto_detect);
        timing.detection = t.elapsed().as_secs_f64();
        info!(%language, elapsed = timing.detection, "language resolved");

        let t = Instant::now();
        let english_query = if language.is_english() {
            query.to_string()
        } else {
            info!(%language, "translating query to english");
            self.translator.translate(query, self.table.system_code(language), ENGLISH_SYSTEM_CODE)
        };
        timing.translation_q = t.elapsed().as_secs_f64();
        info!(english_query = %english_query, "english query");

        let t = Instant::now();
        let retrieved = self.retriever.search(&english_query, top_k)?;
        timing.retrieval = t.elapsed().as_secs_f64();
        info!(requested = top_k, retrieved = retrieved.len(), elapsed = timing.retrieval, "retrieval done");

        let answer_language = match self.settings.response_mode {
            ResponseMode::Direct => language,
            ResponseMode::TranslateBack => LanguageCode::En,
        };
        let t = Instant::now();
        let generated = if english_query.trim().is_empty() {
            warn!("empty query provided for generation");
            NO_VALID_QUESTION.to_string()
        } else {
            let texts: Vec<&str> = retrieved.iter().map(|d| d.text.as_str()).collect();
            let context = build_context(&texts, self.settings.context_max_chars);
            let prompt = build_prompt(&english_query, &context, answer_language.name());
            let options = GenerationOptions { temperature, max_tokens: self.settings.max_tokens };
            match self.generator.generate(&prompt, &options) {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "failed to generate response");
                    GENERATION_APOLOGY.to_string()
                }
            }
        };
        timing.generation = t.elapsed().as_secs_f64();
        info!(response = %excerpt(&generated, 100), elapsed = timing.generation, "generation done");

        let t = Instant::now();
        let (final_response, english_response) = match self.settings.response_mode {
            ResponseMode::Direct => {
                let english = language.is_english().then(|| generated.clone());
                (generated, english)
            }
            ResponseMode::TranslateBack if language.is_english() => (generated.clone(), Some(generated)),
            ResponseMode::TranslateBack => {
                info!(%language, "translating response back");
                let translated = self.translator.translate(&generated, ENGLISH_SYSTEM_CODE, self.table.system_code(language));
                (translated, Some(generated))
            }
        };
        timing.translation_r = t.elapsed().as_secs_f64();
        timing.total = start.elapsed().as_secs_f64();
        info!(
            total = timing.total,
            detect = timing.detection,
            trans_q = timing.translation_q,
            search = timing.retrieval,
            llm = timing.generation,
            trans_r = timing.translation_r,
            "pipeline timing"
        );

        Ok(PipelineResult {
            final_response,
            detected_language: language,
            english_query: Some(english_query),
            english_response,
            retrieved_count: retrieved.len(),
            sources: retrieved.iter().take(MAX_SOURCES).map(SourceDocument::from_retrieved).collect(),
            error: None,
            timing: Some(timing),
        })
    }
}
