use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use npsqa_core::config::TranslatorSettings;
use npsqa_core::traits::Translator;
use npsqa_core::types::excerpt;
use npsqa_core::LanguageCode;

use crate::error::{check_status, http_client, ClientError};

/// Client for an NLLB translation server.
///
/// Any failure leaves the text untranslated.
pub struct NllbHttpTranslator {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
    max_length: usize,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
    max_length: usize,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation: String,
}

impl NllbHttpTranslator {
    pub fn new(base_url: &str, timeout_secs: u64, max_length: usize) -> Result<Self, ClientError> {
        let client = http_client(timeout_secs)?;
        info!(base_url, "translator client ready");
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), client, timeout_secs, max_length })
    }

    pub fn from_settings(settings: &TranslatorSettings) -> Result<Self, ClientError> {
        Self::new(&settings.base_url, settings.timeout_secs, settings.max_length)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, text: &str, source: &str, target: &str) -> Result<String, ClientError> {
        let url = format!("{}/translate", self.base_url);
        let body = TranslateRequest { text, source_lang: source, target_lang: target, max_length: self.max_length };
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| ClientError::from_send(e, &self.base_url, self.timeout_secs))?;
        let parsed: TranslateResponse =
            check_status(response)?.json().map_err(|e| ClientError::ResponseParsing(e.to_string()))?;
        Ok(parsed.translation)
    }

    pub fn translate_to_english(&self, text: &str, source: &str) -> String {
        self.translate(text, source, LanguageCode::En.nllb_code())
    }

    pub fn translate_from_english(&self, text: &str, target: &str) -> String {
        self.translate(text, LanguageCode::En.nllb_code(), target)
    }
}

impl Translator for NllbHttpTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> String {
        if text.trim().is_empty() {
            warn!("empty text provided for translation");
            return String::new();
        }
        if source == target {
            info!(lang = source, "source and target are the same, skipping translation");
            return text.to_string();
        }
        info!(source, target, "translating");
        match self.request(text, source, target) {
            Ok(translated) => {
                info!(from = %excerpt(text, 50), to = %excerpt(&translated, 50), "translation successful");
                translated
            }
            Err(e) => {
                error!(error = %e, source, target, "translation failed, returning input");
                text.to_string()
            }
        }
    }
}

/// Returns every text unchanged. Used when no translation server is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, text: &str, _source: &str, _target: &str) -> String {
        text.to_string()
    }
}
