use npsqa_core::traits::StatisticalDetector;
use npsqa_core::LanguageCode;
use tracing::{debug, info, warn};

use crate::script::detect_script;

/// Decides which language a question is in.
///
/// Precedence: blank input → `en`; script evidence; the caller's forced
/// language; the statistical detector (when enabled); `en`. Script evidence
/// beats a forced language because UI defaults often force `en` on
/// non-Latin input.
pub struct LanguageResolver {
    detector: Box<dyn StatisticalDetector>,
    supported: Vec<LanguageCode>,
}

impl LanguageResolver {
    pub fn new(detector: Box<dyn StatisticalDetector>) -> Self {
        Self::with_supported(detector, LanguageCode::ALL.to_vec())
    }

    pub fn with_supported(detector: Box<dyn StatisticalDetector>, supported: Vec<LanguageCode>) -> Self {
        info!(languages = ?supported.iter().map(|l| l.code()).collect::<Vec<_>>(), "language resolver ready");
        Self { detector, supported }
    }

    pub fn supported(&self) -> &[LanguageCode] {
        &self.supported
    }

    pub fn resolve(&self, query: &str, forced: Option<LanguageCode>, auto_detect: bool) -> LanguageCode {
        if query.trim().is_empty() {
            debug!("blank query, defaulting to en");
            return LanguageCode::En;
        }
        if let Some(lang) = detect_script(query) {
            info!(%lang, forced = ?forced.map(LanguageCode::code), "script signal overrides forced language");
            return lang;
        }
        if let Some(lang) = forced {
            info!(%lang, "using forced language");
            return lang;
        }
        if auto_detect {
            return self.detect_statistical(query);
        }
        LanguageCode::En
    }

    /// Standalone detection: script sniffing, then the statistical detector.
    pub fn detect_language(&self, text: &str) -> LanguageCode {
        if text.trim().is_empty() {
            warn!("empty text for language detection, defaulting to en");
            return LanguageCode::En;
        }
        if let Some(lang) = detect_script(text) {
            info!(%lang, "detected language via script");
            return lang;
        }
        self.detect_statistical(text)
    }

    fn detect_statistical(&self, text: &str) -> LanguageCode {
        if text.trim().is_empty() {
            return LanguageCode::En;
        }
        match self.detector.detect(text) {
            Ok(code) => match code.parse::<LanguageCode>() {
                Ok(lang) if self.supported.contains(&lang) => {
                    debug!(%lang, "detected language via statistical detector");
                    lang
                }
                _ => {
                    warn!(detected = %code, "detected language not supported, defaulting to en");
                    LanguageCode::En
                }
            },
            Err(e) => {
                warn!(error = %e, "language detection failed, defaulting to en");
                LanguageCode::En
            }
        }
    }
}
