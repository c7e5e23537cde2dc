use npsqa_core::LanguageCode;
use std::collections::HashMap;

pub const ENGLISH_SYSTEM_CODE: &str = LanguageCode::En.nllb_code();

/// Bidirectional ISO 639-1 ↔ NLLB code lookup. Both directions fall back to
/// English, so lookups never fail.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    to_system: HashMap<&'static str, &'static str>,
    to_iso: HashMap<&'static str, LanguageCode>,
}

impl TranslationTable {
    pub fn new() -> Self {
        let mut to_system = HashMap::with_capacity(LanguageCode::ALL.len());
        let mut to_iso = HashMap::with_capacity(LanguageCode::ALL.len());
        for lang in LanguageCode::ALL {
            to_system.insert(lang.code(), lang.nllb_code());
            to_iso.insert(lang.nllb_code(), lang);
        }
        Self { to_system, to_iso }
    }

    pub fn system_code(&self, lang: LanguageCode) -> &'static str {
        self.system_code_for(lang.code())
    }

    /// Forward lookup by raw ISO code; unknown codes map to English.
    pub fn system_code_for(&self, iso: &str) -> &'static str {
        self.to_system.get(iso).copied().unwrap_or(ENGLISH_SYSTEM_CODE)
    }

    /// Reverse lookup; unknown system codes map to `en`.
    pub fn language_for(&self, system_code: &str) -> LanguageCode {
        self.to_iso.get(system_code).copied().unwrap_or(LanguageCode::En)
    }
}

impl Default for TranslationTable {
    fn default() -> Self { Self::new() }
}
