use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use npsqa_core::traits::StatisticalDetector;
use npsqa_core::LanguageCode;
use npsqa_lang::{detect_script, LanguageResolver, NgramDetector, TranslationTable};

/// Detector that returns a fixed answer and counts how often it was asked.
struct FixedDetector {
    answer: Option<&'static str>,
    calls: Arc<AtomicUsize>,
}

impl FixedDetector {
    fn boxed(answer: Option<&'static str>) -> (Box<dyn StatisticalDetector>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (Box::new(Self { answer, calls: calls.clone() }), calls)
    }
}

impl StatisticalDetector for FixedDetector {
    fn detect(&self, _text: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.map(str::to_string).ok_or_else(|| anyhow::anyhow!("detector unavailable"))
    }
}

#[test]
fn single_script_inputs_map_to_their_language() {
    let cases = [
        ("நீங்கள்", LanguageCode::Ta),
        ("एनपीएस क्या है", LanguageCode::Hi),
        ("ఎన్పిఎస్ అంటే ఏమిటి", LanguageCode::Te),
        ("എൻപിഎസ് എന്താണ്", LanguageCode::Ml),
        ("এনপিএস কী", LanguageCode::Bn),
        ("એનપીએસ શું છે", LanguageCode::Gu),
        ("ಎನ್‌ಪಿಎಸ್ ಎಂದರೇನು", LanguageCode::Kn),
        ("ਐਨਪੀਐਸ ਕੀ ਹੈ", LanguageCode::Pa),
    ];
    for (text, expected) in cases {
        assert_eq!(detect_script(text), Some(expected), "input {text}");
    }
}

#[test]
fn latin_and_blank_text_have_no_script_signal() {
    assert_eq!(detect_script("What is NPS?"), None);
    assert_eq!(detect_script(""), None);
    assert_eq!(detect_script("   \n\t"), None);
}

#[test]
fn mixed_text_picks_dominant_script() {
    // English acronym inside a Tamil sentence
    assert_eq!(detect_script("NPS கணக்கு திறப்பது எப்படி?"), Some(LanguageCode::Ta));
}

#[test]
fn blank_query_resolves_to_english_regardless_of_inputs() {
    let (detector, calls) = FixedDetector::boxed(Some("ta"));
    let resolver = LanguageResolver::new(detector);
    for blank in ["", " ", "\n\t  "] {
        assert_eq!(resolver.resolve(blank, Some(LanguageCode::Ta), true), LanguageCode::En);
        assert_eq!(resolver.resolve(blank, None, true), LanguageCode::En);
        assert_eq!(resolver.resolve(blank, None, false), LanguageCode::En);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0, "detector never sees blank input");
}

#[test]
fn script_signal_beats_forced_language() {
    let (detector, calls) = FixedDetector::boxed(Some("en"));
    let resolver = LanguageResolver::new(detector);
    assert_eq!(resolver.resolve("एनपीएस क्या है?", Some(LanguageCode::Ta), true), LanguageCode::Hi);
    assert_eq!(resolver.resolve("एनपीएस क्या है?", Some(LanguageCode::En), false), LanguageCode::Hi);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn forced_language_applies_without_script_signal() {
    let (detector, calls) = FixedDetector::boxed(Some("en"));
    let resolver = LanguageResolver::new(detector);
    assert_eq!(resolver.resolve("What is NPS?", Some(LanguageCode::Ta), true), LanguageCode::Ta);
    assert_eq!(calls.load(Ordering::SeqCst), 0, "forced language short-circuits detection");
}

#[test]
fn failing_detector_defaults_to_english() {
    let (detector, calls) = FixedDetector::boxed(None);
    let resolver = LanguageResolver::new(detector);
    assert_eq!(resolver.resolve("What is NPS?", None, true), LanguageCode::En);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unsupported_detection_defaults_to_english() {
    let (detector, _) = FixedDetector::boxed(Some("fr"));
    let resolver = LanguageResolver::new(detector);
    assert_eq!(resolver.resolve("Bonjour", None, true), LanguageCode::En);
}

#[test]
fn supported_detection_is_returned() {
    let (detector, _) = FixedDetector::boxed(Some("mr"));
    let resolver = LanguageResolver::new(detector);
    assert_eq!(resolver.resolve("kasa ahat", None, true), LanguageCode::Mr);
}

#[test]
fn detection_outside_configured_languages_defaults_to_english() {
    let (detector, _) = FixedDetector::boxed(Some("mr"));
    let resolver = LanguageResolver::with_supported(detector, vec![LanguageCode::En, LanguageCode::Ta]);
    assert_eq!(resolver.resolve("kasa ahat", None, true), LanguageCode::En);
}

#[test]
fn auto_detect_disabled_skips_detector() {
    let (detector, calls) = FixedDetector::boxed(Some("mr"));
    let resolver = LanguageResolver::new(detector);
    assert_eq!(resolver.resolve("kasa ahat", None, false), LanguageCode::En);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn detect_language_runs_the_full_fallback() {
    let resolver = LanguageResolver::new(Box::new(NgramDetector::new()));
    assert_eq!(resolver.detect_language(""), LanguageCode::En);
    assert_eq!(resolver.detect_language("ਪੈਨਸ਼ਨ"), LanguageCode::Pa);
    assert_eq!(resolver.detect_language("What is the tax benefit of NPS?"), LanguageCode::En);
    assert_eq!(resolver.detect_language("merci beaucoup pour votre aide"), LanguageCode::En);
    assert_eq!(resolver.detect_language("12345 ???"), LanguageCode::En);
}

#[test]
fn ngram_detector_labels_latin_languages() {
    let detector = NgramDetector::new();
    assert_eq!(detector.detect("what is the national pension system").unwrap(), "en");
    assert_eq!(detector.detect("merci beaucoup pour votre aide").unwrap(), "fr");
    assert_eq!(detector.detect("vielen dank für ihre hilfe").unwrap(), "de");
    assert!(detector.detect("12345 ???").is_err());
}

#[test]
fn translation_table_round_trips_and_defaults() {
    let table = TranslationTable::new();
    assert_eq!(table.system_code(LanguageCode::Ta), "tam_Taml");
    assert_eq!(table.system_code(LanguageCode::Mr), "mar_Deva");
    assert_eq!(table.system_code_for("xx"), "eng_Latn");
    assert_eq!(table.language_for("pan_Guru"), LanguageCode::Pa);
    assert_eq!(table.language_for("fra_Latn"), LanguageCode::En);
    for lang in LanguageCode::ALL {
        assert_eq!(table.language_for(table.system_code(lang)), lang);
    }
}

#[test]
fn english_system_code_comes_from_language_metadata() {
    assert_eq!(npsqa_lang::table::ENGLISH_SYSTEM_CODE, LanguageCode::En.nllb_code());
    assert_eq!(TranslationTable::new().system_code(LanguageCode::En), npsqa_lang::table::ENGLISH_SYSTEM_CODE);
}
