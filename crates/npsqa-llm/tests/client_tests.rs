use npsqa_core::config::TranslatorSettings;
use npsqa_core::traits::{Generator, Translator};
use npsqa_core::types::GenerationOptions;
use npsqa_llm::{translator_from_settings, ClientError, NllbHttpTranslator, OllamaClient, PassthroughTranslator};

// Port 9 (discard) is not served on test machines; connections are refused.
const UNREACHABLE: &str = "http://127.0.0.1:9";

#[test]
fn translator_short_circuits_without_network() {
    let t = NllbHttpTranslator::new(UNREACHABLE, 2, 512).expect("client");
    assert_eq!(t.translate("", "tam_Taml", "eng_Latn"), "");
    assert_eq!(t.translate("   ", "tam_Taml", "eng_Latn"), "");
    assert_eq!(t.translate("வணக்கம்", "tam_Taml", "tam_Taml"), "வணக்கம்");
}

#[test]
fn translator_failure_returns_input() {
    let t = NllbHttpTranslator::new(UNREACHABLE, 2, 512).expect("client");
    assert_eq!(t.translate_to_english("வணக்கம்", "tam_Taml"), "வணக்கம்");
    assert_eq!(t.translate_from_english("Hello", "hin_Deva"), "Hello");
}

#[test]
fn passthrough_translator_is_identity() {
    assert_eq!(PassthroughTranslator.translate("नमस्ते", "hin_Deva", "eng_Latn"), "नमस्ते");
}

#[test]
fn disabled_translator_setting_yields_passthrough() {
    let settings = TranslatorSettings { enabled: false, base_url: UNREACHABLE.into(), ..TranslatorSettings::default() };
    let t = translator_from_settings(&settings).expect("translator");
    assert_eq!(t.translate("hello", "eng_Latn", "tam_Taml"), "hello");
}

#[test]
fn unreachable_ollama_fails_generation_and_health() {
    let client = OllamaClient::new(UNREACHABLE, "llama3", 2).expect("client");
    assert!(!client.check_health());
    assert!(matches!(client.list_models(), Err(ClientError::Connection(_))));
    assert!(client.generate("prompt", &GenerationOptions::default()).is_err());
}
