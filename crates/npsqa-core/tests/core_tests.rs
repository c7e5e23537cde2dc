use std::collections::HashSet;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

use npsqa_core::config::{Config, ResponseMode};
use npsqa_core::knowledge_base::{KnowledgeBase, BUILTIN_SOURCE};
use npsqa_core::types::ChatRequest;
use npsqa_core::LanguageCode;

#[test]
fn builtin_corpus_has_unique_ids() {
    let docs = KnowledgeBase::new().builtin();
    assert_eq!(docs.len(), 20);
    let ids: HashSet<_> = docs.iter().map(|d| d.id.clone()).collect();
    assert_eq!(ids.len(), docs.len(), "ids are unique");
    assert_eq!(docs[0].id, "nps_doc_0");
    assert!(docs[0].content.contains("National Pension System"));
    assert!(docs.iter().all(|d| d.source == BUILTIN_SOURCE));
}

#[test]
fn load_directory_splits_paragraphs() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let mut f = fs::File::create(dir.join("faq.txt")).unwrap();
    write!(f, "What is Tier II?\nA voluntary account.\n\n\nHow to exit?\n").unwrap();
    fs::write(dir.join("ignored.md"), "not loaded").unwrap();

    let docs = KnowledgeBase::new().load_directory(dir).expect("load");

    assert_eq!(docs.len(), 2, "two paragraphs, markdown skipped");
    assert_eq!(docs[0].id, "faq:0");
    assert_eq!(docs[1].id, "faq:1");
    assert_eq!(docs[1].content, "How to exit?");
    assert_eq!(docs[0].source, "faq.txt");
}

#[test]
fn load_directory_empty_is_ok() {
    let tmp = TempDir::new().unwrap();
    let docs = KnowledgeBase::new().load_directory(tmp.path()).expect("load");
    assert!(docs.is_empty());
}

#[test]
fn settings_defaults_apply_without_files() {
    let config = Config::from_toml_str("", "test").expect("config");
    let s = config.settings().expect("settings");
    assert_eq!(s.pipeline.top_k, 5);
    assert_eq!(s.pipeline.context_max_chars, 2000);
    assert_eq!(s.pipeline.max_tokens, 1024);
    assert_eq!(s.pipeline.response_mode, ResponseMode::Direct);
    assert_eq!(s.languages.supported.len(), 10);
    assert_eq!(s.ollama.model, "llama3");
}

#[test]
fn settings_override_from_toml() {
    let toml = r#"
        [pipeline]
        top_k = 3
        response_mode = "translate_back"

        [languages]
        supported = ["en", "ta"]
    "#;
    let config = Config::from_toml_str(toml, "test").expect("config");
    let s = config.settings().expect("settings");
    assert_eq!(s.pipeline.top_k, 3);
    assert_eq!(s.pipeline.response_mode, ResponseMode::TranslateBack);
    assert_eq!(s.languages.supported, vec![LanguageCode::En, LanguageCode::Ta]);
    let k: usize = config.get("pipeline.top_k").expect("dotted key");
    assert_eq!(k, 3);
}

#[test]
fn invalid_settings_are_rejected() {
    assert!(Config::from_toml_str("[pipeline]\ntop_k = 11\n", "test").is_err());
    assert!(Config::from_toml_str("[pipeline]\ntemperature = 1.5\n", "test").is_err());
    assert!(Config::from_toml_str("[embedding]\nuse_fake = true\n", "prod").is_err());
    assert!(Config::from_toml_str("[embedding]\nuse_fake = true\n", "dev").is_ok());
}

#[test]
fn chat_request_validation() {
    let mut req = ChatRequest::new("What is NPS?");
    assert_eq!(req.validate().expect("valid"), None);

    req.language = Some("ta".into());
    assert_eq!(req.validate().expect("valid"), Some(LanguageCode::Ta));

    req.language = Some("xx".into());
    assert!(req.validate().is_err());

    let blank = ChatRequest::new("   ");
    assert!(blank.validate().is_err());

    let mut wide = ChatRequest::new("q");
    wide.top_k = 0;
    assert!(wide.validate().is_err());
}

#[test]
fn blank_language_in_request_means_not_forced() {
    let mut req = ChatRequest::new("What is NPS?");
    req.language = Some(String::new());
    assert_eq!(req.validate().expect("empty language is ignored"), None);

    req.language = Some("  ".into());
    assert_eq!(req.validate().expect("blank language is ignored"), None);

    req.language = Some(" TA ".into());
    assert_eq!(req.validate().expect("valid"), Some(LanguageCode::Ta));
}
