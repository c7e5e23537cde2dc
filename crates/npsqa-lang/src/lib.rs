//! npsqa-lang
//!
//! Language handling for incoming questions: Unicode script sniffing, a small
//! n-gram classifier for Latin text, the ISO ↔ NLLB code table, and the
//! resolver that combines them with a caller-forced language.
pub mod ngram;
pub mod resolver;
pub mod script;
pub mod table;

pub use ngram::NgramDetector;
pub use resolver::LanguageResolver;
pub use script::{detect_script, script_counts, ScriptCount};
pub use table::TranslationTable;
