#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod knowledge_base;
pub mod language;
pub mod traits;
pub mod types;

pub use language::LanguageCode;
