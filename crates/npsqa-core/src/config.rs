//! Layered configuration and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_OLLAMA__MODEL=llama3.1`). Typed
//! settings are extracted with defaults for every field, so an empty
//! configuration is valid for local development.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::language::LanguageCode;
use crate::types::{MAX_TOP_K, MIN_TOP_K};

pub struct Config {
    figment: Figment,
    env_name: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, env_name };
        config.validate_for_env()?;
        Ok(config)
    }

    /// Build from an inline TOML document layered over the defaults.
    pub fn from_toml_str(toml: &str, env_name: &str) -> anyhow::Result<Self> {
        let figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::string(toml));
        let config = Self { figment, env_name: env_name.to_string() };
        config.validate_for_env()?;
        Ok(config)
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))
    }

    fn validate_for_env(&self) -> anyhow::Result<()> {
        let settings = self.settings()?;
        settings.validate()?;
        match self.env_name.as_str() {
            "prod" | "production" if settings.embedding.use_fake => {
                Err(Error::InvalidConfig("fake embeddings are not allowed in production".into()).into())
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ollama: OllamaSettings,
    pub translator: TranslatorSettings,
    pub vector: VectorSettings,
    pub embedding: EmbeddingSettings,
    pub languages: LanguageSettings,
    pub pipeline: PipelineSettings,
    pub knowledge_base: KnowledgeBaseSettings,
    pub log: LogSettings,
}

impl Settings {
    pub fn validate(&self) -> crate::error::Result<()> {
        let p = &self.pipeline;
        if !(MIN_TOP_K..=MAX_TOP_K).contains(&p.top_k) {
            return Err(Error::InvalidConfig(format!("pipeline.top_k must be in {MIN_TOP_K}..={MAX_TOP_K}, got {}", p.top_k)));
        }
        if !(0.0..=1.0).contains(&p.temperature) {
            return Err(Error::InvalidConfig(format!("pipeline.temperature must be in 0.0..=1.0, got {}", p.temperature)));
        }
        if p.context_max_chars == 0 {
            return Err(Error::InvalidConfig("pipeline.context_max_chars must be positive".into()));
        }
        if p.max_tokens == 0 {
            return Err(Error::InvalidConfig("pipeline.max_tokens must be positive".into()));
        }
        if self.languages.supported.is_empty() {
            return Err(Error::InvalidConfig("languages.supported must list at least one language".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self { base_url: "http://127.0.0.1:11434".into(), model: "llama3".into(), timeout_secs: 300 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorSettings {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_length: usize,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self { enabled: true, base_url: "http://127.0.0.1:6060".into(), timeout_secs: 120, max_length: 512 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorSettings {
    pub db_dir: String,
    pub table: String,
}

impl Default for VectorSettings {
    fn default() -> Self {
        Self { db_dir: "./data/lancedb".into(), table: "nps_documents".into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub model_dir: String,
    pub use_fake: bool,
    pub max_len: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self { model_dir: "./models/bge-m3".into(), use_fake: false, max_len: 256 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    pub supported: Vec<LanguageCode>,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self { supported: LanguageCode::ALL.to_vec() }
    }
}

/// How the answer reaches the user's language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// The generator is told to answer in the target language.
    #[default]
    Direct,
    /// The generator answers in English and the translator converts the answer.
    TranslateBack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub top_k: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    pub context_max_chars: usize,
    pub auto_detect: bool,
    pub response_mode: ResponseMode,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            top_k: 5,
            temperature: 0.7,
            max_tokens: 1024,
            context_max_chars: 2000,
            auto_detect: true,
            response_mode: ResponseMode::Direct,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseSettings {
    pub txt_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
