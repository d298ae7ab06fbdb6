//! TOML-based application configuration.
//!
//! Stores:
//! - Generator settings (model, API key variable, endpoint, timeout)
//! - Advice settings (locale, retrieval limit, fallback strategy, verdict policy)
//! - An optional knowledge file replacing the built-in profiles
//!
//! Configuration is stored at `~/.config/cyclewise/config.toml`.
//! The API key itself is never written to disk; only the name of the
//! environment variable holding it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, CoreError, Result};
use crate::fallback::{FallbackStrategy, DEFAULT_FALLBACK_CONFIDENCE};
use crate::generator::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::phase::{Locale, Verdict};
use crate::resolver::InvalidVerdictPolicy;
use crate::retrieval::DEFAULT_LIMIT;

/// Returns `~/.config/cyclewise[-dev]/` based on CYCLEWISE_ENV.
///
/// Set CYCLEWISE_ENV=dev to use the development directory.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CYCLEWISE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("cyclewise-dev")
    } else {
        base_dir.join("cyclewise")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Generation backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Advice pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceConfig {
    #[serde(default)]
    pub default_locale: Locale,
    #[serde(default = "default_retrieval_limit")]
    pub retrieval_limit: usize,
    #[serde(default)]
    pub fallback_strategy: FallbackStrategy,
    /// Keyword lists are checked in this order; first match wins
    #[serde(default = "default_verdict_priority")]
    pub verdict_priority: Vec<Verdict>,
    #[serde(default = "default_fallback_confidence")]
    pub fallback_confidence: f64,
    #[serde(default)]
    pub invalid_verdict: InvalidVerdictPolicy,
}

/// Knowledge base source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// TOML knowledge file; built-in profiles when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/cyclewise/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub advice: AdviceConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_model() -> String {
    DEFAULT_MODEL.into()
}
fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".into()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_temperature() -> f64 {
    0.2
}
fn default_max_output_tokens() -> u32 {
    1024
}
fn default_timeout_secs() -> u64 {
    8
}
fn default_retrieval_limit() -> usize {
    DEFAULT_LIMIT
}
fn default_verdict_priority() -> Vec<Verdict> {
    Verdict::ALL.to_vec()
}
fn default_fallback_confidence() -> f64 {
    DEFAULT_FALLBACK_CONFIDENCE
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            retrieval_limit: default_retrieval_limit(),
            fallback_strategy: FallbackStrategy::default(),
            verdict_priority: default_verdict_priority(),
            fallback_confidence: default_fallback_confidence(),
            invalid_verdict: InvalidVerdictPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// API key from the configured environment variable, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    serde_json::Value::Null if value.is_empty() => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| {
            CoreError::from(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. Does not persist; call [`Config::save`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Checks values that parse but can't be used.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.generator.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "generator.timeout_secs".into(),
                message: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }
}
