//! Service configuration.
//!
//! Configuration is a flat set of string keys read once at process start.
//! Values are taken as-is: nothing here checks that an API key is real or that
//! a URL is reachable. Numbers that fail to parse fall back to their defaults.
//!
//! # Usage
//!
//! ```
//! use archivist_core::config::{keys, ServiceConfig};
//!
//! let config = ServiceConfig::from_lookup(|key| match key {
//!     keys::DATASTORE_PROJECT_ID => Some("demo-project".to_string()),
//!     _ => None,
//! });
//! assert!(config.datastore.is_configured());
//! assert_eq!(config.assistant.model, "gpt-3.5-turbo");
//! ```

use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Configuration keys, shared by environment variables and build-time lookups.
pub mod keys {
    pub const DATASTORE_PROJECT_ID: &str = "ARCHIVIST_DATASTORE_PROJECT_ID";
    pub const DATASTORE_API_KEY: &str = "ARCHIVIST_DATASTORE_API_KEY";
    pub const DATASTORE_DATABASE: &str = "ARCHIVIST_DATASTORE_DATABASE";
    pub const DATASTORE_BASE_URL: &str = "ARCHIVIST_DATASTORE_BASE_URL";
    pub const ASSISTANT_API_KEY: &str = "ARCHIVIST_ASSISTANT_API_KEY";
    pub const ASSISTANT_BASE_URL: &str = "ARCHIVIST_ASSISTANT_BASE_URL";
    pub const ASSISTANT_MODEL: &str = "ARCHIVIST_ASSISTANT_MODEL";
    pub const ASSISTANT_TEMPERATURE: &str = "ARCHIVIST_ASSISTANT_TEMPERATURE";
    pub const ASSISTANT_MAX_TOKENS: &str = "ARCHIVIST_ASSISTANT_MAX_TOKENS";

    /// Every recognized key.
    pub const ALL: [&str; 9] = [
        DATASTORE_PROJECT_ID,
        DATASTORE_API_KEY,
        DATASTORE_DATABASE,
        DATASTORE_BASE_URL,
        ASSISTANT_API_KEY,
        ASSISTANT_BASE_URL,
        ASSISTANT_MODEL,
        ASSISTANT_TEMPERATURE,
        ASSISTANT_MAX_TOKENS,
    ];
}

// =============================================================================
// Defaults
// =============================================================================

/// Firestore REST endpoint.
pub const DEFAULT_DATASTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Name of the default Firestore database.
pub const DEFAULT_DATABASE: &str = "(default)";

pub const DEFAULT_ASSISTANT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ASSISTANT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// How often the shell re-checks datastore connectivity, in milliseconds.
pub const STATUS_POLL_INTERVAL_MS: u32 = 30_000;

/// Connection settings for the document datastore.
#[derive(Clone, PartialEq)]
pub struct DatastoreConfig {
    pub project_id: String,
    pub api_key: String,
    pub database: String,
    pub base_url: String,
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            base_url: DEFAULT_DATASTORE_BASE_URL.to_string(),
        }
    }
}

impl DatastoreConfig {
    /// A project id is the one thing a connection cannot do without.
    pub fn is_configured(&self) -> bool {
        !self.project_id.trim().is_empty()
    }
}

impl fmt::Debug for DatastoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatastoreConfig")
            .field("project_id", &self.project_id)
            .field("api_key", &redact(&self.api_key))
            .field("database", &self.database)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Settings for the text-generation assistant.
#[derive(Clone, PartialEq)]
pub struct AssistantConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_ASSISTANT_BASE_URL.to_string(),
            model: DEFAULT_ASSISTANT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceConfig {
    pub datastore: DatastoreConfig,
    pub assistant: AssistantConfig,
}

impl ServiceConfig {
    /// Builds a configuration from an arbitrary key source.
    ///
    /// Missing keys take their defaults. Blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let datastore_defaults = DatastoreConfig::default();
        let assistant_defaults = AssistantConfig::default();

        Self {
            datastore: DatastoreConfig {
                project_id: get(keys::DATASTORE_PROJECT_ID).unwrap_or_default(),
                api_key: get(keys::DATASTORE_API_KEY).unwrap_or_default(),
                database: get(keys::DATASTORE_DATABASE).unwrap_or(datastore_defaults.database),
                base_url: get(keys::DATASTORE_BASE_URL).unwrap_or(datastore_defaults.base_url),
            },
            assistant: AssistantConfig {
                api_key: get(keys::ASSISTANT_API_KEY).unwrap_or_default(),
                base_url: get(keys::ASSISTANT_BASE_URL).unwrap_or(assistant_defaults.base_url),
                model: get(keys::ASSISTANT_MODEL).unwrap_or(assistant_defaults.model),
                temperature: parse_or(
                    keys::ASSISTANT_TEMPERATURE,
                    get(keys::ASSISTANT_TEMPERATURE),
                    DEFAULT_TEMPERATURE,
                ),
                max_tokens: parse_or(
                    keys::ASSISTANT_MAX_TOKENS,
                    get(keys::ASSISTANT_MAX_TOKENS),
                    DEFAULT_MAX_TOKENS,
                ),
            },
        }
    }

    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unparsable number, using default");
            default
        }),
        None => default,
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ServiceConfig::from_lookup(|_| None);
        assert_eq!(config, ServiceConfig::default());
        assert!(!config.datastore.is_configured());
        assert_eq!(config.datastore.database, "(default)");
        assert_eq!(config.assistant.base_url, "https://api.openai.com/v1");
        assert_eq!(config.assistant.max_tokens, 2000);
        assert!((config.assistant.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_values_are_read() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (keys::DATASTORE_PROJECT_ID, "archivist-dev"),
            (keys::DATASTORE_API_KEY, "abc123"),
            (keys::ASSISTANT_MODEL, "gpt-4o-mini"),
            (keys::ASSISTANT_TEMPERATURE, "0.2"),
            (keys::ASSISTANT_MAX_TOKENS, "512"),
        ]));
        assert!(config.datastore.is_configured());
        assert_eq!(config.datastore.project_id, "archivist-dev");
        assert_eq!(config.datastore.api_key, "abc123");
        assert_eq!(config.assistant.model, "gpt-4o-mini");
        assert_eq!(config.assistant.max_tokens, 512);
        assert!((config.assistant.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (keys::ASSISTANT_TEMPERATURE, "warm"),
            (keys::ASSISTANT_MAX_TOKENS, "-1"),
        ]));
        assert_eq!(config.assistant.max_tokens, DEFAULT_MAX_TOKENS);
        assert!((config.assistant.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (keys::DATASTORE_PROJECT_ID, "   "),
            (keys::DATASTORE_BASE_URL, ""),
        ]));
        assert!(!config.datastore.is_configured());
        assert_eq!(config.datastore.base_url, DEFAULT_DATASTORE_BASE_URL);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (keys::DATASTORE_API_KEY, "super-secret"),
            (keys::ASSISTANT_API_KEY, "sk-live"),
        ]));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("sk-live"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_all_keys_share_prefix() {
        assert!(keys::ALL.iter().all(|k| k.starts_with("ARCHIVIST_")));
    }
}
