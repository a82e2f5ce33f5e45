//! Configuration sources for the app.
//!
//! The browser has no process environment, so the `ARCHIVIST_*` keys are
//! captured at compile time. Native builds prefer the runtime environment and
//! fall back to the captured values.

use archivist_core::config::{keys, ServiceConfig};

/// Loads the service configuration once at startup.
pub fn load() -> ServiceConfig {
    #[cfg(target_arch = "wasm32")]
    {
        ServiceConfig::from_lookup(build_time_value)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        ServiceConfig::from_lookup(|key| std::env::var(key).ok().or_else(|| build_time_value(key)))
    }
}

/// Value of `key` as captured when the crate was compiled.
fn build_time_value(key: &str) -> Option<String> {
    let value = match key {
        keys::DATASTORE_PROJECT_ID => option_env!("ARCHIVIST_DATASTORE_PROJECT_ID"),
        keys::DATASTORE_API_KEY => option_env!("ARCHIVIST_DATASTORE_API_KEY"),
        keys::DATASTORE_DATABASE => option_env!("ARCHIVIST_DATASTORE_DATABASE"),
        keys::DATASTORE_BASE_URL => option_env!("ARCHIVIST_DATASTORE_BASE_URL"),
        keys::ASSISTANT_API_KEY => option_env!("ARCHIVIST_ASSISTANT_API_KEY"),
        keys::ASSISTANT_BASE_URL => option_env!("ARCHIVIST_ASSISTANT_BASE_URL"),
        keys::ASSISTANT_MODEL => option_env!("ARCHIVIST_ASSISTANT_MODEL"),
        keys::ASSISTANT_TEMPERATURE => option_env!("ARCHIVIST_ASSISTANT_TEMPERATURE"),
        keys::ASSISTANT_MAX_TOKENS => option_env!("ARCHIVIST_ASSISTANT_MAX_TOKENS"),
        _ => None,
    };
    value.map(str::to_string)
}
