//! Configuration verbs and the host-process-level defaults file.
//!
//! The reference surface this is modeled on threads a variadic verb id
//! plus `...` arguments through one function; that shape doesn't type
//! check in Rust and wouldn't be idiomatic if it did, so each verb
//! group is its own enum carrying exactly the payload it needs. A verb
//! a host can't construct is a verb the engine can never receive, which
//! is why there is no "unknown verb" error path left to wire up here —
//! it disappears at the type level instead of being checked at runtime.

pub use crate::mutex::ThreadLevel;

/// Per-engine configuration verbs, valid at any point in the engine's
/// life.
pub enum EngineVerb {
    /// Installs (or clears, with `None`) the compile-time error
    /// consumer.
    ErrOutput(Option<ErrorConsumer>),
    /// Fetches the accumulated, null-terminated error-log blob.
    ErrLog,
    /// Reserved: present in the verb table, has no effect.
    ErrAbort,
}

pub type ErrorConsumer = Box<dyn FnMut(&str) + Send>;

/// Library-wide verbs, valid only before one-time subsystem init runs.
/// Sending one of these after init returns `ErrorKind::Locked`.
pub enum LibraryVerb {
    /// Replaces the virtual filesystem backing host-facing I/O.
    Vfs(Box<dyn crate::vfs::Vfs>),
    /// Replaces the allocator used for every internal allocation.
    UserMalloc,
    /// Installs a notifier invoked on out-of-memory conditions.
    MemErrCallback(Box<dyn FnMut() + Send>),
    /// Replaces the mutex provider (implied by `ThreadLevel::Multi`
    /// using `parking_lot` already; kept as a named verb for parity
    /// with the rest of the table).
    UserMutex,
    ThreadLevelSingle,
    ThreadLevelMulti,
}

/// Host-process-level defaults, loaded from an optional project file.
/// The engine library itself never reads this from disk — only a CLI
/// or embedding host does, through whatever filesystem access it
/// already has.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(default)]
pub struct GlyphConfig {
    pub thread_level: ConfigThreadLevel,
    /// `tracing` env-filter-style default, e.g. `"warn"` or `"glyph=debug"`.
    pub log_filter: String,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self { thread_level: ConfigThreadLevel::Single, log_filter: "warn".to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigThreadLevel {
    Single,
    Multi,
}

impl From<ConfigThreadLevel> for ThreadLevel {
    fn from(level: ConfigThreadLevel) -> Self {
        match level {
            ConfigThreadLevel::Single => ThreadLevel::Single,
            ConfigThreadLevel::Multi => ThreadLevel::Multi,
        }
    }
}

impl GlyphConfig {
    /// Parses a config from TOML text already read by the caller.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_single_threaded_and_warn_level() {
        let cfg = GlyphConfig::default();
        assert_eq!(cfg.thread_level, ConfigThreadLevel::Single);
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = GlyphConfig { thread_level: ConfigThreadLevel::Multi, log_filter: "glyph=debug".to_string() };
        let text = cfg.to_toml_string().unwrap();
        let parsed = GlyphConfig::from_toml_str(&text).unwrap();
        assert_eq!(cfg, parsed);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed = GlyphConfig::from_toml_str("").unwrap();
        assert_eq!(parsed, GlyphConfig::default());
    }
}
