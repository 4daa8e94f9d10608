//! Project configuration file handling.
//!
//! [`glyph_runtime::GlyphConfig`] only knows how to parse and serialize
//! TOML text; finding that text on disk is the CLI's job, the same way
//! it's kept out of the engine library itself.

use std::path::{Path, PathBuf};

use dirs::{config_dir, home_dir};
use glyph_runtime::GlyphConfig;

use crate::error::{CliError, Result};

pub const CONFIG_FILE_NAME: &str = "glyph.toml";

/// Loads config from the default search order, falling back to
/// defaults if nothing is found.
pub fn load() -> Result<GlyphConfig> {
    match find_config_file() {
        Some(path) => load_from_path(&path),
        None => Ok(GlyphConfig::default()),
    }
}

pub fn load_from_path(path: &Path) -> Result<GlyphConfig> {
    if !path.exists() {
        return Err(CliError::Config(format!("configuration file not found: {}", path.display())));
    }
    let content = std::fs::read_to_string(path)?;
    GlyphConfig::from_toml_str(&content).map_err(|e| CliError::Config(format!("failed to parse configuration: {e}")))
}

pub fn save_to_path(config: &GlyphConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = config.to_toml_string().map_err(|e| CliError::Config(format!("failed to serialize configuration: {e}")))?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Current directory, then `~/.config/glyph/`, then the platform
/// config directory, in that order.
fn find_config_file() -> Option<PathBuf> {
    check_current_dir().or_else(check_home_dir).or_else(check_system_dir)
}

fn check_current_dir() -> Option<PathBuf> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    path.exists().then_some(path)
}

fn check_home_dir() -> Option<PathBuf> {
    home_dir().map(|dir| dir.join(".config").join("glyph").join(CONFIG_FILE_NAME)).filter(|path| path.exists())
}

fn check_system_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("glyph").join(CONFIG_FILE_NAME)).filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let cfg = GlyphConfig { log_filter: "glyph=debug".to_string(), ..GlyphConfig::default() };
        save_to_path(&cfg, &path).unwrap();
        let loaded = load_from_path(&path).unwrap();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn loading_a_missing_path_errors() {
        let result = load_from_path(Path::new("/nonexistent/glyph.toml"));
        assert!(result.is_err());
    }
}
