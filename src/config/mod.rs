mod types;

pub use types::*;

use crate::error::{BookclubError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the generation model
pub const ENV_MODEL: &str = "OLLAMA_MODEL";
/// Environment variable overriding the generation endpoint
pub const ENV_URL: &str = "OLLAMA_URL";
/// Environment variable overriding the terminal theme
pub const ENV_THEME: &str = "BOOKCLUB_THEME";

/// Get the XDG-compliant config directory
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "bookclub")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BookclubError::Config("Could not determine config directory".to_string()))
}

/// Get the config file path
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load the effective config: file (if any), then environment overrides.
///
/// An explicit path must exist. The default XDG path is optional and falls
/// back to built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => load_config_from(path)?,
        None => {
            let path = config_path()?;
            if path.exists() {
                load_config_from(&path)?
            } else {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Config::default()
            }
        }
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok())?;

    config
        .validate()
        .map_err(|errors| BookclubError::ConfigInvalid(errors.join("; ")))?;

    Ok(config)
}

/// Load config from a specific path
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(BookclubError::ConfigNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Save config to a specific path
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Apply the model, endpoint and theme overrides from `lookup`
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(model) = non_empty(ENV_MODEL) {
        tracing::debug!("{} overrides model: {}", ENV_MODEL, model);
        config.generation.model = model.trim().to_string();
    }
    if let Some(url) = non_empty(ENV_URL) {
        tracing::debug!("{} overrides generation url: {}", ENV_URL, url);
        config.generation.url = url.trim().to_string();
    }
    if let Some(theme) = non_empty(ENV_THEME) {
        config.ui.theme = theme
            .parse()
            .map_err(|e: String| BookclubError::ConfigInvalid(format!("{}: {}", ENV_THEME, e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.generation.model, "phi3:mini");
        assert_eq!(config.generation.url, "http://localhost:11434/api/generate");
        assert_eq!(config.ui.theme, Theme::Soft);
        assert_eq!(config.catalog.default_limit, MAX_SEARCH_LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let vars = env(&[
            (ENV_MODEL, "tinyllama"),
            (ENV_URL, "http://gpu-box:11434/api/generate"),
            (ENV_THEME, "mono"),
        ]);
        apply_overrides(&mut config, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.generation.model, "tinyllama");
        assert_eq!(config.generation.url, "http://gpu-box:11434/api/generate");
        assert_eq!(config.ui.theme, Theme::Mono);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = Config::default();
        let vars = env(&[(ENV_MODEL, "  ")]);
        apply_overrides(&mut config, |k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.generation.model, "phi3:mini");
    }

    #[test]
    fn test_invalid_theme_is_rejected() {
        let mut config = Config::default();
        let vars = env(&[(ENV_THEME, "neon")]);
        let result = apply_overrides(&mut config, |k| vars.get(k).cloned());
        assert!(matches!(result, Err(BookclubError::ConfigInvalid(_))));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[generation]\nmodel = \"llama3\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.generation.model, "llama3");
        assert_eq!(config.generation.analysis_timeout_seconds, 120);
        assert_eq!(config.catalog.base_url, "https://openlibrary.org");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ui.theme = Theme::Default;
        config.catalog.default_limit = 5;
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.ui.theme, Theme::Default);
        assert_eq!(loaded.catalog.default_limit, 5);
    }

    #[test]
    fn test_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(BookclubError::ConfigNotFound(_))));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.generation.url = "ftp://localhost/generate".to_string();
        config.catalog.default_limit = 50;
        config.generation.analysis_timeout_seconds = 0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("generation.url")));
        assert!(errors.iter().any(|e| e.contains("default_limit")));
        assert!(errors.iter().any(|e| e.contains("analysis_timeout_seconds")));
    }
}
