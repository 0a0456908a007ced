use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::Config;

pub fn config_dir() -> PathBuf {
    // Prefer ~/.config/draftwright on Unix-like systems for better compatibility
    // with dotfiles management tools
    if let Some(home) = dirs::home_dir() {
        let xdg_config = home.join(".config").join("draftwright");
        if xdg_config.exists() || cfg!(unix) {
            return xdg_config;
        }
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("draftwright")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

/// Reads `path`, writing defaults there first if it does not exist.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        save_config_to(path, &config)?;
        return Ok(config);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {:?}", path))?;

    Ok(config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let content = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;

    fs::write(path, content).with_context(|| format!("Failed to write config: {:?}", path))?;

    Ok(())
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return home;
    }
    PathBuf::from(path)
}

pub fn resolve_data_dir(data_dir: Option<&str>) -> PathBuf {
    match data_dir {
        Some(dir) => expand_tilde(dir),
        None => config_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.templates.file_name, "{{date}}-{{slug}}");
        assert!(!config.refine.allow_empty_output);
        assert_eq!(config.refine.timeout_secs, Some(300));
    }

    #[test]
    fn test_config_path_xdg() {
        let path = config_path();
        if cfg!(unix) {
            assert!(path.to_string_lossy().contains(".config/draftwright"));
        }
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.templates.extension, "md");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[refine]\nallow_empty_output = true\ntimeout_secs = 0\n\n[templates]\nfile_name = \"{{slug}}\"\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert!(config.refine.allow_empty_output);
        assert!(config.refine.timeout().is_none());
        assert_eq!(config.templates.file_name, "{{slug}}");
        assert_eq!(config.templates.save_dir, "articles/{{year}}/{{month}}");
        assert_eq!(config.general.file_watch_debounce_ms, 300);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nbroken").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Documents/drafts");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Documents/drafts"));
        }
    }

    #[test]
    fn test_expand_tilde_no_prefix() {
        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_resolve_data_dir_custom() {
        let resolved = resolve_data_dir(Some("/tmp/draftwright-test"));
        assert_eq!(resolved, PathBuf::from("/tmp/draftwright-test"));
    }

    #[test]
    fn test_resolve_data_dir_none_falls_back() {
        let resolved = resolve_data_dir(None);
        assert_eq!(resolved, config_dir());
    }
}
