use anyhow::Context;
use preserve_core::MissPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-level config file name, looked up from the current directory upwards.
pub const PROJECT_FILE: &str = "preserve.toml";

/// Configuration for preserve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Regex for the substrings to protect
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// What to substitute when a placeholder has no capture
    #[serde(default)]
    pub on_miss: MissPolicy,

    #[serde(default)]
    pub transform: TransformConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Command (program followed by arguments) run by `preserve run`
    /// when none is given on the command line
    #[serde(default)]
    pub command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            on_miss: MissPolicy::default(),
            transform: TransformConfig::default(),
        }
    }
}

fn default_pattern() -> String {
    r"<%=\s*[^>]+%>".to_string()
}

impl Config {
    /// Resolve config: explicit path, then `preserve.toml` in the current or a
    /// parent directory, then the global config file, then defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let current = std::env::current_dir()?;
        if let Some(root) = Self::find_project_root_from(&current) {
            return Self::load_from(&root.join(PROJECT_FILE));
        }

        let global = Self::config_path();
        if global.exists() {
            return Self::load_from(&global);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write config as pretty TOML
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Get global config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "preserve", "preserve") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.preserve/config.toml")
        }
    }

    /// Find the directory holding `preserve.toml` by walking up from `start`
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_FILE).exists() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pattern, r"<%=\s*[^>]+%>");
        assert_eq!(config.on_miss, MissPolicy::Empty);
        assert!(config.transform.command.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            on_miss: MissPolicy::Marker("??".to_string()),
            transform: TransformConfig {
                command: vec!["prettier".to_string(), "--parser=html".to_string()],
            },
            ..Config::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str(r#"on_miss = "keep""#).unwrap();
        assert_eq!(parsed.on_miss, MissPolicy::Keep);
        assert_eq!(parsed.pattern, default_pattern());
    }

    #[test]
    fn test_config_parse() {
        let toml_str = r#"
pattern = '\{\{[^}]+\}\}'
on_miss = { marker = "<missing>" }

[transform]
command = ["tidy", "-q", "-i"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pattern, r"\{\{[^}]+\}\}");
        assert_eq!(config.on_miss, MissPolicy::Marker("<missing>".to_string()));
        assert_eq!(config.transform.command, vec!["tidy", "-q", "-i"]);
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PROJECT_FILE);

        let config = Config::default();
        config.save(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_find_project_root_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE), "").unwrap();

        assert_eq!(
            Config::find_project_root_from(&nested),
            Some(dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, r#"pattern = "\\d+""#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.pattern, r"\d+");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }
}
