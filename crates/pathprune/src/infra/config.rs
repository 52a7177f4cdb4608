//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::app::prune::MatchMode;
use crate::app::report::ReportFormat;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".pathprune/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub prune: Prune,
    #[serde(default)]
    pub display: Display,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prune {
    #[serde(default)]
    match_mode: Option<MatchMode>,
}

impl Prune {
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    #[serde(default)]
    format: Option<ReportFormat>,
    /// Prefix stripped from every entry before rendering.
    #[serde(default)]
    root: Option<String>,
}

impl Display {
    pub fn format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    match_mode: Option<String>,
    format: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            match_mode: env::var("PATHPRUNE_MATCH_MODE").ok(),
            format: env::var("PATHPRUNE_FORMAT").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(match_mode: &str, format: &str) -> Self {
        Self {
            match_mode: Some(match_mode.to_owned()),
            format: Some(format.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        apply_env_overrides(merged, env_overrides)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            prune: Prune {
                match_mode: other.prune.match_mode.or(self.prune.match_mode),
            },
            display: Display {
                format: other.display.format.or(self.display.format),
                root: other.display.root.or(self.display.root),
            },
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("pathprune/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Result<Config> {
    if let Some(mode) = env.match_mode {
        let mode = mode.parse::<MatchMode>().context("invalid PATHPRUNE_MATCH_MODE")?;
        config.prune.match_mode = Some(mode);
    }
    if let Some(format) = env.format {
        let format = format.parse::<ReportFormat>().context("invalid PATHPRUNE_FORMAT")?;
        config.display.format = Some(format);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.prune.match_mode(), MatchMode::Literal);
        assert_eq!(config.display.format(), ReportFormat::Plain);
        assert_eq!(config.display.root(), None);
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[prune]
match_mode = "segment"
[display]
root = "/srv/site"
"#,
        )?;

        let workspace_dir = temp.path().join("repo");
        fs::create_dir_all(workspace_dir.join(".pathprune"))?;
        fs::create_dir_all(workspace_dir.join(".git"))?;
        fs::write(
            workspace_dir.join(".pathprune/config.toml"),
            r#"
[display]
format = "json"
"#,
        )?;

        let global_path = Some(global);
        let workspace_path = Some(workspace_dir.join(".pathprune/config.toml"));

        let config =
            Config::load_with_layers(global_path, workspace_path, EnvOverrides::default())?;

        assert_eq!(config.prune.match_mode(), MatchMode::Segment);
        assert_eq!(config.display.format(), ReportFormat::Json);
        assert_eq!(config.display.root(), Some("/srv/site"));

        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("segment", "json");
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.prune.match_mode(), MatchMode::Segment);
        assert_eq!(config.display.format(), ReportFormat::Json);
        Ok(())
    }

    #[test]
    fn unknown_env_value_is_rejected() {
        let overrides = EnvOverrides::for_tests("fuzzy", "plain");
        let err = Config::load_with_layers(None, None, overrides).unwrap_err();
        assert!(err.to_string().contains("PATHPRUNE_MATCH_MODE"));
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn finds_repo_root_from_nested_directory() -> Result<()> {
        let temp = tempfile::tempdir()?;
        fs::create_dir_all(temp.path().join(".git"))?;
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested)?;
        assert_eq!(find_repo_root(&nested), Some(temp.path().to_path_buf()));
        Ok(())
    }
}
