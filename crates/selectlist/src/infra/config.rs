//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".selectlist/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: Render,
    #[serde(default)]
    pub input: Input,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Render {
    #[serde(default = "Render::default_format")]
    pub format: String,
    #[serde(default = "Render::default_selected_marker")]
    pub selected_marker: String,
    #[serde(default = "Render::default_unselected_marker")]
    pub unselected_marker: String,
}

impl Render {
    fn default_format() -> String {
        "plain".into()
    }

    fn default_selected_marker() -> String {
        "[x]".into()
    }

    fn default_unselected_marker() -> String {
        "[ ]".into()
    }
}

impl Default for Render {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
            selected_marker: Self::default_selected_marker(),
            unselected_marker: Self::default_unselected_marker(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    #[serde(default = "Input::default_format")]
    pub format: String,
}

impl Input {
    fn default_format() -> String {
        "json".into()
    }
}

impl Default for Input {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    format: Option<String>,
    input_format: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            format: env::var("SELECTLIST_FORMAT").ok(),
            input_format: env::var("SELECTLIST_INPUT_FORMAT").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(format: &str, input_format: &str) -> Self {
        Self {
            format: Some(format.to_owned()),
            input_format: Some(input_format.to_owned()),
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
            tracing::debug!(path = %global_path.display(), "loading global config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            render: merge_render(self.render, other.render),
            input: Input {
                format: choose(self.input.format, other.input.format, Input::default_format),
            },
        }
    }
}

fn merge_render(base: Render, overlay: Render) -> Render {
    Render {
        format: choose(base.format, overlay.format, Render::default_format),
        selected_marker: choose(
            base.selected_marker,
            overlay.selected_marker,
            Render::default_selected_marker,
        ),
        unselected_marker: choose(
            base.unselected_marker,
            overlay.unselected_marker,
            Render::default_unselected_marker,
        ),
    }
}

fn choose(base: String, overlay: String, default_fn: fn() -> String) -> String {
    if overlay != default_fn() {
        overlay
    } else {
        base
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("selectlist/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|candidate| candidate.join(".git").exists())
        .map(Path::to_path_buf)
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(format) = env.format {
        config.render.format = format;
    }
    if let Some(input_format) = env.input_format {
        config.input.format = input_format;
    }
    config
}
