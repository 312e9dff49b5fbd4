//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the registry root
pub const REGISTRY_ENV: &str = "SKILLGRAPH_REGISTRY";

/// Skillgraph configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the registry lives and how its entities are named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry root; `graph_dir` and `skills_dir` are relative to it
    pub root: PathBuf,
    pub graph_dir: String,
    pub skills_dir: String,
    /// Descriptor file that makes a folder under `skills_dir` a skill
    pub descriptor: String,
    /// Identifier of the traversal origin
    pub root_node: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("registry"),
            graph_dir: "graph".to_string(),
            skills_dir: "skills".to_string(),
            descriptor: "SKILL.md".to_string(),
            root_node: "index".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Registry config rooted at `root` with default layout
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn graph_path(&self) -> PathBuf {
        self.root.join(&self.graph_dir)
    }

    pub fn skills_path(&self) -> PathBuf {
        self.root.join(&self.skills_dir)
    }

    /// Apply the root precedence: explicit flag, then environment, then file.
    pub fn with_root_override(mut self, flag: Option<&Path>) -> Self {
        if let Some(path) = flag {
            self.root = path.to_path_buf();
        } else if let Ok(path) = env::var(REGISTRY_ENV) {
            if !path.is_empty() {
                self.root = PathBuf::from(path);
            }
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.root_node.is_empty()
            || !self
                .root_node
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(anyhow!(
                "registry.root_node must contain only letters, numbers, hyphens, and underscores"
            ));
        }
        for (key, value) in [
            ("registry.graph_dir", &self.graph_dir),
            ("registry.skills_dir", &self.skills_dir),
            ("registry.descriptor", &self.descriptor),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("{} cannot be empty", key));
            }
        }
        if self.descriptor.contains(['/', '\\']) {
            return Err(anyhow!("registry.descriptor must be a file name, not a path"));
        }
        Ok(())
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("SKILLGRAPH_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("skillgraph")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or use defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.registry.validate()?;
        if !["text", "json"].contains(&self.output.format.as_str()) {
            return Err(anyhow!(
                "Invalid output.format: {}. Valid options: text, json",
                self.output.format
            ));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "registry.root" => Ok(self.registry.root.display().to_string()),
            "registry.graph_dir" => Ok(self.registry.graph_dir.clone()),
            "registry.skills_dir" => Ok(self.registry.skills_dir.clone()),
            "registry.descriptor" => Ok(self.registry.descriptor.clone()),
            "registry.root_node" => Ok(self.registry.root_node.clone()),
            "output.format" => Ok(self.output.format.clone()),
            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `skillgraph config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut updated = self.clone();
        match key {
            "registry.root" => updated.registry.root = PathBuf::from(value),
            "registry.graph_dir" => updated.registry.graph_dir = value.to_string(),
            "registry.skills_dir" => updated.registry.skills_dir = value.to_string(),
            "registry.descriptor" => updated.registry.descriptor = value.to_string(),
            "registry.root_node" => updated.registry.root_node = value.to_string(),
            "output.format" => updated.output.format = value.to_lowercase(),
            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `skillgraph config list` to see available keys.",
                    key
                ));
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = [
            "registry.root",
            "registry.graph_dir",
            "registry.skills_dir",
            "registry.descriptor",
            "registry.root_node",
            "output.format",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}
