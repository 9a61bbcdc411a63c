use crate::error::{ImpseekError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PATTERN: &str = "**/*.{ts,tsx}";
pub const NODE_MODULES_IGNORE: &str = "**/node_modules/**";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub pattern: String,
    pub ignore: Vec<String>,
    pub case_insensitive: bool,
    pub follow_links: bool,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
    pub show_time: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            ignore: vec![
                "**/.*/**".to_string(),
                "**/target/**".to_string(),
                "**/dist/**".to_string(),
                NODE_MODULES_IGNORE.to_string(),
            ],
            case_insensitive: true,
            follow_links: false,
            max_depth: None, // Unbounded
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_time: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImpseekError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ImpseekError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ImpseekError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    /// Loads `config_path` when given, otherwise the first default file found
    /// in `base_dir`, otherwise the built-in defaults.
    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>, base_dir: &Path) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["impseek.toml", ".impseek.toml"];

                for default_path in &default_paths {
                    let candidate = base_dir.join(default_path);
                    if candidate.exists() {
                        tracing::debug!(path = %candidate.display(), "loading configuration");
                        return Self::load_from_file(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref pattern) = cli_args.pattern {
            self.scan.pattern = pattern.clone();
        }

        if let Some(ref exclude) = cli_args.exclude {
            for glob in exclude {
                if !self.scan.ignore.contains(glob) {
                    self.scan.ignore.push(glob.clone());
                }
            }
        }

        if cli_args.exclude_node_modules
            && !self.scan.ignore.iter().any(|g| g == NODE_MODULES_IGNORE)
        {
            self.scan.ignore.push(NODE_MODULES_IGNORE.to_string());
        }

        if let Some(color) = cli_args.color {
            self.output.color = color;
        }

        if cli_args.show_time {
            self.output.show_time = true;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ImpseekError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ImpseekError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.pattern.trim().is_empty() {
            return Err(ImpseekError::Config {
                message: "The include pattern must not be empty".to_string(),
            });
        }

        if self.scan.max_depth == Some(0) {
            return Err(ImpseekError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        if let Some(empty) = self.scan.ignore.iter().find(|g| g.trim().is_empty()) {
            return Err(ImpseekError::Config {
                message: format!("Ignore patterns must not be empty (got {:?})", empty),
            });
        }

        Ok(())
    }

}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub pattern: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub exclude_node_modules: bool,
    pub color: Option<bool>,
    pub show_time: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_exclude_node_modules(mut self, exclude: bool) -> Self {
        self.exclude_node_modules = exclude;
        self
    }

    pub fn with_color(mut self, color: Option<bool>) -> Self {
        self.color = color;
        self
    }

    pub fn with_show_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }
}

/// Directory a relative config path or scan root is resolved against.
pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
