use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImpseekError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("File discovery failed under {root}: {message}")]
    Discovery { root: String, message: String },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to read {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction task failed for {path}: {message}")]
    TaskFailed { path: String, message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ImpseekError {
    fn user_message(&self) -> String {
        match self {
            ImpseekError::InvalidPath { path } => {
                format!("Invalid directory: {}", path)
            }
            ImpseekError::Discovery { root, message } => {
                format!("Could not list files under {}: {}", root, message)
            }
            ImpseekError::InvalidPattern { pattern, source } => {
                format!("Invalid glob pattern '{}': {}", pattern, source)
            }
            ImpseekError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ImpseekError::ReadFailed { path, source } => {
                format!("Could not read {}: {}", path, source)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ImpseekError::InvalidPath { .. } => Some(
                "Pass an existing directory, or run impseek from the root of your project.".to_string()
            ),
            ImpseekError::Discovery { .. } => Some(
                "Check that you have read permission for every directory in the tree, or exclude the offending directory with --exclude.".to_string()
            ),
            ImpseekError::InvalidPattern { .. } => Some(
                "Use glob syntax such as **/*.{ts,tsx} or **/generated/**.".to_string()
            ),
            ImpseekError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ImpseekError {
    fn from(error: toml::de::Error) -> Self {
        ImpseekError::Config {
            message: error.to_string(),
        }
    }
}

impl From<walkdir::Error> for ImpseekError {
    fn from(error: walkdir::Error) -> Self {
        let root = error
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        ImpseekError::Discovery {
            root,
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImpseekError>;
