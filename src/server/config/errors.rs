use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    InvalidParameter { name: String, value: String },
    ValidationError(String),
    JsonError(String),
    YamlError(String),
    IoError(String),
}

impl ConfigError {
    pub(crate) fn invalid(name: &str, value: impl fmt::Display) -> Self {
        ConfigError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}' with value '{}'", name, value)
            }
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ConfigError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            ConfigError::YamlError(msg) => write!(f, "YAML error: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::JsonError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> ConfigError {
        ConfigError::YamlError(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> ConfigError {
        ConfigError::IoError(err.to_string())
    }
}
