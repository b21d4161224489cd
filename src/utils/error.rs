use thiserror::Error;

#[derive(Error, Debug)]
pub enum FareCardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid command '{input}': {reason}")]
    InvalidCommand { input: String, reason: String },
}

impl FareCardError {
    pub fn invalid_command(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// 給使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read file: {}", e),
            Self::TomlError(_) => "Configuration file is not valid TOML".to_string(),
            Self::SerializationError(_) => "Could not render output as JSON".to_string(),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::InvalidCommand { input, reason } => {
                format!("Cannot run '{}': {}", input, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::TomlError(_) => "Fix the TOML syntax in the configuration file",
            Self::SerializationError(_) => "Retry without --json",
            Self::InvalidConfigValueError { .. } => "Correct the value in the [card] section",
            Self::InvalidCommand { .. } => {
                "Use one of: ticket, balance, expiry, status, extend <amount>, discount <fraction>, season-days <days>, season-amount <amount>"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FareCardError>;
