use crate::domain::model::Notice;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Search provider returned status {status}")]
    ProviderStatusError { status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Processing,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RadarError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RadarError::ApiError(_) | RadarError::ProviderStatusError { .. } => {
                ErrorCategory::Transport
            }
            RadarError::ConfigError { .. }
            | RadarError::MissingConfigError { .. }
            | RadarError::InvalidConfigValueError { .. }
            | RadarError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            RadarError::ZipError(_) | RadarError::IoError(_) => ErrorCategory::Storage,
            RadarError::CsvError(_)
            | RadarError::SerializationError(_)
            | RadarError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 傳輸錯誤可以稍後重試
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RadarError::MissingConfigError { .. } => {
                "Set SERPER_API_KEY in the environment or in a .env file"
            }
            RadarError::ProviderStatusError { status } if *status == 401 || *status == 403 => {
                "Check that the API key is valid and has remaining credits"
            }
            _ => match self.category() {
                ErrorCategory::Transport => "Check network connectivity and try again later",
                ErrorCategory::Configuration => "Review the configuration file and CLI flags",
                ErrorCategory::Processing => "Inspect the provider response with --verbose",
                ErrorCategory::Storage => "Check that the output path exists and is writable",
            },
        }
    }

    /// Message shown to the person running the radar.
    pub fn user_friendly_message(&self) -> String {
        match self {
            RadarError::MissingConfigError { .. } => {
                "A chave da API não foi encontrada. Verifique se o arquivo .env está configurado corretamente.".to_string()
            }
            RadarError::ProviderStatusError { status } => {
                format!("Erro ao buscar dados da API. Status Code: {}", status)
            }
            RadarError::ApiError(e) => format!("Erro de conexão: {}", e),
            other => format!("Erro: {}", other),
        }
    }

    /// Converts a fetch-side failure into the notice attached to the run.
    pub fn notice(&self) -> Notice {
        match self.category() {
            ErrorCategory::Configuration => Notice::Configuration(self.user_friendly_message()),
            _ => Notice::Transport(self.user_friendly_message()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RadarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_maps_to_configuration_notice() {
        let err = RadarError::MissingConfigError {
            field: "SERPER_API_KEY".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(matches!(err.notice(), Notice::Configuration(_)));
    }

    #[test]
    fn test_status_error_maps_to_transport_notice() {
        let err = RadarError::ProviderStatusError { status: 500 };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        match err.notice() {
            Notice::Transport(message) => assert!(message.contains("500")),
            other => panic!("unexpected notice: {:?}", other),
        }
    }

    #[test]
    fn test_auth_status_has_specific_suggestion() {
        let err = RadarError::ProviderStatusError { status: 403 };
        assert!(err.recovery_suggestion().contains("API key"));
    }
}
