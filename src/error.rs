use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No column starting with '{prefix}' found in '{path}'")]
    Schema { path: String, prefix: String },
}

impl CollectorError {
    /// True for failures raised while talking to the places service.
    pub fn is_transport_fault(&self) -> bool {
        matches!(self, CollectorError::Http(_) | CollectorError::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, CollectorError>;
