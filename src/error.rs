use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixError {
    #[error(
        "Unsupported boleto format. Use 47 digits (linha digitavel) or 44 digits (codigo de barras)"
    )]
    UnsupportedFormat,
    #[error("Boleto amount is 0. Provide amountOverride > 0 to generate the Pix")]
    InvalidAmount,
    #[error("Missing merchant identity: {0} must not be empty")]
    MissingIdentity(&'static str),
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Pix encoding failed: {0}")]
    Encoding(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PixError {
    /// Stable name of the error variant, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            PixError::UnsupportedFormat => "UnsupportedFormat",
            PixError::InvalidAmount => "InvalidAmount",
            PixError::MissingIdentity(_) => "MissingIdentity",
            PixError::Validation(_) => "Validation",
            PixError::Encoding(_) => "Encoding",
            PixError::Csv(_) => "Csv",
            PixError::Io(_) => "Io",
            PixError::Json(_) => "Json",
        }
    }

    /// Whether the failure was caused by caller input rather than by the
    /// encoder or the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PixError::UnsupportedFormat
                | PixError::InvalidAmount
                | PixError::MissingIdentity(_)
                | PixError::Validation(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PixError>;
