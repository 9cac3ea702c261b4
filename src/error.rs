use thiserror::Error;

#[derive(Debug, Error)]
pub enum HukukError {
    #[error("Required field is empty: {0}")]
    MissingField(String),

    #[error("API request failed with status {status}")]
    Http {
        status: u16,
        detail: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl HukukError {
    /// Create an HTTP status error with an optional server-provided detail
    pub fn http(status: u16, detail: Option<String>) -> Self {
        Self::Http { status, detail }
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingField(_) => Some(
                "Provide --template, --category and --description (or a form file that sets them)."
                    .to_string(),
            ),
            Self::Http { status, .. } if *status >= 500 => {
                Some("The document service failed. Try again later.".to_string())
            }
            Self::Http { detail: Some(detail), .. } => Some(detail.clone()),
            Self::Network(_) => Some(
                "Check that the document service is reachable. Run: hukuk config get api.base_url"
                    .to_string(),
            ),
            Self::Parse(_) => Some("The service returned a malformed response.".to_string()),
            Self::Config(_) => Some("Run 'hukuk config init' to recreate the configuration.".to_string()),
            _ => None,
        }
    }

    /// Whether the user can fix the problem by editing the form
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidInput(_))
    }

    /// Short message for the transient notification shown after a failed submission.
    ///
    /// Parse failures read the same as transport failures.
    pub fn toast_message(&self) -> String {
        match self {
            Self::MissingField(_) => "Lütfen tüm zorunlu alanları doldurun.".to_string(),
            Self::Http { status, .. } => format!("API isteği başarısız oldu (durum kodu {})", status),
            Self::Network(_) | Self::Parse(_) => {
                "Belge oluşturulurken bir hata oluştu. Lütfen tekrar deneyin.".to_string()
            }
            other => format!("İşlem sırasında beklenmeyen bir hata oluştu: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, HukukError>;
