use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectorError {
    #[error("Missing API credential: {0}")]
    ConfigError(String),

    #[error("Gemini API error: {0}")]
    ApiError(String),

    #[error("Unexpected response envelope: {0}")]
    EnvelopeError(String),

    #[error("Storyboard layout error: {0}")]
    LayoutError(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DirectorError {
    /// 重新提交是否可能成功（配置错误需要用户先补齐凭证）
    pub fn retryable(&self) -> bool {
        match self {
            DirectorError::ConfigError(_) => false,
            DirectorError::ApiError(_) => true,
            DirectorError::EnvelopeError(_) => true,
            DirectorError::LayoutError(_) => true,
            DirectorError::HttpError(_) => true,
            DirectorError::JsonError(_) => false,
            DirectorError::IoError(_) => false,
        }
    }

    /// 面向用户的提示语，按错误类别区分
    pub fn user_message(&self) -> String {
        match self {
            DirectorError::ConfigError(_) => {
                "No API key found. Set it via --api-key or GEMINI_API_KEY before retrying."
                    .to_string()
            }
            DirectorError::HttpError(e) => {
                format!("Network error while contacting Gemini: {}. Resubmit to retry.", e)
            }
            DirectorError::ApiError(msg) => {
                format!("Gemini rejected the request: {}. Resubmit to retry.", msg)
            }
            other => format!("An error occurred: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectorError>;
