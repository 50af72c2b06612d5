use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecognitionError>;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("Image analysis credentials are not configured")]
    MissingCredentials,

    #[error("Image content is empty")]
    EmptyImage,

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Image analysis failed: {0}")]
    Analyzer(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
