#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("FetchError::Transport: {0}")]
    Transport(String),
    #[error("FetchError::InvalidData")]
    InvalidData,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}
impl From<serde_json::Error> for FetchError {
    fn from(_: serde_json::Error) -> Self {
        FetchError::InvalidData
    }
}
