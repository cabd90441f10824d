#[derive(Debug, thiserror::Error)]
#[error("DBError: {0}")]
pub struct DBError(pub String);

impl From<rusqlite::Error> for DBError {
    fn from(err: rusqlite::Error) -> Self { DBError(err.to_string()) }
}
impl From<serde_json::Error> for DBError {
    fn from(err: serde_json::Error) -> Self { DBError(err.to_string()) }
}
