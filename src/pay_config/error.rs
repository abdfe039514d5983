use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayConfigError {
    #[error("PayConfigError - Json: {0}")]
    Json(#[from] serde_json::Error),
}
