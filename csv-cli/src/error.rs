use data_error::CsvError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't load config {0}: {1}")]
    ConfigLoadError(String, String),

    #[error("Couldn't render output: {0}")]
    RenderError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    CsvError(#[from] CsvError),
}
