//! Application error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(String),

    #[error("failed to load asset {}: {source}", path.display())]
    Asset {
        path:   PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("audio error: {0}")]
    Audio(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<minifb::Error> for AppError {
    fn from(e: minifb::Error) -> Self { AppError::Window(e.to_string()) }
}

pub type AppResult<T> = Result<T, AppError>;
