//! Error types for the editor

use thiserror::Error;

use crate::editor::input::InputError;
use crate::export::ExportError;
use crate::rig::SkeletonError;

/// Main error type for the editor
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Rig error: {0}")]
    Rig(#[from] SkeletonError),

    #[error("Script error: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, Error>;
