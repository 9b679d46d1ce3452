//! Core editor utilities: errors, logging and configuration

pub mod config;
pub mod error;
pub mod logging;

pub use config::EditorConfig;
pub use error::{Error, Result};
