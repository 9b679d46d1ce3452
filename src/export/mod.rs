//! Animation export: document snapshot, text rendering and the downloadable artifact

pub mod document;
pub mod yaml;

pub use document::{normalize_interval, AnimationEntry, AnimationFile};

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::animation::{Animation, Axis, Joint};

/// File extension of exported animations
pub const EXTENSION: &str = "yml";
/// Generic artifact name used by [`ExportNaming::Fixed`] by default
pub const DEFAULT_FILE_STEM: &str = "animation";

/// Reasons an export is aborted
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("animation name is empty")]
    EmptyName,

    #[error("interval is not a finite number: {0}")]
    NonFiniteInterval(f64),

    #[error("step {step}: {joint}.{axis} is not a finite number: {value}")]
    NonFiniteAngle {
        step: usize,
        joint: Joint,
        axis: Axis,
        value: f32,
    },

    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// How the exported file is named
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportNaming {
    /// `<animation name>.yml`
    #[default]
    AnimationName,
    /// Always the same stem, e.g. `animation.yml`
    Fixed(String),
}

/// A rendered export, ready to be saved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

impl ExportArtifact {
    /// Write the artifact into `dir`, creating it if needed
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

/// Serializes animations into [`ExportArtifact`]s
#[derive(Clone, Debug, Default)]
pub struct Exporter {
    naming: ExportNaming,
}

impl Exporter {
    pub fn new(naming: ExportNaming) -> Self {
        Self { naming }
    }

    /// Render `animation`. The animation is only read.
    pub fn export(&self, animation: &Animation) -> Result<ExportArtifact, ExportError> {
        let document = AnimationFile::from_animation(animation)?;
        let contents = yaml::to_string(&document)?;
        Ok(ExportArtifact {
            file_name: self.file_name(&animation.name),
            contents,
        })
    }

    /// Artifact file name for an animation called `name`
    pub fn file_name(&self, name: &str) -> String {
        let stem = match &self.naming {
            ExportNaming::AnimationName => sanitize_stem(name),
            ExportNaming::Fixed(stem) => sanitize_stem(stem),
        };
        let stem = if stem.is_empty() { DEFAULT_FILE_STEM.to_string() } else { stem };
        format!("{}.{}", stem, EXTENSION)
    }
}

fn sanitize_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}
