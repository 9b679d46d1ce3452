//! Validation of raw widget input before it reaches editor state

use thiserror::Error;

use crate::animation::{ANGLE_MAX, ANGLE_MIN};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("value is not a finite number: {0}")]
    NonFinite(f64),

    #[error("cannot parse {0:?} as a number")]
    Parse(String),
}

/// Reject non-finite angles and clamp the rest to [-180, 180]
pub fn sanitize_angle(degrees: f32) -> Result<f32, InputError> {
    if !degrees.is_finite() {
        return Err(InputError::NonFinite(f64::from(degrees)));
    }
    Ok(degrees.clamp(ANGLE_MIN, ANGLE_MAX))
}

/// Parse a numeric text field into a sanitized angle
pub fn parse_angle(text: &str) -> Result<f32, InputError> {
    let trimmed = text.trim();
    let value: f32 = trimmed
        .parse()
        .map_err(|_| InputError::Parse(trimmed.to_string()))?;
    sanitize_angle(value)
}

/// Reject a non-finite interval. Flooring and the lower bound are applied on export.
pub fn sanitize_interval(ticks: f64) -> Result<f64, InputError> {
    if !ticks.is_finite() {
        return Err(InputError::NonFinite(ticks));
    }
    Ok(ticks)
}
