//! Text rendering of an [`AnimationFile`]
//!
//! The layout is fixed: block mappings down to each step, one flow mapping
//! per joint.
//!
//! ```text
//! animations:
//!   wave:
//!     interval: 10
//!     loop: true
//!     steps:
//!       - head: {x: 0, y: 0, z: 0}
//!         left_arm: {x: 0, y: 0, z: 0}
//!         ...
//! ```

use std::fmt::Write;

use super::document::AnimationFile;
use super::ExportError;
use crate::animation::{JointAngles, Pose};

/// Render the document as text
pub fn to_string(file: &AnimationFile) -> Result<String, ExportError> {
    let mut out = String::new();
    writeln!(out, "animations:")?;

    for (name, entry) in &file.animations {
        writeln!(out, "  {}:", key(name))?;
        writeln!(out, "    interval: {}", entry.interval)?;
        writeln!(out, "    loop: {}", entry.looping)?;
        writeln!(out, "    steps:")?;
        for pose in &entry.steps {
            write_step(&mut out, pose)?;
        }
    }

    Ok(out)
}

fn write_step(out: &mut String, pose: &Pose) -> Result<(), ExportError> {
    for (i, (joint, angles)) in pose.iter().enumerate() {
        let bullet = if i == 0 { "      - " } else { "        " };
        writeln!(out, "{}{}: {}", bullet, joint.name(), flow(&angles))?;
    }
    Ok(())
}

fn flow(angles: &JointAngles) -> String {
    format!("{{x: {}, y: {}, z: {}}}", angles.x, angles.y, angles.z)
}

const RESERVED: [&str; 11] = [
    "true", "false", "null", "yes", "no", "on", "off", "y", "n", "~", "",
];

/// Mapping key, quoted unless it is a plain identifier YAML reads as a string
pub fn key(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !RESERVED.contains(&name.to_ascii_lowercase().as_str());

    if plain {
        return name.to_string();
    }

    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            // Line and paragraph separators count as line breaks in YAML
            '\u{2028}' => quoted.push_str("\\L"),
            '\u{2029}' => quoted.push_str("\\P"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Animation, Axis, Joint};

    #[test]
    fn test_single_neutral_step_layout() {
        let anim = Animation::new("wave", 10.0);
        let file = AnimationFile::from_animation(&anim).unwrap();
        let text = to_string(&file).unwrap();

        let expected = "\
animations:
  wave:
    interval: 10
    loop: true
    steps:
      - head: {x: 0, y: 0, z: 0}
        left_arm: {x: 0, y: 0, z: 0}
        right_arm: {x: 0, y: 0, z: 0}
        left_leg: {x: 0, y: 0, z: 0}
        right_leg: {x: 0, y: 0, z: 0}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_fractional_and_negative_angles() {
        let pose = Pose::NEUTRAL
            .with_angle(Joint::Head, Axis::X, -22.5)
            .with_angle(Joint::Head, Axis::Z, 180.0);
        let anim = Animation::from_keyframes("nod", 4.0, vec![pose]).unwrap();
        let text = to_string(&AnimationFile::from_animation(&anim).unwrap()).unwrap();

        assert!(text.contains("      - head: {x: -22.5, y: 0, z: 180}\n"));
    }

    #[test]
    fn test_key_quoting() {
        assert_eq!(key("wave"), "wave");
        assert_eq!(key("idle_2-b"), "idle_2-b");
        assert_eq!(key("true"), "\"true\"");
        assert_eq!(key("42"), "\"42\"");
        assert_eq!(key("my wave"), "\"my wave\"");
        assert_eq!(key("a\"b"), "\"a\\\"b\"");
        assert_eq!(key("-x"), "\"-x\"");
        assert_eq!(key("a\u{2028}b\u{2029}c"), "\"a\\Lb\\Pc\"");
    }
}
