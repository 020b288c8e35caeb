//! Calibration file parsing.
//!
//! The file is TOML. Each group is a key holding an array of `[x, y, z]`
//! points in the robot-local frame:
//!
//! ```toml
//! left_leg  = [[0.0, 0.068, 0.46], ...]   # 6 points, hip first
//! right_leg = [...]                       # 6 points
//! head      = [...]                       # 4 points
//! left_eye  = [...]                       # 2 points
//! right_eye = [...]                       # 2 points
//! inertial  = [[0.0, 0.0, 0.97]]          # 1 point
//! ```
//!
//! Unknown keys are ignored.

use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;

use crate::error::CalibrationError;
use crate::types::{Chain, JointAnchor, JointCalibration};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load a calibration file from disk.
///
/// A missing file is reported as [`CalibrationError::FileNotFound`]; it is
/// never replaced by defaults.
pub fn load(path: impl AsRef<Path>) -> Result<JointCalibration, CalibrationError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CalibrationError::FileNotFound(path.to_path_buf())
        } else {
            CalibrationError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let calibration = parse_str(&content)?;
    tracing::info!(
        path = %path.display(),
        legs = calibration.left_leg.len() + calibration.right_leg.len(),
        head = calibration.head.len(),
        "loaded joint calibration"
    );
    Ok(calibration)
}

/// Parse calibration TOML text.
pub fn parse_str(content: &str) -> Result<JointCalibration, CalibrationError> {
    let raw: RawCalibration =
        toml::from_str(content).map_err(|e| CalibrationError::Parse(e.to_string()))?;

    let inertial = convert_group(Chain::Inertial, raw.inertial)?;

    Ok(JointCalibration {
        left_leg: convert_group(Chain::LeftLeg, raw.left_leg)?,
        right_leg: convert_group(Chain::RightLeg, raw.right_leg)?,
        head: convert_group(Chain::Head, raw.head)?,
        left_eye: convert_group(Chain::LeftEye, raw.left_eye)?,
        right_eye: convert_group(Chain::RightEye, raw.right_eye)?,
        inertial: inertial[0],
    })
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawCalibration {
    left_leg: Option<Vec<[f64; 3]>>,
    right_leg: Option<Vec<[f64; 3]>>,
    head: Option<Vec<[f64; 3]>>,
    left_eye: Option<Vec<[f64; 3]>>,
    right_eye: Option<Vec<[f64; 3]>>,
    inertial: Option<Vec<[f64; 3]>>,
}

fn convert_group(
    chain: Chain,
    points: Option<Vec<[f64; 3]>>,
) -> Result<Vec<JointAnchor>, CalibrationError> {
    let group = chain.name();
    let points = points.ok_or(CalibrationError::MissingGroup(group))?;

    let expected = chain.joint_count();
    if points.len() != expected {
        return Err(CalibrationError::WrongCount {
            group,
            expected,
            got: points.len(),
        });
    }

    if let Some(index) = points
        .iter()
        .position(|p| p.iter().any(|c| !c.is_finite()))
    {
        return Err(CalibrationError::NonFinite { group, index });
    }

    let mut anchors: Vec<JointAnchor> = points
        .iter()
        .map(|p| JointAnchor::point(Vector3::from(*p)))
        .collect();
    if chain.reversed_on_load() {
        anchors.reverse();
    }
    Ok(anchors)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = r"
        left_leg = [
            [0.0, 0.068, 0.4912],
            [0.0, 0.068, 0.4912],
            [0.0, 0.068, 0.4912],
            [0.0, 0.068, 0.2782],
            [0.0, 0.068, 0.0632],
            [0.0, 0.068, 0.0632],
        ]
        right_leg = [
            [0.0, -0.068, 0.4912],
            [0.0, -0.068, 0.4912],
            [0.0, -0.068, 0.4912],
            [0.0, -0.068, 0.2782],
            [0.0, -0.068, 0.0632],
            [0.0, -0.068, 0.0632],
        ]
        head = [
            [-0.026, 0.0, 0.8927],
            [-0.026, 0.0, 0.9127],
            [-0.026, 0.0, 0.9457],
            [-0.026, 0.0, 0.9457],
        ]
        left_eye = [[0.042, 0.034, 1.0007], [0.042, 0.034, 1.0007]]
        right_eye = [[0.042, -0.034, 1.0007], [0.042, -0.034, 1.0007]]
        inertial = [[0.0, 0.0, 0.9857]]
    ";

    /// `SAMPLE` with `group` removed and `replacement` appended.
    fn replace_group(source: &str, group: &str, replacement: &str) -> String {
        let mut table: toml::Table = source.parse().unwrap();
        table.remove(group);
        format!("{}\n{replacement}\n", toml::to_string(&table).unwrap())
    }

    #[test]
    fn parse_sample_counts() {
        let calib = parse_str(SAMPLE).unwrap();
        assert_eq!(calib.chain(Chain::LeftLeg).len(), 6);
        assert_eq!(calib.chain(Chain::RightLeg).len(), 6);
        assert_eq!(calib.chain(Chain::Head).len(), 4);
        assert_eq!(calib.chain(Chain::LeftEye).len(), 2);
        assert_eq!(calib.chain(Chain::RightEye).len(), 2);
        assert_eq!(calib.chain(Chain::Inertial).len(), 1);
        assert!(calib.chain(Chain::LeftArm).is_empty());
    }

    #[test]
    fn legs_are_stored_reversed() {
        let calib = parse_str(SAMPLE).unwrap();
        let legs = calib.chain(Chain::LeftLeg);
        // First file entry (hip) becomes the last stored anchor.
        assert_relative_eq!(legs[5].position, Vector3::new(0.0, 0.068, 0.4912));
        assert_relative_eq!(legs[0].position, Vector3::new(0.0, 0.068, 0.0632));
        assert_relative_eq!(legs[2].position, Vector3::new(0.0, 0.068, 0.2782));
    }

    #[test]
    fn head_and_eyes_keep_file_order() {
        let calib = parse_str(SAMPLE).unwrap();
        let head = calib.chain(Chain::Head);
        assert_relative_eq!(head[0].position[2], 0.8927);
        assert_relative_eq!(head[1].position[2], 0.9127);
        assert_relative_eq!(head[3].position[2], 0.9457);
        assert_relative_eq!(calib.chain(Chain::RightEye)[0].position[1], -0.034);
    }

    #[test]
    fn calibrated_anchors_have_no_axis() {
        let calib = parse_str(SAMPLE).unwrap();
        for chain in Chain::CALIBRATED {
            assert!(calib.chain(chain).iter().all(|a| a.axis.is_none()));
        }
    }

    #[test]
    fn inertial_is_single_point() {
        let calib = parse_str(SAMPLE).unwrap();
        assert_relative_eq!(calib.inertial().position, Vector3::new(0.0, 0.0, 0.9857));
    }

    #[test]
    fn missing_group_is_error() {
        let content = replace_group(SAMPLE, "head", "");
        assert!(matches!(
            parse_str(&content),
            Err(CalibrationError::MissingGroup("head"))
        ));
    }

    #[test]
    fn wrong_count_is_error() {
        let content = replace_group(SAMPLE, "left_eye", "left_eye = [[0.0, 0.0, 1.0]]");
        match parse_str(&content) {
            Err(CalibrationError::WrongCount {
                group,
                expected,
                got,
            }) => {
                assert_eq!(group, "left_eye");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("expected WrongCount, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_is_error() {
        let content = replace_group(SAMPLE, "inertial", "inertial = [[0.0, nan, 1.0]]");
        assert!(matches!(
            parse_str(&content),
            Err(CalibrationError::NonFinite {
                group: "inertial",
                index: 0
            })
        ));
    }

    #[test]
    fn malformed_point_is_parse_error() {
        let content = replace_group(SAMPLE, "inertial", "inertial = [[0.0, 1.0]]");
        assert!(matches!(
            parse_str(&content),
            Err(CalibrationError::Parse(_))
        ));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        assert!(matches!(
            parse_str("left_leg = [[[["),
            Err(CalibrationError::Parse(_))
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let content = format!("{SAMPLE}\nnotes = \"bench 3\"\n");
        assert!(parse_str(&content).is_ok());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let result = load("/nonexistent/joints.toml");
        assert!(matches!(result, Err(CalibrationError::FileNotFound(_))));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("joints.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let calib = load(&path).unwrap();
        assert_eq!(calib, parse_str(SAMPLE).unwrap());
    }
}
