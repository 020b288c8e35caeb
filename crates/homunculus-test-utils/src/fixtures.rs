//! Calibration and robot-configuration fixtures.

use std::path::{Path, PathBuf};

use homunculus_calib::JointCalibration;

/// Calibration with distinct points on every leg joint, so index order is
/// observable after loading.
pub const CALIBRATION_TOML: &str = r"
left_leg = [
    [0.0, 0.0681, 0.4912],
    [0.0, 0.0682, 0.4910],
    [0.0, 0.0683, 0.4908],
    [0.0, 0.0684, 0.2782],
    [0.0, 0.0685, 0.0632],
    [0.0, 0.0686, 0.0630],
]
right_leg = [
    [0.0, -0.0681, 0.4912],
    [0.0, -0.0682, 0.4910],
    [0.0, -0.0683, 0.4908],
    [0.0, -0.0684, 0.2782],
    [0.0, -0.0685, 0.0632],
    [0.0, -0.0686, 0.0630],
]
head = [
    [-0.026, 0.0, 0.8927],
    [-0.026, 0.0, 0.9127],
    [-0.026, 0.0, 0.9457],
    [-0.026, 0.0, 0.9567],
]
left_eye = [[0.042, 0.034, 1.0007], [0.043, 0.034, 1.0017]]
right_eye = [[0.042, -0.034, 1.0007], [0.043, -0.034, 1.0017]]
inertial = [[0.0185, 0.0, 1.0332]]
";

/// [`CALIBRATION_TOML`], parsed.
pub fn calibration() -> JointCalibration {
    homunculus_calib::parse_str(CALIBRATION_TOML).expect("fixture calibration parses")
}

/// Write [`CALIBRATION_TOML`] to `dir/joints.toml` and return its path.
pub fn write_calibration(dir: &Path) -> PathBuf {
    let path = dir.join("joints.toml");
    std::fs::write(&path, CALIBRATION_TOML).expect("write fixture calibration");
    path
}

/// Write a robot configuration referencing a sibling `joints.toml`, plus the
/// calibration itself, into `dir`. Returns the robot file path.
pub fn write_robot_config(dir: &Path, parts_toml: &str) -> PathBuf {
    write_calibration(dir);
    let path = dir.join("robot.toml");
    let content = format!(
        "calibration = \"joints.toml\"\n\n[sim]\nphysics_dt = 0.01\n\n[parts]\n{parts_toml}\n"
    );
    std::fs::write(&path, content).expect("write fixture robot config");
    path
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
