//! Loading a calibration file and deriving arm and torso anchors leaves the
//! calibrated chains untouched.

use approx::assert_relative_eq;
use nalgebra::Vector3;

use homunculus_calib::Chain;
use homunculus_kin::{ArmKinematics, JointLayout};
use homunculus_test_utils::write_calibration;

fn raw_group(group: &str) -> Vec<Vector3<f64>> {
    let table: toml::Table = homunculus_test_utils::CALIBRATION_TOML.parse().unwrap();
    table[group]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            let p = p.as_array().unwrap();
            Vector3::new(
                p[0].as_float().unwrap(),
                p[1].as_float().unwrap(),
                p[2].as_float().unwrap(),
            )
        })
        .collect()
}

#[test]
fn calibrated_chains_survive_derivation() {
    let dir = tempfile::tempdir().unwrap();
    let calib = homunculus_calib::load(write_calibration(dir.path())).unwrap();
    let layout = JointLayout::assemble(&calib, &ArmKinematics::default()).unwrap();

    for (chain, group) in [
        (Chain::Head, "head"),
        (Chain::LeftEye, "left_eye"),
        (Chain::RightEye, "right_eye"),
        (Chain::Inertial, "inertial"),
    ] {
        let raw = raw_group(group);
        let anchors = layout.chain(chain);
        assert_eq!(anchors.len(), raw.len());
        for (anchor, point) in anchors.iter().zip(&raw) {
            assert_relative_eq!(anchor.position, *point, epsilon = 1e-12);
            assert!(anchor.axis.is_none());
        }
    }

    for (chain, group) in [(Chain::LeftLeg, "left_leg"), (Chain::RightLeg, "right_leg")] {
        let raw = raw_group(group);
        let anchors = layout.chain(chain);
        assert_eq!(anchors.len(), 6);
        for (i, point) in raw.iter().enumerate() {
            assert_relative_eq!(anchors[5 - i].position, *point, epsilon = 1e-12);
        }
    }
}

#[test]
fn derived_chains_replace_calibration() {
    let layout =
        JointLayout::assemble(&homunculus_test_utils::calibration(), &ArmKinematics::default())
            .unwrap();
    assert_eq!(layout.chain(Chain::Torso).len(), 3);
    assert_eq!(layout.chain(Chain::LeftArm).len(), 8);
    assert_eq!(layout.chain(Chain::RightArm).len(), 8);
}

#[test]
fn arms_are_mirrored_at_zero_pose() {
    let layout =
        JointLayout::assemble(&homunculus_test_utils::calibration(), &ArmKinematics::default())
            .unwrap();
    let left = layout.chain(Chain::LeftArm);
    let right = layout.chain(Chain::RightArm);
    for (l, r) in left.iter().zip(right) {
        // Robot y is lateral.
        assert_relative_eq!(l.position.x, r.position.x, epsilon = 1e-6);
        assert_relative_eq!(l.position.y, -r.position.y, epsilon = 1e-6);
        assert_relative_eq!(l.position.z, r.position.z, epsilon = 1e-6);
    }
}
