//! Complete joint layout handed to the skeleton builder.

use nalgebra::Vector3;

use homunculus_calib::{Chain, JointAnchor, JointCalibration};
use homunculus_core::types::Side;

use crate::arm::ArmKinematics;
use crate::error::KinematicsError;

/// Anchors for every chain of one skeleton.
///
/// Legs, head, eyes and the inertial point come verbatim from the
/// calibration; torso and arms come from the kinematic model. A layout is
/// rebuilt wholesale with [`assemble`](Self::assemble) whenever the model
/// pose changes; it is never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct JointLayout {
    calibration: JointCalibration,
    torso: Vec<JointAnchor>,
    left_arm: Vec<JointAnchor>,
    right_arm: Vec<JointAnchor>,
}

impl JointLayout {
    /// Combine loaded calibration with anchors derived from `kinematics`.
    pub fn assemble(
        calibration: &JointCalibration,
        kinematics: &ArmKinematics,
    ) -> Result<Self, KinematicsError> {
        let layout = Self {
            calibration: calibration.clone(),
            torso: kinematics.torso_anchors()?.to_vec(),
            left_arm: kinematics.arm_anchors(Side::Left)?.to_vec(),
            right_arm: kinematics.arm_anchors(Side::Right)?.to_vec(),
        };
        tracing::debug!(
            torso = layout.torso.len(),
            arms = layout.left_arm.len() + layout.right_arm.len(),
            "assembled joint layout"
        );
        Ok(layout)
    }

    /// Anchors of `chain` in skeleton index order.
    pub fn chain(&self, chain: Chain) -> &[JointAnchor] {
        match chain {
            Chain::Torso => &self.torso,
            Chain::LeftArm => &self.left_arm,
            Chain::RightArm => &self.right_arm,
            calibrated => self.calibration.chain(calibrated),
        }
    }

    pub fn anchor(&self, chain: Chain, index: usize) -> Option<&JointAnchor> {
        self.chain(chain).get(index)
    }

    /// Engine-frame anchor positions of `chain`, raised by `elevation`.
    pub fn world_positions(&self, chain: Chain, elevation: f64) -> Vec<Vector3<f64>> {
        self.chain(chain)
            .iter()
            .map(|a| a.world_position(elevation))
            .collect()
    }

    pub const fn calibration(&self) -> &JointCalibration {
        &self.calibration
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
