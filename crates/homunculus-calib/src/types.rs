//! Anchor and chain types shared by the calibration loader and the
//! kinematic layout.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Named kinematic chain whose joints carry an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chain {
    LeftLeg,
    RightLeg,
    Torso,
    LeftArm,
    RightArm,
    Head,
    LeftEye,
    RightEye,
    Inertial,
}

impl Chain {
    pub const ALL: [Self; 9] = [
        Self::LeftLeg,
        Self::RightLeg,
        Self::Torso,
        Self::LeftArm,
        Self::RightArm,
        Self::Head,
        Self::LeftEye,
        Self::RightEye,
        Self::Inertial,
    ];

    /// Chains read from the calibration file, in file-group order.
    pub const CALIBRATED: [Self; 6] = [
        Self::LeftLeg,
        Self::RightLeg,
        Self::Head,
        Self::LeftEye,
        Self::RightEye,
        Self::Inertial,
    ];

    /// Chains derived from the arm kinematic model.
    pub const DERIVED: [Self; 3] = [Self::Torso, Self::LeftArm, Self::RightArm];

    /// Group key in the calibration file.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftLeg => "left_leg",
            Self::RightLeg => "right_leg",
            Self::Torso => "torso",
            Self::LeftArm => "left_arm",
            Self::RightArm => "right_arm",
            Self::Head => "head",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::Inertial => "inertial",
        }
    }

    /// Number of anchors on the chain.
    pub const fn joint_count(self) -> usize {
        match self {
            Self::LeftLeg | Self::RightLeg => 6,
            Self::Torso => 3,
            Self::LeftArm | Self::RightArm => 8,
            Self::Head => 4,
            Self::LeftEye | Self::RightEye => 2,
            Self::Inertial => 1,
        }
    }

    /// Leg groups are listed from the hip down in the file but indexed from
    /// the foot up by the skeleton.
    pub const fn reversed_on_load(self) -> bool {
        matches!(self, Self::LeftLeg | Self::RightLeg)
    }

    pub const fn is_calibrated(self) -> bool {
        !matches!(self, Self::Torso | Self::LeftArm | Self::RightArm)
    }
}

// ---------------------------------------------------------------------------
// JointAnchor
// ---------------------------------------------------------------------------

/// Joint anchor point in the robot-ordered frame, with an optional rotation
/// axis in the engine frame.
///
/// Stored components are `(z, x, y)` of the engine frame: robot X/Y/Z map to
/// world Z/X/Y. Use [`world_position`](Self::world_position) when placing
/// bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAnchor {
    pub position: Vector3<f64>,
    pub axis: Option<Vector3<f64>>,
}

impl JointAnchor {
    /// Anchor with no explicit axis.
    pub const fn point(position: Vector3<f64>) -> Self {
        Self {
            position,
            axis: None,
        }
    }

    pub const fn with_axis(position: Vector3<f64>, axis: Vector3<f64>) -> Self {
        Self {
            position,
            axis: Some(axis),
        }
    }

    /// Engine-frame position, raised by `elevation` along the vertical axis.
    pub fn world_position(&self, elevation: f64) -> Vector3<f64> {
        Vector3::new(
            self.position[1],
            elevation + self.position[2],
            self.position[0],
        )
    }
}

// ---------------------------------------------------------------------------
// JointCalibration
// ---------------------------------------------------------------------------

/// Anchors read from the calibration file. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct JointCalibration {
    pub(crate) left_leg: Vec<JointAnchor>,
    pub(crate) right_leg: Vec<JointAnchor>,
    pub(crate) head: Vec<JointAnchor>,
    pub(crate) left_eye: Vec<JointAnchor>,
    pub(crate) right_eye: Vec<JointAnchor>,
    pub(crate) inertial: JointAnchor,
}

impl JointCalibration {
    /// Anchors of a calibrated chain, in skeleton index order.
    ///
    /// Derived chains (torso and arms) are not stored here and yield an
    /// empty slice.
    pub fn chain(&self, chain: Chain) -> &[JointAnchor] {
        match chain {
            Chain::LeftLeg => &self.left_leg,
            Chain::RightLeg => &self.right_leg,
            Chain::Head => &self.head,
            Chain::LeftEye => &self.left_eye,
            Chain::RightEye => &self.right_eye,
            Chain::Inertial => std::slice::from_ref(&self.inertial),
            Chain::Torso | Chain::LeftArm | Chain::RightArm => &[],
        }
    }

    /// Anchor `index` of `chain`, if present.
    pub fn anchor(&self, chain: Chain, index: usize) -> Option<&JointAnchor> {
        self.chain(chain).get(index)
    }

    /// Location of the inertial sensor.
    pub const fn inertial(&self) -> &JointAnchor {
        &self.inertial
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
