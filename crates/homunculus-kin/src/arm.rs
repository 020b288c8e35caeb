//! Arm kinematic models and the derivation of torso and arm anchors.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Isometry3, Matrix3, Rotation3, Translation3, UnitQuaternion, Vector3};

use homunculus_calib::JointAnchor;
use homunculus_core::types::Side;

use crate::chain::{DhChain, DhLink};
use crate::error::KinematicsError;

/// Links in one arm chain: 3 torso + 7 arm.
pub const ARM_CHAIN_DOF: usize = 10;
/// Torso anchors derived from the left arm chain.
pub const TORSO_ANCHORS: usize = 3;
/// Arm anchors derived per side.
pub const ARM_ANCHORS: usize = 8;

// ---------------------------------------------------------------------------
// Arm model
// ---------------------------------------------------------------------------

fn link(a: f64, d: f64, alpha: f64, offset: f64, min_deg: f64, max_deg: f64) -> DhLink {
    DhLink::new(a, d, alpha, offset, min_deg.to_radians(), max_deg.to_radians())
}

/// Rotation between the waist frame and the first torso link.
fn arm_base() -> Isometry3<f64> {
    #[rustfmt::skip]
    let m = Matrix3::new(
        0.0, -1.0,  0.0,
        0.0,  0.0, -1.0,
        1.0,  0.0,  0.0,
    );
    let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(m));
    Isometry3::from_parts(Translation3::identity(), rotation)
}

/// Ten-link chain from the waist through the torso to the hand of one arm.
///
/// Joint limits are carried for completeness; the anchor derivation runs
/// with constraints off.
pub fn arm_chain(side: Side) -> DhChain {
    let links = match side {
        Side::Left => vec![
            link(0.032, 0.0, FRAC_PI_2, 0.0, -22.0, 84.0),
            link(0.0, -0.0055, FRAC_PI_2, -FRAC_PI_2, -39.0, 39.0),
            link(0.023_364_7, -0.1433, -FRAC_PI_2, 105.0_f64.to_radians(), -59.0, 59.0),
            link(0.0, 0.107_74, -FRAC_PI_2, FRAC_PI_2, -95.5, 5.0),
            link(0.0, 0.0, FRAC_PI_2, -FRAC_PI_2, 0.0, 160.8),
            link(0.015, 0.152_28, -FRAC_PI_2, 75.0_f64.to_radians(), -37.0, 100.0),
            link(-0.015, 0.0, FRAC_PI_2, 0.0, 5.5, 106.0),
            link(0.0, 0.1373, FRAC_PI_2, -FRAC_PI_2, -90.0, 90.0),
            link(0.0, 0.0, FRAC_PI_2, FRAC_PI_2, -90.0, 0.0),
            link(0.0625, -0.016, 0.0, 0.0, -20.0, 40.0),
        ],
        Side::Right => vec![
            link(0.032, 0.0, FRAC_PI_2, 0.0, -22.0, 84.0),
            link(0.0, -0.0055, FRAC_PI_2, -FRAC_PI_2, -39.0, 39.0),
            link(-0.023_364_7, -0.1433, FRAC_PI_2, (-105.0_f64).to_radians(), -59.0, 59.0),
            link(0.0, -0.107_74, FRAC_PI_2, -FRAC_PI_2, -95.5, 5.0),
            link(0.0, 0.0, -FRAC_PI_2, -FRAC_PI_2, 0.0, 160.8),
            link(-0.015, -0.152_28, -FRAC_PI_2, (-105.0_f64).to_radians(), -37.0, 100.0),
            link(0.015, 0.0, FRAC_PI_2, 0.0, 5.5, 106.0),
            link(0.0, -0.1373, FRAC_PI_2, -FRAC_PI_2, -90.0, 90.0),
            link(0.0, 0.0, FRAC_PI_2, FRAC_PI_2, -90.0, 0.0),
            link(0.0625, 0.016, 0.0, PI, -20.0, 40.0),
        ],
    };
    DhChain::new(arm_base(), links)
}

// ---------------------------------------------------------------------------
// RootToWorld
// ---------------------------------------------------------------------------

/// Fixed rigid transform between the kinematic root (waist) and the
/// simulation world frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootToWorld {
    root_to_world: Isometry3<f64>,
}

impl RootToWorld {
    pub const fn new(root_to_world: Isometry3<f64>) -> Self {
        Self { root_to_world }
    }

    /// Waist placement of the standard skeleton.
    pub fn standard() -> Self {
        #[rustfmt::skip]
        let m = Matrix3::new(
             0.0, 0.0, -1.0,
            -1.0, 0.0,  0.0,
             0.0, 1.0,  0.0,
        );
        let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(m));
        Self::new(Isometry3::from_parts(
            Translation3::new(-0.026, 0.0, -0.5976),
            rotation,
        ))
    }

    pub const fn root_to_world(&self) -> &Isometry3<f64> {
        &self.root_to_world
    }

    pub fn world_to_root(&self) -> Isometry3<f64> {
        self.root_to_world.inverse()
    }
}

impl Default for RootToWorld {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// ArmKinematics
// ---------------------------------------------------------------------------

/// Both arm chains plus the root-to-world transform, producing torso and arm
/// anchors.
///
/// Each call to an anchor method recomputes from the current angles; nothing
/// is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmKinematics {
    left: DhChain,
    right: DhChain,
    world_to_root: Isometry3<f64>,
}

impl ArmKinematics {
    /// Unconstrained chains posed at the zero configuration.
    pub fn zero_pose(frame: RootToWorld) -> Self {
        let mut left = arm_chain(Side::Left);
        let mut right = arm_chain(Side::Right);
        left.set_constrained(false);
        right.set_constrained(false);
        Self {
            left,
            right,
            world_to_root: frame.world_to_root(),
        }
    }

    pub const fn chain(&self, side: Side) -> &DhChain {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Pose one arm chain (3 torso + 7 arm angles, radians).
    pub fn set_angles(&mut self, side: Side, q: &[f64]) -> Result<(), KinematicsError> {
        match side {
            Side::Left => self.left.set_angles(q),
            Side::Right => self.right.set_angles(q),
        }
    }

    /// Torso anchors from the left arm chain: the base frame, then the
    /// first two links. Axes past the base are flipped.
    pub fn torso_anchors(&self) -> Result<[JointAnchor; TORSO_ANCHORS], KinematicsError> {
        Ok([
            anchor_from(&(self.world_to_root * self.left.h0()), false),
            anchor_from(&(self.world_to_root * self.left.h(0)?), true),
            anchor_from(&(self.world_to_root * self.left.h(1)?), true),
        ])
    }

    /// Arm anchors for links 2..=9 of the chain.
    pub fn arm_anchors(&self, side: Side) -> Result<[JointAnchor; ARM_ANCHORS], KinematicsError> {
        let chain = self.chain(side);
        let mut anchors = [JointAnchor::point(Vector3::zeros()); ARM_ANCHORS];
        for (i, anchor) in anchors.iter_mut().enumerate() {
            let h = self.world_to_root * chain.h(i + 2)?;
            *anchor = anchor_from(&h, arm_axis_flipped(side, i));
        }
        Ok(anchors)
    }
}

impl Default for ArmKinematics {
    fn default() -> Self {
        Self::zero_pose(RootToWorld::standard())
    }
}

/// Engine joints turn opposite to the model on these arm links.
const fn arm_axis_flipped(side: Side, index: usize) -> bool {
    match side {
        Side::Left => index > 1,
        Side::Right => index == 1 || index == 3,
    }
}

/// Robot-ordered position `(z, x, y)` and z-axis of a frame.
fn anchor_from(h: &Isometry3<f64>, flip: bool) -> JointAnchor {
    let t = h.translation.vector;
    let axis = h.rotation * Vector3::z();
    JointAnchor::with_axis(
        Vector3::new(t.z, t.x, t.y),
        if flip { -axis } else { axis },
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
