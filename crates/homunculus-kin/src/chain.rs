//! Denavit–Hartenberg serial chain.
//!
//! Each link uses the standard convention
//! `H_i = Rz(q_i + offset) · Tz(d) · Tx(a) · Rx(alpha)` and the chain is
//! prefixed by a fixed base transform `H0`.

use nalgebra::{Isometry3, Vector3};

use crate::error::KinematicsError;

/// A single revolute link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhLink {
    /// Link length along the rotated x axis (m).
    pub a: f64,
    /// Link offset along the previous z axis (m).
    pub d: f64,
    /// Link twist around the new x axis (rad).
    pub alpha: f64,
    /// Constant added to the joint angle (rad).
    pub offset: f64,
    /// Lower joint limit (rad).
    pub min: f64,
    /// Upper joint limit (rad).
    pub max: f64,
}

impl DhLink {
    pub const fn new(a: f64, d: f64, alpha: f64, offset: f64, min: f64, max: f64) -> Self {
        Self {
            a,
            d,
            alpha,
            offset,
            min,
            max,
        }
    }

    /// Homogeneous transform of this link at joint angle `q`.
    pub fn transform(&self, q: f64) -> Isometry3<f64> {
        let rz = Isometry3::rotation(Vector3::z() * (q + self.offset));
        let t = Isometry3::translation(self.a, 0.0, self.d);
        let rx = Isometry3::rotation(Vector3::x() * self.alpha);
        rz * t * rx
    }
}

/// Ordered links from the kinematic root to the end effector, with their
/// current joint angles.
#[derive(Debug, Clone, PartialEq)]
pub struct DhChain {
    h0: Isometry3<f64>,
    links: Vec<DhLink>,
    angles: Vec<f64>,
    constrained: bool,
}

impl DhChain {
    /// Build a chain posed at the zero configuration with limits enforced.
    pub fn new(h0: Isometry3<f64>, links: Vec<DhLink>) -> Self {
        let angles = vec![0.0; links.len()];
        Self {
            h0,
            links,
            angles,
            constrained: true,
        }
    }

    pub fn dof(&self) -> usize {
        self.links.len()
    }

    pub fn links(&self) -> &[DhLink] {
        &self.links
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub const fn is_constrained(&self) -> bool {
        self.constrained
    }

    /// Enable or disable joint-limit clamping. Angles already set are
    /// re-clamped when constraints are switched on.
    pub fn set_constrained(&mut self, constrained: bool) {
        self.constrained = constrained;
        if constrained {
            for (q, link) in self.angles.iter_mut().zip(&self.links) {
                *q = q.clamp(link.min, link.max);
            }
        }
    }

    /// Set every joint angle. With constraints on, angles are clamped to the
    /// link limits.
    pub fn set_angles(&mut self, q: &[f64]) -> Result<(), KinematicsError> {
        if q.len() != self.dof() {
            return Err(KinematicsError::AngleCount {
                expected: self.dof(),
                got: q.len(),
            });
        }
        if let Some(i) = q.iter().position(|v| !v.is_finite()) {
            return Err(KinematicsError::NonFiniteAngle(i));
        }
        for ((dst, &src), link) in self.angles.iter_mut().zip(q).zip(&self.links) {
            *dst = if self.constrained {
                src.clamp(link.min, link.max)
            } else {
                src
            };
        }
        Ok(())
    }

    /// Base transform preceding the first link.
    pub const fn h0(&self) -> &Isometry3<f64> {
        &self.h0
    }

    /// Transform of link `i`'s frame in the root frame: `H0 · H_0 · … · H_i`.
    pub fn h(&self, i: usize) -> Result<Isometry3<f64>, KinematicsError> {
        if i >= self.dof() {
            return Err(KinematicsError::LinkOutOfRange {
                index: i,
                len: self.dof(),
            });
        }
        Ok(self
            .links
            .iter()
            .zip(&self.angles)
            .take(i + 1)
            .fold(self.h0, |acc, (link, &q)| acc * link.transform(q)))
    }

    /// Transform of every link frame, in chain order.
    pub fn frames(&self) -> Vec<Isometry3<f64>> {
        let mut transform = self.h0;
        self.links
            .iter()
            .zip(&self.angles)
            .map(|(link, &q)| {
                transform *= link.transform(q);
                transform
            })
            .collect()
    }

    /// End-effector pose in the root frame.
    pub fn end_effector(&self) -> Isometry3<f64> {
        self.frames().last().copied().unwrap_or(self.h0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
