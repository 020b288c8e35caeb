//! Canned taxel-activation vectors of each skin patch.
//!
//! Two canonical vectors per patch are built once: an empty one (all zero)
//! and a full one (saturated taxels). Emitters copy them out; the canonical
//! instances are never edited.

use serde::{Deserialize, Serialize};

/// Activation of a saturated taxel.
pub const TAXEL_FULL: f64 = 255.0;

/// Physical skin patch type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinPatch {
    Hand,
    Forearm,
    UpperArm,
    Torso,
}

impl SkinPatch {
    pub const ALL: [Self; 4] = [Self::Hand, Self::Forearm, Self::UpperArm, Self::Torso];

    /// Number of taxels of the patch.
    pub const fn taxel_count(self) -> usize {
        match self {
            Self::Hand => 192,
            Self::Forearm => 384,
            Self::UpperArm | Self::Torso => 768,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Hand => "hand",
            Self::Forearm => "forearm",
            Self::UpperArm => "upper_arm",
            Self::Torso => "torso",
        }
    }
}

/// Modules of the forearm's second patch that are missing on the sensor.
pub const FOREARM_MISSING_RANGES: [std::ops::Range<usize>; 5] =
    [192..204, 216..252, 264..288, 324..336, 360..384];

/// Taxels 6 and 10 of every triangular module carry no reading.
const fn is_module_gap(index: usize) -> bool {
    index % 6 == 0 || index % 10 == 0
}

fn masked_full(count: usize, missing: &[std::ops::Range<usize>]) -> Vec<f64> {
    (0..count)
        .map(|i| {
            if is_module_gap(i) || missing.iter().any(|r| r.contains(&i)) {
                0.0
            } else {
                TAXEL_FULL
            }
        })
        .collect()
}

/// Empty and full vectors of every patch.
///
/// Hand and forearm full vectors are masked per module; the forearm also
/// zeroes its missing modules. Upper-arm and torso full vectors are uniformly
/// saturated: their per-taxel masks have not been measured yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinActivationVectors {
    hand_empty: Vec<f64>,
    hand_full: Vec<f64>,
    forearm_empty: Vec<f64>,
    forearm_full: Vec<f64>,
    upper_arm_empty: Vec<f64>,
    upper_arm_full: Vec<f64>,
    torso_empty: Vec<f64>,
    torso_full: Vec<f64>,
}

impl Default for SkinActivationVectors {
    fn default() -> Self {
        Self::build()
    }
}

impl SkinActivationVectors {
    pub fn build() -> Self {
        let empty = |patch: SkinPatch| vec![0.0; patch.taxel_count()];
        let saturated = |patch: SkinPatch| vec![TAXEL_FULL; patch.taxel_count()];
        Self {
            hand_empty: empty(SkinPatch::Hand),
            hand_full: masked_full(SkinPatch::Hand.taxel_count(), &[]),
            forearm_empty: empty(SkinPatch::Forearm),
            forearm_full: masked_full(SkinPatch::Forearm.taxel_count(), &FOREARM_MISSING_RANGES),
            upper_arm_empty: empty(SkinPatch::UpperArm),
            // TODO: replace with the measured upper-arm taxel mask once available.
            upper_arm_full: saturated(SkinPatch::UpperArm),
            torso_empty: empty(SkinPatch::Torso),
            // TODO: replace with the measured torso taxel mask once available.
            torso_full: saturated(SkinPatch::Torso),
        }
    }

    pub fn empty(&self, patch: SkinPatch) -> &[f64] {
        match patch {
            SkinPatch::Hand => &self.hand_empty,
            SkinPatch::Forearm => &self.forearm_empty,
            SkinPatch::UpperArm => &self.upper_arm_empty,
            SkinPatch::Torso => &self.torso_empty,
        }
    }

    pub fn full(&self, patch: SkinPatch) -> &[f64] {
        match patch {
            SkinPatch::Hand => &self.hand_full,
            SkinPatch::Forearm => &self.forearm_full,
            SkinPatch::UpperArm => &self.upper_arm_full,
            SkinPatch::Torso => &self.torso_full,
        }
    }

    /// Owned copy of the empty vector, ready to emit.
    pub fn emit_empty(&self, patch: SkinPatch) -> Vec<f64> {
        self.empty(patch).to_vec()
    }

    /// Owned copy of the full vector, ready to emit.
    pub fn emit_full(&self, patch: SkinPatch) -> Vec<f64> {
        self.full(patch).to_vec()
    }

    /// Indices that read zero in the full vector of `patch`.
    pub fn zeroed_indices(&self, patch: SkinPatch) -> Vec<usize> {
        self.full(patch)
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0.0)
            .map(|(i, _)| i)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
