//! Joint slot layout of each actuated region.

use homunculus_core::types::BodyRegion;

/// Kind of simulated joint sitting in a region slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointSlot {
    /// Hinge that honours the region's control-mode table.
    Hinge,
    /// Finger hinge. Always velocity controlled.
    FingerHinge,
    /// Two-axis joint. Always receives both velocity components.
    Universal,
    /// Unused slot. Receives no call.
    Vacant,
}

use JointSlot::{FingerHinge as F, Hinge as H, Universal as U, Vacant as V};

const LEG: [JointSlot; 6] = [H; 6];
const TORSO: [JointSlot; 5] = [H; 5];
const HEAD: [JointSlot; 6] = [H; 6];

/// Shoulder to wrist hinges, wrist universal, four fingers of three hinges
/// each followed by a vacant slot, thumb base universal and two thumb hinges.
#[rustfmt::skip]
const ARM: [JointSlot; 25] = [
    H, H, H, H, H,
    U,
    F, F, F, V,
    F, F, F, V,
    F, F, F, V,
    F, F, F, V,
    U, F, F,
];

/// Slot layout of `region`. Its length is the region's joint count.
pub const fn region_slots(region: BodyRegion) -> &'static [JointSlot] {
    match region {
        BodyRegion::LeftLeg | BodyRegion::RightLeg => &LEG,
        BodyRegion::Torso => &TORSO,
        BodyRegion::LeftArm | BodyRegion::RightArm => &ARM,
        BodyRegion::Head => &HEAD,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(region: BodyRegion, kind: JointSlot) -> Vec<usize> {
        region_slots(region)
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == kind)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn region_joint_counts() {
        assert_eq!(region_slots(BodyRegion::LeftLeg).len(), 6);
        assert_eq!(region_slots(BodyRegion::RightLeg).len(), 6);
        assert_eq!(region_slots(BodyRegion::Torso).len(), 5);
        assert_eq!(region_slots(BodyRegion::LeftArm).len(), 25);
        assert_eq!(region_slots(BodyRegion::RightArm).len(), 25);
        assert_eq!(region_slots(BodyRegion::Head).len(), 6);
    }

    #[test]
    fn arm_universal_and_vacant_slots() {
        assert_eq!(positions(BodyRegion::LeftArm, U), vec![5, 22]);
        assert_eq!(positions(BodyRegion::LeftArm, V), vec![9, 13, 17, 21]);
        assert_eq!(positions(BodyRegion::RightArm, H), vec![0, 1, 2, 3, 4]);
        assert_eq!(positions(BodyRegion::RightArm, F).len(), 14);
    }

    #[test]
    fn non_arm_regions_are_plain_hinges() {
        for region in [
            BodyRegion::LeftLeg,
            BodyRegion::RightLeg,
            BodyRegion::Torso,
            BodyRegion::Head,
        ] {
            assert!(region_slots(region).iter().all(|s| *s == H), "{region}");
        }
    }
}
