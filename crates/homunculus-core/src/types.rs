use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HomunculusError;

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Left or right half of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Actuated region holding this side's arm and hand joints.
    pub const fn arm_region(self) -> BodyRegion {
        match self {
            Self::Left => BodyRegion::LeftArm,
            Self::Right => BodyRegion::RightArm,
        }
    }

    pub const fn leg_region(self) -> BodyRegion {
        match self {
            Self::Left => BodyRegion::LeftLeg,
            Self::Right => BodyRegion::RightLeg,
        }
    }

    pub const fn arm_body_part(self) -> BodyPart {
        match self {
            Self::Left => BodyPart::LeftArm,
            Self::Right => BodyPart::RightArm,
        }
    }

    pub const fn hand_skin(self) -> SkinPart {
        match self {
            Self::Left => SkinPart::LeftHand,
            Self::Right => SkinPart::RightHand,
        }
    }

    pub const fn forearm_skin(self) -> SkinPart {
        match self {
            Self::Left => SkinPart::LeftForearm,
            Self::Right => SkinPart::RightForearm,
        }
    }

    pub const fn upper_arm_skin(self) -> SkinPart {
        match self {
            Self::Left => SkinPart::LeftUpperArm,
            Self::Right => SkinPart::RightUpperArm,
        }
    }
}

// ---------------------------------------------------------------------------
// BodyRegion
// ---------------------------------------------------------------------------

/// One of the six actuated groups sharing a control-mode table.
///
/// The discriminants are the integer keys used by external control-mode
/// tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BodyRegion {
    LeftArm = 1,
    RightArm = 2,
    Head = 3,
    LeftLeg = 4,
    RightLeg = 5,
    Torso = 6,
}

impl BodyRegion {
    /// Order in which regions are actuated every step.
    pub const DISPATCH_ORDER: [Self; 6] = [
        Self::LeftLeg,
        Self::RightLeg,
        Self::Torso,
        Self::LeftArm,
        Self::RightArm,
        Self::Head,
    ];

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftArm => "left_arm",
            Self::RightArm => "right_arm",
            Self::Head => "head",
            Self::LeftLeg => "left_leg",
            Self::RightLeg => "right_leg",
            Self::Torso => "torso",
        }
    }
}

impl TryFrom<u8> for BodyRegion {
    type Error = HomunculusError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::LeftArm),
            2 => Ok(Self::RightArm),
            3 => Ok(Self::Head),
            4 => Ok(Self::LeftLeg),
            5 => Ok(Self::RightLeg),
            6 => Ok(Self::Torso),
            other => Err(HomunculusError::UnknownRegion(other)),
        }
    }
}

impl fmt::Display for BodyRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Skin vocabulary
// ---------------------------------------------------------------------------

/// Coarse body part reported alongside a skin classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    #[default]
    Unknown,
    Torso,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// Skin patch a collision resolves to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinPart {
    #[default]
    Unknown,
    LeftHand,
    LeftForearm,
    LeftUpperArm,
    RightHand,
    RightForearm,
    RightUpperArm,
    FrontTorso,
}

impl SkinPart {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown_skin",
            Self::LeftHand => "left_hand",
            Self::LeftForearm => "left_forearm",
            Self::LeftUpperArm => "left_upper_arm",
            Self::RightHand => "right_hand",
            Self::RightForearm => "right_forearm",
            Self::RightUpperArm => "right_upper_arm",
            Self::FrontTorso => "front_torso",
        }
    }
}

impl fmt::Display for SkinPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finger identity, reported only for fingertip contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandPart {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl HandPart {
    pub const ALL: [Self; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Little,
    ];
}

// ---------------------------------------------------------------------------
// SubSpace
// ---------------------------------------------------------------------------

/// Named collision sub-space a shape is placed in by the skeleton builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubSpace {
    Torso,
    LeftArm,
    RightArm,
    Head,
    Legs,
}

impl SubSpace {
    pub const ALL: [Self; 5] = [
        Self::Torso,
        Self::LeftArm,
        Self::RightArm,
        Self::Head,
        Self::Legs,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Torso => "torso space",
            Self::LeftArm => "left arm space",
            Self::RightArm => "right arm space",
            Self::Head => "head space",
            Self::Legs => "legs space",
        }
    }

    /// Side of an arm sub-space, `None` for the others.
    pub const fn arm_side(self) -> Option<Side> {
        match self {
            Self::LeftArm => Some(Side::Left),
            Self::RightArm => Some(Side::Right),
            _ => None,
        }
    }
}

impl fmt::Display for SubSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_ids_match_control_table_keys() {
        assert_eq!(BodyRegion::LeftArm.id(), 1);
        assert_eq!(BodyRegion::RightArm.id(), 2);
        assert_eq!(BodyRegion::Head.id(), 3);
        assert_eq!(BodyRegion::LeftLeg.id(), 4);
        assert_eq!(BodyRegion::RightLeg.id(), 5);
        assert_eq!(BodyRegion::Torso.id(), 6);
    }

    #[test]
    fn region_try_from_roundtrips_ids() {
        for region in BodyRegion::DISPATCH_ORDER {
            assert_eq!(BodyRegion::try_from(region.id()).unwrap(), region);
        }
    }

    #[test]
    fn region_try_from_rejects_unknown() {
        assert!(matches!(
            BodyRegion::try_from(0),
            Err(HomunculusError::UnknownRegion(0))
        ));
        assert!(BodyRegion::try_from(7).is_err());
    }

    #[test]
    fn dispatch_order_is_legs_torso_arms_head() {
        let names: Vec<&str> = BodyRegion::DISPATCH_ORDER
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(
            names,
            ["left_leg", "right_leg", "torso", "left_arm", "right_arm", "head"]
        );
    }

    #[test]
    fn side_maps_to_arm_vocabulary() {
        assert_eq!(Side::Left.arm_region(), BodyRegion::LeftArm);
        assert_eq!(Side::Right.arm_body_part(), BodyPart::RightArm);
        assert_eq!(Side::Left.hand_skin(), SkinPart::LeftHand);
        assert_eq!(Side::Right.forearm_skin(), SkinPart::RightForearm);
        assert_eq!(Side::Left.upper_arm_skin(), SkinPart::LeftUpperArm);
    }

    #[test]
    fn only_arm_spaces_have_sides() {
        assert_eq!(SubSpace::LeftArm.arm_side(), Some(Side::Left));
        assert_eq!(SubSpace::RightArm.arm_side(), Some(Side::Right));
        assert_eq!(SubSpace::Torso.arm_side(), None);
        assert_eq!(SubSpace::Head.arm_side(), None);
        assert_eq!(SubSpace::Legs.arm_side(), None);
    }

    #[test]
    fn defaults_are_unknown() {
        assert_eq!(SkinPart::default(), SkinPart::Unknown);
        assert_eq!(BodyPart::default(), BodyPart::Unknown);
    }
}
