//! Collision-shape catalogue and the per-skeleton handle registry.
//!
//! The catalogue lists, for one [`PartsConfig`], every collision shape the
//! skeleton builder creates and the sub-space it is placed in. The registry
//! hands out opaque handles for those shapes in catalogue order and keeps the
//! readable debug names. Both are owned by one skeleton instance.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use homunculus_core::config::PartsConfig;
use homunculus_core::types::{HandPart, Side, SubSpace};

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Opaque collision-shape handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeHandle(pub u32);

/// Opaque collision sub-space handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpaceHandle(pub u32);

// ---------------------------------------------------------------------------
// ShapeKey
// ---------------------------------------------------------------------------

/// Number of hand blocks standing in for a disabled hand.
pub const HAND_BLOCKS: u8 = 6;
/// Number of arm blocks standing in for a disabled arm (3 upper arm, 1 forearm).
pub const ARM_BLOCKS: u8 = 4;
/// Upper-arm links of an enabled arm.
pub const UPPER_ARM_LINKS: u8 = 4;

/// Phalanx segments of one finger. Ring and little fingers are geometrically
/// distinct but share the fused fingertip body for touch sensing.
pub const fn phalanx_count(finger: HandPart) -> u8 {
    match finger {
        HandPart::Thumb => 3,
        HandPart::Index | HandPart::Middle | HandPart::Ring | HandPart::Little => 4,
    }
}

/// Optional cover surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cover {
    Torso,
    Waist,
    Palm(Side),
    LowerArm(Side),
    UpperArm(Side),
    UpperLeg(Side),
    LowerLeg(Side),
}

/// Identity of one collision shape within a skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKey {
    /// Coarse block of a disabled hand.
    HandBlock { side: Side, index: u8 },
    Palm { side: Side },
    /// Finger segment; the last link is the fingertip.
    Phalanx { side: Side, finger: HandPart, link: u8 },
    /// Coarse block of a disabled arm. Blocks 0..3 are upper arm, 3 is forearm.
    ArmBlock { side: Side, index: u8 },
    UpperArmLink { side: Side, index: u8 },
    ForearmLink { side: Side },
    TorsoLink { index: u8 },
    HeadLink { index: u8 },
    LegLink { side: Side, index: u8 },
    Cover(Cover),
}

impl ShapeKey {
    /// `true` for the terminal segment of a finger.
    pub const fn is_fingertip(&self) -> bool {
        match self {
            Self::Phalanx { finger, link, .. } => *link + 1 == phalanx_count(*finger),
            _ => false,
        }
    }

    /// Readable name used in diagnostics.
    pub fn debug_name(&self) -> String {
        match self {
            Self::HandBlock { side, index } => format!("{} hand block {index}", side.name()),
            Self::Palm { side } => format!("{} palm", side.name()),
            Self::Phalanx { side, finger, link } => {
                format!("{} {} phalanx {link}", side.name(), finger_name(*finger))
            }
            Self::ArmBlock { side, index } => format!("{} arm block {index}", side.name()),
            Self::UpperArmLink { side, index } => {
                format!("{} upper arm link {index}", side.name())
            }
            Self::ForearmLink { side } => format!("{} forearm", side.name()),
            Self::TorsoLink { index } => format!("torso link {index}"),
            Self::HeadLink { index } => format!("head link {index}"),
            Self::LegLink { side, index } => format!("{} leg link {index}", side.name()),
            Self::Cover(cover) => match cover {
                Cover::Torso => "torso cover".to_owned(),
                Cover::Waist => "waist cover".to_owned(),
                Cover::Palm(side) => format!("{} palm cover", side.name()),
                Cover::LowerArm(side) => format!("{} lower arm cover", side.name()),
                Cover::UpperArm(side) => format!("{} upper arm cover", side.name()),
                Cover::UpperLeg(side) => format!("{} upper leg cover", side.name()),
                Cover::LowerLeg(side) => format!("{} lower leg cover", side.name()),
            },
        }
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug_name())
    }
}

/// Collision sub-space holding the arm and hand shapes of `side`.
pub const fn arm_space(side: Side) -> SubSpace {
    match side {
        Side::Left => SubSpace::LeftArm,
        Side::Right => SubSpace::RightArm,
    }
}

const fn finger_name(finger: HandPart) -> &'static str {
    match finger {
        HandPart::Thumb => "thumb",
        HandPart::Index => "index",
        HandPart::Middle => "middle",
        HandPart::Ring => "ring",
        HandPart::Little => "little",
    }
}

// ---------------------------------------------------------------------------
// ShapeCatalog
// ---------------------------------------------------------------------------

const TORSO_LINKS: u8 = 4;
const HEAD_LINKS: u8 = 4;
const LEG_LINKS: u8 = 6;

/// Collision shapes created for one parts configuration, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeCatalog {
    entries: Vec<(SubSpace, ShapeKey)>,
}

impl ShapeCatalog {
    /// Enumerate the shapes the skeleton builder creates for `parts`.
    ///
    /// Disabled torso, head and legs keep a single block each. Covers are
    /// only present when their flag is on.
    pub fn for_parts(parts: &PartsConfig) -> Self {
        let mut entries = Vec::new();

        let torso_links = if parts.torso { TORSO_LINKS } else { 1 };
        for index in 0..torso_links {
            entries.push((SubSpace::Torso, ShapeKey::TorsoLink { index }));
        }
        if parts.torso_covers {
            entries.push((SubSpace::Torso, ShapeKey::Cover(Cover::Torso)));
            entries.push((SubSpace::Torso, ShapeKey::Cover(Cover::Waist)));
        }

        for side in Side::BOTH {
            let space = arm_space(side);
            let mut push = |key| entries.push((space, key));

            if parts.arm(side) {
                for index in 0..UPPER_ARM_LINKS {
                    push(ShapeKey::UpperArmLink { side, index });
                }
                push(ShapeKey::ForearmLink { side });
            } else {
                for index in 0..ARM_BLOCKS {
                    push(ShapeKey::ArmBlock { side, index });
                }
            }

            if parts.hand(side) {
                push(ShapeKey::Palm { side });
                for finger in HandPart::ALL {
                    for link in 0..phalanx_count(finger) {
                        push(ShapeKey::Phalanx { side, finger, link });
                    }
                }
            } else {
                for index in 0..HAND_BLOCKS {
                    push(ShapeKey::HandBlock { side, index });
                }
            }

            if parts.arm_covers(side) {
                push(ShapeKey::Cover(Cover::Palm(side)));
                push(ShapeKey::Cover(Cover::LowerArm(side)));
                push(ShapeKey::Cover(Cover::UpperArm(side)));
            }
        }

        let head_links = if parts.head { HEAD_LINKS } else { 1 };
        for index in 0..head_links {
            entries.push((SubSpace::Head, ShapeKey::HeadLink { index }));
        }

        let leg_links = if parts.legs { LEG_LINKS } else { 1 };
        for side in Side::BOTH {
            for index in 0..leg_links {
                entries.push((SubSpace::Legs, ShapeKey::LegLink { side, index }));
            }
            if parts.legs_covers {
                entries.push((SubSpace::Legs, ShapeKey::Cover(Cover::UpperLeg(side))));
                entries.push((SubSpace::Legs, ShapeKey::Cover(Cover::LowerLeg(side))));
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[(SubSpace, ShapeKey)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shapes placed in `space`.
    pub fn in_space(&self, space: SubSpace) -> impl Iterator<Item = ShapeKey> + '_ {
        self.entries
            .iter()
            .filter(move |(s, _)| *s == space)
            .map(|(_, key)| *key)
    }
}

// ---------------------------------------------------------------------------
// ShapeRegistry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegisteredShape {
    key: ShapeKey,
    space: SubSpace,
    name: String,
}

/// Handle tables of one skeleton instance.
///
/// Shape handles are assigned in catalogue order starting at zero; space
/// handles follow [`SubSpace::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeRegistry {
    shapes: HashMap<ShapeHandle, RegisteredShape>,
    by_key: HashMap<ShapeKey, ShapeHandle>,
    spaces: HashMap<SpaceHandle, SubSpace>,
}

impl ShapeRegistry {
    pub fn from_catalog(catalog: &ShapeCatalog) -> Self {
        let mut registry = Self::default();
        for (id, space) in (0u32..).zip(SubSpace::ALL) {
            registry.spaces.insert(SpaceHandle(id), space);
        }
        for (id, (space, key)) in (0u32..).zip(catalog.entries()) {
            let handle = ShapeHandle(id);
            registry.shapes.insert(
                handle,
                RegisteredShape {
                    key: *key,
                    space: *space,
                    name: key.debug_name(),
                },
            );
            registry.by_key.insert(*key, handle);
        }
        registry
    }

    pub fn shape(&self, handle: ShapeHandle) -> Option<ShapeKey> {
        self.shapes.get(&handle).map(|s| s.key)
    }

    /// Sub-space the shape was created in.
    pub fn shape_space(&self, handle: ShapeHandle) -> Option<SubSpace> {
        self.shapes.get(&handle).map(|s| s.space)
    }

    pub fn handle(&self, key: &ShapeKey) -> Option<ShapeHandle> {
        self.by_key.get(key).copied()
    }

    pub fn space(&self, handle: SpaceHandle) -> Option<SubSpace> {
        self.spaces.get(&handle).copied()
    }

    pub fn space_handle(&self, space: SubSpace) -> Option<SpaceHandle> {
        self.spaces
            .iter()
            .find(|(_, s)| **s == space)
            .map(|(h, _)| *h)
    }

    pub fn debug_name(&self, handle: ShapeHandle) -> Option<&str> {
        self.shapes.get(&handle).map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// All shape handles in ascending order with their sub-space.
    pub fn handles(&self) -> Vec<(SpaceHandle, ShapeHandle)> {
        let mut handles: Vec<(SpaceHandle, ShapeHandle)> = self
            .shapes
            .iter()
            .filter_map(|(h, s)| self.space_handle(s.space).map(|sp| (sp, *h)))
            .collect();
        handles.sort_by_key(|(_, h)| *h);
        handles
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
