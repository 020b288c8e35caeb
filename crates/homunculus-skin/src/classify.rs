//! Collision-shape to skin-region classification.
//!
//! Dispatch is two-level: the sub-space picks a handler, the handler matches
//! the shape identity. Which shapes exist depends on the [`PartsConfig`] the
//! skeleton was assembled with, so the classifier is built from that same
//! configuration and the registry of the same skeleton.

use serde::{Deserialize, Serialize};

use homunculus_core::config::PartsConfig;
use homunculus_core::types::{BodyPart, HandPart, SkinPart, SubSpace};

use crate::shapes::{Cover, ShapeHandle, ShapeKey, ShapeRegistry, SpaceHandle};

// ---------------------------------------------------------------------------
// SkinClassification
// ---------------------------------------------------------------------------

/// Semantic region of one collision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkinClassification {
    pub skin_part: SkinPart,
    pub body_part: BodyPart,
    /// Finger identity, set for fingertips only.
    pub hand_part: Option<HandPart>,
    pub is_cover: bool,
    pub is_fingertip: bool,
}

impl SkinClassification {
    /// `{UNKNOWN, UNKNOWN}`.
    pub const UNKNOWN: Self = Self {
        skin_part: SkinPart::Unknown,
        body_part: BodyPart::Unknown,
        hand_part: None,
        is_cover: false,
        is_fingertip: false,
    };

    pub const fn new(skin_part: SkinPart, body_part: BodyPart) -> Self {
        Self {
            skin_part,
            body_part,
            hand_part: None,
            is_cover: false,
            is_fingertip: false,
        }
    }

    #[must_use]
    pub const fn cover(mut self) -> Self {
        self.is_cover = true;
        self
    }

    #[must_use]
    pub const fn fingertip(mut self, finger: HandPart) -> Self {
        self.hand_part = Some(finger);
        self.is_fingertip = true;
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.skin_part == SkinPart::Unknown && self.body_part == BodyPart::Unknown
    }
}

// ---------------------------------------------------------------------------
// SkinRegionClassifier
// ---------------------------------------------------------------------------

type Handler = fn(&SkinRegionClassifier, SubSpace, Option<ShapeKey>) -> SkinClassification;

const fn handler(space: SubSpace) -> Handler {
    match space {
        SubSpace::Torso => classify_torso,
        SubSpace::LeftArm | SubSpace::RightArm => classify_arm,
        SubSpace::Head => classify_head,
        SubSpace::Legs => classify_legs,
    }
}

/// Maps `(space, shape)` handles of one skeleton to a [`SkinClassification`].
///
/// Classification is a pure read of the parts flags and the registry, so it
/// may be called from concurrent collision callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinRegionClassifier {
    parts: PartsConfig,
    registry: ShapeRegistry,
}

impl SkinRegionClassifier {
    pub const fn new(parts: PartsConfig, registry: ShapeRegistry) -> Self {
        Self { parts, registry }
    }

    pub const fn parts(&self) -> &PartsConfig {
        &self.parts
    }

    pub const fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Classify a collision with `shape` inside `space`.
    ///
    /// An unknown space, or a shape no arm rule accepts, is logged as an
    /// error and yields [`SkinClassification::UNKNOWN`].
    pub fn classify(&self, space: SpaceHandle, shape: ShapeHandle) -> SkinClassification {
        let Some(sub_space) = self.registry.space(space) else {
            tracing::error!(space = space.0, "collision in unknown space");
            return SkinClassification::UNKNOWN;
        };
        let key = self.registry.shape(shape);
        let result = self.classify_key(sub_space, key);
        if result.is_unknown() && sub_space.arm_side().is_some() {
            tracing::error!(
                shape = shape.0,
                name = self.registry.debug_name(shape).unwrap_or("unregistered"),
                "unknown skin part and body part on collision in {sub_space}"
            );
        }
        result
    }

    /// Classify a resolved shape identity. `None` stands for a handle the
    /// registry does not know.
    pub fn classify_key(&self, space: SubSpace, key: Option<ShapeKey>) -> SkinClassification {
        handler(space)(self, space, key)
    }
}

/// Every torso-space contact is front torso skin. Only the torso cover raises
/// the cover flag; the waist carries no skin.
fn classify_torso(
    classifier: &SkinRegionClassifier,
    _space: SubSpace,
    key: Option<ShapeKey>,
) -> SkinClassification {
    let base = SkinClassification::new(SkinPart::FrontTorso, BodyPart::Torso);
    if classifier.parts.torso_covers && key == Some(ShapeKey::Cover(Cover::Torso)) {
        base.cover()
    } else {
        base
    }
}

fn classify_arm(
    classifier: &SkinRegionClassifier,
    space: SubSpace,
    key: Option<ShapeKey>,
) -> SkinClassification {
    let (Some(side), Some(key)) = (space.arm_side(), key) else {
        return SkinClassification::UNKNOWN;
    };
    let parts = &classifier.parts;
    let body = side.arm_body_part();
    let hand = SkinClassification::new(side.hand_skin(), body);
    let forearm = SkinClassification::new(side.forearm_skin(), body);
    let upper_arm = SkinClassification::new(side.upper_arm_skin(), body);

    if parts.hand(side) {
        match key {
            ShapeKey::Palm { side: s } if s == side => return hand,
            ShapeKey::Phalanx { side: s, finger, .. } if s == side => {
                return if key.is_fingertip() {
                    hand.fingertip(finger)
                } else {
                    hand
                };
            }
            _ => {}
        }
    } else if let ShapeKey::HandBlock { side: s, .. } = key
        && s == side
    {
        return hand;
    }

    if parts.arm(side) {
        match key {
            ShapeKey::UpperArmLink { side: s, .. } if s == side => return upper_arm,
            ShapeKey::ForearmLink { side: s } if s == side => return forearm,
            _ => {}
        }
    } else if let ShapeKey::ArmBlock { side: s, index } = key
        && s == side
    {
        match index {
            0..=2 => return upper_arm,
            3 => return forearm,
            _ => {}
        }
    }

    if parts.arm_covers(side)
        && let ShapeKey::Cover(cover) = key
    {
        match cover {
            Cover::Palm(s) if s == side => return hand.cover(),
            Cover::LowerArm(s) if s == side => return forearm.cover(),
            Cover::UpperArm(s) if s == side => return upper_arm.cover(),
            _ => {}
        }
    }

    SkinClassification::UNKNOWN
}

/// Head skin is not modelled; the body part is still reported.
fn classify_head(
    _classifier: &SkinRegionClassifier,
    _space: SubSpace,
    _key: Option<ShapeKey>,
) -> SkinClassification {
    SkinClassification::new(SkinPart::Unknown, BodyPart::Head)
}

/// Leg skin is not modelled and the leg side is not resolved.
fn classify_legs(
    _classifier: &SkinRegionClassifier,
    _space: SubSpace,
    _key: Option<ShapeKey>,
) -> SkinClassification {
    SkinClassification::UNKNOWN
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
