//! Tactile side of the homunculus shell.
//!
//! - [`touch`]: normalized contact-force readings per touch-sensitive body
//! - [`shapes`]: collision-shape catalogue and per-skeleton handle registry
//! - [`classify`]: collision to skin-region classification
//! - [`activation`]: canned taxel-activation vectors per skin patch
//!
//! Nothing here talks to the physics engine directly. The engine is reached
//! through [`ContactProbe`], and shape handles come from the
//! [`ShapeRegistry`] of the skeleton being simulated.

pub mod activation;
pub mod classify;
pub mod shapes;
pub mod touch;

pub use activation::{SkinActivationVectors, SkinPatch};
pub use classify::{SkinClassification, SkinRegionClassifier};
pub use shapes::{Cover, ShapeCatalog, ShapeHandle, ShapeKey, ShapeRegistry, SpaceHandle};
pub use touch::{
    AttachedJoint, BodyId, ContactFeedback, ContactForceSensor, ContactProbe, JointKind,
    TOUCH_SENSOR_MAX_FORCE, TouchSensorMap, touch_value,
};

use homunculus_core::config::PartsConfig;

/// Catalogue, registry and classifier for one parts configuration.
pub fn classifier_for_parts(parts: PartsConfig) -> SkinRegionClassifier {
    let catalog = ShapeCatalog::for_parts(&parts);
    SkinRegionClassifier::new(parts, ShapeRegistry::from_catalog(&catalog))
}

pub mod prelude {
    pub use crate::{
        activation::{SkinActivationVectors, SkinPatch},
        classifier_for_parts,
        classify::{SkinClassification, SkinRegionClassifier},
        shapes::{ShapeCatalog, ShapeHandle, ShapeKey, ShapeRegistry, SpaceHandle},
        touch::{BodyId, ContactFeedback, ContactForceSensor, ContactProbe, TouchSensorMap},
    };
}
