//! Control-mode dispatch of joint commands.
//!
//! Every step, [`ControlModeDispatcher`] walks the six actuated regions in a
//! fixed order and forwards each pending [`ActuatorCommand`] to the engine
//! through the [`JointActuators`] seam, either as a torque increment or as a
//! target velocity depending on the region's control-mode table.
//!
//! # Example
//!
//! ```
//! use homunculus_actuator::prelude::*;
//! use homunculus_core::types::BodyRegion;
//!
//! let mut tables = ControlModeTables::default();
//! tables.set(BodyRegion::Torso, vec![ControlMode::Torque; 5]);
//!
//! let mut commands = CommandBuffer::default();
//! commands.set_torque(BodyRegion::Torso, 0, 1.5).unwrap();
//! assert_eq!(commands.region(BodyRegion::Torso)[0].torque, 1.5);
//! ```

pub mod command;
pub mod dispatch;
pub mod layout;
pub mod mode;

use bevy::prelude::*;

pub use command::{ActuatorCommand, CommandBuffer};
pub use dispatch::{ControlModeDispatcher, JointActuators, JointRef};
pub use layout::{JointSlot, region_slots};
pub use mode::{ControlMode, ControlModeSource, ControlModeTables};

// ---------------------------------------------------------------------------
// HomunculusActuatorPlugin
// ---------------------------------------------------------------------------

/// Inserts an empty [`CommandBuffer`] and [`ControlModeTables`].
///
/// The system that consumes them is registered by the physics plugin, which
/// owns the [`JointActuators`] implementation.
pub struct HomunculusActuatorPlugin;

impl Plugin for HomunculusActuatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CommandBuffer>()
            .init_resource::<ControlModeTables>();
    }
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        HomunculusActuatorPlugin,
        command::{ActuatorCommand, CommandBuffer},
        dispatch::{ControlModeDispatcher, JointActuators, JointRef},
        layout::JointSlot,
        mode::{ControlMode, ControlModeSource, ControlModeTables},
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
