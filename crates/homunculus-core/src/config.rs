use std::path::{Path, PathBuf};

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Side;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_physics_dt() -> f64 {
    0.01
}
const fn default_substeps() -> usize {
    1
}
const fn default_gravity() -> [f32; 3] {
    [0.0, -9.8, 0.0]
}
const fn default_true() -> bool {
    true
}
fn default_calibration() -> PathBuf {
    PathBuf::from("joints.toml")
}

/// Height the whole skeleton is raised by when elevation is enabled.
pub const ELEVATION_OFFSET: f64 = 0.2;

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// Physics stepping configuration.
///
/// The world frame is y-up, matching the engine-side anchor convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct SimConfig {
    /// Physics timestep in seconds (default: 0.01).
    #[serde(default = "default_physics_dt")]
    pub physics_dt: f64,

    /// Engine substeps per `Update` (default: 1).
    #[serde(default = "default_substeps")]
    pub substeps: usize,

    /// Gravity vector [x, y, z] in m/s^2.
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            physics_dt: default_physics_dt(),
            substeps: default_substeps(),
            gravity: default_gravity(),
        }
    }
}

impl SimConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.physics_dt.is_nan() || self.physics_dt <= 0.0 {
            return Err(ConfigError::InvalidPhysicsDt(self.physics_dt));
        }
        if self.substeps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "substeps".into(),
                message: "must be >= 1".into(),
            });
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "gravity".into(),
                message: "must be finite".into(),
            });
        }
        Ok(())
    }

    /// Physics rate in Hz.
    pub fn physics_hz(&self) -> f64 {
        1.0 / self.physics_dt
    }
}

// ---------------------------------------------------------------------------
// PartsConfig
// ---------------------------------------------------------------------------

/// Optional body parts and covers enabled for one skeleton instance.
///
/// The skeleton builder and the skin classifier must be handed the same
/// instance: the set of collision shapes depends on these flags.
/// A disabled part is replaced by coarse placeholder blocks, not removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Resource)]
pub struct PartsConfig {
    #[serde(default = "default_true")]
    pub legs: bool,
    #[serde(default = "default_true")]
    pub torso: bool,
    #[serde(default = "default_true")]
    pub left_arm: bool,
    #[serde(default = "default_true")]
    pub right_arm: bool,
    #[serde(default = "default_true")]
    pub left_hand: bool,
    #[serde(default = "default_true")]
    pub right_hand: bool,
    #[serde(default = "default_true")]
    pub head: bool,

    /// Raise the skeleton by [`ELEVATION_OFFSET`].
    #[serde(default)]
    pub elevation: bool,

    #[serde(default)]
    pub torso_covers: bool,
    #[serde(default)]
    pub left_arm_covers: bool,
    #[serde(default)]
    pub right_arm_covers: bool,
    #[serde(default)]
    pub legs_covers: bool,
}

impl Default for PartsConfig {
    fn default() -> Self {
        Self {
            legs: true,
            torso: true,
            left_arm: true,
            right_arm: true,
            left_hand: true,
            right_hand: true,
            head: true,
            elevation: false,
            torso_covers: false,
            left_arm_covers: false,
            right_arm_covers: false,
            legs_covers: false,
        }
    }
}

impl PartsConfig {
    /// Every optional part switched off, no covers.
    pub const fn minimal() -> Self {
        Self {
            legs: false,
            torso: false,
            left_arm: false,
            right_arm: false,
            left_hand: false,
            right_hand: false,
            head: false,
            elevation: false,
            torso_covers: false,
            left_arm_covers: false,
            right_arm_covers: false,
            legs_covers: false,
        }
    }

    /// Build a configuration from a bit mask over the twelve flags, in
    /// field declaration order. Used to enumerate combinations.
    pub fn from_bits(bits: u16) -> Self {
        let on = |i: u16| bits & (1 << i) != 0;
        Self {
            legs: on(0),
            torso: on(1),
            left_arm: on(2),
            right_arm: on(3),
            left_hand: on(4),
            right_hand: on(5),
            head: on(6),
            elevation: on(7),
            torso_covers: on(8),
            left_arm_covers: on(9),
            right_arm_covers: on(10),
            legs_covers: on(11),
        }
    }

    /// Number of distinct flag combinations accepted by [`from_bits`](Self::from_bits).
    pub const COMBINATIONS: u16 = 1 << 12;

    pub const fn arm(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_arm,
            Side::Right => self.right_arm,
        }
    }

    pub const fn hand(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_hand,
            Side::Right => self.right_hand,
        }
    }

    pub const fn arm_covers(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_arm_covers,
            Side::Right => self.right_arm_covers,
        }
    }

    /// Vertical offset applied to every anchor placed in the world.
    pub const fn elevation_offset(&self) -> f64 {
        if self.elevation { ELEVATION_OFFSET } else { 0.0 }
    }

    /// Validate flag combinations.
    ///
    /// Every region toggles independently. An articulated hand on a
    /// disabled arm hangs from the arm placeholder blocks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RobotConfig
// ---------------------------------------------------------------------------

/// Everything needed to assemble one skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct RobotConfig {
    /// Path of the joint calibration file. Relative paths are resolved
    /// against the directory of the robot file by [`from_file`](Self::from_file).
    #[serde(default = "default_calibration")]
    pub calibration: PathBuf,

    #[serde(default)]
    pub sim: SimConfig,

    #[serde(default)]
    pub parts: PartsConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            calibration: default_calibration(),
            sim: SimConfig::default(),
            parts: PartsConfig::default(),
        }
    }
}

impl RobotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim.validate()?;
        self.parts.validate()
    }

    /// Parse and validate a robot description from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        if config.calibration.is_relative()
            && let Some(dir) = path.parent()
        {
            config.calibration = dir.join(&config.calibration);
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
