use thiserror::Error;

/// Top-level error type for homunculus-core.
#[derive(Debug, Error)]
pub enum HomunculusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown body region id: {0} (expected 1..=6)")]
    UnknownRegion(u8),

    #[error("Joint index {index} out of range for {region} ({len} joints)")]
    JointOutOfRange {
        region: &'static str,
        index: usize,
        len: usize,
    },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid physics_dt: {0} (must be > 0)")]
    InvalidPhysicsDt(f64),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
