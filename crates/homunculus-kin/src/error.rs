use thiserror::Error;

/// Errors raised while posing a kinematic chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KinematicsError {
    #[error("angle count mismatch: chain has {expected} links, got {got}")]
    AngleCount { expected: usize, got: usize },

    #[error("link index {index} out of range ({len} links)")]
    LinkOutOfRange { index: usize, len: usize },

    #[error("non-finite joint angle at link {0}")]
    NonFiniteAngle(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            KinematicsError::AngleCount {
                expected: 10,
                got: 7
            }
            .to_string(),
            "angle count mismatch: chain has 10 links, got 7"
        );
        assert_eq!(
            KinematicsError::LinkOutOfRange { index: 12, len: 10 }.to_string(),
            "link index 12 out of range (10 links)"
        );
        assert_eq!(
            KinematicsError::NonFiniteAngle(3).to_string(),
            "non-finite joint angle at link 3"
        );
    }
}
