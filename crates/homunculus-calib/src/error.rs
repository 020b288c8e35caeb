//! Error types for calibration loading.

use std::path::PathBuf;

/// Errors that abort skeleton assembly while loading the calibration file.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    /// The calibration file does not exist.
    #[error("could not find calibration file {0}")]
    FileNotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The content is not valid TOML or a group has the wrong shape.
    #[error("calibration parse error: {0}")]
    Parse(String),

    /// A required group is absent.
    #[error("missing calibration group: {0}")]
    MissingGroup(&'static str),

    /// A group does not hold the number of points its chain needs.
    #[error("group {group} holds {got} points, expected {expected}")]
    WrongCount {
        group: &'static str,
        expected: usize,
        got: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate in {group}[{index}]")]
    NonFinite { group: &'static str, index: usize },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
