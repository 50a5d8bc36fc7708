use std::fmt;
use std::path::PathBuf;

/// All errors that can surface from the harness.
#[derive(Debug)]
pub enum XorError {
    /// Command-line arguments failed to parse or validate.
    InvalidArgs(String),
    /// A device string did not name a known placement.
    InvalidDevice(String),
    /// A configuration file failed to load or save.
    Config { path: PathBuf, reason: String },
    /// A parameter record could not be restored from the given path.
    Restore { path: PathBuf, reason: String },
    /// A restored parameter does not match the shape declared by the config.
    ShapeMismatch {
        param: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    /// An underlying record (de)serialization error.
    Record(burn::record::RecorderError),
    /// An underlying I/O error not covered by the above variants.
    Io(std::io::Error),
}

impl fmt::Display for XorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgs(msg) => write!(f, "invalid arguments: {msg}"),
            Self::InvalidDevice(msg) => write!(f, "invalid device: {msg}"),
            Self::Config { path, reason } => {
                write!(f, "config {}: {reason}", path.display())
            }
            Self::Restore { path, reason } => {
                write!(f, "cannot restore parameters from {}: {reason}", path.display())
            }
            Self::ShapeMismatch {
                param,
                expected,
                found,
            } => {
                write!(
                    f,
                    "restored parameter `{param}` has shape {found:?}, expected {expected:?}"
                )
            }
            Self::Record(e) => write!(f, "record error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for XorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for XorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<burn::record::RecorderError> for XorError {
    fn from(e: burn::record::RecorderError) -> Self {
        Self::Record(e)
    }
}

impl From<pico_args::Error> for XorError {
    fn from(e: pico_args::Error) -> Self {
        Self::InvalidArgs(e.to_string())
    }
}
