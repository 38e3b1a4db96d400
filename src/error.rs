use std::{error::Error, fmt, io};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, PhiErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum PhiErr {
    /// A construction or training parameter is out of its valid range.
    InvalidParameter {
        what: &'static str,
        reason: String,
    },
    /// An input's dimension doesn't match the network's.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    Io(io::Error),
    Config(serde_json::Error),
}

impl PhiErr {
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            what,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PhiErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhiErr::InvalidParameter { what, reason } => {
                write!(f, "invalid parameter {what}: {reason}")
            }
            PhiErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            PhiErr::Io(e) => write!(f, "io error: {e}"),
            PhiErr::Config(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl Error for PhiErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PhiErr::Io(e) => Some(e),
            PhiErr::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PhiErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PhiErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<PhiErr> for io::Error {
    fn from(value: PhiErr) -> Self {
        match value {
            PhiErr::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}
