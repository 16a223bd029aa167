use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidHeaderValue { field: &'static str },
    DotSegment { field: &'static str },
    UnknownApiVariant { input: String },
    InvalidBaseUrl { input: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidHeaderValue { field } => {
                write!(f, "{field} contains characters not allowed in an HTTP header")
            }
            Self::DotSegment { field } => write!(f, "{field} must not be `.` or `..`"),
            Self::UnknownApiVariant { input } => write!(f, "unknown API type: {input}"),
            Self::InvalidBaseUrl { input, reason } => {
                write!(f, "invalid base URL {input}: {reason}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
