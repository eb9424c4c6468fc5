use std::fmt;

/// Errors surfaced while configuring or mounting a field.
/// The simulation itself never fails once mounted.
#[derive(Debug)]
pub enum FieldError {
    /// The host could not supply a 2D drawing surface.
    NoSurface,
    /// Configuration parsed but is inconsistent.
    InvalidConfig(String),
    /// Configuration JSON could not be parsed.
    ConfigParse(serde_json::Error),
    /// A host primitive (frame request, listener registration) failed.
    Host(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NoSurface => write!(f, "no 2D drawing surface available"),
            FieldError::InvalidConfig(msg) => write!(f, "invalid field config: {}", msg),
            FieldError::ConfigParse(e) => write!(f, "failed to parse field config: {}", e),
            FieldError::Host(msg) => write!(f, "host error: {}", msg),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(e: serde_json::Error) -> Self {
        FieldError::ConfigParse(e)
    }
}
