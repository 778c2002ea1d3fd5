use super::Error;

/// Error when an encoding-info overlay cannot be loaded.
#[derive(Debug)]
pub(super) struct InvalidOverlay {
    message: Box<str>,
}

impl std::error::Error for InvalidOverlay {}

impl core::fmt::Display for InvalidOverlay {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid encoding info: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid overlay error.
    pub fn invalid_overlay(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidOverlay(InvalidOverlay {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid overlay error.
    pub fn is_invalid_overlay(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidOverlay(_))
    }
}
