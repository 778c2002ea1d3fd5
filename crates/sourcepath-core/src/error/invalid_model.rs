use super::Error;

/// Error when a conceptual model cannot be linked.
///
/// This occurs when:
/// - A class or property name is declared twice
/// - A supertype or association end names something that does not exist
/// - A property is claimed by more than one association
#[derive(Debug)]
pub(super) struct InvalidModel {
    message: Box<str>,
}

impl std::error::Error for InvalidModel {}

impl core::fmt::Display for InvalidModel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid model: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid model error.
    pub fn invalid_model(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidModel(InvalidModel {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid model error.
    pub fn is_invalid_model(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidModel(_))
    }
}
