use super::Error;

/// Error when a source path string does not follow the path grammar.
#[derive(Debug)]
pub(super) struct InvalidPath {
    path: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidPath {}

impl core::fmt::Display for InvalidPath {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid source path `{}`: {}", self.path, self.reason)
    }
}

impl Error {
    /// Creates an invalid path error for `path`, explaining why it was
    /// rejected.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidPath(InvalidPath {
            path: path.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid path error.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidPath(_))
    }
}
