use super::Error;

/// Error when the binding graph is asked for something it cannot have.
///
/// This occurs when:
/// - A table name resolves to neither the primary table nor a registered
///   secondary table
/// - A synthetic-only binding is built from a non-synthetic attribute
/// - A plural binding is built for an attribute of a different plural nature
/// - Verification finds a dangling or mismatched reference
///
/// These are defects in the construction sequence, not transient conditions.
#[derive(Debug)]
pub(super) struct InternalConsistencyError {
    message: Box<str>,
}

impl std::error::Error for InternalConsistencyError {}

impl core::fmt::Display for InternalConsistencyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "internal consistency failure: {}", self.message)
    }
}

impl Error {
    /// Creates an internal consistency error.
    pub fn internal_consistency(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InternalConsistency(
            InternalConsistencyError {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an internal consistency error.
    pub fn is_internal_consistency(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InternalConsistency(_))
    }
}
