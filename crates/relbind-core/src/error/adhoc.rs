use super::Error;

/// A free-form message, used for context added with a plain string.
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an error carrying only a formatted message.
    pub fn from_args(message: core::fmt::Arguments<'_>) -> Error {
        let message = match message.as_str() {
            Some(message) => message.into(),
            None => message.to_string().into(),
        };
        Error::from(super::ErrorKind::Adhoc(AdhocError { message }))
    }
}
