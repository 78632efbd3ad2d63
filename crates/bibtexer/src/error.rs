use std::sync::Arc;

pub(crate) type DynError = Arc<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur when encoding entries.
///
/// [`Error`] is cheap to clone so that an [`Encoder`](crate::Encoder) can hand back the same
/// write failure on every call after the first one.
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The entry has an empty entry type.
    MissingEntryType,
    /// The entry has an empty citation key.
    MissingCitationKey,
    /// The value handed to the encoder cannot be written as a BibTeX entry.
    UnsupportedType,
    /// The underlying sink failed to accept bytes.
    Write,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: None,
            source: Some(Arc::new(source)),
        }
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns true when this error poisons the encoder that produced it.
    #[must_use]
    pub const fn is_sticky(&self) -> bool {
        matches!(self.kind, ErrorKind::Write)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::MissingEntryType => f.write_str("Missing entry type")?,
            ErrorKind::MissingCitationKey => f.write_str("Missing citation key")?,
            ErrorKind::UnsupportedType => f.write_str("Unsupported type")?,
            ErrorKind::Write => f.write_str("Write error")?,
        };

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::wrap(ErrorKind::Write, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = Error::new(ErrorKind::MissingCitationKey, "entry 'book' has no key");

        assert_eq!(
            "Missing citation key: entry 'book' has no key",
            err.to_string()
        );
        assert!(!err.is_sticky());
    }

    #[test]
    fn io_error_becomes_sticky_write_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = Error::from(io);

        assert_eq!(ErrorKind::Write, err.kind());
        assert!(err.is_sticky());
        assert_eq!("Write error: caused by pipe closed", err.to_string());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn clones_share_the_same_source() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let copy = err.clone();

        let (a, b) = (err.source.unwrap(), copy.source.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
    }
}
