//! Writing entries to a byte sink in the BibTeX format.

use std::io::Write;

use log::{debug, trace};

use crate::{fields::Fields, Entry, Error, ErrorKind};

/// The capability to write self to a sink as a single BibTeX entry.
pub trait EncodeBibTeX {
    /// Writes the BibTeX encoding of self to `writer`.
    ///
    /// # Errors
    ///
    /// Implementations should return an [`ErrorKind::Write`] error only when `writer` fails, any
    /// other kind must be returned before a single byte is written.
    fn encode_bibtex(&self, writer: &mut dyn Write) -> Result<(), Error>;
}

impl EncodeBibTeX for Entry {
    fn encode_bibtex(&self, writer: &mut dyn Write) -> Result<(), Error> {
        self.validate()?;

        write!(writer, "@{}{{{}", self.entry_type(), self.citation_key())?;
        for field in self.ordered_fields() {
            write!(writer, ",\n  {} = {{{}}}", field.name, field.value)?;
        }
        writer.write_all(b"\n}\n")?;
        Ok(())
    }
}

impl<T: EncodeBibTeX + ?Sized> EncodeBibTeX for &T {
    fn encode_bibtex(&self, writer: &mut dyn Write) -> Result<(), Error> {
        (**self).encode_bibtex(writer)
    }
}

impl<T: EncodeBibTeX + ?Sized> EncodeBibTeX for Box<T> {
    fn encode_bibtex(&self, writer: &mut dyn Write) -> Result<(), Error> {
        (**self).encode_bibtex(writer)
    }
}

/// The values an [`Encoder`] can be asked to encode.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// A value that can write itself as a BibTeX entry.
    Encodable(&'a dyn EncodeBibTeX),
    /// Bibliographic fields without an entry type or citation key, which cannot be written.
    Fields(&'a Fields),
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encodable(_) => f.write_str("Encodable(..)"),
            Self::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
        }
    }
}

impl<'a> From<&'a Entry> for Value<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self::Encodable(entry)
    }
}

impl<'a> From<&'a Fields> for Value<'a> {
    fn from(fields: &'a Fields) -> Self {
        Self::Fields(fields)
    }
}

/// An `Encoder` writes BibTeX entries to an output stream one after another.
///
/// The first write failure poisons the encoder: it is returned from the failing call and from every
/// call after it, without writing anything else to the stream. Entries that are rejected before
/// anything is written, such as an [`Entry`] without a citation key, do not poison the encoder.
///
/// # Examples
///
/// ```
/// use bibtexer::{Encoder, Entry, Fields};
///
/// let entry = Entry::new("book", "devOpsTroubleshooting").with_fields(Fields {
///     author: vec!["Kyle Rankin".to_owned()],
///     year: "2012".to_owned(),
///     ..Fields::default()
/// });
///
/// let mut encoder = Encoder::new(Vec::new());
/// encoder.encode(&entry)?;
///
/// let bib = String::from_utf8(encoder.into_inner()).unwrap();
/// assert_eq!(
///     "@book{devOpsTroubleshooting,\n  author = {Kyle Rankin},\n  year = {2012}\n}\n",
///     bib
/// );
/// # Ok::<(), bibtexer::Error>(())
/// ```
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
    err: Option<Error>,
}

impl<W: Write> Encoder<W> {
    /// Returns a new encoder that writes to `writer`.
    ///
    /// Nothing is written to `writer` until an entry is encoded.
    pub const fn new(writer: W) -> Self {
        Self { writer, err: None }
    }

    /// Writes the BibTeX encoding of `entry` to the stream.
    ///
    /// # Errors
    ///
    /// Returns the sticky write error if an earlier call failed to write. Otherwise returns
    /// [`ErrorKind::MissingEntryType`] or [`ErrorKind::MissingCitationKey`] without writing when
    /// the entry is missing either, or an [`ErrorKind::Write`] error when the stream fails.
    pub fn encode<T: EncodeBibTeX + ?Sized>(&mut self, entry: &T) -> Result<(), Error> {
        if let Some(err) = &self.err {
            trace!("Skipping entry as the encoder has already failed: {err}");
            return Err(err.clone());
        }

        match entry.encode_bibtex(&mut self.writer) {
            Err(err) if err.is_sticky() => {
                debug!("Write failed, no further entries will be written: {err}");
                self.err = Some(err.clone());
                Err(err)
            }
            Err(err) => {
                trace!("Entry rejected before writing: {err}");
                Err(err)
            }
            Ok(()) => {
                trace!("Entry written");
                Ok(())
            }
        }
    }

    /// Writes `value` to the stream when it is encodable.
    ///
    /// # Errors
    ///
    /// Returns the sticky write error if an earlier call failed to write, an
    /// [`ErrorKind::UnsupportedType`] error for values that cannot be written as an entry, or any
    /// error from [`Encoder::encode`].
    pub fn encode_value<'a, V: Into<Value<'a>>>(&mut self, value: V) -> Result<(), Error> {
        match value.into() {
            Value::Encodable(entry) => self.encode(entry),
            Value::Fields(_) => {
                if let Some(err) = &self.err {
                    return Err(err.clone());
                }
                trace!("Rejecting bibliographic fields without an entry type or citation key");
                Err(Error::new(
                    ErrorKind::UnsupportedType,
                    "bibliographic fields need an entry type and a citation key to be encoded",
                ))
            }
        }
    }

    /// The write error that poisoned this encoder, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Flushes the underlying stream.
    ///
    /// # Errors
    ///
    /// Returns the sticky error if the encoder already failed, a failed flush becomes the sticky
    /// error.
    pub fn flush(&mut self) -> Result<(), Error> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }
        self.writer.flush().map_err(|err| {
            let err = Error::from(err);
            self.err = Some(err.clone());
            err
        })
    }

    /// Gets a reference to the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Gets a mutable reference to the underlying writer.
    ///
    /// Writing to the stream directly may break the BibTeX output.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Unwraps this encoder, returning the underlying writer.
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Encodes a single entry into a [`String`].
///
/// # Errors
///
/// Returns [`ErrorKind::MissingEntryType`] or [`ErrorKind::MissingCitationKey`] when the entry is
/// missing either.
pub fn to_string<T: EncodeBibTeX + ?Sized>(entry: &T) -> Result<String, Error> {
    let mut encoder = Encoder::new(Vec::new());
    encoder.encode(entry)?;
    // every byte written came from a `str`
    Ok(String::from_utf8_lossy(&encoder.into_inner()).into_owned())
}
