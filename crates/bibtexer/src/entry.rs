use std::collections::HashMap;

use serde::Deserialize;

use crate::{
    fields::{Field, Fields},
    Error, ErrorKind,
};

/// A bibliographic record together with the entry type and citation key that BibTeX needs.
///
/// Entries are not validated when they are built, an empty entry type or citation key is only
/// reported once the entry is encoded.
///
/// # Examples
///
/// ```
/// use bibtexer::{Entry, Fields};
///
/// let entry = Entry::new("book", "devOpsTroubleshooting")
///     .with_fields(Fields {
///         author: vec!["Kyle Rankin".to_owned()],
///         title: "DevOps Troubleshooting: Linux Server Best Practices".to_owned(),
///         year: "2012".to_owned(),
///         ..Fields::default()
///     })
///     .with_additional_field("isbn", "9780321832047");
///
/// assert_eq!("book", entry.entry_type());
/// assert_eq!(Some("9780321832047"), entry.additional_field("isbn"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Entry {
    entry_type: String,
    citation_key: String,
    fields: Fields,
    additional_fields: HashMap<String, String>,
}

impl Entry {
    /// Creates an entry with no fields set.
    #[must_use]
    pub fn new<T, K>(entry_type: T, citation_key: K) -> Self
    where
        T: Into<String>,
        K: Into<String>,
    {
        Self {
            entry_type: entry_type.into(),
            citation_key: citation_key.into(),
            fields: Fields::default(),
            additional_fields: HashMap::new(),
        }
    }

    /// Replaces the schema fields of this entry.
    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Adds a field outside of the fixed schema, replacing any earlier value with the same name.
    #[must_use]
    pub fn with_additional_field<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.additional_fields.insert(name.into(), value.into());
        self
    }

    /// Replaces every field outside of the fixed schema.
    #[must_use]
    pub fn with_additional_fields(mut self, fields: HashMap<String, String>) -> Self {
        self.additional_fields = fields;
        self
    }

    /// The BibTeX class of the entry, such as `book` or `article`.
    #[must_use]
    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    /// The key used to cite this entry.
    #[must_use]
    pub fn citation_key(&self) -> &str {
        &self.citation_key
    }

    /// The fixed schema fields.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// The fields outside of the fixed schema, in no particular order.
    #[must_use]
    pub const fn additional_fields(&self) -> &HashMap<String, String> {
        &self.additional_fields
    }

    /// Searches the additional fields for `name`.
    #[must_use]
    pub fn additional_field(&self, name: &str) -> Option<&str> {
        self.additional_fields.get(name).map(String::as_str)
    }

    /// Returns the [`Field`]s that are written for this entry, in the order they are written.
    ///
    /// Present schema fields come first in their canonical order, then the present additional
    /// fields sorted by name. Additional fields are written as given even if the name matches a
    /// schema field.
    #[must_use]
    pub fn ordered_fields(&self) -> Vec<Field<'_>> {
        let mut additional: Vec<_> = self
            .additional_fields
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(Field::from)
            .collect();
        additional.sort_by(|a, b| a.name.cmp(&b.name));

        let mut fields: Vec<_> = self.fields.present().collect();
        fields.extend(additional);
        fields
    }

    /// Checks the entry type and citation key, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MissingEntryType`] when the entry type is empty and
    /// [`ErrorKind::MissingCitationKey`] when the citation key is empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.entry_type.is_empty() {
            return Err(Error::new(
                ErrorKind::MissingEntryType,
                "an entry type must be specified in order for the entry to be encoded to BibTeX",
            ));
        }
        if self.citation_key.is_empty() {
            return Err(Error::new(
                ErrorKind::MissingCitationKey,
                "a citation key must be specified in order for the entry to be encoded to BibTeX",
            ));
        }
        Ok(())
    }
}
