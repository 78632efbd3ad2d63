//! The fixed bibliographic schema and the resolved name/value pairs written for an entry.

use std::borrow::Cow;

use serde::Deserialize;

/// Separator placed between the names of a multi-valued field.
pub const NAME_SEPARATOR: &str = " and ";

/// The value of a schema field as stored on [`Fields`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A single string value.
    Text(&'a str),
    /// An ordered list of names, such as authors or editors.
    Names(&'a [String]),
}

impl<'a> FieldValue<'a> {
    /// A value is present when its string, or its list, is not empty.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Names(names) => !names.is_empty(),
        }
    }

    /// The text written for this value, names are joined in the order they were given.
    #[must_use]
    pub fn joined(&self) -> Cow<'a, str> {
        match *self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Names([name]) => Cow::Borrowed(name.as_str()),
            Self::Names(names) => Cow::Owned(names.join(NAME_SEPARATOR)),
        }
    }
}

trait AsFieldValue {
    fn as_field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for String {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl AsFieldValue for Vec<String> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Names(self)
    }
}

/// An entry field which is essentially a key value pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field<'a> {
    /// Name of the entry field.
    pub name: Cow<'a, str>,
    /// Value of the entry field, multi-valued fields are already joined.
    pub value: Cow<'a, str>,
}

impl<'a> Field<'a> {
    /// The `&str` representation of the `value` field.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<'a> From<(&'static str, FieldValue<'a>)> for Field<'a> {
    fn from((name, value): (&'static str, FieldValue<'a>)) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value: value.joined(),
        }
    }
}

impl<'a> From<(&'a String, &'a String)> for Field<'a> {
    fn from((name, value): (&'a String, &'a String)) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value: Cow::Borrowed(value),
        }
    }
}

macro_rules! field_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident as $name:literal) => {
        $name
    };
}

macro_rules! fields_impl {
    ($(
        $(#[$comment:meta])*
        $field:ident $(as $name:literal)?: $ty:ty
    ),+ $(,)?) => {
        /// The common BibTeX field types.
        ///
        /// A field is present when its value is not empty, empty fields are never written. The
        /// order the fields are declared in is the order they are written in.
        ///
        /// See <https://en.wikipedia.org/wiki/BibTeX#Field_types> for the common field types.
        #[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
        #[serde(default)]
        pub struct Fields {
            $(
                $(#[$comment])*
                $(#[serde(rename = $name)])?
                pub $field: $ty,
            )+
        }

        /// Names of the schema fields in the order they are written.
        pub const SCHEMA: &[&str] = &[$(field_name!($field $(as $name)?),)+];

        impl Fields {
            /// Every schema field paired with its BibTeX name, in the order they are written.
            ///
            /// Empty fields are included, use [`FieldValue::is_present`] to skip them.
            #[must_use]
            pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldValue<'_>)> {
                [$((field_name!($field $(as $name)?), self.$field.as_field_value()),)+].into_iter()
            }

            /// Searches for the schema field that matches `name`.
            #[must_use]
            pub fn get(&self, name: &str) -> Option<FieldValue<'_>> {
                match name {
                    $(field_name!($field $(as $name)?) => Some(self.$field.as_field_value()),)+
                    _ => None,
                }
            }
        }
    };
}

fields_impl! {
    /// Partial or full address of the publisher, often just the city.
    address: String,
    /// Authors of the cited material.
    author: Vec<String>,
    /// Title of the book when only part of it is cited.
    book_title as "booktitle": String,
    /// Chapter number the citation is made from.
    chapter: String,
    /// Edition of a book, usually in long form such as "Second".
    edition: String,
    /// Editors of the cited material.
    editor: Vec<String>,
    /// Publishing method when it was not a standard one.
    how_published as "howpublished": String,
    /// Institution involved in the cited material that is not the publisher.
    institution: String,
    /// Journal or magazine the citation was taken from.
    journal: String,
    /// Overrides the alphabetical ordering of entries.
    key: String,
    /// Month of publication, or of creation for unpublished material.
    month: String,
    /// Any additional information.
    note: String,
    /// Issue number of a journal, magazine, or tech-report.
    number: String,
    /// Conference sponsor.
    organization: String,
    /// Page numbers, separated by commas or double-hyphens.
    pages: String,
    /// Name of the publisher.
    publisher: String,
    /// School where a thesis was written.
    school: String,
    /// Series of books the cited material was published in.
    series: String,
    /// Title of the cited material.
    title: String,
    /// Additional categorisation of the publication.
    kind as "type": String,
    /// Volume of a journal or multi-volume book.
    volume: String,
    /// Year of publication, or of creation for unpublished material.
    year: String,
}

impl Fields {
    /// The schema fields that are present, in the order they are written.
    #[must_use]
    pub fn present(&self) -> impl Iterator<Item = Field<'_>> {
        self.iter()
            .filter(|(_, value)| value.is_present())
            .map(Field::from)
    }

    /// Returns true when no schema field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// Returns true when `name` is one of the fixed schema fields.
#[must_use]
pub fn is_schema_field(name: &str) -> bool {
    SCHEMA.iter().any(|schema_name| *schema_name == name)
}
