use std::io::Write;

use bibtexer::{Encoder, Entry, Fields, Value};

use eyre::{eyre, Result, WrapErr};
use log::{trace, warn};
use serde_json::Value as Json;

/// A single record read from an input file.
#[derive(Debug, PartialEq)]
pub enum Record {
    /// An object with an `entry_type` or `citation_key` member.
    Entry(Entry),
    /// Any other object, read as bare bibliographic fields.
    Fields(Fields),
}

impl Record {
    pub fn from_json(json: Json) -> Result<Self> {
        let is_entry = match &json {
            Json::Object(map) => map.contains_key("entry_type") || map.contains_key("citation_key"),
            other => return Err(eyre!("Expected a JSON object but found `{other}`")),
        };

        if is_entry {
            serde_json::from_value(json)
                .map(Record::Entry)
                .wrap_err("Cannot read the object as a BibTeX entry")
        } else {
            serde_json::from_value(json)
                .map(Record::Fields)
                .wrap_err("Cannot read the object as bibliographic fields")
        }
    }

    fn as_value(&self) -> Value<'_> {
        match self {
            Record::Entry(entry) => entry.into(),
            Record::Fields(fields) => fields.into(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Record::Entry(entry) if entry.citation_key().is_empty() => {
                "entry without a citation key".to_owned()
            }
            Record::Entry(entry) => format!("entry '{}'", entry.citation_key()),
            Record::Fields(fields) if !fields.title.is_empty() => {
                format!("fields titled '{}'", fields.title)
            }
            Record::Fields(_) => "untitled fields".to_owned(),
        }
    }
}

/// Reads the records of a JSON document holding an array of objects.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let values: Vec<Json> =
        serde_json::from_str(json).wrap_err("Expected a JSON array of records")?;

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| Record::from_json(value).wrap_err_with(|| format!("Record #{}", i + 1)))
        .collect()
}

/// How many records were written and skipped.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
}

/// Encodes every record in order.
///
/// Records that cannot be encoded are skipped unless `strict` is set, a write failure always
/// stops the run.
pub fn encode_records<W: Write>(
    encoder: &mut Encoder<W>,
    records: &[Record],
    strict: bool,
    summary: &mut Summary,
) -> Result<()> {
    for record in records {
        trace!("Encoding {}", record.describe());
        match encoder.encode_value(record.as_value()) {
            Ok(()) => summary.written += 1,
            Err(err) if err.is_sticky() => {
                return Err(err).wrap_err("Cannot write BibTeX to the output");
            }
            Err(err) if strict => {
                return Err(err).wrap_err_with(|| format!("Cannot encode {}", record.describe()));
            }
            Err(err) => {
                warn!("Skipping {}: {err}", record.describe());
                summary.skipped += 1;
            }
        }
    }
    Ok(())
}
