//! Record layouts, record building and positional decoding

use crate::field::{char_slice, encode_field, FieldKind, FieldSpec};
use crate::{Error, Result, RECORD_WIDTH};
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Record type code carried in the first two characters of every line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// `01`
    Header,
    /// `02`
    Detail,
    /// `03`
    Trailer,
    /// `04`
    Security,
    /// Anything else
    Unknown,
}

impl RecordType {
    /// Two-character code
    pub fn code(&self) -> &'static str {
        match self {
            RecordType::Header => "01",
            RecordType::Detail => "02",
            RecordType::Trailer => "03",
            RecordType::Security => "04",
            RecordType::Unknown => "??",
        }
    }

    /// Parse a code; unrecognised codes map to `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code {
            "01" => RecordType::Header,
            "02" => RecordType::Detail,
            "03" => RecordType::Trailer,
            "04" => RecordType::Security,
            _ => RecordType::Unknown,
        }
    }

    /// Record type of a line
    pub fn of_line(line: &str) -> Self {
        char_slice(line, 0, 2).map(Self::from_code).unwrap_or(RecordType::Unknown)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Ordered field layout for one record type
#[derive(Debug)]
pub struct Layout {
    /// Layout name (for diagnostics)
    pub name: &'static str,
    /// Record type written into the leading `record_type` field
    pub record_type: RecordType,
    /// Fields in order, starting with `record_type` at offset 0
    pub fields: &'static [FieldSpec],
}

impl Layout {
    /// Sum of all field widths
    pub fn width(&self) -> usize {
        self.fields.iter().map(|f| f.width).sum()
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Span needed to read every named field (fillers excluded)
    pub fn required_span(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.kind != FieldKind::Filler)
            .map(FieldSpec::end)
            .max()
            .unwrap_or(0)
    }

    /// Check fields are contiguous and add up to [`RECORD_WIDTH`]
    pub fn validate(&self) -> Result<()> {
        let mut offset = 0;
        for field in self.fields {
            if field.offset != offset {
                return Err(Error::LayoutWidth {
                    layout: self.name,
                    width: offset,
                });
            }
            offset = field.end();
        }
        if offset != RECORD_WIDTH {
            return Err(Error::LayoutWidth {
                layout: self.name,
                width: offset,
            });
        }
        Ok(())
    }

    /// Start building a record in this layout
    pub fn builder(&'static self) -> RecordBuilder {
        RecordBuilder::new(self)
    }

    /// Decode a line against this layout
    pub fn decode<'a>(&self, line: &'a str) -> Result<DecodedRecord<'a>> {
        decode_record(line, self.fields)
    }
}

/// Collects field values and renders a full-width record
#[derive(Debug)]
pub struct RecordBuilder {
    layout: &'static Layout,
    values: Vec<(&'static str, String)>,
}

impl RecordBuilder {
    /// New builder for `layout`
    pub fn new(layout: &'static Layout) -> Self {
        Self {
            layout,
            values: Vec::with_capacity(layout.fields.len()),
        }
    }

    /// Assign a field value
    pub fn set(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.values.push((field, value.into()));
        self
    }

    /// Render the record. Unset numeric fields are zero, unset text is blank.
    pub fn build(self) -> Result<String> {
        for (name, _) in &self.values {
            if self.layout.field(name).is_none() {
                return Err(Error::UnknownField {
                    layout: self.layout.name,
                    field: name,
                });
            }
        }

        let mut line = String::with_capacity(RECORD_WIDTH);
        for spec in self.layout.fields {
            let value = if spec.name == "record_type" {
                self.layout.record_type.code()
            } else {
                self.values
                    .iter()
                    .rev()
                    .find(|(name, _)| *name == spec.name)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or("")
            };
            line.push_str(&encode_field(spec, value)?);
        }

        let width = line.chars().count();
        if width != RECORD_WIDTH {
            return Err(Error::LayoutWidth {
                layout: self.layout.name,
                width,
            });
        }
        Ok(line)
    }
}

/// Field values sliced out of one line
#[derive(Debug, Clone)]
pub struct DecodedRecord<'a> {
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> DecodedRecord<'a> {
    /// Raw field content, padding included
    pub fn raw(&self, name: &str) -> Option<&'a str> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    /// Field content with surrounding padding removed
    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.raw(name).map(str::trim)
    }

    /// Field parsed as `T`
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.text(name).and_then(|v| v.parse().ok())
    }
}

/// Slice `fields` out of `line`.
///
/// Fails with [`Error::RecordTooShort`] when the line ends before the last
/// non-filler field does. Trailing filler may be missing.
pub fn decode_record<'a>(line: &'a str, fields: &[FieldSpec]) -> Result<DecodedRecord<'a>> {
    let required = fields
        .iter()
        .filter(|f| f.kind != FieldKind::Filler)
        .map(FieldSpec::end)
        .max()
        .unwrap_or(0);
    let actual = line.chars().count();
    if actual < required {
        return Err(Error::RecordTooShort { required, actual });
    }

    let values = fields
        .iter()
        .filter(|f| f.kind != FieldKind::Filler)
        .filter_map(|f| char_slice(line, f.offset, f.width).map(|v| (f.name, v)))
        .collect();
    Ok(DecodedRecord { values })
}

/// Join records into file content, one newline after each
pub fn assemble(records: &[String]) -> String {
    let mut content = String::with_capacity(records.len() * (RECORD_WIDTH + 1));
    for record in records {
        content.push_str(record);
        content.push('\n');
    }
    content
}

/// Non-blank lines of a file with their 1-based line numbers
pub fn lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty())
}

/// Placeholder for the security record: first `width` hex characters of a
/// SHA-256 digest over the preceding records.
pub fn security_digest(records: &[String], width: usize) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        hasher.update(record.as_bytes());
        hasher.update(b"\n");
    }
    let hex: String = hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect();
    hex.chars().take(width).collect()
}
