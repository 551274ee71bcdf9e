//! # Fixed-width records
//!
//! Shared building blocks for the bank's 320-character flat files:
//! - field descriptors with numeric/text/filler padding policies
//! - record layouts that are checked to add up to [`RECORD_WIDTH`]
//! - positional decoding with explicit short-record errors
//! - the header/trailer/security layouts every outbound file shares
//! - file assembly and the security-record digest

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod error;
pub mod field;
pub mod record;
pub mod standard;

pub use error::{Error, Result};
pub use field::{
    amount_to_cents, cents_to_amount, encode_field, pad, truncate_or_pad, zero_pad, Align,
    FieldKind, FieldSpec,
};
pub use record::{
    assemble, decode_record, lines, security_digest, DecodedRecord, Layout, RecordBuilder,
    RecordType,
};
pub use standard::{file_sequence_number, security_record, EncodedFile, FileType};

/// Width of every record line, newline excluded
pub const RECORD_WIDTH: usize = 320;
