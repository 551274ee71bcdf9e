//! # EFT debit order codec
//!
//! Same-day-value debit order files for the bank's host-to-host channel.
//!
//! ```text
//! 01 header    client profile, file sequence, file type 01, accounts, narrative
//! 02 detail    one per debit order (payment ref, branch, account, cents, date, reference)
//! 03 trailer   record count + total value in cents
//! 04 security  digest placeholder
//! ```
//!
//! Every line is 320 characters followed by a newline. The encoder only
//! produces files; where they are written is up to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod types;

pub use config::EftConfig;
pub use decoder::decode_response_file;
pub use encoder::{generate_file_sequence_number, payment_reference, statement_reference, EftEncoder};
pub use error::{Error, Result};
pub use fixed_width::EncodedFile;
pub use types::*;
