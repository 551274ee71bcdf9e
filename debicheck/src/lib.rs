//! # DebiCheck codec
//!
//! Authenticated debit orders: mandate requests register a Mandate
//! Reference Number (MRN) with the debtor's bank, collections then draw
//! against it.
//!
//! Files follow the 320-character record convention shared with EFT:
//! - mandate request file: header type `03`, one `02` per mandate,
//!   trailer with a record count only, security record
//! - collection file: header type `04`, one `02` per collection, trailer
//!   with count and total value, security record
//! - status-response file: `02` records with MRN, status and reason

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod encoder;
pub mod error;
pub mod mrn;
pub mod response;
pub mod types;

pub use config::DebiCheckConfig;
pub use encoder::DebiCheckEncoder;
pub use error::{Error, Result};
pub use fixed_width::EncodedFile;
pub use mrn::{derive_mrn, generate_mrn, validate_mrn, MRN_LENGTH};
pub use response::decode_mandate_response;
pub use types::*;
