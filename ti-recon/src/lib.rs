//! # TI reconciliation
//!
//! Transactional information (FTI settled, PTI provisional) from the bank:
//! - CSV and XML statement parsing
//! - synthetic feed for development and bank outages
//! - three-tier matching of credits to invoices
//! - reconciliation summary and plain-text report
//! - async statement client with synthetic fallback

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod client;
pub mod config;
pub mod error;
pub mod fti;
pub mod matching;
pub mod metrics;
pub mod mock;
pub mod report;
pub mod types;

pub use client::{parse_statement, TiClient};
pub use config::TiConfig;
pub use error::{Error, Result};
pub use fti::{parse_fti_csv, parse_fti_xml};
pub use matching::{match_transaction, reconcile};
pub use mock::generate_mock_fti;
pub use report::format_report;
pub use types::*;
