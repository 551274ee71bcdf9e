//! # AVS client
//!
//! Real-time account verification against the bank's SOAP service:
//! - request envelope builder with the enterprise-context header
//! - response parser for `RealTimeAccVerifRs`
//! - deterministic simulator keyed on the account number's last digit
//! - participating-bank table with universal branch codes
//! - async client with a single live attempt and simulated fallback

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod banks;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod mock;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use banks::{bank_name, universal_branch, validate_account_number, AccountNumberCheck, Bank};
pub use client::AvsClient;
pub use config::{AvsConfig, Environment};
pub use error::{Error, Result};
pub use mock::verify_mock;
pub use request::build_request;
pub use response::parse_response;
pub use transport::{AvsTransport, HttpTransport};
pub use types::*;
