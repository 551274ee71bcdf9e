//! EFT value types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One debit order instruction to collect from a debtor's account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebitOrder {
    /// Debtor's branch code (6 digits)
    pub branch_code: String,
    /// Debtor's account number (up to 16 digits)
    pub account_number: String,
    /// Amount to collect
    pub amount: Decimal,
    /// Date the bank should action the debit
    pub action_date: NaiveDate,
}

/// Header of a bank response file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    /// Client profile number
    pub client_profile: String,
    /// File sequence the response refers to
    pub file_sequence: String,
    /// File type code
    pub file_type: String,
    /// Nominated account
    pub nominated_account: String,
    /// Charges account
    pub charges_account: String,
    /// Statement narrative
    pub statement_narrative: String,
}

/// One `02` record of a response file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTransaction {
    /// 34-character payment reference
    pub payment_reference: String,
    /// Debtor branch code
    pub branch_code: String,
    /// Debtor account number, leading zeros removed
    pub account_number: String,
    /// Amount in currency units
    pub amount: Decimal,
    /// Action date
    pub action_date: NaiveDate,
    /// 30-character statement reference
    pub reference: String,
}

/// Totals carried in the `03` trailer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailerSummary {
    /// Number of transaction records the bank declared
    pub record_count: u64,
    /// Declared total value
    pub total_value: Decimal,
}

/// Inbound record that was logged and skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// 1-based line number
    pub line: usize,
    /// Why it was skipped
    pub reason: String,
}

/// Decoded bank acknowledgement / unpaid file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResponse {
    /// File header
    pub header: ResponseHeader,
    /// Transaction records in file order
    pub transactions: Vec<ResponseTransaction>,
    /// Trailer totals, if the file had a trailer
    pub trailer: Option<TrailerSummary>,
    /// Records that could not be interpreted
    pub skipped: Vec<SkippedRecord>,
}

impl ParsedResponse {
    /// Sum of the decoded transaction amounts
    pub fn total_amount(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    /// Whether the trailer agrees with the decoded records.
    ///
    /// `None` when the file carried no trailer.
    pub fn trailer_matches(&self) -> Option<bool> {
        self.trailer.as_ref().map(|t| {
            t.record_count == self.transactions.len() as u64 && t.total_value == self.total_amount()
        })
    }
}
