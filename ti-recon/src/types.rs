//! Statement, invoice and reconciliation types

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// FTI / PTI transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// `01`
    Deposit,
    /// `02`
    Withdrawal,
    /// `03`
    TransferIn,
    /// `04`
    TransferOut,
    /// `05`
    DebitOrder,
    /// `06`
    StopOrder,
    /// `07`
    EftCredit,
    /// `08`
    EftDebit,
    /// `09`
    CardPurchase,
    /// `10`
    Interest,
    /// `11`
    BankCharge,
    /// `12`
    Reversal,
    /// `13`
    CashDeposit,
    /// Any other code
    Unknown,
}

impl TransactionType {
    /// Map a two-digit code; unrecognised codes give `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "01" => TransactionType::Deposit,
            "02" => TransactionType::Withdrawal,
            "03" => TransactionType::TransferIn,
            "04" => TransactionType::TransferOut,
            "05" => TransactionType::DebitOrder,
            "06" => TransactionType::StopOrder,
            "07" => TransactionType::EftCredit,
            "08" => TransactionType::EftDebit,
            "09" => TransactionType::CardPurchase,
            "10" => TransactionType::Interest,
            "11" => TransactionType::BankCharge,
            "12" => TransactionType::Reversal,
            "13" => TransactionType::CashDeposit,
            _ => TransactionType::Unknown,
        }
    }

    /// Two-digit code; empty for `Unknown`
    pub fn code(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "01",
            TransactionType::Withdrawal => "02",
            TransactionType::TransferIn => "03",
            TransactionType::TransferOut => "04",
            TransactionType::DebitOrder => "05",
            TransactionType::StopOrder => "06",
            TransactionType::EftCredit => "07",
            TransactionType::EftDebit => "08",
            TransactionType::CardPurchase => "09",
            TransactionType::Interest => "10",
            TransactionType::BankCharge => "11",
            TransactionType::Reversal => "12",
            TransactionType::CashDeposit => "13",
            TransactionType::Unknown => "",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
            TransactionType::TransferIn => "Transfer in",
            TransactionType::TransferOut => "Transfer out",
            TransactionType::DebitOrder => "Debit order",
            TransactionType::StopOrder => "Stop order",
            TransactionType::EftCredit => "EFT credit",
            TransactionType::EftDebit => "EFT debit",
            TransactionType::CardPurchase => "Card purchase",
            TransactionType::Interest => "Interest",
            TransactionType::BankCharge => "Bank charge",
            TransactionType::Reversal => "Reversal",
            TransactionType::CashDeposit => "Cash deposit",
            TransactionType::Unknown => "Unknown",
        }
    }
}

/// Channel a transaction came through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Channel {
    Atm,
    Branch,
    Internet,
    Mobile,
    Pos,
    Eft,
    System,
    /// Any other code
    Unknown,
}

impl Channel {
    /// Map a channel code (case-insensitive); unrecognised codes give `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "ATM" => Channel::Atm,
            "BRANCH" => Channel::Branch,
            "INTERNET" => Channel::Internet,
            "MOBILE" => Channel::Mobile,
            "POS" => Channel::Pos,
            "EFT" => Channel::Eft,
            "SYSTEM" => Channel::System,
            _ => Channel::Unknown,
        }
    }

    /// Channel code
    pub fn code(&self) -> &'static str {
        match self {
            Channel::Atm => "ATM",
            Channel::Branch => "BRANCH",
            Channel::Internet => "INTERNET",
            Channel::Mobile => "MOBILE",
            Channel::Pos => "POS",
            Channel::Eft => "EFT",
            Channel::System => "SYSTEM",
            Channel::Unknown => "UNKNOWN",
        }
    }
}

/// Final (settled) or provisional (real-time) statement feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Final transactional information
    Fti,
    /// Provisional transactional information
    Pti,
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementKind::Fti => write!(f, "FTI"),
            StatementKind::Pti => write!(f, "PTI"),
        }
    }
}

/// One statement line. Debits carry a negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankTransaction {
    /// Statement number
    pub statement_number: String,
    /// Transaction date
    pub date: NaiveDate,
    /// Transaction time, when the feed has one
    pub time: Option<NaiveTime>,
    /// Running balance after this transaction
    pub balance: Decimal,
    /// Transaction type
    pub transaction_type: TransactionType,
    /// Channel
    pub channel: Channel,
    /// Signed amount
    pub amount: Decimal,
    /// Payer reference
    pub reference: String,
    /// Bank description
    pub description: String,
    /// Bank transaction key
    pub transaction_key: String,
    /// Bank process key
    pub process_key: String,
}

impl BankTransaction {
    /// Money leaving the account
    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Money arriving in the account
    pub fn is_credit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Internal invoice a payment may settle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice identifier
    pub id: String,
    /// Member the invoice belongs to
    pub member_id: String,
    /// Amount due
    pub amount: Decimal,
    /// Due date
    pub due_date: NaiveDate,
}

/// How certain a match is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Reference and amount agree
    High,
    /// Amount and due date agree
    Medium,
    /// Amount agrees
    Low,
}

impl Confidence {
    /// Lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Invoice a transaction was matched to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Matched invoice
    pub invoice_id: String,
    /// Member on the matched invoice
    pub member_id: String,
    /// Match tier
    pub confidence: Confidence,
    /// Why it matched
    pub reason: String,
}

/// Transaction with its match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationMatch {
    /// Credit transaction
    pub transaction: BankTransaction,
    /// Invoice it settles
    pub matched: MatchResult,
}

/// Matches per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    /// High-confidence matches
    pub high: usize,
    /// Medium-confidence matches
    pub medium: usize,
    /// Low-confidence matches
    pub low: usize,
}

/// Totals for a reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Credit transactions considered
    pub total_transactions: usize,
    /// Matched credits
    pub matched_count: usize,
    /// Unmatched credits
    pub unmatched_count: usize,
    /// Matched share of credits, in percent
    pub match_rate: f64,
    /// Sum of credit amounts
    pub total_amount: Decimal,
    /// Sum of matched credit amounts
    pub matched_amount: Decimal,
    /// Sum of unmatched credit amounts
    pub unmatched_amount: Decimal,
    /// Matches per tier
    pub by_confidence: ConfidenceBreakdown,
}

/// Result of a reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Matched credits
    pub matched: Vec<ReconciliationMatch>,
    /// Credits no invoice matched
    pub unmatched: Vec<BankTransaction>,
    /// Totals
    pub summary: ReconciliationSummary,
}

/// How a result was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Answered by the bank
    Live(T),
    /// Mock mode was requested
    Simulated(T),
    /// The live call failed; `value` is simulated
    Degraded {
        /// Simulated value
        value: T,
        /// Why the live call failed
        cause: String,
    },
}

impl<T> Outcome<T> {
    /// The value, however it was obtained
    pub fn value(&self) -> &T {
        match self {
            Outcome::Live(value) | Outcome::Simulated(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    /// Take the value
    pub fn into_value(self) -> T {
        match self {
            Outcome::Live(value) | Outcome::Simulated(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    /// Metrics label
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Live(_) => "live",
            Outcome::Simulated(_) => "simulated",
            Outcome::Degraded { .. } => "degraded",
        }
    }
}
