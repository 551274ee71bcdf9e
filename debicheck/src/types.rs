//! DebiCheck mandate and collection types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What the bank should do with a mandate record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MandateAction {
    /// Register a new mandate
    Add,
    /// Cancel an existing mandate
    Cancel,
    /// Supersede an existing mandate
    Update,
}

impl MandateAction {
    /// One-character code
    pub fn code(&self) -> &'static str {
        match self {
            MandateAction::Add => "A",
            MandateAction::Cancel => "C",
            MandateAction::Update => "U",
        }
    }
}

/// Debtor account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Current / cheque
    Current,
    /// Savings
    Savings,
    /// Transmission
    Transmission,
}

impl AccountType {
    /// One-digit code
    pub fn code(&self) -> &'static str {
        match self {
            AccountType::Current => "1",
            AccountType::Savings => "2",
            AccountType::Transmission => "3",
        }
    }
}

/// How the installment amount behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MandateType {
    /// Same amount every collection
    Fixed,
    /// Amount may vary up to the maximum
    Variable,
    /// Amount follows usage
    UsageBased,
}

impl MandateType {
    /// One-character code
    pub fn code(&self) -> &'static str {
        match self {
            MandateType::Fixed => "F",
            MandateType::Variable => "V",
            MandateType::UsageBased => "U",
        }
    }
}

/// Collection frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    /// Every week
    Weekly,
    /// Every two weeks
    Fortnightly,
    /// Every month
    Monthly,
    /// Every three months
    Quarterly,
    /// Twice a year
    BiAnnually,
    /// Once a year
    Annually,
}

impl Frequency {
    /// One-character code
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Weekly => "W",
            Frequency::Fortnightly => "F",
            Frequency::Monthly => "M",
            Frequency::Quarterly => "Q",
            Frequency::BiAnnually => "B",
            Frequency::Annually => "A",
        }
    }
}

/// When the installment may be escalated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentCategory {
    /// Never adjusted
    Never,
    /// Quarterly
    Quarterly,
    /// Twice a year
    BiAnnually,
    /// Once a year
    Annually,
    /// With the repo rate
    Repo,
}

impl AdjustmentCategory {
    /// One-character code
    pub fn code(&self) -> &'static str {
        match self {
            AdjustmentCategory::Never => "N",
            AdjustmentCategory::Quarterly => "Q",
            AdjustmentCategory::BiAnnually => "B",
            AdjustmentCategory::Annually => "A",
            AdjustmentCategory::Repo => "R",
        }
    }
}

/// Authentication flow the debtor goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebiCheckTransactionType {
    /// Real-time authentication
    Tt1,
    /// Batch (delayed) authentication
    Tt2,
    /// Card and PIN at point of sale
    Tt3,
}

impl DebiCheckTransactionType {
    /// Three-character code
    pub fn code(&self) -> &'static str {
        match self {
            DebiCheckTransactionType::Tt1 => "TT1",
            DebiCheckTransactionType::Tt2 => "TT2",
            DebiCheckTransactionType::Tt3 => "TT3",
        }
    }
}

/// Position of a collection within its mandate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionType {
    /// Regular collection
    Recurring,
    /// Last collection on the mandate
    Final,
    /// Single collection
    OnceOff,
}

impl CollectionType {
    /// One-character code
    pub fn code(&self) -> &'static str {
        match self {
            CollectionType::Recurring => "R",
            CollectionType::Final => "F",
            CollectionType::OnceOff => "O",
        }
    }
}

/// Mandate request for one debtor agreement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mandate {
    /// Add / cancel / update
    pub action: MandateAction,
    /// Mandate reference number; derived from `member_id` when absent
    pub mrn: Option<String>,
    /// Member the agreement belongs to
    pub member_id: String,
    /// Creditor's contract reference (14 characters)
    pub contract_reference: String,
    /// Debtor account number
    pub debtor_account: String,
    /// Debtor branch code
    pub debtor_branch: String,
    /// Debtor account type
    pub account_type: AccountType,
    /// Fixed / variable / usage based
    pub mandate_type: MandateType,
    /// Debtor identity number (13 characters)
    pub debtor_id: String,
    /// Debtor name (30 characters)
    pub debtor_name: String,
    /// First collection date
    pub first_collection_date: NaiveDate,
    /// Day of the month (or week) collections run
    pub collection_day: u8,
    /// Collection frequency
    pub frequency: Frequency,
    /// Installment amount
    pub installment: Decimal,
    /// Maximum collection amount
    pub maximum: Decimal,
    /// Escalation schedule
    pub adjustment_category: AdjustmentCategory,
    /// Escalation rate
    pub adjustment_rate: Decimal,
    /// Authentication flow
    pub transaction_type: DebiCheckTransactionType,
    /// Whether the bank may track the debtor's account for funds
    pub tracking: bool,
}

/// Collection against a registered mandate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Mandate reference number (25 characters)
    pub mrn: String,
    /// Creditor's contract reference
    pub contract_reference: String,
    /// Amount to collect
    pub amount: Decimal,
    /// Action date
    pub action_date: NaiveDate,
    /// Recurring / final / once-off
    pub collection_type: CollectionType,
}

/// Mandate status reported by the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MandateStatusCode {
    /// `A`
    Approved,
    /// `R`
    Rejected,
    /// `P`
    Pending,
    /// `C`
    Cancelled,
    /// `S`
    Suspended,
    /// Any other code
    Unknown,
}

impl MandateStatusCode {
    /// Map a one-character code; unrecognised codes give `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code {
            "A" => MandateStatusCode::Approved,
            "R" => MandateStatusCode::Rejected,
            "P" => MandateStatusCode::Pending,
            "C" => MandateStatusCode::Cancelled,
            "S" => MandateStatusCode::Suspended,
            _ => MandateStatusCode::Unknown,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            MandateStatusCode::Approved => "Approved",
            MandateStatusCode::Rejected => "Rejected",
            MandateStatusCode::Pending => "Pending debtor authentication",
            MandateStatusCode::Cancelled => "Cancelled",
            MandateStatusCode::Suspended => "Suspended",
            MandateStatusCode::Unknown => "Unknown",
        }
    }
}

/// Rejection / status reason reported by the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonCode {
    /// `0001`
    AccountClosed,
    /// `0002`
    NoSuchAccount,
    /// `0003`
    InsufficientFunds,
    /// `0004`
    DebtorDeclined,
    /// `0005`
    MandateNotFound,
    /// `0006`
    InvalidAccountType,
    /// `0007`
    AuthenticationTimeout,
    /// `0008`
    AccountFrozen,
    /// `0009`
    InvalidBranch,
    /// `0010`
    DuplicateMandate,
    /// Any other code
    Unknown,
}

impl ReasonCode {
    /// Map a four-digit code; unrecognised codes give `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code {
            "0001" => ReasonCode::AccountClosed,
            "0002" => ReasonCode::NoSuchAccount,
            "0003" => ReasonCode::InsufficientFunds,
            "0004" => ReasonCode::DebtorDeclined,
            "0005" => ReasonCode::MandateNotFound,
            "0006" => ReasonCode::InvalidAccountType,
            "0007" => ReasonCode::AuthenticationTimeout,
            "0008" => ReasonCode::AccountFrozen,
            "0009" => ReasonCode::InvalidBranch,
            "0010" => ReasonCode::DuplicateMandate,
            _ => ReasonCode::Unknown,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ReasonCode::AccountClosed => "Account closed",
            ReasonCode::NoSuchAccount => "No such account",
            ReasonCode::InsufficientFunds => "Insufficient funds",
            ReasonCode::DebtorDeclined => "Debtor declined mandate",
            ReasonCode::MandateNotFound => "Mandate not found",
            ReasonCode::InvalidAccountType => "Invalid account type",
            ReasonCode::AuthenticationTimeout => "Debtor authentication timed out",
            ReasonCode::AccountFrozen => "Account frozen",
            ReasonCode::InvalidBranch => "Invalid branch code",
            ReasonCode::DuplicateMandate => "Duplicate mandate",
            ReasonCode::Unknown => "Unknown",
        }
    }
}

/// One decoded mandate status-response record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandateStatus {
    /// Mandate reference number
    pub mrn: String,
    /// Raw status code
    pub status_code: String,
    /// Interpreted status
    pub status: MandateStatusCode,
    /// Raw reason code, if the bank supplied one
    pub reason_code: Option<String>,
    /// Interpreted reason, if the bank supplied one
    pub reason: Option<ReasonCode>,
}

impl MandateStatus {
    /// Status description
    pub fn status_description(&self) -> &'static str {
        self.status.description()
    }

    /// Reason description, if any
    pub fn reason_description(&self) -> Option<&'static str> {
        self.reason.map(|r| r.description())
    }
}
