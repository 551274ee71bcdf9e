//! Account verification request and result types

use serde::{Deserialize, Serialize};

/// Kind of identity document the holder was verified with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityType {
    /// South African identity number
    SaId,
    /// Passport number
    Passport,
    /// Company registration number
    CompanyRegistration,
}

impl IdentityType {
    /// Wire code
    pub fn code(&self) -> &'static str {
        match self {
            IdentityType::SaId => "SID",
            IdentityType::Passport => "PPN",
            IdentityType::CompanyRegistration => "CRN",
        }
    }
}

/// Account type the caller expects the account to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvsAccountType {
    /// Current / cheque
    Current,
    /// Savings
    Savings,
    /// Transmission
    Transmission,
}

impl AvsAccountType {
    /// Wire code
    pub fn code(&self) -> &'static str {
        match self {
            AvsAccountType::Current => "01",
            AvsAccountType::Savings => "02",
            AvsAccountType::Transmission => "03",
        }
    }
}

/// Who the caller believes holds the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHolderInformation {
    /// Identity number
    pub identity_number: String,
    /// Identity document kind
    pub identity_type: IdentityType,
    /// Initials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    /// Surname or registered name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Cell phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_number: Option<String>,
    /// Tax reference number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_reference: Option<String>,
    /// Caller's own reference for the holder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
}

impl AccountHolderInformation {
    /// Holder identified by an SA identity number only
    pub fn with_sa_id(identity_number: impl Into<String>) -> Self {
        Self {
            identity_number: identity_number.into(),
            identity_type: IdentityType::SaId,
            initials: None,
            name: None,
            email: None,
            cell_number: None,
            tax_reference: None,
            customer_reference: None,
        }
    }
}

/// One account to verify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountVerification {
    /// Bank identifier (see [`crate::banks`])
    pub bank_identifier: String,
    /// Account number
    pub account_number: String,
    /// Expected account type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AvsAccountType>,
    /// Branch sort code; the bank's universal branch is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_code: Option<String>,
    /// Account holder
    pub holder: AccountHolderInformation,
}

/// One-character verification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    /// Yes / matched
    Y,
    /// No / not matched
    N,
    /// Unknown / not checked
    U,
    /// Check failed at the bank
    F,
}

impl Flag {
    /// Parse a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Y" => Some(Flag::Y),
            "N" => Some(Flag::N),
            "U" => Some(Flag::U),
            "F" => Some(Flag::F),
            _ => None,
        }
    }

    /// Wire code
    pub fn code(&self) -> &'static str {
        match self {
            Flag::Y => "Y",
            Flag::N => "N",
            Flag::U => "U",
            Flag::F => "F",
        }
    }

    pub(crate) fn yes_if(condition: bool) -> Self {
        if condition {
            Flag::Y
        } else {
            Flag::N
        }
    }
}

/// Named verification outcomes; absent outcomes were not reported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcomes {
    /// Account exists at the bank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_found: Option<Flag>,
    /// Identity number matches the holder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number_match: Option<Flag>,
    /// Identity type matches the holder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_type_match: Option<Flag>,
    /// Initials match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials_match: Option<Flag>,
    /// Surname / registered name matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_match: Option<Flag>,
    /// Account is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_active: Option<Flag>,
    /// Account is dormant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_dormant: Option<Flag>,
    /// Account has been open for at least three months
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_open_three_months: Option<Flag>,
    /// Account accepts debits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts_debits: Option<Flag>,
    /// Account accepts credits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts_credits: Option<Flag>,
    /// Account type matches the expected type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type_match: Option<Flag>,
    /// Tax reference matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_reference_match: Option<Flag>,
    /// Email address matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_match: Option<Flag>,
    /// Cell number matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_number_match: Option<Flag>,
    /// Customer reference matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_reference_match: Option<Flag>,
}

impl VerificationOutcomes {
    /// Every outcome with its response element name, in response order
    pub fn flags(&self) -> [(&'static str, Option<Flag>); 15] {
        [
            ("AccountFound", self.account_found),
            ("IdNumberMatch", self.id_number_match),
            ("IdTypeMatch", self.id_type_match),
            ("InitialsMatch", self.initials_match),
            ("NameMatch", self.name_match),
            ("AccountActive", self.account_active),
            ("AccountDormant", self.account_dormant),
            ("AccountOpenThreeMonths", self.account_open_three_months),
            ("AcceptsDebits", self.accepts_debits),
            ("AcceptsCredits", self.accepts_credits),
            ("AccountTypeMatch", self.account_type_match),
            ("TaxReferenceMatch", self.tax_reference_match),
            ("EmailMatch", self.email_match),
            ("CellNumberMatch", self.cell_number_match),
            ("CustomerReferenceMatch", self.customer_reference_match),
        ]
    }

    /// Set the outcome named by a response element; false when the name is
    /// not an outcome
    pub(crate) fn set(&mut self, element: &str, flag: Flag) -> bool {
        let slot = match element {
            "AccountFound" => &mut self.account_found,
            "IdNumberMatch" => &mut self.id_number_match,
            "IdTypeMatch" => &mut self.id_type_match,
            "InitialsMatch" => &mut self.initials_match,
            "NameMatch" => &mut self.name_match,
            "AccountActive" => &mut self.account_active,
            "AccountDormant" => &mut self.account_dormant,
            "AccountOpenThreeMonths" => &mut self.account_open_three_months,
            "AcceptsDebits" => &mut self.accepts_debits,
            "AcceptsCredits" => &mut self.accepts_credits,
            "AccountTypeMatch" => &mut self.account_type_match,
            "TaxReferenceMatch" => &mut self.tax_reference_match,
            "EmailMatch" => &mut self.email_match,
            "CellNumberMatch" => &mut self.cell_number_match,
            "CustomerReferenceMatch" => &mut self.customer_reference_match,
            _ => return false,
        };
        *slot = Some(flag);
        true
    }

    /// Number of outcomes present
    pub fn reported(&self) -> usize {
        self.flags().iter().filter(|(_, flag)| flag.is_some()).count()
    }
}

/// AVS result code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultCode {
    /// `R00` verification performed
    Success,
    /// `R01` request rejected as invalid
    InvalidRequest,
    /// `R02` account not found
    AccountNotFound,
    /// `R03` bank does not participate
    BankNotParticipating,
    /// `R04` service unavailable
    ServiceUnavailable,
    /// `R05` bank did not answer in time
    Timeout,
    /// Any other code, kept verbatim
    Unknown(String),
}

impl ResultCode {
    /// Map a wire code; unrecognised codes give `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code {
            "R00" => ResultCode::Success,
            "R01" => ResultCode::InvalidRequest,
            "R02" => ResultCode::AccountNotFound,
            "R03" => ResultCode::BankNotParticipating,
            "R04" => ResultCode::ServiceUnavailable,
            "R05" => ResultCode::Timeout,
            other => ResultCode::Unknown(other.to_string()),
        }
    }

    /// Wire code
    pub fn code(&self) -> &str {
        match self {
            ResultCode::Success => "R00",
            ResultCode::InvalidRequest => "R01",
            ResultCode::AccountNotFound => "R02",
            ResultCode::BankNotParticipating => "R03",
            ResultCode::ServiceUnavailable => "R04",
            ResultCode::Timeout => "R05",
            ResultCode::Unknown(code) => code,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ResultCode::Success => "Verification performed",
            ResultCode::InvalidRequest => "Invalid request",
            ResultCode::AccountNotFound => "Account not found",
            ResultCode::BankNotParticipating => "Bank not participating",
            ResultCode::ServiceUnavailable => "Service unavailable",
            ResultCode::Timeout => "Bank timed out",
            ResultCode::Unknown(_) => "Unknown",
        }
    }
}

/// Verification of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationItemResult {
    /// Position in the request, starting at 1
    pub sequence_number: u32,
    /// Bank identifier echoed back
    pub bank_identifier: String,
    /// Account number echoed back
    pub account_number: String,
    /// Per-item result
    pub result_code: ResultCode,
    /// Reported outcomes
    pub outcomes: VerificationOutcomes,
}

/// Result of a verification batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Overall result
    pub result_code: ResultCode,
    /// Per-account results
    pub items: Vec<VerificationItemResult>,
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

    /// Whether the bank answered
    pub fn is_live(&self) -> bool {
        matches!(self, Outcome::Live(_))
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
