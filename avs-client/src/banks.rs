//! Participating banks
//!
//! Identifiers are matched case-insensitively with spaces, hyphens and
//! underscores ignored, so `"Standard Bank"`, `"standard_bank"` and
//! `"STANDARDBANK"` are the same bank.

use serde::{Deserialize, Serialize};

/// Bank participating in account verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Bank {
    Absa,
    AfricanBank,
    Bidvest,
    Capitec,
    Discovery,
    Fnb,
    Investec,
    Nedbank,
    OldMutual,
    Postbank,
    StandardBank,
    TymeBank,
    Sasfin,
    AccessBank,
    /// Identifier not in the table
    Unknown,
}

struct BankEntry {
    bank: Bank,
    name: &'static str,
    universal_branch: &'static str,
    aliases: &'static [&'static str],
}

static BANKS: [BankEntry; 14] = [
    BankEntry { bank: Bank::Absa, name: "ABSA Bank", universal_branch: "632005", aliases: &["absa", "absabank"] },
    BankEntry { bank: Bank::AfricanBank, name: "African Bank", universal_branch: "430000", aliases: &["africanbank"] },
    BankEntry { bank: Bank::Bidvest, name: "Bidvest Bank", universal_branch: "462005", aliases: &["bidvest", "bidvestbank"] },
    BankEntry { bank: Bank::Capitec, name: "Capitec Bank", universal_branch: "470010", aliases: &["capitec", "capitecbank"] },
    BankEntry { bank: Bank::Discovery, name: "Discovery Bank", universal_branch: "679000", aliases: &["discovery", "discoverybank"] },
    BankEntry { bank: Bank::Fnb, name: "First National Bank", universal_branch: "250655", aliases: &["fnb", "firstnationalbank"] },
    BankEntry { bank: Bank::Investec, name: "Investec Bank", universal_branch: "580105", aliases: &["investec", "investecbank"] },
    BankEntry { bank: Bank::Nedbank, name: "Nedbank", universal_branch: "198765", aliases: &["nedbank", "ned"] },
    BankEntry { bank: Bank::OldMutual, name: "Old Mutual", universal_branch: "462005", aliases: &["oldmutual", "oldmutualbank"] },
    BankEntry { bank: Bank::Postbank, name: "Postbank", universal_branch: "460005", aliases: &["postbank", "sapostbank"] },
    BankEntry { bank: Bank::StandardBank, name: "Standard Bank", universal_branch: "051001", aliases: &["standardbank", "sbsa"] },
    BankEntry { bank: Bank::TymeBank, name: "TymeBank", universal_branch: "678910", aliases: &["tymebank", "tyme"] },
    BankEntry { bank: Bank::Sasfin, name: "Sasfin Bank", universal_branch: "683000", aliases: &["sasfin", "sasfinbank"] },
    BankEntry { bank: Bank::AccessBank, name: "Access Bank", universal_branch: "410506", aliases: &["accessbank", "access"] },
];

fn normalize(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl Bank {
    /// Look up a bank identifier; unknown identifiers give `Unknown`
    pub fn from_identifier(identifier: &str) -> Self {
        let key = normalize(identifier);
        BANKS
            .iter()
            .find(|entry| entry.aliases.contains(&key.as_str()))
            .map_or(Bank::Unknown, |entry| entry.bank)
    }

    fn entry(&self) -> Option<&'static BankEntry> {
        BANKS.iter().find(|entry| entry.bank == *self)
    }

    /// Display name
    pub fn name(&self) -> Option<&'static str> {
        self.entry().map(|entry| entry.name)
    }

    /// Universal branch code
    pub fn universal_branch(&self) -> Option<&'static str> {
        self.entry().map(|entry| entry.universal_branch)
    }

    /// Allowed account number lengths
    pub fn account_number_lengths(&self) -> (usize, usize) {
        match self {
            Bank::Nedbank => (10, 11),
            _ => (1, 23),
        }
    }
}

/// Display name of a bank identifier
pub fn bank_name(identifier: &str) -> Option<&'static str> {
    Bank::from_identifier(identifier).name()
}

/// Universal branch code of a bank identifier
pub fn universal_branch(identifier: &str) -> Option<&'static str> {
    Bank::from_identifier(identifier).universal_branch()
}

/// Result of an account number format check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountNumberCheck {
    /// Format is acceptable for the bank
    Valid,
    /// Contains something other than digits
    NotNumeric,
    /// Wrong number of digits for the bank
    InvalidLength {
        /// Shortest allowed
        min: usize,
        /// Longest allowed
        max: usize,
        /// Digits supplied
        actual: usize,
    },
}

impl AccountNumberCheck {
    /// Whether the account number passed
    pub fn is_valid(&self) -> bool {
        matches!(self, AccountNumberCheck::Valid)
    }
}

/// Check an account number's format for a bank. Unknown banks get the
/// general 1 to 23 digit rule.
pub fn validate_account_number(number: &str, bank_identifier: &str) -> AccountNumberCheck {
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return AccountNumberCheck::NotNumeric;
    }

    let (min, max) = Bank::from_identifier(bank_identifier).account_number_lengths();
    let actual = number.len();
    if actual < min || actual > max {
        return AccountNumberCheck::InvalidLength { min, max, actual };
    }
    AccountNumberCheck::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourteen_banks() {
        assert_eq!(BANKS.len(), 14);
        for entry in &BANKS {
            assert_eq!(entry.universal_branch.len(), 6);
            assert_eq!(Bank::from_identifier(entry.aliases[0]), entry.bank);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(bank_name("Standard Bank"), Some("Standard Bank"));
        assert_eq!(universal_branch("standard_bank"), Some("051001"));
        assert_eq!(universal_branch("FNB"), Some("250655"));
        assert_eq!(universal_branch("old-mutual"), Some("462005"));
        assert_eq!(bank_name("Imaginary Bank"), None);
        assert_eq!(Bank::from_identifier(""), Bank::Unknown);
    }

    #[test]
    fn test_nedbank_length_rule() {
        assert!(validate_account_number("1012345678", "nedbank").is_valid());
        assert!(validate_account_number("10123456789", "nedbank").is_valid());
        assert_eq!(
            validate_account_number("123456789", "nedbank"),
            AccountNumberCheck::InvalidLength { min: 10, max: 11, actual: 9 }
        );
    }

    #[test]
    fn test_general_rule() {
        assert!(validate_account_number("1", "capitec").is_valid());
        assert!(validate_account_number(&"9".repeat(23), "absa").is_valid());
        assert!(!validate_account_number(&"9".repeat(24), "absa").is_valid());
        assert!(validate_account_number("62000000001", "unknown-bank").is_valid());
        assert_eq!(validate_account_number("62-0001", "fnb"), AccountNumberCheck::NotNumeric);
        assert_eq!(validate_account_number("", "fnb"), AccountNumberCheck::NotNumeric);
    }
}
