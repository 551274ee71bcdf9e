//! Configuration for the DebiCheck codec

use serde::{Deserialize, Serialize};

/// DebiCheck codec configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebiCheckConfig {
    /// 4-digit bank number that prefixes every MRN
    pub bank_number: String,

    /// 10-digit client profile number
    pub client_profile: String,

    /// Creditor abbreviation shown to the debtor (10 characters)
    pub creditor_abbreviation: String,

    /// Account collections settle into
    pub nominated_account: String,

    /// Account bank charges are taken from
    pub charges_account: String,

    /// Narrative on the nominated account statement
    pub statement_narrative: String,
}

impl Default for DebiCheckConfig {
    fn default() -> Self {
        Self {
            bank_number: "0198".to_string(),
            client_profile: "0000000000".to_string(),
            creditor_abbreviation: "GYM".to_string(),
            nominated_account: "0".to_string(),
            charges_account: "0".to_string(),
            statement_narrative: "DEBICHECK".to_string(),
        }
    }
}

impl DebiCheckConfig {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DebiCheckConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();

        if let Ok(bank) = std::env::var("DEBICHECK_BANK_NUMBER") {
            config.bank_number = bank;
        }

        if let Ok(profile) = std::env::var("DEBICHECK_CLIENT_PROFILE") {
            config.client_profile = profile;
        }

        if let Ok(abbreviation) = std::env::var("DEBICHECK_CREDITOR_ABBREVIATION") {
            config.creditor_abbreviation = abbreviation;
        }

        if let Ok(account) = std::env::var("DEBICHECK_NOMINATED_ACCOUNT") {
            config.nominated_account = account;
        }

        if let Ok(account) = std::env::var("DEBICHECK_CHARGES_ACCOUNT") {
            config.charges_account = account;
        }

        if let Ok(narrative) = std::env::var("DEBICHECK_STATEMENT_NARRATIVE") {
            config.statement_narrative = narrative;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values that can never be encoded
    pub fn validate(&self) -> crate::Result<()> {
        if self.bank_number.len() != 4 || !self.bank_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(crate::Error::Config(format!(
                "bank number must be exactly 4 digits, got {:?}",
                self.bank_number
            )));
        }
        if self.client_profile.len() > 10 || !self.client_profile.chars().all(|c| c.is_ascii_digit()) {
            return Err(crate::Error::Config(format!(
                "client profile must be up to 10 digits, got {:?}",
                self.client_profile
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DebiCheckConfig::default();
        assert_eq!(config.bank_number.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_narrative_from_env() {
        std::env::set_var("DEBICHECK_STATEMENT_NARRATIVE", "IRONWORKS MANDATES");
        let config = DebiCheckConfig::from_env();
        std::env::remove_var("DEBICHECK_STATEMENT_NARRATIVE");

        let config = config.unwrap();
        assert_eq!(config.statement_narrative, "IRONWORKS MANDATES");
        assert_eq!(config.bank_number, "0198");
    }

    #[test]
    fn test_bank_number_must_be_four_digits() {
        let config = DebiCheckConfig {
            bank_number: "198".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
