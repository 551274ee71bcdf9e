//! Configuration for the EFT debit order codec

use serde::{Deserialize, Serialize};

/// EFT codec configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EftConfig {
    /// 10-digit client profile number issued by the bank
    pub client_profile: String,

    /// Account the collected funds settle into
    pub nominated_account: String,

    /// Account bank charges are taken from
    pub charges_account: String,

    /// Narrative on the nominated account statement
    pub statement_narrative: String,

    /// User reference prefix on the debtor's statement (10 characters)
    pub user_reference: String,
}

impl Default for EftConfig {
    fn default() -> Self {
        Self {
            client_profile: "0000000000".to_string(),
            nominated_account: "0".to_string(),
            charges_account: "0".to_string(),
            statement_narrative: "DEBIT ORDER COLLECTION".to_string(),
            user_reference: "MEMBERSHIP".to_string(),
        }
    }
}

impl EftConfig {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EftConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();

        if let Ok(profile) = std::env::var("EFT_CLIENT_PROFILE") {
            config.client_profile = profile;
        }

        if let Ok(account) = std::env::var("EFT_NOMINATED_ACCOUNT") {
            config.nominated_account = account;
        }

        if let Ok(account) = std::env::var("EFT_CHARGES_ACCOUNT") {
            config.charges_account = account;
        }

        if let Ok(narrative) = std::env::var("EFT_STATEMENT_NARRATIVE") {
            config.statement_narrative = narrative;
        }

        if let Ok(reference) = std::env::var("EFT_USER_REFERENCE") {
            config.user_reference = reference;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values that can never be encoded
    pub fn validate(&self) -> crate::Result<()> {
        let digits = |v: &str| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit());

        if !digits(&self.client_profile) || self.client_profile.len() > 10 {
            return Err(crate::Error::Config(format!(
                "client profile must be up to 10 digits, got {:?}",
                self.client_profile
            )));
        }
        if !digits(&self.nominated_account) || self.nominated_account.len() > 16 {
            return Err(crate::Error::Config(
                "nominated account must be up to 16 digits".to_string(),
            ));
        }
        if !digits(&self.charges_account) || self.charges_account.len() > 16 {
            return Err(crate::Error::Config(
                "charges account must be up to 16 digits".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EftConfig::default();
        assert_eq!(config.client_profile.len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config: EftConfig = toml::from_str(
            r#"
            client_profile = "1234567890"
            nominated_account = "1987654321"
            "#,
        )
        .unwrap();
        assert_eq!(config.client_profile, "1234567890");
        assert_eq!(config.user_reference, "MEMBERSHIP");
    }

    #[test]
    fn test_from_file_validates() {
        let dir = std::env::temp_dir();
        let good = dir.join(format!("eft-config-good-{}.toml", std::process::id()));
        let bad = dir.join(format!("eft-config-bad-{}.toml", std::process::id()));
        std::fs::write(&good, "client_profile = \"1234567890\"\nnominated_account = \"1987654321\"\n").unwrap();
        std::fs::write(&bad, "client_profile = \"12AB\"\n").unwrap();

        let loaded = EftConfig::from_file(&good);
        let rejected = EftConfig::from_file(&bad);
        std::fs::remove_file(&good).ok();
        std::fs::remove_file(&bad).ok();

        assert_eq!(loaded.unwrap().nominated_account, "1987654321");
        assert!(matches!(rejected, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_long_profile() {
        let config = EftConfig {
            client_profile: "12345678901".to_string(),
            ..EftConfig::default()
        };
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }
}
