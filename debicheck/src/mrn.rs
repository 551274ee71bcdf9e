//! Mandate reference numbers
//!
//! `{bank number (4)}{creation date YYYYMMDD (8)}{free format (13)}`
//!
//! The free format part is the first 7 alphanumerics of the member id
//! followed by a 6-character suffix, left-filled with zeros to 13. The Core
//! does not remember issued MRNs; uniqueness is the caller's concern.

use crate::{Error, Result};
use chrono::NaiveDate;
use fixed_width::zero_pad;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a mandate reference number
pub const MRN_LENGTH: usize = 25;

/// New MRN with a random suffix
pub fn generate_mrn(bank_number: &str, member_id: &str, created: NaiveDate) -> Result<String> {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    build(bank_number, member_id, created, &suffix)
}

/// MRN whose suffix is a digest of the member id, so the same member and
/// date always give the same MRN
pub fn derive_mrn(bank_number: &str, member_id: &str, created: NaiveDate) -> Result<String> {
    let digest = Sha256::digest(member_id.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let suffix = format!("{:06}", u64::from_be_bytes(head) % 1_000_000);
    build(bank_number, member_id, created, &suffix)
}

/// Check an MRN has the expected length
pub fn validate_mrn(mrn: &str) -> Result<()> {
    if mrn.chars().count() != MRN_LENGTH {
        return Err(Error::InvalidMrn(mrn.to_string()));
    }
    Ok(())
}

fn build(bank_number: &str, member_id: &str, created: NaiveDate, suffix: &str) -> Result<String> {
    if bank_number.len() != 4 {
        return Err(Error::Config(format!(
            "bank number must be 4 digits, got {bank_number:?}"
        )));
    }
    let bank = zero_pad("bank_number", bank_number, 4)?;

    let member: String = member_id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(7)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let free_format = format!("{:0>13}", format!("{member}{suffix}"));

    Ok(format!("{}{}{}", bank, created.format("%Y%m%d"), free_format))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_generated_mrn_shape() {
        let mrn = generate_mrn("0198", "MEM-000123-XYZ", day()).unwrap();
        assert_eq!(mrn.len(), MRN_LENGTH);
        assert!(mrn.starts_with("019820240110"));
        assert_eq!(&mrn[12..19], "MEM0001");
        assert!(mrn[19..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_short_member_id_is_zero_filled() {
        let mrn = derive_mrn("0198", "42", day()).unwrap();
        assert_eq!(mrn.len(), MRN_LENGTH);
        assert_eq!(&mrn[12..17], "00000");
        assert_eq!(&mrn[17..19], "42");
    }

    #[test]
    fn test_member_segment_drops_punctuation() {
        let mrn = derive_mrn("0198", "mem-000123", day()).unwrap();
        assert_eq!(&mrn[12..19], "MEM0001");

        // fewer than 7 usable characters: zero-filled on the left
        let mrn = derive_mrn("0198", "ab-c 1/", day()).unwrap();
        assert_eq!(mrn.len(), MRN_LENGTH);
        assert_eq!(&mrn[12..15], "000");
        assert_eq!(&mrn[15..19], "ABC1");

        let mrn = derive_mrn("0198", "\u{e9}\n--", day()).unwrap();
        assert_eq!(&mrn[12..19], "0000000");
        assert!(mrn.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_derived_mrn_is_stable() {
        let a = derive_mrn("0198", "member-7781", day()).unwrap();
        let b = derive_mrn("0198", "member-7781", day()).unwrap();
        let c = derive_mrn("0198", "member-7782", day()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_bad_bank_number() {
        assert!(generate_mrn("12345", "M1", day()).is_err());
        assert!(generate_mrn("12A4", "M1", day()).is_err());
    }

    #[test]
    fn test_validate_mrn() {
        assert!(validate_mrn(&derive_mrn("0198", "M1", day()).unwrap()).is_ok());
        assert!(matches!(validate_mrn("SHORT"), Err(Error::InvalidMrn(_))));
    }
}
