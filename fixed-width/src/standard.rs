//! Header, trailer and security layouts common to every outbound file
//!
//! ```text
//! 01 | client profile (10) | file sequence (24) | file type (2) | nominated acct (16) | charges acct (16) | narrative (30) | filler (220)
//! 03 | record count (10)   | total value cents (14) | filler (294)
//! 04 | hash (50)           | filler (268)
//! ```

use crate::field::{zero_pad, FieldSpec};
use crate::record::{security_digest, Layout, RecordType};
use crate::Result;
use chrono::NaiveDateTime;

/// File type carried in the header record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// EFT same-day-value debit orders
    DebitOrder,
    /// DebiCheck mandate requests
    MandateRequest,
    /// DebiCheck collections
    MandateCollection,
}

impl FileType {
    /// Two-digit code
    pub fn code(&self) -> &'static str {
        match self {
            FileType::DebitOrder => "01",
            FileType::MandateRequest => "03",
            FileType::MandateCollection => "04",
        }
    }
}

static HEADER_FIELDS: [FieldSpec; 8] = [
    FieldSpec::numeric("record_type", 0, 2),
    FieldSpec::numeric("client_profile", 2, 10),
    FieldSpec::numeric("file_sequence", 12, 24),
    FieldSpec::numeric("file_type", 36, 2),
    FieldSpec::numeric("nominated_account", 38, 16),
    FieldSpec::numeric("charges_account", 54, 16),
    FieldSpec::text("statement_narrative", 70, 30),
    FieldSpec::filler(100, 220),
];

/// Header record (`01`)
pub static HEADER: Layout = Layout {
    name: "header",
    record_type: RecordType::Header,
    fields: &HEADER_FIELDS,
};

static TRAILER_FIELDS: [FieldSpec; 4] = [
    FieldSpec::numeric("record_type", 0, 2),
    FieldSpec::numeric("record_count", 2, 10),
    FieldSpec::numeric("total_value", 12, 14),
    FieldSpec::filler(26, 294),
];

/// Trailer record (`03`)
pub static TRAILER: Layout = Layout {
    name: "trailer",
    record_type: RecordType::Trailer,
    fields: &TRAILER_FIELDS,
};

static SECURITY_FIELDS: [FieldSpec; 3] = [
    FieldSpec::numeric("record_type", 0, 2),
    FieldSpec::text("hash", 2, 50),
    FieldSpec::filler(52, 268),
];

/// Security record (`04`)
pub static SECURITY: Layout = Layout {
    name: "security",
    record_type: RecordType::Security,
    fields: &SECURITY_FIELDS,
};

/// Encoded outbound file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    /// Suggested filename
    pub filename: String,
    /// File body, one newline-terminated record per line
    pub content: String,
}

/// 24-digit file sequence: client profile (10) + `YYYYMMDD` + `HHMMSS`
pub fn file_sequence_number(client_profile: &str, now: NaiveDateTime) -> Result<String> {
    let profile = zero_pad("client_profile", client_profile, 10)?;
    Ok(format!("{}{}", profile, now.format("%Y%m%d%H%M%S")))
}

/// Build the security record for the records written so far
pub fn security_record(records: &[String]) -> Result<String> {
    SECURITY
        .builder()
        .set("hash", security_digest(records, 50))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_shared_layouts_are_full_width() {
        for layout in [&HEADER, &TRAILER, &SECURITY] {
            layout.validate().unwrap();
        }
    }

    #[test]
    fn test_file_sequence_number() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(8, 5, 9)
            .unwrap();
        let seq = file_sequence_number("12345", now).unwrap();
        assert_eq!(seq, "000001234520240110080509");
        assert_eq!(seq.len(), 24);

        assert!(file_sequence_number("12345678901", now).is_err());
    }

    #[test]
    fn test_security_record() {
        let record = security_record(&["01".to_string()]).unwrap();
        assert!(record.starts_with("04"));
        assert_eq!(record.len(), crate::RECORD_WIDTH);
        assert_eq!(record[2..52].trim().len(), 50);
    }
}
