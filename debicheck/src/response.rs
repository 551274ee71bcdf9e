//! Mandate status-response decoder
//!
//! Response `02` records carry the MRN, a one-character status and an
//! optional four-digit reason. Inbound records that are too short to hold
//! an MRN and status are logged and skipped; nothing here fails the file.

use crate::types::{MandateStatus, MandateStatusCode, ReasonCode};
use fixed_width::{lines, FieldSpec, Layout, RecordType, RECORD_WIDTH};
use tracing::{debug, warn};

static RESPONSE_FIELDS: [FieldSpec; 5] = [
    FieldSpec::numeric("record_type", 0, 2),
    FieldSpec::text("mrn", 2, 25),
    FieldSpec::text("status", 27, 1),
    FieldSpec::text("reason_code", 28, 4),
    FieldSpec::filler(32, 288),
];

/// Status-response record (`02`)
pub static MANDATE_RESPONSE: Layout = Layout {
    name: "debicheck_mandate_response",
    record_type: RecordType::Detail,
    fields: &RESPONSE_FIELDS,
};

/// Shortest `02` line that still carries an MRN and a status
const MIN_RESPONSE_SPAN: usize = 28;

/// Decode every `02` record of a mandate status-response file
pub fn decode_mandate_response(content: &str) -> Vec<MandateStatus> {
    let mut statuses = Vec::new();

    for (line_no, line) in lines(content) {
        if RecordType::of_line(line) != RecordType::Detail {
            continue;
        }

        let width = line.chars().count();
        if width < MIN_RESPONSE_SPAN {
            warn!(
                "Skipping mandate response on line {}: {} characters, {} required",
                line_no, width, MIN_RESPONSE_SPAN
            );
            continue;
        }

        let padded = format!("{line:<RECORD_WIDTH$}");
        let record = match MANDATE_RESPONSE.decode(&padded) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping mandate response on line {}: {}", line_no, e);
                continue;
            }
        };

        let status_code = record.text("status").unwrap_or_default().to_string();
        let reason_code = record
            .text("reason_code")
            .filter(|c| !c.is_empty() && *c != "0000")
            .map(str::to_string);

        statuses.push(MandateStatus {
            mrn: record.text("mrn").unwrap_or_default().to_string(),
            status: MandateStatusCode::from_code(&status_code),
            reason: reason_code.as_deref().map(ReasonCode::from_code),
            status_code,
            reason_code,
        });
    }

    debug!("Decoded {} mandate statuses", statuses.len());
    statuses
}

#[cfg(test)]
mod tests {
    use super::*;

    const MRN_A: &str = "0198202401100000MEM42XYZ1";
    const MRN_B: &str = "0198202401100000MEM43XYZ2";

    #[test]
    fn test_layout_is_full_width() {
        MANDATE_RESPONSE.validate().unwrap();
    }

    #[test]
    fn test_approved_and_rejected() {
        let content = format!(
            "01HEADER\n02{MRN_A}A0000\n02{MRN_B}R0003\n03000000000200000000000000\n"
        );
        let statuses = decode_mandate_response(&content);
        assert_eq!(statuses.len(), 2);

        assert_eq!(statuses[0].mrn, MRN_A);
        assert_eq!(statuses[0].status, MandateStatusCode::Approved);
        assert_eq!(statuses[0].reason, None);

        assert_eq!(statuses[1].status, MandateStatusCode::Rejected);
        assert_eq!(statuses[1].reason, Some(ReasonCode::InsufficientFunds));
        assert_eq!(statuses[1].reason_description(), Some("Insufficient funds"));
    }

    #[test]
    fn test_unknown_codes_degrade() {
        let content = format!("02{MRN_A}X9999\n");
        let statuses = decode_mandate_response(&content);
        assert_eq!(statuses[0].status, MandateStatusCode::Unknown);
        assert_eq!(statuses[0].status_code, "X");
        assert_eq!(statuses[0].reason, Some(ReasonCode::Unknown));
        assert_eq!(statuses[0].status_description(), "Unknown");
        assert_eq!(statuses[0].reason_description(), Some("Unknown"));
    }

    #[test]
    fn test_missing_reason_and_short_records() {
        let content = format!("02{MRN_A}P\n02SHORT\n");
        let statuses = decode_mandate_response(&content);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].status, MandateStatusCode::Pending);
        assert_eq!(statuses[0].reason_code, None);
    }

    #[test]
    fn test_reason_lookup_table() {
        assert_eq!(ReasonCode::from_code("0001").description(), "Account closed");
        assert_eq!(ReasonCode::from_code("0010"), ReasonCode::DuplicateMandate);
        assert_eq!(MandateStatusCode::from_code("S"), MandateStatusCode::Suspended);
        assert_eq!(MandateStatusCode::from_code("C"), MandateStatusCode::Cancelled);
    }
}
