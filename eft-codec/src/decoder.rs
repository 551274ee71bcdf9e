//! Bank acknowledgement / unpaid file decoder
//!
//! Header and trailer records that are too short are fatal for the file.
//! A `02` record too short to slice is fatal too; a full-length `02` record
//! whose contents do not parse is logged and skipped.

use crate::encoder::TRANSACTION;
use crate::types::{ParsedResponse, ResponseHeader, ResponseTransaction, SkippedRecord, TrailerSummary};
use crate::{Error, Result};
use chrono::NaiveDate;
use fixed_width::standard::{HEADER, TRAILER};
use fixed_width::{cents_to_amount, lines, DecodedRecord, RecordType};
use tracing::{debug, warn};

/// Decode a response file
pub fn decode_response_file(content: &str) -> Result<ParsedResponse> {
    let mut records = lines(content);

    let header = match records.next() {
        Some((_, line)) if RecordType::of_line(line) == RecordType::Header => decode_header(line)?,
        _ => return Err(Error::MissingHeader),
    };

    let mut transactions = Vec::new();
    let mut trailer = None;
    let mut skipped = Vec::new();

    for (line_no, line) in records {
        match RecordType::of_line(line) {
            RecordType::Detail => match decode_transaction(line_no, line)? {
                Ok(tx) => transactions.push(tx),
                Err(reason) => {
                    warn!("Skipping EFT record on line {}: {}", line_no, reason);
                    skipped.push(SkippedRecord { line: line_no, reason });
                }
            },
            RecordType::Trailer => trailer = Some(decode_trailer(line)?),
            RecordType::Security => debug!("Ignoring security record on line {}", line_no),
            RecordType::Header | RecordType::Unknown => {
                let reason = format!("unexpected record type {:?}", line.get(0..2).unwrap_or(line));
                warn!("Skipping EFT record on line {}: {}", line_no, reason);
                skipped.push(SkippedRecord { line: line_no, reason });
            }
        }
    }

    debug!(
        "Decoded EFT response {}: {} transactions, {} skipped",
        header.file_sequence,
        transactions.len(),
        skipped.len()
    );

    Ok(ParsedResponse {
        header,
        transactions,
        trailer,
        skipped,
    })
}

fn decode_header(line: &str) -> Result<ResponseHeader> {
    let record = HEADER.decode(line).map_err(|e| match e {
        fixed_width::Error::RecordTooShort { required, actual } => {
            Error::InvalidHeaderLength { required, actual }
        }
        other => Error::Encoding(other),
    })?;

    let text = |name: &str| record.text(name).unwrap_or_default().to_string();
    Ok(ResponseHeader {
        client_profile: text("client_profile"),
        file_sequence: text("file_sequence"),
        file_type: text("file_type"),
        nominated_account: text("nominated_account"),
        charges_account: text("charges_account"),
        statement_narrative: text("statement_narrative"),
    })
}

/// Outer error: record unusable, abort. Inner error: skip this record.
fn decode_transaction(
    line_no: usize,
    line: &str,
) -> Result<std::result::Result<ResponseTransaction, String>> {
    let record = TRANSACTION.decode(line).map_err(|e| match e {
        fixed_width::Error::RecordTooShort { required, actual } => Error::InvalidTransactionLength {
            line: line_no,
            required,
            actual,
        },
        other => Error::Encoding(other),
    })?;

    Ok(transaction_fields(&record))
}

fn transaction_fields(record: &DecodedRecord<'_>) -> std::result::Result<ResponseTransaction, String> {
    let cents: i64 = record
        .parse("amount")
        .ok_or_else(|| format!("amount {:?} is not numeric", record.raw("amount").unwrap_or_default()))?;

    let raw_date = record.text("action_date").unwrap_or_default();
    let action_date = NaiveDate::parse_from_str(raw_date, "%Y%m%d")
        .map_err(|e| format!("action date {raw_date:?}: {e}"))?;

    let account = record.text("account_number").unwrap_or_default();
    let account_number = match account.trim_start_matches('0') {
        "" if !account.is_empty() => "0".to_string(),
        trimmed => trimmed.to_string(),
    };

    Ok(ResponseTransaction {
        payment_reference: record.text("payment_reference").unwrap_or_default().to_string(),
        branch_code: record.text("branch_code").unwrap_or_default().to_string(),
        account_number,
        amount: cents_to_amount(cents),
        action_date,
        reference: record.raw("reference").unwrap_or_default().trim_end().to_string(),
    })
}

fn decode_trailer(line: &str) -> Result<TrailerSummary> {
    let record = TRAILER.decode(line).map_err(|e| match e {
        fixed_width::Error::RecordTooShort { required, actual } => {
            Error::InvalidTrailerLength { required, actual }
        }
        other => Error::Encoding(other),
    })?;

    let record_count = record.parse("record_count").unwrap_or_else(|| {
        warn!("Trailer record count is not numeric");
        0
    });
    let total_cents = record.parse("total_value").unwrap_or_else(|| {
        warn!("Trailer total value is not numeric");
        0
    });

    Ok(TrailerSummary {
        record_count,
        total_value: cents_to_amount(total_cents),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn header_line() -> String {
        format!(
            "01{}{}{}{}{}{:<30}",
            "1234567890",
            "123456789020240110143000",
            "01",
            "0000001987654321",
            "0000001987654322",
            "IRONWORKS GYM"
        )
    }

    fn detail(amount: &str, date: &str) -> String {
        format!(
            "02{}{}{}{}{}{}{}",
            " ".repeat(16),
            "1234567890202401101430000000000001",
            "198765",
            "0000001012345678",
            amount,
            date,
            "IRONWORKS 00000000000001240115"
        )
    }

    #[test]
    fn test_decode_minimal_response() {
        let content = format!(
            "{}\n{}\n{}\n",
            header_line(),
            detail("000000049900", "20240115"),
            "03000000000100000000049900"
        );
        let parsed = decode_response_file(&content).unwrap();

        assert_eq!(parsed.header.client_profile, "1234567890");
        assert_eq!(parsed.header.statement_narrative, "IRONWORKS GYM");
        assert_eq!(parsed.transactions.len(), 1);

        let tx = &parsed.transactions[0];
        assert_eq!(tx.account_number, "1012345678");
        assert_eq!(tx.branch_code, "198765");
        assert_eq!(tx.amount, dec!(499.00));
        assert_eq!(tx.action_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(tx.reference, "IRONWORKS 00000000000001240115");

        assert_eq!(parsed.trailer.as_ref().unwrap().record_count, 1);
        assert_eq!(parsed.trailer_matches(), Some(true));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(decode_response_file(""), Err(Error::MissingHeader)));
        assert!(matches!(
            decode_response_file("03000000000100000000049900\n"),
            Err(Error::MissingHeader)
        ));
    }

    #[test]
    fn test_short_header_is_fatal() {
        assert!(matches!(
            decode_response_file("0112345\n"),
            Err(Error::InvalidHeaderLength { required: 100, actual: 7 })
        ));
    }

    #[test]
    fn test_short_transaction_is_fatal() {
        let content = format!("{}\n02{}\n", header_line(), " ".repeat(40));
        assert!(matches!(
            decode_response_file(&content),
            Err(Error::InvalidTransactionLength { line: 2, required: 124, .. })
        ));
    }

    #[test]
    fn test_short_trailer_is_fatal() {
        let content = format!("{}\n0300001\n", header_line());
        assert!(matches!(
            decode_response_file(&content),
            Err(Error::InvalidTrailerLength { required: 26, actual: 7 })
        ));
    }

    #[test]
    fn test_unparseable_transaction_is_skipped() {
        let content = format!(
            "{}\n{}\n{}\n",
            header_line(),
            detail("00000004990X", "20240115"),
            detail("000000010000", "20240116"),
        );
        let parsed = decode_response_file(&content).unwrap();
        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.transactions[0].amount, dec!(100.00));
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].line, 2);
        assert_eq!(parsed.trailer_matches(), None);
    }

    #[test]
    fn test_security_record_ignored() {
        let content = format!("{}\n04{}\n", header_line(), "A".repeat(50));
        let parsed = decode_response_file(&content).unwrap();
        assert!(parsed.transactions.is_empty());
        assert!(parsed.skipped.is_empty());
    }
}
