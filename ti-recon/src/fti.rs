//! FTI / PTI statement parsing
//!
//! CSV columns: Statement Number, Date, Time, Balance, Transaction Type,
//! Channel, Amount, Reference, Description, Transaction Key, Process Key.
//! XML: `<Statement><Transaction>` with the same fields as child elements
//! (`StatementNumber`, `Date`, ...).
//!
//! A row without a usable date or amount is logged and skipped. Unknown
//! transaction types and channels are kept as `Unknown`.

use crate::{types::*, Error, Result};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, Trim};
use quick_xml::events::Event;
use quick_xml::Reader;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FtiRecord {
    #[serde(rename = "Statement Number", alias = "StatementNumber")]
    statement_number: Option<String>,
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Time")]
    time: Option<String>,
    #[serde(rename = "Balance")]
    balance: Option<String>,
    #[serde(rename = "Transaction Type", alias = "TransactionType")]
    transaction_type: Option<String>,
    #[serde(rename = "Channel")]
    channel: Option<String>,
    #[serde(rename = "Amount")]
    amount: Option<String>,
    #[serde(rename = "Reference")]
    reference: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Transaction Key", alias = "TransactionKey")]
    transaction_key: Option<String>,
    #[serde(rename = "Process Key", alias = "ProcessKey")]
    process_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlStatement {
    #[serde(rename = "Transaction", default)]
    transactions: Vec<FtiRecord>,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ' ' | ',')).collect();
    cleaned.parse().ok()
}

impl FtiRecord {
    fn into_transaction(self) -> std::result::Result<BankTransaction, String> {
        let field = |value: Option<String>| value.map(|v| v.trim().to_string()).unwrap_or_default();

        let raw_date = field(self.date);
        let date = parse_date(&raw_date).ok_or_else(|| format!("date {raw_date:?} is not a date"))?;
        let raw_amount = field(self.amount);
        let amount = parse_amount(&raw_amount).ok_or_else(|| format!("amount {raw_amount:?} is not numeric"))?;

        let raw_time = field(self.time);
        let time = if raw_time.is_empty() {
            None
        } else {
            parse_time(&raw_time)
        };

        Ok(BankTransaction {
            statement_number: field(self.statement_number),
            date,
            time,
            balance: parse_amount(&field(self.balance)).unwrap_or_default(),
            transaction_type: TransactionType::from_code(&field(self.transaction_type)),
            channel: Channel::from_code(&field(self.channel)),
            amount,
            reference: field(self.reference),
            description: field(self.description),
            transaction_key: field(self.transaction_key),
            process_key: field(self.process_key),
        })
    }
}

/// Parse an FTI/PTI CSV statement
pub fn parse_fti_csv(text: &str) -> Result<Vec<BankTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    for required in ["Date", "Amount"] {
        if !headers.iter().any(|h| h == required) {
            return Err(Error::MalformedResponse(format!("CSV has no {required:?} column")));
        }
    }

    let mut transactions = Vec::new();
    for (index, row) in rdr.deserialize::<FtiRecord>().enumerate() {
        // header is line 1
        let line = index + 2;
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping FTI row {}: {}", line, e);
                continue;
            }
        };
        match record.into_transaction() {
            Ok(tx) => transactions.push(tx),
            Err(reason) => warn!("Skipping FTI row {}: {}", line, reason),
        }
    }

    debug!("Parsed {} FTI transactions from CSV", transactions.len());
    Ok(transactions)
}

fn root_element(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Ok(Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned()))
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
    }
}

/// Parse an FTI/PTI XML statement
pub fn parse_fti_xml(text: &str) -> Result<Vec<BankTransaction>> {
    match root_element(text)? {
        Some(root) if root == "Statement" => {}
        Some(root) => {
            return Err(Error::MalformedResponse(format!(
                "expected <Statement> root, found <{root}>"
            )))
        }
        None => return Err(Error::MalformedResponse("no root element".to_string())),
    }

    let statement: XmlStatement = quick_xml::de::from_str(text).map_err(|e| Error::Xml(e.to_string()))?;

    let mut transactions = Vec::with_capacity(statement.transactions.len());
    for (index, record) in statement.transactions.into_iter().enumerate() {
        match record.into_transaction() {
            Ok(tx) => transactions.push(tx),
            Err(reason) => warn!("Skipping FTI transaction {}: {}", index + 1, reason),
        }
    }

    debug!("Parsed {} FTI transactions from XML", transactions.len());
    Ok(transactions)
}
