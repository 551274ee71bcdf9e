//! EFT same-day-value debit order file encoder

use crate::{config::EftConfig, types::DebitOrder, Error, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use fixed_width::standard::{HEADER, TRAILER};
use fixed_width::{
    amount_to_cents, assemble, file_sequence_number, security_record, truncate_or_pad, zero_pad,
    EncodedFile, FieldSpec, FileType, Layout, RecordType,
};
use tracing::{debug, info};

static TRANSACTION_FIELDS: [FieldSpec; 9] = [
    FieldSpec::numeric("record_type", 0, 2),
    FieldSpec::text("override", 2, 16),
    FieldSpec::numeric("payment_reference", 18, 34),
    FieldSpec::numeric("branch_code", 52, 6),
    FieldSpec::numeric("account_number", 58, 16),
    FieldSpec::numeric("amount", 74, 12),
    FieldSpec::numeric("action_date", 86, 8),
    FieldSpec::text("reference", 94, 30),
    FieldSpec::filler(124, 196),
];

/// Transaction record (`02`)
pub static TRANSACTION: Layout = Layout {
    name: "eft_transaction",
    record_type: RecordType::Detail,
    fields: &TRANSACTION_FIELDS,
};

/// 24-digit id: client profile (10) + date (8) + time of day (6).
///
/// Used as the header file sequence and as the prefix of every payment
/// reference in the same file.
pub fn generate_file_sequence_number(client_profile: &str, now: NaiveDateTime) -> Result<String> {
    Ok(file_sequence_number(client_profile, now)?)
}

/// 34-character payment reference: file sequence (24) + index (10)
pub fn payment_reference(file_sequence: &str, index: usize) -> Result<String> {
    let index = zero_pad("payment_reference", &index.to_string(), 10)?;
    Ok(format!("{file_sequence}{index}"))
}

/// 30-character statement reference: user reference (10) + contract
/// reference (14) + cycle date `YYMMDD`
pub fn statement_reference(user_reference: &str, index: usize, action_date: NaiveDate) -> Result<String> {
    Ok(format!(
        "{}{}{}",
        truncate_or_pad(user_reference, 10),
        zero_pad("contract_reference", &index.to_string(), 14)?,
        action_date.format("%y%m%d")
    ))
}

/// Encodes debit order batches
#[derive(Debug, Clone)]
pub struct EftEncoder {
    config: EftConfig,
}

impl EftEncoder {
    /// Create new encoder
    pub fn new(config: EftConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &EftConfig {
        &self.config
    }

    /// Encode a batch stamped with the current local time
    pub fn encode_debit_order_file(&self, orders: &[DebitOrder]) -> Result<EncodedFile> {
        self.encode_debit_order_file_at(orders, Local::now().naive_local())
    }

    /// Encode a batch: header, one `02` per order, trailer, security record
    pub fn encode_debit_order_file_at(
        &self,
        orders: &[DebitOrder],
        now: NaiveDateTime,
    ) -> Result<EncodedFile> {
        if orders.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let file_sequence = generate_file_sequence_number(&self.config.client_profile, now)?;
        debug!("Encoding EFT file {} with {} orders", file_sequence, orders.len());

        let mut records = Vec::with_capacity(orders.len() + 3);
        records.push(
            HEADER
                .builder()
                .set("client_profile", self.config.client_profile.as_str())
                .set("file_sequence", file_sequence.as_str())
                .set("file_type", FileType::DebitOrder.code())
                .set("nominated_account", self.config.nominated_account.as_str())
                .set("charges_account", self.config.charges_account.as_str())
                .set("statement_narrative", self.config.statement_narrative.as_str())
                .build()?,
        );

        let mut total_cents: u64 = 0;
        for (i, order) in orders.iter().enumerate() {
            let index = i + 1;
            let cents = amount_to_cents(order.amount)?;
            total_cents += cents;

            records.push(
                TRANSACTION
                    .builder()
                    .set("payment_reference", payment_reference(&file_sequence, index)?)
                    .set("branch_code", order.branch_code.as_str())
                    .set("account_number", order.account_number.as_str())
                    .set("amount", cents.to_string())
                    .set("action_date", order.action_date.format("%Y%m%d").to_string())
                    .set(
                        "reference",
                        statement_reference(&self.config.user_reference, index, order.action_date)?,
                    )
                    .build()?,
            );
        }

        records.push(
            TRAILER
                .builder()
                .set("record_count", orders.len().to_string())
                .set("total_value", total_cents.to_string())
                .build()?,
        );
        let security = security_record(&records)?;
        records.push(security);

        let filename = format!("EFT_DO_{file_sequence}.txt");
        info!(
            "Encoded EFT debit order file {} ({} orders, {} cents)",
            filename,
            orders.len(),
            total_cents
        );

        Ok(EncodedFile {
            filename,
            content: assemble(&records),
        })
    }
}
