//! Synthetic FTI feed
//!
//! Cycles through five patterns. Each pattern's amount moves linearly
//! across its range over the feed, and the balance accumulates the signed
//! amounts from a fixed opening balance.

use crate::types::*;
use chrono::{Duration, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

/// Balance before the first synthetic transaction
pub const OPENING_BALANCE_CENTS: i64 = 10_000_00;

struct Pattern {
    description: &'static str,
    reference: &'static str,
    transaction_type: TransactionType,
    channel: Channel,
    min_cents: i64,
    max_cents: i64,
    credit: bool,
}

static PATTERNS: [Pattern; 5] = [
    Pattern {
        description: "MEMBER PAYMENT",
        reference: "MEM",
        transaction_type: TransactionType::EftCredit,
        channel: Channel::Eft,
        min_cents: 299_00,
        max_cents: 999_00,
        credit: true,
    },
    Pattern {
        description: "DEBIT ORDER COLLECTION",
        reference: "DO",
        transaction_type: TransactionType::DebitOrder,
        channel: Channel::System,
        min_cents: 199_00,
        max_cents: 599_00,
        credit: true,
    },
    Pattern {
        description: "ONLINE PAYMENT",
        reference: "WEB",
        transaction_type: TransactionType::TransferIn,
        channel: Channel::Internet,
        min_cents: 100_00,
        max_cents: 1_500_00,
        credit: true,
    },
    Pattern {
        description: "CASH DEPOSIT",
        reference: "CASH",
        transaction_type: TransactionType::CashDeposit,
        channel: Channel::Branch,
        min_cents: 50_00,
        max_cents: 2_000_00,
        credit: true,
    },
    Pattern {
        description: "BANK CHARGES",
        reference: "FEE",
        transaction_type: TransactionType::BankCharge,
        channel: Channel::System,
        min_cents: 5_00,
        max_cents: 85_00,
        credit: false,
    },
];

/// `count` synthetic transactions ending on `as_of`, five per day
pub fn generate_mock_fti(count: usize, as_of: NaiveDate) -> Vec<BankTransaction> {
    let rounds = count.div_ceil(PATTERNS.len()).max(1) as i64;
    let statement_number = as_of.format("%Y%m%d").to_string();
    let mut balance = Decimal::new(OPENING_BALANCE_CENTS, 2);

    (0..count)
        .map(|index| {
            let pattern = &PATTERNS[index % PATTERNS.len()];
            let round = (index / PATTERNS.len()) as i64;

            let cents = if rounds > 1 {
                pattern.min_cents + (pattern.max_cents - pattern.min_cents) * round / (rounds - 1)
            } else {
                pattern.min_cents
            };
            let amount = if pattern.credit {
                Decimal::new(cents, 2)
            } else {
                Decimal::new(-cents, 2)
            };
            balance += amount;

            let date = as_of - Duration::days(rounds - 1 - round);
            let minutes = (8 * 60 + 7 * (index % PATTERNS.len()) as u32 * 10) % (24 * 60);
            let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0);
            let sequence = index + 1;

            BankTransaction {
                statement_number: statement_number.clone(),
                date,
                time,
                balance,
                transaction_type: pattern.transaction_type,
                channel: pattern.channel,
                amount,
                reference: format!("{}-{:05}", pattern.reference, sequence),
                description: pattern.description.to_string(),
                transaction_key: format!("TK{:010}", sequence),
                process_key: format!("PK{}{:04}", statement_number, sequence),
            }
        })
        .collect()
}
