//! Transaction-to-invoice matching
//!
//! Tiers are tried in order and the first hit wins:
//! 1. high: invoice or member id appears in the reference (or description)
//!    and the amount is within 1%
//! 2. medium: amount within 1% and due date within 3 days
//! 3. low: amount within 1%
//!
//! Invoices with a zero or negative amount never match. Invoices are not
//! consumed, so several transactions may match the same invoice.

use crate::types::*;
use rust_decimal::Decimal;
use tracing::debug;

/// Days between transaction date and due date for a medium match
pub const DATE_WINDOW_DAYS: i64 = 3;

/// 1%
fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

fn amount_matches(amount: Decimal, invoice: &Invoice) -> bool {
    invoice.amount > Decimal::ZERO && (amount.abs() - invoice.amount).abs() <= invoice.amount * tolerance()
}

/// Invoice or member id found in the reference or description
fn reference_match<'a>(transaction: &BankTransaction, invoice: &'a Invoice) -> Option<&'a str> {
    let reference = transaction.reference.to_uppercase();
    let description = transaction.description.to_uppercase();

    [invoice.id.as_str(), invoice.member_id.as_str()]
        .into_iter()
        .filter(|id| !id.trim().is_empty())
        .find(|id| {
            let needle = id.trim().to_uppercase();
            reference.contains(&needle) || description.contains(&needle)
        })
}

fn within_window(transaction: &BankTransaction, invoice: &Invoice) -> bool {
    (transaction.date - invoice.due_date).num_days().abs() <= DATE_WINDOW_DAYS
}

fn result(invoice: &Invoice, confidence: Confidence, reason: String) -> MatchResult {
    MatchResult {
        invoice_id: invoice.id.clone(),
        member_id: invoice.member_id.clone(),
        confidence,
        reason,
    }
}

/// Find the invoice a transaction most likely settles
pub fn match_transaction(transaction: &BankTransaction, invoices: &[Invoice]) -> Option<MatchResult> {
    let candidates: Vec<&Invoice> = invoices
        .iter()
        .filter(|invoice| amount_matches(transaction.amount, invoice))
        .collect();

    let matched = candidates
        .iter()
        .find_map(|invoice| {
            reference_match(transaction, invoice).map(|id| {
                result(
                    invoice,
                    Confidence::High,
                    format!("reference contains {id} and amount matches"),
                )
            })
        })
        .or_else(|| {
            candidates
                .iter()
                .find(|invoice| within_window(transaction, invoice))
                .map(|invoice| {
                    let days = (transaction.date - invoice.due_date).num_days().abs();
                    result(
                        invoice,
                        Confidence::Medium,
                        format!("amount matches and due date is {days} day(s) away"),
                    )
                })
        })
        .or_else(|| {
            candidates
                .first()
                .map(|invoice| result(invoice, Confidence::Low, "amount matches".to_string()))
        });

    if let Some(m) = &matched {
        debug!(
            "Matched {} {} to {} ({})",
            transaction.transaction_key,
            transaction.amount,
            m.invoice_id,
            m.confidence.as_str()
        );
    }
    matched
}

/// Match every credit transaction against the invoices
pub fn reconcile(transactions: &[BankTransaction], invoices: &[Invoice]) -> ReconciliationReport {
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    let mut by_confidence = ConfidenceBreakdown::default();
    let mut total_amount = Decimal::ZERO;
    let mut matched_amount = Decimal::ZERO;

    for transaction in transactions.iter().filter(|tx| tx.is_credit()) {
        total_amount += transaction.amount;
        match match_transaction(transaction, invoices) {
            Some(result) => {
                match result.confidence {
                    Confidence::High => by_confidence.high += 1,
                    Confidence::Medium => by_confidence.medium += 1,
                    Confidence::Low => by_confidence.low += 1,
                }
                matched_amount += transaction.amount;
                matched.push(ReconciliationMatch {
                    transaction: transaction.clone(),
                    matched: result,
                });
            }
            None => unmatched.push(transaction.clone()),
        }
    }

    let total_transactions = matched.len() + unmatched.len();
    let match_rate = if total_transactions == 0 {
        0.0
    } else {
        matched.len() as f64 / total_transactions as f64 * 100.0
    };

    let summary = ReconciliationSummary {
        total_transactions,
        matched_count: matched.len(),
        unmatched_count: unmatched.len(),
        match_rate,
        total_amount,
        matched_amount,
        unmatched_amount: total_amount - matched_amount,
        by_confidence,
    };

    ReconciliationReport {
        matched,
        unmatched,
        summary,
    }
}
