//! Plain-text reconciliation report

use crate::types::*;
use std::fmt::Write;

/// Transactions listed per section
pub const REPORT_ROWS: usize = 10;

/// Render a reconciliation report
pub fn format_report(report: &ReconciliationReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    // writing to a String cannot fail
    let _ = writeln!(out, "RECONCILIATION REPORT");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Credit transactions: {:>8}", summary.total_transactions);
    let _ = writeln!(out, "Matched:             {:>8}", summary.matched_count);
    let _ = writeln!(out, "Unmatched:           {:>8}", summary.unmatched_count);
    let _ = writeln!(out, "Match rate:          {:>7.1}%", summary.match_rate);
    let _ = writeln!(out, "Total amount:        {:>12.2}", summary.total_amount);
    let _ = writeln!(out, "Matched amount:      {:>12.2}", summary.matched_amount);
    let _ = writeln!(out, "Unmatched amount:    {:>12.2}", summary.unmatched_amount);
    let _ = writeln!(out);

    let _ = writeln!(out, "BY CONFIDENCE");
    let _ = writeln!(out, "{}", "-".repeat(60));
    let _ = writeln!(out, "High:   {:>6}", summary.by_confidence.high);
    let _ = writeln!(out, "Medium: {:>6}", summary.by_confidence.medium);
    let _ = writeln!(out, "Low:    {:>6}", summary.by_confidence.low);
    let _ = writeln!(out);

    let _ = writeln!(out, "MATCHED ({})", report.matched.len());
    let _ = writeln!(out, "{}", "-".repeat(60));
    for m in report.matched.iter().take(REPORT_ROWS) {
        let _ = writeln!(
            out,
            "{} {:>12.2} {:<12} {:<6} {}",
            m.transaction.date,
            m.transaction.amount,
            m.matched.invoice_id,
            m.matched.confidence.as_str(),
            m.matched.reason
        );
    }
    if report.matched.len() > REPORT_ROWS {
        let _ = writeln!(out, "... and {} more", report.matched.len() - REPORT_ROWS);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "UNMATCHED ({})", report.unmatched.len());
    let _ = writeln!(out, "{}", "-".repeat(60));
    for tx in report.unmatched.iter().take(REPORT_ROWS) {
        let _ = writeln!(out, "{} {:>12.2} {}", tx.date, tx.amount, tx.reference);
    }
    if report.unmatched.len() > REPORT_ROWS {
        let _ = writeln!(out, "... and {} more", report.unmatched.len() - REPORT_ROWS);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_mock_fti, reconcile};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_sections() {
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let feed = generate_mock_fti(40, as_of);
        let invoices = vec![Invoice {
            id: "INV-1".to_string(),
            member_id: "MEM-00001".to_string(),
            amount: dec!(299.00),
            due_date: as_of,
        }];
        let report = reconcile(&feed, &invoices);
        let text = format_report(&report);

        assert!(text.contains("RECONCILIATION REPORT"));
        assert!(text.contains("High:"));
        assert!(text.contains(&format!("UNMATCHED ({})", report.unmatched.len())));
        assert!(text.contains("... and"));
        let unmatched_lines = text
            .split("UNMATCHED")
            .nth(1)
            .unwrap()
            .lines()
            .filter(|l| l.starts_with("2024-"))
            .count();
        assert_eq!(unmatched_lines, REPORT_ROWS);
    }
}
