//! Bank integration walkthrough
//!
//! Runs every component against generated data, with the bank calls in
//! mock mode: debit order file round trip, DebiCheck mandates and
//! collections, account verification, and statement reconciliation.

use anyhow::{Context, Result};
use avs_client::{
    bank_name, validate_account_number, AccountHolderInformation, AccountVerification, AvsAccountType,
    AvsClient, AvsConfig, Flag, Outcome as AvsOutcome,
};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use colored::Colorize;
use debicheck::{
    decode_mandate_response, AccountType, AdjustmentCategory, Collection, CollectionType,
    DebiCheckConfig, DebiCheckEncoder, DebiCheckTransactionType, Frequency, Mandate, MandateAction,
    MandateStatusCode, MandateType,
};
use eft_codec::{decode_response_file, DebitOrder, EftConfig, EftEncoder};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use ti_recon::{format_report, reconcile, Invoice, StatementKind, TiClient, TiConfig};
use tracing::info;

/// Member on the demo roll
#[derive(Debug, Clone)]
struct DemoMember {
    member_id: String,
    name: String,
    id_number: String,
    bank: &'static str,
    branch_code: String,
    account_number: String,
    fee: Decimal,
}

/// What the walkthrough produced
#[derive(Debug, Default, Clone)]
struct DemoState {
    eft_records: usize,
    mandates_sent: usize,
    mandates_approved: usize,
    collections_sent: usize,
    accounts_verified: usize,
    accounts_found: usize,
    statement_transactions: usize,
    reconciled: usize,
}

struct DemoOrchestrator {
    eft: EftEncoder,
    debicheck: DebiCheckEncoder,
    avs: AvsClient,
    ti: TiClient,
    now: NaiveDateTime,
    state: DemoState,
}

impl DemoOrchestrator {
    fn new(now: NaiveDateTime) -> Result<Self> {
        let eft = EftEncoder::new(EftConfig {
            client_profile: "1234567890".to_string(),
            nominated_account: "1987654321".to_string(),
            charges_account: "1987654322".to_string(),
            statement_narrative: "IRONWORKS GYM".to_string(),
            user_reference: "IRONWORKS".to_string(),
        });
        let debicheck = DebiCheckEncoder::new(DebiCheckConfig {
            client_profile: "1234567890".to_string(),
            creditor_abbreviation: "IRONWORKS".to_string(),
            nominated_account: "1987654321".to_string(),
            charges_account: "1987654322".to_string(),
            ..Default::default()
        });
        let avs = AvsClient::new(AvsConfig::load(None).context("loading AVS config")?)?;
        let ti = TiClient::new(TiConfig::load(None).context("loading TI config")?)?;

        Ok(Self {
            eft,
            debicheck,
            avs,
            ti,
            now,
            state: DemoState::default(),
        })
    }

    fn members(&self) -> Vec<DemoMember> {
        let roll = [
            ("MEM-0001", "T NKOSI", "8001015009087", "nedbank", "1012345670", dec!(499.00)),
            ("MEM-0002", "S MOKOENA", "9001015800081", "fnb", "62000000002", dec!(349.00)),
            ("MEM-0003", "A VAN WYK", "8505055800087", "capitec", "1500000006", dec!(599.00)),
            ("MEM-0004", "L NAIDOO", "9203035800082", "absa", "4050000009", dec!(299.00)),
        ];
        roll.into_iter()
            .map(|(member_id, name, id_number, bank, account, fee)| DemoMember {
                member_id: member_id.to_string(),
                name: name.to_string(),
                id_number: id_number.to_string(),
                bank,
                branch_code: avs_client::universal_branch(bank).unwrap_or("000000").to_string(),
                account_number: account.to_string(),
                fee,
            })
            .collect()
    }

    async fn run(&mut self) -> Result<DemoState> {
        println!("\n{}", "=".repeat(65).bright_blue());
        println!("{}", "Bank Integration Core - walkthrough".bold());
        println!("{}\n", "=".repeat(65).bright_blue());

        let members = self.members();
        self.debit_orders(&members)?;
        self.mandates(&members)?;
        self.verify_accounts(&members).await?;
        self.reconcile_statement(&members).await?;

        println!("\n{}", "Walkthrough complete".green().bold());
        println!("{:#?}", self.state);
        Ok(self.state.clone())
    }

    fn debit_orders(&mut self, members: &[DemoMember]) -> Result<()> {
        println!("{}", "[1] EFT debit order file".yellow().bold());
        let action_date = self.now.date() + Duration::days(2);
        let orders: Vec<DebitOrder> = members
            .iter()
            .map(|m| DebitOrder {
                branch_code: m.branch_code.clone(),
                account_number: m.account_number.clone(),
                amount: m.fee,
                action_date,
            })
            .collect();

        let file = self.eft.encode_debit_order_file_at(&orders, self.now)?;
        println!("  {} {} ({} lines)", "wrote".green(), file.filename, file.content.lines().count());

        // the bank echoes the file back as the acknowledgement
        let ack = decode_response_file(&file.content)?;
        println!(
            "  acknowledged {} transactions, total {}, trailer agrees: {:?}",
            ack.transactions.len(),
            ack.total_amount(),
            ack.trailer_matches()
        );
        self.state.eft_records = ack.transactions.len();
        Ok(())
    }

    fn mandates(&mut self, members: &[DemoMember]) -> Result<()> {
        println!("\n{}", "[2] DebiCheck mandates and collections".yellow().bold());
        let first_collection = self.now.date() + Duration::days(7);
        let mandates: Vec<Mandate> = members
            .iter()
            .map(|m| Mandate {
                action: MandateAction::Add,
                mrn: None,
                member_id: m.member_id.clone(),
                contract_reference: m.member_id.clone(),
                debtor_account: m.account_number.clone(),
                debtor_branch: m.branch_code.clone(),
                account_type: AccountType::Current,
                mandate_type: MandateType::Fixed,
                debtor_id: m.id_number.clone(),
                debtor_name: m.name.clone(),
                first_collection_date: first_collection,
                collection_day: 1,
                frequency: Frequency::Monthly,
                installment: m.fee,
                maximum: m.fee * dec!(1.5),
                adjustment_category: AdjustmentCategory::Annually,
                adjustment_rate: dec!(8.00),
                transaction_type: DebiCheckTransactionType::Tt1,
                tracking: true,
            })
            .collect();

        let file = self.debicheck.encode_mandate_file_at(&mandates, self.now)?;
        println!("  {} {}", "wrote".green(), file.filename);
        self.state.mandates_sent = mandates.len();

        // simulated bank response: every other mandate is declined
        let mrns: Vec<String> = file
            .content
            .lines()
            .filter(|line| line.starts_with("02"))
            .filter_map(|line| line.get(3..28).map(str::to_string))
            .collect();
        let response: String = mrns
            .iter()
            .enumerate()
            .map(|(i, mrn)| {
                if i % 2 == 0 {
                    format!("02{mrn}A0000\n")
                } else {
                    format!("02{mrn}R0004\n")
                }
            })
            .collect();

        let statuses = decode_mandate_response(&response);
        for status in &statuses {
            println!(
                "  {} {}{}",
                status.mrn,
                status.status_description(),
                status
                    .reason_description()
                    .map(|r| format!(" ({r})"))
                    .unwrap_or_default()
            );
        }

        let collections: Vec<Collection> = statuses
            .iter()
            .filter(|s| s.status == MandateStatusCode::Approved)
            .zip(members.iter().step_by(2))
            .map(|(status, member)| Collection {
                mrn: status.mrn.clone(),
                contract_reference: member.member_id.clone(),
                amount: member.fee,
                action_date: first_collection,
                collection_type: CollectionType::Recurring,
            })
            .collect();
        self.state.mandates_approved = collections.len();

        if !collections.is_empty() {
            let file = self.debicheck.encode_collection_file_at(
                &collections,
                &self.debicheck.config().nominated_account,
                &self.debicheck.config().charges_account,
                self.now,
            )?;
            println!("  {} {} ({} collections)", "wrote".green(), file.filename, collections.len());
            self.state.collections_sent = collections.len();
        }
        Ok(())
    }

    async fn verify_accounts(&mut self, members: &[DemoMember]) -> Result<()> {
        println!("\n{}", "[3] Account verification".yellow().bold());
        let verifications: Vec<AccountVerification> = members
            .iter()
            .filter(|m| validate_account_number(&m.account_number, m.bank).is_valid())
            .map(|m| AccountVerification {
                bank_identifier: m.bank.to_string(),
                account_number: m.account_number.clone(),
                account_type: Some(AvsAccountType::Current),
                sort_code: None,
                holder: AccountHolderInformation {
                    name: Some(m.name.clone()),
                    ..AccountHolderInformation::with_sa_id(m.id_number.clone())
                },
            })
            .collect();

        let outcome = self.avs.verify(&verifications, true).await?;
        let how = match &outcome {
            AvsOutcome::Live(_) => "live".to_string(),
            AvsOutcome::Simulated(_) => "simulated".to_string(),
            AvsOutcome::Degraded { cause, .. } => format!("degraded: {cause}"),
        };
        let result = outcome.into_value();
        println!("  result {} ({})", result.result_code.code(), how);
        for item in &result.items {
            println!(
                "  {:<20} {:<12} found={:?} name={:?} debits={:?}",
                bank_name(&item.bank_identifier).unwrap_or("?"),
                item.account_number,
                item.outcomes.account_found,
                item.outcomes.name_match,
                item.outcomes.accepts_debits
            );
        }

        self.state.accounts_verified = result.items.len();
        self.state.accounts_found = result
            .items
            .iter()
            .filter(|item| item.outcomes.account_found == Some(Flag::Y))
            .count();
        Ok(())
    }

    async fn reconcile_statement(&mut self, members: &[DemoMember]) -> Result<()> {
        println!("\n{}", "[4] Statement reconciliation".yellow().bold());
        let date = self.now.date();
        let outcome = self.ti.fetch_statement(StatementKind::Fti, date).await?;
        let transactions = outcome.into_value();

        // member payments on the feed carry the member id as reference
        let invoices: Vec<Invoice> = transactions
            .iter()
            .filter(|tx| tx.is_credit() && tx.reference.starts_with("MEM"))
            .enumerate()
            .map(|(i, tx)| Invoice {
                id: format!("INV-{:04}", i + 1),
                member_id: tx.reference.clone(),
                amount: tx.amount,
                due_date: tx.date,
            })
            .chain(members.iter().map(|m| Invoice {
                id: format!("INV-{}", m.member_id),
                member_id: m.member_id.clone(),
                amount: m.fee,
                due_date: date,
            }))
            .collect();

        let report = reconcile(&transactions, &invoices);
        println!("{}", format_report(&report));

        self.state.statement_transactions = transactions.len();
        self.state.reconciled = report.summary.matched_count;
        info!(
            "Reconciled {} of {} credits ({:.1}%)",
            report.summary.matched_count, report.summary.total_transactions, report.summary.match_rate
        );
        Ok(())
    }
}

fn demo_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 10)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_else(|| Local::now().naive_local())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting bank integration walkthrough");

    let mut orchestrator = DemoOrchestrator::new(demo_clock())?;
    orchestrator.run().await?;

    info!("Walkthrough finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_walkthrough() {
        let mut orchestrator = DemoOrchestrator::new(demo_clock()).unwrap();
        let state = orchestrator.run().await.unwrap();

        assert_eq!(state.eft_records, 4);
        assert_eq!(state.mandates_sent, 4);
        assert_eq!(state.mandates_approved, 2);
        assert_eq!(state.collections_sent, 2);
        assert_eq!(state.accounts_verified, 4);
        // account numbers ending in 9 do not exist in the simulator
        assert_eq!(state.accounts_found, 3);
        assert_eq!(state.statement_transactions, 25);
        assert!(state.reconciled >= 5);
    }
}
