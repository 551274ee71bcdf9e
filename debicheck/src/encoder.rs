//! Mandate request and collection file encoders

use crate::mrn::{derive_mrn, generate_mrn, validate_mrn};
use crate::{config::DebiCheckConfig, types::*, Error, Result};
use chrono::{Local, NaiveDateTime};
use fixed_width::standard::{HEADER, TRAILER};
use fixed_width::{
    amount_to_cents, assemble, file_sequence_number, security_record, EncodedFile, FieldSpec,
    FileType, Layout, RecordType,
};
use tracing::{debug, info};

static MANDATE_FIELDS: [FieldSpec; 21] = [
    FieldSpec::numeric("record_type", 0, 2),
    FieldSpec::text("action", 2, 1),
    FieldSpec::text("mrn", 3, 25),
    FieldSpec::text("creditor_abbreviation", 28, 10),
    FieldSpec::text("contract_reference", 38, 14),
    FieldSpec::numeric("debtor_account", 52, 16),
    FieldSpec::numeric("debtor_branch", 68, 6),
    FieldSpec::numeric("account_type", 74, 1),
    FieldSpec::text("mandate_type", 75, 1),
    FieldSpec::text("debtor_id", 76, 13),
    FieldSpec::text("debtor_name", 89, 30),
    FieldSpec::numeric("first_collection_date", 119, 8),
    FieldSpec::numeric("collection_day", 127, 2),
    FieldSpec::text("frequency", 129, 1),
    FieldSpec::numeric("installment", 130, 12),
    FieldSpec::numeric("maximum", 142, 12),
    FieldSpec::text("adjustment_category", 154, 1),
    FieldSpec::numeric("adjustment_rate", 155, 5),
    FieldSpec::text("transaction_type", 160, 3),
    FieldSpec::text("tracking", 163, 1),
    FieldSpec::filler(164, 156),
];

/// Mandate record (`02`, mandate request file)
pub static MANDATE: Layout = Layout {
    name: "debicheck_mandate",
    record_type: RecordType::Detail,
    fields: &MANDATE_FIELDS,
};

static COLLECTION_FIELDS: [FieldSpec; 8] = [
    FieldSpec::numeric("record_type", 0, 2),
    FieldSpec::text("mrn", 2, 25),
    FieldSpec::text("contract_reference", 27, 14),
    FieldSpec::numeric("amount", 41, 12),
    FieldSpec::numeric("action_date", 53, 8),
    FieldSpec::text("collection_type", 61, 1),
    FieldSpec::text("creditor_abbreviation", 62, 10),
    FieldSpec::filler(72, 248),
];

/// Collection record (`02`, collection file)
pub static COLLECTION: Layout = Layout {
    name: "debicheck_collection",
    record_type: RecordType::Detail,
    fields: &COLLECTION_FIELDS,
};

/// Encodes DebiCheck mandate and collection batches
#[derive(Debug, Clone)]
pub struct DebiCheckEncoder {
    config: DebiCheckConfig,
}

impl DebiCheckEncoder {
    /// Create new encoder
    pub fn new(config: DebiCheckConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &DebiCheckConfig {
        &self.config
    }

    /// New random MRN for `member_id` created at `now`
    pub fn generate_mrn(&self, member_id: &str, now: NaiveDateTime) -> Result<String> {
        generate_mrn(&self.config.bank_number, member_id, now.date())
    }

    /// Encode a mandate request batch stamped with the current local time
    pub fn encode_mandate_file(&self, mandates: &[Mandate]) -> Result<EncodedFile> {
        self.encode_mandate_file_at(mandates, Local::now().naive_local())
    }

    /// Encode a mandate request batch: header (type `03`), one `02` per
    /// mandate, trailer with count only, security record
    pub fn encode_mandate_file_at(&self, mandates: &[Mandate], now: NaiveDateTime) -> Result<EncodedFile> {
        if mandates.is_empty() {
            return Err(Error::EmptyBatch("mandate"));
        }

        let file_sequence = file_sequence_number(&self.config.client_profile, now)?;
        let mut records = Vec::with_capacity(mandates.len() + 3);
        records.push(self.header(
            &file_sequence,
            FileType::MandateRequest,
            &self.config.nominated_account,
            &self.config.charges_account,
        )?);

        for mandate in mandates {
            let mrn = match mandate.mrn.as_deref().map(str::trim) {
                Some(mrn) if !mrn.is_empty() => {
                    validate_mrn(mrn)?;
                    mrn.to_string()
                }
                _ => {
                    let mrn = derive_mrn(&self.config.bank_number, &mandate.member_id, now.date())?;
                    debug!("Derived MRN {} for member {}", mrn, mandate.member_id);
                    mrn
                }
            };
            records.push(self.mandate_record(mandate, &mrn)?);
        }

        records.push(
            TRAILER
                .builder()
                .set("record_count", mandates.len().to_string())
                .build()?,
        );
        let security = security_record(&records)?;
        records.push(security);

        let filename = format!("DC_MANDATE_{file_sequence}.txt");
        info!("Encoded DebiCheck mandate file {} ({} mandates)", filename, mandates.len());

        Ok(EncodedFile {
            filename,
            content: assemble(&records),
        })
    }

    /// Encode a collection batch stamped with the current local time
    pub fn encode_collection_file(
        &self,
        collections: &[Collection],
        nominated_account: &str,
        charges_account: &str,
    ) -> Result<EncodedFile> {
        self.encode_collection_file_at(
            collections,
            nominated_account,
            charges_account,
            Local::now().naive_local(),
        )
    }

    /// Encode a collection batch: header (type `04`), one `02` per
    /// collection, trailer with count and total, security record
    pub fn encode_collection_file_at(
        &self,
        collections: &[Collection],
        nominated_account: &str,
        charges_account: &str,
        now: NaiveDateTime,
    ) -> Result<EncodedFile> {
        if collections.is_empty() {
            return Err(Error::EmptyBatch("collection"));
        }

        let file_sequence = file_sequence_number(&self.config.client_profile, now)?;
        let mut records = Vec::with_capacity(collections.len() + 3);
        records.push(self.header(
            &file_sequence,
            FileType::MandateCollection,
            nominated_account,
            charges_account,
        )?);

        let mut total_cents: u64 = 0;
        for collection in collections {
            validate_mrn(&collection.mrn)?;
            let cents = amount_to_cents(collection.amount)?;
            total_cents += cents;

            records.push(
                COLLECTION
                    .builder()
                    .set("mrn", collection.mrn.as_str())
                    .set("contract_reference", collection.contract_reference.as_str())
                    .set("amount", cents.to_string())
                    .set("action_date", collection.action_date.format("%Y%m%d").to_string())
                    .set("collection_type", collection.collection_type.code())
                    .set("creditor_abbreviation", self.config.creditor_abbreviation.as_str())
                    .build()?,
            );
        }

        records.push(
            TRAILER
                .builder()
                .set("record_count", collections.len().to_string())
                .set("total_value", total_cents.to_string())
                .build()?,
        );
        let security = security_record(&records)?;
        records.push(security);

        let filename = format!("DC_COLLECTION_{file_sequence}.txt");
        info!(
            "Encoded DebiCheck collection file {} ({} collections, {} cents)",
            filename,
            collections.len(),
            total_cents
        );

        Ok(EncodedFile {
            filename,
            content: assemble(&records),
        })
    }

    fn header(
        &self,
        file_sequence: &str,
        file_type: FileType,
        nominated_account: &str,
        charges_account: &str,
    ) -> Result<String> {
        Ok(HEADER
            .builder()
            .set("client_profile", self.config.client_profile.as_str())
            .set("file_sequence", file_sequence)
            .set("file_type", file_type.code())
            .set("nominated_account", nominated_account)
            .set("charges_account", charges_account)
            .set("statement_narrative", self.config.statement_narrative.as_str())
            .build()?)
    }

    fn mandate_record(&self, mandate: &Mandate, mrn: &str) -> Result<String> {
        Ok(MANDATE
            .builder()
            .set("action", mandate.action.code())
            .set("mrn", mrn)
            .set("creditor_abbreviation", self.config.creditor_abbreviation.as_str())
            .set("contract_reference", mandate.contract_reference.as_str())
            .set("debtor_account", mandate.debtor_account.as_str())
            .set("debtor_branch", mandate.debtor_branch.as_str())
            .set("account_type", mandate.account_type.code())
            .set("mandate_type", mandate.mandate_type.code())
            .set("debtor_id", mandate.debtor_id.as_str())
            .set("debtor_name", mandate.debtor_name.as_str())
            .set(
                "first_collection_date",
                mandate.first_collection_date.format("%Y%m%d").to_string(),
            )
            .set("collection_day", mandate.collection_day.to_string())
            .set("frequency", mandate.frequency.code())
            .set("installment", amount_to_cents(mandate.installment)?.to_string())
            .set("maximum", amount_to_cents(mandate.maximum)?.to_string())
            .set("adjustment_category", mandate.adjustment_category.code())
            .set("adjustment_rate", amount_to_cents(mandate.adjustment_rate)?.to_string())
            .set("transaction_type", mandate.transaction_type.code())
            .set("tracking", if mandate.tracking { "Y" } else { "N" })
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn encoder() -> DebiCheckEncoder {
        DebiCheckEncoder::new(DebiCheckConfig {
            bank_number: "0198".to_string(),
            client_profile: "1234567890".to_string(),
            creditor_abbreviation: "IRONWORKS".to_string(),
            nominated_account: "1987654321".to_string(),
            charges_account: "1987654322".to_string(),
            statement_narrative: "IRONWORKS DEBICHECK".to_string(),
        })
    }

    fn mandate(member_id: &str, mrn: Option<&str>) -> Mandate {
        Mandate {
            action: MandateAction::Add,
            mrn: mrn.map(str::to_string),
            member_id: member_id.to_string(),
            contract_reference: "CONTRACT-0001".to_string(),
            debtor_account: "1012345678".to_string(),
            debtor_branch: "198765".to_string(),
            account_type: AccountType::Current,
            mandate_type: MandateType::Fixed,
            debtor_id: "8001015009087".to_string(),
            debtor_name: "THANDI NKOSI".to_string(),
            first_collection_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            collection_day: 1,
            frequency: Frequency::Monthly,
            installment: dec!(499.00),
            maximum: dec!(748.50),
            adjustment_category: AdjustmentCategory::Annually,
            adjustment_rate: dec!(8.50),
            transaction_type: DebiCheckTransactionType::Tt1,
            tracking: true,
        }
    }

    #[test]
    fn test_layouts_are_full_width() {
        MANDATE.validate().unwrap();
        COLLECTION.validate().unwrap();
    }

    #[test]
    fn test_empty_batches_rejected() {
        assert!(matches!(
            encoder().encode_mandate_file_at(&[], now()),
            Err(Error::EmptyBatch("mandate"))
        ));
        assert!(matches!(
            encoder().encode_collection_file_at(&[], "1", "2", now()),
            Err(Error::EmptyBatch("collection"))
        ));
    }

    #[test]
    fn test_mandate_record_fields() {
        let mrn = "0198202401100000MEM42XYZ1";
        let file = encoder()
            .encode_mandate_file_at(&[mandate("MEM42", Some(mrn))], now())
            .unwrap();
        assert!(file.filename.starts_with("DC_MANDATE_"));

        let lines: Vec<&str> = file.content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.len() == 320));
        assert_eq!(&lines[0][36..38], "03");

        let rec = lines[1];
        assert_eq!(&rec[0..2], "02");
        assert_eq!(&rec[2..3], "A");
        assert_eq!(&rec[3..28], mrn);
        assert_eq!(&rec[28..38], "IRONWORKS ");
        assert_eq!(&rec[52..68], "0000001012345678");
        assert_eq!(&rec[74..75], "1");
        assert_eq!(&rec[75..76], "F");
        assert_eq!(&rec[76..89], "8001015009087");
        assert_eq!(rec[89..119].trim_end(), "THANDI NKOSI");
        assert_eq!(&rec[119..127], "20240201");
        assert_eq!(&rec[127..129], "01");
        assert_eq!(&rec[129..130], "M");
        assert_eq!(&rec[130..142], "000000049900");
        assert_eq!(&rec[142..154], "000000074850");
        assert_eq!(&rec[154..155], "A");
        assert_eq!(&rec[155..160], "00850");
        assert_eq!(&rec[160..163], "TT1");
        assert_eq!(&rec[163..164], "Y");

        // trailer carries a count and no value
        assert_eq!(&lines[2][2..12], "0000000001");
        assert_eq!(&lines[2][12..26], "0".repeat(14));
    }

    #[test]
    fn test_line_breaks_in_text_fields_stay_inside_the_record() {
        let mut m = mandate("MEM42", None);
        m.debtor_name = "A\nB".to_string();
        m.contract_reference = "CON\r\nTRACT".to_string();

        let file = encoder().encode_mandate_file_at(&[m], now()).unwrap();
        let lines: Vec<&str> = file.content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().count() == 320));
        assert_eq!(RecordType::of_line(lines[2]), RecordType::Trailer);

        let record = MANDATE.decode(lines[1]).unwrap();
        assert_eq!(record.text("debtor_name"), Some("A B"));
        assert_eq!(record.text("contract_reference"), Some("CON  TRACT"));
        assert_eq!(record.text("debtor_id"), Some("8001015009087"));
    }

    #[test]
    fn test_missing_mrn_is_derived() {
        let file = encoder()
            .encode_mandate_file_at(&[mandate("member-99", None), mandate("member-99", Some(" "))], now())
            .unwrap();
        let lines: Vec<&str> = file.content.lines().collect();
        let expected = derive_mrn("0198", "member-99", now().date()).unwrap();
        assert_eq!(&lines[1][3..28], expected);
        assert_eq!(&lines[2][3..28], expected);
    }

    #[test]
    fn test_collection_file() {
        let mrn = derive_mrn("0198", "MEM42", now().date()).unwrap();
        let collections = vec![
            Collection {
                mrn: mrn.clone(),
                contract_reference: "CONTRACT-0001".to_string(),
                amount: dec!(499.00),
                action_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                collection_type: CollectionType::Recurring,
            },
            Collection {
                mrn,
                contract_reference: "CONTRACT-0001".to_string(),
                amount: dec!(250.25),
                action_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                collection_type: CollectionType::Final,
            },
        ];
        let file = encoder()
            .encode_collection_file_at(&collections, "5550001111", "5550002222", now())
            .unwrap();
        assert!(file.filename.starts_with("DC_COLLECTION_"));

        let lines: Vec<&str> = file.content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.len() == 320));
        assert_eq!(&lines[0][36..38], "04");
        assert_eq!(&lines[0][38..54], "0000005550001111");
        assert_eq!(&lines[1][41..53], "000000049900");
        assert_eq!(&lines[1][53..61], "20240201");
        assert_eq!(&lines[1][61..62], "R");
        assert_eq!(&lines[2][61..62], "F");
        assert_eq!(lines[1][62..72].trim_end(), "IRONWORKS");
        assert_eq!(&lines[3][12..26], "00000000074925");
    }

    #[test]
    fn test_collection_requires_valid_mrn() {
        let collection = Collection {
            mrn: "TOO-SHORT".to_string(),
            contract_reference: "C1".to_string(),
            amount: dec!(10),
            action_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            collection_type: CollectionType::OnceOff,
        };
        assert!(matches!(
            encoder().encode_collection_file_at(&[collection], "1", "2", now()),
            Err(Error::InvalidMrn(_))
        ));
    }
}
