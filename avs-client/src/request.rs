//! SOAP request builder
//!
//! `RealTimeAccVerifRq` wrapped in an envelope whose header carries the
//! enterprise context: fresh correlation ids per request, the caller's
//! machine IP and DNS name, and the configured channel id.

use crate::banks::universal_branch;
use crate::{config::AvsConfig, types::*, Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use uuid::Uuid;

/// AVS service namespace
pub const AVS_NAMESPACE: &str = "urn:services.accountverification.nedbank.co.za/v4";

/// SOAP 1.1 envelope namespace
pub const SOAP_ENV_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Build a pretty-printed SOAP envelope for a verification batch
pub fn build_request(config: &AvsConfig, verifications: &[AccountVerification]) -> Result<String> {
    if verifications.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| Error::Xml(e.to_string()))?;

    let mut envelope = BytesStart::new("soapenv:Envelope");
    envelope.push_attribute(("xmlns:soapenv", SOAP_ENV_NAMESPACE));
    envelope.push_attribute(("xmlns:v4", AVS_NAMESPACE));
    writer
        .write_event(Event::Start(envelope))
        .map_err(|e| Error::Xml(e.to_string()))?;

    write_header(&mut writer, config)?;

    start(&mut writer, "soapenv:Body")?;
    start(&mut writer, "v4:RealTimeAccVerifRq")?;
    write_element(&mut writer, "v4:ProfileNumber", &config.profile_number)?;
    write_element(&mut writer, "v4:ChargeAccount", &config.charge_account)?;

    for (index, verification) in verifications.iter().enumerate() {
        write_item(&mut writer, index as u32 + 1, verification)?;
    }

    end(&mut writer, "v4:RealTimeAccVerifRq")?;
    end(&mut writer, "soapenv:Body")?;
    end(&mut writer, "soapenv:Envelope")?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
}

fn write_header(writer: &mut XmlWriter, config: &AvsConfig) -> Result<()> {
    start(writer, "soapenv:Header")?;
    start(writer, "v4:EnterpriseContext")?;

    start(writer, "v4:ContextInfo")?;
    write_element(writer, "v4:ExecutionContextId", &Uuid::new_v4().to_string())?;
    write_element(writer, "v4:ProcessContextId", &Uuid::new_v4().to_string())?;
    end(writer, "v4:ContextInfo")?;

    start(writer, "v4:RequestOriginator")?;
    write_element(writer, "v4:MachineIPAddress", &config.machine_ip)?;
    write_element(writer, "v4:MachineDNSName", &config.machine_dns_name)?;
    write_element(writer, "v4:ChannelId", &config.channel_id)?;
    end(writer, "v4:RequestOriginator")?;

    start(writer, "v4:InstrumentationInfo")?;
    write_element(writer, "v4:ParentInstrumentationId", &Uuid::new_v4().to_string())?;
    write_element(writer, "v4:ChildInstrumentationId", &Uuid::new_v4().to_string())?;
    end(writer, "v4:InstrumentationInfo")?;

    end(writer, "v4:EnterpriseContext")?;
    end(writer, "soapenv:Header")
}

fn write_item(writer: &mut XmlWriter, sequence: u32, verification: &AccountVerification) -> Result<()> {
    start(writer, "v4:AccountVerificationItem")?;
    write_element(writer, "v4:SequenceNumber", &sequence.to_string())?;
    write_element(writer, "v4:BankIdentifier", &verification.bank_identifier)?;
    write_element(writer, "v4:AccountNumber", &verification.account_number)?;
    if let Some(account_type) = verification.account_type {
        write_element(writer, "v4:AccountType", account_type.code())?;
    }

    let sort_code = verification
        .sort_code
        .as_deref()
        .or_else(|| universal_branch(&verification.bank_identifier));
    if let Some(sort_code) = sort_code {
        write_element(writer, "v4:SortCode", sort_code)?;
    }

    let holder = &verification.holder;
    start(writer, "v4:AccountHolderInformation")?;
    write_element(writer, "v4:IdentityNumber", &holder.identity_number)?;
    write_element(writer, "v4:IdentityType", holder.identity_type.code())?;
    let optional = [
        ("v4:Initials", &holder.initials),
        ("v4:Name", &holder.name),
        ("v4:EmailAddress", &holder.email),
        ("v4:CellNumber", &holder.cell_number),
        ("v4:TaxReferenceNumber", &holder.tax_reference),
        ("v4:CustomerReference", &holder.customer_reference),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            write_element(writer, name, value)?;
        }
    }
    end(writer, "v4:AccountHolderInformation")?;

    end(writer, "v4:AccountVerificationItem")
}

fn start(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| Error::Xml(e.to_string()))
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| Error::Xml(e.to_string()))
}

fn write_element(writer: &mut XmlWriter, name: &str, value: &str) -> Result<()> {
    start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(|e| Error::Xml(e.to_string()))?;
    end(writer, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verification(account: &str) -> AccountVerification {
        AccountVerification {
            bank_identifier: "nedbank".to_string(),
            account_number: account.to_string(),
            account_type: None,
            sort_code: None,
            holder: AccountHolderInformation::with_sa_id("8001015009087"),
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(
            build_request(&AvsConfig::default(), &[]),
            Err(Error::EmptyBatch)
        ));
    }

    #[test]
    fn test_envelope_structure() {
        let config = AvsConfig {
            profile_number: "7654321".to_string(),
            charge_account: "1987654321".to_string(),
            channel_id: "GYMCORE".to_string(),
            ..Default::default()
        };
        let xml = build_request(&config, &[verification("1012345678"), verification("1012345679")]).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(AVS_NAMESPACE));
        assert!(xml.contains("<v4:ChannelId>GYMCORE</v4:ChannelId>"));
        assert!(xml.contains("<v4:ProfileNumber>7654321</v4:ProfileNumber>"));
        assert!(xml.contains("<v4:ChargeAccount>1987654321</v4:ChargeAccount>"));
        assert_eq!(xml.matches("<v4:AccountVerificationItem>").count(), 2);
        assert!(xml.contains("<v4:SequenceNumber>2</v4:SequenceNumber>"));
        assert!(xml.contains("<v4:SortCode>198765</v4:SortCode>"));
        assert!(xml.contains("<v4:IdentityType>SID</v4:IdentityType>"));
        // indented output
        assert!(xml.contains("\n  <soapenv:Header>"));
    }

    #[test]
    fn test_optional_fields_only_when_present() {
        let mut full = verification("1012345678");
        full.account_type = Some(AvsAccountType::Savings);
        full.holder.name = Some("NKOSI & SONS".to_string());
        full.holder.email = Some("t.nkosi@example.com".to_string());

        let xml = build_request(&AvsConfig::default(), &[full]).unwrap();
        assert!(xml.contains("<v4:AccountType>02</v4:AccountType>"));
        assert!(xml.contains("<v4:Name>NKOSI &amp; SONS</v4:Name>"));
        assert!(xml.contains("<v4:EmailAddress>"));
        assert!(!xml.contains("<v4:Initials>"));
        assert!(!xml.contains("<v4:CellNumber>"));
        assert!(!xml.contains("<v4:TaxReferenceNumber>"));
    }

    #[test]
    fn test_correlation_ids_are_fresh() {
        let config = AvsConfig::default();
        let a = build_request(&config, &[verification("1012345678")]).unwrap();
        let b = build_request(&config, &[verification("1012345678")]).unwrap();
        assert_ne!(a, b);
    }
}
