//! SOAP response parser
//!
//! Elements are matched by local name, so the bank's namespace prefixes do
//! not matter. Outcomes missing from an item stay `None`.

use crate::{types::*, Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

const RESPONSE_ROOT: &str = "RealTimeAccVerifRs";
const RESPONSE_ITEM: &str = "RealTimeAccVerifRsItem";

#[derive(Default)]
struct ItemBuilder {
    sequence_number: Option<u32>,
    bank_identifier: String,
    account_number: String,
    result_code: Option<String>,
    outcomes: VerificationOutcomes,
}

impl ItemBuilder {
    fn field(&mut self, element: &str, text: String) {
        match element {
            "SequenceNumber" => self.sequence_number = text.parse().ok(),
            "BankIdentifier" => self.bank_identifier = text,
            "AccountNumber" => self.account_number = text,
            "ResultCode" => self.result_code = Some(text),
            _ => match Flag::from_code(&text) {
                Some(flag) => {
                    if !self.outcomes.set(element, flag) {
                        debug!("Ignoring AVS item element {}", element);
                    }
                }
                None => debug!("Ignoring AVS item element {} = {:?}", element, text),
            },
        }
    }

    fn finish(self, position: usize) -> VerificationItemResult {
        VerificationItemResult {
            sequence_number: self.sequence_number.unwrap_or(position as u32 + 1),
            bank_identifier: self.bank_identifier,
            account_number: self.account_number,
            result_code: ResultCode::from_code(self.result_code.as_deref().unwrap_or_default()),
            outcomes: self.outcomes,
        }
    }
}

/// Parse a verification response envelope
pub fn parse_response(xml: &str) -> Result<VerificationResult> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut found_root = false;
    let mut overall: Option<String> = None;
    let mut items = Vec::new();
    let mut item: Option<ItemBuilder> = None;
    let mut fault: Option<(String, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                match name.as_str() {
                    RESPONSE_ROOT => found_root = true,
                    RESPONSE_ITEM if found_root => item = Some(ItemBuilder::default()),
                    "Fault" => fault = Some((String::new(), String::new())),
                    _ => {}
                }
                path.push(name);
            }
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == RESPONSE_ROOT.as_bytes() {
                    found_root = true;
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == RESPONSE_ITEM.as_bytes() {
                    if let Some(builder) = item.take() {
                        items.push(builder.finish(items.len()));
                    }
                }
                path.pop();
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| Error::Xml(e.to_string()))?
                    .into_owned();
                let Some(element) = path.last() else {
                    continue;
                };

                if let Some((code, message)) = fault.as_mut() {
                    match element.as_str() {
                        "faultcode" => *code = text,
                        "faultstring" => *message = text,
                        _ => {}
                    }
                } else if let Some(builder) = item.as_mut() {
                    builder.field(element, text);
                } else if found_root && element == "ResultCode" {
                    overall = Some(text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedResponse(format!(
                    "invalid XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    if let Some((code, message)) = fault {
        return Err(Error::SoapFault { code, message });
    }
    if !found_root {
        return Err(Error::MalformedResponse(format!("no {RESPONSE_ROOT} element")));
    }

    let result_code = match overall {
        Some(code) => ResultCode::from_code(&code),
        None => {
            warn!("AVS response has no overall result code");
            ResultCode::Unknown(String::new())
        }
    };

    debug!("Parsed AVS response: {} items, result {}", items.len(), result_code.code());
    Ok(VerificationResult { result_code, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <ns2:RealTimeAccVerifRs xmlns:ns2="urn:services.accountverification.nedbank.co.za/v4">
      <ns2:ResultCode>R00</ns2:ResultCode>
      <ns2:RealTimeAccVerifRsItem>
        <ns2:SequenceNumber>1</ns2:SequenceNumber>
        <ns2:BankIdentifier>nedbank</ns2:BankIdentifier>
        <ns2:AccountNumber>1012345678</ns2:AccountNumber>
        <ns2:ResultCode>R00</ns2:ResultCode>
        <ns2:AccountFound>Y</ns2:AccountFound>
        <ns2:IdNumberMatch>Y</ns2:IdNumberMatch>
        <ns2:NameMatch>N</ns2:NameMatch>
        <ns2:AccountActive>Y</ns2:AccountActive>
        <ns2:AcceptsDebits>F</ns2:AcceptsDebits>
      </ns2:RealTimeAccVerifRsItem>
      <ns2:RealTimeAccVerifRsItem>
        <ns2:SequenceNumber>2</ns2:SequenceNumber>
        <ns2:BankIdentifier>capitec</ns2:BankIdentifier>
        <ns2:AccountNumber>1500000009</ns2:AccountNumber>
        <ns2:ResultCode>R02</ns2:ResultCode>
        <ns2:AccountFound>N</ns2:AccountFound>
      </ns2:RealTimeAccVerifRsItem>
    </ns2:RealTimeAccVerifRs>
  </soapenv:Body>
</soapenv:Envelope>"#;

    #[test]
    fn test_parse_items() {
        let result = parse_response(RESPONSE).unwrap();
        assert_eq!(result.result_code, ResultCode::Success);
        assert_eq!(result.items.len(), 2);

        let first = &result.items[0];
        assert_eq!(first.sequence_number, 1);
        assert_eq!(first.account_number, "1012345678");
        assert_eq!(first.outcomes.account_found, Some(Flag::Y));
        assert_eq!(first.outcomes.name_match, Some(Flag::N));
        assert_eq!(first.outcomes.accepts_debits, Some(Flag::F));
        assert_eq!(first.outcomes.initials_match, None);
        assert_eq!(first.outcomes.reported(), 5);

        let second = &result.items[1];
        assert_eq!(second.bank_identifier, "capitec");
        assert_eq!(second.result_code, ResultCode::AccountNotFound);
        assert_eq!(second.outcomes.reported(), 1);
    }

    #[test]
    fn test_missing_root_is_malformed() {
        let xml = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body><Other/></soapenv:Body></soapenv:Envelope>"#;
        assert!(matches!(parse_response(xml), Err(Error::MalformedResponse(_))));
        assert!(matches!(parse_response("not xml at all"), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_soap_fault() {
        let xml = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>soapenv:Server</faultcode>
      <faultstring>Profile not authorised</faultstring>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#;
        match parse_response(xml) {
            Err(Error::SoapFault { code, message }) => {
                assert_eq!(code, "soapenv:Server");
                assert_eq!(message, "Profile not authorised");
            }
            other => panic!("expected SOAP fault, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_codes_are_kept() {
        let xml = "<RealTimeAccVerifRs><ResultCode>R77</ResultCode><RealTimeAccVerifRsItem><AccountFound>Q</AccountFound></RealTimeAccVerifRsItem></RealTimeAccVerifRs>";
        let result = parse_response(xml).unwrap();
        assert_eq!(result.result_code, ResultCode::Unknown("R77".to_string()));
        assert_eq!(result.items[0].sequence_number, 1);
        assert_eq!(result.items[0].outcomes.account_found, None);
    }
}
