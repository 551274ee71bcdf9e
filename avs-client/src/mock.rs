//! Simulated verification
//!
//! A pure function of the account numbers: the last digit `d` decides
//! every outcome. `9` (or a non-digit) means the account does not exist.
//! For `0..=8` the account exists and checks pass up to a per-outcome
//! threshold, so lower digits pass more checks. Optional checks are only
//! reported when the caller supplied the value being checked.

use crate::{types::*, Error, Result};

const NOT_FOUND_DIGIT: u32 = 9;

/// Simulate a verification batch
pub fn verify_mock(verifications: &[AccountVerification]) -> Result<VerificationResult> {
    if verifications.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let items: Vec<VerificationItemResult> = verifications
        .iter()
        .enumerate()
        .map(|(index, verification)| simulate(index as u32 + 1, verification))
        .collect();

    let result_code = if items.iter().all(|item| item.result_code == ResultCode::AccountNotFound) {
        ResultCode::AccountNotFound
    } else {
        ResultCode::Success
    };

    Ok(VerificationResult { result_code, items })
}

fn last_digit(account_number: &str) -> u32 {
    account_number
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .unwrap_or(NOT_FOUND_DIGIT)
}

fn simulate(sequence_number: u32, verification: &AccountVerification) -> VerificationItemResult {
    let digit = last_digit(&verification.account_number);
    let holder = &verification.holder;
    let found = digit != NOT_FOUND_DIGIT;

    let check = |threshold: u32| {
        if found {
            Flag::yes_if(digit <= threshold)
        } else {
            Flag::U
        }
    };
    let optional = |supplied: bool, threshold: u32| supplied.then(|| check(threshold));

    let outcomes = VerificationOutcomes {
        account_found: Some(Flag::yes_if(found)),
        id_number_match: Some(check(6)),
        id_type_match: Some(check(6)),
        initials_match: Some(check(7)),
        name_match: Some(check(5)),
        account_active: Some(check(7)),
        account_dormant: Some(if found { Flag::yes_if(digit == 8) } else { Flag::U }),
        account_open_three_months: Some(check(6)),
        accepts_debits: Some(check(6)),
        accepts_credits: Some(check(7)),
        account_type_match: optional(verification.account_type.is_some(), 5),
        tax_reference_match: optional(holder.tax_reference.is_some(), 4),
        email_match: optional(holder.email.is_some(), 4),
        cell_number_match: optional(holder.cell_number.is_some(), 4),
        customer_reference_match: optional(holder.customer_reference.is_some(), 4),
    };

    VerificationItemResult {
        sequence_number,
        bank_identifier: verification.bank_identifier.clone(),
        account_number: verification.account_number.clone(),
        result_code: if found {
            ResultCode::Success
        } else {
            ResultCode::AccountNotFound
        },
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verification(account: &str) -> AccountVerification {
        AccountVerification {
            bank_identifier: "fnb".to_string(),
            account_number: account.to_string(),
            account_type: None,
            sort_code: None,
            holder: AccountHolderInformation::with_sa_id("9001015800081"),
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(verify_mock(&[]), Err(Error::EmptyBatch)));
    }

    #[test]
    fn test_nine_is_not_found() {
        for _ in 0..2 {
            let result = verify_mock(&[verification("62000000009")]).unwrap();
            assert_eq!(result.result_code, ResultCode::AccountNotFound);
            let item = &result.items[0];
            assert_eq!(item.result_code, ResultCode::AccountNotFound);
            assert_eq!(item.outcomes.account_found, Some(Flag::N));
            for (name, flag) in item.outcomes.flags() {
                if name != "AccountFound" {
                    assert!(matches!(flag, None | Some(Flag::U)), "{name} = {flag:?}");
                }
            }
        }
    }

    #[test]
    fn test_digit_thresholds() {
        let expect = |account: &str, id: Flag, initials: Flag, name: Flag, dormant: Flag| {
            let item = verify_mock(&[verification(account)]).unwrap().items.remove(0);
            assert_eq!(item.result_code, ResultCode::Success);
            assert_eq!(item.outcomes.account_found, Some(Flag::Y));
            assert_eq!(item.outcomes.id_number_match, Some(id), "id for {account}");
            assert_eq!(item.outcomes.initials_match, Some(initials), "initials for {account}");
            assert_eq!(item.outcomes.name_match, Some(name), "name for {account}");
            assert_eq!(item.outcomes.account_dormant, Some(dormant), "dormant for {account}");
        };

        expect("62000000000", Flag::Y, Flag::Y, Flag::Y, Flag::N);
        expect("62000000005", Flag::Y, Flag::Y, Flag::Y, Flag::N);
        expect("62000000006", Flag::Y, Flag::Y, Flag::N, Flag::N);
        expect("62000000007", Flag::N, Flag::Y, Flag::N, Flag::N);
        expect("62000000008", Flag::N, Flag::N, Flag::N, Flag::Y);
    }

    #[test]
    fn test_optional_checks_follow_input() {
        let mut with_extras = verification("62000000003");
        with_extras.account_type = Some(AvsAccountType::Current);
        with_extras.holder.email = Some("member@example.com".to_string());

        let result = verify_mock(&[verification("62000000003"), with_extras]).unwrap();
        let bare = &result.items[0].outcomes;
        assert_eq!(bare.account_type_match, None);
        assert_eq!(bare.email_match, None);

        let extras = &result.items[1].outcomes;
        assert_eq!(extras.account_type_match, Some(Flag::Y));
        assert_eq!(extras.email_match, Some(Flag::Y));
        assert_eq!(extras.cell_number_match, None);
        assert_eq!(result.items[1].sequence_number, 2);
    }

    #[test]
    fn test_mixed_batch_is_success() {
        let result = verify_mock(&[verification("1009"), verification("1001")]).unwrap();
        assert_eq!(result.result_code, ResultCode::Success);
        assert_eq!(result.items[0].result_code, ResultCode::AccountNotFound);
    }

    #[test]
    fn test_non_digit_suffix_is_not_found() {
        let result = verify_mock(&[verification("12345X")]).unwrap();
        assert_eq!(result.items[0].outcomes.account_found, Some(Flag::N));
    }
}
