// core/src/concession.rs

//! Percentage-based price concession breakdown.
//!
//! Every intermediate amount is rounded to a whole unit, half away from zero,
//! before it feeds the next step.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::validation::ValidationErrors;

/// Missing and `null` amounts both count as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConcessionInput {
  #[serde(deserialize_with = "zero_if_null")]
  pub factory_invoice_price: Decimal,
  #[serde(deserialize_with = "zero_if_null")]
  pub commission_percentage_one: Decimal,
  #[serde(deserialize_with = "zero_if_null")]
  pub commission_percentage_two: Decimal,
  #[serde(rename = "concessionVmpecPrice", deserialize_with = "zero_if_null")]
  pub vmpec_amount: Decimal,
  #[serde(rename = "concessionIbbPrice", deserialize_with = "zero_if_null")]
  pub ibb_amount: Decimal,
  #[serde(rename = "concessionLuxuryExchangeAmountPrice", deserialize_with = "zero_if_null")]
  pub luxury_exchange_amount: Decimal,
  #[serde(rename = "concessionCashCreditNotePrice", deserialize_with = "zero_if_null")]
  pub cash_credit_note: Decimal,
  #[serde(rename = "concessionTransferCreditNotePrice", deserialize_with = "zero_if_null")]
  pub transfer_credit_note: Decimal,
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcessionBreakdown {
  /// Invoice price less the VMPEC amount.
  #[serde(with = "rust_decimal::serde::float")]
  pub net_price: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  pub commission_one: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  pub commission_two: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  pub after_commission: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  pub payable: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  pub payable_after_credit_notes: Decimal,
}

fn whole(value: Decimal) -> Decimal {
  value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn percent_of(amount: Decimal, percent: Decimal) -> Option<Decimal> {
  amount.checked_mul(percent)?.checked_div(Decimal::ONE_HUNDRED).map(whole)
}

impl ConcessionInput {
  pub fn calculate(&self) -> CoreResult<ConcessionBreakdown> {
    self.try_calculate().ok_or_else(|| {
      CoreError::Validation(ValidationErrors::single(
        "concession",
        "The supplied amounts are outside the supported numeric range.",
      ))
    })
  }

  fn try_calculate(&self) -> Option<ConcessionBreakdown> {
    let net_price = whole(self.factory_invoice_price.checked_sub(self.vmpec_amount)?);
    let commission_one = percent_of(net_price, self.commission_percentage_one)?;
    let commission_two = percent_of(net_price, self.commission_percentage_two)?;
    let after_commission = whole(net_price.checked_sub(commission_one)?.checked_sub(commission_two)?);
    let payable = whole(
      after_commission
        .checked_sub(self.ibb_amount)?
        .checked_sub(self.luxury_exchange_amount)?,
    );
    let payable_after_credit_notes = whole(
      after_commission
        .checked_sub(self.ibb_amount)?
        .checked_sub(self.transfer_credit_note)?
        .checked_sub(self.cash_credit_note)?
        .checked_sub(self.luxury_exchange_amount)?,
    );
    Some(ConcessionBreakdown {
      net_price,
      commission_one,
      commission_two,
      after_commission,
      payable,
      payable_after_credit_notes,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal::Decimal;

  fn d(v: i64) -> Decimal {
    Decimal::from(v)
  }

  #[test]
  fn worked_example() {
    let input = ConcessionInput {
      factory_invoice_price: d(10_000),
      commission_percentage_one: Decimal::new(25, 1), // 2.5
      commission_percentage_two: d(3),
      vmpec_amount: d(500),
      ibb_amount: d(200),
      luxury_exchange_amount: d(100),
      cash_credit_note: d(50),
      transfer_credit_note: d(25),
    };
    let out = input.calculate().unwrap();
    assert_eq!(out.net_price, d(9_500));
    // 9500 * 2.5% = 237.5 -> 238 (half away from zero)
    assert_eq!(out.commission_one, d(238));
    assert_eq!(out.commission_two, d(285));
    assert_eq!(out.after_commission, d(8_977));
    assert_eq!(out.payable, d(8_677));
    assert_eq!(out.payable_after_credit_notes, d(8_602));
  }

  #[test]
  fn all_defaults_are_zero() {
    let out = ConcessionInput::default().calculate().unwrap();
    assert_eq!(out.payable_after_credit_notes, Decimal::ZERO);
  }

  #[test]
  fn null_amounts_read_as_zero() {
    let input: ConcessionInput = serde_json::from_value(serde_json::json!({
      "factoryInvoicePrice": 1000,
      "commissionPercentageOne": null,
      "concessionIbbPrice": null,
      "concessionVmpecPrice": "100",
    }))
    .unwrap();
    assert_eq!(input.commission_percentage_one, Decimal::ZERO);
    assert_eq!(input.ibb_amount, Decimal::ZERO);
    assert_eq!(input.vmpec_amount, d(100));
    assert_eq!(input.calculate().unwrap().payable, d(900));

    let bad = serde_json::from_value::<ConcessionInput>(serde_json::json!({ "concessionIbbPrice": "lots" }));
    assert!(bad.is_err());
  }
}
