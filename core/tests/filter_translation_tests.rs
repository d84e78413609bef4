// tests/filter_translation_tests.rs
mod common;

use chrono::NaiveDate;
use common::*;
use orderdesk::{FilterOperator, FilterValue, Predicate};
use rust_decimal::Decimal;

#[test]
fn test_translate_maps_params_to_columns_in_order() {
  setup_tracing();
  let predicates = PARCEL_FILTERS.translate(pairs(&[
    ("parcelLabel[lk]", "box"),
    ("parcelWeight[gte]", "2.50"),
    ("parcelSentOn[lt]", "2024-01-10"),
  ]));

  assert_eq!(
    predicates,
    vec![
      Predicate::new("label", FilterOperator::Like, "box"),
      Predicate::new("weight", FilterOperator::Gte, Decimal::new(250, 2)),
      Predicate::new(
        "sent_on",
        FilterOperator::Lt,
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
      ),
    ]
  );
}

#[test]
fn test_operator_outside_allow_list_is_ignored() {
  setup_tracing();
  // Substring operators are not allowed on numeric fields and vice versa.
  let predicates = PARCEL_FILTERS.translate(pairs(&[
    ("parcelWeight[lk]", "2"),
    ("parcelLabel[eq]", "box"),
    ("parcelStage[gt]", "1"),
  ]));
  assert!(predicates.is_empty(), "got {:?}", predicates);
}

#[test]
fn test_unknown_fields_bad_values_and_plain_keys_are_ignored() {
  setup_tracing();
  let predicates = PARCEL_FILTERS.translate(pairs(&[
    ("unknown[eq]", "1"),
    ("parcelStage[zz]", "1"),
    ("parcelStage", "1"),
    ("parcelId[eq]", "abc"),
    ("parcelSentOn[eq]", "30.01.2024"),
    ("page", "2"),
    ("parcelStage[eq]", "2"),
  ]));
  assert_eq!(predicates, vec![Predicate::new("stage", FilterOperator::Eq, 2_i64)]);
}

#[test]
fn test_predicates_evaluate_with_null_semantics() {
  let row = <Parcel as orderdesk::Record>::materialize(
    7,
    draft("Blue Box", 5, "3.20", 2),
    chrono::Utc::now(),
    chrono::Utc::now(),
  );

  assert!(Predicate::new("label", FilterOperator::Like, "Box").matches(&row));
  assert!(!Predicate::new("label", FilterOperator::Like, "box").matches(&row));
  assert!(Predicate::new("label", FilterOperator::ILike, "box").matches(&row));
  assert!(Predicate::new("label", FilterOperator::NotILike, "crate").matches(&row));
  assert!(Predicate::new("weight", FilterOperator::Gt, 3_i64).matches(&row));
  assert!(Predicate::new("stage", FilterOperator::Ne, 1_i64).matches(&row));

  // stage_old is NULL: no operator matches, not even `ne`.
  assert!(!Predicate::new("stage_old", FilterOperator::Ne, 1_i64).matches(&row));
  assert!(!Predicate::new("stage_old", FilterOperator::Eq, 1_i64).matches(&row));
}

#[test]
fn test_mixed_kind_comparison_is_false() {
  let row = <Parcel as orderdesk::Record>::materialize(
    1,
    draft("x", 1, "1", 1),
    chrono::Utc::now(),
    chrono::Utc::now(),
  );
  let p = Predicate {
    column: "sent_on",
    operator: FilterOperator::Eq,
    value: FilterValue::Integer(1),
  };
  assert!(!p.matches(&row));
}

#[test]
fn test_date_values_use_the_exported_format() {
  setup_tracing();
  let sent_on = NaiveDate::parse_from_str("2024-01-10", orderdesk::DATE_FORMAT).unwrap();
  let predicates = PARCEL_FILTERS.translate(pairs(&[("parcelSentOn[eq]", "2024-01-10")]));

  assert_eq!(predicates.len(), 1);
  assert_eq!(predicates[0].value, FilterValue::Date(sent_on));
  assert_eq!(sent_on.format(orderdesk::DATE_FORMAT).to_string(), "2024-01-10");
}
