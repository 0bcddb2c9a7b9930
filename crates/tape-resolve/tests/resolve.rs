use std::collections::BTreeMap;

use proptest::prelude::*;
use tape_resolve::{ColumnMaps, canonical_key, normalize_name};

fn maps(columns: &[&str]) -> ColumnMaps {
    ColumnMaps::build(columns.iter().copied())
}

fn aliases(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
        .collect()
}

#[test]
fn normalized_match_beats_canonical() {
    let maps = maps(&["Loan Amt", "Loan Amount"]);
    // "loan_amt" hits "Loan Amt" exactly even though the canonical key
    // would also match "Loan Amount".
    assert_eq!(maps.resolve_column("loan_amt"), Some("Loan Amt"));
    assert_eq!(maps.resolve_column("loan_amount"), Some("Loan Amount"));
}

#[test]
fn canonical_fallback_matches_header_variants() {
    let employment = maps(&["Length of Employment: Co-Borrower"]);
    assert_eq!(
        employment.resolve_column("length_employment_coborrower"),
        Some("Length of Employment: Co-Borrower")
    );
    let industry = maps(&["Yrs At Industry"]);
    assert_eq!(industry.resolve_column("years_in_industry"), Some("Yrs At Industry"));
}

#[test]
fn first_occurrence_wins_on_collision() {
    let maps = maps(&["Loan  Number", "Loan_Number"]);
    assert_eq!(maps.resolve_column("loan_number"), Some("Loan  Number"));
    let collisions: Vec<_> = maps.collisions().collect();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].0, "loan_number");
    assert_eq!(collisions[0].1, ["Loan  Number", "Loan_Number"]);
}

#[test]
fn unresolved_names_stay_unresolved() {
    let maps = maps(&["Original Loan Amount"]);
    assert_eq!(maps.resolve_column("original_loan_amount"), Some("Original Loan Amount"));
    assert_eq!(maps.resolve_column("maturity_date"), None);
}

#[test]
fn aliases_are_exact_not_fuzzy() {
    let maps = maps(&["Original LTV", "Original Loan Amount"]);
    let empty = aliases(&[]);
    // Without an alias, "oltv" must not spuriously match "Original LTV".
    assert_eq!(maps.resolve_param("oltv", &empty), None);
    let with_alias = aliases(&[("oltv", "original_ltv")]);
    assert_eq!(maps.resolve_param("oltv", &with_alias), Some("Original LTV"));
    // Non-aliased parameters pass through unchanged.
    assert_eq!(
        maps.resolve_param("original_loan_amount", &with_alias),
        Some("Original Loan Amount")
    );
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in ".*") {
        let once = normalize_name(&raw);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn normalize_emits_only_lowercase_and_underscores(raw in ".*") {
        let normalized = normalize_name(&raw);
        prop_assert!(normalized.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!normalized.starts_with('_'));
        prop_assert!(!normalized.ends_with('_'));
        prop_assert!(!normalized.contains("__"));
    }

    #[test]
    fn canonical_key_ignores_pre_normalization(raw in ".*") {
        // Canonicalizing an already-normalized name changes nothing.
        prop_assert_eq!(canonical_key(&normalize_name(&raw)), canonical_key(&raw));
    }

    #[test]
    fn canonical_key_has_no_separators(raw in ".*") {
        prop_assert!(!canonical_key(&raw).contains('_'));
    }

    #[test]
    fn resolution_is_deterministic(columns in proptest::collection::vec("[A-Za-z0-9 _:-]{1,24}", 1..12), name in "[A-Za-z0-9 _]{1,24}") {
        let first = ColumnMaps::build(columns.iter());
        let second = ColumnMaps::build(columns.iter());
        prop_assert_eq!(first.resolve_column(&name), second.resolve_column(&name));
    }
}
