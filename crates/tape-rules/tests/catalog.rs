//! Structural checks over the built-in catalogue and its policies.

use std::collections::BTreeSet;

use tape_model::Severity;
use tape_rules::{ARM_FIELDS, REQUIRED_FIELDS, catalog, default_policies};

#[test]
fn catalogue_is_sorted_and_unique() {
    let rules = catalog();
    let names: Vec<&str> = rules.iter().map(|rule| rule.name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted, "rule names must be unique and ordered");
    assert_eq!(rules.len(), 115);
}

#[test]
fn lookups_hit_every_rule() {
    let rules = catalog();
    for rule in &rules {
        let found = rules.get(rule.name).unwrap();
        assert_eq!(found.name, rule.name);
    }
    assert!(rules.get("no_such_rule").is_none());
}

#[test]
fn policy_names_resolve_to_catalogue_rules() {
    let rules = catalog();
    let policies = default_policies();

    let required = policies.required_fields_rule().unwrap();
    assert!(rules.get(required).is_some());
    assert!(policies.allows_missing(required));

    for name in ["negative_incomes"] {
        assert!(policies.varargs_columns(name).is_some());
        let rule = rules.get(name).unwrap();
        assert!(rule.params.is_varargs());
        assert_eq!(rule.params.names(), &["incomes"]);
    }

    for name in [
        "margin_less_than_floor",
        "negative_incomes",
        "refi_with_less_than_1_year_in_home",
        "appraised_value_over_8000000",
        "total_number_of_borrowers_over_4",
    ] {
        assert!(rules.get(name).is_some(), "warning rule {name} missing");
        assert_eq!(policies.severity(name), Severity::Warning);
    }
    assert_eq!(policies.severity("channel"), Severity::Issue);
}

#[test]
fn alias_keys_appear_as_declared_parameters() {
    let rules = catalog();
    let policies = default_policies();
    let declared: BTreeSet<&str> = rules
        .iter()
        .flat_map(|rule| rule.params.names().iter().copied())
        .collect();
    for param in policies.aliases().keys() {
        assert!(
            declared.contains(param.as_str()),
            "alias {param} is never declared by any rule"
        );
    }
}

#[test]
fn field_blocks_match_their_rules() {
    let rules = catalog();

    let required = rules.get("missing_required_fields").unwrap();
    assert_eq!(required.params.names(), REQUIRED_FIELDS);
    assert_eq!(REQUIRED_FIELDS.len(), 66);

    for name in [
        "arm_fields_populated_for_fixed_rate",
        "arm_fields_required_for_adjustable_rate",
    ] {
        let rule = rules.get(name).unwrap();
        assert_eq!(rule.params.names(), ARM_FIELDS);
    }
    assert_eq!(ARM_FIELDS.len(), 24);
    assert_eq!(ARM_FIELDS[0], "amortization_type");
}

#[test]
fn loan_identifier_defaults_to_loan_number() {
    assert_eq!(default_policies().loan_identifier(), "loan_number");
}

#[test]
fn every_fixed_rule_declares_at_least_one_parameter() {
    for rule in &catalog() {
        assert!(
            !rule.params.names().is_empty(),
            "{} has no parameters",
            rule.name
        );
    }
}
