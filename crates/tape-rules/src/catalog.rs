//! The built-in rule catalogue and the policies it ships with.
//!
//! Parameter names double as column lookups: most match a tape column after
//! normalization, and the shorthand ones (`pbw`, `cap_up`, ...) are expanded
//! through the alias table in [`default_policies`].

use crate::descriptor::{RuleDef, RuleSet};
use crate::policy::RulePolicies;
use crate::predicates::{amounts, arm, credit, dates, income, loan, property, required};

/// Columns every tape must carry, in the order they are reported.
pub const REQUIRED_FIELDS: &[&str] = &[
    "originator_doc_code",
    "primary_servicer",
    "servicing_fee",
    "originator",
    "loan_number",
    "amortization_type",
    "lien_position",
    "heloc_indicator",
    "loan_purpose",
    "cash_out_amount",
    "channel",
    "escrow_indicator",
    "origination_date",
    "original_loan_amount",
    "original_interest_rate",
    "original_amortization_term",
    "original_term_to_maturity",
    "first_payment_date_of_loan",
    "interest_type_indicator",
    "current_loan_amount",
    "current_interest_rate",
    "current_payment_amount_due",
    "interest_paid_through_date",
    "current_payment_status",
    "primary_borrower_id",
    "number_of_mortgaged_properties",
    "total_number_of_borrowers",
    "self_employment_flag",
    "current_other_monthly_payment",
    "length_of_employment_borrower",
    "years_in_home",
    "fico_model_used",
    "original_primary_borrower_fico",
    "most_recent_12_month_pay_history",
    "primary_borrower_wage_income",
    "co_borrower_wage_income",
    "primary_borrower_other_income",
    "co_borrower_other_income",
    "all_borrower_wage_income",
    "all_borrower_total_income",
    "_4506_t_indicator",
    "borrower_income_verification_level",
    "borrower_employment_verification",
    "borrower_asset_verification",
    "liquid_cash_reserves",
    "monthly_debt_all_borrowers",
    "originator_dti",
    "percentage_of_down_payment_from_borrower_own_funds",
    "city",
    "state",
    "postal_code",
    "property_type",
    "occupancy",
    "original_appraised_property_value",
    "original_property_valuation_type",
    "original_property_valuation_date",
    "original_cltv",
    "original_ltv",
    "borrower_years_in_industry",
    "coborrower_years_in_industry",
    "maturity_date",
    "loan_type_ls",
    "atrqm_status",
    "application_received_date",
    "dd_firm",
    "dd_review_type",
];

/// The ARM block. The first entry is the gate; the rest must be empty on
/// fixed-rate loans and populated on adjustable ones.
pub const ARM_FIELDS: &[&str] = &[
    "amortization_type",
    "arm_look_back_days",
    "gross_margin",
    "arm_round_flag",
    "arm_round_factor",
    "index_type",
    "initial_fixed_rate_period",
    "initial_interest_rate_cap_change_up",
    "initial_interest_rate_cap_change_down",
    "subsequent_interest_rate_reset_period",
    "subsequent_interest_rate_cap_change_down",
    "subsequent_interest_rate_cap_change_up",
    "lifetime_max_rate_ceiling",
    "lifetime_min_rate_floor",
    "negative_amortization_limit",
    "initial_negative_amortization_recast_period",
    "subsequent_negative_amortization_recast_period",
    "initial_fixed_payment_period",
    "subsequent_payment_reset_period",
    "initial_periodic_payment_cap",
    "subsequent_periodic_payment_cap",
    "initial_minimum_payment_reset_period",
    "subsequent_minimum_payment_reset_period",
    "option_arm_indicator",
];

/// Shorthand parameter names and the columns they stand for.
const PARAM_ALIASES: &[(&str, &str)] = &[
    ("pbw", "primary_borrower_wage_income"),
    ("cbw", "co_borrower_wage_income"),
    ("pbo", "primary_borrower_other_income"),
    ("cbo", "co_borrower_other_income"),
    ("abti", "all_borrower_total_income"),
    ("abw", "all_borrower_wage_income"),
    ("total_borrowers", "total_number_of_borrowers"),
    ("b1_len_emp", "length_of_employment_borrower"),
    ("b2_len_emp", "length_of_employment_co_borrower"),
    ("b1_emp_ver", "borrower_employment_verification"),
    ("b2_emp_ver", "co_borrower_employment_verification"),
    ("application_date", "application_received_date"),
    (
        "percent_down_payment",
        "percentage_of_down_payment_from_borrower_own_funds",
    ),
    ("cap_up", "initial_interest_rate_cap_change_up"),
    ("cap_down", "initial_interest_rate_cap_change_down"),
    ("first_payment_date", "first_payment_date_of_loan"),
    ("junior_drawn_amount", "junior_mortgage_drawn_amount"),
    ("lifetime_max_rate_ceiling", "lifetime_maximum_rate_ceiling"),
    ("lifetime_min_rate_floor", "lifetime_minimum_rate_floor"),
    ("borrower_fico_score", "original_primary_borrower_fico"),
];

/// Rules whose findings are downgraded to warnings.
const WARNING_RULES: &[&str] = &[
    "margin_less_than_floor",
    "negative_incomes",
    "refi_with_less_than_1_year_in_home",
    "appraised_value_over_8000000",
    "total_number_of_borrowers_over_4",
];

/// Rules that still run when some of their parameters do not resolve.
const ALLOW_MISSING: &[&str] = &[
    "arm_fields_populated_for_fixed_rate",
    "arm_fields_required_for_adjustable_rate",
    "missing_required_fields",
];

/// Columns scanned by the variadic negative-income check.
const INCOME_COLUMNS: &[&str] = &[
    "primary_borrower_wage_income",
    "co_borrower_wage_income",
    "primary_borrower_other_income",
    "co_borrower_other_income",
    "all_borrower_wage_income",
    "all_borrower_total_income",
];

/// Every built-in rule. [`RuleSet::new`] orders them by name.
pub fn catalog() -> RuleSet {
    RuleSet::new(vec![
        // Required-field presence.
        RuleDef::fixed(
            "missing_required_fields",
            REQUIRED_FIELDS,
            required::missing_required_fields,
        ),
        // Borrower credit and employment.
        RuleDef::fixed("originator_dti", &["originator_dti"], credit::originator_dti),
        RuleDef::fixed(
            "months_bankruptcy",
            &["months_bankruptcy"],
            credit::months_bankruptcy,
        ),
        RuleDef::fixed(
            "months_foreclosure",
            &["months_foreclosure"],
            credit::months_foreclosure,
        ),
        RuleDef::fixed(
            "original_primary_borrower_fico",
            &["original_primary_borrower_fico"],
            credit::original_primary_borrower_fico,
        ),
        RuleDef::fixed(
            "borrower_fico_at_or_below_660",
            &["borrower_fico_score"],
            credit::borrower_fico_at_or_below_660,
        ),
        RuleDef::fixed(
            "fico_score_by_model",
            &["fico_model_used", "borrower_fico_score"],
            credit::fico_score_by_model,
        ),
        RuleDef::fixed(
            "dti_consistency",
            &[
                "originator_dti",
                "monthly_debt_all_borrowers",
                "all_borrower_total_income",
            ],
            credit::dti_consistency,
        ),
        RuleDef::fixed(
            "monthly_debt_all_borrowers",
            &["monthly_debt_all_borrowers"],
            credit::monthly_debt_all_borrowers,
        ),
        RuleDef::fixed(
            "length_employment_borrower",
            &[
                "length_of_employment_borrower",
                "borrower_employment_verification",
                "self_employment_flag",
            ],
            credit::length_employment_borrower,
        ),
        RuleDef::fixed(
            "length_employment_co_borrower",
            &[
                "length_of_employment_co_borrower",
                "total_number_of_borrowers",
                "self_employment_flag",
                "co_borrower_employment_verification",
            ],
            credit::length_employment_co_borrower,
        ),
        RuleDef::fixed(
            "borrower_employment_gt_industry",
            &["length_of_employment_borrower", "borrower_years_in_industry"],
            credit::borrower_employment_gt_industry,
        ),
        RuleDef::fixed(
            "coborrower_employment_gt_industry",
            &[
                "length_of_employment_coborrower",
                "coborrower_years_in_industry",
            ],
            credit::coborrower_employment_gt_industry,
        ),
        RuleDef::fixed(
            "missing_employment_both_borrowers",
            &[
                "total_borrowers",
                "b1_len_emp",
                "b2_len_emp",
                "b1_emp_ver",
                "b2_emp_ver",
            ],
            credit::missing_employment_both_borrowers,
        ),
        RuleDef::fixed("self_employed", &["self_employment_flag"], credit::self_employed),
        RuleDef::fixed(
            "total_number_of_borrowers",
            &["total_number_of_borrowers"],
            credit::total_number_of_borrowers,
        ),
        RuleDef::fixed(
            "total_number_of_borrowers_over_4",
            &["total_number_of_borrowers"],
            credit::total_number_of_borrowers_over_4,
        ),
        // Income and reserves.
        RuleDef::fixed(
            "co_borrower_other_income",
            &["co_borrower_other_income", "total_number_of_borrowers"],
            income::co_borrower_other_income,
        ),
        RuleDef::fixed(
            "total_income",
            &["pbw", "cbw", "pbo", "cbo", "abti"],
            income::total_income,
        ),
        RuleDef::fixed(
            "total_income_negative",
            &["all_borrower_total_income"],
            income::total_income_negative,
        ),
        RuleDef::fixed(
            "all_borrower_total_income",
            &["all_borrower_total_income"],
            income::all_borrower_total_income,
        ),
        RuleDef::fixed(
            "all_borrower_wage_income",
            &["pbw", "cbw", "abw"],
            income::all_borrower_wage_income,
        ),
        RuleDef::varargs("negative_incomes", "incomes", income::negative_incomes),
        RuleDef::fixed(
            "liquid_reserves",
            &["liquid_cash_reserves", "loan_type_ls"],
            income::liquid_reserves,
        ),
        RuleDef::fixed(
            "zero_reserves_primary_second",
            &["liquid_cash_reserves", "occupancy"],
            income::zero_reserves_primary_second,
        ),
        RuleDef::fixed(
            "negative_reserves",
            &["liquid_cash_reserves"],
            income::negative_reserves,
        ),
        // ARM structure.
        RuleDef::fixed(
            "amortization_type",
            &["amortization_type"],
            arm::amortization_type,
        ),
        RuleDef::fixed(
            "current_interest_rate",
            &[
                "amortization_type",
                "original_interest_rate",
                "current_interest_rate",
            ],
            arm::current_interest_rate,
        ),
        RuleDef::fixed(
            "current_rate_different_from_original",
            &["original_interest_rate", "current_interest_rate"],
            arm::current_rate_different_from_original,
        ),
        RuleDef::fixed(
            "original_interest_rate",
            &[
                "original_interest_rate",
                "lifetime_max_rate_ceiling",
                "amortization_type",
            ],
            arm::original_interest_rate,
        ),
        RuleDef::fixed(
            "first_adj_cap",
            &["initial_interest_rate_cap_change_up", "amortization_type"],
            arm::first_adj_cap,
        ),
        RuleDef::fixed(
            "index_type",
            &["index_type", "amortization_type"],
            arm::index_type,
        ),
        RuleDef::fixed(
            "lifetime_max_rate_ceiling",
            &["lifetime_max_rate_ceiling", "amortization_type"],
            arm::lifetime_max_rate_ceiling,
        ),
        RuleDef::fixed(
            "lifetime_min_rate_floor",
            &["gross_margin", "lifetime_min_rate_floor", "amortization_type"],
            arm::lifetime_min_rate_floor,
        ),
        RuleDef::fixed(
            "gross_margin_gt_lifetime_max_rate",
            &["gross_margin", "lifetime_max_rate_ceiling", "amortization_type"],
            arm::gross_margin_gt_lifetime_max_rate,
        ),
        RuleDef::fixed(
            "margin_less_than_floor",
            &["gross_margin", "lifetime_min_rate_floor"],
            arm::margin_less_than_floor,
        ),
        RuleDef::fixed(
            "periodic_cap",
            &["amortization_type", "cap_up", "cap_down"],
            arm::periodic_cap,
        ),
        RuleDef::fixed(
            "initial_period_cap",
            &["amortization_type", "cap_down", "cap_up"],
            arm::initial_period_cap,
        ),
        RuleDef::fixed(
            "first_rate_adjustment_frequency",
            &["amortization_type", "initial_fixed_rate_period"],
            arm::first_rate_adjustment_frequency,
        ),
        RuleDef::fixed(
            "arm_look_back_days",
            &["amortization_type", "arm_look_back_days"],
            arm::arm_look_back_days,
        ),
        RuleDef::fixed(
            "rounding_flag",
            &["amortization_type", "arm_round_flag"],
            arm::rounding_flag,
        ),
        RuleDef::fixed(
            "arm_round_flag_value",
            &["amortization_type", "arm_round_flag"],
            arm::arm_round_flag_value,
        ),
        RuleDef::fixed(
            "rounding_interval",
            &["amortization_type", "arm_round_factor"],
            arm::rounding_interval,
        ),
        RuleDef::fixed(
            "missing_subsequent_payment_reset",
            &["amortization_type", "subsequent_payment_reset_period"],
            arm::missing_subsequent_payment_reset,
        ),
        RuleDef::fixed(
            "subsequent_interest_rate_reset_period_range",
            &["amortization_type", "subsequent_interest_rate_reset_period"],
            arm::subsequent_interest_rate_reset_period_range,
        ),
        RuleDef::fixed(
            "initial_fixed_payment_period_range",
            &["amortization_type", "initial_fixed_payment_period"],
            arm::initial_fixed_payment_period_range,
        ),
        RuleDef::fixed(
            "subsequent_payment_reset_period_range",
            &["amortization_type", "subsequent_payment_reset_period"],
            arm::subsequent_payment_reset_period_range,
        ),
        RuleDef::fixed(
            "interest_type_indicator",
            &["interest_type_indicator"],
            arm::interest_type_indicator,
        ),
        RuleDef::fixed(
            "arm_fields_populated_for_fixed_rate",
            ARM_FIELDS,
            arm::arm_fields_populated_for_fixed_rate,
        ),
        RuleDef::fixed(
            "arm_fields_required_for_adjustable_rate",
            ARM_FIELDS,
            arm::arm_fields_required_for_adjustable_rate,
        ),
        RuleDef::fixed(
            "negative_amortization_limit",
            &[
                "negative_amortization_limit",
                "initial_negative_amortization_recast_period",
                "subsequent_negative_amortization_recast_period",
            ],
            arm::negative_amortization_limit,
        ),
        // Balances, ratios, payments, fees.
        RuleDef::fixed(
            "cash_out_amount",
            &["cash_out_amount", "loan_purpose", "original_loan_amount"],
            amounts::cash_out_amount,
        ),
        RuleDef::fixed(
            "refi_cash_out_threshold",
            &["loan_purpose", "cash_out_amount"],
            amounts::refi_cash_out_threshold,
        ),
        RuleDef::fixed(
            "large_cash_out",
            &["cash_out_amount", "original_loan_amount"],
            amounts::large_cash_out,
        ),
        RuleDef::fixed(
            "cltv_less_than_ltv",
            &["original_cltv", "original_ltv"],
            amounts::cltv_less_than_ltv,
        ),
        RuleDef::fixed(
            "cltv_components",
            &[
                "original_loan_amount",
                "junior_mortgage_balance",
                "sales_price",
                "original_appraised_property_value",
                "original_cltv",
                "lien_position",
            ],
            amounts::cltv_components,
        ),
        RuleDef::fixed(
            "original_ltv",
            &[
                "original_loan_amount",
                "sales_price",
                "original_appraised_property_value",
                "original_ltv",
            ],
            amounts::original_ltv,
        ),
        RuleDef::fixed(
            "ocltv_vs_oltv",
            &[
                "original_cltv",
                "original_ltv",
                "junior_mortgage_balance",
                "loan_type_ls",
            ],
            amounts::ocltv_vs_oltv,
        ),
        RuleDef::fixed(
            "oltv_high_for_nonselect",
            &["original_cltv", "loan_type_ls"],
            amounts::oltv_high_for_nonselect,
        ),
        RuleDef::fixed(
            "original_loan_amount_out_of_range",
            &["original_loan_amount"],
            amounts::original_loan_amount_out_of_range,
        ),
        RuleDef::fixed(
            "scheduled_upb",
            &["current_loan_amount", "original_loan_amount"],
            amounts::scheduled_upb,
        ),
        RuleDef::fixed(
            "current_gt_original_balance",
            &["current_loan_amount", "original_loan_amount"],
            amounts::current_gt_original_balance,
        ),
        RuleDef::fixed(
            "age_zero_current_balance_diff",
            &[
                "original_amortization_term",
                "maturity_date",
                "interest_paid_through_date",
                "current_loan_amount",
                "original_loan_amount",
            ],
            amounts::age_zero_current_balance_diff,
        ),
        RuleDef::fixed(
            "junior_drawn_amount",
            &["junior_drawn_amount", "junior_mortgage_balance"],
            amounts::junior_drawn_amount,
        ),
        RuleDef::fixed(
            "pledge_amount",
            &["original_pledged_assets", "original_appraised_property_value"],
            amounts::pledge_amount,
        ),
        RuleDef::fixed(
            "principal_interest",
            &[
                "current_payment_amount_due",
                "current_interest_rate",
                "original_amortization_term",
                "original_loan_amount",
            ],
            amounts::principal_interest,
        ),
        RuleDef::fixed(
            "ti_payment",
            &["current_other_monthly_payment", "escrow_indicator"],
            amounts::ti_payment,
        ),
        RuleDef::fixed(
            "negative_ti_payment",
            &["current_other_monthly_payment"],
            amounts::negative_ti_payment,
        ),
        RuleDef::fixed("servicing_fee", &["servicing_fee"], amounts::servicing_fee),
        RuleDef::fixed(
            "percent_down_payment",
            &["percent_down_payment", "loan_purpose"],
            amounts::percent_down_payment,
        ),
        RuleDef::fixed("buy_down_period", &["buy_down_period"], amounts::buy_down_period),
        RuleDef::fixed(
            "prepayment_penalty_calc",
            &["prepayment_penalty_type", "prepayment_penalty_calculation"],
            amounts::prepayment_penalty_calc,
        ),
        RuleDef::fixed(
            "prepayment_penalty_type",
            &["prepayment_penalty_type", "prepayment_penalty_total_term"],
            amounts::prepayment_penalty_type,
        ),
        RuleDef::fixed(
            "prepayment_term",
            &["amortization_type", "prepayment_penalty_total_term"],
            amounts::prepayment_term,
        ),
        RuleDef::fixed(
            "sales_price_incorrect_purpose",
            &["sales_price", "loan_purpose"],
            amounts::sales_price_incorrect_purpose,
        ),
        RuleDef::fixed(
            "purpose_id_vs_sales_price",
            &["loan_purpose", "sales_price"],
            amounts::purpose_id_vs_sales_price,
        ),
        // Dates and terms.
        RuleDef::fixed("origination_date", &["origination_date"], dates::origination_date),
        RuleDef::fixed(
            "first_payment_date",
            &["first_payment_date_of_loan", "origination_date"],
            dates::first_payment_date,
        ),
        RuleDef::fixed(
            "valuation_age",
            &["original_property_valuation_date", "origination_date"],
            dates::valuation_age,
        ),
        RuleDef::fixed(
            "valuation_after_origination",
            &["original_property_valuation_date", "origination_date"],
            dates::valuation_after_origination,
        ),
        RuleDef::fixed(
            "original_appraisal_24_months_old",
            &["original_property_valuation_date", "interest_paid_through_date"],
            dates::original_appraisal_24_months_old,
        ),
        RuleDef::fixed(
            "application_date",
            &["application_received_date", "origination_date"],
            dates::application_date,
        ),
        RuleDef::fixed(
            "application_note_date_gap",
            &["application_received_date", "origination_date"],
            dates::application_note_date_gap,
        ),
        RuleDef::fixed(
            "application_received_vs_first_payment",
            &["application_received_date", "first_payment_date_of_loan"],
            dates::application_received_vs_first_payment,
        ),
        RuleDef::fixed(
            "first_payment_before_maturity",
            &["first_payment_date", "maturity_date"],
            dates::first_payment_before_maturity,
        ),
        RuleDef::fixed(
            "maturity_date_first_of_month",
            &["maturity_date"],
            dates::maturity_date_first_of_month,
        ),
        RuleDef::fixed(
            "original_term_to_maturity_vs_amortization",
            &["original_term_to_maturity", "original_amortization_term"],
            dates::original_term_to_maturity_vs_amortization,
        ),
        RuleDef::fixed(
            "original_term",
            &["original_term_to_maturity", "original_amortization_term"],
            dates::original_term,
        ),
        RuleDef::fixed(
            "amort_term_gt_term_to_maturity",
            &["original_amortization_term", "original_term_to_maturity"],
            dates::amort_term_gt_term_to_maturity,
        ),
        RuleDef::fixed(
            "original_amortization_term_lt_60",
            &["original_amortization_term"],
            dates::original_amortization_term_lt_60,
        ),
        // Property and address.
        RuleDef::fixed("property_type", &["property_type"], property::property_type),
        RuleDef::fixed(
            "number_of_mortgaged_properties",
            &["number_of_mortgaged_properties", "loan_purpose"],
            property::number_of_mortgaged_properties,
        ),
        RuleDef::fixed(
            "original_appraised_property_value",
            &["original_appraised_property_value", "current_loan_amount"],
            property::original_appraised_property_value,
        ),
        RuleDef::fixed(
            "appraised_value_at_or_below_10000",
            &["original_appraised_property_value"],
            property::appraised_value_at_or_below_10000,
        ),
        RuleDef::fixed(
            "appraised_value_over_8000000",
            &["original_appraised_property_value"],
            property::appraised_value_over_8000000,
        ),
        RuleDef::fixed(
            "most_recent_property_value_requires_valuation_type",
            &["most_recent_property_value", "most_recent_valuation_type"],
            property::most_recent_property_value_requires_valuation_type,
        ),
        RuleDef::fixed(
            "most_recent_property_value_requires_valuation_date",
            &["most_recent_property_value", "most_recent_valuation_date"],
            property::most_recent_property_value_requires_valuation_date,
        ),
        RuleDef::fixed(
            "years_in_home",
            &["loan_purpose", "years_in_home", "occupancy"],
            property::years_in_home,
        ),
        RuleDef::fixed(
            "purchase_with_years_in_home",
            &["loan_purpose", "years_in_home"],
            property::purchase_with_years_in_home,
        ),
        RuleDef::fixed(
            "refi_with_less_than_1_year_in_home",
            &["loan_purpose", "years_in_home", "occupancy"],
            property::refi_with_less_than_1_year_in_home,
        ),
        RuleDef::fixed("state", &["state"], property::state),
        RuleDef::fixed("zip_code", &["postal_code"], property::zip_code),
        RuleDef::fixed("property_address", &["property_address"], property::property_address),
        // Loan identity and review metadata.
        RuleDef::fixed("channel", &["channel"], loan::channel),
        RuleDef::fixed(
            "broker_indicator",
            &["channel", "broker_indicator"],
            loan::broker_indicator,
        ),
        RuleDef::fixed("lien_position", &["lien_position"], loan::lien_position),
        RuleDef::fixed(
            "lien_position_vs_loan_type",
            &["lien_position", "loan_type_ls"],
            loan::lien_position_vs_loan_type,
        ),
        RuleDef::fixed(
            "heloc_indicator_zero",
            &["heloc_indicator"],
            loan::heloc_indicator_zero,
        ),
        RuleDef::fixed("loan_purpose_id", &["loan_purpose"], loan::loan_purpose_id),
        RuleDef::fixed("seller_loan_number", &["loan_number"], loan::seller_loan_number),
        RuleDef::fixed("review_type", &["dd_review_type"], loan::review_type),
        RuleDef::fixed(
            "apor_safe_harbor",
            &["application_date", "atrqm_status"],
            loan::apor_safe_harbor,
        ),
        RuleDef::fixed(
            "mi_company_name",
            &["mortgage_insurance_company_name"],
            loan::mi_company_name,
        ),
        RuleDef::fixed("mi_percent", &["mortgage_insurance_percent"], loan::mi_percent),
        RuleDef::fixed(
            "mi_lender_or_borrower_paid",
            &[
                "mi_lender_or_borrower_paid",
                "mortgage_insurance_company_name",
                "mortgage_insurance_percent",
            ],
            loan::mi_lender_or_borrower_paid,
        ),
    ])
}

/// Policies shipped alongside [`catalog`].
pub fn default_policies() -> RulePolicies {
    let mut policies = RulePolicies::new()
        .with_varargs_columns("negative_incomes", INCOME_COLUMNS.iter().copied())
        .with_required_fields_rule("missing_required_fields")
        .with_loan_identifier("loan_number");
    for (param, column) in PARAM_ALIASES {
        policies = policies.with_alias(*param, *column);
    }
    for rule in WARNING_RULES {
        policies = policies.with_warning(*rule);
    }
    for rule in ALLOW_MISSING {
        policies = policies.with_allow_missing(*rule);
    }
    policies
}
