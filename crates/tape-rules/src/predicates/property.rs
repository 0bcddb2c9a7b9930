//! Property, occupancy, and address checks.

use tape_model::CellValue;

use crate::descriptor::{EvalError, RuleEval};
use crate::support::{has_value, int_of, missing_or_sentinel_date, num, opt_num, valuation_type_code};

/// Flags a blank property type or a code outside 1-15.
pub fn property_type(args: &[&CellValue]) -> RuleEval {
    let [property] = args else {
        return Err(EvalError::Arity("property_type"));
    };
    if property.is_blank() {
        return Ok(true);
    }
    Ok(!(1..=15).contains(&int_of("property_type", property)?))
}

/// Flags a blank or sub-1 property count, or more than one property on a
/// purchase.
pub fn number_of_mortgaged_properties(args: &[&CellValue]) -> RuleEval {
    let [count, purpose] = args else {
        return Err(EvalError::Arity("number_of_mortgaged_properties"));
    };
    if count.is_blank() {
        return Ok(true);
    }
    let properties = num("number_of_mortgaged_properties", count)?;
    if properties < 1.0 {
        return Ok(true);
    }
    Ok(purpose.as_f64() == Some(6.0) && properties > 1.0)
}

/// Flags a blank appraisal or one below the current balance.
pub fn original_appraised_property_value(args: &[&CellValue]) -> RuleEval {
    let [appraised, current] = args else {
        return Err(EvalError::Arity("original_appraised_property_value"));
    };
    if appraised.is_blank() {
        return Ok(true);
    }
    let value = num("original_appraised_property_value", appraised)?;
    Ok(opt_num("current_loan_amount", current)?.is_some_and(|balance| value < balance))
}

/// Flags an appraisal at or below $10,000.
pub fn appraised_value_at_or_below_10000(args: &[&CellValue]) -> RuleEval {
    let [appraised] = args else {
        return Err(EvalError::Arity("appraised_value_at_or_below_10000"));
    };
    if appraised.is_blank() {
        return Ok(false);
    }
    Ok(num("original_appraised_property_value", appraised)? <= 10_000.0)
}

/// Flags an appraisal above $8,000,000.
pub fn appraised_value_over_8000000(args: &[&CellValue]) -> RuleEval {
    let [appraised] = args else {
        return Err(EvalError::Arity("appraised_value_over_8000000"));
    };
    if appraised.is_blank() {
        return Ok(false);
    }
    Ok(num("original_appraised_property_value", appraised)? > 8_000_000.0)
}

/// Flags a recent property value without a recognized valuation type.
pub fn most_recent_property_value_requires_valuation_type(args: &[&CellValue]) -> RuleEval {
    let [value, valuation_type] = args else {
        return Err(EvalError::Arity(
            "most_recent_property_value_requires_valuation_type",
        ));
    };
    if !has_value(value) {
        return Ok(false);
    }
    Ok(!matches!(
        valuation_type_code(valuation_type),
        Some(1 | 2 | 3 | 99)
    ))
}

/// Flags a recent property value without a usable valuation date.
pub fn most_recent_property_value_requires_valuation_date(args: &[&CellValue]) -> RuleEval {
    let [value, valuation_date] = args else {
        return Err(EvalError::Arity(
            "most_recent_property_value_requires_valuation_date",
        ));
    };
    if !has_value(value) {
        return Ok(false);
    }
    Ok(missing_or_sentinel_date(valuation_date))
}

/// Flags a missing or negative years-in-home on a non-second-home loan whose
/// purpose is not purchase-like.
pub fn years_in_home(args: &[&CellValue]) -> RuleEval {
    let [purpose, years, occupancy] = args else {
        return Err(EvalError::Arity("years_in_home"));
    };
    let exempt_purpose = opt_num("loan_purpose", purpose)?
        .is_some_and(|p| [6.0, 7.0, 10.0].contains(&p));
    if exempt_purpose {
        return Ok(false);
    }
    let years_bad =
        years.is_blank() || matches!(opt_num("years_in_home", years)?, Some(y) if y < 0.0);
    if !years_bad {
        return Ok(false);
    }
    match opt_num("occupancy", occupancy)? {
        Some(occupancy_code) => Ok(occupancy_code != 2.0),
        None => Ok(true),
    }
}

/// Flags years in home reported on a new purchase.
pub fn purchase_with_years_in_home(args: &[&CellValue]) -> RuleEval {
    let [purpose, years] = args else {
        return Err(EvalError::Arity("purchase_with_years_in_home"));
    };
    if int_of("loan_purpose", purpose)? != 7 {
        return Ok(false);
    }
    Ok(opt_num("years_in_home", years)?.is_some_and(|value| value > 0.0))
}

/// Flags an owner-occupied refinance with under a year in the home.
pub fn refi_with_less_than_1_year_in_home(args: &[&CellValue]) -> RuleEval {
    let [purpose, years, occupancy] = args else {
        return Err(EvalError::Arity("refi_with_less_than_1_year_in_home"));
    };
    if !matches!(int_of("loan_purpose", purpose)?, 3 | 9) {
        return Ok(false);
    }
    let Some(years_value) = opt_num("years_in_home", years)? else {
        return Ok(false);
    };
    if years_value >= 1.0 {
        return Ok(false);
    }
    Ok(int_of("occupancy", occupancy)? == 1)
}

/// Flags a state that is not a two-character code.
pub fn state(args: &[&CellValue]) -> RuleEval {
    let [state] = args else {
        return Err(EvalError::Arity("state"));
    };
    if state.is_blank() {
        return Ok(true);
    }
    Ok(state.display().chars().count() != 2)
}

/// Flags a postal code that does not render as five characters. Numeric
/// cells are zero-padded first, so leading-zero ZIPs survive ingestion.
pub fn zip_code(args: &[&CellValue]) -> RuleEval {
    let [postal] = args else {
        return Err(EvalError::Arity("zip_code"));
    };
    if postal.is_blank() {
        return Ok(true);
    }
    let rendered = if matches!(**postal, CellValue::Number(_)) {
        match postal.as_i64() {
            Some(code) => format!("{code:05}"),
            None => postal.display().trim().to_string(),
        }
    } else {
        postal.display().trim().to_string()
    };
    Ok(rendered.chars().count() != 5)
}

/// Flags a blank property address.
pub fn property_address(args: &[&CellValue]) -> RuleEval {
    let [address] = args else {
        return Err(EvalError::Arity("property_address"));
    };
    Ok(address.is_blank())
}
