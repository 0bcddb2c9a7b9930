//! Date sequencing and loan term checks.

use chrono::{Datelike, Months};
use tape_model::CellValue;

use crate::descriptor::{EvalError, RuleEval};
use crate::support::{current_year, date_of, num, opt_date, opt_num};

/// Flags a zero origination date.
pub fn origination_date(args: &[&CellValue]) -> RuleEval {
    let [origination] = args else {
        return Err(EvalError::Arity("origination_date"));
    };
    Ok(origination.as_f64() == Some(0.0))
}

/// Flags a first payment date that is blank, before origination, or not on
/// the first of a month.
pub fn first_payment_date(args: &[&CellValue]) -> RuleEval {
    let [first_payment, origination] = args else {
        return Err(EvalError::Arity("first_payment_date"));
    };
    if first_payment.is_blank() {
        return Ok(true);
    }
    let payment_date = date_of("first_payment_date_of_loan", first_payment)?;
    if let Some(origination_date) = opt_date("origination_date", origination)? {
        if origination_date > payment_date {
            return Ok(true);
        }
    }
    Ok(payment_date.day() != 1)
}

/// Flags a valuation 180 days or more before origination.
pub fn valuation_age(args: &[&CellValue]) -> RuleEval {
    let [valuation, origination] = args else {
        return Err(EvalError::Arity("valuation_age"));
    };
    match (
        opt_date("origination_date", origination)?,
        opt_date("original_property_valuation_date", valuation)?,
    ) {
        (Some(originated), Some(valued)) => Ok((originated - valued).num_days() >= 180),
        _ => Ok(false),
    }
}

/// Flags a valuation dated after origination.
pub fn valuation_after_origination(args: &[&CellValue]) -> RuleEval {
    let [valuation, origination] = args else {
        return Err(EvalError::Arity("valuation_after_origination"));
    };
    match (
        opt_date("original_property_valuation_date", valuation)?,
        opt_date("origination_date", origination)?,
    ) {
        (Some(valued), Some(originated)) => Ok(valued > originated),
        _ => Ok(false),
    }
}

/// Flags an appraisal 24 months or older as of the paid-through date.
pub fn original_appraisal_24_months_old(args: &[&CellValue]) -> RuleEval {
    let [valuation, paid_through] = args else {
        return Err(EvalError::Arity("original_appraisal_24_months_old"));
    };
    if valuation.is_blank() || paid_through.is_blank() {
        return Ok(true);
    }
    let valued = date_of("original_property_valuation_date", valuation)?;
    let paid = date_of("interest_paid_through_date", paid_through)?;
    let cutoff = paid
        .checked_sub_months(Months::new(24))
        .ok_or(EvalError::NotDate("interest_paid_through_date"))?;
    Ok(valued <= cutoff)
}

/// Flags a blank application date, one after origination, or one more than a
/// decade old.
pub fn application_date(args: &[&CellValue]) -> RuleEval {
    let [application, origination] = args else {
        return Err(EvalError::Arity("application_date"));
    };
    let Some(applied) = opt_date("application_received_date", application)? else {
        return Ok(true);
    };
    if let Some(originated) = opt_date("origination_date", origination)? {
        if applied > originated {
            return Ok(true);
        }
    }
    Ok(current_year() - applied.year() > 10)
}

/// Flags more than a year between application and origination. Unreadable
/// dates are left alone here; the sibling checks cover them.
pub fn application_note_date_gap(args: &[&CellValue]) -> RuleEval {
    let [application, origination] = args else {
        return Err(EvalError::Arity("application_note_date_gap"));
    };
    if application.is_blank() || origination.is_blank() {
        return Ok(false);
    }
    let (Some(applied), Some(originated)) = (application.as_date(), origination.as_date()) else {
        return Ok(false);
    };
    Ok((originated - applied).num_days().abs() > 365)
}

/// Flags a first payment date two or more years away from the application.
pub fn application_received_vs_first_payment(args: &[&CellValue]) -> RuleEval {
    let [application, first_payment] = args else {
        return Err(EvalError::Arity("application_received_vs_first_payment"));
    };
    if application.is_blank() || first_payment.is_blank() {
        return Ok(false);
    }
    let applied = date_of("application_received_date", application)?;
    let first = date_of("first_payment_date_of_loan", first_payment)?;
    let upper = applied
        .checked_add_months(Months::new(24))
        .ok_or(EvalError::NotDate("application_received_date"))?;
    let lower = applied
        .checked_sub_months(Months::new(24))
        .ok_or(EvalError::NotDate("application_received_date"))?;
    Ok(first >= upper || first <= lower)
}

/// Flags a first payment date after maturity.
pub fn first_payment_before_maturity(args: &[&CellValue]) -> RuleEval {
    let [first_payment, maturity] = args else {
        return Err(EvalError::Arity("first_payment_before_maturity"));
    };
    match (
        opt_date("first_payment_date", first_payment)?,
        opt_date("maturity_date", maturity)?,
    ) {
        (Some(first), Some(matures)) => Ok(first > matures),
        _ => Ok(false),
    }
}

/// Flags a blank maturity date or one not on the first of a month.
pub fn maturity_date_first_of_month(args: &[&CellValue]) -> RuleEval {
    let [maturity] = args else {
        return Err(EvalError::Arity("maturity_date_first_of_month"));
    };
    if maturity.is_blank() {
        return Ok(true);
    }
    Ok(date_of("maturity_date", maturity)?.day() != 1)
}

/// Shared body of the two term checks: blank, zero, out of 120-480, or
/// different from the amortization term.
fn term_matches_amortization(term: &CellValue, amort: &CellValue) -> RuleEval {
    if term.is_blank() || term.as_f64() == Some(0.0) {
        return Ok(true);
    }
    let term_months = num("original_term_to_maturity", term)?;
    if term_months < 120.0 || term_months > 480.0 {
        return Ok(true);
    }
    match opt_num("original_amortization_term", amort)? {
        Some(amortization_months) => Ok(term_months != amortization_months),
        None => Ok(true),
    }
}

/// Flags a term to maturity that is out of bounds or differs from the
/// amortization term.
pub fn original_term_to_maturity_vs_amortization(args: &[&CellValue]) -> RuleEval {
    let [term, amort] = args else {
        return Err(EvalError::Arity("original_term_to_maturity_vs_amortization"));
    };
    term_matches_amortization(term, amort)
}

/// Same check under its legacy name; both stay registered.
pub fn original_term(args: &[&CellValue]) -> RuleEval {
    let [term, amort] = args else {
        return Err(EvalError::Arity("original_term"));
    };
    term_matches_amortization(term, amort)
}

/// Flags an amortization term that differs from the term to maturity.
pub fn amort_term_gt_term_to_maturity(args: &[&CellValue]) -> RuleEval {
    let [amort, term] = args else {
        return Err(EvalError::Arity("amort_term_gt_term_to_maturity"));
    };
    match (
        opt_num("original_amortization_term", amort)?,
        opt_num("original_term_to_maturity", term)?,
    ) {
        (Some(amortization_months), Some(term_months)) => {
            Ok(amortization_months != term_months)
        }
        _ => Ok(true),
    }
}

/// Flags an amortization term below 60 months.
pub fn original_amortization_term_lt_60(args: &[&CellValue]) -> RuleEval {
    let [term] = args else {
        return Err(EvalError::Arity("original_amortization_term_lt_60"));
    };
    Ok(opt_num("original_amortization_term", term)?.is_some_and(|months| months < 60.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::ymd;

    fn number(value: f64) -> CellValue {
        CellValue::Number(value)
    }

    fn date(year: i32, month: u32, day: u32) -> CellValue {
        CellValue::Date(ymd(year, month, day))
    }

    #[test]
    fn first_payment_must_start_a_month() {
        assert_eq!(
            first_payment_date(&[&date(2024, 7, 1), &date(2024, 5, 15)]),
            Ok(false)
        );
        assert_eq!(
            first_payment_date(&[&date(2024, 7, 15), &date(2024, 5, 15)]),
            Ok(true)
        );
        assert_eq!(
            first_payment_date(&[&date(2024, 4, 1), &date(2024, 5, 15)]),
            Ok(true)
        );
        assert_eq!(
            first_payment_date(&[&CellValue::Missing, &date(2024, 5, 15)]),
            Ok(true)
        );
    }

    #[test]
    fn stale_valuations_flag_at_180_days() {
        assert_eq!(
            valuation_age(&[&date(2024, 1, 1), &date(2024, 6, 29)]),
            Ok(true)
        );
        assert_eq!(
            valuation_age(&[&date(2024, 1, 1), &date(2024, 6, 28)]),
            Ok(false)
        );
        assert_eq!(
            valuation_age(&[&CellValue::Missing, &date(2024, 6, 29)]),
            Ok(false)
        );
    }

    #[test]
    fn appraisal_age_uses_paid_through_date() {
        assert_eq!(
            original_appraisal_24_months_old(&[&date(2022, 5, 1), &date(2024, 6, 1)]),
            Ok(true)
        );
        assert_eq!(
            original_appraisal_24_months_old(&[&date(2022, 7, 1), &date(2024, 6, 1)]),
            Ok(false)
        );
        assert_eq!(
            original_appraisal_24_months_old(&[&CellValue::Missing, &date(2024, 6, 1)]),
            Ok(true)
        );
    }

    #[test]
    fn term_checks_cover_range_and_consistency() {
        assert_eq!(
            original_term(&[&number(360.0), &number(360.0)]),
            Ok(false)
        );
        assert_eq!(original_term(&[&number(360.0), &number(300.0)]), Ok(true));
        assert_eq!(original_term(&[&number(100.0), &number(100.0)]), Ok(true));
        assert_eq!(original_term(&[&number(481.0), &number(481.0)]), Ok(true));
        assert_eq!(original_term(&[&number(0.0), &number(360.0)]), Ok(true));
        assert_eq!(
            original_term(&[&CellValue::Missing, &number(360.0)]),
            Ok(true)
        );
        assert_eq!(
            original_term_to_maturity_vs_amortization(&[&number(360.0), &CellValue::Missing]),
            Ok(true)
        );
    }

    #[test]
    fn payment_window_is_two_years_around_application() {
        assert_eq!(
            application_received_vs_first_payment(&[&date(2023, 3, 10), &date(2023, 5, 1)]),
            Ok(false)
        );
        assert_eq!(
            application_received_vs_first_payment(&[&date(2023, 3, 10), &date(2025, 3, 10)]),
            Ok(true)
        );
        assert_eq!(
            application_received_vs_first_payment(&[&date(2023, 3, 10), &date(2021, 3, 10)]),
            Ok(true)
        );
        assert_eq!(
            application_received_vs_first_payment(&[&CellValue::Missing, &date(2023, 5, 1)]),
            Ok(false)
        );
    }

    #[test]
    fn note_date_gap_ignores_unreadable_cells() {
        assert_eq!(
            application_note_date_gap(&[&date(2022, 1, 1), &date(2023, 6, 1)]),
            Ok(true)
        );
        assert_eq!(
            application_note_date_gap(&[&date(2023, 1, 1), &date(2023, 6, 1)]),
            Ok(false)
        );
        assert_eq!(
            application_note_date_gap(&[
                &CellValue::Text("soon".to_string()),
                &date(2023, 6, 1)
            ]),
            Ok(false)
        );
    }

    #[test]
    fn origination_flags_only_zero() {
        assert_eq!(origination_date(&[&number(0.0)]), Ok(true));
        assert_eq!(origination_date(&[&date(2024, 5, 15)]), Ok(false));
        assert_eq!(origination_date(&[&CellValue::Missing]), Ok(false));
    }
}
