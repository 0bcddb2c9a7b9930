//! Borrower credit, employment, and debt-ratio checks.

use tape_model::CellValue;

use crate::descriptor::{EvalError, RuleEval};
use crate::support::{int_of, num, opt_num, round_to};

/// Flags a blank DTI or a ratio outside (0, 0.6].
pub fn originator_dti(args: &[&CellValue]) -> RuleEval {
    let [dti] = args else {
        return Err(EvalError::Arity("originator_dti"));
    };
    if dti.is_blank() {
        return Ok(true);
    }
    let ratio = num("originator_dti", dti)?;
    Ok(ratio <= 0.0 || ratio > 0.6)
}

/// Flags any populated months-since-bankruptcy value.
pub fn months_bankruptcy(args: &[&CellValue]) -> RuleEval {
    let [months] = args else {
        return Err(EvalError::Arity("months_bankruptcy"));
    };
    Ok(!months.is_blank())
}

/// Flags any populated months-since-foreclosure value.
pub fn months_foreclosure(args: &[&CellValue]) -> RuleEval {
    let [months] = args else {
        return Err(EvalError::Arity("months_foreclosure"));
    };
    Ok(!months.is_blank())
}

/// Flags a blank, zero, or out-of-range (350-950) primary borrower FICO.
pub fn original_primary_borrower_fico(args: &[&CellValue]) -> RuleEval {
    let [fico] = args else {
        return Err(EvalError::Arity("original_primary_borrower_fico"));
    };
    if fico.is_blank() {
        return Ok(true);
    }
    let score = num("original_primary_borrower_fico", fico)?;
    Ok(score == 0.0 || score < 350.0 || score > 950.0)
}

/// Flags a FICO at or below 660.
pub fn borrower_fico_at_or_below_660(args: &[&CellValue]) -> RuleEval {
    let [fico] = args else {
        return Err(EvalError::Arity("borrower_fico_at_or_below_660"));
    };
    Ok(opt_num("borrower_fico_score", fico)?.is_some_and(|score| score <= 660.0))
}

/// Flags a FICO outside the range its scoring model can produce.
pub fn fico_score_by_model(args: &[&CellValue]) -> RuleEval {
    let [model, fico] = args else {
        return Err(EvalError::Arity("fico_score_by_model"));
    };
    if model.is_blank() || fico.is_blank() {
        return Ok(false);
    }
    let model_code = int_of("fico_model_used", model)?;
    let score = num("borrower_fico_score", fico)?;
    Ok(match model_code {
        1 | 2 => score < 350.0 || score > 850.0,
        3 | 99 => score < 150.0 || score > 950.0,
        _ => true,
    })
}

/// Flags a reported DTI that disagrees with debt over income beyond the
/// fourth decimal place.
pub fn dti_consistency(args: &[&CellValue]) -> RuleEval {
    let [dti, debt, income] = args else {
        return Err(EvalError::Arity("dti_consistency"));
    };
    let (Some(reported), Some(monthly_debt), Some(total_income)) = (
        opt_num("originator_dti", dti)?,
        opt_num("monthly_debt_all_borrowers", debt)?,
        opt_num("all_borrower_total_income", income)?,
    ) else {
        return Ok(false);
    };
    if total_income == 0.0 {
        return Err(EvalError::DivisionByZero("all_borrower_total_income"));
    }
    Ok((reported - round_to(monthly_debt / total_income, 4)).abs() > 0.00006)
}

/// Flags blank or zero monthly debt.
pub fn monthly_debt_all_borrowers(args: &[&CellValue]) -> RuleEval {
    let [debt] = args else {
        return Err(EvalError::Arity("monthly_debt_all_borrowers"));
    };
    Ok(debt.is_blank() || debt.as_f64() == Some(0.0))
}

/// Flags a verified W-2 borrower with no length of employment.
pub fn length_employment_borrower(args: &[&CellValue]) -> RuleEval {
    let [length, verification, self_employment] = args else {
        return Err(EvalError::Arity("length_employment_borrower"));
    };
    Ok(length.is_blank()
        && verification.as_f64() == Some(3.0)
        && self_employment.as_f64() == Some(0.0))
}

/// Flags a verified co-borrower with no length of employment on a
/// multi-borrower loan.
pub fn length_employment_co_borrower(args: &[&CellValue]) -> RuleEval {
    let [length, total, self_employment, verification] = args else {
        return Err(EvalError::Arity("length_employment_co_borrower"));
    };
    if !length.is_blank() {
        return Ok(false);
    }
    let Some(borrowers) = opt_num("total_number_of_borrowers", total)? else {
        return Ok(false);
    };
    Ok(borrowers > 1.0
        && self_employment.as_f64() == Some(0.0)
        && verification.as_f64() == Some(3.0))
}

/// Flags employment length exceeding years in industry, at two decimals.
pub fn borrower_employment_gt_industry(args: &[&CellValue]) -> RuleEval {
    let [length, industry] = args else {
        return Err(EvalError::Arity("borrower_employment_gt_industry"));
    };
    let (Some(employment), Some(industry_years)) = (
        opt_num("length_of_employment_borrower", length)?,
        opt_num("borrower_years_in_industry", industry)?,
    ) else {
        return Ok(false);
    };
    Ok(round_to(employment, 2) > round_to(industry_years, 2))
}

/// Flags co-borrower employment length exceeding years in industry.
pub fn coborrower_employment_gt_industry(args: &[&CellValue]) -> RuleEval {
    let [length, industry] = args else {
        return Err(EvalError::Arity("coborrower_employment_gt_industry"));
    };
    let (Some(employment), Some(industry_years)) = (
        opt_num("length_of_employment_coborrower", length)?,
        opt_num("coborrower_years_in_industry", industry)?,
    ) else {
        return Ok(false);
    };
    Ok(employment > industry_years)
}

/// Flags a multi-borrower loan with no employment lengths while either
/// borrower's employment is verified.
pub fn missing_employment_both_borrowers(args: &[&CellValue]) -> RuleEval {
    let [total, b1_length, b2_length, b1_verification, b2_verification] = args else {
        return Err(EvalError::Arity("missing_employment_both_borrowers"));
    };
    if int_of("total_borrowers", total)? < 2 {
        return Ok(false);
    }
    if !b1_length.is_blank() || !b2_length.is_blank() {
        return Ok(false);
    }
    if int_of("b1_emp_ver", b1_verification)? == 3 {
        return Ok(true);
    }
    Ok(int_of("b2_emp_ver", b2_verification)? == 3)
}

/// Flags a self-employment code outside {0, 1, 99}.
pub fn self_employed(args: &[&CellValue]) -> RuleEval {
    let [flag] = args else {
        return Err(EvalError::Arity("self_employed"));
    };
    if flag.is_blank() {
        return Ok(true);
    }
    Ok(!matches!(flag.as_f64(), Some(code) if code == 0.0 || code == 1.0 || code == 99.0))
}

/// Flags a blank borrower count or one below 1.
pub fn total_number_of_borrowers(args: &[&CellValue]) -> RuleEval {
    let [total] = args else {
        return Err(EvalError::Arity("total_number_of_borrowers"));
    };
    if total.is_blank() {
        return Ok(true);
    }
    Ok(num("total_number_of_borrowers", total)? < 1.0)
}

/// Flags more than four borrowers. Unreadable counts are left alone.
pub fn total_number_of_borrowers_over_4(args: &[&CellValue]) -> RuleEval {
    let [total] = args else {
        return Err(EvalError::Arity("total_number_of_borrowers_over_4"));
    };
    if total.is_blank() {
        return Ok(false);
    }
    Ok(matches!(total.as_f64(), Some(count) if count > 4.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> CellValue {
        CellValue::Number(value)
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn originator_dti_bounds() {
        assert_eq!(originator_dti(&[&CellValue::Missing]), Ok(true));
        assert_eq!(originator_dti(&[&number(0.0)]), Ok(true));
        assert_eq!(originator_dti(&[&number(0.45)]), Ok(false));
        assert_eq!(originator_dti(&[&number(0.61)]), Ok(true));
        assert_eq!(
            originator_dti(&[&text("n/a")]),
            Err(EvalError::NotNumeric("originator_dti"))
        );
    }

    #[test]
    fn fico_model_ranges_differ() {
        assert_eq!(fico_score_by_model(&[&number(1.0), &number(700.0)]), Ok(false));
        assert_eq!(fico_score_by_model(&[&number(1.0), &number(900.0)]), Ok(true));
        assert_eq!(fico_score_by_model(&[&number(3.0), &number(900.0)]), Ok(false));
        assert_eq!(fico_score_by_model(&[&number(5.0), &number(700.0)]), Ok(true));
        assert_eq!(
            fico_score_by_model(&[&CellValue::Missing, &number(700.0)]),
            Ok(false)
        );
    }

    #[test]
    fn dti_consistency_faults_on_zero_income() {
        assert_eq!(
            dti_consistency(&[&number(0.3), &number(900.0), &number(0.0)]),
            Err(EvalError::DivisionByZero("all_borrower_total_income"))
        );
        assert_eq!(
            dti_consistency(&[&number(0.3), &number(1500.0), &number(5000.0)]),
            Ok(false)
        );
        assert_eq!(
            dti_consistency(&[&number(0.35), &number(1500.0), &number(5000.0)]),
            Ok(true)
        );
        assert_eq!(
            dti_consistency(&[&CellValue::Missing, &number(1500.0), &number(5000.0)]),
            Ok(false)
        );
    }

    #[test]
    fn second_verification_is_skipped_once_first_matches() {
        // b2_emp_ver holds garbage, but the b1 check already decides.
        assert_eq!(
            missing_employment_both_borrowers(&[
                &number(2.0),
                &CellValue::Missing,
                &CellValue::Missing,
                &number(3.0),
                &text("bad"),
            ]),
            Ok(true)
        );
        assert_eq!(
            missing_employment_both_borrowers(&[
                &number(2.0),
                &CellValue::Missing,
                &CellValue::Missing,
                &number(1.0),
                &text("bad"),
            ]),
            Err(EvalError::NotInteger("b2_emp_ver"))
        );
    }

    #[test]
    fn borrower_count_warning_never_faults() {
        assert_eq!(total_number_of_borrowers_over_4(&[&text("many")]), Ok(false));
        assert_eq!(total_number_of_borrowers_over_4(&[&number(5.0)]), Ok(true));
        assert_eq!(total_number_of_borrowers_over_4(&[&number(4.0)]), Ok(false));
    }

    #[test]
    fn self_employed_accepts_known_codes() {
        assert_eq!(self_employed(&[&number(0.0)]), Ok(false));
        assert_eq!(self_employed(&[&number(99.0)]), Ok(false));
        assert_eq!(self_employed(&[&number(2.0)]), Ok(true));
        assert_eq!(self_employed(&[&text("maybe")]), Ok(true));
        assert_eq!(self_employed(&[&CellValue::Missing]), Ok(true));
    }

    #[test]
    fn employment_comparison_rounds_to_cents() {
        assert_eq!(
            borrower_employment_gt_industry(&[&number(5.124), &number(5.121)]),
            Ok(false)
        );
        assert_eq!(
            borrower_employment_gt_industry(&[&number(5.13), &number(5.12)]),
            Ok(true)
        );
    }
}
