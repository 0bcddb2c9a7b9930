//! Income totals, sign checks, and reserve requirements.

use tape_model::CellValue;

use crate::descriptor::{EvalError, RuleEval};
use crate::support::{int_of, num, num_or_zero, opt_num, round_to};

/// Flags a missing co-borrower income on a loan with two or more borrowers.
pub fn co_borrower_other_income(args: &[&CellValue]) -> RuleEval {
    let [income, total] = args else {
        return Err(EvalError::Arity("co_borrower_other_income"));
    };
    if !income.is_blank() {
        return Ok(false);
    }
    Ok(opt_num("total_number_of_borrowers", total)?.is_some_and(|count| count >= 2.0))
}

/// Flags a total income that does not equal the sum of its parts to the
/// nearest dollar. Blank components count as zero.
pub fn total_income(args: &[&CellValue]) -> RuleEval {
    let [pbw, cbw, pbo, cbo, abti] = args else {
        return Err(EvalError::Arity("total_income"));
    };
    let expected = num_or_zero("pbw", pbw)?
        + num_or_zero("cbw", cbw)?
        + num_or_zero("pbo", pbo)?
        + num_or_zero("cbo", cbo)?;
    let Some(total) = opt_num("abti", abti)? else {
        return Ok(false);
    };
    Ok(round_to((expected - total).abs(), 0) > 0.0)
}

/// Flags a negative total income.
pub fn total_income_negative(args: &[&CellValue]) -> RuleEval {
    let [income] = args else {
        return Err(EvalError::Arity("total_income_negative"));
    };
    Ok(opt_num("all_borrower_total_income", income)?.is_some_and(|total| total < 0.0))
}

/// Flags a blank or non-positive total income.
pub fn all_borrower_total_income(args: &[&CellValue]) -> RuleEval {
    let [income] = args else {
        return Err(EvalError::Arity("all_borrower_total_income"));
    };
    if income.is_blank() {
        return Ok(true);
    }
    Ok(num("all_borrower_total_income", income)? <= 0.0)
}

/// Flags a combined wage income more than a dollar away from the sum of the
/// borrower wages.
pub fn all_borrower_wage_income(args: &[&CellValue]) -> RuleEval {
    let [pbw, cbw, abw] = args else {
        return Err(EvalError::Arity("all_borrower_wage_income"));
    };
    let expected = num_or_zero("pbw", pbw)? + num_or_zero("cbw", cbw)?;
    if abw.is_blank() {
        return Ok(true);
    }
    Ok((expected - num("abw", abw)?).abs() > 1.0)
}

/// Flags any negative figure among the configured income columns.
pub fn negative_incomes(args: &[&CellValue]) -> RuleEval {
    for value in args {
        if value.is_blank() {
            continue;
        }
        if num("incomes", value)? < 0.0 {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Flags empty reserves except on closed-end second and agency products.
pub fn liquid_reserves(args: &[&CellValue]) -> RuleEval {
    let [reserves, loan_type] = args else {
        return Err(EvalError::Arity("liquid_reserves"));
    };
    if !(reserves.is_blank() || reserves.as_f64() == Some(0.0)) {
        return Ok(false);
    }
    let product = loan_type.display().to_uppercase();
    Ok(!product.contains("CLOSED END SECOND") && !product.contains("AGENCY"))
}

/// Flags zero reserves on a primary residence or second home.
pub fn zero_reserves_primary_second(args: &[&CellValue]) -> RuleEval {
    let [reserves, occupancy] = args else {
        return Err(EvalError::Arity("zero_reserves_primary_second"));
    };
    if reserves.is_blank() || occupancy.is_blank() {
        return Ok(false);
    }
    if num("liquid_cash_reserves", reserves)? != 0.0 {
        return Ok(false);
    }
    Ok(matches!(int_of("occupancy", occupancy)?, 1 | 2))
}

/// Flags negative reserves.
pub fn negative_reserves(args: &[&CellValue]) -> RuleEval {
    let [reserves] = args else {
        return Err(EvalError::Arity("negative_reserves"));
    };
    Ok(opt_num("liquid_cash_reserves", reserves)?.is_some_and(|amount| amount < 0.0))
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
    fn total_income_treats_blanks_as_zero() {
        let blank = CellValue::Missing;
        assert_eq!(
            total_income(&[&number(4000.0), &blank, &number(1000.0), &blank, &number(5000.0)]),
            Ok(false)
        );
        assert_eq!(
            total_income(&[&number(4000.0), &blank, &number(1000.0), &blank, &number(5400.0)]),
            Ok(true)
        );
        // Sub-dollar drift rounds away.
        assert_eq!(
            total_income(&[&number(4000.25), &blank, &number(1000.0), &blank, &number(5000.5)]),
            Ok(false)
        );
        assert_eq!(
            total_income(&[&number(4000.0), &blank, &number(1000.0), &blank, &blank]),
            Ok(false)
        );
    }

    #[test]
    fn negative_incomes_skips_blanks_and_stops_at_first_hit() {
        let blank = CellValue::Missing;
        assert_eq!(
            negative_incomes(&[&blank, &number(1200.0), &number(-5.0), &text("bad")]),
            Ok(true)
        );
        assert_eq!(negative_incomes(&[&blank, &number(1200.0)]), Ok(false));
        assert_eq!(
            negative_incomes(&[&text("bad"), &number(-5.0)]),
            Err(EvalError::NotNumeric("incomes"))
        );
        assert_eq!(negative_incomes(&[]), Ok(false));
    }

    #[test]
    fn liquid_reserves_exempts_special_products() {
        let blank = CellValue::Missing;
        assert_eq!(liquid_reserves(&[&blank, &text("Jumbo AAA")]), Ok(true));
        assert_eq!(
            liquid_reserves(&[&number(0.0), &text("Closed End Second Lien")]),
            Ok(false)
        );
        assert_eq!(liquid_reserves(&[&blank, &text("Agency High Balance")]), Ok(false));
        assert_eq!(liquid_reserves(&[&number(2500.0), &text("Jumbo AAA")]), Ok(false));
    }

    #[test]
    fn wage_income_tolerates_a_dollar() {
        assert_eq!(
            all_borrower_wage_income(&[&number(3000.0), &number(2000.0), &number(5000.75)]),
            Ok(false)
        );
        assert_eq!(
            all_borrower_wage_income(&[&number(3000.0), &number(2000.0), &number(5002.0)]),
            Ok(true)
        );
        assert_eq!(
            all_borrower_wage_income(&[&number(3000.0), &CellValue::Missing, &CellValue::Missing]),
            Ok(true)
        );
    }

    #[test]
    fn zero_reserves_only_flag_owner_occupied() {
        assert_eq!(
            zero_reserves_primary_second(&[&number(0.0), &number(1.0)]),
            Ok(true)
        );
        assert_eq!(
            zero_reserves_primary_second(&[&number(0.0), &number(3.0)]),
            Ok(false)
        );
        assert_eq!(
            zero_reserves_primary_second(&[&number(100.0), &text("bad")]),
            Ok(false)
        );
        assert_eq!(
            zero_reserves_primary_second(&[&CellValue::Missing, &number(1.0)]),
            Ok(false)
        );
    }
}
