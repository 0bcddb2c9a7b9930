//! Balance, LTV, payment, and fee arithmetic checks.

use tape_model::CellValue;

use crate::descriptor::{EvalError, RuleEval};
use crate::support::{date_of, int_of, months_between, num, num_or_zero, opt_num, pmt, round_to};

/// Flags a purchase-group loan with no cash out, or a refinance whose cash
/// out exceeds 1% of the original balance.
pub fn cash_out_amount(args: &[&CellValue]) -> RuleEval {
    let [cash, purpose, orig] = args else {
        return Err(EvalError::Arity("cash_out_amount"));
    };
    let empty = cash.is_blank() || cash.as_f64() == Some(0.0);
    let in_group = matches!(purpose.as_f64(), Some(p) if [1.0, 2.0, 3.0, 4.0].contains(&p));
    let oversized = match (
        opt_num("cash_out_amount", cash)?,
        opt_num("original_loan_amount", orig)?,
    ) {
        (Some(amount), Some(balance)) => amount.abs() > balance.abs() * 0.01,
        _ => false,
    };
    Ok((empty && in_group) || (oversized && !in_group))
}

/// Flags cash out on the wrong side of $2,000 for purpose codes 3 and 9.
pub fn refi_cash_out_threshold(args: &[&CellValue]) -> RuleEval {
    let [purpose, cash] = args else {
        return Err(EvalError::Arity("refi_cash_out_threshold"));
    };
    let purpose_code = int_of("loan_purpose", purpose)?;
    if !matches!(purpose_code, 3 | 9) {
        return Ok(false);
    }
    let Some(amount) = opt_num("cash_out_amount", cash)? else {
        return Ok(false);
    };
    if purpose_code == 9 {
        Ok(amount > 2000.0)
    } else {
        Ok(amount < 2000.0)
    }
}

/// Flags cash out above the original loan amount.
pub fn large_cash_out(args: &[&CellValue]) -> RuleEval {
    let [cash, orig] = args else {
        return Err(EvalError::Arity("large_cash_out"));
    };
    match (
        opt_num("cash_out_amount", cash)?,
        opt_num("original_loan_amount", orig)?,
    ) {
        (Some(amount), Some(balance)) => Ok(amount > balance),
        _ => Ok(false),
    }
}

/// Flags a CLTV below the LTV at four decimals, or a blank CLTV.
pub fn cltv_less_than_ltv(args: &[&CellValue]) -> RuleEval {
    let [cltv, ltv] = args else {
        return Err(EvalError::Arity("cltv_less_than_ltv"));
    };
    if cltv.is_blank() {
        return Ok(true);
    }
    let combined = num("original_cltv", cltv)?;
    let Some(single) = opt_num("original_ltv", ltv)? else {
        return Ok(false);
    };
    Ok(round_to(combined, 4) < round_to(single, 4))
}

/// Recomputes CLTV from its components and flags disagreement beyond a
/// hundredth of a point. Lower of sales price and appraisal is the
/// denominator; a junior lien adds to the numerator.
pub fn cltv_components(args: &[&CellValue]) -> RuleEval {
    let [loan, junior, sales, appraised, cltv, _lien] = args else {
        return Err(EvalError::Arity("cltv_components"));
    };
    let junior_balance = num_or_zero("junior_mortgage_balance", junior)?;
    let Some(loan_amount) = opt_num("original_loan_amount", loan)? else {
        return Ok(false);
    };
    let numerator = loan_amount + junior_balance;
    let sales_price = if sales.is_blank() || sales.as_f64() == Some(0.0) {
        None
    } else {
        Some(num("sales_price", sales)?)
    };
    let appraised_value = opt_num("original_appraised_property_value", appraised)?;
    let denominator = match (sales_price, appraised_value) {
        (Some(price), Some(value)) => price.min(value),
        (Some(price), None) => price,
        (None, Some(value)) => value,
        (None, None) => return Ok(false),
    };
    let computed = round_to(numerator / denominator, 4);
    let Some(reported) = opt_num("original_cltv", cltv)? else {
        return Ok(false);
    };
    Ok((computed - round_to(reported, 5)).abs() > 0.0001)
}

/// Recomputes LTV against the lower of sales price and appraisal and flags
/// disagreement beyond a tenth of a point, plus blank, zero, or >100% LTVs.
pub fn original_ltv(args: &[&CellValue]) -> RuleEval {
    let [loan, sales, appraised, ltv] = args else {
        return Err(EvalError::Arity("original_ltv"));
    };
    let sales_price = if sales.is_blank() || sales.as_f64() == Some(0.0) {
        None
    } else {
        Some(num("sales_price", sales)?)
    };
    let appraised_value = opt_num("original_appraised_property_value", appraised)?;
    if ltv.is_blank() || ltv.as_f64() == Some(0.0) {
        return Ok(true);
    }
    let reported = num("original_ltv", ltv)?;
    if reported / 100.0 > 1.0 {
        return Ok(true);
    }
    let Some(loan_amount) = opt_num("original_loan_amount", loan)? else {
        return Ok(false);
    };
    let denominator = match (sales_price, appraised_value) {
        (Some(price), Some(value)) => price.min(value),
        (Some(price), None) => price,
        (None, Some(value)) => value,
        (None, None) => return Ok(false),
    };
    Ok((round_to(loan_amount / denominator, 4) - round_to(reported, 4)).abs() > 0.001)
}

/// Flags a first-lien loan with no junior balance whose CLTV and LTV differ.
pub fn ocltv_vs_oltv(args: &[&CellValue]) -> RuleEval {
    let [cltv, ltv, junior, loan_type] = args else {
        return Err(EvalError::Arity("ocltv_vs_oltv"));
    };
    if !(junior.is_blank() || junior.as_f64() == Some(0.0)) {
        return Ok(false);
    }
    let differs = match (
        opt_num("original_cltv", cltv)?,
        opt_num("original_ltv", ltv)?,
    ) {
        (Some(combined), Some(single)) => round_to(combined, 4) != round_to(single, 4),
        _ => true,
    };
    Ok(differs && !loan_type.display().to_uppercase().contains("SECOND"))
}

/// Flags a CLTV above 90% outside the select program.
pub fn oltv_high_for_nonselect(args: &[&CellValue]) -> RuleEval {
    let [cltv, loan_type] = args else {
        return Err(EvalError::Arity("oltv_high_for_nonselect"));
    };
    let Some(combined) = opt_num("original_cltv", cltv)? else {
        return Ok(false);
    };
    Ok(combined > 0.9 && loan_type.display().trim().to_uppercase() != "SELECT 90 30 YR")
}

/// Flags an original balance outside $10,000 to $10,000,000.
pub fn original_loan_amount_out_of_range(args: &[&CellValue]) -> RuleEval {
    let [loan] = args else {
        return Err(EvalError::Arity("original_loan_amount_out_of_range"));
    };
    let Some(amount) = opt_num("original_loan_amount", loan)? else {
        return Ok(false);
    };
    Ok(amount < 10_000.0 || amount > 10_000_000.0)
}

/// Flags a blank or zero current balance, or one above the original balance.
pub fn scheduled_upb(args: &[&CellValue]) -> RuleEval {
    let [current, orig] = args else {
        return Err(EvalError::Arity("scheduled_upb"));
    };
    if current.is_blank() || current.as_f64() == Some(0.0) {
        return Ok(true);
    }
    let balance = num("current_loan_amount", current)?;
    Ok(opt_num("original_loan_amount", orig)?.is_some_and(|original| balance > original))
}

/// Flags a current balance above the original balance.
pub fn current_gt_original_balance(args: &[&CellValue]) -> RuleEval {
    let [current, orig] = args else {
        return Err(EvalError::Arity("current_gt_original_balance"));
    };
    match (
        opt_num("current_loan_amount", current)?,
        opt_num("original_loan_amount", orig)?,
    ) {
        (Some(balance), Some(original)) => Ok(balance > original),
        _ => Ok(false),
    }
}

/// Flags a zero-age loan whose current balance has moved off the original.
pub fn age_zero_current_balance_diff(args: &[&CellValue]) -> RuleEval {
    let [term, maturity, paid_through, current, orig] = args else {
        return Err(EvalError::Arity("age_zero_current_balance_diff"));
    };
    if term.is_blank() || maturity.is_blank() || paid_through.is_blank() {
        return Ok(true);
    }
    let maturity_date = date_of("maturity_date", maturity)?;
    let paid_date = date_of("interest_paid_through_date", paid_through)?;
    let remaining = months_between(maturity_date, paid_date) as f64;
    let age = num("original_amortization_term", term)? - remaining;
    if round_to(age, 6) != 0.0 {
        return Ok(false);
    }
    match (
        opt_num("current_loan_amount", current)?,
        opt_num("original_loan_amount", orig)?,
    ) {
        (Some(balance), Some(original)) => Ok(balance != original),
        _ => Ok(true),
    }
}

/// Flags a drawn amount above the junior mortgage balance.
pub fn junior_drawn_amount(args: &[&CellValue]) -> RuleEval {
    let [drawn, balance] = args else {
        return Err(EvalError::Arity("junior_drawn_amount"));
    };
    match (
        opt_num("junior_drawn_amount", drawn)?,
        opt_num("junior_mortgage_balance", balance)?,
    ) {
        (Some(drawn_amount), Some(junior_balance)) => Ok(drawn_amount > junior_balance),
        _ => Ok(false),
    }
}

/// Flags blank pledged assets or a pledge above half the appraised value.
pub fn pledge_amount(args: &[&CellValue]) -> RuleEval {
    let [pledged, appraised] = args else {
        return Err(EvalError::Arity("pledge_amount"));
    };
    if pledged.is_blank() {
        return Ok(true);
    }
    let pledged_amount = num("original_pledged_assets", pledged)?;
    match opt_num("original_appraised_property_value", appraised)? {
        Some(value) => Ok(pledged_amount > value * 0.5),
        None => Ok(false),
    }
}

/// Flags a payment due that is blank, zero, or more than 20% away from the
/// level payment implied by rate, term, and balance.
pub fn principal_interest(args: &[&CellValue]) -> RuleEval {
    let [due, rate, term, loan] = args else {
        return Err(EvalError::Arity("principal_interest"));
    };
    if due.is_blank() || due.as_f64() == Some(0.0) {
        return Ok(true);
    }
    let (Some(annual_rate), Some(term_months), Some(loan_amount)) = (
        opt_num("current_interest_rate", rate)?,
        opt_num("original_amortization_term", term)?,
        opt_num("original_loan_amount", loan)?,
    ) else {
        return Ok(false);
    };
    let expected = round_to(pmt(annual_rate / 12.0, term_months, -loan_amount), 2);
    let actual = round_to(num("current_payment_amount_due", due)?, 2);
    Ok((actual - expected).abs() > expected * 0.2)
}

/// Flags an empty T&I payment unless the loan is escrow-exempt (0 or 99).
pub fn ti_payment(args: &[&CellValue]) -> RuleEval {
    let [payment, escrow] = args else {
        return Err(EvalError::Arity("ti_payment"));
    };
    let empty = payment.is_blank() || payment.as_f64() == Some(0.0);
    Ok(empty && !matches!(escrow.as_f64(), Some(code) if code == 0.0 || code == 99.0))
}

/// Flags a negative T&I payment.
pub fn negative_ti_payment(args: &[&CellValue]) -> RuleEval {
    let [payment] = args else {
        return Err(EvalError::Arity("negative_ti_payment"));
    };
    Ok(opt_num("current_other_monthly_payment", payment)?.is_some_and(|amount| amount < 0.0))
}

/// Flags a servicing fee outside 5 to 50 basis points, or a blank/zero fee.
pub fn servicing_fee(args: &[&CellValue]) -> RuleEval {
    let [fee] = args else {
        return Err(EvalError::Arity("servicing_fee"));
    };
    if fee.is_blank() || fee.as_f64() == Some(0.0) {
        return Ok(true);
    }
    let rate = num("servicing_fee", fee)?;
    Ok(!(0.0005..=0.005).contains(&rate))
}

/// Flags down-payment percentages inconsistent with the loan purpose:
/// purchases need one at or below 100, refinances must not carry one.
pub fn percent_down_payment(args: &[&CellValue]) -> RuleEval {
    let [percent, purpose] = args else {
        return Err(EvalError::Arity("percent_down_payment"));
    };
    let purpose_code = purpose.as_f64();
    let purchase_like = matches!(purpose_code, Some(p) if p == 6.0 || p == 7.0);
    if purchase_like {
        if percent.is_blank() {
            return Ok(true);
        }
        if let Some(value) = opt_num("percent_down_payment", percent)? {
            if value > 100.0 {
                return Ok(true);
            }
        }
    }
    let refinance_like =
        matches!(purpose_code, Some(p) if [1.0, 2.0, 3.0, 4.0, 8.0, 9.0].contains(&p));
    if refinance_like {
        return Ok(opt_num("percent_down_payment", percent)?.is_some_and(|value| value > 0.0));
    }
    Ok(false)
}

/// Flags any positive buy-down period.
pub fn buy_down_period(args: &[&CellValue]) -> RuleEval {
    let [period] = args else {
        return Err(EvalError::Arity("buy_down_period"));
    };
    Ok(opt_num("buy_down_period", period)?.is_some_and(|months| months > 0.0))
}

/// Flags penalty type 1 with an empty calculation.
pub fn prepayment_penalty_calc(args: &[&CellValue]) -> RuleEval {
    let [penalty_type, calculation] = args else {
        return Err(EvalError::Arity("prepayment_penalty_calc"));
    };
    Ok(penalty_type.as_f64() == Some(1.0)
        && (calculation.is_blank() || calculation.as_f64() == Some(0.0)))
}

/// Flags a blank penalty type alongside a populated total term.
pub fn prepayment_penalty_type(args: &[&CellValue]) -> RuleEval {
    let [penalty_type, total_term] = args else {
        return Err(EvalError::Arity("prepayment_penalty_type"));
    };
    Ok(penalty_type.is_blank()
        && !(total_term.is_blank() || total_term.as_f64() == Some(0.0)))
}

/// Flags an adjustable loan whose penalty term is missing or not one of the
/// standard month counts.
pub fn prepayment_term(args: &[&CellValue]) -> RuleEval {
    let [amort, total_term] = args else {
        return Err(EvalError::Arity("prepayment_term"));
    };
    if amort.as_f64() != Some(2.0) {
        return Ok(false);
    }
    if total_term.is_blank() {
        return Ok(true);
    }
    Ok(!matches!(
        int_of("prepayment_penalty_total_term", total_term)?,
        60 | 48 | 36 | 24 | 12 | 18
    ))
}

/// Flags a positive sales price on a non-purchase loan.
pub fn sales_price_incorrect_purpose(args: &[&CellValue]) -> RuleEval {
    let [sales, purpose] = args else {
        return Err(EvalError::Arity("sales_price_incorrect_purpose"));
    };
    let Some(price) = opt_num("sales_price", sales)? else {
        return Ok(false);
    };
    Ok(price > 0.0 && !matches!(purpose.as_f64(), Some(p) if p == 6.0 || p == 7.0))
}

/// Flags the purpose/sales-price mismatch both ways: purchases without a
/// price and non-purchases with one.
pub fn purpose_id_vs_sales_price(args: &[&CellValue]) -> RuleEval {
    let [purpose, sales] = args else {
        return Err(EvalError::Arity("purpose_id_vs_sales_price"));
    };
    let purpose_code = int_of("loan_purpose", purpose)?;
    let price_empty = sales.is_blank() || sales.as_f64() == Some(0.0);
    let purchase_like = matches!(purpose_code, 6 | 7);
    Ok((purchase_like && price_empty) || (!purchase_like && !price_empty))
}
