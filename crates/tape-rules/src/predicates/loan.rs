//! Loan identity, channel, lien, and review metadata checks.

use tape_model::CellValue;

use crate::descriptor::{EvalError, RuleEval};
use crate::support::{has_value, int_of, num, opt_date, ymd};

/// Flags a channel outside {1, 2, 5}.
pub fn channel(args: &[&CellValue]) -> RuleEval {
    let [channel] = args else {
        return Err(EvalError::Arity("channel"));
    };
    Ok(!matches!(int_of("channel", channel)?, 1 | 2 | 5))
}

/// Flags a broker-channel loan with no broker indicator.
pub fn broker_indicator(args: &[&CellValue]) -> RuleEval {
    let [channel, broker] = args else {
        return Err(EvalError::Arity("broker_indicator"));
    };
    if int_of("channel", channel)? != 2 {
        return Ok(false);
    }
    Ok(broker.is_blank())
}

/// Flags a lien position other than first or second.
pub fn lien_position(args: &[&CellValue]) -> RuleEval {
    let [lien] = args else {
        return Err(EvalError::Arity("lien_position"));
    };
    Ok(!matches!(int_of("lien_position", lien)?, 1 | 2))
}

/// Flags a second lien whose product name does not say so.
pub fn lien_position_vs_loan_type(args: &[&CellValue]) -> RuleEval {
    let [lien, loan_type] = args else {
        return Err(EvalError::Arity("lien_position_vs_loan_type"));
    };
    Ok(lien.as_f64() == Some(2.0)
        && !loan_type.display().to_uppercase().contains("SECOND"))
}

/// Flags a blank or non-zero HELOC indicator.
pub fn heloc_indicator_zero(args: &[&CellValue]) -> RuleEval {
    let [heloc] = args else {
        return Err(EvalError::Arity("heloc_indicator_zero"));
    };
    if heloc.is_blank() {
        return Ok(true);
    }
    Ok(num("heloc_indicator", heloc)? != 0.0)
}

/// Flags a loan purpose outside {3, 6, 7, 9, 10}.
pub fn loan_purpose_id(args: &[&CellValue]) -> RuleEval {
    let [purpose] = args else {
        return Err(EvalError::Arity("loan_purpose_id"));
    };
    if purpose.is_blank() {
        return Ok(true);
    }
    Ok(!matches!(int_of("loan_purpose", purpose)?, 3 | 6 | 7 | 9 | 10))
}

/// Flags a loan number that renders in four characters or fewer.
pub fn seller_loan_number(args: &[&CellValue]) -> RuleEval {
    let [loan_number] = args else {
        return Err(EvalError::Arity("seller_loan_number"));
    };
    Ok(loan_number.display().chars().count() <= 4)
}

/// Flags a blank review type or a bare purchase review.
pub fn review_type(args: &[&CellValue]) -> RuleEval {
    let [review] = args else {
        return Err(EvalError::Arity("review_type"));
    };
    Ok(review.is_blank() || review.as_text() == Some("Purchase Review"))
}

/// Flags an ATR/QM status inconsistent with the application date: loans
/// applied for between 2014-01-10 and 2021-06-30 need a safe-harbor status,
/// later loans need an APOR-based one.
pub fn apor_safe_harbor(args: &[&CellValue]) -> RuleEval {
    let [application, status] = args else {
        return Err(EvalError::Arity("apor_safe_harbor"));
    };
    let Some(applied) = opt_date("application_date", application)? else {
        return Ok(true);
    };
    let status = status.display().to_uppercase();
    if (ymd(2014, 1, 10)..=ymd(2021, 6, 30)).contains(&applied) {
        return Ok(!status.contains("SAFE HARBOR"));
    }
    if applied >= ymd(2021, 7, 1) {
        return Ok(!status.contains("APOR"));
    }
    Ok(true)
}

/// Flags any populated MI company name.
pub fn mi_company_name(args: &[&CellValue]) -> RuleEval {
    let [company] = args else {
        return Err(EvalError::Arity("mi_company_name"));
    };
    Ok(!company.is_blank())
}

/// Flags a blank MI percent. Kept for tapes that still carry the column.
pub fn mi_percent(args: &[&CellValue]) -> RuleEval {
    let [percent] = args else {
        return Err(EvalError::Arity("mi_percent"));
    };
    Ok(percent.is_blank())
}

/// Flags a missing or unrecognized paid-by code once any MI evidence exists.
pub fn mi_lender_or_borrower_paid(args: &[&CellValue]) -> RuleEval {
    let [paid, company, percent] = args else {
        return Err(EvalError::Arity("mi_lender_or_borrower_paid"));
    };
    let has_company = !company.is_blank();
    if !(has_company || has_value(percent)) {
        return Ok(false);
    }
    if paid.is_blank() {
        return Ok(true);
    }
    let code = num("mi_lender_or_borrower_paid", paid)?;
    if code.fract() != 0.0 {
        return Ok(true);
    }
    Ok(!matches!(code as i64, 1 | 2))
}
