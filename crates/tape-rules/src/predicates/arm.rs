//! Adjustable-rate loan structure checks.
//!
//! Most of these gate on the amortization type: 1 is fixed, 2 is adjustable.
//! A fixed-rate loan must leave the ARM block empty; an adjustable loan must
//! fill it in.

use tape_model::CellValue;

use crate::descriptor::{EvalError, RuleEval};
use crate::support::{has_value, int_of, num, opt_num};

/// Flags an amortization type other than fixed (1) or adjustable (2).
pub fn amortization_type(args: &[&CellValue]) -> RuleEval {
    let [amort] = args else {
        return Err(EvalError::Arity("amortization_type"));
    };
    Ok(!matches!(int_of("amortization_type", amort)?, 1 | 2))
}

/// Flags a fixed-rate loan whose current rate is empty or drifted from the
/// original rate.
pub fn current_interest_rate(args: &[&CellValue]) -> RuleEval {
    let [amort, orig, current] = args else {
        return Err(EvalError::Arity("current_interest_rate"));
    };
    if amort.as_f64() != Some(1.0) {
        return Ok(false);
    }
    if current.is_blank() || current.as_f64() == Some(0.0) {
        return Ok(true);
    }
    match (
        opt_num("current_interest_rate", current)?,
        opt_num("original_interest_rate", orig)?,
    ) {
        (Some(current_rate), Some(original_rate)) => Ok(current_rate != original_rate),
        _ => Ok(true),
    }
}

/// Flags a current rate that differs from the original rate.
pub fn current_rate_different_from_original(args: &[&CellValue]) -> RuleEval {
    let [orig, current] = args else {
        return Err(EvalError::Arity("current_rate_different_from_original"));
    };
    if orig.is_blank() || current.is_blank() {
        return Ok(false);
    }
    Ok(num("current_interest_rate", current)? != num("original_interest_rate", orig)?)
}

/// Flags a blank or zero original rate, or an adjustable loan whose original
/// rate exceeds the lifetime ceiling.
pub fn original_interest_rate(args: &[&CellValue]) -> RuleEval {
    let [orig, ceiling, amort] = args else {
        return Err(EvalError::Arity("original_interest_rate"));
    };
    if orig.is_blank() || orig.as_f64() == Some(0.0) {
        return Ok(true);
    }
    let rate = num("original_interest_rate", orig)?;
    let Some(max_rate) = opt_num("lifetime_max_rate_ceiling", ceiling)? else {
        return Ok(false);
    };
    if rate <= max_rate {
        return Ok(false);
    }
    Ok(int_of("amortization_type", amort)? == 2)
}

/// Flags an adjustable loan with no initial cap up.
pub fn first_adj_cap(args: &[&CellValue]) -> RuleEval {
    let [cap, amort] = args else {
        return Err(EvalError::Arity("first_adj_cap"));
    };
    Ok(cap.is_blank() && amort.as_f64() == Some(2.0))
}

/// Flags an adjustable loan with no index type.
pub fn index_type(args: &[&CellValue]) -> RuleEval {
    let [index, amort] = args else {
        return Err(EvalError::Arity("index_type"));
    };
    Ok(index.is_blank() && amort.as_f64() == Some(2.0))
}

/// Flags an adjustable loan with no lifetime ceiling.
pub fn lifetime_max_rate_ceiling(args: &[&CellValue]) -> RuleEval {
    let [ceiling, amort] = args else {
        return Err(EvalError::Arity("lifetime_max_rate_ceiling"));
    };
    Ok(ceiling.is_blank() && amort.as_f64() == Some(2.0))
}

/// Flags an adjustable loan with no floor, or a margin above the floor.
pub fn lifetime_min_rate_floor(args: &[&CellValue]) -> RuleEval {
    let [margin, floor, amort] = args else {
        return Err(EvalError::Arity("lifetime_min_rate_floor"));
    };
    if amort.as_f64() != Some(2.0) {
        return Ok(false);
    }
    if floor.is_blank() || floor.as_f64() == Some(0.0) {
        return Ok(true);
    }
    match (
        opt_num("gross_margin", margin)?,
        opt_num("lifetime_min_rate_floor", floor)?,
    ) {
        (Some(margin_rate), Some(floor_rate)) => Ok(margin_rate > floor_rate),
        _ => Ok(false),
    }
}

/// Flags an adjustable loan whose margin exceeds the lifetime ceiling.
pub fn gross_margin_gt_lifetime_max_rate(args: &[&CellValue]) -> RuleEval {
    let [margin, ceiling, amort] = args else {
        return Err(EvalError::Arity("gross_margin_gt_lifetime_max_rate"));
    };
    if amort.is_blank() {
        return Ok(false);
    }
    if int_of("amortization_type", amort)? != 2 {
        return Ok(false);
    }
    if margin.is_blank() || ceiling.is_blank() {
        return Ok(false);
    }
    Ok(num("gross_margin", margin)? > num("lifetime_max_rate_ceiling", ceiling)?)
}

/// Flags a margin below the lifetime floor.
pub fn margin_less_than_floor(args: &[&CellValue]) -> RuleEval {
    let [margin, floor] = args else {
        return Err(EvalError::Arity("margin_less_than_floor"));
    };
    match (
        opt_num("gross_margin", margin)?,
        opt_num("lifetime_min_rate_floor", floor)?,
    ) {
        (Some(margin_rate), Some(floor_rate)) => Ok(margin_rate < floor_rate),
        _ => Ok(false),
    }
}

/// Flags cap fields inconsistent with the amortization type.
pub fn periodic_cap(args: &[&CellValue]) -> RuleEval {
    let [amort, cap_up, cap_down] = args else {
        return Err(EvalError::Arity("periodic_cap"));
    };
    let code = amort.as_f64();
    if code == Some(2.0) && cap_up.is_blank() {
        return Ok(true);
    }
    Ok(code == Some(1.0) && !cap_down.is_blank())
}

/// Flags an adjustable loan missing either initial cap.
pub fn initial_period_cap(args: &[&CellValue]) -> RuleEval {
    let [amort, cap_down, cap_up] = args else {
        return Err(EvalError::Arity("initial_period_cap"));
    };
    Ok(amort.as_f64() == Some(2.0) && (cap_down.is_blank() || cap_up.is_blank()))
}

/// Flags an adjustable loan whose initial fixed period is missing, not a
/// whole number of months, or outside 1-240.
pub fn first_rate_adjustment_frequency(args: &[&CellValue]) -> RuleEval {
    let [amort, period] = args else {
        return Err(EvalError::Arity("first_rate_adjustment_frequency"));
    };
    if amort.is_blank() {
        return Ok(false);
    }
    if int_of("amortization_type", amort)? != 2 {
        return Ok(false);
    }
    if period.is_blank() {
        return Ok(true);
    }
    let months = num("initial_fixed_rate_period", period)?;
    if months.fract() != 0.0 {
        return Ok(true);
    }
    Ok(!(1..=240).contains(&(months as i64)))
}

/// Flags an adjustable loan whose look-back is missing, fractional, or
/// outside 0-99 days.
pub fn arm_look_back_days(args: &[&CellValue]) -> RuleEval {
    let [amort, days] = args else {
        return Err(EvalError::Arity("arm_look_back_days"));
    };
    if amort.as_f64() != Some(2.0) {
        return Ok(false);
    }
    if days.is_blank() {
        return Ok(true);
    }
    let look_back = num("arm_look_back_days", days)?;
    if look_back.fract() != 0.0 {
        return Ok(true);
    }
    Ok(!(0..=99).contains(&(look_back as i64)))
}

/// Flags an adjustable loan with no rounding flag.
pub fn rounding_flag(args: &[&CellValue]) -> RuleEval {
    let [amort, flag] = args else {
        return Err(EvalError::Arity("rounding_flag"));
    };
    Ok(amort.as_f64() == Some(2.0) && flag.is_blank())
}

/// Flags an adjustable loan whose rounding flag is not one of {0, 1, 2, 3}.
pub fn arm_round_flag_value(args: &[&CellValue]) -> RuleEval {
    let [amort, flag] = args else {
        return Err(EvalError::Arity("arm_round_flag_value"));
    };
    if amort.is_blank() {
        return Ok(false);
    }
    if int_of("amortization_type", amort)? != 2 {
        return Ok(false);
    }
    if flag.is_blank() {
        return Ok(false);
    }
    let value = num("arm_round_flag", flag)?;
    if value.fract() != 0.0 {
        return Ok(true);
    }
    Ok(!matches!(value as i64, 0 | 1 | 2 | 3))
}

/// Flags an adjustable loan with no rounding factor.
pub fn rounding_interval(args: &[&CellValue]) -> RuleEval {
    let [amort, factor] = args else {
        return Err(EvalError::Arity("rounding_interval"));
    };
    Ok(amort.as_f64() == Some(2.0) && factor.is_blank())
}

/// Flags an adjustable loan whose payment reset period is blank or zero.
pub fn missing_subsequent_payment_reset(args: &[&CellValue]) -> RuleEval {
    let [amort, reset] = args else {
        return Err(EvalError::Arity("missing_subsequent_payment_reset"));
    };
    Ok(amort.as_f64() == Some(2.0) && (reset.is_blank() || reset.as_f64() == Some(0.0)))
}

/// Shared shape of the reset-period range checks: only adjustable loans are
/// judged, blanks and fractional values flag, and the period must sit in
/// 0-120 months.
fn reset_period_in_range(field: &'static str, amort: &CellValue, period: &CellValue) -> RuleEval {
    if amort.is_blank() {
        return Ok(false);
    }
    if int_of("amortization_type", amort)? != 2 {
        return Ok(false);
    }
    if period.is_blank() {
        return Ok(true);
    }
    let months = num(field, period)?;
    if months.fract() != 0.0 {
        return Ok(true);
    }
    Ok(!(0..=120).contains(&(months as i64)))
}

/// Flags an out-of-range subsequent rate reset period on an adjustable loan.
pub fn subsequent_interest_rate_reset_period_range(args: &[&CellValue]) -> RuleEval {
    let [amort, period] = args else {
        return Err(EvalError::Arity("subsequent_interest_rate_reset_period_range"));
    };
    reset_period_in_range("subsequent_interest_rate_reset_period", amort, period)
}

/// Flags an out-of-range initial fixed payment period on an adjustable loan.
pub fn initial_fixed_payment_period_range(args: &[&CellValue]) -> RuleEval {
    let [amort, period] = args else {
        return Err(EvalError::Arity("initial_fixed_payment_period_range"));
    };
    reset_period_in_range("initial_fixed_payment_period", amort, period)
}

/// Flags an out-of-range subsequent payment reset period on an adjustable
/// loan.
pub fn subsequent_payment_reset_period_range(args: &[&CellValue]) -> RuleEval {
    let [amort, period] = args else {
        return Err(EvalError::Arity("subsequent_payment_reset_period_range"));
    };
    reset_period_in_range("subsequent_payment_reset_period", amort, period)
}

/// Flags a blank interest type or one other than 2.
pub fn interest_type_indicator(args: &[&CellValue]) -> RuleEval {
    let [indicator] = args else {
        return Err(EvalError::Arity("interest_type_indicator"));
    };
    if indicator.is_blank() {
        return Ok(true);
    }
    Ok(int_of("interest_type_indicator", indicator)? != 2)
}

/// Flags a fixed-rate loan carrying any populated ARM field.
pub fn arm_fields_populated_for_fixed_rate(args: &[&CellValue]) -> RuleEval {
    let [amort, fields @ ..] = args else {
        return Err(EvalError::Arity("arm_fields_populated_for_fixed_rate"));
    };
    if amort.is_blank() {
        return Ok(false);
    }
    if int_of("amortization_type", amort)? != 1 {
        return Ok(false);
    }
    Ok(fields.iter().any(|value| has_value(value)))
}

/// Flags an adjustable loan with any blank ARM field.
pub fn arm_fields_required_for_adjustable_rate(args: &[&CellValue]) -> RuleEval {
    let [amort, fields @ ..] = args else {
        return Err(EvalError::Arity("arm_fields_required_for_adjustable_rate"));
    };
    if amort.is_blank() {
        return Ok(false);
    }
    if int_of("amortization_type", amort)? != 2 {
        return Ok(false);
    }
    Ok(fields.iter().any(|value| value.is_blank()))
}

/// Flags any populated negative-amortization field.
pub fn negative_amortization_limit(args: &[&CellValue]) -> RuleEval {
    Ok(args.iter().any(|value| !value.is_blank()))
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
    fn fixed_rate_loans_must_keep_their_original_rate() {
        let fixed = number(1.0);
        assert_eq!(
            current_interest_rate(&[&fixed, &number(6.5), &number(6.5)]),
            Ok(false)
        );
        assert_eq!(
            current_interest_rate(&[&fixed, &number(6.5), &number(6.75)]),
            Ok(true)
        );
        assert_eq!(
            current_interest_rate(&[&fixed, &number(6.5), &CellValue::Missing]),
            Ok(true)
        );
        assert_eq!(
            current_interest_rate(&[&number(2.0), &number(6.5), &number(7.0)]),
            Ok(false)
        );
    }

    #[test]
    fn fixed_loans_reject_populated_arm_fields() {
        let mut cells: Vec<CellValue> = vec![number(1.0)];
        cells.extend(std::iter::repeat_with(|| CellValue::Missing).take(23));
        let refs: Vec<&CellValue> = cells.iter().collect();
        assert_eq!(arm_fields_populated_for_fixed_rate(&refs), Ok(false));

        cells[5] = number(3.0);
        let refs: Vec<&CellValue> = cells.iter().collect();
        assert_eq!(arm_fields_populated_for_fixed_rate(&refs), Ok(true));

        // A literal zero does not count as populated.
        cells[5] = number(0.0);
        let refs: Vec<&CellValue> = cells.iter().collect();
        assert_eq!(arm_fields_populated_for_fixed_rate(&refs), Ok(false));
    }

    #[test]
    fn adjustable_loans_require_every_arm_field() {
        let mut cells: Vec<CellValue> = vec![number(2.0)];
        cells.extend(std::iter::repeat_with(|| number(1.0)).take(23));
        let refs: Vec<&CellValue> = cells.iter().collect();
        assert_eq!(arm_fields_required_for_adjustable_rate(&refs), Ok(false));

        cells[10] = CellValue::Missing;
        let refs: Vec<&CellValue> = cells.iter().collect();
        assert_eq!(arm_fields_required_for_adjustable_rate(&refs), Ok(true));
    }

    #[test]
    fn reset_period_ranges() {
        let adjustable = number(2.0);
        assert_eq!(
            subsequent_interest_rate_reset_period_range(&[&adjustable, &number(12.0)]),
            Ok(false)
        );
        assert_eq!(
            subsequent_interest_rate_reset_period_range(&[&adjustable, &number(121.0)]),
            Ok(true)
        );
        assert_eq!(
            subsequent_interest_rate_reset_period_range(&[&adjustable, &number(6.5)]),
            Ok(true)
        );
        assert_eq!(
            subsequent_interest_rate_reset_period_range(&[&adjustable, &CellValue::Missing]),
            Ok(true)
        );
        assert_eq!(
            subsequent_interest_rate_reset_period_range(&[&number(1.0), &number(121.0)]),
            Ok(false)
        );
        assert_eq!(
            subsequent_interest_rate_reset_period_range(&[&CellValue::Missing, &number(12.0)]),
            Ok(false)
        );
    }

    #[test]
    fn periodic_cap_depends_on_amortization() {
        assert_eq!(
            periodic_cap(&[&number(2.0), &CellValue::Missing, &CellValue::Missing]),
            Ok(true)
        );
        assert_eq!(
            periodic_cap(&[&number(1.0), &CellValue::Missing, &number(2.0)]),
            Ok(true)
        );
        assert_eq!(
            periodic_cap(&[&number(1.0), &CellValue::Missing, &CellValue::Missing]),
            Ok(false)
        );
        assert_eq!(
            periodic_cap(&[&text("bad"), &CellValue::Missing, &CellValue::Missing]),
            Ok(false)
        );
    }

    #[test]
    fn amortization_type_faults_on_garbage() {
        assert_eq!(amortization_type(&[&number(1.0)]), Ok(false));
        assert_eq!(amortization_type(&[&number(3.0)]), Ok(true));
        assert_eq!(
            amortization_type(&[&text("adjustable")]),
            Err(EvalError::NotInteger("amortization_type"))
        );
    }

    #[test]
    fn negative_amortization_fields_must_stay_empty() {
        let blank = CellValue::Missing;
        assert_eq!(negative_amortization_limit(&[&blank, &blank, &blank]), Ok(false));
        assert_eq!(
            negative_amortization_limit(&[&blank, &number(12.0), &blank]),
            Ok(true)
        );
    }
}
