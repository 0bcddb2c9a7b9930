//! Coercion helpers shared by the predicate modules.
//!
//! The tape arrives typed loosely, so most checks start by coercing cells.
//! Three conventions repeat across the catalogue: `opt_*` treats a blank cell
//! as absent and only faults on garbage, the plain form faults on blank too,
//! and `num_or_zero` folds blanks into a running sum.

use chrono::{Datelike, Local, NaiveDate};
use tape_model::CellValue;

use crate::descriptor::EvalError;

/// Numeric coercion that faults on anything non-numeric, blanks included.
pub(crate) fn num(field: &'static str, value: &CellValue) -> Result<f64, EvalError> {
    value.as_f64().ok_or(EvalError::NotNumeric(field))
}

/// Numeric coercion where blank means absent rather than faulty.
pub(crate) fn opt_num(field: &'static str, value: &CellValue) -> Result<Option<f64>, EvalError> {
    if value.is_blank() {
        return Ok(None);
    }
    match value.as_f64() {
        Some(number) => Ok(Some(number)),
        None => Err(EvalError::NotNumeric(field)),
    }
}

/// Blank cells contribute zero; anything else must be numeric.
pub(crate) fn num_or_zero(field: &'static str, value: &CellValue) -> Result<f64, EvalError> {
    if value.is_blank() {
        return Ok(0.0);
    }
    num(field, value)
}

/// Integer coercion. Faults on blanks and non-finite values; fractional
/// numbers truncate toward zero.
pub(crate) fn int_of(field: &'static str, value: &CellValue) -> Result<i64, EvalError> {
    if value.is_blank() {
        return Err(EvalError::NotInteger(field));
    }
    let number = value.as_f64().ok_or(EvalError::NotInteger(field))?;
    if !number.is_finite() {
        return Err(EvalError::NotInteger(field));
    }
    Ok(number.trunc() as i64)
}

/// Date coercion that faults when the cell cannot be read as a date.
pub(crate) fn date_of(field: &'static str, value: &CellValue) -> Result<NaiveDate, EvalError> {
    value.as_date().ok_or(EvalError::NotDate(field))
}

/// Date coercion where blank means absent rather than faulty.
pub(crate) fn opt_date(
    field: &'static str,
    value: &CellValue,
) -> Result<Option<NaiveDate>, EvalError> {
    if value.is_blank() {
        return Ok(None);
    }
    date_of(field, value).map(Some)
}

/// True when the cell carries something other than blank or literal zero.
pub(crate) fn has_value(value: &CellValue) -> bool {
    if value.is_blank() {
        return false;
    }
    match value.as_f64() {
        Some(number) => number != 0.0,
        None => true,
    }
}

/// Valuation-type cells mix numeric codes with text like `"2 - Drive-by"`;
/// pull the leading code out of either shape.
pub(crate) fn valuation_type_code(value: &CellValue) -> Option<i64> {
    if value.is_blank() {
        return None;
    }
    if let Some(number) = value.as_f64() {
        return number.is_finite().then(|| number.trunc() as i64);
    }
    let text = value.display();
    let digits: String = text
        .trim()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Dates are "missing" when blank, zero, or the 1901-01-01 placeholder some
/// upstream systems emit for an empty date.
pub(crate) fn missing_or_sentinel_date(value: &CellValue) -> bool {
    if value.is_blank() {
        return true;
    }
    if let Some(number) = value.as_f64() {
        if number == 0.0 {
            return true;
        }
        if number.is_finite() && number.trunc() as i64 == 19_010_101 {
            return true;
        }
    }
    match value.as_date() {
        Some(date) => (date.year(), date.month(), date.day()) == (1901, 1, 1),
        None => true,
    }
}

/// Level monthly payment for a loan of `pv` at periodic `rate` over `nper`
/// periods, sign-matched to the annuity convention.
pub(crate) fn pmt(rate: f64, nper: f64, pv: f64) -> f64 {
    if rate == 0.0 {
        return -pv / nper;
    }
    let growth = (1.0 + rate).powf(nper);
    -pv * rate * growth / (growth - 1.0)
}

/// Whole calendar months from `earlier` to `later`, ignoring days.
pub(crate) fn months_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    let years = i64::from(later.year()) - i64::from(earlier.year());
    let months = i64::from(later.month()) - i64::from(earlier.month());
    years * 12 + months
}

/// Round half to even at `digits` decimal places.
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round_ties_even() / factor
}

/// Calendar date literal; clamps to the epoch floor on impossible input.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

pub(crate) fn current_year() -> i32 {
    Local::now().year()
}
