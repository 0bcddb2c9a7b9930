//! Presence check over the tape's required fields.

use tape_model::CellValue;

use crate::descriptor::RuleEval;

/// Flags a row when any required field is blank. The caller expands a flagged
/// row into one record per blank field.
pub fn missing_required_fields(args: &[&CellValue]) -> RuleEval {
    Ok(args.iter().any(|value| value.is_blank()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_any_blank_field() {
        let filled = CellValue::Text("x".to_string());
        let blank = CellValue::Missing;
        assert_eq!(missing_required_fields(&[&filled, &filled]), Ok(false));
        assert_eq!(missing_required_fields(&[&filled, &blank]), Ok(true));
        assert_eq!(missing_required_fields(&[]), Ok(false));
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let padded = CellValue::Text("   ".to_string());
        assert_eq!(missing_required_fields(&[&padded]), Ok(true));
    }
}
