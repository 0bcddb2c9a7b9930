//! Header-name normalization.
//!
//! Tape headers are human-entered: "Original Loan Amount", "ORIG_LOAN_AMT",
//! "Original loan amount ($)". Two keys are derived per name. The
//! normalized key is a faithful lowercase/underscore form and backs exact
//! matching. The canonical key additionally drops filler words and expands
//! common abbreviations, so variants like "Yrs At Industry" and
//! "Years in Industry" collapse together; it backs the fallback match.

/// Lowercases and replaces every run of non-alphanumeric characters with a
/// single underscore, with no leading or trailing underscore. Idempotent.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut gap = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }
    out
}

/// Normalizes, drops stopword tokens, expands abbreviation tokens, and
/// concatenates what remains with no separator. Token order is preserved
/// and unknown tokens pass through untouched.
pub fn canonical_key(raw: &str) -> String {
    normalize_name(raw)
        .split('_')
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .map(expand_token)
        .collect()
}

fn is_stopword(token: &str) -> bool {
    matches!(
        token,
        "of" | "the" | "and" | "or" | "at" | "in" | "for" | "to" | "from"
    )
}

fn expand_token(token: &str) -> &str {
    match token {
        "yrs" => "years",
        "yr" => "year",
        "pct" => "percent",
        "num" | "nbr" => "number",
        "amt" => "amount",
        other => other,
    }
}
