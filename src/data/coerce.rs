use super::model::Numeric;

/// Coerce a raw cell into a finite number.
///
/// Embedded `"` characters are stripped and surrounding whitespace trimmed
/// before parsing a plain decimal literal (`-1.5`, `+2`, `.5`, `3e-4`).
/// Anything else, including the empty string, thousands separators and the
/// textual `inf` / `NaN` spellings, is [`Numeric::Absent`].
pub fn to_numeric(raw: &str) -> Numeric {
    let cleaned: String = raw.chars().filter(|&c| c != '"').collect();
    let cleaned = cleaned.trim();
    if !is_decimal_literal(cleaned) {
        return Numeric::Absent;
    }
    cleaned
        .parse::<f64>()
        .map_or(Numeric::Absent, Numeric::from_f64)
}

/// `[sign] digits [. digits] [(e|E) [sign] digits]` with at least one mantissa
/// digit. Rejects the `inf`/`nan` words `f64::from_str` would otherwise accept.
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}
