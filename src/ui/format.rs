/// Shown in place of a missing figure.
pub const PLACEHOLDER: &str = "—";

/// Fixed-decimal rendering with `,` thousands grouping: `1234.5` → `1,234.50`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let fixed = format!("{:.decimals$}", value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Fraction shown as a percentage, or the placeholder when absent.
pub fn format_percent(fraction: Option<f64>, decimals: usize) -> String {
    match fraction {
        Some(v) if v.is_finite() => format!("{}%", format_number(v * 100.0, decimals)),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_count(n: usize) -> String {
    format_number(n as f64, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(1234.5, 2), "1,234.50");
        assert_eq!(format_number(1_000_000.0, 0), "1,000,000");
        assert_eq!(format_number(999.0, 1), "999.0");
        assert_eq!(format_number(-12345.678, 1), "-12,345.7");
        assert_eq!(format_count(6790), "6,790");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.0001, 2), "0.00");
    }

    #[test]
    fn non_finite_is_placeholder() {
        assert_eq!(format_number(f64::NAN, 2), PLACEHOLDER);
        assert_eq!(format_percent(None, 3), PLACEHOLDER);
        assert_eq!(format_percent(Some(f64::INFINITY), 3), PLACEHOLDER);
    }

    #[test]
    fn percent_scales_fraction() {
        assert_eq!(format_percent(Some(0.00125), 3), "0.125%");
        assert_eq!(format_percent(Some(-0.5), 1), "-50.0%");
    }
}
