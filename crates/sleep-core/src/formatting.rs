use chrono::{Datelike, NaiveDate};

/// Format a value to a fixed number of decimal places, with the same
/// result as JavaScript's `Number.prototype.toFixed`.
///
/// Rounding works on the exact binary value, so `1.005` (stored as
/// `1.00499..`) gives `"1.00"`. Exact midpoints such as `7.125` round away
/// from zero. A result that rounds to zero is printed without a sign.
///
/// # Examples
///
/// ```
/// use sleep_core::formatting::format_decimal;
///
/// assert_eq!(format_decimal(7.125, 2), "7.13");
/// assert_eq!(format_decimal(1.005, 2), "1.00");
/// assert_eq!(format_decimal(8.0, 2), "8.00");
/// assert_eq!(format_decimal(-0.001, 2), "0.00");
/// ```
pub fn format_decimal(value: f64, decimals: u32) -> String {
    let prec = decimals as usize;
    let factor = 10_f64.powi(decimals as i32);

    // `{:.N}` resolves exact midpoints to the even neighbour.
    let doubled = value * 2.0 * factor;
    let text = if doubled.fract() == 0.0 && doubled % 2.0 != 0.0 {
        let rounded = (value * factor).round() / factor;
        format!("{rounded:.prec$}")
    } else {
        format!("{value:.prec$}")
    };

    match text.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => text,
    }
}

/// Hours with two decimals and the `hrs` unit, e.g. `"7.50 hrs"`.
///
/// # Examples
///
/// ```
/// use sleep_core::formatting::format_hours;
///
/// assert_eq!(format_hours(7.5), "7.50 hrs");
/// assert_eq!(format_hours(0.0), "0.00 hrs");
/// ```
pub fn format_hours(hours: f64) -> String {
    format!("{} hrs", format_decimal(hours, 2))
}

/// An inclusive hour range, e.g. `"5.25 - 9.75"`.
pub fn format_range(low: f64, high: f64) -> String {
    format!("{} - {}", format_decimal(low, 2), format_decimal(high, 2))
}

/// Pluralise `night` for a count, e.g. `"1 night"`, `"12 nights"`.
pub fn format_nights(count: usize) -> String {
    if count == 1 {
        "1 night".to_string()
    } else {
        format!("{} nights", count)
    }
}

/// Human-readable span between two nights, e.g. `"September-December 2025"`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sleep_core::formatting::format_period;
///
/// let sep = NaiveDate::from_ymd_opt(2025, 9, 1);
/// let dec = NaiveDate::from_ymd_opt(2025, 12, 31);
/// assert_eq!(format_period(sep, dec), "September-December 2025");
/// assert_eq!(format_period(None, None), "no recorded nights");
/// ```
pub fn format_period(first: Option<NaiveDate>, last: Option<NaiveDate>) -> String {
    let (first, last) = match (first, last) {
        (Some(f), Some(l)) => (f, l),
        (Some(d), None) | (None, Some(d)) => (d, d),
        (None, None) => return "no recorded nights".to_string(),
    };

    if first.year() != last.year() {
        format!("{}-{}", first.format("%B %Y"), last.format("%B %Y"))
    } else if first.month() != last.month() {
        format!("{}-{}", first.format("%B"), last.format("%B %Y"))
    } else {
        first.format("%B %Y").to_string()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal_basic() {
        assert_eq!(format_decimal(6.5, 2), "6.50");
        assert_eq!(format_decimal(8.0, 0), "8");
        assert_eq!(format_decimal(1.0 / 3.0, 2), "0.33");
        assert_eq!(format_decimal(2.0 / 3.0, 2), "0.67");
    }

    #[test]
    fn test_format_decimal_exact_midpoint_rounds_up() {
        assert_eq!(format_decimal(7.125, 2), "7.13");
        assert_eq!(format_decimal(0.125, 2), "0.13");
        assert_eq!(format_decimal(2.5, 0), "3");
    }

    #[test]
    fn test_format_decimal_uses_stored_value() {
        // Stored as 1.00499.. and 8.67500..07, so the rounding follows the stored value.
        assert_eq!(format_decimal(1.005, 2), "1.00");
        assert_eq!(format_decimal(8.675, 2), "8.68");
    }

    #[test]
    fn test_format_decimal_negative() {
        assert_eq!(format_decimal(-1.25, 1), "-1.3");
        assert_eq!(format_decimal(-0.0, 2), "0.00");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(8.0), "8.00 hrs");
        assert_eq!(format_hours(6.456), "6.46 hrs");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(5.25, 9.75), "5.25 - 9.75");
    }

    #[test]
    fn test_format_period_variants() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert_eq!(format_period(d(2025, 9, 3), d(2025, 9, 28)), "September 2025");
        assert_eq!(
            format_period(d(2025, 9, 3), d(2025, 12, 28)),
            "September-December 2025"
        );
        assert_eq!(
            format_period(d(2024, 12, 3), d(2025, 1, 28)),
            "December 2024-January 2025"
        );
        assert_eq!(format_period(d(2025, 10, 1), None), "October 2025");
    }

    #[test]
    fn test_format_nights() {
        assert_eq!(format_nights(0), "0 nights");
        assert_eq!(format_nights(1), "1 night");
        assert_eq!(format_nights(31), "31 nights");
    }
}
