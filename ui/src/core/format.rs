//! Formatting helpers for presenting activation values.

/// Placeholder for values that cannot be displayed.
pub const MISSING: &str = "—";

/// `value / whole * 100`, or 0 when either side is non-positive.
pub fn percent_of(value: f64, whole: f64) -> f64 {
    if value <= 0.0 || whole <= 0.0 {
        return 0.0;
    }
    let percent = value / whole * 100.0;
    if percent.is_finite() {
        percent
    } else {
        0.0
    }
}

pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{value:.2}%")
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{value:.decimals$}")
}

/// Thousands-separated value with up to two fractional digits (`12,345.5`).
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    for (position, digit) in whole.chars().enumerate() {
        if position > 0 && (whole.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    if value < 0.0 && grouped.chars().any(|c| c != '0' && c != '.' && c != ',') {
        grouped.insert(0, '-');
    }

    grouped
}

/// Value plus unit, e.g. `1,250 kg` or `14 sets`.
pub fn format_volume(value: f64, unit: &str) -> String {
    let number = format_grouped(value);
    if unit.is_empty() {
        number
    } else {
        format!("{number} {unit}")
    }
}
