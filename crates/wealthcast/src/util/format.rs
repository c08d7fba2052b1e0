//! Number formatting for terminal output
//!
//! Amounts carry no currency symbol: the engine works in whatever single
//! currency the scenario was written in.

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format an amount with thousands separators and two decimals
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;
    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    format!("{sign}{}.{cents:02}", group_thousands(whole))
}

/// Format an amount without decimals (for tight columns)
pub fn format_currency_short(value: f64) -> String {
    let whole = value.abs().round() as u64;
    let sign = if value < 0.0 && whole > 0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(whole))
}

/// Format a value already expressed in percent
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format an amount in compact form (e.g., 2.1M, 450K, 50)
pub fn format_compact_currency(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000.0 {
        format!("{sign}{:.1}M", abs_value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{sign}{:.0}K", abs_value / 1_000.0)
    } else {
        format!("{sign}{abs_value:.0}")
    }
}
