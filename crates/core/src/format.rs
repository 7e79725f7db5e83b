//! Display formatting for money and percentages.
//!
//! Output of these functions is for display only and is never parsed back.

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Compact rupee amount in the Indian system:
/// `₹1.25 Cr`, `₹4.50 L`, `₹12.00 K`, or a plain grouped figure below 1,000.
#[must_use]
pub fn format_indian_currency(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.2} Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.2} L", amount / LAKH)
    } else if amount >= THOUSAND {
        format!("₹{:.2} K", amount / THOUSAND)
    } else {
        format!("₹{}", format_grouped(amount))
    }
}

/// Thousands-grouped decimal with at most three fraction digits and no
/// trailing zeros: `56000` → `56,000`, `1234.5` → `1,234.5`.
#[must_use]
pub fn format_grouped(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let rounded = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = amount < 0.0 && (int_part != "0" || !frac.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `₹` followed by the grouped amount.
#[must_use]
pub fn format_rupees(amount: f64) -> String {
    if amount < 0.0 {
        format!("-₹{}", format_grouped(-amount))
    } else {
        format!("₹{}", format_grouped(amount))
    }
}

/// Gain/loss with an explicit sign: `+₹6,000`, `-₹1,500`.
#[must_use]
pub fn format_signed_rupees(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{}", format_rupees(amount))
    } else {
        format_rupees(amount)
    }
}

/// Return percentage with two decimals and an explicit sign: `+12.00%`.
#[must_use]
pub fn format_signed_percent(pct: f64) -> String {
    if pct >= 0.0 {
        format!("+{pct:.2}%")
    } else {
        format!("{pct:.2}%")
    }
}

/// Progress percentage with one decimal, dropping a trailing `.0`: `0%`, `62.5%`.
#[must_use]
pub fn format_progress(pct: f64) -> String {
    let text = format!("{pct:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}%")
}
