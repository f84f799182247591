// web_app/pricing.rs - Price parsing and currency formatting
//
// The backend sends prices as strings in more than one locale
// ("1.234,56", "1,234.56", "12,5", "12.50"). All arithmetic uses Decimal.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

static BRAZILIAN_GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(\.\d{3})*,\d{2}$").expect("valid regex"));
static US_GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(,\d{3})*\.\d{2}$").expect("valid regex"));

/// Parse a backend price string
///
/// Returns `None` for blank or non-numeric input. A leading "R$" is ignored.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if BRAZILIAN_GROUPED.is_match(&cleaned) {
        cleaned.replace('.', "").replace(',', ".")
    } else if US_GROUPED.is_match(&cleaned) {
        cleaned.replace(',', "")
    } else {
        cleaned.replace(',', ".")
    };

    Decimal::from_str(&normalized).ok()
}

/// Format as Brazilian reais, e.g. `R$ 1.234,56`
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}R$ {grouped},{fraction}", if negative { "-" } else { "" })
}

/// Unit price times quantity
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}
