//! Display formatting for currency amounts and shares.

use rust_decimal::{Decimal, RoundingStrategy};

/// Whole currency units with thousands separators, e.g. `-$1,234`.
/// Fractions are truncated toward zero.
pub fn format_currency(amount: Decimal) -> String {
    let units = amount.trunc();
    let digits = units.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if units.is_sign_negative() && !units.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Abbreviated amount for axis labels: `$1.5K`, `$3.2M`, `$2B`.
pub fn format_compact(amount: Decimal) -> String {
    let abs = amount.abs();
    let (scaled, suffix) = if abs > Decimal::new(1_000_000_000, 0) {
        (amount / Decimal::new(1_000_000_000, 0), "B")
    } else if abs > Decimal::new(1_000_000, 0) {
        (amount / Decimal::new(1_000_000, 0), "M")
    } else if abs > Decimal::new(1_000, 0) {
        (amount / Decimal::new(1_000, 0), "K")
    } else {
        (amount, "")
    };
    let scaled = scaled.normalize();
    if scaled.is_sign_negative() {
        format!("-${}{suffix}", scaled.abs())
    } else {
        format!("${scaled}{suffix}")
    }
}

/// Share in [0,1] as a whole percentage.
pub fn format_percent(share: Decimal) -> String {
    let pct = (share * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{pct}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_and_truncates() {
        assert_eq!(format_currency(Decimal::new(0, 0)), "$0");
        assert_eq!(format_currency(Decimal::new(999, 0)), "$999");
        assert_eq!(format_currency(Decimal::new(27_500, 0)), "$27,500");
        assert_eq!(format_currency(Decimal::new(12_286_579_456, 5)), "$122,865");
        assert_eq!(format_currency(Decimal::new(1_234_567_899, 1)), "$123,456,789");
        assert_eq!(format_currency(Decimal::new(-4_000, 0)), "-$4,000");
        assert_eq!(format_currency(Decimal::new(-5, 1)), "$0");
    }

    #[test]
    fn compact_suffixes() {
        assert_eq!(format_compact(Decimal::new(500, 0)), "$500");
        assert_eq!(format_compact(Decimal::new(1_000, 0)), "$1000");
        assert_eq!(format_compact(Decimal::new(27_500, 0)), "$27.5K");
        assert_eq!(format_compact(Decimal::new(3_230_625, 0)), "$3.230625M");
        assert_eq!(format_compact(Decimal::new(2_000_000_001, 0)), "$2.000000001B");
        assert_eq!(format_compact(Decimal::new(-8_000, 0)), "-$8K");
        assert_eq!(format_compact(Decimal::new(-2_500_000, 0)), "-$2.5M");
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(format_percent(Decimal::new(75, 2)), "75%");
        assert_eq!(format_percent(Decimal::new(125, 3)), "13%");
        assert_eq!(format_percent(Decimal::ZERO), "0%");
    }
}
