//! Price parsing and bill computation
//!
//! Every function here is total and side-effect free: bad input degrades to
//! a numeric best-effort result (usually 0.0), never an error. Amounts are
//! plain f64; currency symbols are cosmetic labels and take no part in the
//! arithmetic.

use crate::models::cart::CartItem;

/// Currency glyphs recognized by [`detect_currency_symbol`], in priority
/// order when a string contains more than one.
pub const CURRENCY_SYMBOLS: [&str; 9] = ["₹", "$", "€", "£", "¥", "₩", "₽", "₦", "₨"];

/// Default currency symbol when none is detected.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Extract a numeric amount from admin-entered price text.
///
/// Keeps digits and the first decimal point, drops everything else
/// (currency glyphs, thousands separators, whitespace). Empty or
/// unparseable input yields 0.0.
///
/// # Examples
///
/// ```
/// use shared::pricing::parse_price;
///
/// assert_eq!(parse_price("₹1,299.00"), 1299.0);
/// assert_eq!(parse_price("12.50€"), 12.5);
/// assert_eq!(parse_price("free"), 0.0);
/// ```
pub fn parse_price(text: &str) -> f64 {
    let mut cleaned = String::with_capacity(text.len());
    let mut seen_separator = false;

    for ch in text.chars() {
        if ch.is_ascii_digit() {
            cleaned.push(ch);
        } else if ch == '.' && !seen_separator {
            seen_separator = true;
            cleaned.push(ch);
        }
    }

    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Find the currency symbol used in a price string.
///
/// Symbols are checked in the fixed order of [`CURRENCY_SYMBOLS`]; the
/// first one present wins. Defaults to `$`.
pub fn detect_currency_symbol(text: &str) -> &'static str {
    CURRENCY_SYMBOLS
        .iter()
        .find(|symbol| text.contains(**symbol))
        .copied()
        .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
}

/// Resolve the per-unit price after discounts.
///
/// A percent discount always wins over a manual discount price. A manual
/// price only applies when it actually undercuts the base price; 0.0 means
/// "no override".
pub fn effective_price(base: f64, discount_price: f64, discount_percent: f64) -> f64 {
    if discount_percent > 0.0 {
        base * (1.0 - discount_percent / 100.0)
    } else if discount_price > 0.0 && discount_price < base {
        discount_price
    } else {
        base
    }
}

/// Per-unit effective price of a cart item.
pub fn unit_price(item: &CartItem) -> f64 {
    effective_price(item.base_price, item.discount_price, item.discount_percent)
}

/// Effective price × quantity for one cart line.
pub fn line_total(item: &CartItem) -> f64 {
    unit_price(item) * f64::from(item.quantity)
}

/// Sum of line totals; 0.0 for an empty collection.
pub fn subtotal(items: &[CartItem]) -> f64 {
    items.iter().map(line_total).sum()
}

/// Total amount saved by per-item discounts across the collection.
pub fn total_discount(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(|item| (item.base_price - unit_price(item)) * f64::from(item.quantity))
        .sum()
}

/// Tax owed on a subtotal at the given percent rate.
pub fn tax_amount(subtotal: f64, rate_percent: f64) -> f64 {
    subtotal * rate_percent / 100.0
}

/// Add the shipping fee unless the order qualifies for free shipping.
pub fn shipping_adjusted_total(total: f64, fee: f64, free_threshold: f64) -> f64 {
    if total >= free_threshold {
        total
    } else {
        total + fee
    }
}

/// Format an amount for display with two decimals and a symbol prefix.
///
/// # Examples
///
/// ```
/// use shared::pricing::format_amount;
///
/// assert_eq!(format_amount(12.5, "€"), "€12.50");
/// assert_eq!(format_amount(1299.0, "₹"), "₹1299.00");
/// ```
pub fn format_amount(amount: f64, symbol: &str) -> String {
    format!("{symbol}{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, base: f64, discount_price: f64, discount_percent: f64, qty: u32) -> CartItem {
        CartItem {
            product_id: id.to_string(),
            name: id.to_string(),
            base_price: base,
            discount_price,
            discount_percent,
            quantity: qty,
            image: None,
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("₹1,299.00"), 1299.0);
        assert_eq!(parse_price("$ 49.99"), 49.99);
        assert_eq!(parse_price("12.50€"), 12.5);
        assert_eq!(parse_price("100"), 100.0);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("free"), 0.0);
        assert_eq!(parse_price("."), 0.0);
    }

    #[test]
    fn test_parse_price_keeps_first_separator_only() {
        assert_eq!(parse_price("1.2.3"), 1.23);
        assert_eq!(parse_price("1.299,00"), 1.29900);
    }

    #[test]
    fn test_parse_price_idempotent_through_format() {
        for s in ["₹1,299.00", "$49.99", "12.50€", "100", "0.01"] {
            let parsed = parse_price(s);
            let reformatted = format_amount(parsed, "$");
            assert_eq!(parse_price(&reformatted), parse_price(s), "failed for {s}");
        }
    }

    #[test]
    fn test_detect_currency_symbol() {
        assert_eq!(detect_currency_symbol("₹499"), "₹");
        assert_eq!(detect_currency_symbol("49.99$"), "$");
        assert_eq!(detect_currency_symbol("€12"), "€");
        assert_eq!(detect_currency_symbol("12.00"), "$");
        assert_eq!(detect_currency_symbol(""), "$");
    }

    #[test]
    fn test_detect_currency_symbol_priority_order() {
        // ₹ outranks $ even when $ appears first in the string
        assert_eq!(detect_currency_symbol("$ or ₹"), "₹");
        assert_eq!(detect_currency_symbol("€ and £"), "€");
    }

    #[test]
    fn test_effective_price_percent_wins() {
        // Both discounts present: percent takes precedence
        assert_eq!(effective_price(100.0, 50.0, 10.0), 90.0);
    }

    #[test]
    fn test_effective_price_manual_override() {
        assert_eq!(effective_price(100.0, 80.0, 0.0), 80.0);
        // Manual price above base is ignored
        assert_eq!(effective_price(100.0, 120.0, 0.0), 100.0);
        // 0.0 means no override
        assert_eq!(effective_price(100.0, 0.0, 0.0), 100.0);
    }

    #[test]
    fn test_effective_price_never_exceeds_base_with_discount() {
        for (dp, pct) in [(40.0, 0.0), (0.0, 25.0), (40.0, 25.0)] {
            let eff = effective_price(50.0, dp, pct);
            assert!(eff <= 50.0, "effective {eff} above base for ({dp}, {pct})");
        }
        assert_eq!(effective_price(50.0, 0.0, 0.0), 50.0);
    }

    #[test]
    fn test_subtotal_empty_is_zero() {
        assert_eq!(subtotal(&[]), 0.0);
        assert_eq!(total_discount(&[]), 0.0);
    }

    #[test]
    fn test_subtotal_matches_line_totals() {
        let items = vec![
            item("a", 100.0, 0.0, 10.0, 2),
            item("b", 50.0, 40.0, 0.0, 1),
        ];
        let sum: f64 = items.iter().map(line_total).sum();
        assert!((subtotal(&items) - sum).abs() < 1e-9);
        assert!((subtotal(&items) - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_bill_scenario() {
        // {base 100, 10% off, qty 2} + {base 50, manual 40, qty 1} at 18% GST
        let items = vec![
            item("a", 100.0, 0.0, 10.0, 2),
            item("b", 50.0, 40.0, 0.0, 1),
        ];
        let sub = subtotal(&items);
        let discount = total_discount(&items);
        let tax = tax_amount(sub, 18.0);

        assert!((sub - 220.0).abs() < 1e-9);
        assert!((discount - 30.0).abs() < 1e-9);
        assert!((tax - 39.6).abs() < 1e-9);
        assert!((sub + tax - 259.6).abs() < 1e-9);
    }

    #[test]
    fn test_shipping_adjusted_total() {
        assert_eq!(shipping_adjusted_total(499.0, 50.0, 500.0), 549.0);
        assert_eq!(shipping_adjusted_total(500.0, 50.0, 500.0), 500.0);
        assert_eq!(shipping_adjusted_total(750.0, 50.0, 500.0), 750.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12.5, "€"), "€12.50");
        assert_eq!(format_amount(0.0, "$"), "$0.00");
        assert_eq!(format_amount(39.6, "₹"), "₹39.60");
    }
}
