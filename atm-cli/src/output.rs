//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::{Decimal, RoundingStrategy};

/// Width of the main ATM screen
pub const SCREEN_WIDTH: usize = 60;

/// Width of a printed receipt
pub const RECEIPT_WIDTH: usize = 40;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A line of `ch` exactly `width` characters long
pub fn separator(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// Left-pad `text` so it sits in the middle of a `width` column screen
pub fn centered(text: &str, width: usize) -> String {
    let pad = (width / 2).saturating_sub(text.chars().count() / 2);
    format!("{}{}", " ".repeat(pad), text)
}

/// Format as US currency, e.g. `$1,002,000.20`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::new(100200020, 2)), "$1,002,000.20");
        assert_eq!(format_currency(Decimal::from(5)), "$5.00");
        assert_eq!(format_currency(Decimal::new(99999, 2)), "$999.99");
        assert_eq!(format_currency(Decimal::new(1000, 0)), "$1,000.00");
        assert_eq!(format_currency(Decimal::new(-1050, 2)), "-$10.50");
        assert_eq!(format_currency(Decimal::new(10555, 4)), "$1.06");
    }

    #[test]
    fn test_centered() {
        assert_eq!(centered("ab", 10), "    ab");
        assert_eq!(centered("a very long heading", 4), "a very long heading");
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator('=', 5), "=====");
        assert_eq!(separator('*', RECEIPT_WIDTH).len(), RECEIPT_WIDTH);
    }
}
