/// Price after applying a percentage discount, in minor units.
///
/// The discount is clamped to `0..=100` and the result rounds down, so a
/// 999-paise item at 15% sells for 850.
pub fn discounted_price(price: i64, discount_percent: i32) -> i64 {
    let discount = i128::from(discount_percent.clamp(0, 100));
    let off = i128::from(price) * discount / 100;
    // `off` never exceeds `price` in magnitude, so the cast is lossless.
    price - off as i64
}

/// Whole-number percentage saved going from `original` to `sale`.
pub fn discount_percentage(original: i64, sale: i64) -> i32 {
    if original <= 0 {
        return 0;
    }

    let saved = (original - sale) as f64 / original as f64 * 100.0;
    saved.round() as i32
}

/// Formats paise as rupees with Indian digit grouping, e.g.
/// `1234567890` -> `"₹1,23,45,678.90"`.
pub fn format_amount(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}₹{}.{:02}", group_indian(abs / 100), abs % 100)
}

/// Last three digits, then groups of two: `1234567` -> `"12,34,567"`.
fn group_indian(rupees: u64) -> String {
    let digits = rupees.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_percentage_discount() {
        assert_eq!(discounted_price(10_000, 10), 9_000);
        assert_eq!(discounted_price(999, 15), 850);
        assert_eq!(discounted_price(5_000, 0), 5_000);
    }

    #[test]
    fn clamps_out_of_range_discounts() {
        assert_eq!(discounted_price(5_000, 150), 0);
        assert_eq!(discounted_price(5_000, -20), 5_000);
    }

    #[test]
    fn percentage_rounds_to_nearest_whole() {
        assert_eq!(discount_percentage(300, 200), 33);
        assert_eq!(discount_percentage(300, 100), 67);
        assert_eq!(discount_percentage(0, 0), 0);
    }

    #[test]
    fn formats_minor_units() {
        assert_eq!(format_amount(12_345), "₹123.45");
        assert_eq!(format_amount(5), "₹0.05");
        assert_eq!(format_amount(-250), "-₹2.50");
    }

    #[test]
    fn groups_digits_the_indian_way() {
        assert_eq!(format_amount(100_000), "₹1,000.00");
        assert_eq!(format_amount(1_234_567_890), "₹1,23,45,678.90");
        assert_eq!(format_amount(-12_345_600), "-₹1,23,456.00");
    }

    #[test]
    fn handles_extreme_values() {
        assert_eq!(format_amount(i64::MIN), "-₹92,23,37,20,36,85,47,758.08");
        assert_eq!(discounted_price(i64::MAX, 50), i64::MAX - i64::MAX / 2);
    }
}
