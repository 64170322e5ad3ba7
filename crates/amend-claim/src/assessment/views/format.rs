use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use super::super::domain::FieldValue;

/// Render an amount as pounds sterling, e.g. `£1,234.56` or `-£5.00`.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}£{grouped}.{fraction}")
}

pub fn format_cell(value: Option<&FieldValue>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

/// `18 December 2025`
pub fn format_date(moment: &DateTime<Utc>) -> String {
    moment.format("%d %B %Y").to_string()
}

/// `16:11:27`
pub fn format_time(moment: &DateTime<Utc>) -> String {
    moment.format("%H:%M:%S").to_string()
}
