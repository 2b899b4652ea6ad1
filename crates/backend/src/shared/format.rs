use contracts::shared::indicators::ValueFormat;

/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Decimal with grouped thousands and a comma separator: `1.234,50`
pub fn format_decimal(value: f64, decimals: u8) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = (value.abs() * scale).round() as u64;
    let scale = scale as u64;
    let sign = if value < 0.0 && scaled > 0 { "-" } else { "" };
    let whole = format_number(scaled / scale);
    if decimals == 0 {
        return format!("{sign}{whole}");
    }
    format!(
        "{sign}{whole},{:0width$}",
        scaled % scale,
        width = decimals as usize
    )
}

/// `R$ 1.234,50`
pub fn format_money(value: f64, currency: &str) -> String {
    format!("{} {}", currency, format_decimal(value, 2))
}

/// `50,00%`
pub fn format_percent(value: f64, decimals: u8) -> String {
    format!("{}%", format_decimal(value, decimals))
}

/// Render an indicator value according to its catalogue format
pub fn format_value(value: f64, format: &ValueFormat) -> String {
    match format {
        ValueFormat::Money { currency } => format_money(value, currency),
        ValueFormat::Number { decimals } => format_decimal(value, *decimals),
        ValueFormat::Percent { decimals } => format_percent(value, *decimals),
        ValueFormat::Integer => format_decimal(value, 0),
    }
}
