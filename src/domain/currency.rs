// src/domain/currency.rs

/// Re-group a typed price with Turkish thousands separators.
///
/// `"1000000"` and `"1.000.000"` both become `"1.000.000"`. Input that is
/// not a whole number after removing `.` and `,` comes back unchanged.
pub fn format_price_input(input: &str) -> String {
    let cleaned: String = input.chars().filter(|c| *c != '.' && *c != ',').collect();
    match cleaned.trim().parse::<u64>() {
        Ok(n) => group_thousands(n),
        Err(_) => input.to_string(),
    }
}

/// Display form used on listing cards, e.g. `"1.250.000 ₺"`.
pub fn format_price(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return "Fiyat sorunuz".to_string();
    }
    format!("{} ₺", group_thousands(amount.round() as u64))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
