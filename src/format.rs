//! Display formatting for monetary amounts (French locale, euros)

use crate::scenario::Scenario;

/// Thousands separator used by the French locale (narrow no-break space)
const GROUP_SEPARATOR: char = '\u{202F}';

/// Space between amount and currency sign (no-break space)
const CURRENCY_SPACE: char = '\u{00A0}';

/// Group the digits of a whole number in threes
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Format as whole euros, e.g. `24 500 €` or `-8 000 €`
pub fn format_eur(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{}{}€", sign, group_thousands(rounded.unsigned_abs()), CURRENCY_SPACE)
}

/// Compact thousands with one decimal, e.g. `30.5k€`
pub fn format_compact_k(amount: f64) -> String {
    format!("{:.1}k€", amount / 1000.0)
}

/// Scenario amount with the sign shown on its card: `-` for expenses, `+` otherwise
pub fn format_signed_scenario_amount(scenario: &Scenario) -> String {
    let sign = if scenario.kind.is_expense() { '-' } else { '+' };
    format!("{}{}", sign, format_eur(scenario.amount))
}
