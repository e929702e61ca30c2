//! Locale-aware text for chart labels, legends and axis ticks.
//!
//! Bucket labels go through the [`DateFormatter`] trait so the bucketizer never
//! owns locale data. Money is rendered as symbol + number with thousands separator.

use chrono::{Datelike, NaiveDate};

use crate::models::Granularity;

/// Renders a bucket's calendar date for a given granularity.
///
/// Implementations return natural casing; the label generator upper-cases.
pub trait DateFormatter {
    fn format(&self, date: NaiveDate, granularity: Granularity) -> String;
}

/// Short day/month/year labels ("5 Mar", "Mar-24", "2024") in a locale.
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    locale: String,
}

impl LocaleFormatter {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::new("en-US")
    }
}

impl DateFormatter for LocaleFormatter {
    fn format(&self, date: NaiveDate, granularity: Granularity) -> String {
        let month = month_abbrev(date.month(), &self.locale);
        match granularity {
            Granularity::Day => format!("{} {}", date.day(), month),
            Granularity::Month => format!("{}-{:02}", month, date.year().rem_euclid(100)),
            Granularity::Year => date.year().to_string(),
        }
    }
}

fn month_abbrev(month: u32, locale: &str) -> &'static str {
    const EN: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    const FR: [&str; 12] = [
        "Janv", "Févr", "Mars", "Avr", "Mai", "Juin", "Juil", "Août", "Sept", "Oct", "Nov", "Déc",
    ];
    const DE: [&str; 12] = [
        "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ];
    const ES: [&str; 12] = [
        "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sept", "Oct", "Nov", "Dic",
    ];

    let names = match language(locale).as_str() {
        "fr" => &FR,
        "de" => &DE,
        "es" => &ES,
        _ => &EN,
    };
    names[(month.clamp(1, 12) - 1) as usize]
}

fn language(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Format cents as money text, e.g. `$1,234.56` or `-€12,50`.
pub fn format_currency(cents: i64, currency: &str, locale: &str) -> String {
    let abs_cents = cents.unsigned_abs();
    let whole = abs_cents / 100;
    let fractional = abs_cents % 100;

    let (thousands_sep, decimal_sep) = locale_separators(locale);
    let whole_str = format_with_thousands(whole, thousands_sep);
    let symbol = currency_symbol(currency);
    let sign = if cents < 0 { "-" } else { "" };

    format!("{}{}{}{}{:02}", sign, symbol, whole_str, decimal_sep, fractional)
}

/// Y-axis tick text for an amount in cents: plain major units below 1000,
/// thousands rounded with a `k` suffix above.
pub fn axis_label(cents: i64) -> String {
    let value = cents as f64 / 100.0;
    if value < 1000.0 {
        let rounded = (value * 100.0).round() / 100.0;
        format!("{}", rounded)
    } else {
        format!("{}k", (value / 1000.0).round() as i64)
    }
}

/// Get thousands and decimal separators based on locale.
fn locale_separators(locale: &str) -> (char, char) {
    match locale {
        "de-DE" | "de-AT" | "de-CH" | "fr-FR" | "fr-BE" | "fr-CA" | "es-ES" | "es-AR" | "it-IT"
        | "pt-BR" | "pt-PT" | "nl-NL" | "nl-BE" | "pl-PL" | "ru-RU" | "tr-TR" | "vi-VN"
        | "id-ID" | "da-DK" | "nb-NO" | "sv-SE" | "fi-FI" | "cs-CZ" | "sk-SK" | "hu-HU"
        | "ro-RO" | "bg-BG" | "uk-UA" | "el-GR" => ('.', ','),
        _ => (',', '.'),
    }
}

fn format_with_thousands(n: u64, sep: char) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}

fn currency_symbol(currency: &str) -> &'static str {
    match currency.to_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{00a3}",
        "JPY" => "\u{00a5}",
        "CAD" => "C$",
        "AUD" => "A$",
        "CHF" => "CHF\u{00a0}",
        "INR" => "\u{20b9}",
        "BRL" => "R$",
        "MXN" => "MX$",
        "SEK" => "kr\u{00a0}",
        "NZD" => "NZ$",
        _ => "$",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_english_labels() {
        let fmt = LocaleFormatter::default();
        assert_eq!(fmt.format(date(2024, 3, 5), Granularity::Day), "5 Mar");
        assert_eq!(fmt.format(date(2024, 3, 5), Granularity::Month), "Mar-24");
        assert_eq!(fmt.format(date(2009, 1, 1), Granularity::Month), "Jan-09");
        assert_eq!(fmt.format(date(2024, 3, 5), Granularity::Year), "2024");
    }

    #[test]
    fn test_localized_month_names() {
        let fmt = LocaleFormatter::new("fr-FR");
        assert_eq!(fmt.format(date(2024, 8, 15), Granularity::Day), "15 Août");
        let fmt = LocaleFormatter::new("de_DE");
        assert_eq!(fmt.format(date(2024, 12, 1), Granularity::Month), "Dez-24");
    }

    #[test]
    fn test_currency_en() {
        assert_eq!(format_currency(12345, "USD", "en-US"), "$123.45");
        assert_eq!(format_currency(123456789, "USD", "en-US"), "$1,234,567.89");
        assert_eq!(format_currency(0, "USD", "en-US"), "$0.00");
        assert_eq!(format_currency(-550, "USD", "en-US"), "-$5.50");
    }

    #[test]
    fn test_currency_de() {
        assert_eq!(
            format_currency(123456789, "EUR", "de-DE"),
            "\u{20ac}1.234.567,89"
        );
    }

    #[test]
    fn test_axis_label() {
        assert_eq!(axis_label(0), "0");
        assert_eq!(axis_label(99_900), "999");
        assert_eq!(axis_label(12_050), "120.5");
        assert_eq!(axis_label(100_000), "1k");
        assert_eq!(axis_label(2_560_000), "26k");
    }
}
