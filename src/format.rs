//! Locale-aware number formatting and parsing.
//!
//! Formatting is assembled by hand from each locale's separators rather
//! than delegated to the OS, so output is stable across platforms. The
//! inverse, [`NumberFormatter::unformat`], is best effort: it strips every
//! character that cannot be part of a number in the configured locale and
//! parses whatever remains.

use serde::{Deserialize, Serialize};

/// Locales the application renders numbers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "ru-RU")]
    RuRu,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl Locale {
    pub fn decimal_separator(&self) -> char {
        match self {
            Locale::RuRu | Locale::DeDe => ',',
            Locale::EnUs => '.',
        }
    }

    pub fn group_separator(&self) -> char {
        match self {
            Locale::RuRu => '\u{a0}',
            Locale::EnUs => ',',
            Locale::DeDe => '.',
        }
    }

    /// Whether the currency symbol precedes the number ("$1.00") or
    /// follows it separated by a non-breaking space ("1,00 ₽").
    fn symbol_precedes(&self) -> bool {
        matches!(self, Locale::EnUs)
    }

    fn percent_suffix(&self) -> &'static str {
        match self {
            Locale::EnUs => "%",
            Locale::RuRu | Locale::DeDe => "\u{a0}%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Decimal,
    Currency,
    Percent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    pub locale: Locale,
    pub style: Style,
    pub currency: String,
    pub min_fraction_digits: u32,
    pub max_fraction_digits: u32,
    /// Rendered in place of values that are not finite numbers.
    pub fallback: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            locale: Locale::RuRu,
            style: Style::Decimal,
            currency: "RUB".to_string(),
            min_fraction_digits: 2,
            max_fraction_digits: 2,
            fallback: "—".to_string(),
        }
    }
}

/// Display symbol for an ISO currency code. Unknown codes render as the
/// code itself.
pub fn symbol_for(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "RUB" => Some("₽"),
        _ => None,
    }
}

/// Rounds to a fixed number of decimals, halves away from zero.
pub fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub struct NumberFormatter {
    options: FormatOptions,
}

impl NumberFormatter {
    pub fn new(options: FormatOptions) -> Self {
        NumberFormatter { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats a value with the configured options.
    pub fn format(&self, value: f64) -> String {
        self.format_with(value, &self.options)
    }

    /// Formats a value with one-off option overrides.
    pub fn format_with(&self, value: f64, options: &FormatOptions) -> String {
        if !value.is_finite() {
            return options.fallback.clone();
        }

        let number = render_number(value, options);
        match options.style {
            Style::Decimal => number,
            Style::Currency => {
                let symbol = symbol_for(&options.currency).unwrap_or(options.currency.as_str());
                if options.locale.symbol_precedes() {
                    match number.strip_prefix('-') {
                        Some(rest) => format!("-{symbol}{rest}"),
                        None => format!("{symbol}{number}"),
                    }
                } else {
                    format!("{number}\u{a0}{symbol}")
                }
            }
            Style::Percent => format!("{number}{}", options.locale.percent_suffix()),
        }
    }

    /// Currency formatting with two fixed fraction digits.
    pub fn currency(&self, value: f64, code: &str) -> String {
        let options = FormatOptions {
            style: Style::Currency,
            currency: code.to_string(),
            min_fraction_digits: 2,
            max_fraction_digits: 2,
            ..self.options.clone()
        };
        self.format_with(value, &options)
    }

    /// Percentage formatting: 0.1534 renders as "15,34 %" in ru-RU.
    pub fn percentage(&self, value: f64, decimals: u32) -> String {
        let options = FormatOptions {
            style: Style::Percent,
            min_fraction_digits: decimals,
            max_fraction_digits: decimals,
            ..self.options.clone()
        };
        self.format_with(value * 100.0, &options)
    }

    /// Shortened rendering of large values with a K/M/B suffix.
    pub fn humanize(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.options.fallback.clone();
        }
        let abs = value.abs();
        if abs >= 1e9 {
            format!("{}B", self.format(value / 1e9))
        } else if abs >= 1e6 {
            format!("{}M", self.format(value / 1e6))
        } else if abs >= 1e3 {
            format!("{}K", self.format(value / 1e3))
        } else {
            self.format(value)
        }
    }

    /// Best-effort inverse of [`format`](Self::format): keeps digits, the
    /// minus sign, and the locale's decimal separator, then parses.
    pub fn unformat(&self, input: &str) -> Option<f64> {
        let separator = self.options.locale.decimal_separator();
        let cleaned: String = input
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == separator)
            .map(|c| if c == separator { '.' } else { c })
            .collect();
        cleaned.parse().ok()
    }
}

impl Default for NumberFormatter {
    fn default() -> Self {
        NumberFormatter::new(FormatOptions::default())
    }
}

fn render_number(value: f64, options: &FormatOptions) -> String {
    let rounded = round(value, options.max_fraction_digits);
    // Collapse negative zero so "-0,00" never renders.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };

    let fixed = format!("{rounded:.precision$}", precision = options.max_fraction_digits as usize);
    let unsigned = fixed.strip_prefix('-').unwrap_or(&fixed);
    let (int_digits, frac_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut fraction = frac_digits.to_string();
    while fraction.len() > options.min_fraction_digits as usize && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut out = String::new();
    if fixed.starts_with('-') {
        out.push('-');
    }
    out.push_str(&group_digits(int_digits, options.locale.group_separator()));
    if !fraction.is_empty() {
        out.push(options.locale.decimal_separator());
        out.push_str(&fraction);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
