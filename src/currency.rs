// 💱 Price Format - Explicit currency parsing rules
// Replaces ambient process-wide locale state: the caller picks the format
// and passes it down, so the decimal convention is never hidden global state.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// PriceFormat - how currency strings are written in the input data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFormat {
    /// Leading currency symbol, e.g. `"$"`
    pub symbol: String,

    /// Decimal separator, e.g. `'.'` for US, `','` for most of Europe
    pub decimal_sep: char,

    /// Thousands grouping separator, stripped before parsing
    pub group_sep: Option<char>,
}

impl PriceFormat {
    /// US-style prices: `"$30,000.00"`
    pub fn usd() -> Self {
        PriceFormat {
            symbol: "$".to_string(),
            decimal_sep: '.',
            group_sep: Some(','),
        }
    }

    /// European-style prices: `"€30.000,00"`
    pub fn eur() -> Self {
        PriceFormat {
            symbol: "€".to_string(),
            decimal_sep: ',',
            group_sep: Some('.'),
        }
    }

    /// Parse a currency string into its numeric value.
    ///
    /// Strips the leading symbol and the grouping separator, maps the
    /// decimal separator to `.`, then parses. Anything left over that is
    /// not a non-negative decimal is a `MalformedRecord` error.
    pub fn parse(&self, price: &str) -> Result<f64, ReportError> {
        let trimmed = price.trim();
        let body = trimmed.strip_prefix(self.symbol.as_str()).unwrap_or(trimmed);

        let mut normalized = String::with_capacity(body.len());
        for c in body.chars() {
            if Some(c) == self.group_sep {
                continue;
            }
            if c == self.decimal_sep {
                normalized.push('.');
            } else {
                normalized.push(c);
            }
        }

        let value: f64 = normalized
            .parse()
            .map_err(|_| ReportError::malformed_record(format!("unparsable price: {:?}", price)))?;

        if value < 0.0 || !value.is_finite() {
            return Err(ReportError::malformed_record(format!(
                "price must be a non-negative number: {:?}",
                price
            )));
        }

        Ok(value)
    }

    /// Format a numeric value as a two-decimal currency string.
    pub fn format(&self, value: f64) -> String {
        let rendered = format!("{:.2}", value);
        if self.decimal_sep == '.' {
            format!("{}{}", self.symbol, rendered)
        } else {
            format!("{}{}", self.symbol, rendered.replace('.', &self.decimal_sep.to_string()))
        }
    }
}

impl Default for PriceFormat {
    fn default() -> Self {
        PriceFormat::usd()
    }
}
