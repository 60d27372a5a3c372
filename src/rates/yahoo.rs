/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::currency::registry::REFERENCE_CODE;
use crate::rates::fetcher::{FetchError, RateFetcher};
use anyhow::{anyhow, Error};
use regex::Regex;
use std::time::Duration;

pub const DEFAULT_QUOTE_URL: &str =
	"http://download.finance.yahoo.com/d/quotes.csv";

/// Fetches last-trade quotes for `<CODE>USD=X` pairs from a Yahoo-style CSV
/// quote endpoint. The response body is expected to hold exactly one
/// decimal number.
pub struct YahooFetcher {
	client: reqwest::blocking::Client,
	base_url: String,
	number: Regex,
}

impl YahooFetcher {
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
		let client = reqwest::blocking::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| anyhow!("failed to create HTTP client: {}", e))?;

		Ok(Self {
			client,
			base_url: base_url.to_string(),
			// plain, leading-dot, trailing-dot and exponent forms
			number: Regex::new(
				r"^\s*((?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s*$",
			)?,
		})
	}

	/// Ticker symbol for the given currency against the reference currency.
	pub fn symbol(code: &str) -> String {
		format!("{}{}=X", code, REFERENCE_CODE)
	}

	/// Extracts the rate from a response body.
	pub fn parse_quote(&self, code: &str, body: &str) -> Result<f64, FetchError> {
		let malformed = || FetchError::MalformedQuote {
			code: code.to_string(),
			body: body.trim().to_string(),
		};

		let captures = self.number.captures(body).ok_or_else(malformed)?;
		captures[1].parse::<f64>().map_err(|_| malformed())
	}
}

impl RateFetcher for YahooFetcher {
	fn fetch(&self, code: &str) -> Result<f64, FetchError> {
		let symbol = Self::symbol(code);
		let request = self
			.client
			.get(&self.base_url)
			.query(&[("s", symbol.as_str()), ("f", "l1"), ("e", ".cs")]);

		log::debug!("Requesting quote for {} from {}", symbol, self.base_url);
		let response = request.send().map_err(classify)?;

		// Handle non-2xx response codes
		if !response.status().is_success() {
			return Err(FetchError::Other(format!(
				"quote request for {} failed with status: {}",
				symbol,
				response.status()
			)));
		}

		let body = response.text().map_err(classify)?;
		self.parse_quote(code, &body)
	}
}

fn classify(e: reqwest::Error) -> FetchError {
	if e.is_connect() {
		FetchError::Unreachable(e.to_string())
	} else {
		FetchError::Other(e.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fetcher() -> YahooFetcher {
		YahooFetcher::new(DEFAULT_QUOTE_URL, Duration::from_secs(1)).unwrap()
	}

	#[test]
	fn test_symbol() {
		assert_eq!(YahooFetcher::symbol("EUR"), "EURUSD=X");
		assert_eq!(YahooFetcher::symbol("XAU"), "XAUUSD=X");
	}

	#[test]
	fn test_parse_quote() {
		let yahoo = fetcher();
		assert_eq!(yahoo.parse_quote("EUR", "1.1115\r"), Ok(1.1115));
		assert_eq!(yahoo.parse_quote("JPY", "0.0094\n"), Ok(0.0094));
		assert_eq!(yahoo.parse_quote("XAU", "1320"), Ok(1320.0));
	}

	#[test]
	fn test_parse_quote_loose_forms() {
		let yahoo = fetcher();
		assert_eq!(yahoo.parse_quote("GBP", ".5\r\n"), Ok(0.5));
		assert_eq!(yahoo.parse_quote("CHF", "1."), Ok(1.0));
		assert_eq!(yahoo.parse_quote("VND", "4.7E-5"), Ok(0.000047));
		assert_eq!(yahoo.parse_quote("XAU", "1.32e3"), Ok(1320.0));
	}

	#[test]
	fn test_parse_quote_rejects_non_numbers() {
		let yahoo = fetcher();
		let bodies = [
			"N/A\r", "", "1.2,3.4", "1.2\r1.3\r", "-1.5", "<html>", ".", "1e", "e5",
		];
		for body in bodies {
			assert!(
				matches!(
					yahoo.parse_quote("LTL", body),
					Err(FetchError::MalformedQuote { .. })
				),
				"{:?} should not parse",
				body
			);
		}
	}
}
