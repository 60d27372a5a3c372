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
use crate::currency::registry::{self, REFERENCE_CODE};
use crate::rates::fetcher::{FetchError, RateFetcher};
use anyhow::Error;
use std::collections::HashMap;

/// Anything that can price one currency in terms of another.
///
/// All rates are quoted against the reference currency; cross rates are
/// derived by division, so an invalid currency (rate zero) as the
/// denominator yields a non-finite rate, which amounts treat as zero.
pub trait ExchangeRates {
	/// Value of one unit of `code` in the reference currency.
	fn rate(&self, code: &str) -> f64;

	fn is_valid(&self, code: &str) -> bool;

	/// Value of one unit of `code` in units of `relative_to`.
	fn rate_between(&self, code: &str, relative_to: &str) -> f64 {
		if code == relative_to {
			return 1.0;
		}
		self.rate(code) / self.rate(relative_to)
	}
}

/// An immutable table of reference-currency rates. Used when rates come from
/// configuration rather than the network, and as a deterministic stand-in
/// for the quote service.
#[derive(Clone, Debug, Default)]
pub struct FixedRates {
	rates: HashMap<String, f64>,
}

impl FixedRates {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table from code/rate pairs, rejecting unknown codes.
	pub fn from_pairs<I, S>(pairs: I) -> Result<Self, Error>
	where
		I: IntoIterator<Item = (S, f64)>,
		S: AsRef<str>,
	{
		let mut out = Self::new();
		for (code, rate) in pairs {
			let currency = registry::lookup(code.as_ref())?;
			out.rates.insert(currency.code().to_string(), rate);
		}
		Ok(out)
	}

	pub fn with_rate(mut self, code: &str, rate: f64) -> Self {
		self.rates.insert(code.to_string(), rate);
		self
	}

	fn get(&self, code: &str) -> Option<f64> {
		if code == REFERENCE_CODE {
			return Some(1.0);
		}
		self.rates.get(code).copied()
	}
}

impl ExchangeRates for FixedRates {
	fn rate(&self, code: &str) -> f64 {
		self.get(code).unwrap_or(0.0)
	}

	fn is_valid(&self, code: &str) -> bool {
		self.get(code).is_some()
	}
}

impl RateFetcher for FixedRates {
	fn fetch(&self, code: &str) -> Result<f64, FetchError> {
		self.get(code).ok_or_else(|| FetchError::MalformedQuote {
			code: code.to_string(),
			body: String::new(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_reference_is_always_one() {
		let rates = FixedRates::new();
		assert_eq!(rates.rate("USD"), 1.0);
		assert!(rates.is_valid("USD"));

		let rates = FixedRates::new().with_rate("USD", 3.0);
		assert_eq!(rates.rate("USD"), 1.0);
	}

	#[test]
	fn test_rate_between() {
		let rates = FixedRates::new().with_rate("EUR", 1.25);
		assert_eq!(rates.rate_between("EUR", "USD"), 1.25);
		assert_eq!(rates.rate_between("USD", "EUR"), 0.8);
		assert_eq!(rates.rate_between("EUR", "EUR"), 1.0);
	}

	#[test]
	fn test_self_rate_is_one_even_when_invalid() {
		let rates = FixedRates::new();
		assert!(!rates.is_valid("LTL"));
		assert_eq!(rates.rate_between("LTL", "LTL"), 1.0);
	}

	#[test]
	fn test_missing_code_is_invalid() {
		let rates = FixedRates::new().with_rate("EUR", 1.25);
		assert!(!rates.is_valid("GBP"));
		assert_eq!(rates.rate("GBP"), 0.0);
		assert_eq!(rates.rate_between("GBP", "EUR"), 0.0);
		assert!(rates.rate_between("EUR", "GBP").is_infinite());
		assert!(matches!(
			rates.fetch("GBP"),
			Err(FetchError::MalformedQuote { .. })
		));
		assert_eq!(rates.fetch("EUR"), Ok(1.25));
	}

	#[test]
	fn test_from_pairs() {
		let rates = FixedRates::from_pairs(vec![("eur", 1.25), ("GBP", 1.5)])
			.unwrap();
		assert_eq!(rates.rate("EUR"), 1.25);
		assert_eq!(rates.rate("GBP"), 1.5);

		assert!(FixedRates::from_pairs(vec![("NOPE", 1.0)]).is_err());
	}
}
