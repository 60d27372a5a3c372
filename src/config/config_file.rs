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
use crate::rates::cache::DEFAULT_REFRESH_INTERVAL;
use crate::rates::source::FixedRates;
use crate::rates::yahoo::DEFAULT_QUOTE_URL;
use crate::rates::{RateSettings, DEFAULT_FETCH_TIMEOUT};
use anyhow::{bail, Error};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub rates: Option<Rates>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Rates {
	/// Seconds between full refreshes of every rate
	pub refresh_interval_secs: Option<u64>,
	pub quote_url: Option<String>,
	/// Upper bound on a single quote request
	pub timeout_secs: Option<u64>,

	/// If set, rates come from this table (value of one unit in US dollars)
	/// and the quote service is never contacted.
	pub fixed: Option<BTreeMap<String, f64>>,
}

impl Config {
	/// Translates the `[rates]` section into settings for the rate cache.
	pub fn rate_settings(&self) -> Result<RateSettings, Error> {
		let rates = match &self.rates {
			Some(rates) => rates,
			None => return Ok(RateSettings::default()),
		};

		let refresh_interval = rates
			.refresh_interval_secs
			.map(Duration::from_secs)
			.unwrap_or(DEFAULT_REFRESH_INTERVAL);

		if let Some(fixed) = &rates.fixed {
			for (code, rate) in fixed {
				if !rate.is_finite() || *rate <= 0.0 {
					bail!("fixed rate for {} must be a positive number", code);
				}
			}
			let table = FixedRates::from_pairs(
				fixed.iter().map(|(code, rate)| (code.as_str(), *rate)),
			)?;
			return Ok(RateSettings::fixed(table, refresh_interval));
		}

		let timeout = rates
			.timeout_secs
			.map(Duration::from_secs)
			.unwrap_or(DEFAULT_FETCH_TIMEOUT);

		RateSettings::network(
			rates.quote_url.as_deref().unwrap_or(DEFAULT_QUOTE_URL),
			timeout,
			refresh_interval,
		)
	}
}
