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
pub mod cache;
pub mod entry;
pub mod fetcher;
pub mod source;
pub mod yahoo;

use crate::rates::cache::{RateCache, DEFAULT_REFRESH_INTERVAL};
use crate::rates::fetcher::RateFetcher;
use crate::rates::source::FixedRates;
use crate::rates::yahoo::{YahooFetcher, DEFAULT_QUOTE_URL};
use anyhow::{bail, Error};
use std::sync::OnceLock;
use std::time::Duration;

/// Default bound on a single quote request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

static GLOBAL: OnceLock<RateCache> = OnceLock::new();

/// How the process-wide cache should be built.
pub struct RateSettings {
	pub refresh_interval: Duration,
	pub fetcher: Box<dyn RateFetcher>,
}

impl RateSettings {
	/// Live quotes from the given endpoint.
	pub fn network(
		quote_url: &str,
		timeout: Duration,
		refresh_interval: Duration,
	) -> Result<Self, Error> {
		Ok(Self {
			refresh_interval,
			fetcher: Box::new(YahooFetcher::new(quote_url, timeout)?),
		})
	}

	/// Rates from a fixed table; nothing goes over the network.
	pub fn fixed(rates: FixedRates, refresh_interval: Duration) -> Self {
		Self {
			refresh_interval,
			fetcher: Box::new(rates),
		}
	}
}

impl Default for RateSettings {
	fn default() -> Self {
		match Self::network(
			DEFAULT_QUOTE_URL,
			DEFAULT_FETCH_TIMEOUT,
			DEFAULT_REFRESH_INTERVAL,
		) {
			Ok(settings) => settings,
			Err(e) => {
				log::error!("Falling back to offline rates: {}", e);
				Self::fixed(FixedRates::new(), DEFAULT_REFRESH_INTERVAL)
			},
		}
	}
}

/// Sets up the process-wide cache. Must happen before anything reads a
/// rate through [`global`]; afterwards the cache is fixed for the life of
/// the process.
pub fn configure(settings: RateSettings) -> Result<&'static RateCache, Error> {
	let mut pending = Some(settings);
	let cache = GLOBAL.get_or_init(|| {
		let settings = pending.take().unwrap_or_default();
		RateCache::new(settings.fetcher, settings.refresh_interval)
	});

	if pending.is_some() {
		bail!("exchange rates are already in use and can no longer be configured");
	}
	Ok(cache)
}

/// The process-wide cache, built from default settings if [`configure`]
/// was never called.
pub fn global() -> &'static RateCache {
	GLOBAL.get_or_init(|| {
		let settings = RateSettings::default();
		RateCache::new(settings.fetcher, settings.refresh_interval)
	})
}
