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
use thiserror::Error;

/// Why a single quote could not be turned into a usable rate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
	/// The quote service could not be contacted at all. Cached state is left
	/// alone so readers keep seeing the last known rate.
	#[error("quote service unreachable: {0}")]
	Unreachable(String),

	/// The service answered, but not with a number. The currency is presumed
	/// to be no longer quoted.
	#[error("malformed quote for {code}: {body:?}")]
	MalformedQuote { code: String, body: String },

	#[error("rate fetch failed: {0}")]
	Other(String),
}

/// Source of freshly observed exchange rates, one currency at a time.
///
/// Rates are expressed in units of the reference currency, i.e. the value of
/// one unit of `code` in US dollars. Implementations may block on I/O; the
/// cache calls them from its sweep thread and, occasionally, inline from a
/// reader.
pub trait RateFetcher: Send + Sync {
	fn fetch(&self, code: &str) -> Result<f64, FetchError>;
}
