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
use crate::rates::fetcher::FetchError;
use chrono::{DateTime, Local};
use std::fmt;

/// The cached state of one currency's exchange rate. A value object; the
/// cache hands out copies and only ever replaces an entry as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct RateEntry {
	/// Value of one unit of this currency in the reference currency
	pub rate: f64,

	/// False once the quote service stops recognising the currency, in which
	/// case the rate is zero
	pub is_valid: bool,

	/// Reset at the start of every sweep
	pub refreshed_this_cycle: bool,

	pub outcome: RefreshOutcome,
}

impl RateEntry {
	/// A currency nobody has asked about yet.
	pub fn unfetched() -> Self {
		Self {
			rate: 0.0,
			is_valid: true,
			refreshed_this_cycle: false,
			outcome: RefreshOutcome::NeverFetched,
		}
	}

	/// The reference currency, which never needs fetching.
	pub fn pinned(rate: f64) -> Self {
		Self {
			rate,
			is_valid: true,
			refreshed_this_cycle: true,
			outcome: RefreshOutcome::Pinned,
		}
	}

	/// Folds the result of a fetch into this entry. A missing quote
	/// invalidates the currency; a failed fetch only records the failure and
	/// keeps the last known rate.
	pub fn apply(&mut self, result: &Result<f64, FetchError>, at: DateTime<Local>) {
		match result {
			Ok(rate) => {
				self.rate = *rate;
				self.is_valid = true;
				self.refreshed_this_cycle = true;
				self.outcome = RefreshOutcome::Fresh { at };
			},
			Err(FetchError::MalformedQuote { .. }) => {
				// not marked refreshed: a reader may ask the service again
				// before the sweep is over
				self.rate = 0.0;
				self.is_valid = false;
				self.outcome = RefreshOutcome::Delisted { at };
			},
			Err(e) => {
				self.outcome = RefreshOutcome::Failed {
					at,
					reason: e.to_string(),
				};
			},
		}
	}

	/// Marks the entry as needing a refresh in the coming sweep.
	pub fn begin_cycle(&mut self) {
		if self.outcome != RefreshOutcome::Pinned {
			self.refreshed_this_cycle = false;
		}
	}
}

/// How the most recent attempt to refresh an entry went.
#[derive(Clone, Debug, PartialEq)]
pub enum RefreshOutcome {
	NeverFetched,
	/// Fixed by definition (the reference currency)
	Pinned,
	Fresh {
		at: DateTime<Local>,
	},
	/// The service no longer quotes this currency
	Delisted {
		at: DateTime<Local>,
	},
	/// The fetch failed; whatever rate is cached is stale
	Failed {
		at: DateTime<Local>,
		reason: String,
	},
}

impl RefreshOutcome {
	/// Short label for tabular reports.
	pub fn label(&self) -> &'static str {
		match self {
			RefreshOutcome::NeverFetched => "never",
			RefreshOutcome::Pinned => "pinned",
			RefreshOutcome::Fresh { .. } => "fresh",
			RefreshOutcome::Delisted { .. } => "delisted",
			RefreshOutcome::Failed { .. } => "stale",
		}
	}
}

impl fmt::Display for RefreshOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RefreshOutcome::NeverFetched | RefreshOutcome::Pinned => {
				write!(f, "{}", self.label())
			},
			RefreshOutcome::Fresh { at } | RefreshOutcome::Delisted { at } => {
				write!(f, "{} at {}", self.label(), at.format("%Y-%m-%d %H:%M:%S"))
			},
			RefreshOutcome::Failed { at, reason } => write!(
				f,
				"{} since {} ({})",
				self.label(),
				at.format("%Y-%m-%d %H:%M:%S"),
				reason
			),
		}
	}
}
