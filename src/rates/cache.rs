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
use crate::currency::registry::{self, Currency};
use crate::rates::entry::{RateEntry, RefreshOutcome};
use crate::rates::fetcher::{FetchError, RateFetcher};
use crate::rates::source::ExchangeRates;
use anyhow::{anyhow, Error};
use chrono::Local;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Default spacing between full refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Holds the most recently observed rate of every known currency and decides
/// when to go back to the quote service for new ones.
///
/// Rates are refreshed lazily: nothing happens until a rate is asked for
/// after the refresh deadline has passed, at which point a background sweep
/// refreshes every currency while the caller gets whatever is cached. A
/// reader that asks for a currency the sweep has not reached yet fetches it
/// inline instead of reading a stale value. Two readers racing on the same
/// currency may both fetch it; the last write wins.
pub struct RateCache {
	inner: Arc<Inner>,
	refresh_interval: Duration,

	/// The single decision point for starting a sweep.
	schedule: Mutex<Schedule>,
}

struct Schedule {
	next_refresh: Instant,
	cycles_started: u64,
}

struct Inner {
	fetcher: Box<dyn RateFetcher>,

	/// One lock per currency; an entry is only ever read or replaced whole
	entries: HashMap<&'static str, Mutex<RateEntry>>,

	/// Number of sweeps currently running
	active_sweeps: Mutex<usize>,
	sweep_done: Condvar,
}

impl RateCache {
	pub fn new(fetcher: Box<dyn RateFetcher>, refresh_interval: Duration) -> Self {
		let entries = registry::all()
			.iter()
			.map(|currency| {
				let entry = if currency.is_reference() {
					RateEntry::pinned(1.0)
				} else {
					RateEntry::unfetched()
				};
				(currency.code(), Mutex::new(entry))
			})
			.collect();

		Self {
			inner: Arc::new(Inner {
				fetcher,
				entries,
				active_sweeps: Mutex::new(0),
				sweep_done: Condvar::new(),
			}),
			refresh_interval,
			// the first read starts the first sweep
			schedule: Mutex::new(Schedule {
				next_refresh: Instant::now(),
				cycles_started: 0,
			}),
		}
	}

	/// Returns the current rate of the currency in reference-currency units.
	///
	/// May start a background sweep, and may fetch this one currency inline
	/// if a sweep is running and has not refreshed it yet. Unknown codes have
	/// a rate of zero.
	pub fn get_rate(&self, code: &str) -> f64 {
		self.start_sweep_if_due();

		let Some(slot) = self.inner.entries.get(code) else {
			log::debug!("no rate for unknown currency {}", code);
			return 0.0;
		};

		if self.is_refreshing() && !lock(slot).refreshed_this_cycle {
			log::debug!("{} not yet swept, fetching inline", code);
			return self.inner.refresh(code, slot).rate;
		}

		lock(slot).rate
	}

	/// Returns the value of one unit of `code` in units of `relative_to`.
	pub fn get_rate_relative(&self, code: &str, relative_to: &str) -> f64 {
		if code == relative_to {
			return 1.0;
		}
		self.get_rate(code) / self.get_rate(relative_to)
	}

	/// Whether a background sweep is in progress.
	pub fn is_refreshing(&self) -> bool {
		*lock(&self.inner.active_sweeps) > 0
	}

	/// Whether the currency is still quoted. An invalid currency has a rate
	/// of zero. Unknown codes are never valid.
	pub fn is_valid(&self, code: &str) -> bool {
		self.entry(code).is_some_and(|e| e.is_valid)
	}

	/// Fetches the currency's rate right now, regardless of schedule.
	pub fn refresh(&self, currency: &Currency) -> Result<RateEntry, Error> {
		let code = currency.code();
		let slot = self
			.inner
			.entries
			.get(code)
			.ok_or_else(|| anyhow!("no cache entry for {}", code))?;

		if currency.is_reference() {
			return Ok(lock(slot).clone());
		}
		Ok(self.inner.refresh(code, slot))
	}

	/// Blocks until no sweep is running. Returns immediately when idle.
	pub fn wait_for_refresh(&self) {
		let mut active = lock(&self.inner.active_sweeps);
		while *active > 0 {
			active = self
				.inner
				.sweep_done
				.wait(active)
				.unwrap_or_else(PoisonError::into_inner);
		}
	}

	/// Starts a sweep if one is due, then blocks until it is done. Nothing
	/// is fetched on the calling thread.
	pub fn refresh_and_wait(&self) {
		self.start_sweep_if_due();
		self.wait_for_refresh();
	}

	/// A copy of the cached state for one currency.
	pub fn entry(&self, code: &str) -> Option<RateEntry> {
		self.inner.entries.get(code).map(|slot| lock(slot).clone())
	}

	pub fn outcome(&self, code: &str) -> Option<RefreshOutcome> {
		self.entry(code).map(|e| e.outcome)
	}

	/// Copies of every entry, ordered by currency code. Entries are copied
	/// one at a time, so a running sweep may be partially reflected.
	pub fn snapshot(&self) -> Vec<(&'static str, RateEntry)> {
		let mut out: Vec<_> = self
			.inner
			.entries
			.iter()
			.map(|(code, slot)| (*code, lock(slot).clone()))
			.collect();
		out.sort_by(|a, b| a.0.cmp(b.0));
		out
	}

	/// How many sweeps have been started since the cache was created.
	pub fn cycles_started(&self) -> u64 {
		lock(&self.schedule).cycles_started
	}

	pub fn refresh_interval(&self) -> Duration {
		self.refresh_interval
	}

	fn start_sweep_if_due(&self) {
		let mut schedule = lock(&self.schedule);
		let now = Instant::now();
		if now < schedule.next_refresh {
			return;
		}

		schedule.next_refresh = now + self.refresh_interval;
		schedule.cycles_started += 1;
		let cycle = schedule.cycles_started;

		for slot in self.inner.entries.values() {
			lock(slot).begin_cycle();
		}
		*lock(&self.inner.active_sweeps) += 1;

		let inner = Arc::clone(&self.inner);
		let spawned = thread::Builder::new()
			.name(format!("fx-sweep-{}", cycle))
			.spawn(move || inner.sweep(cycle));

		if let Err(e) = spawned {
			log::error!("Unable to start exchange rate refresh: {}", e);
			self.inner.finish_sweep();
		}
	}
}

impl Inner {
	fn sweep(&self, cycle: u64) {
		let _done = SweepGuard(self);
		let started = Instant::now();
		log::info!("Refreshing exchange rates (cycle {})", cycle);

		self.entries.par_iter().for_each(|(code, slot)| {
			// a reader may have beaten us to it
			if !lock(slot).refreshed_this_cycle {
				self.refresh(code, slot);
			}
		});

		log::info!(
			"Exchange rate refresh {} finished in {:.1}s",
			cycle,
			started.elapsed().as_secs_f64()
		);
	}

	/// Fetches without holding the entry's lock, then applies the result in
	/// one locked step.
	fn refresh(&self, code: &str, slot: &Mutex<RateEntry>) -> RateEntry {
		let result = self.fetcher.fetch(code);

		match &result {
			Ok(rate) => log::debug!("{} = {} {}", code, rate, registry::REFERENCE_CODE),
			Err(FetchError::Unreachable(e)) => {
				log::error!("Connection to the quote service could not be established: {}", e)
			},
			Err(FetchError::MalformedQuote { body, .. }) => {
				log::warn!("{} is no longer quoted ({:?}); marking invalid", code, body)
			},
			Err(FetchError::Other(e)) => {
				log::debug!("Ignoring failed fetch for {}: {}", code, e)
			},
		}

		let mut entry = lock(slot);
		entry.apply(&result, Local::now());
		entry.clone()
	}

	fn finish_sweep(&self) {
		let mut active = lock(&self.active_sweeps);
		*active = active.saturating_sub(1);
		if *active == 0 {
			self.sweep_done.notify_all();
		}
	}
}

/// Marks the sweep finished even if a fetcher panics.
struct SweepGuard<'a>(&'a Inner);

impl Drop for SweepGuard<'_> {
	fn drop(&mut self) {
		self.0.finish_sweep();
	}
}

impl ExchangeRates for RateCache {
	fn rate(&self, code: &str) -> f64 {
		self.get_rate(code)
	}

	fn is_valid(&self, code: &str) -> bool {
		RateCache::is_valid(self, code)
	}

	fn rate_between(&self, code: &str, relative_to: &str) -> f64 {
		self.get_rate_relative(code, relative_to)
	}
}

/// Cache state stays usable after a panic elsewhere; every entry is replaced
/// whole, so a poisoned lock never guards a half-written value.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
