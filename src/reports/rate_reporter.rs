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
use crate::rates::entry::RateEntry;
use crate::reports::table::Table;

pub struct RateReporter {
	entries: Vec<(&'static str, RateEntry)>,
}

impl RateReporter {
	pub fn new(entries: Vec<(&'static str, RateEntry)>) -> RateReporter {
		Self { entries }
	}

	pub fn print_all_rates(&self) {
		self.table().print();
	}

	fn table(&self) -> Table {
		let mut table = Table::new(4);

		table.add_header(vec!["Code", "Rate (USD)", "Valid", "Last refresh"]);
		table.add_separator();
		table.right_align(vec![1]);

		for (code, entry) in &self.entries {
			let rate = if entry.is_valid {
				format!("{:.6}", entry.rate)
			} else {
				"-".to_string()
			};

			table.add_row(vec![
				code,
				&rate,
				if entry.is_valid { "yes" } else { "no" },
				&entry.outcome.to_string(),
			]);
		}

		table
	}
}
