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
use crate::currency::registry::Currency;
use crate::reports::table::Table;

/// Lists currencies known to the registry.
pub struct CurrencyReporter {
	currencies: Vec<&'static Currency>,
}

impl CurrencyReporter {
	pub fn new(currencies: Vec<&'static Currency>) -> CurrencyReporter {
		Self { currencies }
	}

	pub fn print_currencies(&self) {
		self.table().print();
	}

	fn table(&self) -> Table {
		let mut table = Table::new(3);

		table.add_header(vec!["Code", "Name", "Symbol"]);
		table.add_separator();

		for currency in &self.currencies {
			table.add_row(vec![
				currency.code(),
				currency.name(),
				if currency.has_symbol() {
					currency.symbol()
				} else {
					""
				},
			]);
		}

		table
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::currency::registry::lookup;

	#[test]
	fn test_table() {
		let reporter = CurrencyReporter::new(vec![
			lookup("USD").unwrap(),
			lookup("CHF").unwrap(),
		]);

		let rendered = reporter.table().render();
		let lines: Vec<&str> = rendered.lines().collect();
		assert_eq!(lines.len(), 4);
		assert!(lines[2].starts_with("USD    us dollar"));
		assert!(lines[2].ends_with("$"));
		assert!(lines[3].starts_with("CHF    swiss franc"));
		assert!(!lines[3].ends_with("CHF"));
	}
}
