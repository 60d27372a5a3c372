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
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use fxanchor::config::filesystem::get_config;
use fxanchor::currency::registry::{self, Currency};
use fxanchor::currency::value::CurrencyValue;
use fxanchor::rates;
use fxanchor::reports::currency_reporter::CurrencyReporter;
use fxanchor::reports::rate_reporter::RateReporter;

#[derive(Parser)]
#[command(
	name = "fxanchor",
	version = "0.1",
	about = "Currency conversion without round-trip drift"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// Currency codes, or for convert: amount, source code, target codes
	#[arg(required = false)]
	terms: Vec<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Custom config file location (default: ~/.config/fxanchor/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Show amounts as symbol and two decimal places
	#[arg(short, long)]
	short: bool,

	/// Fail rather than print zero when a currency is not quoted
	#[arg(long)]
	strict: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.command == Directive::Convert && self.terms.len() < 2 {
			bail!("convert needs an amount and a currency code");
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	List,    // known currencies
	Convert, // convert an amount through a chain of currencies
	Rates,   // current exchange rates
}

fn main() -> Result<(), Error> {
	env_logger::init();

	let args = Cli::parse();
	args.validate()?;

	match args.command {
		Directive::List => {
			let reporter = CurrencyReporter::new(select(&args.terms)?);
			reporter.print_currencies();
		},
		Directive::Convert => convert(&args)?,
		Directive::Rates => {
			let currencies = select(&args.terms)?;
			let config = get_config(args.config.as_ref())?;
			let cache = rates::configure(config.rate_settings()?)?;

			cache.refresh_and_wait();

			let entries = cache
				.snapshot()
				.into_iter()
				.filter(|(code, _)| currencies.iter().any(|c| c.code() == *code))
				.collect();
			RateReporter::new(entries).print_all_rates();
		},
	}

	Ok(())
}

/// Converts the amount hop by hop, printing every intermediate value.
fn convert(args: &Cli) -> Result<(), Error> {
	let value = CurrencyValue::parse(&args.terms[1], &args.terms[0])?;
	let targets = args.terms[2..]
		.iter()
		.map(|code| registry::lookup(code))
		.collect::<Result<Vec<_>, _>>()?;

	let config = get_config(args.config.as_ref())?;
	let cache = rates::configure(config.rate_settings()?)?;

	let render = |value: &CurrencyValue| {
		if args.short {
			value.to_display()
		} else {
			value.to_display_full()
		}
	};

	println!("{}", render(&value));

	let mut current = value;
	for target in targets {
		current = if args.strict {
			current.checked_convert(target, cache)?
		} else {
			current.convert(target, cache)
		};
		println!("{}", render(&current));
	}

	Ok(())
}

/// The named currencies, or all of them when none are named.
fn select(codes: &[String]) -> Result<Vec<&'static Currency>, Error> {
	if codes.is_empty() {
		return Ok(registry::all().iter().collect());
	}
	codes.iter().map(|code| registry::lookup(code)).collect()
}
