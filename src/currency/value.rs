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
use crate::rates::source::ExchangeRates;
use crate::util::quant::Quant;
use anyhow::{bail, Error};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An amount that serves as ground truth for every value derived from it.
/// Only a root's amount ever enters conversion math.
#[derive(Debug, PartialEq, Eq)]
pub struct Root {
	currency: &'static Currency,
	amount: Quant,
}

impl Root {
	pub fn currency(&self) -> &'static Currency {
		self.currency
	}

	pub fn amount(&self) -> Quant {
		self.amount
	}

	fn convert_to_amount<R>(&self, target: &Currency, rates: &R) -> Quant
	where
		R: ExchangeRates + ?Sized,
	{
		let rate = rates.rate_between(self.currency.code(), target.code());
		self.amount.scale_by(rate)
	}
}

/// An immutable amount of some currency.
///
/// Converting the same money back and forth between currencies would
/// normally pick up a little rounding error on every hop. To avoid that,
/// every value remembers the root it was derived from, and every conversion
/// is computed from that root rather than from the value in hand:
///
/// ```text
/// $5.00 -> €4.54 -> ₽318.71 -> ¥37384.45 -> €4.54 -> $5.00
/// ```
///
/// Only the first hop away from the root can carry rounding error; it never
/// compounds. Operations that change the amount (`change_by`, `to_debt`,
/// `to_profit`) produce a new root so that later conversions start from the
/// changed amount.
///
/// Equality and hashing look at the currency and displayed amount only.
#[derive(Clone, Debug)]
pub enum CurrencyValue {
	Root(Arc<Root>),
	Derived {
		currency: &'static Currency,
		amount: Quant,
		source: Arc<Root>,
	},
}

impl CurrencyValue {
	pub fn new(currency: &'static Currency, amount: Quant) -> Self {
		Self::Root(Arc::new(Root { currency, amount }))
	}

	pub fn from_f64(currency: &'static Currency, amount: f64) -> Result<Self, Error> {
		Ok(Self::new(currency, Quant::from_f64(amount)?))
	}

	/// Builds a root from a currency code and a decimal string.
	pub fn parse(code: &str, amount: &str) -> Result<Self, Error> {
		Ok(Self::new(registry::lookup(code)?, Quant::from_str(amount)?))
	}

	/// A value anchored to `source`, collapsing to the root itself when the
	/// two are indistinguishable.
	fn anchored(
		source: Arc<Root>,
		currency: &'static Currency,
		amount: Quant,
	) -> Self {
		if source.currency == currency && source.amount == amount {
			Self::Root(source)
		} else {
			Self::Derived {
				currency,
				amount,
				source,
			}
		}
	}

	fn root(&self) -> &Arc<Root> {
		match self {
			Self::Root(root) => root,
			Self::Derived { source, .. } => source,
		}
	}

	pub fn currency(&self) -> &'static Currency {
		match self {
			Self::Root(root) => root.currency,
			Self::Derived { currency, .. } => *currency,
		}
	}

	pub fn amount(&self) -> Quant {
		match self {
			Self::Root(root) => root.amount,
			Self::Derived { amount, .. } => *amount,
		}
	}

	pub fn is_root(&self) -> bool {
		matches!(self, Self::Root(_))
	}

	/// The root this value was derived from; a root is its own source.
	pub fn source(&self) -> CurrencyValue {
		Self::Root(Arc::clone(self.root()))
	}

	// ----------------
	// -- CONVERSION --
	// ----------------

	/// Converts into the target currency, computing from the root.
	pub fn convert<R>(&self, target: &'static Currency, rates: &R) -> Self
	where
		R: ExchangeRates + ?Sized,
	{
		let root = self.root();
		let amount = root.convert_to_amount(target, rates);
		Self::anchored(Arc::clone(root), target, amount)
	}

	/// The amount `convert` would produce, without building a value.
	pub fn convert_to_amount<R>(&self, target: &Currency, rates: &R) -> Quant
	where
		R: ExchangeRates + ?Sized,
	{
		self.root().convert_to_amount(target, rates)
	}

	/// Like `convert`, but fails instead of producing zero when either
	/// currency is not currently quoted.
	pub fn checked_convert<R>(
		&self,
		target: &'static Currency,
		rates: &R,
	) -> Result<Self, Error>
	where
		R: ExchangeRates + ?Sized,
	{
		let from = self.root().currency;
		if from == target {
			return Ok(self.convert(target, rates));
		}

		for currency in [from, target] {
			if !rates.is_valid(currency.code()) {
				bail!("{} is not currently quoted", currency.code());
			}
		}

		let rate = rates.rate_between(from.code(), target.code());
		if !rate.is_finite() || rate <= 0.0 {
			bail!("no usable exchange rate from {} to {}", from, target);
		}
		if self.root().amount.checked_scale_by(rate).is_none() {
			bail!(
				"{} {} is too large to express in {}",
				self.root().amount,
				from,
				target
			);
		}

		Ok(self.convert(target, rates))
	}

	/// Value of one unit of this value's currency in the reference currency.
	pub fn exchange_rate<R>(&self, rates: &R) -> f64
	where
		R: ExchangeRates + ?Sized,
	{
		rates.rate(self.currency().code())
	}

	/// Value of one unit of this value's currency in units of `target`.
	pub fn exchange_rate_to<R>(&self, target: &Currency, rates: &R) -> f64
	where
		R: ExchangeRates + ?Sized,
	{
		rates.rate_between(self.currency().code(), target.code())
	}

	// ----------------
	// -- ARITHMETIC --
	// ----------------

	/// Adds `delta` (converted as needed) and re-anchors the result to a new
	/// root in the old root's currency.
	pub fn change_by<R>(&self, delta: &CurrencyValue, rates: &R) -> Self
	where
		R: ExchangeRates + ?Sized,
	{
		let root = self.root();
		let new_root = Arc::new(Root {
			currency: root.currency,
			amount: root.amount + delta.convert_to_amount(root.currency, rates),
		});

		let currency = self.currency();
		let amount = new_root.convert_to_amount(currency, rates);
		Self::anchored(new_root, currency, amount)
	}

	/// Adds an amount given in this value's own currency.
	pub fn change_by_amount<R>(&self, delta: Quant, rates: &R) -> Self
	where
		R: ExchangeRates + ?Sized,
	{
		self.change_by(&Self::new(self.currency(), delta), rates)
	}

	/// Adds an amount given in some other currency.
	pub fn change_by_amount_in<R>(
		&self,
		delta: Quant,
		currency: &'static Currency,
		rates: &R,
	) -> Self
	where
		R: ExchangeRates + ?Sized,
	{
		self.change_by(&Self::new(currency, delta), rates)
	}

	/// A fresh root in this currency. Conversion history is dropped since an
	/// overwritten amount has none worth keeping.
	pub fn change_to(&self, amount: Quant) -> Self {
		Self::new(self.currency(), amount)
	}

	/// The negative of this value, or this value if it already is negative.
	pub fn to_debt(&self) -> Self {
		if self.is_debt() {
			return self.clone();
		}
		self.with_sign_applied(|q| -q)
	}

	/// The absolute value of this value.
	pub fn to_profit(&self) -> Self {
		if self.is_profit() {
			return self.clone();
		}
		self.with_sign_applied(|q| q.abs())
	}

	/// Applies the sign change to the root and the displayed amount
	/// separately, rather than re-deriving one from the other.
	fn with_sign_applied(&self, f: impl Fn(Quant) -> Quant) -> Self {
		let root = self.root();
		let new_root = Arc::new(Root {
			currency: root.currency,
			amount: f(root.amount),
		});
		Self::anchored(new_root, self.currency(), f(self.amount()))
	}

	// ----------------
	// -- COMPARISON --
	// ----------------

	pub fn is_debt(&self) -> bool {
		self.amount().is_negative()
	}

	/// Zero counts as profit.
	pub fn is_profit(&self) -> bool {
		!self.is_debt()
	}

	/// Whether both values come to exactly the same amount once converted
	/// into this value's currency.
	pub fn is_same_amount<R>(&self, other: &CurrencyValue, rates: &R) -> bool
	where
		R: ExchangeRates + ?Sized,
	{
		let currency = self.currency();
		self.convert_to_amount(currency, rates)
			== other.convert_to_amount(currency, rates)
	}

	// ---------------
	// -- RENDERING --
	// ---------------

	/// Symbol and amount to two decimal places, unless that would hide the
	/// amount entirely, in which case all nine are shown.
	pub fn to_display(&self) -> String {
		let amount = self.amount();
		if amount.abs() >= Quant::new(1, 2) {
			format!("{}{}", self.currency().symbol(), amount.round_to(2))
		} else {
			self.to_display_unrounded()
		}
	}

	pub fn to_display_unrounded(&self) -> String {
		format!("{}{}", self.currency().symbol(), self.amount())
	}

	/// E.g. `us dollar (USD) = $4.550000000`
	pub fn to_display_full(&self) -> String {
		let currency = self.currency();
		format!(
			"{} ({}) = {}{}",
			currency.name(),
			currency.code(),
			currency.symbol(),
			self.amount()
		)
	}
}

impl Default for CurrencyValue {
	fn default() -> Self {
		Self::new(Currency::usd(), Quant::zero())
	}
}

impl PartialEq for CurrencyValue {
	fn eq(&self, other: &Self) -> bool {
		self.currency() == other.currency() && self.amount() == other.amount()
	}
}

impl Eq for CurrencyValue {}

impl Hash for CurrencyValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.currency().hash(state);
		self.amount().hash(state);
	}
}

impl fmt::Display for CurrencyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_display())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rates::source::FixedRates;
	use std::collections::hash_map::DefaultHasher;

	fn usd() -> &'static Currency {
		Currency::usd()
	}

	fn eur() -> &'static Currency {
		registry::lookup("EUR").unwrap()
	}

	fn rub() -> &'static Currency {
		registry::lookup("RUB").unwrap()
	}

	fn jpy() -> &'static Currency {
		registry::lookup("JPY").unwrap()
	}

	fn gbp() -> &'static Currency {
		registry::lookup("GBP").unwrap()
	}

	fn q(s: &str) -> Quant {
		Quant::from_str(s).unwrap()
	}

	/// 1 USD = 0.908 EUR, 1 EUR = 70.2 RUB, 1 RUB = 117.3 JPY
	fn chain_rates() -> FixedRates {
		let eur = 1.0 / 0.908;
		let rub = eur / 70.2;
		let jpy = rub / 117.3;
		FixedRates::new()
			.with_rate("EUR", eur)
			.with_rate("RUB", rub)
			.with_rate("JPY", jpy)
			.with_rate("GBP", 1.5)
	}

	fn hash_of(value: &CurrencyValue) -> u64 {
		let mut hasher = DefaultHasher::new();
		value.hash(&mut hasher);
		hasher.finish()
	}

	mod construction {
		use super::*;

		#[test]
		fn test_new_is_root() {
			let value = CurrencyValue::new(usd(), q("5"));
			assert!(value.is_root());
			assert_eq!(value.source(), value);
			assert_eq!(value.amount().to_string(), "5.000000000");
		}

		#[test]
		fn test_default() {
			let value = CurrencyValue::default();
			assert_eq!(value.currency().code(), "USD");
			assert!(value.amount().is_zero());
			assert!(value.is_root());
		}

		#[test]
		fn test_from_f64_rounds_to_scale() {
			let value = CurrencyValue::from_f64(usd(), 0.1).unwrap();
			assert_eq!(value.amount(), q("0.1"));
			let value = CurrencyValue::from_f64(usd(), 1.0000000005).unwrap();
			assert_eq!(value.amount(), q("1.000000000"));
			assert!(CurrencyValue::from_f64(usd(), f64::NAN).is_err());
		}

		#[test]
		fn test_parse() {
			let value = CurrencyValue::parse("gbp", "12.5").unwrap();
			assert_eq!(value.currency(), gbp());
			assert_eq!(value.amount(), q("12.5"));
			assert!(CurrencyValue::parse("XYZ", "1").is_err());
			assert!(CurrencyValue::parse("GBP", "one").is_err());
		}

		#[test]
		fn test_clone_shares_root() {
			let rates = chain_rates();
			let value = CurrencyValue::new(usd(), q("5")).convert(eur(), &rates);
			let copy = value.clone();
			assert_eq!(copy, value);
			assert!(Arc::ptr_eq(copy.root(), value.root()));
		}
	}

	mod conversion {
		use super::*;

		#[test]
		fn test_chain_does_not_decay() {
			let rates = chain_rates();
			let root = CurrencyValue::from_f64(usd(), 5.0).unwrap();

			let b1 = root.convert(eur(), &rates);
			let c1 = b1.convert(rub(), &rates);
			let d1 = c1.convert(jpy(), &rates);
			let b2 = d1.convert(eur(), &rates);
			let c2 = b2.convert(rub(), &rates);

			assert_eq!(b1.amount(), q("4.54"));
			assert_eq!(c1.amount(), q("318.708"));
			assert_eq!(d1.to_display(), "¥37384.45");

			assert_eq!(b2.amount(), b1.amount());
			assert_eq!(b2, b1);
			assert_eq!(c2.amount(), c1.amount());
			assert_eq!(c2, c1);

			let back = c2.convert(usd(), &rates);
			assert_eq!(back.amount(), q("5"));
			assert!(back.is_root());
		}

		#[test]
		fn test_revisiting_intermediate_currency() {
			let rates = chain_rates();
			let root = CurrencyValue::new(usd(), q("123.456789"));
			let once = root.convert(eur(), &rates);
			let again = once
				.convert(rub(), &rates)
				.convert(eur(), &rates)
				.convert(jpy(), &rates)
				.convert(eur(), &rates);
			assert_eq!(again, once);
		}

		#[test]
		fn test_source_is_idempotent() {
			let rates = chain_rates();
			let root = CurrencyValue::new(usd(), q("5"));
			let derived = root.convert(eur(), &rates).convert(jpy(), &rates);

			for value in [&root, &derived] {
				let source = value.source();
				assert!(source.is_root());
				assert_eq!(source.source(), source);
				assert!(Arc::ptr_eq(source.source().root(), source.root()));
			}
			assert!(Arc::ptr_eq(derived.root(), root.root()));
		}

		#[test]
		fn test_convert_to_amount_matches_convert() {
			let rates = chain_rates();
			let value = CurrencyValue::new(gbp(), q("2.5")).convert(eur(), &rates);
			assert_eq!(
				value.convert_to_amount(jpy(), &rates),
				value.convert(jpy(), &rates).amount()
			);
		}

		#[test]
		fn test_invalid_target_yields_zero() {
			let rates = FixedRates::new().with_rate("EUR", 1.25);
			let value = CurrencyValue::new(eur(), q("10"));

			let converted = value.convert(gbp(), &rates);
			assert!(converted.amount().is_zero());
			assert_eq!(converted.currency(), gbp());

			let from_invalid = CurrencyValue::new(gbp(), q("10"));
			assert!(from_invalid.convert(eur(), &rates).amount().is_zero());
		}

		#[test]
		fn test_checked_convert() {
			let rates = FixedRates::new().with_rate("EUR", 1.25);
			let value = CurrencyValue::new(eur(), q("10"));

			assert_eq!(
				value.checked_convert(usd(), &rates).unwrap().amount(),
				q("12.5")
			);
			assert!(value.checked_convert(gbp(), &rates).is_err());
			assert!(CurrencyValue::new(gbp(), q("1"))
				.checked_convert(eur(), &rates)
				.is_err());

			// same-currency conversion never needs a rate
			let gbp_value = CurrencyValue::new(gbp(), q("1"));
			assert!(gbp_value.checked_convert(gbp(), &rates).is_ok());
		}

		#[test]
		fn test_convert_past_bound() {
			let rates = FixedRates::new().with_rate("JPY", 0.008);
			let value = CurrencyValue::new(usd(), q("70000000000000000000"));

			assert!(value.checked_convert(jpy(), &rates).is_err());
			assert_eq!(value.convert(jpy(), &rates).amount(), Quant::max());
			assert!(value.checked_convert(usd(), &rates).is_ok());
		}

		#[test]
		fn test_exchange_rates() {
			let rates = FixedRates::new().with_rate("EUR", 1.25);
			let value = CurrencyValue::new(eur(), q("1"));
			assert_eq!(value.exchange_rate(&rates), 1.25);
			assert_eq!(value.exchange_rate_to(usd(), &rates), 1.25);
			assert_eq!(value.exchange_rate_to(eur(), &rates), 1.0);
		}
	}

	mod arithmetic {
		use super::*;

		#[test]
		fn test_change_by_reanchors() {
			let rates = chain_rates();
			let v1 = CurrencyValue::new(usd(), q("5")).convert(eur(), &rates);
			let delta = CurrencyValue::new(gbp(), q("2"));
			let v2 = v1.change_by(&delta, &rates);

			let expected_root =
				v1.source().amount() + delta.convert_to_amount(usd(), &rates);
			assert_eq!(v2.source().amount(), expected_root);
			assert_eq!(v2.source().currency(), usd());
			assert_eq!(v2.currency(), eur());
			assert_eq!(
				v2.convert(usd(), &rates).amount(),
				v2.source().amount()
			);
			assert_eq!(expected_root, q("8"));
		}

		#[test]
		fn test_change_by_amount_in_own_currency() {
			let rates = chain_rates();
			let v1 = CurrencyValue::new(usd(), q("5")).convert(eur(), &rates);
			let v2 = v1.change_by_amount(q("1"), &rates);

			// one euro is 1.101321586 dollars after rounding
			assert_eq!(v2.source().amount(), q("6.101321586"));
			assert_eq!(v2.amount(), q("5.54"));
			assert_eq!(v2.currency(), eur());
		}

		#[test]
		fn test_change_by_amount_in_other_currency() {
			let rates = chain_rates();
			let v1 = CurrencyValue::new(usd(), q("5"));
			let v2 = v1.change_by_amount_in(q("2"), gbp(), &rates);
			assert_eq!(v2.amount(), q("8"));
			assert!(v2.is_root());
		}

		#[test]
		fn test_change_by_root_currency() {
			let rates = chain_rates();
			let v1 = CurrencyValue::new(usd(), q("5"));
			let v2 = v1.change_by_amount(q("-7.25"), &rates);
			assert!(v2.is_root());
			assert_eq!(v2.amount(), q("-2.25"));
		}

		#[test]
		fn test_change_to_drops_history() {
			let rates = chain_rates();
			let v1 = CurrencyValue::new(usd(), q("5")).convert(eur(), &rates);
			let v2 = v1.change_to(q("100"));
			assert!(v2.is_root());
			assert_eq!(v2.currency(), eur());
			assert_eq!(v2.source().amount(), q("100"));
		}
	}

	mod sign {
		use super::*;

		#[test]
		fn test_to_debt() {
			let rates = chain_rates();
			let value = CurrencyValue::new(usd(), q("5")).convert(eur(), &rates);
			let debt = value.to_debt();

			assert!(debt.is_debt());
			assert_eq!(debt.amount(), q("-4.54"));
			assert_eq!(debt.source().amount(), q("-5"));
			assert_eq!(debt.to_debt(), debt);
			assert!(Arc::ptr_eq(debt.to_debt().root(), debt.root()));
		}

		#[test]
		fn test_to_profit() {
			let rates = chain_rates();
			let debt = CurrencyValue::new(usd(), q("-5")).convert(eur(), &rates);
			assert!(debt.is_debt());

			let profit = debt.to_profit();
			assert!(profit.is_profit());
			assert_eq!(profit.amount(), q("4.54"));
			assert_eq!(profit.source().amount(), q("5"));
			assert_eq!(profit.to_profit(), profit);
		}

		#[test]
		fn test_zero_is_profit() {
			let zero = CurrencyValue::default();
			assert!(zero.is_profit());
			assert!(!zero.is_debt());
			assert!(!zero.to_debt().is_debt());
			assert_eq!(zero.to_debt().to_debt(), zero.to_debt());
		}

		#[test]
		fn test_sign_change_of_root_stays_root() {
			let value = CurrencyValue::new(usd(), q("3"));
			assert!(value.to_debt().is_root());
			assert!(value.to_debt().to_profit().is_root());
		}
	}

	mod comparison {
		use super::*;

		#[test]
		fn test_structural_equality() {
			let rates = chain_rates();
			let root = CurrencyValue::new(usd(), q("5"));
			let round_trip = root.convert(eur(), &rates).convert(usd(), &rates);
			assert_eq!(root, round_trip);
			assert_eq!(hash_of(&root), hash_of(&round_trip));

			// no conversion happens for plain equality
			let euros = root.convert(eur(), &rates);
			assert_ne!(root, euros);
			assert_ne!(
				CurrencyValue::new(usd(), q("1")),
				CurrencyValue::new(eur(), q("1"))
			);
		}

		#[test]
		fn test_is_same_amount() {
			let rates = chain_rates();
			let dollars = CurrencyValue::new(usd(), q("5"));
			let euros = dollars.convert(eur(), &rates);
			assert!(dollars.is_same_amount(&euros, &rates));
			assert!(euros.is_same_amount(&dollars, &rates));

			let independent = CurrencyValue::new(eur(), q("4.54"));
			assert!(dollars.is_same_amount(&independent, &rates));

			let different = CurrencyValue::new(eur(), q("4.55"));
			assert!(!dollars.is_same_amount(&different, &rates));
		}
	}

	mod rendering {
		use super::*;

		#[test]
		fn test_to_display() {
			assert_eq!(CurrencyValue::new(usd(), q("5")).to_display(), "$5.00");
			assert_eq!(
				CurrencyValue::new(gbp(), q("3.125")).to_display(),
				"£3.12"
			);
			assert_eq!(
				CurrencyValue::new(usd(), q("-3.135")).to_display(),
				"$-3.14"
			);
			assert_eq!(CurrencyValue::new(usd(), q("0.01")).to_display(), "$0.01");
			assert_eq!(
				CurrencyValue::new(usd(), q("0.005")).to_display(),
				"$0.005000000"
			);
			assert_eq!(
				CurrencyValue::new(usd(), q("-0.009")).to_display(),
				"$-0.009000000"
			);
		}

		#[test]
		fn test_to_display_pads_two_places() {
			assert_eq!(CurrencyValue::new(eur(), q("4.5")).to_display(), "€4.50");
			assert_eq!(CurrencyValue::new(eur(), q("4")).to_string(), "€4.00");
		}

		#[test]
		fn test_symbol_fallback() {
			let chf = registry::lookup("CHF").unwrap();
			assert_eq!(CurrencyValue::new(chf, q("1.5")).to_string(), "CHF1.50");
		}

		#[test]
		fn test_to_display_unrounded() {
			let value = CurrencyValue::new(eur(), q("4.54"));
			assert_eq!(value.to_display_unrounded(), "€4.540000000");
		}

		#[test]
		fn test_to_display_full() {
			let value = CurrencyValue::new(usd(), q("4.55"));
			assert_eq!(value.to_display_full(), "us dollar (USD) = $4.550000000");
		}
	}

	mod extremes {
		use super::*;
		use rand::Rng;
		use std::time::{Duration, Instant};

		#[test]
		fn test_random_conversion_chains() {
			let duration = Duration::from_millis(500);
			let start_time = Instant::now();

			let mut rng = rand::thread_rng();
			let codes = ["USD", "EUR", "GBP", "JPY", "CHF", "XAU", "INR"];
			let mut rates = FixedRates::new();
			for code in &codes[1..] {
				rates = rates.with_rate(code, rng.gen_range(0.00001..2000.0));
			}

			while Instant::now() - start_time < duration {
				let start = registry::lookup(codes[rng.gen_range(0..codes.len())])
					.unwrap();
				let root = CurrencyValue::new(
					start,
					Quant::new(rng.gen_range(-10i64.pow(15)..10i64.pow(15)), 6),
				);

				let mut first_seen: Vec<CurrencyValue> = Vec::new();
				let mut current = root.clone();
				for _ in 0..rng.gen_range(1..20) {
					let target =
						registry::lookup(codes[rng.gen_range(0..codes.len())])
							.unwrap();
					current = current.convert(target, &rates);

					match first_seen.iter().find(|v| v.currency() == target) {
						Some(seen) => assert_eq!(seen, &current),
						None => first_seen.push(current.clone()),
					}
					assert_eq!(current.amount().decimal().scale(), 9);
				}

				assert_eq!(current.convert(start, &rates), root);
			}
		}
	}
}
