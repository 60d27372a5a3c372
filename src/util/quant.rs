/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use anyhow::{anyhow, Error};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Number of fractional digits every Quant carries.
pub const SCALE: u32 = 9;

const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// A decimal amount held at a fixed scale of nine fractional digits.
///
/// Every constructor and every arithmetic result is rounded with banker's
/// rounding (round half to even) back to that scale, so two Quants that
/// print the same are always equal and hash the same. The fixed scale is
/// what lets a currency amount be stored, compared and re-derived without
/// drifting between representations.
///
/// Nine fractional digits leave room for magnitudes up to about 7.9e19
/// (see [`Quant::max`]). Parsing anything larger is an error. Arithmetic
/// that would overflow saturates at the bound and logs a warning; use the
/// `checked_*` methods to detect it instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quant(Decimal);

impl Quant {
	pub fn zero() -> Self {
		Self::from_decimal(Decimal::ZERO)
	}

	/// Creates a new Quant from a mantissa and a decimal exponent, as though
	/// inserting a decimal point `exp` places from the right of the number.
	/// Anything beyond nine places is rounded away.
	pub fn new(mantissa: i64, exp: u32) -> Self {
		Self::from_decimal(Decimal::new(mantissa, exp))
	}

	/// Rounds to scale, saturating at the bound when the value is too large
	/// to carry nine fractional digits.
	pub fn from_decimal(value: Decimal) -> Self {
		Self::checked_from_decimal(value).unwrap_or_else(|| {
			Self::saturated(value.is_sign_negative(), &value.to_string())
		})
	}

	/// Rounds to scale, or `None` if the value cannot carry nine fractional
	/// digits.
	pub fn checked_from_decimal(value: Decimal) -> Option<Self> {
		let mut rounded = value.round_dp_with_strategy(SCALE, ROUNDING);
		if rounded.is_zero() {
			// drop any negative sign left over from rounding tiny negatives
			rounded = Decimal::ZERO;
		}
		rounded.rescale(SCALE);
		// rescale gives up silently when the mantissa would overflow
		if rounded.scale() != SCALE {
			return None;
		}
		Some(Self(rounded))
	}

	/// The largest amount that still carries nine fractional digits.
	pub fn max() -> Self {
		Self(Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX, false, SCALE))
	}

	pub fn min() -> Self {
		-Self::max()
	}

	fn saturated(negative: bool, attempted: &str) -> Self {
		log::warn!("amount {} is out of range; saturating", attempted);
		if negative {
			Self::min()
		} else {
			Self::max()
		}
	}

	/// Expands the float to its exact binary value first and only then
	/// rounds to scale, so 0.1 becomes 0.100000000 rather than whatever a
	/// shortest-repr conversion happens to produce.
	pub fn from_f64(value: f64) -> Result<Self, Error> {
		if !value.is_finite() {
			return Err(anyhow!("cannot represent {} as an amount", value));
		}

		Decimal::from_f64_retain(value)
			.and_then(Self::checked_from_decimal)
			.ok_or_else(|| anyhow!("amount {} is out of range", value))
	}

	pub fn from_str(input: &str) -> Result<Self, Error> {
		let value = input
			.trim()
			.parse::<Decimal>()
			.map_err(|e| anyhow!("invalid amount '{}': {}", input, e))?;
		Self::checked_from_decimal(value)
			.ok_or_else(|| anyhow!("amount '{}' is out of range", input.trim()))
	}

	/// Multiplies by a floating-point exchange rate. A rate that is not a
	/// finite number (e.g. the quotient of a zero rate) produces zero. A
	/// product beyond the bound saturates.
	pub fn scale_by(&self, rate: f64) -> Self {
		self.checked_scale_by(rate).unwrap_or_else(|| {
			let negative = self.is_negative() != rate.is_sign_negative();
			Self::saturated(negative, &format!("{} * {}", self, rate))
		})
	}

	/// Like `scale_by`, but `None` when the product is out of range.
	pub fn checked_scale_by(&self, rate: f64) -> Option<Self> {
		match Decimal::from_f64_retain(rate) {
			Some(rate) if rate.is_zero() => Some(Self::zero()),
			Some(rate) => self
				.0
				.checked_mul(rate)
				.and_then(Self::checked_from_decimal),
			None => {
				log::debug!("non-finite rate {} collapses amount to zero", rate);
				Some(Self::zero())
			},
		}
	}

	pub fn checked_add(&self, rhs: Self) -> Option<Self> {
		self.0.checked_add(rhs.0).and_then(Self::checked_from_decimal)
	}

	pub fn checked_sub(&self, rhs: Self) -> Option<Self> {
		self.0.checked_sub(rhs.0).and_then(Self::checked_from_decimal)
	}

	/// Returns the value rounded to the given number of decimal places and
	/// padded out to exactly that many, for rendering.
	pub fn round_to(&self, decimal_places: u32) -> Decimal {
		let mut out = self.0.round_dp_with_strategy(decimal_places, ROUNDING);
		if out.is_zero() {
			out = Decimal::ZERO;
		}
		out.rescale(decimal_places);
		out
	}

	pub fn abs(&self) -> Self {
		Self(self.0.abs())
	}

	pub fn is_negative(&self) -> bool {
		self.0.is_sign_negative() && !self.0.is_zero()
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	pub fn decimal(&self) -> Decimal {
		self.0
	}
}

impl fmt::Display for Quant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<Decimal> for Quant {
	fn from(value: Decimal) -> Self {
		Self::from_decimal(value)
	}
}

impl Add for Quant {
	type Output = Self;

	fn add(self, rhs: Self) -> Self::Output {
		self.checked_add(rhs).unwrap_or_else(|| {
			Self::saturated(self.is_negative(), &format!("{} + {}", self, rhs))
		})
	}
}

impl Sub for Quant {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self::Output {
		self.checked_sub(rhs).unwrap_or_else(|| {
			Self::saturated(self.is_negative(), &format!("{} - {}", self, rhs))
		})
	}
}

impl Neg for Quant {
	type Output = Self;

	fn neg(self) -> Self::Output {
		if self.is_zero() {
			return self;
		}
		Self(-self.0)
	}
}
