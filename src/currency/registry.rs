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
use std::fmt;
use std::hash::{Hash, Hasher};

/// Code of the currency every exchange rate is quoted against.
pub const REFERENCE_CODE: &str = "USD";

/// Position of the reference currency in the table below.
const REFERENCE_INDEX: usize = 6;

/// Descriptive, immutable information about one kind of currency, identified
/// by its ISO 4217 code. Exchange rates are not kept here; see the rate cache.
///
/// Many currencies share a symbol (there are a lot of dollars) and some have
/// none at all, in which case the code stands in for it.
#[derive(Debug, Eq)]
pub struct Currency {
	code: &'static str,
	name: &'static str,
	symbol: Option<&'static str>,
}

impl Currency {
	const fn new(
		code: &'static str,
		name: &'static str,
		symbol: Option<&'static str>,
	) -> Self {
		Self { code, name, symbol }
	}

	/// The fixed reference currency, whose rate is always exactly 1.
	pub fn usd() -> &'static Currency {
		&CURRENCIES[REFERENCE_INDEX]
	}

	pub fn code(&self) -> &'static str {
		self.code
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn symbol(&self) -> &'static str {
		self.symbol.unwrap_or(self.code)
	}

	pub fn has_symbol(&self) -> bool {
		self.symbol.is_some()
	}

	pub fn is_reference(&self) -> bool {
		self.code == REFERENCE_CODE
	}
}

impl PartialEq for Currency {
	fn eq(&self, other: &Self) -> bool {
		self.code == other.code
	}
}

impl Hash for Currency {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.code.hash(state);
	}
}

impl fmt::Display for Currency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.code)
	}
}

/// Every supported currency.
pub fn all() -> &'static [Currency] {
	&CURRENCIES
}

/// Resolves a currency by code, ignoring case.
pub fn lookup(code: &str) -> Result<&'static Currency, Error> {
	let code = code.trim();
	match CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code)) {
		Some(currency) => Ok(currency),
		None => bail!("unknown currency: {}", code),
	}
}

static CURRENCIES: [Currency; 158] = [
	// common
	Currency::new("AUD", "australian dollar", Some("$")),
	Currency::new("GBP", "british pound", Some("£")),
	Currency::new("EUR", "euro", Some("€")),
	Currency::new("JPY", "japanese yen", Some("¥")),
	Currency::new("CHF", "swiss franc", None),
	Currency::new("CAD", "canadian dollar", Some("$")),
	Currency::new("USD", "us dollar", Some("$")),

	// precious metals, per troy ounce
	Currency::new("XAU", "gold ounce", Some("Au")),
	Currency::new("XAG", "silver ounce", Some("Ag")),
	Currency::new("XPT", "platinum ounce", Some("Pt")),
	Currency::new("XPD", "palladium ounce", Some("Pd")),

	// less common
	Currency::new("AFN", "afghanistan afghani", Some("؋")),
	Currency::new("ALL", "albanian lek", Some("L")),
	Currency::new("DZD", "algerian dinar", Some("دج")),
	Currency::new("AOA", "angolan kwanza", Some("Kz")),
	Currency::new("ARS", "argentine peso", Some("$")),
	Currency::new("AMD", "armenian dram", None),
	Currency::new("AWG", "aruban florin", Some("ƒ")),
	Currency::new("AZN", "azerbaijan new manat", Some("₼")),
	Currency::new("BSD", "bahamian dollar", Some("$")),
	Currency::new("BHD", "bahraini dinar", Some("$")),
	Currency::new("BDT", "bangladeshi taka", Some("৳")),
	Currency::new("BBD", "barbados dollar", Some("$")),
	Currency::new("BYR", "belarusian ruble", Some("Br")),
	Currency::new("BZD", "belize dollar", Some("BZ$")),
	Currency::new("BMD", "bermudian dollar", Some("$")),
	Currency::new("BTN", "bhutan ngultrum", Some("Nu.")),
	Currency::new("BOB", "bolivian boliviano", Some("Bs.")),
	Currency::new("BAM", "bosnian mark", Some("KM")),
	Currency::new("BWP", "botswana pula", Some("P")),
	Currency::new("BRL", "brazilian real", Some("R$")),
	Currency::new("BND", "brunei dollar", Some("B$")),
	Currency::new("BGN", "bulgarian lev", Some("лв.")),
	Currency::new("BIF", "burundi franc", Some("FBu")),
	Currency::new("XOF", "CFA franc BCEAO", Some("CFA")),
	Currency::new("XAF", "CFA franc BEAC", Some("FCFA")),
	Currency::new("XPF", "CFP franc", Some("F")),
	Currency::new("KHR", "cambodian riel", Some("៛")),
	Currency::new("CVE", "cape verde escudo", Some("Esc")),
	Currency::new("KYD", "cayman islands dollar", Some("$")),
	Currency::new("CLP", "chilean peso", Some("$")),
	Currency::new("CNY", "chinese yuan/renminbi", Some("¥")),
	Currency::new("COP", "colombian peso", Some("$")),
	Currency::new("KMF", "comoros franc", Some("CF")),
	Currency::new("CDF", "congolese franc", Some("FC")),
	Currency::new("CRC", "costa rican colon", Some("₡")),
	Currency::new("HRK", "croatian kuna", Some("kn")),
	Currency::new("CUC", "cuban convertible peso", Some("CUC")),
	Currency::new("CUP", "cuban peso", Some("$MN")),
	Currency::new("CYP", "cyprus pound", Some("£")),
	Currency::new("CZK", "czech koruna", Some("Kč")),
	Currency::new("DKK", "danish krone", Some("kr.")),
	Currency::new("DJF", "djibouti franc", Some("Fdj")),
	Currency::new("DOP", "dominican peso", Some("RD$")),
	Currency::new("XCD", "east caribbean dollar", Some("$")),
	Currency::new("EGP", "egyptian pound", Some("ج.م")),
	Currency::new("SVC", "el salvador colon", Some("₡")),
	Currency::new("ETB", "ethiopian birr", Some("ብር")),
	Currency::new("FKP", "falkland islands pound", Some("£")),
	Currency::new("FJD", "fiji dollar", Some("FJ$")),
	Currency::new("GMD", "gambian dalasi", Some("D")),
	Currency::new("GEL", "georgian lari", Some("₾")),
	Currency::new("GHS", "ghanaian new cedi", Some("GH₵")),
	Currency::new("GIP", "gibraltar pound", Some("£")),
	Currency::new("GTQ", "guatemalan quetzal", Some("Q")),
	Currency::new("GNF", "guinea franc", Some("FG")),
	Currency::new("GYD", "guyanese dollar", Some("G$")),
	Currency::new("HTG", "haitian gourde", Some("G")),
	Currency::new("HNL", "honduran lempira", Some("L")),
	Currency::new("HKD", "hong kong dollar", Some("HK$")),
	Currency::new("HUF", "hungarian forint", Some("Ft")),
	Currency::new("ISK", "iceland krona", Some("kr")),
	Currency::new("INR", "indian rupee", Some("₹")),
	Currency::new("IDR", "indonesian rupiah", Some("Rp")),
	Currency::new("IRR", "iranian rial", Some("﷼")),
	Currency::new("IQD", "iraqi dinar", Some("ع.د")),
	Currency::new("ILS", "israeli new shekel", Some("₪")),
	Currency::new("JMD", "jamaican dollar", Some("$")),
	Currency::new("JOD", "jordanian dinar", Some("JOD")),
	Currency::new("KZT", "kazakhstan tenge", Some("₸")),
	Currency::new("KES", "kenyan shilling", Some("KSh")),
	Currency::new("KWD", "kuwaiti dinar", Some("د.ك")),
	Currency::new("KGS", "kyrgyzstani som", Some("сом")),
	Currency::new("LAK", "lao kip", Some("₭")),
	Currency::new("LVL", "latvian lats", Some("Ls")),
	Currency::new("LBP", "lebanese pound", Some("ل.ل")),
	Currency::new("LSL", "lesotho loti", Some("L")),
	Currency::new("LRD", "liberian dollar", Some("L$")),
	Currency::new("LYD", "libyan dinar", Some("ل.د")),
	Currency::new("LTL", "lithuanian litas", Some("Lt")),
	Currency::new("MOP", "macau pataca", Some("MOP$")),
	Currency::new("MKD", "macedonian denar", Some("ден")),
	Currency::new("MGA", "malagasy ariary", None),
	Currency::new("MWK", "malawi kwacha", Some("MK")),
	Currency::new("MYR", "malaysian ringgit", Some("RM")),
	Currency::new("MVR", "maldive rufiyaa", Some("ރ")),
	Currency::new("MRO", "mauritanian ouguiya", Some("UM")),
	Currency::new("MUR", "mauritius rupee", Some("Rs")),
	Currency::new("MXN", "mexican peso", Some("Mex$")),
	Currency::new("MDL", "moldovan leu", None),
	Currency::new("MNT", "mongolian tugrik", Some("₮")),
	Currency::new("MAD", "moroccan dirham", Some("MAD")),
	Currency::new("MZN", "mozambique new metical", Some("MT")),
	Currency::new("MMK", "myanmar kyat", Some("K")),
	Currency::new("ANG", "netherlands antillian guilder", Some("ƒ")),
	Currency::new("NAD", "namibia dollar", Some("N$")),
	Currency::new("NPR", "nepalese rupee", Some("रू")),
	Currency::new("NZD", "new zealand dollar", Some("$")),
	Currency::new("NIO", "nicaraguan cordoba oro", Some("C$")),
	Currency::new("NGN", "nigerian naira", Some("₦")),
	Currency::new("KPW", "north korean won", Some("₩")),
	Currency::new("NOK", "norwegian kroner", Some("kr")),
	Currency::new("OMR", "omani rial", Some("ر.ع.")),
	Currency::new("PKR", "pakistan rupee", Some("Rs")),
	Currency::new("PAB", "panamanian balboa", Some("B/.")),
	Currency::new("PGK", "papua new guinea kina", Some("K")),
	Currency::new("PYG", "paraguay guarani", Some("₲")),
	Currency::new("PEN", "peruvian nuevo sol", Some("S/")),
	Currency::new("PHP", "philippine peso", Some("₱")),
	Currency::new("PLN", "polish zloty", Some("zł")),
	Currency::new("QAR", "qatari rial", Some("ر.ق")),
	Currency::new("RON", "romanian new lei", None),
	Currency::new("RUB", "russian rouble", Some("₽")),
	Currency::new("RWF", "rwandan franc", Some("FRw")),
	Currency::new("WST", "samoan tala", Some("WS$")),
	Currency::new("STD", "sao tome/principe dobra", Some("Db")),
	Currency::new("SAR", "saudi riyal", Some("ر.س")),
	Currency::new("RSD", "serbian dinar", Some("РСД")),
	Currency::new("SCR", "seychelles rupee", Some("SR")),
	Currency::new("SLL", "sierra leonean leone", Some("Le")),
	Currency::new("SGD", "singapore dollar", Some("S$")),
	Currency::new("SIT", "slovenian tolar", Some("€")),
	Currency::new("SBD", "solomon islands dollar", Some("SI$")),
	Currency::new("SOS", "somali shilling", Some("Sh.So.")),
	Currency::new("ZAR", "south african rand", Some("R")),
	Currency::new("KRW", "south korean won", Some("₩")),
	Currency::new("LKR", "sri lanka rupee", Some("රු")),
	Currency::new("SHP", "st helena pound", Some("£")),
	Currency::new("SDG", "sudanese pound", Some("ج.س.")),
	Currency::new("SRD", "suriname dollar", Some("$")),
	Currency::new("SZL", "swaziland lilangeni", Some("L")),
	Currency::new("SEK", "swedish krona", Some("kr")),
	Currency::new("SYP", "syrian pound", Some("£S")),
	Currency::new("TWD", "taiwan new dollar", Some("NT$")),
	Currency::new("TZS", "tanzanian shilling", Some("TSh")),
	Currency::new("THB", "thai baht", Some("฿")),
	Currency::new("TOP", "tonga pa'anga", Some("T$")),
	Currency::new("TTD", "trinidad/tobago dollar", Some("TT$")),
	Currency::new("TND", "tunisian dinar", Some("د.ت")),
	Currency::new("TRY", "turkish new lira", Some("YTL")),
	Currency::new("UGX", "uganda shilling", Some("USh")),
	Currency::new("UAH", "ukraine hryvnia", Some("₴")),
	Currency::new("UYU", "uruguayan peso", Some("$U")),
	Currency::new("AED", "united arab emirates dirham", Some("د.إ")),
	Currency::new("VUV", "vanuatu vatu", Some("VT")),
	Currency::new("VND", "vietnamese dong", Some("₫")),
	Currency::new("UZS", "uzbekistan som", Some("som")),
	Currency::new("YER", "yemeni rial", Some("﷼")),
];
