//! ISO 4217 currency codes and their minor-unit exponents.
//!
//! The engine is currency-agnostic; codes are only checked on input and used
//! to place the decimal point when a cent amount is displayed.

/// Check whether `code` is a known ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    lookup(code).is_some()
}

/// Number of minor-unit digits for `code` (2 for EUR, 0 for JPY).
pub fn minor_unit_digits(code: &str) -> Option<u32> {
    lookup(code).map(|(_, digits)| *digits)
}

fn lookup(code: &str) -> Option<&'static (&'static str, u32)> {
    CURRENCIES
        .binary_search_by(|(c, _)| c.cmp(&code))
        .ok()
        .map(|idx| &CURRENCIES[idx])
}

/// Sorted by code for binary search.
static CURRENCIES: &[(&str, u32)] = &[
    ("AUD", 2),
    ("BGN", 2),
    ("CAD", 2),
    ("CHF", 2),
    ("CZK", 2),
    ("DKK", 2),
    ("EUR", 2),
    ("GBP", 2),
    ("HUF", 2),
    ("ISK", 0),
    ("JPY", 0),
    ("KRW", 0),
    ("NOK", 2),
    ("PLN", 2),
    ("RON", 2),
    ("SEK", 2),
    ("TRY", 2),
    ("UAH", 2),
    ("USD", 2),
    ("VND", 0),
];
