#![no_main]

use libfuzzer_sys::fuzz_target;
use wertfluss::{DEFAULT_VAT_RATE, MAX_CENTS, RawAmount, normalize_cents, normalize_fraction};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).into_owned();
    let raw = RawAmount::from(text);
    let cents = normalize_cents(Some(&raw));
    assert!((0..=MAX_CENTS).contains(&cents));
    let _ = normalize_fraction(Some(&raw), DEFAULT_VAT_RATE);
});
