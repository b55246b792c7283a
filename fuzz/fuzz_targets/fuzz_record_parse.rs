#![no_main]

use libfuzzer_sys::fuzz_target;
use wertfluss::{RateTable, evaluate_invoice};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine. Every parsed record must evaluate and reconcile.
        if let Ok(input) = wertfluss::record::parse_invoice_record(s) {
            let t = evaluate_invoice(&input, &RateTable::default());
            assert_eq!(
                t.service_value_add + t.component_value_sum + t.state_total,
                t.gross_total
            );
        }
    }
});
