//! Log events emitted while evaluating invoices.
//!
//! Run with: `cargo test --test logging_tests`

use std::io;
use std::sync::{Arc, Mutex};

use rust_decimal_macros::dec;
use wertfluss::*;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a thread-local subscriber and returns everything it logged.
fn capture_logs(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

// ── Impact split ────────────────────────────────────────────────────────────

#[test]
fn overcommitted_impact_warns() {
    let mut breakdown = None;
    let logs = capture_logs(|| breakdown = Some(split_impact(1, dec!(0.5), dec!(0.5))));

    let breakdown = breakdown.unwrap();
    assert!(breakdown.overcommitted);
    assert_eq!(breakdown.future, 0);
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("impact shares exceed the pool"), "{logs}");
}

#[test]
fn balanced_impact_is_quiet() {
    let logs = capture_logs(|| {
        split_impact(1000, dec!(0.5), dec!(0.3));
    });
    assert!(!logs.contains("WARN"), "{logs}");
}

// ── Invoice evaluation ──────────────────────────────────────────────────────

#[test]
fn evaluation_traces_exclusions_and_fallbacks() {
    let input = InvoiceInputBuilder::new(4500)
        .minutes(40)
        .add_material(MaterialInputBuilder::new("m1", "Kupferrohr").purchase_net(1000).build())
        .add_material(MaterialInputBuilder::new("m2", "Beigestellt").build())
        .build()
        .unwrap();
    let logs = capture_logs(|| {
        evaluate_invoice(&input, &RateTable::default());
    });

    assert!(logs.contains("participant excluded: no purchase price"), "{logs}");
    assert!(logs.contains("pricing divisor fallback"), "{logs}");
    assert!(logs.contains("invoice reconciled"), "{logs}");
}
