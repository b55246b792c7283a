//! Edge cases: degenerate inputs, loose upstream data, extreme amounts,
//! rate-table validation, and concurrent evaluation.
//!
//! Run with: `cargo test --test edge_case_tests`

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wertfluss::*;

fn reconciles(t: &InvoiceTotals) -> bool {
    t.service_value_add + t.component_value_sum + t.state_total == t.gross_total
}

// ── Amount normalization ────────────────────────────────────────────────────

#[test]
fn normalize_garbage_and_negatives() {
    assert_eq!(normalize_cents(Some(&RawAmount::from("12,50"))), 0);
    assert_eq!(normalize_cents(Some(&RawAmount::from(""))), 0);
    assert_eq!(normalize_cents(Some(&RawAmount::from(-5_i64))), 0);
    assert_eq!(normalize_cents(Some(&RawAmount::from(f64::INFINITY))), 0);
    assert_eq!(normalize_cents(Some(&RawAmount::from(" 42 "))), 42);
}

#[test]
fn normalize_rounds_half_up() {
    assert_eq!(normalize_cents(Some(&RawAmount::from(0.5))), 1);
    assert_eq!(normalize_cents(Some(&RawAmount::from("2.49"))), 2);
    assert_eq!(normalize_cents(Some(&RawAmount::from("1e3"))), 1000);
}

#[test]
fn normalize_clamps_oversized() {
    assert_eq!(normalize_cents(Some(&RawAmount::from(i64::MAX))), MAX_CENTS);
    assert_eq!(normalize_cents(Some(&RawAmount::from(1e300))), MAX_CENTS);
}

#[test]
fn normalize_fraction_defaults() {
    assert_eq!(normalize_fraction(None, dec!(0.19)), dec!(0.19));
    assert_eq!(normalize_fraction(Some(&RawAmount::from("x")), dec!(0.19)), Decimal::ZERO);
    assert_eq!(normalize_fraction(Some(&RawAmount::from("0.8")), dec!(0.19)), dec!(0.8));
}

// ── Degenerate invoices ─────────────────────────────────────────────────────

#[test]
fn empty_invoice_is_all_zero() {
    let input = InvoiceInputBuilder::new(0).build().unwrap();
    let t = evaluate_invoice(&input, &RateTable::default());
    assert_eq!(t.gross_total, 0);
    assert_eq!(t.state_total, 0);
    assert_eq!(t.impact.future, 0);
    assert!(!t.impact.overcommitted);
    assert!(reconciles(&t));
}

#[test]
fn zero_vat_rate() {
    let input = InvoiceInputBuilder::new(4500)
        .minutes(40)
        .vat_rate(dec!(0))
        .build()
        .unwrap();
    let t = evaluate_invoice(&input, &RateTable::default());
    assert_eq!(t.vat_total, 0);
    assert_eq!(t.gross_total, 3000);
    // Recovered input VAT exceeds zero output VAT; payable clamps to zero.
    assert_eq!(t.labor.vat_payable, 0);
    assert!(reconciles(&t));
}

#[test]
fn zero_priced_material() {
    let m = allocate_material(0, DEFAULT_PRICING_DIVISOR, dec!(0.19), &RateTable::default());
    assert_eq!(m.sale_net, 0);
    assert_eq!(m.state_total, 0);
}

#[test]
fn divisor_above_one_gives_negative_markup() {
    let m = allocate_material(1000, dec!(1.25), dec!(0.19), &RateTable::default());
    assert_eq!(m.sale_net, 800);
    assert_eq!(m.markup_net, -200);
    assert_eq!(m.markup_split.thirds.sum(), -200);
    assert_eq!(m.gross, m.sale_net + m.vat);
}

#[test]
fn unchecked_input_still_reconciles() {
    let input = InvoiceInputBuilder::new(4500)
        .minutes(40)
        .impact_shares(dec!(0.9), dec!(0.9))
        .add_material(
            MaterialInputBuilder::new("m1", "Rabattware")
                .purchase_net(1000)
                .pricing_divisor(dec!(1.25))
                .build(),
        )
        .build_unchecked();
    let t = evaluate_invoice(&input, &RateTable::default());
    assert!(reconciles(&t));
    assert!(t.impact.overcommitted);
    assert_eq!(t.impact.future, 0);
}

#[test]
fn extreme_amounts_do_not_overflow() {
    let input = InvoiceInputBuilder::new(MAX_CENTS)
        .minutes(60)
        .add_material(
            MaterialInputBuilder::new("m1", "Großanlage")
                .purchase_net(MAX_CENTS)
                .pricing_divisor(MIN_PRICING_DIVISOR)
                .build(),
        )
        .build()
        .unwrap();
    let t = evaluate_invoice(&input, &RateTable::default());
    assert_eq!(t.material("m1").unwrap().allocation.sale_net, MAX_CENTS * 100);
    assert!(reconciles(&t));
}

#[test]
fn largest_valid_invoice_reconciles() {
    let mut builder = InvoiceInputBuilder::new(MAX_CENTS).minutes(60);
    for i in 0..MAX_MATERIALS {
        builder = builder.add_material(
            MaterialInputBuilder::new(format!("m{i}"), "Großanlage")
                .purchase_net(MAX_CENTS)
                .pricing_divisor(MIN_PRICING_DIVISOR)
                .build(),
        );
    }
    let input = builder.vat_rate(dec!(1)).build().unwrap();
    let t = evaluate_invoice(&input, &RateTable::default());
    assert!(reconciles(&t));
}

#[test]
fn oversized_labor_is_rejected() {
    let err = InvoiceInputBuilder::new(MAX_CENTS)
        .minutes(61)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("[INV-06] labor.minutes"));
}

// ── Builder and validation errors ───────────────────────────────────────────

#[test]
fn builder_collects_all_errors() {
    let err = InvoiceInputBuilder::new(-1)
        .currency("XYZ")
        .vat_rate(dec!(1.19))
        .build()
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("validation failed"));
    assert!(msg.contains("[INV-01]"));
    assert!(msg.contains("[INV-02]"));
    assert!(msg.contains("[INV-06]"));
}

#[test]
fn builder_rejects_overcommitted_impact() {
    let err = InvoiceInputBuilder::new(4500)
        .impact_shares(dec!(0.6), dec!(0.6))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("INV-05"));
}

#[test]
fn zero_decimal_currency_is_accepted() {
    let input = InvoiceInputBuilder::new(4500)
        .minutes(40)
        .currency("JPY")
        .build()
        .unwrap();
    let t = evaluate_invoice(&input, &RateTable::default());
    assert_eq!(t.amount(t.gross_total).to_string(), "3570 JPY");
}

#[test]
fn rate_table_rejects_out_of_range_rates() {
    let err = RateTableBuilder::new()
        .profit_tax_rate(dec!(1.5))
        .build()
        .unwrap_err();
    assert!(matches!(err, AllocationError::Config(_)));
    assert!(err.to_string().contains("RATE-01"));
}

#[test]
fn rate_table_rejects_zero_weights() {
    let err = RateTableBuilder::new()
        .weights(CostWeights {
            operations: 0,
            logistics: 0,
            risk: 0,
            profit: 0,
        })
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("RATE-04"));
}

#[test]
fn default_rate_table_is_valid() {
    assert!(validate_rate_table(&RateTable::default()).is_empty());
}

// ── Concurrency ─────────────────────────────────────────────────────────────

#[test]
fn engine_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RateTable>();
    assert_send_sync::<InvoiceInput>();
    assert_send_sync::<InvoiceTotals>();
}

#[test]
fn concurrent_evaluation_is_deterministic() {
    let rates = RateTable::default();
    let input = InvoiceInputBuilder::new(4500)
        .minutes(90)
        .impact_shares(dec!(0.5), dec!(0.3))
        .add_material(MaterialInputBuilder::new("m1", "Kupferrohr").purchase_net(1000).build())
        .add_material(
            MaterialInputBuilder::new("m2", "Armatur")
                .purchase_net(2500)
                .pricing_divisor(dec!(0.8))
                .build(),
        )
        .build()
        .unwrap();
    let expected = evaluate_invoice(&input, &rates);

    let results: Vec<InvoiceTotals> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| evaluate_invoice(&input, &rates)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}
