use rust_decimal_macros::dec;
use wertfluss::core::*;
use wertfluss::evaluate_invoice;

fn main() {
    // 90 minutes at 45.00 EUR/h, recorded as three steps
    let input = InvoiceInputBuilder::new(4500)
        .add_step("Anfahrt", 20)
        .add_step("Fehlersuche", 40)
        .add_step("Reparatur", 30)
        .impact_shares(dec!(0.5), dec!(0.3))
        .build()
        .expect("invoice input should be valid");

    let totals = evaluate_invoice(&input, &RateTable::default());
    let labor = &totals.labor;

    println!("=== Labor ===");
    for step in &input.labor.steps {
        println!("  {:<12} {:>4} min", step.title, step.minutes);
    }
    println!("Net:          {}", totals.amount(labor.net));
    println!("VAT:          {}", totals.amount(labor.vat_out));
    println!("Gross:        {}", totals.amount(labor.gross));

    println!("\n=== Shares ===");
    println!("Worker:       {}", totals.amount(labor.split.worker_net));
    println!("Entrepreneur: {}", totals.amount(labor.split.entrepreneur_net));
    println!("Impact pool:  {}", totals.amount(labor.split.impact));
    println!("State:        {}", totals.amount(labor.state));

    println!("\n=== Impact pool ===");
    println!("Service:      {}", totals.amount(totals.impact.service));
    println!("Social:       {}", totals.amount(totals.impact.social));
    println!("Future:       {}", totals.amount(totals.impact.future));

    assert_eq!(
        labor.split.worker_net + labor.split.entrepreneur_net + labor.split.impact + labor.state,
        labor.gross
    );
}
