use rust_decimal_macros::dec;
use wertfluss::core::*;
use wertfluss::evaluate_invoice;

fn main() {
    let input = InvoiceInputBuilder::new(6000)
        .minutes(120)
        .add_material(MaterialInputBuilder::new("m1", "Dämmplatte").purchase_net(4200).build())
        .build()
        .expect("invoice input should be valid");

    let standard = RateTable::default();
    let reduced = RateTableBuilder::new()
        .profit_tax_rate(dec!(0.15))
        .supply_chain_levy_rate(dec!(0.10))
        .weights(CostWeights {
            operations: 30,
            logistics: 10,
            risk: 5,
            profit: 5,
        })
        .build()
        .expect("rate table should be valid");

    // Inconsistent tables are rejected with every failing rule listed
    let rejected = RateTableBuilder::new()
        .worker_social_rate(dec!(0.7))
        .worker_tax_rate(dec!(0.6))
        .build();
    if let Err(e) = rejected {
        println!("Rejected rate table: {e}\n");
    }

    for (label, rates) in [("standard", &standard), ("reduced", &reduced)] {
        let t = evaluate_invoice(&input, rates);
        println!("=== {label} ===");
        println!("Worker:       {}", t.amount(t.worker_total));
        println!("Entrepreneur: {}", t.amount(t.entrepreneur_total));
        println!("Impact:       {}", t.amount(t.impact_total));
        println!("Components:   {}", t.amount(t.component_value_sum));
        println!("State:        {}", t.amount(t.state_total));
        println!("Gross:        {}\n", t.amount(t.gross_total));
    }
}
