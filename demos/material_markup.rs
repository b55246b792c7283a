use rust_decimal_macros::dec;
use wertfluss::core::*;
use wertfluss::{DivisorSource, evaluate_invoice};

fn main() {
    let input = InvoiceInputBuilder::new(4500)
        .minutes(40)
        .pricing_divisor(dec!(0.75))
        .add_material(MaterialInputBuilder::new("m1", "Kupferrohr 15mm").purchase_net(1000).build())
        .add_material(
            MaterialInputBuilder::new("m2", "Thermostatventil")
                .purchase_net(2500)
                .pricing_divisor(dec!(0.8))
                .build(),
        )
        .add_material(MaterialInputBuilder::new("m3", "Vom Kunden beigestellt").build())
        .build()
        .expect("invoice input should be valid");

    let totals = evaluate_invoice(&input, &RateTable::default());

    println!("=== Materials ===");
    for line in &totals.materials {
        let m = &line.allocation;
        let source = match line.divisor_source {
            DivisorSource::Item => "item",
            DivisorSource::Invoice => "invoice",
            DivisorSource::Default => "default",
        };
        println!(
            "{:<20} purchase {:>12}  sale {:>12}  markup {:>12}  divisor {} ({source})",
            line.name,
            totals.amount(m.purchase_net).to_string(),
            totals.amount(m.sale_net).to_string(),
            totals.amount(m.markup_net).to_string(),
            m.divisor,
        );
    }
    for id in &totals.excluded {
        println!("{id}: excluded, no purchase price");
    }

    println!("\n=== Invoice ===");
    println!("Net:               {}", totals.amount(totals.net_total));
    println!("VAT:               {}", totals.amount(totals.vat_total));
    println!("Gross:             {}", totals.amount(totals.gross_total));
    println!("Service value add: {}", totals.amount(totals.service_value_add));
    println!("Component value:   {}", totals.amount(totals.component_value_sum));
    println!("State:             {}", totals.amount(totals.state_total));
    println!("Rounding delta:    {} ct", totals.delta);
}
