use wertfluss::core::*;
use wertfluss::evaluate_invoice;
use wertfluss::record::parse_invoice_record;

const RECORD: &str = r#"{
    "currency": "EUR",
    "hourlyRateNet": "5200",
    "laborMinutes": 75,
    "vatRate": null,
    "impactServicePct": "0.4",
    "impactSocialPct": "0.4",
    "participants": [
        { "id": 1, "name": "Schlauch", "purchaseNet": "899" },
        { "id": 2, "name": "Pumpe", "purchaseNet": 15990, "pricingDivisor": "0.85" },
        { "id": 3, "name": "Altteil", "purchaseNet": null }
    ]
}"#;

fn main() {
    let input = match parse_invoice_record(RECORD) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Could not read record: {e}");
            std::process::exit(1);
        }
    };

    let errors = validate_invoice_input(&input);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("  {e}");
        }
        std::process::exit(1);
    }

    let totals = evaluate_invoice(&input, &RateTable::default());
    match serde_json::to_string_pretty(&totals) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Could not serialize totals: {e}"),
    }
}
