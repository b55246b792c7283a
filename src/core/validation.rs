use std::collections::HashSet;

use rust_decimal::Decimal;

use super::currencies::is_known_currency_code;
use super::error::ValidationError;
use super::rates::MIN_PRICING_DIVISOR;
use super::types::*;

/// Largest number of material participants accepted on one invoice.
pub const MAX_MATERIALS: usize = 1_000;

/// Validate an invoice input before it is handed to the engine.
///
/// The engine accepts any input; these rules catch upstream data that would
/// produce meaningless allocations. Returns all errors, not just the first.
pub fn validate_invoice_input(input: &InvoiceInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !is_known_currency_code(&input.currency) {
        errors.push(ValidationError::with_code(
            "currency",
            format!("unknown ISO 4217 currency code '{}'", input.currency),
            "INV-01",
        ));
    }

    if !is_fraction(input.vat_rate) {
        errors.push(ValidationError::with_code(
            "vat_rate",
            format!("VAT rate {} must be within [0, 1]", input.vat_rate),
            "INV-02",
        ));
    }

    if let Some(divisor) = input.pricing_divisor {
        validate_divisor(divisor, "pricing_divisor", &mut errors);
    }

    validate_impact_shares(input, &mut errors);
    validate_labor(&input.labor, &mut errors);

    if input.materials.len() > MAX_MATERIALS {
        errors.push(ValidationError::with_code(
            "materials",
            format!("invoice cannot have more than {MAX_MATERIALS} materials"),
            "INV-07",
        ));
    }

    let mut seen = HashSet::new();
    for (i, material) in input.materials.iter().enumerate() {
        validate_material(material, i, &mut errors);
        if !material.id.trim().is_empty() && !seen.insert(material.id.as_str()) {
            errors.push(ValidationError::with_code(
                format!("materials[{i}].id"),
                format!("duplicate material id '{}'", material.id),
                "INV-08",
            ));
        }
    }

    errors
}

fn validate_impact_shares(input: &InvoiceInput, errors: &mut Vec<ValidationError>) {
    for (field, pct) in [
        ("impact_service_pct", input.impact_service_pct),
        ("impact_social_pct", input.impact_social_pct),
    ] {
        if !is_fraction(pct) {
            errors.push(ValidationError::with_code(
                field,
                format!("share {pct} must be within [0, 1]"),
                "INV-04",
            ));
        }
    }

    if input.impact_service_pct + input.impact_social_pct > Decimal::ONE {
        errors.push(ValidationError::with_code(
            "impact_social_pct",
            "service and social shares together exceed the impact pool",
            "INV-05",
        ));
    }
}

fn validate_labor(labor: &LaborInput, errors: &mut Vec<ValidationError>) {
    if labor.hourly_rate_net < 0 || labor.hourly_rate_net > MAX_CENTS {
        errors.push(ValidationError::with_code(
            "labor.hourly_rate_net",
            format!("hourly rate must be within [0, {MAX_CENTS}] cents"),
            "INV-06",
        ));
    } else if labor.uncapped_net_amount().is_none_or(|net| net > MAX_CENTS) {
        errors.push(ValidationError::with_code(
            "labor.minutes",
            format!("labor value must not exceed {MAX_CENTS} cents"),
            "INV-06",
        ));
    }
    for (i, step) in labor.steps.iter().enumerate() {
        if step.title.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("labor.steps[{i}].title"),
                "labor step title must not be empty",
            ));
        }
    }
}

fn validate_material(material: &MaterialInput, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("materials[{index}]");

    if material.id.trim().is_empty() {
        errors.push(ValidationError::with_code(
            format!("{prefix}.id"),
            "material id must not be empty",
            "INV-08",
        ));
    }

    if let Some(purchase) = material.purchase_net {
        if !(0..=MAX_CENTS).contains(&purchase) {
            errors.push(ValidationError::with_code(
                format!("{prefix}.purchase_net"),
                format!("purchase price must be within [0, {MAX_CENTS}] cents"),
                "INV-06",
            ));
        }
    }

    if let Some(divisor) = material.pricing_divisor {
        validate_divisor(divisor, &format!("{prefix}.pricing_divisor"), errors);
    }
}

fn validate_divisor(divisor: Decimal, field: &str, errors: &mut Vec<ValidationError>) {
    if divisor < MIN_PRICING_DIVISOR || divisor > Decimal::ONE {
        errors.push(ValidationError::with_code(
            field,
            format!("pricing divisor {divisor} must be within [{MIN_PRICING_DIVISOR}, 1]"),
            "INV-03",
        ));
    }
}

fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}
