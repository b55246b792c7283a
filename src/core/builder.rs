use rust_decimal::Decimal;

use super::error::{AllocationError, join_errors};
use super::rates::DEFAULT_VAT_RATE;
use super::types::*;
use super::validation;

/// Builder for constructing validated invoice inputs.
///
/// ```
/// use wertfluss::core::*;
/// use rust_decimal_macros::dec;
///
/// let input = InvoiceInputBuilder::new(4500)
///     .minutes(90)
///     .impact_shares(dec!(0.5), dec!(0.3))
///     .add_material(MaterialInputBuilder::new("m1", "Kupferrohr").purchase_net(1000).build())
///     .build()
///     .unwrap();
/// assert_eq!(input.labor.net_amount(), 6750);
/// ```
pub struct InvoiceInputBuilder {
    currency: String,
    vat_rate: Decimal,
    hourly_rate_net: Cents,
    minutes: u32,
    steps: Vec<LaborStep>,
    pricing_divisor: Option<Decimal>,
    impact_service_pct: Decimal,
    impact_social_pct: Decimal,
    materials: Vec<MaterialInput>,
}

impl InvoiceInputBuilder {
    /// Start an invoice with the given net hourly rate in cents.
    pub fn new(hourly_rate_net: Cents) -> Self {
        Self {
            currency: "EUR".to_string(),
            vat_rate: DEFAULT_VAT_RATE,
            hourly_rate_net,
            minutes: 0,
            steps: Vec::new(),
            pricing_divisor: None,
            impact_service_pct: Decimal::ZERO,
            impact_social_pct: Decimal::ZERO,
            materials: Vec::new(),
        }
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = code.into();
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    /// Flat labor minutes; ignored once any step is added.
    pub fn minutes(mut self, minutes: u32) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn add_step(mut self, title: impl Into<String>, minutes: u32) -> Self {
        self.steps.push(LaborStep {
            title: title.into(),
            minutes,
        });
        self
    }

    pub fn pricing_divisor(mut self, divisor: Decimal) -> Self {
        self.pricing_divisor = Some(divisor);
        self
    }

    /// Shares of the impact pool for services and social purposes.
    pub fn impact_shares(mut self, service: Decimal, social: Decimal) -> Self {
        self.impact_service_pct = service;
        self.impact_social_pct = social;
        self
    }

    pub fn add_material(mut self, material: MaterialInput) -> Self {
        self.materials.push(material);
        self
    }

    fn assemble(self) -> InvoiceInput {
        InvoiceInput {
            currency: self.currency,
            vat_rate: self.vat_rate,
            labor: LaborInput {
                hourly_rate_net: self.hourly_rate_net,
                minutes: self.minutes,
                steps: self.steps,
            },
            pricing_divisor: self.pricing_divisor,
            impact_service_pct: self.impact_service_pct,
            impact_social_pct: self.impact_social_pct,
            materials: self.materials,
        }
    }

    /// Build the input and run validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<InvoiceInput, AllocationError> {
        let input = self.assemble();

        let errors = validation::validate_invoice_input(&input);
        if !errors.is_empty() {
            return Err(AllocationError::Validation(join_errors(&errors)));
        }

        Ok(input)
    }

    /// Build without validation. The engine still accepts the result.
    pub fn build_unchecked(self) -> InvoiceInput {
        self.assemble()
    }
}

/// Builder for a material participant.
pub struct MaterialInputBuilder {
    id: String,
    name: String,
    purchase_net: Option<Cents>,
    pricing_divisor: Option<Decimal>,
}

impl MaterialInputBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            purchase_net: None,
            pricing_divisor: None,
        }
    }

    pub fn purchase_net(mut self, cents: Cents) -> Self {
        self.purchase_net = Some(cents);
        self
    }

    /// Per-item divisor, overriding the invoice-level one.
    pub fn pricing_divisor(mut self, divisor: Decimal) -> Self {
        self.pricing_divisor = Some(divisor);
        self
    }

    pub fn build(self) -> MaterialInput {
        MaterialInput {
            id: self.id,
            name: self.name,
            purchase_net: self.purchase_net,
            pricing_divisor: self.pricing_divisor,
        }
    }
}
