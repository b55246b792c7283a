use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currencies::minor_unit_digits;
use super::normalize::round_half_up;

/// Integer count of minor currency units (cents).
///
/// Inputs are non-negative after normalization. Signed so that reconciliation
/// deltas and markups below cost stay representable.
pub type Cents = i64;

/// Upper bound for any normalized input amount (100 billion in major units).
pub const MAX_CENTS: Cents = 10_000_000_000_000;

/// A cent amount tagged with its ISO 4217 currency code, for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    /// Amount in minor units.
    pub cents: Cents,
    /// ISO 4217 currency code (e.g. "EUR").
    pub currency: String,
}

impl MonetaryAmount {
    pub fn new(cents: Cents, currency: impl Into<String>) -> Self {
        Self {
            cents,
            currency: currency.into(),
        }
    }

    /// Amount in major units, scaled by the currency's minor-unit digits
    /// (two when the code is unknown).
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.cents, minor_unit_digits(&self.currency).unwrap_or(2))
    }
}

impl std::fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_decimal(), self.currency)
    }
}

/// Remainder priority used when splitting an amount into thirds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Labor value: 1st remainder cent to impact, 2nd to entrepreneur.
    Labor,
    /// Material markup: 1st remainder cent to worker, 2nd to impact.
    Markup,
}

/// Relative weights of the four entrepreneur cost blocks.
///
/// The default weights sum to 50: they are shares of a 100-unit employer
/// cost base whose other half is the worker's gross wage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostWeights {
    pub operations: u32,
    pub logistics: u32,
    pub risk: u32,
    pub profit: u32,
}

impl CostWeights {
    /// Weights in bucket order: operations, logistics, risk, profit.
    pub fn as_array(&self) -> [u32; 4] {
        [self.operations, self.logistics, self.risk, self.profit]
    }

    pub fn total(&self) -> u64 {
        self.as_array().iter().map(|w| u64::from(*w)).sum()
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            operations: 22,
            logistics: 8,
            risk: 10,
            profit: 10,
        }
    }
}

/// Fully materialized invoice input, already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceInput {
    /// ISO 4217 currency code, display only.
    pub currency: String,
    /// VAT rate as a fraction (0.19 = 19 %).
    pub vat_rate: Decimal,
    /// Labor component.
    pub labor: LaborInput,
    /// Invoice-level pricing divisor, used when a material has no override.
    pub pricing_divisor: Option<Decimal>,
    /// Share of the impact pool earmarked for services.
    pub impact_service_pct: Decimal,
    /// Share of the impact pool earmarked for social purposes.
    pub impact_social_pct: Decimal,
    /// Material participants in declaration order.
    pub materials: Vec<MaterialInput>,
}

/// Labor component of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborInput {
    /// Net hourly rate in cents.
    pub hourly_rate_net: Cents,
    /// Flat minute count, used when no steps are recorded.
    pub minutes: u32,
    /// Ordered labor steps.
    pub steps: Vec<LaborStep>,
}

impl LaborInput {
    /// Sum of step minutes if any step exists, else the flat minute count.
    pub fn total_minutes(&self) -> u64 {
        if self.steps.is_empty() {
            u64::from(self.minutes)
        } else {
            self.steps.iter().map(|s| u64::from(s.minutes)).sum()
        }
    }

    /// Net labor value: `round(hourly_rate_net × total_minutes / 60)`,
    /// capped at [`MAX_CENTS`].
    pub fn net_amount(&self) -> Cents {
        self.uncapped_net_amount().unwrap_or(Cents::MAX).min(MAX_CENTS)
    }

    /// Net labor value without the cap. `None` when the product leaves the
    /// `Decimal` range.
    pub(crate) fn uncapped_net_amount(&self) -> Option<Cents> {
        let minutes = Decimal::from(self.total_minutes());
        Decimal::from(self.hourly_rate_net)
            .checked_mul(minutes)
            .map(|value| round_half_up(value / Decimal::from(60)))
    }
}

/// One recorded labor step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborStep {
    pub title: String,
    pub minutes: u32,
}

/// A material participant on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInput {
    /// Participant identifier, unique within the invoice.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Net purchase price in cents. `None` excludes the participant.
    pub purchase_net: Option<Cents>,
    /// Per-item pricing divisor override.
    pub pricing_divisor: Option<Decimal>,
}
