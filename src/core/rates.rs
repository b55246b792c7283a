//! Rate table: the fixed fractional constants the engine works with.
//!
//! A [`RateTable`] is passed explicitly into every engine call, so alternative
//! rate regimes can be evaluated side by side.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::{AllocationError, ValidationError, join_errors};
use super::types::CostWeights;

/// VAT rate applied when an invoice does not state one.
pub const DEFAULT_VAT_RATE: Decimal = dec!(0.19);

/// Pricing divisor applied when neither the item nor the invoice set one.
/// A divisor of 2/3 is a 1.5× markup on the purchase price.
pub const DEFAULT_PRICING_DIVISOR: Decimal = dec!(0.6666666666666666666666666667);

/// Smallest divisor used as given (a 100× markup). Anything lower, including
/// zero and negatives, falls back to the next divisor in line.
pub const MIN_PRICING_DIVISOR: Decimal = dec!(0.01);

/// Statutory-style rates and cost weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Employee social contribution share of the worker third.
    pub worker_social_rate: Decimal,
    /// Wage tax share of the worker third.
    pub worker_tax_rate: Decimal,
    /// Employer social contribution share of the entrepreneur third.
    pub employer_social_rate: Decimal,
    /// Vacation and sick-pay provision share of the entrepreneur third.
    pub vacation_rate: Decimal,
    /// Tax on the profit block.
    pub profit_tax_rate: Decimal,
    /// Input VAT recovered on the operations block.
    pub ops_vat_recovery_rate: Decimal,
    /// Input VAT recovered on the logistics block.
    pub logistics_vat_recovery_rate: Decimal,
    /// Levy taken from a material's purchase price along the supply chain.
    pub supply_chain_levy_rate: Decimal,
    /// Weights of the entrepreneur cost blocks.
    pub weights: CostWeights,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            worker_social_rate: dec!(0.20),
            worker_tax_rate: dec!(0.15),
            employer_social_rate: dec!(0.20),
            vacation_rate: dec!(0.10),
            profit_tax_rate: dec!(0.30),
            ops_vat_recovery_rate: dec!(0.16),
            logistics_vat_recovery_rate: dec!(0.10),
            supply_chain_levy_rate: dec!(0.20),
            weights: CostWeights::default(),
        }
    }
}

impl RateTable {
    /// Combined levy rate on the worker third.
    pub fn worker_levy_rate(&self) -> Decimal {
        self.worker_social_rate + self.worker_tax_rate
    }

    fn named_rates(&self) -> [(&'static str, Decimal); 8] {
        [
            ("worker_social_rate", self.worker_social_rate),
            ("worker_tax_rate", self.worker_tax_rate),
            ("employer_social_rate", self.employer_social_rate),
            ("vacation_rate", self.vacation_rate),
            ("profit_tax_rate", self.profit_tax_rate),
            ("ops_vat_recovery_rate", self.ops_vat_recovery_rate),
            ("logistics_vat_recovery_rate", self.logistics_vat_recovery_rate),
            ("supply_chain_levy_rate", self.supply_chain_levy_rate),
        ]
    }
}

/// Check a rate table for consistency. Returns all errors found.
pub fn validate_rate_table(rates: &RateTable) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, rate) in rates.named_rates() {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            errors.push(ValidationError::with_code(
                field,
                format!("rate {rate} must be within [0, 1]"),
                "RATE-01",
            ));
        }
    }

    if rates.worker_levy_rate() > Decimal::ONE {
        errors.push(ValidationError::with_code(
            "worker_social_rate",
            "worker social and tax rates together exceed 1",
            "RATE-02",
        ));
    }

    if rates.employer_social_rate + rates.vacation_rate > Decimal::ONE {
        errors.push(ValidationError::with_code(
            "employer_social_rate",
            "employer social and vacation rates together exceed 1",
            "RATE-03",
        ));
    }

    if rates.weights.total() == 0 {
        errors.push(ValidationError::with_code(
            "weights",
            "cost block weights must not all be zero",
            "RATE-04",
        ));
    }

    errors
}

/// Builder for a [`RateTable`] starting from the defaults.
///
/// ```
/// use wertfluss::core::*;
/// use rust_decimal_macros::dec;
///
/// let rates = RateTableBuilder::new()
///     .profit_tax_rate(dec!(0.25))
///     .supply_chain_levy_rate(dec!(0.15))
///     .build()
///     .unwrap();
/// assert_eq!(rates.profit_tax_rate, dec!(0.25));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateTableBuilder {
    table: RateTable,
}

impl RateTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing table instead of the defaults.
    pub fn from_table(table: RateTable) -> Self {
        Self { table }
    }

    pub fn worker_social_rate(mut self, rate: Decimal) -> Self {
        self.table.worker_social_rate = rate;
        self
    }

    pub fn worker_tax_rate(mut self, rate: Decimal) -> Self {
        self.table.worker_tax_rate = rate;
        self
    }

    pub fn employer_social_rate(mut self, rate: Decimal) -> Self {
        self.table.employer_social_rate = rate;
        self
    }

    pub fn vacation_rate(mut self, rate: Decimal) -> Self {
        self.table.vacation_rate = rate;
        self
    }

    pub fn profit_tax_rate(mut self, rate: Decimal) -> Self {
        self.table.profit_tax_rate = rate;
        self
    }

    /// Input VAT recovery rates for the operations and logistics blocks.
    pub fn vat_recovery_rates(mut self, operations: Decimal, logistics: Decimal) -> Self {
        self.table.ops_vat_recovery_rate = operations;
        self.table.logistics_vat_recovery_rate = logistics;
        self
    }

    pub fn supply_chain_levy_rate(mut self, rate: Decimal) -> Self {
        self.table.supply_chain_levy_rate = rate;
        self
    }

    pub fn weights(mut self, weights: CostWeights) -> Self {
        self.table.weights = weights;
        self
    }

    /// Build the table, rejecting it if any rule fails.
    pub fn build(self) -> Result<RateTable, AllocationError> {
        let errors = validate_rate_table(&self.table);
        if !errors.is_empty() {
            return Err(AllocationError::Config(join_errors(&errors)));
        }
        Ok(self.table)
    }
}
