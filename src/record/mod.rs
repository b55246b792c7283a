//! Loading loosely-typed invoice records.
//!
//! Upstream records carry numbers as JSON numbers or strings, use `null` for
//! missing values, and name fields in either snake_case or camelCase. This
//! module decodes such a record and normalizes it into an [`InvoiceInput`]
//! the engine can consume.
//!
//! # Example
//!
//! ```
//! use wertfluss::record::parse_invoice_record;
//!
//! let input = parse_invoice_record(r#"{
//!     "hourlyRateNet": "4500",
//!     "laborMinutes": 90,
//!     "participants": [
//!         { "id": "m1", "name": "Kupferrohr", "purchaseNet": 1000 },
//!         { "id": "m2", "name": "Kulanz", "purchaseNet": null }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(input.labor.net_amount(), 6750);
//! assert_eq!(input.materials[1].purchase_net, None);
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::core::{
    AllocationError, DEFAULT_VAT_RATE, InvoiceInput, LaborInput, LaborStep, MAX_MATERIALS,
    MaterialInput, RawAmount, normalize_cents, normalize_count, normalize_fraction, normalize_rate,
};

/// Invoice record as delivered by the data-retrieval layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceRecord {
    pub currency: Option<String>,
    #[serde(alias = "vatRate")]
    pub vat_rate: Option<RawAmount>,
    #[serde(alias = "hourlyRateNet")]
    pub hourly_rate_net: Option<RawAmount>,
    #[serde(alias = "laborMinutes")]
    pub labor_minutes: Option<RawAmount>,
    #[serde(alias = "laborSteps")]
    pub labor_steps: Vec<LaborStepRecord>,
    #[serde(alias = "pricingDivisor")]
    pub pricing_divisor: Option<RawAmount>,
    #[serde(alias = "impactServicePct")]
    pub impact_service_pct: Option<RawAmount>,
    #[serde(alias = "impactSocialPct")]
    pub impact_social_pct: Option<RawAmount>,
    pub participants: Vec<ParticipantRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LaborStepRecord {
    pub title: Option<String>,
    pub minutes: Option<RawAmount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParticipantRecord {
    pub id: Value,
    pub name: Option<String>,
    #[serde(alias = "purchaseNet")]
    pub purchase_net: Option<RawAmount>,
    #[serde(alias = "pricingDivisor")]
    pub pricing_divisor: Option<RawAmount>,
}

impl InvoiceRecord {
    /// Normalize the record into engine input.
    ///
    /// Missing VAT rate becomes 19 %, missing or non-positive divisors become
    /// `None` (engine fallback), missing impact shares become zero, and a
    /// participant whose purchase price is absent or `null` stays excluded.
    /// The VAT rate and impact shares are clamped to `[0, 1]` and the labor
    /// value is capped at [`MAX_CENTS`](crate::core::MAX_CENTS), so the
    /// result can always be evaluated.
    ///
    /// Fails when the record lists more than [`MAX_MATERIALS`] participants.
    pub fn into_input(self) -> Result<InvoiceInput, AllocationError> {
        if self.participants.len() > MAX_MATERIALS {
            return Err(AllocationError::Record(format!(
                "record lists {} participants, at most {MAX_MATERIALS} are supported",
                self.participants.len()
            )));
        }

        let steps = self
            .labor_steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| LaborStep {
                title: step.title.unwrap_or_else(|| format!("step {}", i + 1)),
                minutes: normalize_count(step.minutes.as_ref()),
            })
            .collect();

        let materials = self
            .participants
            .into_iter()
            .enumerate()
            .map(|(i, p)| MaterialInput {
                id: participant_id(&p.id, i),
                name: p.name.unwrap_or_default(),
                purchase_net: p.purchase_net.as_ref().map(|raw| normalize_cents(Some(raw))),
                pricing_divisor: positive_fraction(p.pricing_divisor.as_ref()),
            })
            .collect();

        Ok(InvoiceInput {
            currency: self.currency.unwrap_or_else(|| "EUR".to_string()),
            vat_rate: normalize_rate(self.vat_rate.as_ref(), DEFAULT_VAT_RATE),
            labor: LaborInput {
                hourly_rate_net: normalize_cents(self.hourly_rate_net.as_ref()),
                minutes: normalize_count(self.labor_minutes.as_ref()),
                steps,
            },
            pricing_divisor: positive_fraction(self.pricing_divisor.as_ref()),
            impact_service_pct: normalize_rate(self.impact_service_pct.as_ref(), Decimal::ZERO),
            impact_social_pct: normalize_rate(self.impact_social_pct.as_ref(), Decimal::ZERO),
            materials,
        })
    }
}

/// Decode a JSON invoice record and normalize it into engine input.
pub fn parse_invoice_record(json: &str) -> Result<InvoiceInput, AllocationError> {
    let record: InvoiceRecord =
        serde_json::from_str(json).map_err(|e| AllocationError::Record(e.to_string()))?;
    record.into_input()
}

/// Same as [`parse_invoice_record`] for an already-decoded JSON value.
pub fn invoice_from_value(value: Value) -> Result<InvoiceInput, AllocationError> {
    let record: InvoiceRecord =
        serde_json::from_value(value).map_err(|e| AllocationError::Record(e.to_string()))?;
    record.into_input()
}

fn participant_id(id: &Value, index: usize) -> String {
    match id {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => format!("participant-{}", index + 1),
    }
}

fn positive_fraction(raw: Option<&RawAmount>) -> Option<Decimal> {
    raw.map(|r| normalize_fraction(Some(r), Decimal::ZERO))
        .filter(|d| *d > Decimal::ZERO)
}
