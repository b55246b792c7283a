use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::gross_up::{GrossUp, gross_up};
use super::material::{DivisorSource, MaterialAllocation, allocate_material, resolve_divisor};
use crate::core::{Cents, InvoiceInput, MonetaryAmount, RateTable};
use crate::split::{NetSplit, apply_rate};

/// One material participant with its allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub id: String,
    pub name: String,
    pub divisor_source: DivisorSource,
    pub allocation: MaterialAllocation,
}

/// Sub-division of the impact pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    pub total: Cents,
    pub service: Cents,
    pub social: Cents,
    /// Remainder after service and social, never negative.
    pub future: Cents,
    /// Service and social together claim more than the pool holds.
    pub overcommitted: bool,
}

/// Named NetSplit sub-components summed over labor and all materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubAllocation {
    pub worker_levies: Cents,
    pub employer_social: Cents,
    pub vacation: Cents,
    pub operations: Cents,
    pub logistics: Cents,
    pub risk: Cents,
    pub profit_tax: Cents,
    pub profit_net: Cents,
    pub recovered_vat: Cents,
    pub levies: Cents,
}

impl SubAllocation {
    fn add(&mut self, split: &NetSplit) {
        self.worker_levies += split.worker_levies;
        self.employer_social += split.employer_social;
        self.vacation += split.vacation;
        self.operations += split.blocks.operations;
        self.logistics += split.blocks.logistics;
        self.risk += split.blocks.risk;
        self.profit_tax += split.profit_tax;
        self.profit_net += split.profit_net;
        self.recovered_vat += split.recovered_vat;
        self.levies += split.levies;
    }
}

/// Invoice-level allocation.
///
/// `service_value_add + component_value_sum + state_total == gross_total`
/// holds exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub currency: String,
    pub net_total: Cents,
    pub vat_total: Cents,
    pub gross_total: Cents,
    /// Labor in-system value plus every material markup's in-system value.
    pub service_value_add: Cents,
    pub worker_total: Cents,
    pub entrepreneur_total: Cents,
    pub impact_total: Cents,
    /// Labor state share plus every material's state total, before reconciliation.
    pub state_model: Cents,
    /// Reconciled state share: `state_model + delta`.
    pub state_total: Cents,
    /// Purchase prices after supply-chain levy.
    pub component_value_sum: Cents,
    /// Reconciliation delta folded into the state share.
    pub delta: Cents,
    pub impact: ImpactBreakdown,
    pub breakdown: SubAllocation,
    pub labor: GrossUp,
    pub materials: Vec<MaterialLine>,
    /// Ids of participants left out for lack of a purchase price.
    pub excluded: Vec<String>,
}

impl InvoiceTotals {
    /// Wrap a cent figure in the invoice currency.
    pub fn amount(&self, cents: Cents) -> MonetaryAmount {
        MonetaryAmount::new(cents, self.currency.clone())
    }

    /// Look up a material line by participant id.
    pub fn material(&self, id: &str) -> Option<&MaterialLine> {
        self.materials.iter().find(|m| m.id == id)
    }
}

/// Evaluate a complete invoice: labor gross-up, every material line, and
/// the reconciled invoice totals.
///
/// ```
/// use wertfluss::core::*;
/// use wertfluss::evaluate_invoice;
///
/// let input = InvoiceInputBuilder::new(4500)
///     .minutes(40)
///     .add_material(MaterialInputBuilder::new("m1", "Dichtung").purchase_net(1000).build())
///     .build()
///     .unwrap();
/// let totals = evaluate_invoice(&input, &RateTable::default());
/// assert_eq!(
///     totals.service_value_add + totals.component_value_sum + totals.state_total,
///     totals.gross_total
/// );
/// ```
pub fn evaluate_invoice(input: &InvoiceInput, rates: &RateTable) -> InvoiceTotals {
    let labor = gross_up(input.labor.net_amount(), input.vat_rate, rates);

    let mut materials = Vec::with_capacity(input.materials.len());
    let mut excluded = Vec::new();
    for material in &input.materials {
        let Some(purchase_net) = material.purchase_net else {
            trace!(material = %material.id, "participant excluded: no purchase price");
            excluded.push(material.id.clone());
            continue;
        };

        let (divisor, divisor_source) =
            resolve_divisor(material.pricing_divisor, input.pricing_divisor);
        if divisor_source != DivisorSource::Item {
            trace!(material = %material.id, source = ?divisor_source, %divisor, "pricing divisor fallback");
        }

        materials.push(MaterialLine {
            id: material.id.clone(),
            name: material.name.clone(),
            divisor_source,
            allocation: allocate_material(purchase_net, divisor, input.vat_rate, rates),
        });
    }

    aggregate_invoice(input, labor, materials, excluded)
}

/// Combine a labor gross-up and material allocations into invoice totals.
///
/// VAT is recomputed on the invoice net total, so the parts no longer add up
/// to the gross by construction; the difference is folded into the state
/// share as `delta`. `excluded` lists the participants left out of
/// `materials` and is carried into the totals unchanged.
pub fn aggregate_invoice(
    input: &InvoiceInput,
    labor: GrossUp,
    materials: Vec<MaterialLine>,
    excluded: Vec<String>,
) -> InvoiceTotals {
    let net_total = labor.net + materials.iter().map(|m| m.allocation.sale_net).sum::<Cents>();
    let vat_total = apply_rate(net_total, input.vat_rate);
    let gross_total = net_total + vat_total;

    let mut service_value_add = labor.in_system();
    let mut worker_total = labor.split.worker_net;
    let mut entrepreneur_total = labor.split.entrepreneur_net;
    let mut impact_total = labor.split.impact;
    let mut state_model = labor.state;
    let mut component_value_sum: Cents = 0;
    let mut breakdown = SubAllocation::default();
    breakdown.add(&labor.split);

    for line in &materials {
        let m = &line.allocation;
        service_value_add += m.markup_split.in_system;
        worker_total += m.markup_split.worker_net;
        entrepreneur_total += m.markup_split.entrepreneur_net;
        impact_total += m.markup_split.impact;
        state_model += m.state_total;
        component_value_sum += m.component_value;
        breakdown.add(&m.markup_split);
    }

    let delta = gross_total - (service_value_add + component_value_sum + state_model);
    let state_total = state_model + delta;

    let impact = split_impact(
        impact_total,
        input.impact_service_pct,
        input.impact_social_pct,
    );

    debug!(
        net_total,
        vat_total,
        gross_total,
        delta,
        materials = materials.len(),
        excluded = excluded.len(),
        "invoice reconciled"
    );

    InvoiceTotals {
        currency: input.currency.clone(),
        net_total,
        vat_total,
        gross_total,
        service_value_add,
        worker_total,
        entrepreneur_total,
        impact_total,
        state_model,
        state_total,
        component_value_sum,
        delta,
        impact,
        breakdown,
        labor,
        materials,
        excluded,
    }
}

/// Divide the impact pool into service, social, and future shares.
///
/// Percentages are not range-checked here. When service and social together
/// exceed the pool, the future share is clamped to zero and the breakdown is
/// flagged as over-committed.
pub fn split_impact(total: Cents, service_pct: Decimal, social_pct: Decimal) -> ImpactBreakdown {
    let service = apply_rate(total, service_pct);
    let social = apply_rate(total, social_pct);
    let remainder = total - service - social;
    let overcommitted = remainder < 0;

    if overcommitted {
        warn!(
            total,
            service,
            social,
            %service_pct,
            %social_pct,
            "impact shares exceed the pool; future share clamped to zero"
        );
    }

    ImpactBreakdown {
        total,
        service,
        social,
        future: remainder.max(0),
        overcommitted,
    }
}
