use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::{
    Cents, DEFAULT_PRICING_DIVISOR, MIN_PRICING_DIVISOR, RateTable, SplitMode, round_half_up,
};
use crate::split::{NetSplit, apply_rate, net_split};

/// Distance from 2/3 within which a divisor takes the exact 1.5× path.
const TWO_THIRDS_TOLERANCE: Decimal = dec!(0.000000001);

/// Where a material's pricing divisor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivisorSource {
    /// Per-item override.
    Item,
    /// Invoice-level divisor.
    Invoice,
    /// Built-in default of 2/3.
    Default,
}

/// Sale price, markup, and markup allocation of one material line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialAllocation {
    pub purchase_net: Cents,
    /// Divisor actually applied.
    pub divisor: Decimal,
    pub sale_net: Cents,
    /// `sale_net - purchase_net`.
    pub markup_net: Cents,
    pub vat: Cents,
    pub gross: Cents,
    /// Supply-chain levy on the purchase price.
    pub levy: Cents,
    /// Purchase price after the supply-chain levy.
    pub component_value: Cents,
    pub markup_split: NetSplit,
    /// VAT + markup levies + supply-chain levy.
    pub state_total: Cents,
}

/// Pick the divisor for a material: item override, then invoice, then default.
pub fn resolve_divisor(
    item: Option<Decimal>,
    invoice: Option<Decimal>,
) -> (Decimal, DivisorSource) {
    match (item.filter(|d| is_usable(*d)), invoice.filter(|d| is_usable(*d))) {
        (Some(divisor), _) => (divisor, DivisorSource::Item),
        (None, Some(divisor)) => (divisor, DivisorSource::Invoice),
        (None, None) => (DEFAULT_PRICING_DIVISOR, DivisorSource::Default),
    }
}

/// Sale price for a purchase price: `round(purchase_net / divisor)`.
///
/// A divisor of 2/3 cannot be represented exactly in decimal, so
/// `purchase / 0.666…667` lands just below every `x.5` and rounds the wrong
/// way for odd prices. That ratio is computed as `purchase × 3 / 2` instead.
///
/// ```
/// use wertfluss::{sale_net_for, DEFAULT_PRICING_DIVISOR};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(sale_net_for(1001, DEFAULT_PRICING_DIVISOR), 1502);
/// assert_eq!(sale_net_for(999, dec!(0.8)), 1249);
/// ```
pub fn sale_net_for(purchase_net: Cents, divisor: Decimal) -> Cents {
    let divisor = effective_divisor(divisor);
    let purchase = Decimal::from(purchase_net);

    if (divisor - DEFAULT_PRICING_DIVISOR).abs() < TWO_THIRDS_TOLERANCE {
        return round_half_up(purchase * Decimal::from(3) / Decimal::from(2));
    }

    round_half_up(purchase / divisor)
}

/// Derive sale price, VAT, supply-chain levy, and markup split for one line.
pub fn allocate_material(
    purchase_net: Cents,
    divisor: Decimal,
    vat_rate: Decimal,
    rates: &RateTable,
) -> MaterialAllocation {
    let sale_net = sale_net_for(purchase_net, divisor);
    let markup_net = sale_net - purchase_net;

    let vat = apply_rate(sale_net, vat_rate);
    let gross = sale_net + vat;

    let levy = apply_rate(purchase_net, rates.supply_chain_levy_rate);
    let component_value = purchase_net - levy;

    let markup_split = net_split(markup_net, SplitMode::Markup, rates);
    let state_total = vat + markup_split.levies + levy;

    MaterialAllocation {
        purchase_net,
        divisor: effective_divisor(divisor),
        sale_net,
        markup_net,
        vat,
        gross,
        levy,
        component_value,
        markup_split,
        state_total,
    }
}

fn is_usable(divisor: Decimal) -> bool {
    divisor >= MIN_PRICING_DIVISOR
}

fn effective_divisor(divisor: Decimal) -> Decimal {
    if is_usable(divisor) {
        divisor
    } else {
        DEFAULT_PRICING_DIVISOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_divisor_is_one_and_a_half() {
        let m = allocate_material(1000, DEFAULT_PRICING_DIVISOR, dec!(0.19), &RateTable::default());
        assert_eq!(m.sale_net, 1500);
        assert_eq!(m.markup_net, 500);
        assert_eq!(m.vat, 285);
        assert_eq!(m.gross, 1785);
        assert_eq!(m.levy, 200);
        assert_eq!(m.component_value, 800);
        assert_eq!(m.markup_split.levies, 88);
        assert_eq!(m.markup_split.in_system, 412);
        assert_eq!(m.state_total, 573);
    }

    #[test]
    fn two_thirds_fast_path_rounds_half_up() {
        // 1001 × 1.5 = 1501.5 exactly
        assert_eq!(sale_net_for(1001, DEFAULT_PRICING_DIVISOR), 1502);
        assert_eq!(sale_net_for(1, DEFAULT_PRICING_DIVISOR), 2);
        // 2/3 computed at runtime takes the exact path too
        assert_eq!(sale_net_for(1, Decimal::from(2) / Decimal::from(3)), 2);
    }

    #[test]
    fn plain_division_outside_fast_path() {
        assert_eq!(sale_net_for(999, dec!(0.8)), 1249);
        assert_eq!(sale_net_for(1000, dec!(0.5)), 2000);
        assert_eq!(sale_net_for(1000, dec!(1)), 1000);
    }

    #[test]
    fn unusable_divisor_falls_back_to_default() {
        assert_eq!(sale_net_for(1000, dec!(0)), 1500);
        assert_eq!(sale_net_for(1000, dec!(-0.5)), 1500);
        assert_eq!(sale_net_for(1000, dec!(0.001)), 1500);
        let m = allocate_material(1000, dec!(0), dec!(0.19), &RateTable::default());
        assert_eq!(m.divisor, DEFAULT_PRICING_DIVISOR);
    }

    #[test]
    fn divisor_resolution_order() {
        assert_eq!(
            resolve_divisor(Some(dec!(0.8)), Some(dec!(0.5))),
            (dec!(0.8), DivisorSource::Item)
        );
        assert_eq!(
            resolve_divisor(None, Some(dec!(0.5))),
            (dec!(0.5), DivisorSource::Invoice)
        );
        assert_eq!(
            resolve_divisor(Some(dec!(0)), Some(dec!(0.5))),
            (dec!(0.5), DivisorSource::Invoice)
        );
        assert_eq!(
            resolve_divisor(Some(dec!(0)), None),
            (DEFAULT_PRICING_DIVISOR, DivisorSource::Default)
        );
    }

    #[test]
    fn markup_below_cost_is_negative() {
        // Divisor above 1 sells under cost; the engine keeps the arithmetic.
        let m = allocate_material(1000, dec!(1.25), dec!(0.19), &RateTable::default());
        assert_eq!(m.sale_net, 800);
        assert_eq!(m.markup_net, -200);
        assert_eq!(m.markup_split.thirds.sum(), -200);
        assert!(m.markup_split.levies >= 0);
    }

    #[test]
    fn zero_purchase() {
        let m = allocate_material(0, DEFAULT_PRICING_DIVISOR, dec!(0.19), &RateTable::default());
        assert_eq!(m.sale_net, 0);
        assert_eq!(m.state_total, 0);
        assert_eq!(m.markup_split.in_system, 0);
    }
}
