use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Cents, RateTable, SplitMode};
use crate::split::{NetSplit, apply_rate, net_split};

/// Labor value grossed up with VAT and split four ways.
///
/// `split.worker_net + split.entrepreneur_net + split.impact + state == gross`
/// holds exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossUp {
    pub net: Cents,
    /// Output VAT on the net labor value.
    pub vat_out: Cents,
    pub gross: Cents,
    pub split: NetSplit,
    /// Output VAT less recovered input VAT, never negative.
    pub vat_payable: Cents,
    /// Worker levies + employer social + profit tax + VAT payable.
    pub state_base: Cents,
    /// Rounding residue folded into the state share.
    pub delta: Cents,
    /// Everything that leaves the system to the state.
    pub state: Cents,
}

impl GrossUp {
    /// Value staying in the closed system.
    pub fn in_system(&self) -> Cents {
        self.split.in_system
    }
}

/// Gross up a net labor amount and allocate the gross.
///
/// ```
/// use wertfluss::{gross_up, RateTable};
/// use rust_decimal_macros::dec;
///
/// let g = gross_up(3000, dec!(0.19), &RateTable::default());
/// assert_eq!(g.gross, 3570);
/// assert_eq!(g.state, 1102);
/// ```
pub fn gross_up(net_labor: Cents, vat_rate: Decimal, rates: &RateTable) -> GrossUp {
    let vat_out = apply_rate(net_labor, vat_rate);
    let gross = net_labor + vat_out;

    let split = net_split(net_labor, SplitMode::Labor, rates);

    let vat_payable = (vat_out - split.recovered_vat).max(0);
    let state_base = split.worker_levies + split.employer_social + split.profit_tax + vat_payable;

    let delta = gross - (split.worker_net + split.entrepreneur_net + split.impact + state_base);
    let state = state_base + delta;

    GrossUp {
        net: net_labor,
        vat_out,
        gross,
        split,
        vat_payable,
        state_base,
        delta,
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn four_way(g: &GrossUp) -> Cents {
        g.split.worker_net + g.split.entrepreneur_net + g.split.impact + g.state
    }

    #[test]
    fn labor_3000_at_19_percent() {
        let g = gross_up(3000, dec!(0.19), &RateTable::default());
        assert_eq!(g.vat_out, 570);
        assert_eq!(g.gross, 3570);
        assert_eq!(g.vat_payable, 510);
        assert_eq!(g.state_base, 1102);
        assert_eq!(g.delta, 0);
        assert_eq!(g.state, 1102);
        assert_eq!(four_way(&g), 3570);
    }

    #[test]
    fn labor_6750_at_19_percent() {
        let g = gross_up(6750, dec!(0.19), &RateTable::default());
        assert_eq!(g.vat_out, 1283);
        assert_eq!(g.gross, 8033);
        assert_eq!(g.in_system(), 5553);
        assert_eq!(g.state, 2480);
        assert_eq!(four_way(&g), 8033);
    }

    #[test]
    fn zero_vat_has_no_vat_payable() {
        let g = gross_up(3000, dec!(0), &RateTable::default());
        assert_eq!(g.gross, 3000);
        assert_eq!(g.vat_payable, 0);
        assert_eq!(four_way(&g), 3000);
    }

    #[test]
    fn delta_absorbs_rounding() {
        for net in [1, 2, 7, 99, 1001, 33_333, 987_654] {
            let g = gross_up(net, dec!(0.07), &RateTable::default());
            assert_eq!(four_way(&g), g.gross, "net={net}");
            assert_eq!(g.state, g.state_base + g.delta);
        }
    }

    #[test]
    fn zero_net() {
        let g = gross_up(0, dec!(0.19), &RateTable::default());
        assert_eq!(g.gross, 0);
        assert_eq!(g.state, 0);
        assert_eq!(g.in_system(), 0);
    }
}
