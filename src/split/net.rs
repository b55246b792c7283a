use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::thirds::{Thirds, split_thirds};
use super::weighted::CostBlocks;
use crate::core::{Cents, RateTable, SplitMode, round_half_up};

/// Allocation of a net amount into worker, entrepreneur, and impact shares
/// with the levies taken out of each.
///
/// Sub-steps round independently, so `worker_net + entrepreneur_net + impact
/// + levies` may differ from `net` by a few cents. Callers that need exact
/// conservation reconcile against their own target total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSplit {
    /// The amount that was split.
    pub net: Cents,
    /// Raw thirds before any deduction.
    pub thirds: Thirds,
    /// Worker social contributions and wage tax.
    pub worker_levies: Cents,
    pub worker_net: Cents,
    pub employer_social: Cents,
    /// Vacation and sick-pay provision, kept by the entrepreneur.
    pub vacation: Cents,
    /// Entrepreneur third after employer social and vacation, by cost block.
    pub blocks: CostBlocks,
    pub profit_tax: Cents,
    pub profit_net: Cents,
    /// Input VAT recovered on the operations and logistics blocks.
    pub recovered_vat: Cents,
    pub entrepreneur_net: Cents,
    pub impact: Cents,
    /// Levies leaving the system, never negative.
    pub levies: Cents,
    /// Value staying in the closed system: worker + entrepreneur + impact.
    pub in_system: Cents,
}

/// Split a net amount into stakeholder shares.
///
/// ```
/// use wertfluss::{net_split, RateTable, SplitMode};
///
/// let split = net_split(3000, SplitMode::Labor, &RateTable::default());
/// assert_eq!(split.worker_net, 650);
/// assert_eq!(split.entrepreneur_net, 818);
/// assert_eq!(split.impact, 1000);
/// ```
pub fn net_split(net: Cents, mode: SplitMode, rates: &RateTable) -> NetSplit {
    let thirds = split_thirds(net, mode);

    let worker_levies = apply_rate(thirds.worker, rates.worker_levy_rate());
    let worker_net = thirds.worker - worker_levies;

    let employer_social = apply_rate(thirds.entrepreneur, rates.employer_social_rate);
    let vacation = apply_rate(thirds.entrepreneur, rates.vacation_rate);
    let remaining = thirds.entrepreneur - employer_social - vacation;

    let blocks = CostBlocks::allocate(remaining, &rates.weights);

    let profit_tax = apply_rate(blocks.profit, rates.profit_tax_rate);
    let profit_net = blocks.profit - profit_tax;

    let recovered_vat = round_half_up(
        Decimal::from(blocks.operations) * rates.ops_vat_recovery_rate
            + Decimal::from(blocks.logistics) * rates.logistics_vat_recovery_rate,
    );

    let entrepreneur_net =
        vacation + blocks.operations + blocks.logistics + blocks.risk + profit_net + recovered_vat;
    let levies = (worker_levies + employer_social + profit_tax - recovered_vat).max(0);

    let impact = thirds.impact;
    let in_system = worker_net + entrepreneur_net + impact;

    NetSplit {
        net,
        thirds,
        worker_levies,
        worker_net,
        employer_social,
        vacation,
        blocks,
        profit_tax,
        profit_net,
        recovered_vat,
        entrepreneur_net,
        impact,
        levies,
        in_system,
    }
}

/// `round(amount × rate)`, half away from zero.
pub(crate) fn apply_rate(amount: Cents, rate: Decimal) -> Cents {
    round_half_up(Decimal::from(amount) * rate)
}
