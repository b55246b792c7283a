//! Allocation engines: labor gross-up, material markup, and invoice
//! aggregation with final reconciliation.
//!
//! Every function here is pure and infallible. Outputs depend only on the
//! inputs and the [`RateTable`](crate::core::RateTable) passed in, so the
//! same invoice evaluated twice, or on two threads at once, yields identical
//! cents.
//!
//! # Example
//!
//! ```
//! use wertfluss::core::*;
//! use wertfluss::engine::*;
//! use rust_decimal_macros::dec;
//!
//! let rates = RateTable::default();
//! let labor = gross_up(3000, dec!(0.19), &rates);
//! let worker_entrepreneur_impact =
//!     labor.split.worker_net + labor.split.entrepreneur_net + labor.split.impact;
//! assert_eq!(worker_entrepreneur_impact + labor.state, labor.gross);
//! ```

mod gross_up;
mod invoice;
mod material;

pub use gross_up::{GrossUp, gross_up};
pub use invoice::{
    ImpactBreakdown, InvoiceTotals, MaterialLine, SubAllocation, aggregate_invoice,
    evaluate_invoice, split_impact,
};
pub use material::{
    DivisorSource, MaterialAllocation, allocate_material, resolve_divisor, sale_net_for,
};
