//! # wertfluss
//!
//! Deterministic, cent-exact allocation of an invoice's value into
//! transparent stakeholder shares: worker, entrepreneur, a shared impact
//! pool, and the state (social contributions, taxes, VAT net of recovered
//! input VAT).
//!
//! All amounts are integer cents; every fractional rate is a
//! [`rust_decimal::Decimal`], never floating point. Rounding is half away
//! from zero at each step, and every split that must conserve its input does
//! so exactly, with residues folded into the state share.
//!
//! ## Quick Start
//!
//! ```rust
//! use wertfluss::core::*;
//! use wertfluss::evaluate_invoice;
//! use rust_decimal_macros::dec;
//!
//! let input = InvoiceInputBuilder::new(4500) // 45.00 per hour net
//!     .minutes(90)
//!     .impact_shares(dec!(0.5), dec!(0.3))
//!     .add_material(MaterialInputBuilder::new("m1", "Kupferrohr").purchase_net(1000).build())
//!     .build()
//!     .unwrap();
//!
//! let totals = evaluate_invoice(&input, &RateTable::default());
//! assert_eq!(totals.net_total, 6750 + 1500);
//! assert_eq!(
//!     totals.service_value_add + totals.component_value_sum + totals.state_total,
//!     totals.gross_total
//! );
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Input types, rate table, splitting primitives, engines |
//! | `json` | Loading loosely-typed JSON invoice records |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod split;

#[cfg(feature = "core")]
pub mod engine;

#[cfg(feature = "json")]
pub mod record;

// Re-export the main types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
#[cfg(feature = "core")]
pub use crate::engine::*;
#[cfg(feature = "core")]
pub use crate::split::*;
