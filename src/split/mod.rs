//! Cent-exact splitting primitives.
//!
//! [`split_thirds`] and [`allocate_weighted`] conserve every cent;
//! [`net_split`] builds the stakeholder split on top of them.

mod net;
mod thirds;
mod weighted;

pub(crate) use net::apply_rate;
pub use net::{NetSplit, net_split};
pub use thirds::{Thirds, split_thirds};
pub use weighted::{CostBlocks, allocate_weighted};
