//! Pugon
//!
//! Pugon is a cart and checkout composition engine for small storefronts:
//! configured-item pricing, a merging cart, a two-step checkout over a
//! persisted draft, and plain-text order hand-off to a messaging channel.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod handoff;
pub mod order;
pub mod payments;
pub mod prelude;
pub mod pricing;
