//! Pugon prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError, TotalError,
        identity::LineKey,
        line::{CartLine, ChosenAddOn, ChosenVariation},
    },
    catalog::{AddOn, AddOnSelection, MenuItem, MenuItemKey, Variation},
    checkout::{
        Checkout, Step,
        draft::{CheckoutDraft, DraftField, DraftPatch, Fulfillment, FulfillmentKind, PickupSlot},
        store::{DraftStore, MemoryDraftStore},
    },
    fixtures::{Fixture, FixtureError},
    handoff::{HandoffOutcome, Messenger, Navigator, place_order},
    order::{ComposeError, OrderSummary, display_amount},
    payments::PaymentMethod,
    pricing::{PricingError, unit_price},
};
