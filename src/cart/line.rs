//! Cart lines
//!
//! A line freezes everything needed to redisplay and total an order at the
//! moment it is added. Catalog edits made afterwards do not reach back into
//! existing lines.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use super::identity::LineKey;

/// The variation chosen for a line, frozen for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenVariation {
    /// Catalog id of the variation.
    pub id: String,

    /// Display name at the time the line was added.
    pub name: String,
}

/// One add-on chosen for a line, frozen for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenAddOn {
    /// Catalog id of the add-on.
    pub id: String,

    /// Display name at the time the line was added.
    pub name: String,

    /// How many units of the add-on each item carries.
    pub quantity: u32,
}

/// One configured item in the cart, with its frozen unit price.
#[derive(Debug, Clone)]
pub struct CartLine<'a> {
    key: LineKey,
    name: String,
    variation: Option<ChosenVariation>,
    add_ons: SmallVec<[ChosenAddOn; 4]>,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    pub(crate) fn new(
        key: LineKey,
        name: String,
        variation: Option<ChosenVariation>,
        add_ons: SmallVec<[ChosenAddOn; 4]>,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            key,
            name,
            variation,
            add_ons,
            unit_price,
            quantity,
        }
    }

    /// Canonical identity of this line.
    #[must_use]
    pub fn key(&self) -> &LineKey {
        &self.key
    }

    /// Item display name frozen at add time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chosen variation, if any.
    #[must_use]
    pub fn variation(&self) -> Option<&ChosenVariation> {
        self.variation.as_ref()
    }

    /// Chosen add-ons in the order they were selected.
    #[must_use]
    pub fn add_ons(&self) -> &[ChosenAddOn] {
        &self.add_ons
    }

    /// Unit price frozen when the line was first added.
    #[must_use]
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Number of units of this configuration.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money<'a, Currency> {
        let minor = self
            .unit_price
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity));

        Money::from_minor(minor, self.unit_price.currency())
    }

    pub(crate) fn add_quantity(&mut self, extra: u32) {
        self.quantity = self.quantity.saturating_add(extra);
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}
