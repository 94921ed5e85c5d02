//! Cart
//!
//! Order lines keyed by their full configuration. Adding a configuration that
//! is already present merges into the existing line; the first add freezes
//! the unit price and display names for the life of the line.

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{AddOnSelection, MenuItem, Variation},
    pricing::{PricingError, unit_price},
};

pub mod identity;
pub mod line;

use identity::LineKey;
use line::{CartLine, ChosenAddOn, ChosenVariation};

/// Errors related to adding configurations to the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The item's currency differs from the cart currency (item currency, cart currency).
    #[error("Item has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Pricing the configuration failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Errors that can occur while totalling the cart.
#[derive(Debug, Error, PartialEq)]
pub enum TotalError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Cart
#[derive(Debug)]
pub struct Cart<'a> {
    lines: SmallVec<[CartLine<'a>; 4]>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: SmallVec::new(),
            currency,
        }
    }

    /// Add a configured item to the cart.
    ///
    /// The line key is derived from the canonicalised configuration. When a
    /// line with the same key already exists, its quantity is incremented
    /// and the frozen unit price is kept as-is. Adding zero units changes
    /// nothing; the would-be key is still returned.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the item is priced in a different
    ///   currency than the cart.
    /// - [`CartError::Pricing`]: the configuration could not be priced.
    pub fn add(
        &mut self,
        item: &MenuItem<'a>,
        variation: Option<&Variation<'a>>,
        add_ons: &[AddOnSelection<'a>],
        quantity: u32,
    ) -> Result<LineKey, CartError> {
        let key = LineKey::new(
            &item.id,
            variation.map(|variation| variation.id.as_str()),
            add_ons
                .iter()
                .map(|selection| (selection.add_on.id.as_str(), selection.quantity)),
        );

        if quantity == 0 {
            return Ok(key);
        }

        let item_currency = item.effective_price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self.lines.iter_mut().find(|line| *line.key() == key) {
            existing.add_quantity(quantity);

            debug!(item = %item.id, quantity = existing.quantity(), "merged cart line");

            return Ok(key);
        }

        let price = unit_price(item, variation, add_ons)?;

        let chosen_variation = variation.map(|variation| ChosenVariation {
            id: variation.id.clone(),
            name: variation.name.clone(),
        });

        let mut chosen_add_ons: SmallVec<[ChosenAddOn; 4]> = SmallVec::new();

        for selection in add_ons {
            if selection.quantity == 0 {
                continue;
            }

            match chosen_add_ons
                .iter_mut()
                .find(|chosen| chosen.id == selection.add_on.id)
            {
                Some(chosen) => {
                    chosen.quantity = chosen.quantity.saturating_add(selection.quantity);
                }
                None => chosen_add_ons.push(ChosenAddOn {
                    id: selection.add_on.id.clone(),
                    name: selection.add_on.name.clone(),
                    quantity: selection.quantity,
                }),
            }
        }

        self.lines.push(CartLine::new(
            key.clone(),
            item.name.clone(),
            chosen_variation,
            chosen_add_ons,
            price,
            quantity,
        ));

        debug!(item = %item.id, quantity, "added cart line");

        Ok(key)
    }

    /// Set the quantity of an existing line.
    ///
    /// Setting zero removes the line. Unknown keys change nothing.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.key() == key) {
            line.set_quantity(quantity);

            debug!(item = key.item_id(), quantity, "updated cart line");
        }
    }

    /// Remove a line from the cart. Unknown keys change nothing.
    pub fn remove(&mut self, key: &LineKey) {
        self.lines.retain(|line| line.key() != key);
    }

    /// Remove every line from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();

        debug!("cleared cart");
    }

    /// Get a line by key.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.key() == key)
    }

    /// Calculate the total of the cart. An empty cart totals zero.
    ///
    /// # Errors
    ///
    /// Returns a `TotalError` if there was a money arithmetic error.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalError> {
        let total = self
            .lines
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                acc.add(line.line_total())
            })?;

        Ok(total)
    }

    /// Iterate over the lines in the cart in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity()))
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
