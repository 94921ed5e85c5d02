//! Pricing
//!
//! Computes the per-unit price of a configured menu item. The calculation is
//! pure catalog arithmetic; later catalog changes are invisible to lines
//! already priced.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::catalog::{AddOnSelection, MenuItem, Variation};

/// Errors that can occur while pricing a configured item.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Wrapped money arithmetic error, usually a currency mismatch.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the unit price of one configured menu item.
///
/// Starts from the item's effective price (discounted while a discount is
/// active, base otherwise), adds the variation delta when a variation is
/// selected, then adds price × quantity for every selected add-on. Absent
/// optionals and zero-quantity selections contribute nothing.
///
/// # Errors
///
/// - [`PricingError::Money`]: money arithmetic failed, e.g. a variation or
///   add-on priced in a different currency than the item.
pub fn unit_price<'a>(
    item: &MenuItem<'a>,
    variation: Option<&Variation<'a>>,
    add_ons: &[AddOnSelection<'a>],
) -> Result<Money<'a, Currency>, PricingError> {
    let mut total = item.effective_price();

    if let Some(variation) = variation {
        total = total.add(variation.delta)?;
    }

    for selection in add_ons {
        if selection.quantity == 0 {
            continue;
        }

        let price = selection.add_on.price;

        // Minor-unit totals for a storefront never approach i64 range.
        let minor = price
            .to_minor_units()
            .saturating_mul(i64::from(selection.quantity));

        total = total.add(Money::from_minor(minor, price.currency()))?;
    }

    Ok(total)
}
