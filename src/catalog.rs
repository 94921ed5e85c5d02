//! Menu catalog
//!
//! Data provided by the storefront's catalog source: menu items with their
//! size variations and add-ons. The catalog is read-only as far as this
//! crate is concerned; carts snapshot whatever prices are current at
//! add-time.

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Menu Item Key
    pub struct MenuItemKey;
}

/// A single orderable menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<'a> {
    /// Catalog identifier (stable across sessions).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description shown on the menu.
    pub description: String,

    /// Menu grouping key (e.g. "breads", "pastries").
    pub category: String,

    /// Regular unit price.
    pub base_price: Money<'a, Currency>,

    /// Promotional price, used only while `on_discount` is set.
    pub discount_price: Option<Money<'a, Currency>>,

    /// Whether the promotional price is currently active.
    pub on_discount: bool,

    /// Whether the item can currently be ordered.
    pub available: bool,

    /// Size variations, in display order.
    pub variations: Vec<Variation<'a>>,

    /// Optional add-ons, grouped by their `category` at display time.
    pub add_ons: Vec<AddOn<'a>>,
}

impl<'a> MenuItem<'a> {
    /// The price a new cart line starts from: the discount price while a
    /// discount is active and priced, otherwise the base price.
    pub fn effective_price(&self) -> Money<'a, Currency> {
        match self.discount_price {
            Some(discounted) if self.on_discount => discounted,
            _ => self.base_price,
        }
    }

    /// Whether the item has anything to customize.
    pub fn customizable(&self) -> bool {
        !self.variations.is_empty() || !self.add_ons.is_empty()
    }

    /// Look up a variation by id.
    pub fn variation(&self, id: &str) -> Option<&Variation<'a>> {
        self.variations.iter().find(|v| v.id == id)
    }

    /// Look up an add-on by id.
    pub fn add_on(&self, id: &str) -> Option<&AddOn<'a>> {
        self.add_ons.iter().find(|a| a.id == id)
    }

    /// Add-ons grouped by category, categories in first-seen order.
    pub fn add_ons_by_category(&self) -> Vec<(&str, Vec<&AddOn<'a>>)> {
        let mut groups: Vec<(&str, Vec<&AddOn<'a>>)> = Vec::new();

        for add_on in &self.add_ons {
            match groups.iter_mut().find(|(c, _)| *c == add_on.category) {
                Some((_, members)) => members.push(add_on),
                None => groups.push((add_on.category.as_str(), vec![add_on])),
            }
        }

        groups
    }
}

/// A size variation of a menu item.
///
/// The delta is added to the item's effective price and may be zero or
/// negative (a smaller size can undercut the base).
#[derive(Debug, Clone, PartialEq)]
pub struct Variation<'a> {
    /// Variation identifier, unique within its item.
    pub id: String,

    /// Display name (e.g. "Family Size").
    pub name: String,

    /// Signed price delta relative to the item's effective price.
    pub delta: Money<'a, Currency>,
}

/// An optional extra for a menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOn<'a> {
    /// Add-on identifier, unique within its item.
    pub id: String,

    /// Display name (e.g. "Cheese").
    pub name: String,

    /// Grouping key for the customization sheet (e.g. "fillings").
    pub category: String,

    /// Price per unit of the add-on; zero means free.
    pub price: Money<'a, Currency>,
}

/// An add-on chosen for a cart line, with how many units of it.
///
/// A selection only exists for chosen add-ons; "not chosen" is expressed by
/// absence, never by a zero quantity. Callers that do hand over a zero
/// quantity get the same treatment as absence.
#[derive(Debug, Clone, Copy)]
pub struct AddOnSelection<'a> {
    /// The catalog add-on being selected.
    pub add_on: &'a AddOn<'a>,

    /// Units of the add-on, at least 1 for a meaningful selection.
    pub quantity: u32,
}

impl<'a> AddOnSelection<'a> {
    /// Select `quantity` units of an add-on.
    pub fn new(add_on: &'a AddOn<'a>, quantity: u32) -> Self {
        Self { add_on, quantity }
    }
}
