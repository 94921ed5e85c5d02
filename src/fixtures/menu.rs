//! Menu Fixtures

use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{
    catalog::{AddOn, MenuItem, Variation},
    fixtures::FixtureError,
};

/// Wrapper for a menu in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Menu items, in display order
    pub items: Vec<MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Short menu description
    #[serde(default)]
    pub description: String,

    /// Menu grouping key
    pub category: String,

    /// Regular price (e.g., "50.00 PHP")
    pub price: String,

    /// Promotional price, if the item ever goes on discount
    pub discount_price: Option<String>,

    /// Whether the promotional price is currently active
    #[serde(default)]
    pub on_discount: bool,

    /// Whether the item can currently be ordered
    #[serde(default = "default_available")]
    pub available: bool,

    /// Size variations, in display order
    #[serde(default)]
    pub variations: Vec<VariationFixture>,

    /// Add-ons, in display order
    #[serde(default)]
    pub add_ons: Vec<AddOnFixture>,
}

/// Variation Fixture
#[derive(Debug, Deserialize)]
pub struct VariationFixture {
    /// Variation identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Signed price delta (e.g., "30.00 PHP" or "-5.00 PHP")
    pub delta: String,
}

/// Add-On Fixture
#[derive(Debug, Deserialize)]
pub struct AddOnFixture {
    /// Add-on identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Grouping key for the customization sheet
    pub category: String,

    /// Price per unit (e.g., "10.00 PHP")
    pub price: String,
}

fn default_available() -> bool {
    true
}

impl TryFrom<MenuItemFixture> for MenuItem<'_> {
    type Error = FixtureError;

    fn try_from(fixture: MenuItemFixture) -> Result<Self, Self::Error> {
        let base_price = parse_price(&fixture.price)?;
        let currency = base_price.currency();

        let discount_price = fixture
            .discount_price
            .as_deref()
            .map(|price| same_currency(parse_price(price)?, currency))
            .transpose()?;

        let variations = fixture
            .variations
            .into_iter()
            .map(|variation| {
                Ok(Variation {
                    id: variation.id,
                    name: variation.name,
                    delta: same_currency(parse_price(&variation.delta)?, currency)?,
                })
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        let add_ons = fixture
            .add_ons
            .into_iter()
            .map(|add_on| {
                Ok(AddOn {
                    id: add_on.id,
                    name: add_on.name,
                    category: add_on.category,
                    price: same_currency(parse_price(&add_on.price)?, currency)?,
                })
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(MenuItem {
            id: fixture.id,
            name: fixture.name,
            description: fixture.description,
            category: fixture.category,
            base_price,
            discount_price,
            on_discount: fixture.on_discount,
            available: fixture.available,
            variations,
            add_ons,
        })
    }
}

/// Require a parsed price to share the item's base currency.
fn same_currency(
    price: Money<'static, Currency>,
    currency: &Currency,
) -> Result<Money<'static, Currency>, FixtureError> {
    if price.currency() == currency {
        Ok(price)
    } else {
        Err(FixtureError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            price.currency().iso_alpha_code.to_string(),
        ))
    }
}

/// Parse a price string (e.g., "50.00 PHP") into money
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency =
        iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    Money::from_str(amount, currency).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))
}
