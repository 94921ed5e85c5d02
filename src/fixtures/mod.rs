//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{MenuItem, MenuItemKey},
    fixtures::{menu::MenuFixture, payments::PaymentsFixture},
    payments::PaymentMethod,
};

pub mod menu;
pub mod payments;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between menu prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Menu item not found
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    /// Two menu items share an id
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(String),

    /// No menu loaded yet
    #[error("No menu loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// `SlotMap` storing the actual items with generated keys
    menu: SlotMap<MenuItemKey, MenuItem<'a>>,

    /// String id -> `SlotMap` key mapping for lookups
    menu_keys: FxHashMap<String, MenuItemKey>,

    /// Keys in menu display order
    menu_order: Vec<MenuItemKey>,

    /// Payment methods in the provider's display order
    payment_methods: Vec<PaymentMethod>,

    /// Currency for the fixture set
    currency: Option<&'static rusty_money::iso::Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            menu: SlotMap::with_key(),
            menu_keys: FxHashMap::default(),
            menu_order: Vec::new(),
            payment_methods: Vec::new(),
            currency: None,
        }
    }

    /// Load menu items from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an item id
    /// repeats, or if there are currency mismatches.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("menu").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: MenuFixture = serde_norway::from_str(&contents)?;

        for item_fixture in fixture.items {
            // Parse to get currency first (before creating the item)
            let price = menu::parse_price(&item_fixture.price)?;
            let currency = price.currency();

            // Validate currency consistency
            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            if self.menu_keys.contains_key(&item_fixture.id) {
                return Err(FixtureError::DuplicateItem(item_fixture.id));
            }

            // Now create the item
            let item: MenuItem<'a> = item_fixture.try_into()?;
            let id = item.id.clone();
            let key = self.menu.insert(item);

            self.menu_keys.insert(id, key);
            self.menu_order.push(key);
        }

        Ok(self)
    }

    /// Load payment methods from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_payment_methods(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("payments").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: PaymentsFixture = serde_norway::from_str(&contents)?;

        self.payment_methods.extend(fixture.methods);

        Ok(self)
    }

    /// Load a complete fixture set (menu and payment methods with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_menu(name)?.load_payment_methods(name)?;

        Ok(fixture)
    }

    /// Get a menu item by its string id
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found.
    pub fn menu_item(&self, id: &str) -> Result<&MenuItem<'a>, FixtureError> {
        let key = self
            .menu_keys
            .get(id)
            .ok_or_else(|| FixtureError::ItemNotFound(id.to_string()))?;

        self.menu
            .get(*key)
            .ok_or_else(|| FixtureError::ItemNotFound(id.to_string()))
    }

    /// Get a menu item key by its string id
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found.
    pub fn menu_key(&self, id: &str) -> Result<MenuItemKey, FixtureError> {
        self.menu_keys
            .get(id)
            .copied()
            .ok_or_else(|| FixtureError::ItemNotFound(id.to_string()))
    }

    /// Iterate over menu items in display order
    pub fn menu(&self) -> impl Iterator<Item = &MenuItem<'a>> {
        self.menu_order.iter().filter_map(|key| self.menu.get(*key))
    }

    /// Menu categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for item in self.menu() {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }

        categories
    }

    /// Get all payment methods
    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    /// Create an empty cart in the fixture set's currency
    ///
    /// # Errors
    ///
    /// Returns an error if no menu has been loaded yet.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        Ok(Cart::new(currency))
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no menu has been loaded yet.
    pub fn currency(&self) -> Result<&'static rusty_money::iso::Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Get the menu `SlotMap`
    pub fn menu_map(&self) -> &SlotMap<MenuItemKey, MenuItem<'a>> {
        &self.menu
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
