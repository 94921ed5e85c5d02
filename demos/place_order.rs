//! Place Order Example
//!
//! This example walks the full storefront flow: load the bakery fixture set,
//! fill a cart, complete the two-step checkout, compose the order message,
//! and hand it off to the Messenger channel.
//!
//! Run with: `cargo run --example place_order`

use anyhow::{Result, anyhow};

use pugon::{
    catalog::AddOnSelection,
    checkout::{
        Checkout,
        draft::{DraftPatch, PickupSlot},
        store::MemoryDraftStore,
    },
    fixtures::Fixture,
    handoff::{Messenger, Navigator, place_order},
    order::OrderSummary,
};

/// Prints navigation instead of driving a browser window.
#[derive(Debug, Default)]
struct StdoutNavigator;

#[expect(clippy::print_stdout, reason = "Example code")]
impl Navigator for StdoutNavigator {
    fn open_window(&mut self, url: &str) -> bool {
        println!("\nOpen in a new window:\n{url}");
        true
    }

    fn redirect(&mut self, url: &str) {
        println!("\nRedirect to:\n{url}");
    }
}

/// Place Order Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let fixture = Fixture::from_set("bakery")?;
    let mut cart = fixture.cart()?;

    let pandesal = fixture.menu_item("pandesal")?;
    let family = pandesal
        .variation("family")
        .ok_or(anyhow!("family size not found"))?;
    let cheese = pandesal
        .add_on("cheese")
        .ok_or(anyhow!("cheese add-on not found"))?;

    cart.add(pandesal, Some(family), &[AddOnSelection::new(cheese, 2)], 3)?;
    cart.add(fixture.menu_item("ensaymada")?, None, &[], 2)?;

    let mut checkout = Checkout::new(MemoryDraftStore::new());

    checkout.update(&DraftPatch {
        customer_name: Some("Ana Santos".to_owned()),
        contact_number: Some("0917 555 1234".to_owned()),
        pickup_slot: Some(PickupSlot::Mins15To20),
        notes: Some("Birthday box, please add a candle".to_owned()),
        ..DraftPatch::default()
    });
    checkout.default_payment_from(fixture.payment_methods());

    if !checkout.proceed_to_payment() {
        return Err(anyhow!("checkout details are incomplete"));
    }

    let payment = checkout.selected_payment(fixture.payment_methods());
    let total = cart.total()?;
    let summary = OrderSummary::new("Kuya Baker", checkout.draft(), cart.lines(), total, payment);

    println!("{}", summary.compose()?);

    let messenger = Messenger::new("463644283495431");
    let mut navigator = StdoutNavigator;

    let outcome = place_order(&messenger, &mut navigator, &summary);

    println!("\nOutcome: {outcome:?}");

    Ok(())
}
