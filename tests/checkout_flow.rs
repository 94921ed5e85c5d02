//! Integration tests for the storefront order flow

use rusty_money::{Money, iso::PHP};
use testresult::TestResult;

use pugon::{
    catalog::AddOnSelection,
    checkout::{
        Checkout, Step,
        draft::{CheckoutDraft, DraftPatch, FulfillmentKind, PickupSlot},
        store::MemoryDraftStore,
    },
    fixtures::Fixture,
    handoff::{HandoffOutcome, Messenger, Navigator, place_order},
    order::OrderSummary,
};

#[derive(Debug, Default)]
struct FakeNavigator {
    allow_popup: bool,
    opened: Vec<String>,
    redirected: Vec<String>,
}

impl Navigator for FakeNavigator {
    fn open_window(&mut self, url: &str) -> bool {
        self.opened.push(url.to_owned());
        self.allow_popup
    }

    fn redirect(&mut self, url: &str) {
        self.redirected.push(url.to_owned());
    }
}

#[test]
fn pandesal_order_reaches_messenger() -> TestResult {
    let fixture = Fixture::from_set("bakery")?;
    let mut cart = fixture.cart()?;

    let pandesal = fixture.menu_item("pandesal")?;
    let family = pandesal.variation("family").ok_or("missing family size")?;
    let cheese = pandesal.add_on("cheese").ok_or("missing cheese")?;

    cart.add(pandesal, Some(family), &[AddOnSelection::new(cheese, 2)], 3)?;

    // (50 + 30 + 5 x 2) x 3 = 270
    assert_eq!(cart.total()?, Money::from_minor(27_000, PHP));

    let mut checkout = Checkout::new(MemoryDraftStore::new());

    checkout.update(&DraftPatch {
        customer_name: Some("Ana Santos".to_owned()),
        contact_number: Some("0917 555 1234".to_owned()),
        pickup_slot: Some(PickupSlot::Mins15To20),
        ..DraftPatch::default()
    });
    checkout.default_payment_from(fixture.payment_methods());

    assert!(checkout.proceed_to_payment());
    assert_eq!(checkout.step(), Step::Payment);

    let payment = checkout.selected_payment(fixture.payment_methods());

    assert_eq!(payment.map(|method| method.name.as_str()), Some("GCash"));

    let total = cart.total()?;
    let summary = OrderSummary::new("Kuya Baker", checkout.draft(), cart.lines(), total, payment);
    let message = summary.compose()?;

    assert!(message.contains("• Pandesal (Family Size) + Cheese x2 x3 - ₱270"));
    assert!(message.contains("💰 TOTAL: ₱270"));
    assert!(message.contains("⏰ Pickup Time: 15-20 minutes"));
    assert!(message.contains("💳 Payment: GCash"));

    let messenger = Messenger::new("463644283495431");
    let mut navigator = FakeNavigator {
        allow_popup: true,
        ..FakeNavigator::default()
    };

    let outcome = place_order(&messenger, &mut navigator, &summary);

    assert_eq!(outcome, HandoffOutcome::Opened);

    let url = navigator.opened.first().ok_or("no window opened")?;

    assert!(url.starts_with("https://m.me/463644283495431?text="));
    assert!(url.contains("Pandesal%20(Family%20Size)"));

    Ok(())
}

#[test]
fn same_configuration_merges_across_adds() -> TestResult {
    let fixture = Fixture::from_set("bakery")?;
    let mut cart = fixture.cart()?;

    let pandesal = fixture.menu_item("pandesal")?;
    let family = pandesal.variation("family").ok_or("missing family size")?;
    let cheese = pandesal.add_on("cheese").ok_or("missing cheese")?;

    let first = cart.add(pandesal, Some(family), &[AddOnSelection::new(cheese, 2)], 2)?;
    let second = cart.add(pandesal, Some(family), &[AddOnSelection::new(cheese, 2)], 3)?;

    assert_eq!(first, second);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.item_count(), 5);
    assert_eq!(cart.total()?, Money::from_minor(45_000, PHP));

    Ok(())
}

#[test]
fn discounted_item_freezes_the_promo_price() -> TestResult {
    let fixture = Fixture::from_set("bakery")?;
    let mut cart = fixture.cart()?;

    let ensaymada = fixture.menu_item("ensaymada")?;

    let key = cart.add(ensaymada, None, &[], 2)?;
    let line = cart.line(&key).ok_or("line missing")?;

    // 55 promo price, not the 65 base
    assert_eq!(*line.unit_price(), Money::from_minor(5500, PHP));
    assert_eq!(cart.total()?, Money::from_minor(11_000, PHP));

    Ok(())
}

#[test]
fn details_guard_blocks_until_complete() {
    let mut checkout = Checkout::new(MemoryDraftStore::new());

    checkout.update(&DraftPatch {
        customer_name: Some("Ana Santos".to_owned()),
        pickup_slot: Some(PickupSlot::Mins15To20),
        ..DraftPatch::default()
    });

    assert!(!checkout.proceed_to_payment());
    assert_eq!(checkout.step(), Step::Details);

    checkout.update(&DraftPatch {
        contact_number: Some("0917 555 1234".to_owned()),
        ..DraftPatch::default()
    });

    assert!(checkout.proceed_to_payment());
    assert_eq!(checkout.step(), Step::Payment);
}

#[test]
fn returning_session_preselects_delivery() {
    let mut first = Checkout::new(MemoryDraftStore::new());

    first.update(&DraftPatch {
        customer_name: Some("Ben Reyes".to_owned()),
        contact_number: Some("0918 555 2345".to_owned()),
        fulfillment: Some(FulfillmentKind::Delivery),
        address: Some("14 Mabini St".to_owned()),
        delivery_date: Some("2026-09-01".to_owned()),
        ..DraftPatch::default()
    });

    let mut second = Checkout::new(first.into_store());

    assert_eq!(second.draft().fulfillment, FulfillmentKind::Delivery);
    assert_eq!(second.draft().address, "14 Mabini St");
    assert!(second.proceed_to_payment());
}

#[test]
fn late_persistence_read_does_not_clobber_edits() {
    let mut checkout = Checkout::new(MemoryDraftStore::new());

    checkout.update(&DraftPatch {
        customer_name: Some("Ana Santos".to_owned()),
        ..DraftPatch::default()
    });

    checkout.hydrate(CheckoutDraft {
        customer_name: "Someone Else".to_owned(),
        notes: "no onions".to_owned(),
        ..CheckoutDraft::default()
    });

    assert_eq!(checkout.draft().customer_name, "Ana Santos");
    assert_eq!(checkout.draft().notes, "no onions");
}

#[test]
fn cleared_payment_is_not_redefaulted() -> TestResult {
    let fixture = Fixture::from_set("bakery")?;
    let mut checkout = Checkout::new(MemoryDraftStore::new());

    checkout.default_payment_from(fixture.payment_methods());

    assert_eq!(checkout.draft().payment_method, "gcash");

    checkout.update(&DraftPatch {
        payment_method: Some(String::new()),
        ..DraftPatch::default()
    });
    checkout.default_payment_from(fixture.payment_methods());

    assert!(checkout.selected_payment(fixture.payment_methods()).is_none());

    Ok(())
}

#[test]
fn blocked_popup_still_reaches_the_chat() -> TestResult {
    let fixture = Fixture::from_set("bakery")?;
    let mut cart = fixture.cart()?;

    cart.add(fixture.menu_item("pan-de-coco")?, None, &[], 1)?;

    let mut checkout = Checkout::new(MemoryDraftStore::new());

    checkout.update(&DraftPatch {
        customer_name: Some("Cara".to_owned()),
        contact_number: Some("0917 555 9876".to_owned()),
        ..DraftPatch::default()
    });

    let total = cart.total()?;
    let summary = OrderSummary::new("Kuya Baker", checkout.draft(), cart.lines(), total, None);

    let messenger = Messenger::new("463644283495431");
    let mut navigator = FakeNavigator::default();

    let outcome = place_order(&messenger, &mut navigator, &summary);

    assert_eq!(outcome, HandoffOutcome::BlockedRedirect);
    assert_eq!(navigator.opened, navigator.redirected);

    Ok(())
}
