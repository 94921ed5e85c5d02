//! Checkout
//!
//! Two-step checkout flow (details, then payment) over a write-through
//! persisted draft. Validation never throws; a failed guard simply leaves the
//! step where it is.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::payments::PaymentMethod;

pub mod draft;
pub mod store;

use draft::{CheckoutDraft, DraftField, DraftPatch};
use store::DraftStore;

/// Checkout step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    /// Customer and fulfillment details.
    #[default]
    Details,

    /// Payment method selection. Hand-off happens from here; there is no
    /// further step.
    Payment,
}

/// Checkout session over a draft store.
#[derive(Debug)]
pub struct Checkout<S> {
    store: S,
    draft: CheckoutDraft,
    touched: FxHashSet<DraftField>,
    step: Step,
    payment_defaulted: bool,
}

impl<S: DraftStore> Checkout<S> {
    /// Start a session, seeding the draft from the store.
    pub fn new(store: S) -> Self {
        let draft = store.load();

        debug!(fulfillment = draft.fulfillment.id(), "seeded checkout draft");

        Checkout {
            store,
            draft,
            touched: FxHashSet::default(),
            step: Step::Details,
            payment_defaulted: false,
        }
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Current draft values.
    #[must_use]
    pub fn draft(&self) -> &CheckoutDraft {
        &self.draft
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// End the session, handing the store back.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Apply a field update, mark the fields touched, and write the same
    /// patch through to the store.
    ///
    /// The write-through is fire-and-forget and field-level; a partial
    /// multi-field persist is accepted.
    pub fn update(&mut self, patch: &DraftPatch) {
        let entries = patch.entries();

        if entries.is_empty() {
            return;
        }

        for (field, _) in &entries {
            self.touched.insert(*field);
        }

        // An explicit payment choice, including a clear, retires the
        // provider default.
        if patch.payment_method.is_some() {
            self.payment_defaulted = true;
        }

        self.draft.apply(patch);
        self.store.save(patch);

        debug!(fields = entries.len(), "updated checkout draft");
    }

    /// Fill untouched fields from a late-completing persistence read.
    ///
    /// Fields the customer has already edited this session win over the
    /// loaded values.
    pub fn hydrate(&mut self, loaded: CheckoutDraft) {
        if !self.touched.contains(&DraftField::CustomerName) {
            self.draft.customer_name = loaded.customer_name;
        }
        if !self.touched.contains(&DraftField::ContactNumber) {
            self.draft.contact_number = loaded.contact_number;
        }
        if !self.touched.contains(&DraftField::Fulfillment) {
            self.draft.fulfillment = loaded.fulfillment;
        }
        if !self.touched.contains(&DraftField::Address) {
            self.draft.address = loaded.address;
        }
        if !self.touched.contains(&DraftField::Landmark) {
            self.draft.landmark = loaded.landmark;
        }
        if !self.touched.contains(&DraftField::PickupSlot) {
            self.draft.pickup_slot = loaded.pickup_slot;
        }
        if !self.touched.contains(&DraftField::CustomTime) {
            self.draft.custom_time = loaded.custom_time;
        }
        if !self.touched.contains(&DraftField::PartySize) {
            self.draft.party_size = loaded.party_size;
        }
        if !self.touched.contains(&DraftField::DineInDate) {
            self.draft.dine_in_date = loaded.dine_in_date;
        }
        if !self.touched.contains(&DraftField::DeliveryDate) {
            self.draft.delivery_date = loaded.delivery_date;
        }
        if !self.touched.contains(&DraftField::PaymentMethod) {
            self.draft.payment_method = loaded.payment_method;
        }
        if !self.touched.contains(&DraftField::Notes) {
            self.draft.notes = loaded.notes;
        }
    }

    /// One-shot payment default from the provider's ordered list.
    ///
    /// On the first non-empty collection, selects the first method if none is
    /// selected yet. Applied at most once per session; an explicit choice or
    /// clear beforehand retires it, and an empty collection leaves it armed.
    pub fn default_payment_from(&mut self, methods: &[PaymentMethod]) {
        if self.payment_defaulted || methods.is_empty() {
            return;
        }

        self.payment_defaulted = true;

        if !self.draft.payment_method.is_empty() {
            return;
        }

        if let Some(first) = methods.first() {
            debug!(method = %first.id, "defaulted payment method");

            self.update(&DraftPatch {
                payment_method: Some(first.id.clone()),
                ..DraftPatch::default()
            });
        }
    }

    /// Resolve the draft's selected method against the provider list.
    #[must_use]
    pub fn selected_payment<'m>(&self, methods: &'m [PaymentMethod]) -> Option<&'m PaymentMethod> {
        if self.draft.payment_method.is_empty() {
            return None;
        }

        methods
            .iter()
            .find(|method| method.id == self.draft.payment_method)
    }

    /// Whether the details step is complete enough to proceed.
    ///
    /// Requires a customer name and contact number, plus whatever the active
    /// fulfillment kind requires.
    #[must_use]
    pub fn is_details_valid(&self) -> bool {
        !self.draft.customer_name.is_empty()
            && !self.draft.contact_number.is_empty()
            && self.draft.fulfillment_view().is_complete()
    }

    /// Try to advance to the payment step.
    ///
    /// Returns whether the transition happened; a failed guard leaves the
    /// step unchanged.
    pub fn proceed_to_payment(&mut self) -> bool {
        if !self.is_details_valid() {
            debug!("rejected transition to payment");

            return false;
        }

        self.step = Step::Payment;

        debug!("advanced to payment");

        true
    }

    /// Go back to the details step. Never guarded; all field values are
    /// retained in both directions.
    pub fn back_to_details(&mut self) {
        self.step = Step::Details;
    }
}
