//! Checkout draft
//!
//! The in-progress order form. The draft is a flat record so persistence can
//! round-trip every field regardless of the active fulfillment kind; the
//! [`Fulfillment`] view narrows it to the fields that kind actually uses.

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FulfillmentKind {
    /// Collect at the store counter.
    #[default]
    Pickup,

    /// Courier to the customer's address.
    Delivery,

    /// Eat on site.
    DineIn,
}

impl FulfillmentKind {
    /// Every fulfillment kind, in display order.
    pub const ALL: [FulfillmentKind; 3] = [
        FulfillmentKind::Pickup,
        FulfillmentKind::Delivery,
        FulfillmentKind::DineIn,
    ];

    /// Resolve a persisted id. Unknown ids are `None`.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "pickup" => Some(FulfillmentKind::Pickup),
            "delivery" => Some(FulfillmentKind::Delivery),
            "dine-in" => Some(FulfillmentKind::DineIn),
            _ => None,
        }
    }

    /// Stable id used by persistence.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            FulfillmentKind::Pickup => "pickup",
            FulfillmentKind::Delivery => "delivery",
            FulfillmentKind::DineIn => "dine-in",
        }
    }

    /// Capitalised label used in the composed message.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FulfillmentKind::Pickup => "Pickup",
            FulfillmentKind::Delivery => "Delivery",
            FulfillmentKind::DineIn => "Dine-in",
        }
    }
}

/// Pickup time bracket offered at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PickupSlot {
    /// Ready in 5-10 minutes.
    #[default]
    Mins5To10,

    /// Ready in 10-15 minutes.
    Mins10To15,

    /// Ready in 15-20 minutes.
    Mins15To20,

    /// Ready in 20-30 minutes.
    Mins20To30,

    /// Customer supplies a free-text time.
    Custom,
}

impl PickupSlot {
    /// Every bracket, in display order.
    pub const ALL: [PickupSlot; 5] = [
        PickupSlot::Mins5To10,
        PickupSlot::Mins10To15,
        PickupSlot::Mins15To20,
        PickupSlot::Mins20To30,
        PickupSlot::Custom,
    ];

    /// Resolve a persisted id. Unknown ids are `None`.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "5-10" => Some(PickupSlot::Mins5To10),
            "10-15" => Some(PickupSlot::Mins10To15),
            "15-20" => Some(PickupSlot::Mins15To20),
            "20-30" => Some(PickupSlot::Mins20To30),
            "custom" => Some(PickupSlot::Custom),
            _ => None,
        }
    }

    /// Stable id used by persistence.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            PickupSlot::Mins5To10 => "5-10",
            PickupSlot::Mins10To15 => "10-15",
            PickupSlot::Mins15To20 => "15-20",
            PickupSlot::Mins20To30 => "20-30",
            PickupSlot::Custom => "custom",
        }
    }

    /// Label used in the composed message.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PickupSlot::Mins5To10 => "5-10 minutes",
            PickupSlot::Mins10To15 => "10-15 minutes",
            PickupSlot::Mins15To20 => "15-20 minutes",
            PickupSlot::Mins20To30 => "20-30 minutes",
            PickupSlot::Custom => "Custom time",
        }
    }
}

/// One draft field, used to address persisted values and track touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// Customer's full name.
    CustomerName,

    /// Customer's contact number.
    ContactNumber,

    /// Fulfillment kind.
    Fulfillment,

    /// Delivery address.
    Address,

    /// Optional delivery landmark.
    Landmark,

    /// Pickup time bracket.
    PickupSlot,

    /// Free-text pickup time when the bracket is custom.
    CustomTime,

    /// Dine-in party size.
    PartySize,

    /// Dine-in preferred date.
    DineInDate,

    /// Delivery date.
    DeliveryDate,

    /// Selected payment method id.
    PaymentMethod,

    /// Free-text order notes.
    Notes,
}

impl DraftField {
    /// Every field, in draft order.
    pub const ALL: [DraftField; 12] = [
        DraftField::CustomerName,
        DraftField::ContactNumber,
        DraftField::Fulfillment,
        DraftField::Address,
        DraftField::Landmark,
        DraftField::PickupSlot,
        DraftField::CustomTime,
        DraftField::PartySize,
        DraftField::DineInDate,
        DraftField::DeliveryDate,
        DraftField::PaymentMethod,
        DraftField::Notes,
    ];

    /// Stable key persistence backends store this field under.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            DraftField::CustomerName => "customer_name",
            DraftField::ContactNumber => "contact_number",
            DraftField::Fulfillment => "service_type",
            DraftField::Address => "address",
            DraftField::Landmark => "landmark",
            DraftField::PickupSlot => "pickup_time",
            DraftField::CustomTime => "custom_time",
            DraftField::PartySize => "party_size",
            DraftField::DineInDate => "dine_in_date",
            DraftField::DeliveryDate => "delivery_date",
            DraftField::PaymentMethod => "payment_method",
            DraftField::Notes => "notes",
        }
    }
}

/// The in-progress order form.
///
/// Fields irrelevant to the active fulfillment kind are retained so switching
/// kinds never loses input and persistence stays total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDraft {
    /// Customer's full name.
    pub customer_name: String,

    /// Customer's contact number.
    pub contact_number: String,

    /// How the order will be fulfilled.
    pub fulfillment: FulfillmentKind,

    /// Delivery address.
    pub address: String,

    /// Optional delivery landmark.
    pub landmark: String,

    /// Pickup time bracket.
    pub pickup_slot: PickupSlot,

    /// Free-text pickup time when the bracket is custom.
    pub custom_time: String,

    /// Dine-in party size.
    pub party_size: u32,

    /// Dine-in preferred date, `YYYY-MM-DD`.
    pub dine_in_date: String,

    /// Delivery date, `YYYY-MM-DD`.
    pub delivery_date: String,

    /// Selected payment method id. Empty until chosen or defaulted.
    pub payment_method: String,

    /// Free-text order notes.
    pub notes: String,
}

impl Default for CheckoutDraft {
    fn default() -> Self {
        CheckoutDraft {
            customer_name: String::new(),
            contact_number: String::new(),
            fulfillment: FulfillmentKind::default(),
            address: String::new(),
            landmark: String::new(),
            pickup_slot: PickupSlot::default(),
            custom_time: String::new(),
            party_size: 1,
            dine_in_date: String::new(),
            delivery_date: String::new(),
            payment_method: String::new(),
            notes: String::new(),
        }
    }
}

impl CheckoutDraft {
    /// Decode a draft from persisted field values.
    ///
    /// Missing or unparseable values fall back to the field's default, the
    /// same way a fresh session starts.
    #[must_use]
    pub fn from_fields<F>(mut get: F) -> Self
    where
        F: FnMut(DraftField) -> Option<String>,
    {
        CheckoutDraft {
            customer_name: get(DraftField::CustomerName).unwrap_or_default(),
            contact_number: get(DraftField::ContactNumber).unwrap_or_default(),
            fulfillment: get(DraftField::Fulfillment)
                .and_then(|value| FulfillmentKind::from_id(&value))
                .unwrap_or_default(),
            address: get(DraftField::Address).unwrap_or_default(),
            landmark: get(DraftField::Landmark).unwrap_or_default(),
            pickup_slot: get(DraftField::PickupSlot)
                .and_then(|value| PickupSlot::from_id(&value))
                .unwrap_or_default(),
            custom_time: get(DraftField::CustomTime).unwrap_or_default(),
            party_size: get(DraftField::PartySize)
                .and_then(|value| value.parse().ok())
                .filter(|&size| size >= 1)
                .unwrap_or(1),
            dine_in_date: get(DraftField::DineInDate).unwrap_or_default(),
            delivery_date: get(DraftField::DeliveryDate).unwrap_or_default(),
            payment_method: get(DraftField::PaymentMethod).unwrap_or_default(),
            notes: get(DraftField::Notes).unwrap_or_default(),
        }
    }

    /// Overwrite the fields a patch carries, leaving the rest untouched.
    pub fn apply(&mut self, patch: &DraftPatch) {
        if let Some(value) = &patch.customer_name {
            self.customer_name.clone_from(value);
        }
        if let Some(value) = &patch.contact_number {
            self.contact_number.clone_from(value);
        }
        if let Some(value) = patch.fulfillment {
            self.fulfillment = value;
        }
        if let Some(value) = &patch.address {
            self.address.clone_from(value);
        }
        if let Some(value) = &patch.landmark {
            self.landmark.clone_from(value);
        }
        if let Some(value) = patch.pickup_slot {
            self.pickup_slot = value;
        }
        if let Some(value) = &patch.custom_time {
            self.custom_time.clone_from(value);
        }
        if let Some(value) = patch.party_size {
            self.party_size = value;
        }
        if let Some(value) = &patch.dine_in_date {
            self.dine_in_date.clone_from(value);
        }
        if let Some(value) = &patch.delivery_date {
            self.delivery_date.clone_from(value);
        }
        if let Some(value) = &patch.payment_method {
            self.payment_method.clone_from(value);
        }
        if let Some(value) = &patch.notes {
            self.notes.clone_from(value);
        }
    }

    /// View the fulfillment-specific fields for the active kind.
    #[must_use]
    pub fn fulfillment_view(&self) -> Fulfillment<'_> {
        match self.fulfillment {
            FulfillmentKind::Pickup => Fulfillment::Pickup {
                slot: self.pickup_slot,
                custom_time: &self.custom_time,
            },
            FulfillmentKind::Delivery => Fulfillment::Delivery {
                address: &self.address,
                landmark: (!self.landmark.is_empty()).then_some(self.landmark.as_str()),
                date: &self.delivery_date,
            },
            FulfillmentKind::DineIn => Fulfillment::DineIn {
                party_size: self.party_size,
                date: &self.dine_in_date,
            },
        }
    }
}

/// A partial draft update; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    /// Customer's full name.
    pub customer_name: Option<String>,

    /// Customer's contact number.
    pub contact_number: Option<String>,

    /// Fulfillment kind.
    pub fulfillment: Option<FulfillmentKind>,

    /// Delivery address.
    pub address: Option<String>,

    /// Optional delivery landmark.
    pub landmark: Option<String>,

    /// Pickup time bracket.
    pub pickup_slot: Option<PickupSlot>,

    /// Free-text pickup time when the bracket is custom.
    pub custom_time: Option<String>,

    /// Dine-in party size.
    pub party_size: Option<u32>,

    /// Dine-in preferred date.
    pub dine_in_date: Option<String>,

    /// Delivery date.
    pub delivery_date: Option<String>,

    /// Selected payment method id. `Some(String::new())` clears the choice.
    pub payment_method: Option<String>,

    /// Free-text order notes.
    pub notes: Option<String>,
}

impl DraftPatch {
    /// Encode the present fields as `(field, value)` pairs for persistence.
    #[must_use]
    pub fn entries(&self) -> Vec<(DraftField, String)> {
        let mut entries = Vec::new();

        if let Some(value) = &self.customer_name {
            entries.push((DraftField::CustomerName, value.clone()));
        }
        if let Some(value) = &self.contact_number {
            entries.push((DraftField::ContactNumber, value.clone()));
        }
        if let Some(value) = self.fulfillment {
            entries.push((DraftField::Fulfillment, value.id().to_owned()));
        }
        if let Some(value) = &self.address {
            entries.push((DraftField::Address, value.clone()));
        }
        if let Some(value) = &self.landmark {
            entries.push((DraftField::Landmark, value.clone()));
        }
        if let Some(value) = self.pickup_slot {
            entries.push((DraftField::PickupSlot, value.id().to_owned()));
        }
        if let Some(value) = &self.custom_time {
            entries.push((DraftField::CustomTime, value.clone()));
        }
        if let Some(value) = self.party_size {
            entries.push((DraftField::PartySize, value.to_string()));
        }
        if let Some(value) = &self.dine_in_date {
            entries.push((DraftField::DineInDate, value.clone()));
        }
        if let Some(value) = &self.delivery_date {
            entries.push((DraftField::DeliveryDate, value.clone()));
        }
        if let Some(value) = &self.payment_method {
            entries.push((DraftField::PaymentMethod, value.clone()));
        }
        if let Some(value) = &self.notes {
            entries.push((DraftField::Notes, value.clone()));
        }

        entries
    }
}

/// Fulfillment-specific fields, narrowed to the active kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fulfillment<'a> {
    /// Collect at the store counter.
    Pickup {
        /// Chosen time bracket.
        slot: PickupSlot,

        /// Free-text time, meaningful when `slot` is custom.
        custom_time: &'a str,
    },

    /// Courier to the customer's address.
    Delivery {
        /// Destination address.
        address: &'a str,

        /// Landmark near the address, when given.
        landmark: Option<&'a str>,

        /// Requested delivery date.
        date: &'a str,
    },

    /// Eat on site.
    DineIn {
        /// Number of people at the table.
        party_size: u32,

        /// Preferred visit date.
        date: &'a str,
    },
}

impl Fulfillment<'_> {
    /// Whether every field this kind requires is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Fulfillment::Pickup { slot, custom_time } => {
                *slot != PickupSlot::Custom || !custom_time.is_empty()
            }
            Fulfillment::Delivery { address, date, .. } => {
                !address.is_empty() && !date.is_empty()
            }
            Fulfillment::DineIn { party_size, date } => *party_size >= 1 && !date.is_empty(),
        }
    }
}
