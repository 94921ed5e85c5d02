//! Draft persistence
//!
//! Field-level key/value storage for the checkout draft. Real deployments
//! back this with whatever the host UI has (cookies, local storage); the
//! in-memory store here is the reference implementation and the one tests
//! drive.

use rustc_hash::FxHashMap;

use super::draft::{CheckoutDraft, DraftField, DraftPatch};

/// Field-level persistence for the checkout draft.
///
/// Saves are write-through and fire-and-forget: the checkout never waits on
/// or verifies them, and a partial multi-field write is accepted. Loads fall
/// back to per-field defaults for anything missing or unreadable.
pub trait DraftStore {
    /// Load the persisted draft, defaulting missing fields.
    fn load(&self) -> CheckoutDraft;

    /// Persist the fields the patch carries.
    fn save(&mut self, patch: &DraftPatch);
}

/// In-memory `DraftStore` keyed by the stable field keys.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    fields: FxHashMap<&'static str, String>,
}

impl MemoryDraftStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        MemoryDraftStore::default()
    }

    /// Seed one raw field value, as an external writer would.
    pub fn insert(&mut self, field: DraftField, value: impl Into<String>) {
        self.fields.insert(field.key(), value.into());
    }

    /// Raw persisted value of one field.
    #[must_use]
    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.fields.get(field.key()).map(String::as_str)
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> CheckoutDraft {
        CheckoutDraft::from_fields(|field| self.fields.get(field.key()).cloned())
    }

    fn save(&mut self, patch: &DraftPatch) {
        for (field, value) in patch.entries() {
            self.fields.insert(field.key(), value);
        }
    }
}
