//! Line identity
//!
//! A cart line is identified by its full configuration, not by the menu item
//! alone. Two configurations are the same line exactly when the canonical
//! forms of their keys are equal.

/// Canonical identity of a cart line.
///
/// Add-on selections are canonicalised on construction: zero-quantity
/// selections are dropped, duplicate add-on ids are merged by summing their
/// quantities, and the surviving pairs are sorted by id. Selection order can
/// therefore never split or fail to merge lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    item_id: String,
    variation_id: Option<String>,
    add_ons: Vec<(String, u32)>,
}

impl LineKey {
    /// Builds the canonical key for one configuration.
    #[must_use]
    pub fn new<'a, I>(item_id: &str, variation_id: Option<&str>, add_ons: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut canonical: Vec<(String, u32)> = Vec::new();

        for (id, quantity) in add_ons {
            if quantity == 0 {
                continue;
            }

            match canonical.iter_mut().find(|entry| entry.0 == id) {
                Some(entry) => entry.1 = entry.1.saturating_add(quantity),
                None => canonical.push((id.to_owned(), quantity)),
            }
        }

        canonical.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            item_id: item_id.to_owned(),
            variation_id: variation_id.map(ToOwned::to_owned),
            add_ons: canonical,
        }
    }

    /// The menu item id this line was built from.
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// The selected variation id, if any.
    #[must_use]
    pub fn variation_id(&self) -> Option<&str> {
        self.variation_id.as_deref()
    }

    /// Canonicalised `(add-on id, quantity)` pairs, sorted by id.
    #[must_use]
    pub fn add_ons(&self) -> &[(String, u32)] {
        &self.add_ons
    }
}
