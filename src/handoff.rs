//! Messaging handoff
//!
//! Takes a composed order to the store's Messenger thread. Popup blockers
//! and bad drafts both happen in the field, so placing an order degrades
//! through fallback tiers instead of returning an error.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::error;

use crate::order::OrderSummary;

/// Characters kept verbatim in the `?text=` payload, matching what browsers
/// leave unescaped in URI components.
const MESSAGE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The store's Messenger channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messenger {
    page_id: String,
}

impl Messenger {
    /// A channel addressed by its page id.
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
        }
    }

    /// The bare chat URL, with no prefilled message.
    #[must_use]
    pub fn channel_url(&self) -> String {
        format!("https://m.me/{}", self.page_id)
    }

    /// The chat URL with the order message prefilled.
    #[must_use]
    pub fn order_url(&self, message: &str) -> String {
        format!(
            "https://m.me/{}?text={}",
            self.page_id,
            utf8_percent_encode(message, MESSAGE)
        )
    }
}

/// Where the customer ended up after placing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffOutcome {
    /// The chat opened in a new window with the order prefilled.
    Opened,

    /// A popup blocker intervened; the current window was redirected to the
    /// same prefilled chat URL.
    BlockedRedirect,

    /// Composition failed; the current window was redirected to the bare
    /// channel so the customer can still reach the store.
    BareRedirect,
}

/// How the handoff reaches the browser. Implementations wrap whatever
/// window-control surface the embedding frontend exposes.
pub trait Navigator {
    /// Try to open the URL in a new window. Returns whether the window
    /// actually opened; popup blockers make this fail without an error.
    fn open_window(&mut self, url: &str) -> bool;

    /// Navigate the current window to the URL.
    fn redirect(&mut self, url: &str);
}

/// Hand the order over to the messaging channel.
///
/// Never returns an error; every tier is best-effort and the outcome says
/// which one the customer got.
pub fn place_order<N: Navigator>(
    messenger: &Messenger,
    navigator: &mut N,
    summary: &OrderSummary<'_>,
) -> HandoffOutcome {
    match summary.compose() {
        Ok(message) => {
            let url = messenger.order_url(&message);

            if navigator.open_window(&url) {
                HandoffOutcome::Opened
            } else {
                navigator.redirect(&url);

                HandoffOutcome::BlockedRedirect
            }
        }
        Err(err) => {
            error!(%err, "order composition failed, handing off the bare channel");

            navigator.redirect(&messenger.channel_url());

            HandoffOutcome::BareRedirect
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::PHP};
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        cart::{identity::LineKey, line::CartLine},
        checkout::draft::{CheckoutDraft, FulfillmentKind},
    };

    use super::*;

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

    fn lines<'a>() -> [CartLine<'a>; 1] {
        [CartLine::new(
            LineKey::new("pan-de-coco", None, []),
            "Pan de Coco".to_owned(),
            None,
            smallvec![],
            Money::from_minor(4500, PHP),
            1,
        )]
    }

    fn pickup_draft() -> CheckoutDraft {
        CheckoutDraft {
            customer_name: "Ana".to_owned(),
            contact_number: "0917 555 1234".to_owned(),
            ..CheckoutDraft::default()
        }
    }

    #[test]
    fn order_urls_encode_like_a_uri_component() {
        let messenger = Messenger::new("463644283495431");

        let url = messenger.order_url("Hello World! ₱270 (pickup)\nnext");

        assert_eq!(
            url,
            "https://m.me/463644283495431?text=Hello%20World!%20%E2%82%B1270%20(pickup)%0Anext"
        );
    }

    #[test]
    fn opens_a_window_when_popups_are_allowed() -> TestResult {
        let messenger = Messenger::new("463644283495431");
        let mut navigator = FakeNavigator {
            allow_popup: true,
            ..FakeNavigator::default()
        };
        let draft = pickup_draft();
        let lines = lines();
        let summary = OrderSummary::new(
            "Kuya Baker",
            &draft,
            &lines,
            Money::from_minor(4500, PHP),
            None,
        );

        let outcome = place_order(&messenger, &mut navigator, &summary);

        assert_eq!(outcome, HandoffOutcome::Opened);
        assert!(navigator.redirected.is_empty());

        let opened = navigator.opened.first().ok_or("no window opened")?;

        assert!(opened.starts_with("https://m.me/463644283495431?text="));
        assert!(opened.contains("Pan%20de%20Coco"));

        Ok(())
    }

    #[test]
    fn blocked_popup_redirects_to_the_same_url() {
        let messenger = Messenger::new("463644283495431");
        let mut navigator = FakeNavigator::default();
        let draft = pickup_draft();
        let lines = lines();
        let summary = OrderSummary::new(
            "Kuya Baker",
            &draft,
            &lines,
            Money::from_minor(4500, PHP),
            None,
        );

        let outcome = place_order(&messenger, &mut navigator, &summary);

        assert_eq!(outcome, HandoffOutcome::BlockedRedirect);
        assert_eq!(navigator.opened, navigator.redirected);
    }

    #[test]
    fn compose_failure_redirects_to_the_bare_channel() {
        let messenger = Messenger::new("463644283495431");
        let mut navigator = FakeNavigator {
            allow_popup: true,
            ..FakeNavigator::default()
        };
        let draft = CheckoutDraft {
            fulfillment: FulfillmentKind::Delivery,
            address: "14 Mabini St".to_owned(),
            delivery_date: "someday".to_owned(),
            ..pickup_draft()
        };
        let lines = lines();
        let summary = OrderSummary::new(
            "Kuya Baker",
            &draft,
            &lines,
            Money::from_minor(4500, PHP),
            None,
        );

        let outcome = place_order(&messenger, &mut navigator, &summary);

        assert_eq!(outcome, HandoffOutcome::BareRedirect);
        assert!(navigator.opened.is_empty());
        assert_eq!(navigator.redirected, vec!["https://m.me/463644283495431"]);
    }
}
