//! Order composition
//!
//! Renders a completed checkout draft and the cart's lines into the
//! plain-text order message handed to the messaging channel. The section
//! order is fixed; optional sections collapse entirely instead of leaving
//! blank gaps.

use jiff::{civil::Date, fmt::strtime};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::line::CartLine,
    checkout::draft::{CheckoutDraft, Fulfillment, FulfillmentKind, PickupSlot},
    payments::PaymentMethod,
};

/// strftime layout for human-readable dates, e.g. "Tuesday, September 1, 2026".
const LONG_DATE: &str = "%A, %B %-d, %Y";

/// Order composition error.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A draft date could not be parsed. Holds the raw draft value.
    #[error("Invalid date {0:?} in the checkout draft")]
    InvalidDate(String, #[source] jiff::Error),
}

/// Everything the order message is rendered from.
///
/// Borrows the draft and cart lines; composing is read-only and repeatable.
#[derive(Debug)]
pub struct OrderSummary<'a> {
    store_name: &'a str,
    draft: &'a CheckoutDraft,
    lines: &'a [CartLine<'a>],
    total: Money<'a, Currency>,
    payment: Option<&'a PaymentMethod>,
}

impl<'a> OrderSummary<'a> {
    /// Assemble a summary for composition.
    ///
    /// `payment` is the resolved payment method, if the draft's id matched
    /// one; the message falls back to the raw id otherwise.
    pub fn new(
        store_name: &'a str,
        draft: &'a CheckoutDraft,
        lines: &'a [CartLine<'a>],
        total: Money<'a, Currency>,
        payment: Option<&'a PaymentMethod>,
    ) -> Self {
        Self {
            store_name,
            draft,
            lines,
            total,
            payment,
        }
    }

    /// Render the order message.
    ///
    /// Sections are separated by exactly one blank line. The fulfillment
    /// block renders only the fields of the draft's active kind.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::InvalidDate`] when the active fulfillment
    /// kind carries a date that does not parse.
    pub fn compose(&self) -> Result<String, ComposeError> {
        let mut sections = vec![format!("🛒 {} ORDER", self.store_name)];

        let mut customer = vec![
            format!("👤 Customer: {}", self.draft.customer_name),
            format!("📞 Contact: {}", self.draft.contact_number),
            format!("📍 Service: {}", self.draft.fulfillment.label()),
        ];

        match self.draft.fulfillment_view() {
            Fulfillment::Pickup { slot, custom_time } => {
                let time = if slot == PickupSlot::Custom {
                    custom_time
                } else {
                    slot.label()
                };

                customer.push(format!("⏰ Pickup Time: {time}"));
            }
            Fulfillment::Delivery {
                address,
                landmark,
                date,
            } => {
                customer.push(format!("🏠 Address: {address}"));

                if let Some(landmark) = landmark {
                    customer.push(format!("🗺️ Landmark: {landmark}"));
                }

                if !date.is_empty() {
                    customer.push(format!("📅 Delivery Date: {}", long_date(date)?));
                }
            }
            Fulfillment::DineIn { party_size, date } => {
                let unit = if party_size == 1 { "person" } else { "people" };

                customer.push(format!("👥 Party Size: {party_size} {unit}"));

                if !date.is_empty() {
                    customer.push(format!("📅 Preferred Date: {}", long_date(date)?));
                }
            }
        }

        sections.push(customer.join("\n"));

        let mut details = vec!["📋 ORDER DETAILS:".to_owned()];

        for line in self.lines {
            details.push(line_entry(line));
        }

        sections.push(details.join("\n"));

        let mut totals = vec![format!("💰 TOTAL: {}", display_amount(&self.total))];

        // The courier fee is negotiated over chat, so the line is left for
        // the seller to fill in.
        if self.draft.fulfillment == FulfillmentKind::Delivery {
            totals.push("🛵 DELIVERY FEE:".to_owned());
        }

        sections.push(totals.join("\n"));

        let payment = self
            .payment
            .map_or(self.draft.payment_method.as_str(), |method| {
                method.name.as_str()
            });

        sections.push(format!(
            "💳 Payment: {payment}\n📸 Payment Screenshot: Please attach your payment receipt screenshot"
        ));

        if !self.draft.notes.is_empty() {
            sections.push(format!("📝 Notes: {}", self.draft.notes));
        }

        sections.push(
            "Please send proof of payment via messenger to confirm. Thank you!".to_owned(),
        );

        Ok(sections.join("\n\n"))
    }
}

/// One order-details line: name, variation, add-ons, quantity, line total.
fn line_entry(line: &CartLine<'_>) -> String {
    let mut entry = format!("• {}", line.name());

    if let Some(variation) = line.variation() {
        entry.push_str(&format!(" ({})", variation.name));
    }

    if !line.add_ons().is_empty() {
        let add_ons = line
            .add_ons()
            .iter()
            .map(|add_on| {
                if add_on.quantity > 1 {
                    format!("{} x{}", add_on.name, add_on.quantity)
                } else {
                    add_on.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        entry.push_str(&format!(" + {add_ons}"));
    }

    entry.push_str(&format!(
        " x{} - {}",
        line.quantity(),
        display_amount(&line.line_total())
    ));

    entry
}

/// Format an amount the way the storefront prints it: currency symbol, then
/// the number with trailing fraction zeros trimmed (`₱270`, `₱270.5`,
/// `₱270.05`).
#[must_use]
pub fn display_amount(amount: &Money<'_, Currency>) -> String {
    let currency = amount.currency();
    let minor = amount.to_minor_units();
    let sign = if minor < 0 { "-" } else { "" };
    let minor = minor.unsigned_abs();
    let divisor = 10_u64.pow(currency.exponent);
    let units = minor / divisor;
    let mut frac = minor % divisor;

    if frac == 0 {
        return format!("{}{sign}{units}", currency.symbol);
    }

    let mut scale = divisor;

    while frac % 10 == 0 {
        frac /= 10;
        scale /= 10;
    }

    // Width of the kept fraction digits, so interior zeros survive the trim.
    let mut width = 0_usize;

    while scale > 1 {
        width += 1;
        scale /= 10;
    }

    format!("{}{sign}{units}.{frac:0width$}", currency.symbol)
}

/// Parse a draft date and render its long form.
///
/// Drafts store `YYYY-MM-DD`; anything after a `T` is ignored so older
/// persisted datetime values still parse.
fn long_date(raw: &str) -> Result<String, ComposeError> {
    let date_part = raw.split_once('T').map_or(raw, |(date, _)| date);

    let date = date_part
        .parse::<Date>()
        .map_err(|err| ComposeError::InvalidDate(raw.to_owned(), err))?;

    strtime::format(LONG_DATE, date).map_err(|err| ComposeError::InvalidDate(raw.to_owned(), err))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::PHP;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::cart::{
        identity::LineKey,
        line::{ChosenAddOn, ChosenVariation},
    };

    use super::*;

    fn pandesal_line<'a>() -> CartLine<'a> {
        CartLine::new(
            LineKey::new("pandesal", Some("family"), [("cheese", 2)]),
            "Pandesal".to_owned(),
            Some(ChosenVariation {
                id: "family".to_owned(),
                name: "Family Size".to_owned(),
            }),
            smallvec![ChosenAddOn {
                id: "cheese".to_owned(),
                name: "Cheese".to_owned(),
                quantity: 2,
            }],
            Money::from_minor(9000, PHP),
            3,
        )
    }

    fn plain_line<'a>(name: &str, unit_minor: i64, quantity: u32) -> CartLine<'a> {
        CartLine::new(
            LineKey::new(name, None, []),
            name.to_owned(),
            None,
            smallvec![],
            Money::from_minor(unit_minor, PHP),
            quantity,
        )
    }

    fn gcash() -> PaymentMethod {
        PaymentMethod {
            id: "gcash".to_owned(),
            name: "GCash".to_owned(),
            account_number: "0917 555 0199".to_owned(),
            account_name: "Kuya Baker".to_owned(),
            qr_code_url: "https://example.com/qr/gcash.png".to_owned(),
        }
    }

    #[test]
    fn composes_a_pickup_order() -> TestResult {
        let draft = CheckoutDraft {
            customer_name: "Ana Santos".to_owned(),
            contact_number: "0917 555 1234".to_owned(),
            pickup_slot: PickupSlot::Mins15To20,
            payment_method: "gcash".to_owned(),
            ..CheckoutDraft::default()
        };
        let lines = [pandesal_line()];
        let gcash = gcash();

        let summary = OrderSummary::new(
            "Kuya Baker",
            &draft,
            &lines,
            Money::from_minor(27_000, PHP),
            Some(&gcash),
        );

        let expected = "\
🛒 Kuya Baker ORDER

👤 Customer: Ana Santos
📞 Contact: 0917 555 1234
📍 Service: Pickup
⏰ Pickup Time: 15-20 minutes

📋 ORDER DETAILS:
• Pandesal (Family Size) + Cheese x2 x3 - ₱270

💰 TOTAL: ₱270

💳 Payment: GCash
📸 Payment Screenshot: Please attach your payment receipt screenshot

Please send proof of payment via messenger to confirm. Thank you!";

        assert_eq!(summary.compose()?, expected);

        Ok(())
    }

    #[test]
    fn composes_a_delivery_order_with_fee_line_and_notes() -> TestResult {
        let draft = CheckoutDraft {
            customer_name: "Ben Reyes".to_owned(),
            contact_number: "0918 555 2345".to_owned(),
            fulfillment: FulfillmentKind::Delivery,
            address: "14 Mabini St".to_owned(),
            landmark: "beside the chapel".to_owned(),
            delivery_date: "2026-09-01".to_owned(),
            payment_method: "maya".to_owned(),
            notes: "extra ube please".to_owned(),
            ..CheckoutDraft::default()
        };
        let lines = [plain_line("Ensaymada", 5500, 2)];

        let summary = OrderSummary::new(
            "Kuya Baker",
            &draft,
            &lines,
            Money::from_minor(11_000, PHP),
            None,
        );

        let expected = "\
🛒 Kuya Baker ORDER

👤 Customer: Ben Reyes
📞 Contact: 0918 555 2345
📍 Service: Delivery
🏠 Address: 14 Mabini St
🗺️ Landmark: beside the chapel
📅 Delivery Date: Tuesday, September 1, 2026

📋 ORDER DETAILS:
• Ensaymada x2 - ₱110

💰 TOTAL: ₱110
🛵 DELIVERY FEE:

💳 Payment: maya
📸 Payment Screenshot: Please attach your payment receipt screenshot

📝 Notes: extra ube please

Please send proof of payment via messenger to confirm. Thank you!";

        assert_eq!(summary.compose()?, expected);

        Ok(())
    }

    #[test]
    fn dine_in_pluralises_the_party_size() -> TestResult {
        let mut draft = CheckoutDraft {
            customer_name: "Cara".to_owned(),
            contact_number: "0917 555 9876".to_owned(),
            fulfillment: FulfillmentKind::DineIn,
            party_size: 1,
            dine_in_date: "2026-09-05".to_owned(),
            ..CheckoutDraft::default()
        };
        let lines = [plain_line("Barako Coffee", 6000, 1)];
        let total = Money::from_minor(6000, PHP);

        let solo = OrderSummary::new("Kuya Baker", &draft, &lines, total, None);
        let message = solo.compose()?;

        assert!(message.contains("👥 Party Size: 1 person\n"));
        assert!(message.contains("📅 Preferred Date: Saturday, September 5, 2026"));

        draft.party_size = 4;

        let group = OrderSummary::new("Kuya Baker", &draft, &lines, total, None);

        assert!(group.compose()?.contains("👥 Party Size: 4 people\n"));

        Ok(())
    }

    #[test]
    fn custom_pickup_time_is_rendered_verbatim() -> TestResult {
        let draft = CheckoutDraft {
            customer_name: "Dina".to_owned(),
            contact_number: "0917 555 4567".to_owned(),
            pickup_slot: PickupSlot::Custom,
            custom_time: "after 6pm".to_owned(),
            ..CheckoutDraft::default()
        };
        let lines = [plain_line("Pan de Coco", 4500, 1)];

        let summary =
            OrderSummary::new("Kuya Baker", &draft, &lines, Money::from_minor(4500, PHP), None);

        assert!(summary.compose()?.contains("⏰ Pickup Time: after 6pm\n"));

        Ok(())
    }

    #[test]
    fn delivery_dates_tolerate_a_datetime_suffix() -> TestResult {
        let draft = CheckoutDraft {
            customer_name: "Eli".to_owned(),
            contact_number: "0917 555 3456".to_owned(),
            fulfillment: FulfillmentKind::Delivery,
            address: "14 Mabini St".to_owned(),
            delivery_date: "2026-09-01T14:30".to_owned(),
            ..CheckoutDraft::default()
        };
        let lines = [plain_line("Ensaymada", 5500, 1)];

        let summary =
            OrderSummary::new("Kuya Baker", &draft, &lines, Money::from_minor(5500, PHP), None);

        let message = summary.compose()?;

        assert!(message.contains("📅 Delivery Date: Tuesday, September 1, 2026"));

        Ok(())
    }

    #[test]
    fn malformed_dates_fail_composition() {
        let draft = CheckoutDraft {
            customer_name: "Faye".to_owned(),
            contact_number: "0917 555 6789".to_owned(),
            fulfillment: FulfillmentKind::Delivery,
            address: "14 Mabini St".to_owned(),
            delivery_date: "someday".to_owned(),
            ..CheckoutDraft::default()
        };
        let lines = [plain_line("Ensaymada", 5500, 1)];

        let summary =
            OrderSummary::new("Kuya Baker", &draft, &lines, Money::from_minor(5500, PHP), None);

        match summary.compose() {
            Err(ComposeError::InvalidDate(raw, _)) => assert_eq!(raw, "someday"),
            other => panic!("expected InvalidDate error, got {other:?}"),
        }
    }

    #[test]
    fn amounts_trim_trailing_fraction_zeros() {
        assert_eq!(display_amount(&Money::from_minor(27_000, PHP)), "₱270");
        assert_eq!(display_amount(&Money::from_minor(27_050, PHP)), "₱270.5");
        assert_eq!(display_amount(&Money::from_minor(27_005, PHP)), "₱270.05");
        assert_eq!(display_amount(&Money::from_minor(-1250, PHP)), "₱-12.5");
    }
}
