//! Payment methods

use serde::Deserialize;

/// One way the store accepts payment.
///
/// The draft references methods by [`id`](PaymentMethod::id); everything else
/// is display data for the payment step and the composed message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentMethod {
    /// Stable id the draft references.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Account number customers send payment to.
    pub account_number: String,

    /// Name on the account.
    pub account_name: String,

    /// QR code image URL.
    pub qr_code_url: String,
}
