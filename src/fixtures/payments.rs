//! Payment Method Fixtures

use serde::Deserialize;

use crate::payments::PaymentMethod;

/// Wrapper for payment methods in YAML
#[derive(Debug, Deserialize)]
pub struct PaymentsFixture {
    /// Payment methods, in the provider's display order
    pub methods: Vec<PaymentMethod>,
}
