//! Simulated checkout.
//!
//! There is no payment processor behind this module. Placing an order
//! validates the shipping details, snapshots the cart, computes the order
//! totals, clears the cart, and reports success, standing in for the real
//! flow locally.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{CartItem, CartStore};
use crate::notify::{Notification, Notifier};

/// Sales tax applied to the subtotal.
fn tax_rate() -> Decimal {
    Decimal::new(8, 2) // 8%
}

/// Checkout errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("incomplete shipping details: missing {0}")]
    IncompleteShipping(&'static str),
}

/// Shipping tiers offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Free, 5-7 business days.
    #[default]
    Standard,
    /// $25, 2-3 business days.
    Express,
    /// $50, next business day.
    Overnight,
}

impl ShippingMethod {
    /// Flat shipping cost for this tier.
    #[must_use]
    pub fn cost(self) -> Decimal {
        match self {
            Self::Standard => Decimal::ZERO,
            Self::Express => Decimal::from(25),
            Self::Overnight => Decimal::from(50),
        }
    }
}

impl std::str::FromStr for ShippingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "overnight" => Ok(Self::Overnight),
            _ => Err(format!("invalid shipping method: {s}")),
        }
    }
}

/// Payment options offered at checkout. Simulated only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "paypal" => Ok(Self::Paypal),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Shipping form data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub zip_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "United States".to_string()
}

impl Default for ShippingDetails {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: default_country(),
        }
    }
}

impl ShippingDetails {
    fn validate(&self) -> Result<(), CheckoutError> {
        let required: [(&'static str, &str); 6] = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("zip_code", &self.zip_code),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CheckoutError::IncompleteShipping(field));
            }
        }
        Ok(())
    }
}

/// Order totals derived from the cart subtotal and the chosen shipping tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Compute totals: 8% tax on the subtotal, flat shipping per tier.
    #[must_use]
    pub fn compute(subtotal: Decimal, shipping: ShippingMethod) -> Self {
        let shipping_cost = shipping.cost();
        let tax = subtotal * tax_rate();
        Self {
            subtotal,
            shipping: shipping_cost,
            tax,
            total: subtotal + shipping_cost + tax,
        }
    }
}

/// A placed (simulated) order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartItem>,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub summary: OrderSummary,
}

/// Place an order from the current cart.
///
/// Snapshots the lines, computes the summary, clears the cart, and notifies
/// success. The cart is left untouched on any validation failure.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart and
/// [`CheckoutError::IncompleteShipping`] when a required field is blank.
pub fn place_order(
    cart: &CartStore,
    details: &ShippingDetails,
    shipping: ShippingMethod,
    payment: PaymentMethod,
    notifier: &dyn Notifier,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    details.validate()?;

    let lines = cart.items();
    let summary = OrderSummary::compute(cart.total(), shipping);
    let confirmation = OrderConfirmation {
        id: Uuid::new_v4(),
        placed_at: Utc::now(),
        lines,
        shipping_method: shipping,
        payment_method: payment,
        summary,
    };

    cart.clear();
    tracing::info!(
        order_id = %confirmation.id,
        total = %confirmation.summary.total,
        "Order placed"
    );
    notifier.notify(Notification::new(
        "Order Placed Successfully!",
        "Thank you for your purchase. You will receive a confirmation email shortly.",
    ));

    Ok(confirmation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartLineInput;
    use crate::notify::test_support::RecordingNotifier;
    use crate::storage::MemoryStorage;
    use ownit_core::{CurrencyCode, Price, ProductId};
    use std::sync::Arc;

    fn details() -> ShippingDetails {
        ShippingDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 Gem Street".to_string(),
            city: "London".to_string(),
            zip_code: "E1 6AN".to_string(),
            ..ShippingDetails::default()
        }
    }

    fn cart_with_line(price: i64, quantity: u32) -> CartStore {
        let cart = CartStore::new(Arc::new(MemoryStorage::new()));
        cart.add(CartLineInput {
            id: ProductId::new(1),
            name: "Eternal Love Diamond Ring".to_string(),
            price: Price::from_major(price, CurrencyCode::USD),
            image: "collections/rings.jpg".to_string(),
            variant: None,
        });
        cart.update_quantity(ProductId::new(1), quantity);
        cart
    }

    #[test]
    fn test_shipping_costs() {
        assert_eq!(ShippingMethod::Standard.cost(), Decimal::ZERO);
        assert_eq!(ShippingMethod::Express.cost(), Decimal::from(25));
        assert_eq!(ShippingMethod::Overnight.cost(), Decimal::from(50));
    }

    #[test]
    fn test_summary_applies_tax_and_shipping() {
        let summary = OrderSummary::compute(Decimal::from(1000), ShippingMethod::Express);
        assert_eq!(summary.subtotal, Decimal::from(1000));
        assert_eq!(summary.shipping, Decimal::from(25));
        assert_eq!(summary.tax, Decimal::from(80));
        assert_eq!(summary.total, Decimal::from(1105));
    }

    #[test]
    fn test_summary_standard_shipping_is_free() {
        let summary = OrderSummary::compute(Decimal::from(200), ShippingMethod::Standard);
        assert_eq!(summary.shipping, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::from(216));
    }

    #[test]
    fn test_place_order_empty_cart() {
        let cart = CartStore::new(Arc::new(MemoryStorage::new()));
        let notifier = RecordingNotifier::default();
        let result = place_order(
            &cart,
            &details(),
            ShippingMethod::Standard,
            PaymentMethod::Card,
            &notifier,
        );
        assert_eq!(result.unwrap_err(), CheckoutError::EmptyCart);
        assert_eq!(notifier.len(), 0);
    }

    #[test]
    fn test_place_order_requires_shipping_fields() {
        let cart = cart_with_line(4500, 1);
        let notifier = RecordingNotifier::default();
        let mut incomplete = details();
        incomplete.email = "  ".to_string();

        let result = place_order(
            &cart,
            &incomplete,
            ShippingMethod::Standard,
            PaymentMethod::Card,
            &notifier,
        );
        assert_eq!(
            result.unwrap_err(),
            CheckoutError::IncompleteShipping("email")
        );
        // Validation failure leaves the cart intact
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_place_order_clears_cart_and_notifies() {
        let cart = cart_with_line(4500, 3);
        let notifier = RecordingNotifier::default();

        let confirmation = place_order(
            &cart,
            &details(),
            ShippingMethod::Overnight,
            PaymentMethod::Paypal,
            &notifier,
        )
        .unwrap();

        assert!(cart.is_empty());
        assert_eq!(confirmation.lines.len(), 1);
        assert_eq!(confirmation.lines[0].quantity, 3);
        assert_eq!(confirmation.summary.subtotal, Decimal::from(13500));
        assert_eq!(confirmation.summary.tax, Decimal::from(1080));
        assert_eq!(
            confirmation.summary.total,
            Decimal::from(13500 + 50 + 1080)
        );
        assert_eq!(notifier.titles(), vec!["Order Placed Successfully!".to_string()]);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "overnight".parse::<ShippingMethod>().unwrap(),
            ShippingMethod::Overnight
        );
        assert!("teleport".parse::<ShippingMethod>().is_err());
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
