//! Order form and submission.
//!
//! Placing an order does not send it anywhere: a successful submission
//! produces a [`PlacedOrder`] snapshot, which is where an order backend would
//! pick it up.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::types::Price;

/// Errors that can occur when submitting an order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// A required field is empty or whitespace-only.
    #[error("missing required fields: {}", join_fields(.fields))]
    MissingRequiredField {
        /// Every missing field, in form order.
        fields: Vec<OrderField>,
    },
}

fn join_fields(fields: &[OrderField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error returned when parsing an unknown [`OrderField`] name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown order field: {0}")]
pub struct UnknownField(pub String);

/// A field of the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Name,
    Phone,
    Email,
    Address,
    Comment,
}

impl OrderField {
    /// All fields in form order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::Comment,
    ];

    /// Fields that must be filled in before an order can be placed.
    pub const REQUIRED: [Self; 3] = [Self::Name, Self::Phone, Self::Address];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
            Self::Comment => "comment",
        }
    }

    /// Form label shown to customers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "ФИО",
            Self::Phone => "Телефон",
            Self::Email => "Email",
            Self::Address => "Адрес доставки",
            Self::Comment => "Комментарий к заказу",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::Phone | Self::Address)
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownField(wanted.to_owned()))
    }
}

/// Delivery details typed in by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub comment: String,
}

impl OrderForm {
    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: OrderField) -> &str {
        match field {
            OrderField::Name => &self.name,
            OrderField::Phone => &self.phone,
            OrderField::Email => &self.email,
            OrderField::Address => &self.address,
            OrderField::Comment => &self.comment,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: OrderField, value: impl Into<String>) {
        let slot = match field {
            OrderField::Name => &mut self.name,
            OrderField::Phone => &mut self.phone,
            OrderField::Email => &mut self.email,
            OrderField::Address => &mut self.address,
            OrderField::Comment => &mut self.comment,
        };
        *slot = value.into();
    }

    /// Required fields that are empty or whitespace-only.
    #[must_use]
    pub fn missing_required(&self) -> Vec<OrderField> {
        OrderField::REQUIRED
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Check that the form can be submitted.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::MissingRequiredField`] if the name, phone or
    /// address is blank.
    pub fn validate(&self) -> Result<(), OrderError> {
        validate(self)
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        OrderField::ALL.into_iter().all(|f| self.get(f).is_empty())
    }
}

/// Check that `form` can be submitted.
///
/// # Errors
///
/// Returns [`OrderError::MissingRequiredField`] listing every required field
/// that is empty or whitespace-only.
pub fn validate(form: &OrderForm) -> Result<(), OrderError> {
    let fields = form.missing_required();
    if fields.is_empty() {
        Ok(())
    } else {
        Err(OrderError::MissingRequiredField { fields })
    }
}

/// An accepted order, as handed to whoever fulfils it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    /// Reference quoted to the customer.
    pub reference: Uuid,
    pub placed_at: DateTime<Utc>,
    pub customer: OrderForm,
    pub lines: Vec<CartLine>,
    pub total_price: Price,
    pub total_quantity: u32,
}

impl PlacedOrder {
    /// Snapshot `cart` and `customer` as a new order.
    #[must_use]
    pub fn new(customer: OrderForm, cart: &Cart) -> Self {
        Self {
            reference: Uuid::new_v4(),
            placed_at: Utc::now(),
            customer,
            lines: cart.lines().to_vec(),
            total_price: cart.total_price(),
            total_quantity: cart.total_quantity(),
        }
    }
}
