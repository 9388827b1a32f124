//! Shopping cart.
//!
//! A cart is an ordered list of lines. Each line is a product plus an
//! optional personalization text, and two additions of the same product with
//! the same text merge into one line instead of creating a second one.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Identity of a cart line: which product, printed with which text.
///
/// Two lines are the same line if and only if both parts match, including
/// when neither has custom text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    pub product_id: ProductId,
    pub custom_text: Option<&'a str>,
}

impl<'a> LineKey<'a> {
    /// Build a key. Empty text counts as no personalization.
    #[must_use]
    pub fn new(product_id: ProductId, custom_text: Option<&'a str>) -> Self {
        Self {
            product_id,
            custom_text: custom_text.filter(|t| !t.is_empty()),
        }
    }
}

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
    /// Text printed on the mug, if personalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
}

impl CartLine {
    fn new(product: Product, custom_text: Option<&str>) -> Self {
        Self {
            product,
            quantity: 1,
            custom_text: custom_text.map(str::to_owned),
        }
    }

    /// This line's identity key.
    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey::new(self.product.id, self.custom_text.as_deref())
    }

    /// Price of the whole line: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }

    /// Whether the customer attached their own text.
    #[must_use]
    pub const fn is_personalized(&self) -> bool {
        self.custom_text.is_some()
    }
}

/// The customer's cart.
///
/// Lines keep insertion order, and no two lines share a [`LineKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`, printed with `custom_text`.
    ///
    /// Increments the matching line if one exists, otherwise appends a new
    /// line with quantity 1. Returns the index of the affected line.
    pub fn add(&mut self, product: &Product, custom_text: Option<&str>) -> usize {
        let key = LineKey::new(product.id, custom_text);

        if let Some(index) = self.lines.iter().position(|line| line.key() == key) {
            if let Some(line) = self.lines.get_mut(index) {
                line.quantity = line.quantity.saturating_add(1);
                tracing::debug!(
                    product_id = %product.id,
                    quantity = line.quantity,
                    "Incremented cart line"
                );
            }
            return index;
        }

        self.lines.push(CartLine::new(product.clone(), key.custom_text));
        tracing::debug!(
            product_id = %product.id,
            personalized = key.custom_text.is_some(),
            "Appended cart line"
        );
        self.lines.len() - 1
    }

    /// Remove the line at `index`.
    ///
    /// Out-of-range indices leave the cart untouched and return `None`.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        if index >= self.lines.len() {
            tracing::warn!(index, lines = self.lines.len(), "Ignoring remove of missing cart line");
            return None;
        }
        Some(self.lines.remove(index))
    }

    /// Change the quantity of the line at `index` by `delta`.
    ///
    /// The result is clamped to at least 1; a line never drops to zero and is
    /// never removed here. Out-of-range indices are ignored. Returns the new
    /// quantity.
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> Option<u32> {
        let Some(line) = self.lines.get_mut(index) else {
            tracing::warn!(index, delta, "Ignoring quantity change of missing cart line");
            return None;
        };

        let wanted = i64::from(line.quantity).saturating_add(delta).max(1);
        line.quantity = u32::try_from(wanted).unwrap_or(u32::MAX);
        tracing::debug!(index, delta, quantity = line.quantity, "Updated cart line quantity");
        Some(line.quantity)
    }

    /// Sum of every line's subtotal.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Number of mugs across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn mug(id: i32) -> Product {
        Catalog::builtin()
            .find(ProductId::new(id))
            .unwrap()
            .clone()
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let mut cart = Cart::new();
        cart.add(&mug(1), None);
        cart.add(&mug(1), None);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_same_text_twice_merges() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&mug(1), Some("hello")), 0);
        assert_eq!(cart.add(&mug(1), Some("hello")), 0);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().quantity, 2);
    }

    #[test]
    fn test_different_text_makes_distinct_lines() {
        let mut cart = Cart::new();
        cart.add(&mug(1), Some("hello"));
        cart.add(&mug(1), Some("world"));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_plain_and_personalized_are_distinct() {
        let mut cart = Cart::new();
        cart.add(&mug(1), None);
        cart.add(&mug(1), Some("hello"));
        assert_eq!(cart.len(), 2);
        assert!(!cart.get(0).unwrap().is_personalized());
        assert!(cart.get(1).unwrap().is_personalized());
    }

    #[test]
    fn test_empty_text_is_no_personalization() {
        let mut cart = Cart::new();
        cart.add(&mug(2), None);
        cart.add(&mug(2), Some(""));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().quantity, 2);
        assert_eq!(cart.get(0).unwrap().custom_text, None);
    }

    #[test]
    fn test_text_is_compared_exactly() {
        let mut cart = Cart::new();
        cart.add(&mug(3), Some("hello"));
        cart.add(&mug(3), Some("hello "));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_update_quantity_clamps_at_one() {
        let mut cart = Cart::new();
        cart.add(&mug(1), None);
        cart.add(&mug(1), None);
        assert_eq!(cart.update_quantity(0, -1000), Some(1));
        assert_eq!(cart.get(0).unwrap().quantity, 1);
        assert_eq!(cart.update_quantity(0, -1), Some(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_extremes_saturate() {
        let mut cart = Cart::new();
        cart.add(&mug(1), None);
        assert_eq!(cart.update_quantity(0, i64::MIN), Some(1));
        assert_eq!(cart.update_quantity(0, i64::MAX), Some(u32::MAX));
        cart.add(&mug(1), None);
        assert_eq!(cart.get(0).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_update_quantity_out_of_range_is_noop() {
        let mut cart = Cart::new();
        cart.add(&mug(1), None);
        let before = cart.clone();
        assert_eq!(cart.update_quantity(5, 1), None);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_price() {
        let mut cart = Cart::new();
        cart.add(&mug(1), None);
        cart.add(&mug(1), None);
        cart.add(&mug(2), None);
        assert_eq!(cart.total_price(), Price::from_units(2670));
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.get(0).unwrap().subtotal(), Price::from_units(1780));
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new();
        assert_eq!(cart.total_price(), Price::ZERO);
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut cart = Cart::new();
        cart.add(&mug(1), None);
        cart.add(&mug(2), None);
        cart.add(&mug(3), None);
        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.product.id, ProductId::new(2));
        let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.remove(0).is_none());

        cart.add(&mug(1), None);
        let before = cart.clone();
        assert!(cart.remove(1).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&mug(1), None);
        cart.clear();
        assert!(cart.is_empty());
    }
}
