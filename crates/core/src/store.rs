//! The storefront state container.
//!
//! [`Storefront`] owns everything the page shows: the catalog, the cart, the
//! personalization panel, the order form and whether the order dialog is
//! open. Every change goes through one of its methods; renderers only read.

use tracing::{debug, info, instrument, warn};

use crate::cart::Cart;
use crate::catalog::{Catalog, Product};
use crate::notify::{Notification, Notifier};
use crate::order::{OrderError, OrderField, OrderForm, PlacedOrder};
use crate::personalization::Personalization;
use crate::types::{Price, ProductId};

/// Session state of the storefront page.
#[derive(Debug)]
pub struct Storefront<N> {
    catalog: Catalog,
    cart: Cart,
    form: OrderForm,
    personalization: Personalization,
    order_dialog_open: bool,
    notifier: N,
}

impl<N: Notifier> Storefront<N> {
    /// Start a session: empty cart, blank form, everything closed.
    pub fn new(catalog: Catalog, notifier: N) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            form: OrderForm::default(),
            personalization: Personalization::new(),
            order_dialog_open: false,
            notifier,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn form(&self) -> &OrderForm {
        &self.form
    }

    pub const fn personalization(&self) -> &Personalization {
        &self.personalization
    }

    pub const fn is_order_dialog_open(&self) -> bool {
        self.order_dialog_open
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    pub const fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Product whose personalization panel is open.
    pub fn selected_product(&self) -> Option<&Product> {
        self.personalization
            .active()
            .and_then(|id| self.catalog.find(id))
    }

    /// Sum of price times quantity over the cart.
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    /// Number of mugs in the cart.
    pub fn total_quantity(&self) -> u32 {
        self.cart.total_quantity()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Put one `product` in the cart, optionally with printed text.
    ///
    /// Merges with an identical line if there is one and notifies the
    /// customer either way.
    pub fn add_to_cart(&mut self, product: &Product, custom_text: Option<&str>) {
        self.cart.add(product, custom_text);

        let personalized = custom_text.is_some_and(|t| !t.is_empty());
        let description = if personalized {
            format!("{} с вашим текстом", product.name)
        } else {
            product.name.clone()
        };
        self.notifier
            .notify(Notification::info("✨ Добавлено в корзину!", description));
    }

    /// Put one catalog product in the cart by id.
    ///
    /// Returns `false` if the catalog has no such product.
    pub fn add_product(&mut self, product_id: ProductId, custom_text: Option<&str>) -> bool {
        let Some(product) = self.catalog.find(product_id).cloned() else {
            warn!(%product_id, "Ignoring add of unknown product");
            return false;
        };
        self.add_to_cart(&product, custom_text);
        true
    }

    /// Remove the cart line at `index`. Out-of-range indices are ignored.
    pub fn remove_from_cart(&mut self, index: usize) -> bool {
        self.cart.remove(index).is_some()
    }

    /// Change the quantity of the cart line at `index` by `delta`, never
    /// going below 1. Out-of-range indices are ignored.
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> bool {
        self.cart.update_quantity(index, delta).is_some()
    }

    // =========================================================================
    // Personalization
    // =========================================================================

    /// Open the personalization panel for a catalog product.
    ///
    /// Returns `false` if the catalog has no such product.
    pub fn select_product(&mut self, product_id: ProductId) -> bool {
        if self.catalog.find(product_id).is_none() {
            warn!(%product_id, "Ignoring selection of unknown product");
            return false;
        }
        self.personalization.open(product_id);
        true
    }

    /// Replace the draft text of the open panel.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        self.personalization.set_draft(text)
    }

    /// Add the selected product with the drafted text, then clear the draft.
    ///
    /// Does nothing unless a panel is open and its draft has visible text.
    pub fn submit_draft(&mut self) -> bool {
        let Some((product_id, text)) = self.personalization.take_draft() else {
            debug!("Draft not submittable");
            return false;
        };
        match self.catalog.find(product_id).cloned() {
            Some(product) => {
                self.add_to_cart(&product, Some(&text));
                true
            }
            None => false,
        }
    }

    /// Close the personalization panel.
    pub fn close_personalization(&mut self) {
        self.personalization.close();
    }

    // =========================================================================
    // Order
    // =========================================================================

    /// Open the order dialog.
    ///
    /// There is nothing to order from an empty cart, so this returns `false`
    /// and leaves the dialog closed in that case.
    pub fn open_order_dialog(&mut self) -> bool {
        if self.cart.is_empty() {
            debug!("Not opening order dialog for empty cart");
            return false;
        }
        self.order_dialog_open = true;
        true
    }

    pub fn close_order_dialog(&mut self) {
        self.order_dialog_open = false;
    }

    /// Update one field of the order form.
    pub fn set_field(&mut self, field: OrderField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Place the order.
    ///
    /// On success the cart is emptied, the form reset and the dialog closed;
    /// the returned [`PlacedOrder`] is the hand-off point for fulfilment.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::MissingRequiredField`] when the name, phone or
    /// address is blank. The customer is warned and nothing else changes.
    #[instrument(skip(self), fields(lines = self.cart.len()))]
    pub fn submit_order(&mut self) -> Result<PlacedOrder, OrderError> {
        if let Err(err) = self.form.validate() {
            warn!(error = %err, "Order rejected");
            self.notifier.notify(Notification::destructive(
                "⚠️ Заполните обязательные поля",
                "Укажите ФИО, телефон и адрес доставки",
            ));
            return Err(err);
        }

        let customer = std::mem::take(&mut self.form);
        let order = PlacedOrder::new(customer, &self.cart);
        self.notifier.notify(Notification::info(
            "🎉 Заказ оформлен!",
            format!(
                "Спасибо, {}! Мы свяжемся с вами в ближайшее время.",
                order.customer.name
            ),
        ));

        self.cart.clear();
        self.order_dialog_open = false;

        info!(
            reference = %order.reference,
            total = %order.total_price,
            quantity = order.total_quantity,
            "Order placed"
        );
        Ok(order)
    }
}

impl<N: Notifier + Default> Default for Storefront<N> {
    fn default() -> Self {
        Self::new(Catalog::builtin(), N::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::{NotificationLog, Severity};

    fn store() -> Storefront<NotificationLog> {
        Storefront::default()
    }

    fn fill(store: &mut Storefront<NotificationLog>, name: &str, phone: &str, address: &str) {
        store.set_field(OrderField::Name, name);
        store.set_field(OrderField::Phone, phone);
        store.set_field(OrderField::Address, address);
    }

    #[test]
    fn test_add_to_cart_notifies() {
        let mut store = store();
        assert!(store.add_product(ProductId::new(1), None));
        let note = store.notifier().last().unwrap();
        assert_eq!(note.title, "✨ Добавлено в корзину!");
        assert_eq!(note.description, "Креативная кружка");
        assert_eq!(note.severity, Severity::Info);
    }

    #[test]
    fn test_add_personalized_mentions_text() {
        let mut store = store();
        store.add_product(ProductId::new(2), Some("hello"));
        let note = store.notifier().last().unwrap();
        assert_eq!(note.description, "Милая иллюстрация с вашим текстом");
    }

    #[test]
    fn test_add_unknown_product_is_ignored() {
        let mut store = store();
        assert!(!store.add_product(ProductId::new(99), None));
        assert!(store.cart().is_empty());
        assert!(store.notifier().entries().is_empty());
    }

    #[test]
    fn test_totals() {
        let mut store = store();
        store.add_product(ProductId::new(1), None);
        store.add_product(ProductId::new(1), None);
        store.add_product(ProductId::new(1), Some("hi"));
        assert_eq!(store.total_price(), Price::from_units(2670));
        assert_eq!(store.total_quantity(), 3);
    }

    #[test]
    fn test_update_and_remove_out_of_range() {
        let mut store = store();
        assert!(!store.remove_from_cart(0));
        assert!(!store.update_quantity(0, 1));
        store.add_product(ProductId::new(1), None);
        assert!(!store.remove_from_cart(3));
        assert_eq!(store.cart().len(), 1);
    }

    #[test]
    fn test_submit_draft_adds_and_clears() {
        let mut store = store();
        assert!(store.select_product(ProductId::new(3)));
        assert!(store.set_draft("Лучшей маме"));
        assert!(store.submit_draft());
        let line = store.cart().get(0).unwrap();
        assert_eq!(line.custom_text.as_deref(), Some("Лучшей маме"));
        assert_eq!(store.personalization().draft(), "");
        assert_eq!(
            store.selected_product().map(|p| p.id),
            Some(ProductId::new(3))
        );
    }

    #[test]
    fn test_submit_blank_draft_is_refused() {
        let mut store = store();
        store.select_product(ProductId::new(3));
        store.set_draft("  ");
        assert!(!store.submit_draft());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_select_unknown_product() {
        let mut store = store();
        assert!(!store.select_product(ProductId::new(0)));
        assert!(store.selected_product().is_none());
    }

    #[test]
    fn test_order_dialog_needs_items() {
        let mut store = store();
        assert!(!store.open_order_dialog());
        assert!(!store.is_order_dialog_open());
        store.add_product(ProductId::new(1), None);
        assert!(store.open_order_dialog());
        store.close_order_dialog();
        assert!(!store.is_order_dialog_open());
    }

    #[test]
    fn test_invalid_order_changes_nothing() {
        let mut store = store();
        store.add_product(ProductId::new(1), None);
        store.open_order_dialog();
        fill(&mut store, "", "123", "X");

        let cart_before = store.cart().clone();
        let form_before = store.form().clone();

        let err = store.submit_order().unwrap_err();
        assert_eq!(
            err,
            OrderError::MissingRequiredField {
                fields: vec![OrderField::Name]
            }
        );
        assert_eq!(store.cart(), &cart_before);
        assert_eq!(store.form(), &form_before);
        assert!(store.is_order_dialog_open());
        assert_eq!(
            store.notifier().last().unwrap().severity,
            Severity::Destructive
        );
    }

    #[test]
    fn test_valid_order_resets_session() {
        let mut store = store();
        store.add_product(ProductId::new(1), None);
        store.add_product(ProductId::new(2), Some("hey"));
        store.open_order_dialog();
        fill(&mut store, "Ivan", "+79001234567", "Moscow");
        store.set_field(OrderField::Comment, "after 6pm");

        let order = store.submit_order().unwrap();
        assert_eq!(order.customer.name, "Ivan");
        assert_eq!(order.customer.comment, "after 6pm");
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.total_price, Price::from_units(1780));

        assert!(store.cart().is_empty());
        assert!(store.form().is_blank());
        assert!(!store.is_order_dialog_open());
        assert_eq!(
            store.notifier().last().unwrap().description,
            "Спасибо, Ivan! Мы свяжемся с вами в ближайшее время."
        );
    }
}
