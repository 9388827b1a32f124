//! Text rendering of the storefront page.
//!
//! Each part of the page (catalog, cart sheet, personalization panel, order
//! dialog, toasts) has a view struct with display-ready strings and an
//! Askama template under `templates/`. Views are built from the store and
//! never change it.

use askama::Template;
use kruzhki_core::{
    Cart, CartLine, CatalogFilter, Notification, Notifier, OrderField, PlacedOrder, Product,
    Severity, Storefront,
};

use crate::filters;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub category: &'static str,
    /// The customer has unsaved text for this mug.
    pub has_draft: bool,
}

impl ProductView {
    fn new(product: &Product, draft: &str) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.label(),
            has_draft: !draft.is_empty(),
        }
    }
}

/// Catalog tab display data for templates.
#[derive(Debug, Clone)]
pub struct TabView {
    pub label: &'static str,
    pub active: bool,
}

/// Catalog page template.
#[derive(Template)]
#[template(path = "catalog.txt")]
pub struct CatalogPage<'a> {
    pub shop_name: &'a str,
    pub tabs: Vec<TabView>,
    pub products: Vec<ProductView>,
    pub cart_badge: u32,
}

impl<'a> CatalogPage<'a> {
    pub fn new<N: Notifier>(
        store: &Storefront<N>,
        filter: CatalogFilter,
        shop_name: &'a str,
    ) -> Self {
        let personalization = store.personalization();
        Self {
            shop_name,
            tabs: CatalogFilter::TABS
                .into_iter()
                .map(|tab| TabView {
                    label: tab.label(),
                    active: tab == filter,
                })
                .collect(),
            products: store
                .catalog()
                .filter(filter)
                .map(|p| ProductView::new(p, personalization.draft_for(p.id)))
                .collect(),
            cart_badge: store.total_quantity(),
        }
    }
}

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct LineView {
    /// 1-based position, as typed in commands.
    pub number: usize,
    pub name: String,
    /// Empty when not personalized.
    pub custom_text: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

impl LineView {
    fn new(index: usize, line: &CartLine) -> Self {
        Self {
            number: index + 1,
            name: line.product.name.clone(),
            custom_text: line.custom_text.clone().unwrap_or_default(),
            quantity: line.quantity,
            unit_price: line.product.price.to_string(),
            subtotal: line.subtotal().to_string(),
        }
    }
}

/// Cart sheet template.
#[derive(Template)]
#[template(path = "cart.txt")]
pub struct CartSheet {
    pub lines: Vec<LineView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartSheet {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(i, line)| LineView::new(i, line))
                .collect(),
            total: cart.total_price().to_string(),
            item_count: cart.total_quantity(),
        }
    }
}

/// Personalization panel template.
#[derive(Template)]
#[template(path = "personalize.txt")]
pub struct PersonalizePanel {
    pub product_name: String,
    pub price: String,
    pub draft: String,
    pub can_submit: bool,
}

impl PersonalizePanel {
    /// The open panel, if any.
    pub fn new<N: Notifier>(store: &Storefront<N>) -> Option<Self> {
        let product = store.selected_product()?;
        let personalization = store.personalization();
        Some(Self {
            product_name: product.name.clone(),
            price: product.price.to_string(),
            draft: personalization.draft().to_string(),
            can_submit: personalization.can_submit(),
        })
    }
}

/// Order form field display data for templates.
#[derive(Debug, Clone)]
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

/// Order dialog template.
#[derive(Template)]
#[template(path = "order.txt")]
pub struct OrderDialog {
    pub fields: Vec<FieldView>,
    pub item_count: u32,
    pub total: String,
}

impl OrderDialog {
    pub fn new<N: Notifier>(store: &Storefront<N>) -> Self {
        let form = store.form();
        Self {
            fields: OrderField::ALL
                .into_iter()
                .map(|field| FieldView {
                    key: field.as_str(),
                    label: field.label(),
                    value: form.get(field).to_string(),
                    required: field.is_required(),
                })
                .collect(),
            item_count: store.total_quantity(),
            total: store.total_price().to_string(),
        }
    }
}

/// Order confirmation template.
#[derive(Template)]
#[template(path = "order_placed.txt")]
pub struct OrderPlaced {
    pub reference: String,
    pub item_count: u32,
    pub total: String,
}

impl From<&PlacedOrder> for OrderPlaced {
    fn from(order: &PlacedOrder) -> Self {
        Self {
            reference: order.reference.to_string(),
            item_count: order.total_quantity,
            total: order.total_price.to_string(),
        }
    }
}

/// Toast display data for templates.
#[derive(Debug, Clone)]
pub struct ToastView {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl From<Notification> for ToastView {
    fn from(notification: Notification) -> Self {
        Self {
            destructive: notification.severity == Severity::Destructive,
            title: notification.title,
            description: notification.description,
        }
    }
}

/// Toast list template.
#[derive(Template)]
#[template(path = "toasts.txt")]
pub struct Toasts {
    pub toasts: Vec<ToastView>,
}

/// Command reference template.
#[derive(Template, Default)]
#[template(path = "help.txt")]
pub struct HelpPage;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kruzhki_core::{Category, NotificationLog, ProductId};

    use super::*;

    fn store() -> Storefront<NotificationLog> {
        Storefront::default()
    }

    #[test]
    fn test_catalog_page_lists_filtered_products() {
        let store = store();
        let page = CatalogPage::new(&store, CatalogFilter::Category(Category::Cute), "Shop");
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.tabs.iter().filter(|t| t.active).count(), 1);

        let text = page.render().unwrap();
        assert!(text.contains("Shop"));
        assert!(text.contains("Милая иллюстрация"));
        assert!(!text.contains("Креативная кружка"));
        assert!(text.contains("[Милые]"));
    }

    #[test]
    fn test_catalog_badge_counts_mugs() {
        let mut store = store();
        store.add_product(ProductId::new(1), None);
        store.add_product(ProductId::new(1), None);
        let page = CatalogPage::new(&store, CatalogFilter::All, "Shop");
        assert_eq!(page.cart_badge, 2);
        assert!(page.render().unwrap().contains("Корзина (2)"));
    }

    #[test]
    fn test_empty_cart_sheet() {
        let sheet = CartSheet::from(store().cart());
        assert!(sheet.render().unwrap().contains("Корзина пуста"));
    }

    #[test]
    fn test_cart_sheet_lines_and_total() {
        let mut store = store();
        store.add_product(ProductId::new(1), None);
        store.add_product(ProductId::new(1), None);
        store.add_product(ProductId::new(2), Some("Лучшей маме"));

        let sheet = CartSheet::from(store.cart());
        assert_eq!(sheet.lines.len(), 2);
        assert_eq!(sheet.lines.first().unwrap().subtotal, "1780 ₽");

        let text = sheet.render().unwrap();
        assert!(text.contains("1. Креативная кружка"));
        assert!(text.contains("2 шт."));
        assert!(text.contains("«Лучшей маме»"));
        assert!(text.contains("Итого: 2670 ₽"));
    }

    #[test]
    fn test_personalize_panel_requires_selection() {
        let mut store = store();
        assert!(PersonalizePanel::new(&store).is_none());
        store.select_product(ProductId::new(3));
        store.set_draft("Доброе утро");
        let panel = PersonalizePanel::new(&store).unwrap();
        assert!(panel.can_submit);
        assert!(panel.render().unwrap().contains("«Доброе утро»"));
    }

    #[test]
    fn test_order_dialog_marks_required_fields() {
        let mut store = store();
        store.set_field(OrderField::Name, "Ivan");
        let dialog = OrderDialog::new(&store);
        let required: Vec<_> = dialog
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key)
            .collect();
        assert_eq!(required, vec!["name", "phone", "address"]);
        assert!(dialog.render().unwrap().contains("Ivan"));
    }

    #[test]
    fn test_toasts_render_severity() {
        let toasts = Toasts {
            toasts: vec![
                Notification::info("ok", "fine").into(),
                Notification::destructive("bad", "fix it").into(),
            ],
        };
        let text = toasts.render().unwrap();
        assert!(text.contains(">> ok - fine"));
        assert!(text.contains("!! bad - fix it"));
    }
}
