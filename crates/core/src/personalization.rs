//! Personalization panel state.
//!
//! Customers can open a product's panel and type text to print on the mug.
//! Only one panel is active at a time, but each product keeps its own draft:
//! switching to another mug and back does not lose what was typed.

use std::collections::HashMap;

use crate::types::ProductId;

/// Active panel and per-product draft texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Personalization {
    active: Option<ProductId>,
    drafts: HashMap<ProductId, String>,
}

impl Personalization {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the panel for `product_id`.
    pub fn open(&mut self, product_id: ProductId) {
        self.active = Some(product_id);
    }

    /// Close the active panel. Drafts are kept.
    pub fn close(&mut self) {
        self.active = None;
    }

    /// Product whose panel is open.
    #[must_use]
    pub const fn active(&self) -> Option<ProductId> {
        self.active
    }

    /// Draft text of the active panel, empty if none.
    #[must_use]
    pub fn draft(&self) -> &str {
        self.active.map_or("", |id| self.draft_for(id))
    }

    /// Draft text kept for `product_id`, empty if none.
    #[must_use]
    pub fn draft_for(&self, product_id: ProductId) -> &str {
        self.drafts.get(&product_id).map_or("", String::as_str)
    }

    /// Replace the active panel's draft.
    ///
    /// Returns `false` and does nothing when no panel is open.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        let Some(id) = self.active else {
            return false;
        };
        let text = text.into();
        if text.is_empty() {
            self.drafts.remove(&id);
        } else {
            self.drafts.insert(id, text);
        }
        true
    }

    /// Whether the active draft may be added to the cart.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.active.is_some() && !self.draft().trim().is_empty()
    }

    /// Take the active draft for adding to the cart, clearing it.
    ///
    /// Returns `None` without touching anything when [`can_submit`] is
    /// false. The text is returned exactly as typed.
    ///
    /// [`can_submit`]: Self::can_submit
    pub fn take_draft(&mut self) -> Option<(ProductId, String)> {
        if !self.can_submit() {
            return None;
        }
        let id = self.active?;
        self.drafts.remove(&id).map(|text| (id, text))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_without_panel_is_ignored() {
        let mut p = Personalization::new();
        assert!(!p.set_draft("hello"));
        assert_eq!(p.draft(), "");
        assert!(!p.can_submit());
    }

    #[test]
    fn test_drafts_are_per_panel() {
        let mut p = Personalization::new();
        p.open(ProductId::new(1));
        p.set_draft("for mum");
        p.open(ProductId::new(2));
        assert_eq!(p.draft(), "");
        p.set_draft("for dad");
        p.open(ProductId::new(1));
        assert_eq!(p.draft(), "for mum");
        assert_eq!(p.draft_for(ProductId::new(2)), "for dad");
    }

    #[test]
    fn test_whitespace_draft_cannot_submit() {
        let mut p = Personalization::new();
        p.open(ProductId::new(1));
        p.set_draft("   ");
        assert!(!p.can_submit());
        assert!(p.take_draft().is_none());
        assert_eq!(p.draft(), "   ");
    }

    #[test]
    fn test_take_draft_clears_only_active() {
        let mut p = Personalization::new();
        p.open(ProductId::new(2));
        p.set_draft("other");
        p.open(ProductId::new(1));
        p.set_draft(" hi ");
        let (id, text) = p.take_draft().unwrap();
        assert_eq!(id, ProductId::new(1));
        assert_eq!(text, " hi ");
        assert_eq!(p.draft(), "");
        assert_eq!(p.draft_for(ProductId::new(2)), "other");
    }

    #[test]
    fn test_close_keeps_drafts() {
        let mut p = Personalization::new();
        p.open(ProductId::new(3));
        p.set_draft("keep me");
        p.close();
        assert!(p.active().is_none());
        assert!(!p.can_submit());
        p.open(ProductId::new(3));
        assert_eq!(p.draft(), "keep me");
    }
}
