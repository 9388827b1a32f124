//! Kruzhki Core - cart, catalog and order types for the mug storefront.
//!
//! The storefront is a single page: a catalog of mugs, a cart, a
//! personalization panel for printing custom text and an order form.
//! This crate holds all of that state and the rules for changing it.
//!
//! # Architecture
//!
//! The core crate contains only types and state transitions - no I/O, no
//! rendering, no network. Display and notification are external
//! collaborators: the [`notify::Notifier`] trait is the only thing the core
//! calls out to.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`catalog`] - Products, categories and the read-only catalog
//! - [`cart`] - Cart lines and find-or-increment bookkeeping
//! - [`personalization`] - Product selection and per-panel draft text
//! - [`order`] - Order form, validation and placed-order snapshots
//! - [`notify`] - Notification collaborator
//! - [`store`] - The [`Storefront`] state container tying it all together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod notify;
pub mod order;
pub mod personalization;
pub mod store;
pub mod types;

pub use cart::{Cart, CartLine, LineKey};
pub use catalog::{Catalog, CatalogError, CatalogFilter, Category, Product};
pub use notify::{Notification, NotificationLog, Notifier, Severity};
pub use order::{OrderError, OrderField, OrderForm, PlacedOrder, validate};
pub use personalization::Personalization;
pub use store::Storefront;
pub use types::*;
