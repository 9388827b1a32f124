//! Kruzhki Storefront library.
//!
//! This crate provides the terminal storefront as a library, allowing it to
//! be tested and reused: configuration, catalog loading, text rendering and
//! the command shell that drives a [`kruzhki_core::Storefront`] session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod render;
pub mod shell;
pub mod toast;

pub use config::{LogFormat, StorefrontConfig};
pub use error::{AppError, Result};
pub use shell::{Command, CommandError, Flow, Shell};
