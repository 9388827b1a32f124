//! Interactive terminal shell.
//!
//! Every input line is one customer interaction: browse a tab, add a mug,
//! type personalization text, change quantities, fill in the order form.
//! Lines are parsed into a [`Command`] and applied to the [`Storefront`];
//! the affected part of the page and any toasts are rendered afterwards.
//!
//! Cart lines are numbered from 1 on screen and in commands.

use std::io::{BufRead, Write};
use std::str::FromStr;

use askama::Template;
use kruzhki_core::catalog::UnknownCategory;
use kruzhki_core::order::UnknownField;
use kruzhki_core::{Catalog, CatalogFilter, OrderField, ProductId, Storefront};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::render::{
    CartSheet, CatalogPage, HelpPage, OrderDialog, OrderPlaced, PersonalizePanel, Toasts,
};
use crate::toast::ToastQueue;

/// Errors in a typed command. Shown to the customer; never fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Неизвестная команда `{0}`, введите `help`")]
    Unknown(String),

    #[error("`{command}`: не хватает аргумента ({what})")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("Неверное значение ({what}): `{value}`")]
    InvalidArgument { what: &'static str, value: String },

    #[error("Неизвестная категория `{0}`")]
    Category(String),

    #[error("Неизвестное поле `{0}`")]
    Field(String),
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a catalog tab.
    Catalog(CatalogFilter),
    /// Add a mug, optionally with text.
    Add {
        product_id: ProductId,
        text: Option<String>,
    },
    /// Open a personalization panel.
    Personalize(ProductId),
    /// Replace the open panel's draft.
    Draft(String),
    /// Add the drafted mug to the cart.
    Apply,
    Cart,
    /// Change the quantity of a cart line (0-based index).
    Quantity { index: usize, delta: i64 },
    /// Remove a cart line (0-based index).
    Remove { index: usize },
    /// Open the order dialog.
    Checkout,
    /// Fill in an order form field.
    Set { field: OrderField, value: String },
    Submit,
    /// Close whatever panel or dialog is open.
    Close,
    Help,
    Quit,
}

/// Split off the first whitespace-separated word.
fn split_word(input: &str) -> (&str, &str) {
    input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(word, rest)| (word, rest.trim_start()))
}

fn require<'a>(
    value: &'a str,
    command: &'static str,
    what: &'static str,
) -> std::result::Result<&'a str, CommandError> {
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, what })
    } else {
        Ok(value)
    }
}

fn parse_product(value: &str, command: &'static str) -> std::result::Result<ProductId, CommandError> {
    require(value, command, "id товара")?
        .parse()
        .map_err(|_| CommandError::InvalidArgument {
            what: "id товара",
            value: value.to_string(),
        })
}

/// Parse a 1-based line number into a 0-based index.
fn parse_line(value: &str, command: &'static str) -> std::result::Result<usize, CommandError> {
    require(value, command, "номер строки")?
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidArgument {
            what: "номер строки",
            value: value.to_string(),
        })
}

fn parse_delta(value: &str) -> std::result::Result<i64, CommandError> {
    require(value, "qty", "изменение")?
        .trim_start_matches('+')
        .parse()
        .map_err(|_| CommandError::InvalidArgument {
            what: "изменение",
            value: value.to_string(),
        })
}

impl From<UnknownCategory> for CommandError {
    fn from(err: UnknownCategory) -> Self {
        Self::Category(err.0)
    }
}

impl From<UnknownField> for CommandError {
    fn from(err: UnknownField) -> Self {
        Self::Field(err.0)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let (word, rest) = split_word(input.trim());

        match word.to_lowercase().as_str() {
            "catalog" | "tab" => {
                if rest.is_empty() {
                    Ok(Self::Catalog(CatalogFilter::All))
                } else {
                    Ok(Self::Catalog(rest.parse()?))
                }
            }
            "add" => {
                let (id, text) = split_word(rest);
                Ok(Self::Add {
                    product_id: parse_product(id, "add")?,
                    text: (!text.is_empty()).then(|| text.to_string()),
                })
            }
            "personalize" | "text" => Ok(Self::Personalize(parse_product(rest, "personalize")?)),
            "draft" => Ok(Self::Draft(rest.to_string())),
            "apply" => Ok(Self::Apply),
            "cart" => Ok(Self::Cart),
            "inc" | "+" => Ok(Self::Quantity {
                index: parse_line(rest, "inc")?,
                delta: 1,
            }),
            "dec" | "-" => Ok(Self::Quantity {
                index: parse_line(rest, "dec")?,
                delta: -1,
            }),
            "qty" => {
                let (line, delta) = split_word(rest);
                Ok(Self::Quantity {
                    index: parse_line(line, "qty")?,
                    delta: parse_delta(delta)?,
                })
            }
            "remove" | "rm" => Ok(Self::Remove {
                index: parse_line(rest, "remove")?,
            }),
            "checkout" | "order" => Ok(Self::Checkout),
            "set" => {
                let (field, value) = split_word(rest);
                Ok(Self::Set {
                    field: require(field, "set", "поле")?.parse()?,
                    value: value.to_string(),
                })
            }
            "submit" | "confirm" => Ok(Self::Submit),
            "close" => Ok(Self::Close),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A storefront session driven by text commands.
pub struct Shell {
    store: Storefront<ToastQueue>,
    shop_name: String,
    filter: CatalogFilter,
}

impl Shell {
    /// Start a session over `catalog`.
    #[must_use]
    pub fn new(config: &StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            store: Storefront::new(catalog, ToastQueue::new()),
            shop_name: config.shop_name.clone(),
            filter: CatalogFilter::All,
        }
    }

    /// The session state.
    #[must_use]
    pub const fn store(&self) -> &Storefront<ToastQueue> {
        &self.store
    }

    /// Show the catalog, then execute every input line until `quit` or end
    /// of input.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read, output cannot be written or
    /// a template fails to render.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.show_catalog(out)?;
        for line in input.lines() {
            if self.execute(&line?, out)? == Flow::Quit {
                break;
            }
        }
        info!(
            lines = self.store.cart().len(),
            "Session ended"
        );
        Ok(())
    }

    /// Execute one input line.
    ///
    /// Blank lines and lines starting with `#` are ignored. Malformed
    /// commands print an explanation and leave the session untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if output cannot be written or a template fails to
    /// render.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                debug!(input = line, error = %err, "Rejected command");
                writeln!(out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        let flow = self.apply(command, out)?;
        self.show_toasts(out)?;
        Ok(flow)
    }

    #[instrument(skip(self, out))]
    fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Catalog(filter) => {
                self.filter = filter;
                self.show_catalog(out)?;
            }
            Command::Add { product_id, text } => {
                if !self.store.add_product(product_id, text.as_deref()) {
                    writeln!(out, "Нет такого товара: {product_id}")?;
                }
            }
            Command::Personalize(product_id) => {
                if self.store.select_product(product_id) {
                    self.show_panel(out)?;
                } else {
                    writeln!(out, "Нет такого товара: {product_id}")?;
                }
            }
            Command::Draft(text) => {
                if self.store.set_draft(text) {
                    self.show_panel(out)?;
                } else {
                    writeln!(out, "Сначала выберите кружку: personalize <id>")?;
                }
            }
            Command::Apply => {
                if !self.store.submit_draft() {
                    writeln!(out, "Напишите текст, чтобы добавить кружку с текстом")?;
                }
            }
            Command::Cart => self.show_cart(out)?,
            Command::Quantity { index, delta } => {
                if self.store.update_quantity(index, delta) {
                    self.show_cart(out)?;
                } else {
                    writeln!(out, "В корзине нет строки {}", index + 1)?;
                }
            }
            Command::Remove { index } => {
                if self.store.remove_from_cart(index) {
                    self.show_cart(out)?;
                } else {
                    writeln!(out, "В корзине нет строки {}", index + 1)?;
                }
            }
            Command::Checkout => {
                if self.store.open_order_dialog() {
                    self.show_order(out)?;
                } else {
                    writeln!(out, "Корзина пуста")?;
                }
            }
            Command::Set { field, value } => {
                if self.store.is_order_dialog_open() {
                    self.store.set_field(field, value);
                    self.show_order(out)?;
                } else {
                    writeln!(out, "Сначала откройте оформление заказа: checkout")?;
                }
            }
            Command::Submit => self.submit(out)?,
            Command::Close => {
                self.store.close_order_dialog();
                self.store.close_personalization();
            }
            Command::Help => render_to(out, &HelpPage)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn submit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if !self.store.is_order_dialog_open() {
            writeln!(out, "Сначала откройте оформление заказа: checkout")?;
            return Ok(());
        }

        // A rejected order has already raised a toast.
        if let Ok(order) = self.store.submit_order() {
            match serde_json::to_string(&order) {
                Ok(json) => info!(order = %json, "Order ready for fulfilment"),
                Err(e) => warn!(error = %e, "Failed to serialize order"),
            }
            render_to(out, &OrderPlaced::from(&order))?;
        }
        Ok(())
    }

    fn show_catalog<W: Write>(&self, out: &mut W) -> Result<()> {
        render_to(
            out,
            &CatalogPage::new(&self.store, self.filter, &self.shop_name),
        )
    }

    fn show_cart<W: Write>(&self, out: &mut W) -> Result<()> {
        render_to(out, &CartSheet::from(self.store.cart()))
    }

    fn show_panel<W: Write>(&self, out: &mut W) -> Result<()> {
        match PersonalizePanel::new(&self.store) {
            Some(panel) => render_to(out, &panel),
            None => Ok(()),
        }
    }

    fn show_order<W: Write>(&self, out: &mut W) -> Result<()> {
        render_to(out, &OrderDialog::new(&self.store))
    }

    fn show_toasts<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let toasts = self.store.notifier_mut().drain();
        if toasts.is_empty() {
            return Ok(());
        }
        render_to(
            out,
            &Toasts {
                toasts: toasts.into_iter().map(Into::into).collect(),
            },
        )
    }
}

fn render_to<W: Write, T: Template>(out: &mut W, template: &T) -> Result<()> {
    let text = template.render()?;
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}
