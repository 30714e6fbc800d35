//! The cart aggregate.
//!
//! One [`LineItem`] per menu item id, kept in insertion order. Quantities
//! never drop below one; taking an item out of the cart is always an
//! explicit [`Cart::remove`]. Totals are recomputed on every read.

use campus_bite_core::{CurrencyCode, MenuItemId, Price, Quantity};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::MenuItem;

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub id: MenuItemId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: Quantity,
}

impl LineItem {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Subtotal, delivery fee and amount to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

/// Ordered collection of line items.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    currency: CurrencyCode,
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart whose totals are reported in `currency`.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Add one unit of a menu item.
    ///
    /// An existing line for the same id gains one unit; otherwise a new line
    /// with quantity one is appended. The price is trusted as given: its
    /// amount is read in the cart's currency, which is the catalog's.
    /// Returns the line's quantity after the add.
    pub fn add(&mut self, item: &MenuItem) -> Quantity {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.increment();
            return line.quantity;
        }
        self.items.push(LineItem {
            id: item.id,
            name: item.name.clone(),
            unit_price: Price::new(item.price.amount, self.currency),
            quantity: Quantity::ONE,
        });
        Quantity::ONE
    }

    /// Delete the line for `id`. Returns the removed line, if any.
    pub fn remove(&mut self, id: MenuItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|line| line.id == id)?;
        Some(self.items.remove(index))
    }

    /// Change a line's quantity by `delta`, never going below one.
    ///
    /// Returns the new quantity, or `None` if no line has this id.
    pub fn adjust_quantity(&mut self, id: MenuItemId, delta: i32) -> Option<Quantity> {
        let line = self.items.iter_mut().find(|line| line.id == id)?;
        line.quantity = line.quantity.adjusted(delta);
        Some(line.quantity)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines, as shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity.get()))
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// `Σ(unit_price × quantity)` over the current lines, clamped at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .fold(Price::zero(self.currency), |sum, line| {
                sum.saturating_add(line.line_total().amount)
            })
    }

    /// Subtotal plus a delivery fee. The fee is not stored on the cart.
    #[must_use]
    pub fn totals(&self, delivery_fee: Decimal) -> CartTotals {
        let subtotal = self.subtotal();
        CartTotals {
            subtotal,
            delivery_fee: Price::new(delivery_fee, self.currency),
            total: subtotal.saturating_add(delivery_fee),
        }
    }
}
