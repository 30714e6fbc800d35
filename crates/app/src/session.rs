//! Active role and completed-order history.
//!
//! Signing out clears the role only. History recorded under one role is
//! still there after switching to another.

use std::collections::VecDeque;

use campus_bite_core::{OrderId, OrderStatus, Price, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Label shown for when an order was placed.
pub const PLACED_AT_LABEL: &str = "Today";

/// A confirmed order. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    /// Display label for the placement time.
    pub placed_at: String,
    /// Cart subtotal plus delivery fee at confirmation.
    pub total: Price,
    pub status: OrderStatus,
    pub confirmed_at: DateTime<Utc>,
}

/// Completed orders, most recent first.
#[derive(Debug, Clone, Default)]
pub struct History {
    orders: VecDeque<Order>,
}

impl History {
    fn prepend(&mut self, order: Order) {
        self.orders.push_front(order);
    }

    /// Orders from newest to oldest.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Order> + '_ {
        self.orders.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Order> {
        self.orders.front()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Order> {
        self.orders.iter().cloned().collect()
    }
}

/// Role and history for the running session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    role: Option<Role>,
    history: History,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// Assign the role. `None` signs out.
    pub fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
    }

    /// Record a confirmed order at the front of the history.
    pub fn record_order(&mut self, total: Price) -> Order {
        let order = Order {
            id: OrderId::generate(),
            placed_at: PLACED_AT_LABEL.to_string(),
            total,
            status: OrderStatus::Completed,
            confirmed_at: Utc::now(),
        };
        self.history.prepend(order.clone());
        order
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }
}
