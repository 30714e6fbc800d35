//! CampusBite application state controller.
//!
//! The controller is the part of the app with rules in it. Views read a
//! [`SessionSnapshot`] and send commands back; everything else (layout,
//! icons, form fields) lives outside this crate.
//!
//! # Architecture
//!
//! - [`navigator`] - Screen state machine with a single transition function
//! - [`cart`] - Cart aggregate and derived totals
//! - [`tracking`] - Delivery stage progression and its cancellable timer
//! - [`session`] - Active role and completed-order history
//! - [`catalog`] - Read-only restaurants, menu and courier tasks
//! - [`state`] - [`CampusBite`], the controller tying the above together
//!
//! # Example
//!
//! ```rust
//! use campus_bite_app::{CampusBite, Screen};
//! use campus_bite_core::{MenuItemId, Role};
//!
//! let app = CampusBite::default();
//! app.select_role(Role::User);
//! app.add_menu_item(MenuItemId::new(1)).unwrap();
//! app.add_menu_item(MenuItemId::new(1)).unwrap();
//! assert_eq!(app.cart_subtotal().to_string(), "Rs. 700");
//! assert_eq!(app.screen(), Screen::Registration);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod navigator;
pub mod session;
pub mod state;
pub mod tracking;

pub use cart::{Cart, CartTotals, LineItem};
pub use catalog::{Catalog, CatalogError, DeliveryTask, MenuItem, Restaurant};
pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use navigator::{Navigator, Screen, ScreenChange, Transition, UnknownScreen};
pub use session::{History, Order, SessionStore};
pub use state::{CampusBite, SessionSnapshot, TrackingSnapshot};
pub use tracking::{DeliveryProgress, TimelineEntry, TrackedOrder, TrackingId, TrackingTimer};
