//! CampusBite Core - Shared domain types.
//!
//! This crate provides the types used across all CampusBite components:
//! - `app` - The application state controller (navigation, cart, tracking)
//! - `cli` - Terminal front end that drives the controller
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no async,
//! no timers. This keeps it lightweight and lets any presentation layer
//! depend on it without pulling in a runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities,
//!   roles and delivery stages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
