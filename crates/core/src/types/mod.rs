//! Core types for CampusBite.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod quantity;
pub mod status;

pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use quantity::Quantity;
pub use status::*;
