//! Integration tests for CampusBite.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p campus-bite-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart to history, end to end
//! - `tracking_lifecycle` - Timer-driven delivery stages and cancellation
//! - `role_switching` - Logout, courier tasks and what survives them
//!
//! Timer tests run on a paused tokio clock, so they finish instantly and
//! never depend on wall-clock timing.

use std::sync::Arc;
use std::time::Duration;

use campus_bite_app::{AppConfig, CampusBite, Catalog};
use rust_decimal::Decimal;

/// Tracking interval used by every test controller.
pub const INTERVAL: Duration = Duration::from_secs(3);

/// A controller over the built-in catalog with a 50 rupee fee.
#[must_use]
pub fn test_app() -> CampusBite {
    let config = AppConfig::default()
        .with_delivery_fee(Decimal::from(50))
        .with_tracking_interval(INTERVAL);
    CampusBite::new(config, Arc::new(Catalog::builtin()))
}

/// Let `n` tracking intervals elapse on the paused clock.
pub async fn advance_intervals(n: u32) {
    tokio::time::sleep(INTERVAL * n + Duration::from_millis(50)).await;
}
