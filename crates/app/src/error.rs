//! Unified error type for the controller.
//!
//! The commands that drive the session are total and never fail. Errors only
//! come from loading configuration and the catalog, and from looking up
//! catalog entries by id on behalf of a caller.

use campus_bite_core::{MenuItemId, TaskId};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// No menu item with this id in the catalog.
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),

    /// No courier task with this id in the catalog.
    #[error("Unknown delivery task: {0}")]
    UnknownTask(TaskId),
}
