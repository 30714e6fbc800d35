//! Static catalog data: restaurants, menu items and courier tasks.
//!
//! The catalog is configuration, not state. It is loaded once, shared as
//! `Arc<Catalog>` and never mutated by the controller. Cart lines copy the
//! name and price out of it at add time.

use std::collections::HashSet;
use std::path::Path;

use campus_bite_core::{CurrencyCode, MenuItemId, Price, PriceError, RestaurantId, TaskId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors loading or validating a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: i32 },
    #[error("invalid price for {kind} {id}: {source}")]
    InvalidPrice {
        kind: &'static str,
        id: i32,
        #[source]
        source: PriceError,
    },
}

/// A place to order from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub rating: f32,
    /// Delivery estimate text, e.g. "15-20 min".
    pub eta: String,
}

/// Something that can be put in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Price,
}

/// A delivery job offered to couriers on their dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTask {
    pub id: TaskId,
    pub store: String,
    /// Distance text, e.g. "200m away".
    pub distance: String,
    /// What the courier earns for the trip.
    pub pay: Price,
    /// Number of items to pick up.
    pub items: u32,
    pub destination: String,
}

/// The read-only dataset the controller consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    currency: CurrencyCode,
    restaurants: Vec<Restaurant>,
    menu: Vec<MenuItem>,
    tasks: Vec<DeliveryTask>,
}

// =============================================================================
// File Format
// =============================================================================

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    currency: CurrencyCode,
    #[serde(default)]
    restaurants: Vec<Restaurant>,
    #[serde(default)]
    menu: Vec<MenuEntry>,
    #[serde(default)]
    tasks: Vec<TaskEntry>,
}

#[derive(Debug, Deserialize)]
struct MenuEntry {
    id: MenuItemId,
    name: String,
    price: Decimal,
}

#[derive(Debug, Deserialize)]
struct TaskEntry {
    id: TaskId,
    store: String,
    distance: String,
    pay: Decimal,
    items: u32,
    destination: String,
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        let currency = file.currency;

        ensure_unique("restaurant", file.restaurants.iter().map(|r| r.id.as_i32()))?;
        ensure_unique("menu item", file.menu.iter().map(|m| m.id.as_i32()))?;
        ensure_unique("task", file.tasks.iter().map(|t| t.id.as_i32()))?;

        let menu = file
            .menu
            .into_iter()
            .map(|entry| {
                let price = Price::try_new(entry.price, currency).map_err(|source| {
                    CatalogError::InvalidPrice {
                        kind: "menu item",
                        id: entry.id.as_i32(),
                        source,
                    }
                })?;
                Ok(MenuItem {
                    id: entry.id,
                    name: entry.name,
                    price,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let tasks = file
            .tasks
            .into_iter()
            .map(|entry| {
                let pay = Price::try_new(entry.pay, currency).map_err(|source| {
                    CatalogError::InvalidPrice {
                        kind: "task",
                        id: entry.id.as_i32(),
                        source,
                    }
                })?;
                Ok(DeliveryTask {
                    id: entry.id,
                    store: entry.store,
                    distance: entry.distance,
                    pay,
                    items: entry.items,
                    destination: entry.destination,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self {
            currency,
            restaurants: file.restaurants,
            menu,
            tasks,
        })
    }
}

fn ensure_unique(kind: &'static str, ids: impl Iterator<Item = i32>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

// =============================================================================
// Catalog
// =============================================================================

impl Catalog {
    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the YAML is malformed, an id repeats within
    /// a section, or a price is negative.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::try_from(file)
    }

    /// Load a catalog file from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise the
    /// same errors as [`Catalog::from_yaml_str`].
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_yaml_str(&content)?;
        debug!(
            restaurants = catalog.restaurants.len(),
            menu = catalog.menu.len(),
            tasks = catalog.tasks.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// The default campus dataset.
    #[must_use]
    pub fn builtin() -> Self {
        let currency = CurrencyCode::PKR;
        let rupees = |n: i64| Price::new(Decimal::from(n), currency);

        let restaurants = [
            (1, "FCCU Cafe", 4.8, "15-20 min"),
            (2, "Student Lounge Snacks", 4.2, "10-15 min"),
            (3, "Grill & Chill", 4.5, "20-30 min"),
        ]
        .into_iter()
        .map(|(id, name, rating, eta)| Restaurant {
            id: RestaurantId::new(id),
            name: name.to_string(),
            rating,
            eta: eta.to_string(),
        })
        .collect();

        let menu = [
            (1, "Chicken Zinger Burger", 350),
            (2, "Fries Large", 150),
            (3, "Club Sandwich", 280),
            (4, "Coke 500ml", 80),
        ]
        .into_iter()
        .map(|(id, name, price)| MenuItem {
            id: MenuItemId::new(id),
            name: name.to_string(),
            price: rupees(price),
        })
        .collect();

        let tasks = vec![
            DeliveryTask {
                id: TaskId::new(1),
                store: "FCCU Cafe".to_string(),
                distance: "200m away".to_string(),
                pay: rupees(50),
                items: 3,
                destination: "Lucas Center".to_string(),
            },
            DeliveryTask {
                id: TaskId::new(2),
                store: "Student Lounge".to_string(),
                distance: "500m away".to_string(),
                pay: rupees(60),
                items: 1,
                destination: "Hostel 5".to_string(),
            },
        ];

        Self {
            currency,
            restaurants,
            menu,
            tasks,
        }
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Restaurants promoted on the home screen.
    pub fn featured(&self, limit: usize) -> impl Iterator<Item = &Restaurant> {
        self.restaurants.iter().take(limit)
    }

    #[must_use]
    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    #[must_use]
    pub fn tasks(&self) -> &[DeliveryTask] {
        &self.tasks
    }

    #[must_use]
    pub fn restaurant(&self, id: RestaurantId) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn menu_item(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.menu.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&DeliveryTask> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
