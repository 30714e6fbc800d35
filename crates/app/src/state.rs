//! The application state controller.
//!
//! [`CampusBite`] owns everything a session has: the active screen, the
//! role, the cart, the order history and the delivery being tracked. All of
//! it sits behind one lock, so user commands and tracking timer ticks are
//! applied one at a time and never interleave.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use campus_bite_core::{DeliveryStage, MenuItemId, Price, Quantity, Role, TaskId};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::cart::{Cart, CartTotals, LineItem};
use crate::catalog::{Catalog, MenuItem};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::navigator::{Navigator, Screen, ScreenChange, Transition};
use crate::session::{Order, SessionStore};
use crate::tracking::{DeliveryProgress, TimelineEntry, TrackedOrder, TrackingId, TrackingTimer};

/// Handle to the session controller.
///
/// This struct is cheaply cloneable via `Arc`; every clone drives the same
/// session. Commands must be issued from within a tokio runtime for the
/// tracking screen to advance on its own.
#[derive(Clone)]
pub struct CampusBite {
    inner: Arc<Inner>,
}

struct Inner {
    config: AppConfig,
    catalog: Arc<Catalog>,
    state: Mutex<SessionState>,
}

struct SessionState {
    navigator: Navigator,
    cart: Cart,
    session: SessionStore,
    tracking: Option<DeliveryProgress>,
    /// Present only while the tracking screen is showing.
    timer: Option<TrackingTimer>,
}

/// Everything a view needs to render, taken under a single lock.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub screen: Screen,
    pub role: Option<Role>,
    pub cart: Vec<LineItem>,
    pub cart_item_count: u32,
    pub totals: CartTotals,
    pub history: Vec<Order>,
    pub tracking: Option<TrackingSnapshot>,
}

/// Read-only view of the delivery being tracked.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingSnapshot {
    pub order: TrackedOrder,
    pub stage: DeliveryStage,
    pub timeline: Vec<TimelineEntry>,
    /// Whether a timer is currently advancing the stage.
    pub live: bool,
}

impl CampusBite {
    /// Create a controller over an injected catalog.
    #[must_use]
    pub fn new(config: AppConfig, catalog: Arc<Catalog>) -> Self {
        let state = SessionState {
            navigator: Navigator::new(),
            cart: Cart::new(catalog.currency()),
            session: SessionStore::new(),
            tracking: None,
            timer: None,
        };

        Self {
            inner: Arc::new(Inner {
                config,
                catalog,
                state: Mutex::new(state),
            }),
        }
    }

    /// Create a controller, loading the catalog named in `config` or falling
    /// back to the built-in one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the configured catalog file cannot be
    /// loaded.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        Ok(Self::new(config, Arc::new(catalog)))
    }

    /// Create a controller from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if configuration or the catalog fail to load.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_config(AppConfig::from_env()?)
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The delivery fee in the catalog currency.
    #[must_use]
    pub fn delivery_fee(&self) -> Price {
        Price::new(self.inner.config.delivery_fee, self.inner.catalog.currency())
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock_state(&self.inner.state)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Show a screen. Any screen may be requested from any other.
    #[instrument(skip(self))]
    pub fn navigate(&self, screen: Screen) -> ScreenChange {
        let mut state = self.lock();
        self.transition(&mut state, Transition::Goto(screen), None)
    }

    /// Follow the current screen's back button.
    #[instrument(skip(self))]
    pub fn back(&self) -> ScreenChange {
        let mut state = self.lock();
        self.transition(&mut state, Transition::Back, None)
    }

    /// Pick a role on the entry screen and go to its landing screen.
    #[instrument(skip(self))]
    pub fn select_role(&self, role: Role) -> ScreenChange {
        let mut state = self.lock();
        state.session.set_role(Some(role));
        info!(%role, "Role selected");
        self.transition(&mut state, Transition::SelectRole(role), None)
    }

    /// Sign out and return to the entry screen.
    ///
    /// Cart and history are kept; only the role and the tracked delivery go.
    #[instrument(skip(self))]
    pub fn logout(&self) -> ScreenChange {
        let mut state = self.lock();
        let change = self.transition(&mut state, Transition::Logout, None);
        state.session.set_role(None);
        state.tracking = None;
        info!(
            cart_lines = state.cart.len(),
            history = state.session.history().all().len(),
            "Logged out"
        );
        change
    }

    /// The courier dashboard's way back to the entry screen. The role is
    /// left as it is.
    #[instrument(skip(self))]
    pub fn switch_to_user_mode(&self) -> ScreenChange {
        let mut state = self.lock();
        self.transition(&mut state, Transition::Goto(Screen::Entry), None)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `item`. Returns the line's new quantity.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub fn add_to_cart(&self, item: &MenuItem) -> Quantity {
        let quantity = self.lock().cart.add(item);
        debug!(%quantity, "Added to cart");
        quantity
    }

    /// Add one unit of a catalog menu item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownMenuItem` if the catalog has no such item.
    pub fn add_menu_item(&self, id: MenuItemId) -> Result<Quantity, AppError> {
        let item = self
            .inner
            .catalog
            .menu_item(id)
            .ok_or(AppError::UnknownMenuItem(id))?;
        Ok(self.add_to_cart(item))
    }

    /// Delete a cart line. Absent ids are ignored.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, id: MenuItemId) -> Option<LineItem> {
        let removed = self.lock().cart.remove(id);
        debug!(removed = removed.is_some(), "Remove from cart");
        removed
    }

    /// Change a line's quantity by `delta`, flooring at one.
    #[instrument(skip(self))]
    pub fn adjust_quantity(&self, id: MenuItemId, delta: i32) -> Option<Quantity> {
        let quantity = self.lock().cart.adjust_quantity(id, delta);
        debug!(?quantity, "Adjusted quantity");
        quantity
    }

    // =========================================================================
    // Checkout & Tracking
    // =========================================================================

    /// Place the order: record it, empty the cart and start tracking.
    ///
    /// Happens under one lock, so no view can observe the order recorded
    /// with the cart still full. Confirming an empty cart records an order
    /// for the delivery fee alone; hiding checkout in that case is up to the
    /// view.
    #[instrument(skip(self))]
    pub fn confirm_checkout(&self) -> Order {
        let mut state = self.lock();
        let totals = state.cart.totals(self.inner.config.delivery_fee);
        let order = state.session.record_order(totals.total);
        state.cart.clear();
        info!(order_id = %order.id, total = %order.total, "Order confirmed");

        let seed = TrackedOrder::Customer { order_id: order.id };
        self.transition(&mut state, Transition::Goto(Screen::Tracking), Some(seed));
        order
    }

    /// Accept a courier task and follow it on the tracking screen.
    ///
    /// Cart and history are not touched.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownTask` if the catalog has no such task.
    #[instrument(skip(self))]
    pub fn accept_task(&self, id: TaskId) -> Result<ScreenChange, AppError> {
        let task = self
            .inner
            .catalog
            .task(id)
            .cloned()
            .ok_or(AppError::UnknownTask(id))?;
        info!(store = %task.store, destination = %task.destination, "Task accepted");

        let mut state = self.lock();
        let seed = TrackedOrder::Courier { task };
        Ok(self.transition(&mut state, Transition::Goto(Screen::Tracking), Some(seed)))
    }

    /// Advance the tracked delivery by one stage, as a timer tick would.
    ///
    /// Returns the stage afterwards, or `None` when nothing is tracked.
    pub fn tick_tracking(&self) -> Option<DeliveryStage> {
        let mut state = self.lock();
        let progress = state.tracking.as_mut()?;
        if progress.advance() {
            debug!(stage = progress.stage().number(), "Delivery advanced");
        }
        Some(progress.stage())
    }

    /// Apply a screen transition and acquire or release the tracking timer.
    ///
    /// `seed` starts a fresh delivery even when already on the tracking
    /// screen. Without a seed, entering tracking follows the latest order.
    fn transition(
        &self,
        state: &mut SessionState,
        transition: Transition,
        seed: Option<TrackedOrder>,
    ) -> ScreenChange {
        let change = state.navigator.apply(transition);
        if change.is_move() {
            debug!(from = %change.from, to = %change.to, "Screen changed");
        }

        if change.left(Screen::Tracking)
            && let Some(timer) = state.timer.take()
        {
            debug!(tracking_id = %timer.id(), "Tracking timer cancelled");
        }

        let seed = seed.or_else(|| {
            change.entered(Screen::Tracking).then(|| {
                state
                    .session
                    .history()
                    .latest()
                    .map_or(TrackedOrder::Unassigned, |order| TrackedOrder::Customer {
                        order_id: order.id,
                    })
            })
        });
        if let Some(order) = seed {
            self.start_tracking(state, order);
        }

        change
    }

    fn start_tracking(&self, state: &mut SessionState, order: TrackedOrder) {
        state.timer = None;

        let progress = DeliveryProgress::new(order);
        let id = progress.id();
        state.tracking = Some(progress);

        let inner = Arc::downgrade(&self.inner);
        match TrackingTimer::spawn(id, self.inner.config.tracking_interval, move || {
            on_tick(&inner, id)
        }) {
            Ok(timer) => state.timer = Some(timer),
            Err(e) => warn!(
                error = %e,
                "No async runtime; delivery progress will only advance on manual ticks"
            ),
        }
        info!(tracking_id = %id, "Tracking started");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.lock().navigator.current()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.lock().session.role()
    }

    #[must_use]
    pub fn cart_items(&self) -> Vec<LineItem> {
        self.lock().cart.items().to_vec()
    }

    #[must_use]
    pub fn cart_subtotal(&self) -> Price {
        self.lock().cart.subtotal()
    }

    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        self.lock().cart.totals(self.inner.config.delivery_fee)
    }

    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        self.lock().cart.item_count()
    }

    /// Completed orders, most recent first.
    #[must_use]
    pub fn history(&self) -> Vec<Order> {
        self.lock().session.history().to_vec()
    }

    #[must_use]
    pub fn tracking_stage(&self) -> Option<DeliveryStage> {
        self.lock().tracking.as_ref().map(DeliveryProgress::stage)
    }

    #[must_use]
    pub fn tracking(&self) -> Option<TrackingSnapshot> {
        let state = self.lock();
        tracking_snapshot(&state)
    }

    /// True while a timer is advancing the tracked delivery.
    #[must_use]
    pub fn is_tracking_live(&self) -> bool {
        timer_live(&self.lock())
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            screen: state.navigator.current(),
            role: state.session.role(),
            cart: state.cart.items().to_vec(),
            cart_item_count: state.cart.item_count(),
            totals: state.cart.totals(self.inner.config.delivery_fee),
            history: state.session.history().to_vec(),
            tracking: tracking_snapshot(&state),
        }
    }
}

impl Default for CampusBite {
    fn default() -> Self {
        Self::new(AppConfig::default(), Arc::new(Catalog::builtin()))
    }
}

fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    // Every mutation leaves the state consistent before it can panic, so a
    // poisoned lock is still safe to use.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn tracking_snapshot(state: &SessionState) -> Option<TrackingSnapshot> {
    state.tracking.as_ref().map(|progress| TrackingSnapshot {
        order: progress.order().clone(),
        stage: progress.stage(),
        timeline: progress.timeline(),
        live: timer_live(state),
    })
}

fn timer_live(state: &SessionState) -> bool {
    state.timer.as_ref().is_some_and(|timer| !timer.is_finished())
}

/// Timer callback. Stops the timer once it no longer owns the active
/// delivery or the controller is gone.
fn on_tick(inner: &Weak<Inner>, id: TrackingId) -> ControlFlow<()> {
    let Some(inner) = inner.upgrade() else {
        return ControlFlow::Break(());
    };
    let mut state = lock_state(&inner.state);

    let owns_timer = state.timer.as_ref().is_some_and(|timer| timer.id() == id);
    if !owns_timer {
        return ControlFlow::Break(());
    }

    match state.tracking.as_mut() {
        Some(progress) if progress.id() == id => {
            if progress.advance() {
                debug!(tracking_id = %id, stage = progress.stage().number(), "Delivery advanced");
            }
            ControlFlow::Continue(())
        }
        _ => ControlFlow::Break(()),
    }
}
