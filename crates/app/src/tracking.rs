//! Delivery progress simulation.
//!
//! A [`DeliveryProgress`] walks one order through the four
//! [`DeliveryStage`]s. A [`TrackingTimer`] drives it: a recurring task that
//! fires every interval while the tracking screen is showing. The timer is
//! an RAII guard, so dropping it cancels the task; the controller keeps it
//! in the same slot as the screen-scoped state and drops it on every exit
//! from the tracking screen.

use core::fmt;
use std::ops::ControlFlow;
use std::time::Duration;

use campus_bite_core::{DeliveryStage, OrderId};
use serde::Serialize;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::DeliveryTask;

/// Identifies one entry into the tracking screen.
///
/// Timer ticks carry the id of the progress they were started for, so a
/// tick can tell when it belongs to a progress that has since been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackingId(Uuid);

impl TrackingId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What is being tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackedOrder {
    /// An order the customer just confirmed.
    Customer { order_id: OrderId },
    /// A task a courier accepted.
    Courier { task: DeliveryTask },
    /// Tracking was opened without a confirmed order.
    Unassigned,
}

/// One row of the tracking timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub stage: DeliveryStage,
    pub number: u8,
    pub title: &'static str,
    pub time: &'static str,
    /// Whether the delivery has got this far.
    pub reached: bool,
}

/// Progress of the single active delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryProgress {
    id: TrackingId,
    order: TrackedOrder,
    stage: DeliveryStage,
}

impl DeliveryProgress {
    /// Start tracking at [`DeliveryStage::Confirmed`].
    #[must_use]
    pub fn new(order: TrackedOrder) -> Self {
        Self {
            id: TrackingId::generate(),
            order,
            stage: DeliveryStage::Confirmed,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TrackingId {
        self.id
    }

    #[must_use]
    pub const fn order(&self) -> &TrackedOrder {
        &self.order
    }

    #[must_use]
    pub const fn stage(&self) -> DeliveryStage {
        self.stage
    }

    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        self.stage.is_terminal()
    }

    /// Move one stage forward. Returns false at the terminal stage.
    pub fn advance(&mut self) -> bool {
        if self.stage.is_terminal() {
            return false;
        }
        self.stage = self.stage.next();
        true
    }

    /// All four stages with their fixed labels and whether each is reached.
    #[must_use]
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        DeliveryStage::ALL
            .into_iter()
            .map(|stage| TimelineEntry {
                stage,
                number: stage.number(),
                title: stage.title(),
                time: stage.nominal_time(),
                reached: self.stage >= stage,
            })
            .collect()
    }
}

/// Recurring tick task, cancelled when dropped.
#[derive(Debug)]
pub struct TrackingTimer {
    id: TrackingId,
    handle: JoinHandle<()>,
}

impl TrackingTimer {
    /// Spawn a task that calls `on_tick` every `period`, starting one period
    /// from now.
    ///
    /// The task ends early if `on_tick` returns `ControlFlow::Break`.
    ///
    /// # Errors
    ///
    /// Returns `TryCurrentError` when called outside a tokio runtime.
    pub fn spawn<F>(
        id: TrackingId,
        period: Duration,
        mut on_tick: F,
    ) -> Result<Self, TryCurrentError>
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let runtime = Handle::try_current()?;
        let period = period.max(Duration::from_millis(1));

        let handle = runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
            debug!(tracking_id = %id, "Tracking timer stopped");
        });

        Ok(Self { id, handle })
    }

    /// The progress this timer drives.
    #[must_use]
    pub const fn id(&self) -> TrackingId {
        self.id
    }

    /// True once the task has stopped on its own.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TrackingTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    const PERIOD: Duration = Duration::from_secs(3);

    // =========================================================================
    // DeliveryProgress
    // =========================================================================

    #[test]
    fn test_new_starts_confirmed() {
        let progress = DeliveryProgress::new(TrackedOrder::Unassigned);
        assert_eq!(progress.stage(), DeliveryStage::Confirmed);
        assert!(!progress.is_delivered());
    }

    #[test]
    fn test_advance_steps_then_holds() {
        let mut progress = DeliveryProgress::new(TrackedOrder::Unassigned);
        let mut seen = vec![progress.stage().number()];
        for _ in 0..5 {
            progress.advance();
            seen.push(progress.stage().number());
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 4, 4]);
        assert!(!progress.advance());
        assert!(progress.is_delivered());
    }

    #[test]
    fn test_timeline_marks_reached_stages() {
        let mut progress = DeliveryProgress::new(TrackedOrder::Unassigned);
        progress.advance();
        let timeline = progress.timeline();
        let reached: Vec<bool> = timeline.iter().map(|e| e.reached).collect();
        assert_eq!(reached, vec![true, true, false, false]);

        let titles: Vec<&str> = timeline.iter().map(|e| e.title).collect();
        assert_eq!(
            titles,
            vec!["Order Confirmed", "Preparing Food", "On the way", "Delivered"]
        );
        assert_eq!(timeline.last().map(|e| e.time), Some("12:55 PM"));
    }

    #[test]
    fn test_each_progress_has_fresh_id() {
        let a = DeliveryProgress::new(TrackedOrder::Unassigned);
        let b = DeliveryProgress::new(TrackedOrder::Unassigned);
        assert_ne!(a.id(), b.id());
    }

    // =========================================================================
    // TrackingTimer
    // =========================================================================

    fn counting_timer(counter: &Arc<AtomicU32>) -> TrackingTimer {
        let counter = Arc::clone(counter);
        TrackingTimer::spawn(TrackingId::generate(), PERIOD, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        })
        .expect("inside runtime")
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_once_per_period() {
        let counter = Arc::new(AtomicU32::new(0));
        let _timer = counting_timer(&counter);

        time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0, "no tick before one period");

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        time::sleep(PERIOD * 2).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let counter = Arc::new(AtomicU32::new(0));
        let timer = counting_timer(&counter);

        time::sleep(Duration::from_millis(3_100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        drop(timer);
        time::sleep(PERIOD * 5).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_break_stops_timer() {
        let counter = Arc::new(AtomicU32::new(0));
        let ticks = Arc::clone(&counter);
        let timer = TrackingTimer::spawn(TrackingId::generate(), PERIOD, move || {
            if ticks.fetch_add(1, Ordering::SeqCst) >= 1 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .expect("inside runtime");

        time::sleep(PERIOD * 4).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(timer.is_finished());
    }

    #[test]
    fn test_spawn_outside_runtime_fails() {
        let result = TrackingTimer::spawn(TrackingId::generate(), PERIOD, || {
            ControlFlow::Continue(())
        });
        assert!(result.is_err());
    }
}
