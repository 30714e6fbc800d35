//! Integration tests for roles, logout and the courier flow.
//!
//! Logging out deliberately keeps the cart and the order history. These
//! tests pin that behavior down.

use campus_bite_app::{AppError, Screen, TrackedOrder};
use campus_bite_core::{DeliveryStage, MenuItemId, Role, TaskId};
use campus_bite_integration_tests::{advance_intervals, test_app};

#[tokio::test(start_paused = true)]
async fn test_logout_keeps_cart_and_history() {
    let app = test_app();
    app.select_role(Role::User);
    app.add_menu_item(MenuItemId::new(1)).expect("burger");
    app.confirm_checkout();
    app.navigate(Screen::Menu);
    app.add_menu_item(MenuItemId::new(3)).expect("sandwich");
    app.navigate(Screen::Profile);

    let cart_before = app.cart_items();
    let history_before = app.history();

    app.logout();

    assert_eq!(app.role(), None);
    assert_eq!(app.screen(), Screen::Entry);
    assert_eq!(app.cart_items(), cart_before);
    assert_eq!(app.history(), history_before);
}

#[tokio::test(start_paused = true)]
async fn test_history_survives_role_switch_to_rider() {
    let app = test_app();
    app.select_role(Role::User);
    app.confirm_checkout();
    app.navigate(Screen::Profile);
    app.logout();

    app.select_role(Role::Rider);
    assert_eq!(app.screen(), Screen::RiderDashboard);
    assert_eq!(app.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_courier_task_runs_same_lifecycle() {
    let app = test_app();
    app.select_role(Role::Rider);

    let change = app.accept_task(TaskId::new(1)).expect("task");
    assert_eq!(change.from, Screen::RiderDashboard);
    assert_eq!(change.to, Screen::Tracking);
    assert!(app.history().is_empty());
    assert!(app.cart_items().is_empty());

    match app.tracking().map(|t| t.order) {
        Some(TrackedOrder::Courier { task }) => {
            assert_eq!(task.store, "FCCU Cafe");
            assert_eq!(task.items, 3);
        }
        other => panic!("expected courier tracking, got {other:?}"),
    }

    advance_intervals(3).await;
    assert_eq!(app.tracking_stage(), Some(DeliveryStage::Delivered));
}

#[test]
fn test_unknown_task_leaves_session_alone() {
    let app = test_app();
    app.select_role(Role::Rider);
    assert!(matches!(
        app.accept_task(TaskId::new(42)),
        Err(AppError::UnknownTask(_))
    ));
    assert_eq!(app.screen(), Screen::RiderDashboard);
    assert_eq!(app.tracking_stage(), None);
}

#[test]
fn test_role_is_none_only_after_logout() {
    let app = test_app();
    assert_eq!(app.role(), None);
    app.select_role(Role::User);
    app.navigate(Screen::Entry);
    assert_eq!(app.role(), Some(Role::User), "plain navigation keeps the role");
    app.logout();
    assert_eq!(app.role(), None);
}
