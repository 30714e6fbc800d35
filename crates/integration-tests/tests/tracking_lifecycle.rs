//! Integration tests for timer-driven delivery tracking.

use campus_bite_app::{Screen, TrackedOrder};
use campus_bite_core::{DeliveryStage, MenuItemId};
use campus_bite_integration_tests::{advance_intervals, test_app};

fn stage_number(app: &campus_bite_app::CampusBite) -> Option<u8> {
    app.tracking_stage().map(DeliveryStage::number)
}

#[tokio::test(start_paused = true)]
async fn test_stage_increases_by_one_per_interval() {
    let app = test_app();
    app.add_menu_item(MenuItemId::new(1)).expect("burger");
    app.confirm_checkout();

    let mut observed = vec![stage_number(&app)];
    for _ in 0..6 {
        advance_intervals(1).await;
        observed.push(stage_number(&app));
    }

    let observed: Vec<u8> = observed.into_iter().flatten().collect();
    assert_eq!(observed, vec![1, 2, 3, 4, 4, 4, 4]);
}

#[tokio::test(start_paused = true)]
async fn test_timeline_follows_stage() {
    let app = test_app();
    app.confirm_checkout();
    advance_intervals(2).await;

    let tracking = app.tracking().expect("tracking");
    assert_eq!(tracking.stage, DeliveryStage::OutForDelivery);
    let reached: Vec<(&str, bool)> = tracking
        .timeline
        .iter()
        .map(|entry| (entry.time, entry.reached))
        .collect();
    assert_eq!(
        reached,
        vec![
            ("12:30 PM", true),
            ("12:35 PM", true),
            ("12:45 PM", true),
            ("12:55 PM", false),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_every_exit_cancels_the_timer() {
    let exits: [fn(&campus_bite_app::CampusBite); 5] = [
        |app| {
            app.back();
        },
        |app| {
            app.navigate(Screen::History);
        },
        |app| {
            app.navigate(Screen::Home);
        },
        |app| {
            app.logout();
        },
        |app| {
            app.switch_to_user_mode();
        },
    ];

    for exit in exits {
        let app = test_app();
        app.confirm_checkout();
        assert!(app.is_tracking_live());

        exit(&app);
        assert!(!app.is_tracking_live());

        let frozen = app.tracking_stage();
        advance_intervals(4).await;
        assert_eq!(app.tracking_stage(), frozen);
    }
}

#[tokio::test(start_paused = true)]
async fn test_reentry_for_new_order_starts_over() {
    let app = test_app();
    app.confirm_checkout();
    advance_intervals(3).await;
    assert_eq!(app.tracking_stage(), Some(DeliveryStage::Delivered));

    app.navigate(Screen::History);
    app.navigate(Screen::Menu);
    app.add_menu_item(MenuItemId::new(2)).expect("fries");
    let order = app.confirm_checkout();

    assert_eq!(app.tracking_stage(), Some(DeliveryStage::Confirmed));
    assert_eq!(
        app.tracking().map(|t| t.order),
        Some(TrackedOrder::Customer { order_id: order.id })
    );
    advance_intervals(1).await;
    assert_eq!(app.tracking_stage(), Some(DeliveryStage::Preparing));
}

#[tokio::test(start_paused = true)]
async fn test_dropped_controller_stops_timer() {
    let app = test_app();
    app.confirm_checkout();
    drop(app);
    // Nothing left to advance; the task must not panic or linger.
    advance_intervals(3).await;
}

#[tokio::test(start_paused = true, flavor = "current_thread")]
async fn test_snapshot_reports_live_timer() {
    let app = test_app();
    app.confirm_checkout();
    let snapshot = app.snapshot();
    let tracking = snapshot.tracking.expect("tracking");
    assert!(tracking.live);

    app.navigate(Screen::History);
    assert_eq!(app.snapshot().tracking.map(|t| t.live), Some(false));
}
