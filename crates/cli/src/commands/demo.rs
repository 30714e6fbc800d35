//! Scripted walkthrough of one order.
//!
//! Picks the user role, adds two burgers and fries, confirms, then prints
//! the tracking timeline each time the delivery moves on.

use std::io::Write;

use campus_bite_app::{CampusBite, Screen};
use campus_bite_core::{MenuItemId, Role};
use tracing::info;

/// Run the demo, stopping after `updates` tracking updates or at delivery.
///
/// # Errors
///
/// Returns an error if the catalog lacks the demo items or stdout fails.
pub async fn run(app: &CampusBite, updates: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout();

    app.select_role(Role::User);
    app.navigate(Screen::Home);
    app.navigate(Screen::RestaurantList);
    app.navigate(Screen::Menu);

    for id in [1, 1, 2] {
        let quantity = app.add_menu_item(MenuItemId::new(id))?;
        info!(item = id, %quantity, "Added");
    }

    app.navigate(Screen::Cart);
    let totals = app.cart_totals();
    writeln!(out, "Subtotal      {}", totals.subtotal)?;
    writeln!(out, "Delivery Fee  {}", totals.delivery_fee)?;
    writeln!(out, "Total         {}", totals.total)?;

    app.navigate(Screen::Checkout);
    let order = app.confirm_checkout();
    writeln!(out, "Order {} placed ({})", order.id, order.total)?;

    let interval = app.config().tracking_interval;
    for _ in 0..updates {
        if let Some(tracking) = app.tracking() {
            for entry in &tracking.timeline {
                let mark = if entry.reached { "[x]" } else { "[ ]" };
                writeln!(out, "  {mark} {} {}", entry.time, entry.title)?;
            }
            writeln!(out)?;
            if tracking.stage.is_terminal() {
                break;
            }
        }
        out.flush()?;
        tokio::time::sleep(interval).await;
    }

    app.navigate(Screen::History);
    writeln!(out, "{} order(s) in history", app.history().len())?;
    Ok(())
}
