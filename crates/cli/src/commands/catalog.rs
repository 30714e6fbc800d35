//! Catalog listing.

use std::io::Write;

use campus_bite_app::CampusBite;

/// Print the catalog as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing to stdout fails.
pub fn print(app: &CampusBite) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, app.catalog())?;
    writeln!(out)?;
    Ok(())
}
