//! Line-oriented command loop.
//!
//! Each line is one command; after it runs, the session snapshot is printed
//! as a single JSON line. Input is read asynchronously so the tracking timer
//! keeps running while the prompt waits.
//!
//! ```text
//! role user
//! add 1
//! adjust 1 -3
//! checkout
//! show
//! quit
//! ```

use std::io::Write;

use campus_bite_app::{AppError, CampusBite, Screen, UnknownScreen};
use campus_bite_core::{MenuItemId, ParseError, Role, TaskId};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const HELP: &str = "\
commands:
  goto <screen>        show a screen (entry, home, menu, cart, checkout, ...)
  back                 follow the back button
  role <user|rider>    pick a role
  add <item-id>        add one unit of a menu item
  remove <item-id>     remove a cart line
  adjust <item-id> <n> change a line's quantity by n
  checkout             confirm the order
  accept <task-id>     accept a courier task
  tick                 advance tracking by one stage
  switch               courier: back to the entry screen
  logout               sign out
  show                 print the snapshot
  help                 this text
  quit                 exit";

/// Errors from parsing a command line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    #[error(transparent)]
    Screen(#[from] UnknownScreen),
    #[error(transparent)]
    Role(#[from] ParseError),
}

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Goto(Screen),
    Back,
    Role(Role),
    Add(MenuItemId),
    Remove(MenuItemId),
    Adjust(MenuItemId, i32),
    Checkout,
    Accept(TaskId),
    Tick,
    Switch,
    Logout,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for unknown verbs and bad or missing arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb {
            "goto" => Self::Goto(required(&mut words, "screen")?.parse()?),
            "back" => Self::Back,
            "role" => Self::Role(required(&mut words, "role")?.parse()?),
            "add" => Self::Add(number(&mut words, "item id")?),
            "remove" => Self::Remove(number(&mut words, "item id")?),
            "adjust" => {
                let id = number(&mut words, "item id")?;
                Self::Adjust(id, number(&mut words, "delta")?)
            }
            "checkout" => Self::Checkout,
            "accept" => Self::Accept(number(&mut words, "task id")?),
            "tick" => Self::Tick,
            "switch" => Self::Switch,
            "logout" => Self::Logout,
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<&'a str, CommandError> {
    words.next().ok_or(CommandError::MissingArgument(name))
}

fn number<'a, T>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<T, CommandError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    required(words, name)?
        .parse()
        .map_err(|e: T::Err| CommandError::InvalidArgument {
            name,
            reason: e.to_string(),
        })
}

/// Apply a command to the controller.
///
/// # Errors
///
/// Returns `AppError` for catalog lookups that miss.
pub fn dispatch(app: &CampusBite, command: Command) -> Result<(), AppError> {
    match command {
        Command::Goto(screen) => {
            app.navigate(screen);
        }
        Command::Back => {
            app.back();
        }
        Command::Role(role) => {
            app.select_role(role);
        }
        Command::Add(id) => {
            app.add_menu_item(id)?;
        }
        Command::Remove(id) => {
            app.remove_from_cart(id);
        }
        Command::Adjust(id, delta) => {
            app.adjust_quantity(id, delta);
        }
        Command::Checkout => {
            app.confirm_checkout();
        }
        Command::Accept(id) => {
            app.accept_task(id)?;
        }
        Command::Tick => {
            app.tick_tracking();
        }
        Command::Switch => {
            app.switch_to_user_mode();
        }
        Command::Logout => {
            app.logout();
        }
        Command::Show | Command::Help | Command::Quit => {}
    }
    Ok(())
}

/// Run the loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading stdin or writing stdout fails. Bad commands
/// are reported and skipped.
pub async fn run(app: &CampusBite) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "Bad command");
                continue;
            }
        };
        debug!(?command, "Dispatching");

        let mut out = std::io::stdout().lock();
        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            command => {
                if let Err(e) = dispatch(app, command) {
                    warn!(error = %e, "Command rejected");
                }
                serde_json::to_writer(&mut out, &app.snapshot())?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line() {
        assert!(matches!(Command::parse("   "), Ok(None)));
    }

    #[test]
    fn test_parse_verbs() {
        let cases = [
            ("goto restaurant-list", Command::Goto(Screen::RestaurantList)),
            ("back", Command::Back),
            ("role rider", Command::Role(Role::Rider)),
            ("add 3", Command::Add(MenuItemId::new(3))),
            ("remove 3", Command::Remove(MenuItemId::new(3))),
            ("adjust 1 -100", Command::Adjust(MenuItemId::new(1), -100)),
            ("checkout", Command::Checkout),
            ("accept 2", Command::Accept(TaskId::new(2))),
            ("exit", Command::Quit),
        ];
        for (line, expected) in cases {
            assert_eq!(Command::parse(line).ok().flatten(), Some(expected), "{line}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse("dance"), Err(CommandError::Unknown(_))));
        assert!(matches!(
            Command::parse("add"),
            Err(CommandError::MissingArgument("item id"))
        ));
        assert!(matches!(
            Command::parse("adjust 1 lots"),
            Err(CommandError::InvalidArgument { name: "delta", .. })
        ));
        assert!(matches!(Command::parse("goto moon"), Err(CommandError::Screen(_))));
        assert!(matches!(Command::parse("role chef"), Err(CommandError::Role(_))));
    }

    #[test]
    fn test_dispatch_drives_controller() {
        let app = CampusBite::default();
        for line in ["role user", "add 1", "add 1", "add 2", "adjust 2 -5"] {
            let command = Command::parse(line).ok().flatten().expect(line);
            dispatch(&app, command).expect(line);
        }
        assert_eq!(app.cart_item_count(), 3);
        assert_eq!(app.screen(), Screen::Registration);

        let missing = Command::parse("add 99").ok().flatten().expect("parses");
        assert!(matches!(
            dispatch(&app, missing),
            Err(AppError::UnknownMenuItem(_))
        ));
    }
}
