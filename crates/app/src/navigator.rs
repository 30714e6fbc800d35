//! Screen navigation state machine.
//!
//! Every screen is a variant of [`Screen`] and every label change goes
//! through [`Navigator::apply`]. Transitions are never rejected: the
//! navigator is a label holder, not a guarded protocol, and callers decide
//! which screens to offer.

use core::fmt;
use core::str::FromStr;

use campus_bite_core::Role;
use serde::{Deserialize, Serialize};

/// A named mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    /// Role picker shown at startup and after logout.
    #[default]
    Entry,
    Registration,
    Home,
    RestaurantList,
    Menu,
    Cart,
    Checkout,
    Tracking,
    RiderDashboard,
    Profile,
    History,
}

impl Screen {
    /// The screen every session starts on.
    pub const INITIAL: Self = Self::Entry;

    /// Every screen, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Entry,
        Self::Registration,
        Self::Home,
        Self::RestaurantList,
        Self::Menu,
        Self::Cart,
        Self::Checkout,
        Self::Tracking,
        Self::RiderDashboard,
        Self::Profile,
        Self::History,
    ];

    /// Where the screen's back button leads, if it has one.
    ///
    /// Back targets are fixed per screen rather than derived from a
    /// navigation trace.
    #[must_use]
    pub const fn back(self) -> Option<Self> {
        match self {
            Self::Registration => Some(Self::Entry),
            Self::RestaurantList | Self::History | Self::Profile | Self::Tracking => {
                Some(Self::Home)
            }
            Self::Menu => Some(Self::RestaurantList),
            Self::Cart => Some(Self::Menu),
            Self::Checkout => Some(Self::Cart),
            Self::Entry | Self::Home | Self::RiderDashboard => None,
        }
    }

    /// Landing screen after picking a role on the entry screen.
    #[must_use]
    pub const fn landing_for(role: Role) -> Self {
        match role {
            Role::User => Self::Registration,
            Role::Rider => Self::RiderDashboard,
        }
    }

    /// Kebab-case name used in logs and at the prompt.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Registration => "registration",
            Self::Home => "home",
            Self::RestaurantList => "restaurant-list",
            Self::Menu => "menu",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Tracking => "tracking",
            Self::RiderDashboard => "rider-dashboard",
            Self::Profile => "profile",
            Self::History => "history",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a screen name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown screen: {0}")]
pub struct UnknownScreen(pub String);

impl FromStr for Screen {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|screen| screen.name() == wanted)
            .ok_or_else(|| UnknownScreen(wanted.to_string()))
    }
}

/// A request to change screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Jump straight to a screen.
    Goto(Screen),
    /// Follow the current screen's back button. No-op without one.
    Back,
    /// Leave the entry screen with a role.
    SelectRole(Role),
    /// Return to the entry screen after signing out.
    Logout,
}

/// The result of applying a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenChange {
    pub from: Screen,
    pub to: Screen,
}

impl ScreenChange {
    /// True when `screen` is newly active after this change.
    #[must_use]
    pub fn entered(&self, screen: Screen) -> bool {
        self.to == screen && self.from != screen
    }

    /// True when `screen` was active before and is not anymore.
    #[must_use]
    pub fn left(&self, screen: Screen) -> bool {
        self.from == screen && self.to != screen
    }

    /// True when the label actually changed.
    #[must_use]
    pub fn is_move(&self) -> bool {
        self.from != self.to
    }
}

/// Holds the active screen.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Screen,
}

impl Navigator {
    /// Create a navigator on [`Screen::INITIAL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> Screen {
        self.current
    }

    /// Where a transition would lead from the current screen.
    #[must_use]
    pub const fn target(&self, transition: Transition) -> Screen {
        match transition {
            Transition::Goto(screen) => screen,
            Transition::Back => match self.current.back() {
                Some(screen) => screen,
                None => self.current,
            },
            Transition::SelectRole(role) => Screen::landing_for(role),
            Transition::Logout => Screen::INITIAL,
        }
    }

    /// Apply a transition and report what changed.
    pub fn apply(&mut self, transition: Transition) -> ScreenChange {
        let from = self.current;
        let to = self.target(transition);
        self.current = to;
        ScreenChange { from, to }
    }
}
