//! Status enums for roles, orders and deliveries.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors from parsing status values out of text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid role: {0}")]
    Role(String),
    #[error("invalid delivery stage: {0}")]
    Stage(u8),
}

/// Who is using the app.
///
/// The signed-out state is `Option<Role>::None`; there is no `None` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A customer ordering food.
    User,
    /// A courier picking up delivery tasks.
    Rider,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Rider => write!(f, "rider"),
        }
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(Self::User),
            "rider" => Ok(Self::Rider),
            other => Err(ParseError::Role(other.to_string())),
        }
    }
}

/// Status of a recorded order.
///
/// Checkout is simulated, so every recorded order is already complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// A step in the delivery lifecycle.
///
/// Stages are numbered 1 through 4 and only ever move forward, one step at a
/// time. `Delivered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStage {
    #[default]
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl DeliveryStage {
    /// All stages in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Confirmed,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// The stage number, 1 through 4.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Confirmed => 1,
            Self::Preparing => 2,
            Self::OutForDelivery => 3,
            Self::Delivered => 4,
        }
    }

    /// Look a stage up by its number.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Stage` for numbers outside 1 through 4.
    pub fn from_number(n: u8) -> Result<Self, ParseError> {
        match n {
            1 => Ok(Self::Confirmed),
            2 => Ok(Self::Preparing),
            3 => Ok(Self::OutForDelivery),
            4 => Ok(Self::Delivered),
            other => Err(ParseError::Stage(other)),
        }
    }

    /// The following stage. `Delivered` stays `Delivered`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Confirmed => Self::Preparing,
            Self::Preparing => Self::OutForDelivery,
            Self::OutForDelivery | Self::Delivered => Self::Delivered,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Timeline heading shown for this stage.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Confirmed => "Order Confirmed",
            Self::Preparing => "Preparing Food",
            Self::OutForDelivery => "On the way",
            Self::Delivered => "Delivered",
        }
    }

    /// Fixed timestamp text printed under the heading.
    ///
    /// These are static annotations, not wall-clock times.
    #[must_use]
    pub const fn nominal_time(self) -> &'static str {
        match self {
            Self::Confirmed => "12:30 PM",
            Self::Preparing => "12:35 PM",
            Self::OutForDelivery => "12:45 PM",
            Self::Delivered => "12:55 PM",
        }
    }
}

impl fmt::Display for DeliveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_and_parse() {
        for role in [Role::User, Role::Rider] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
        assert!(matches!("admin".parse::<Role>(), Err(ParseError::Role(_))));
    }

    #[test]
    fn test_stage_numbers_cover_one_through_four() {
        let numbers: Vec<u8> = DeliveryStage::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        for stage in DeliveryStage::ALL {
            assert_eq!(DeliveryStage::from_number(stage.number()), Ok(stage));
        }
        assert_eq!(DeliveryStage::from_number(0), Err(ParseError::Stage(0)));
        assert_eq!(DeliveryStage::from_number(5), Err(ParseError::Stage(5)));
    }

    #[test]
    fn test_stage_next_saturates_at_delivered() {
        assert_eq!(DeliveryStage::Confirmed.next(), DeliveryStage::Preparing);
        assert_eq!(DeliveryStage::Preparing.next(), DeliveryStage::OutForDelivery);
        assert_eq!(DeliveryStage::OutForDelivery.next(), DeliveryStage::Delivered);
        assert_eq!(DeliveryStage::Delivered.next(), DeliveryStage::Delivered);
        assert!(DeliveryStage::Delivered.is_terminal());
        assert!(!DeliveryStage::OutForDelivery.is_terminal());
    }

    #[test]
    fn test_stage_lookup_table() {
        assert_eq!(DeliveryStage::Confirmed.title(), "Order Confirmed");
        assert_eq!(DeliveryStage::OutForDelivery.nominal_time(), "12:45 PM");
        assert_eq!(DeliveryStage::Delivered.to_string(), "Delivered");
    }

    #[test]
    fn test_order_status_serializes_screaming() {
        let json = serde_json::to_string(&OrderStatus::Completed).expect("serialize");
        assert_eq!(json, "\"COMPLETED\"");
        assert_eq!(OrderStatus::Completed.to_string(), "Completed");
    }
}
