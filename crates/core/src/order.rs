//! Kitchen order statuses and transition rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle of a kitchen order.
///
/// Transition rules:
/// - `pending`   -> `preparing`, `cancelled`
/// - `preparing` -> `ready`, `cancelled`
/// - `ready`     -> `served`, `preparing` (sent back)
/// - `served`, `cancelled` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::Preparing,
        Self::Ready,
        Self::Served,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Served => "served",
            Self::Cancelled => "cancelled",
        }
    }

    /// Statuses this status may move to.
    pub fn valid_transitions(self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Preparing, Self::Cancelled],
            Self::Preparing => &[Self::Ready, Self::Cancelled],
            Self::Ready => &[Self::Served, Self::Preparing],
            Self::Served | Self::Cancelled => &[],
        }
    }

    /// Orders still on the kitchen board.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Preparing | Self::Ready)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that an order may move from `current` to `next`.
pub fn validate_transition(current: OrderStatus, next: OrderStatus) -> Result<(), CoreError> {
    if current.valid_transitions().contains(&next) {
        Ok(())
    } else {
        let allowed: Vec<&str> = current
            .valid_transitions()
            .iter()
            .map(|s| s.as_str())
            .collect();
        Err(CoreError::Validation(format!(
            "Cannot move order from '{current}' to '{next}'. Allowed transitions: {allowed:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions() {
        assert!(validate_transition(OrderStatus::Pending, OrderStatus::Preparing).is_ok());
        assert!(validate_transition(OrderStatus::Preparing, OrderStatus::Ready).is_ok());
        assert!(validate_transition(OrderStatus::Ready, OrderStatus::Served).is_ok());
    }

    #[test]
    fn ready_can_be_sent_back() {
        assert!(validate_transition(OrderStatus::Ready, OrderStatus::Preparing).is_ok());
    }

    #[test]
    fn cannot_skip_steps() {
        assert!(validate_transition(OrderStatus::Pending, OrderStatus::Ready).is_err());
        assert!(validate_transition(OrderStatus::Pending, OrderStatus::Served).is_err());
        assert!(validate_transition(OrderStatus::Ready, OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn terminal_statuses_have_no_exits() {
        for next in OrderStatus::ALL {
            assert!(validate_transition(OrderStatus::Served, next).is_err());
            assert!(validate_transition(OrderStatus::Cancelled, next).is_err());
        }
    }

    #[test]
    fn self_transition_rejected() {
        for status in OrderStatus::ALL {
            assert!(validate_transition(status, status).is_err());
        }
    }

    #[test]
    fn active_statuses() {
        assert!(OrderStatus::Pending.is_active());
        assert!(OrderStatus::Ready.is_active());
        assert!(!OrderStatus::Served.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"preparing\""
        );
        assert!(serde_json::from_str::<OrderStatus>("\"done\"").is_err());
    }
}
