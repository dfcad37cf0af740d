use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Delivery pipeline of a shoot. The transition table below is the only
/// place the pipeline order is encoded; callers must go through
/// `can_transition_to` instead of comparing strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShootStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Delivered,
    Cancelled,
}

impl ShootStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShootStatus::Scheduled => "scheduled",
            ShootStatus::Confirmed => "confirmed",
            ShootStatus::InProgress => "in_progress",
            ShootStatus::Completed => "completed",
            ShootStatus::Delivered => "delivered",
            ShootStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(ShootStatus::Scheduled),
            "confirmed" => Some(ShootStatus::Confirmed),
            "in_progress" => Some(ShootStatus::InProgress),
            "completed" => Some(ShootStatus::Completed),
            "delivered" => Some(ShootStatus::Delivered),
            "cancelled" => Some(ShootStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ShootStatus::Delivered | ShootStatus::Cancelled)
    }

    /// Next stage on the happy path, or None from a terminal state.
    pub fn next_in_pipeline(&self) -> Option<ShootStatus> {
        match self {
            ShootStatus::Scheduled => Some(ShootStatus::Confirmed),
            ShootStatus::Confirmed => Some(ShootStatus::InProgress),
            ShootStatus::InProgress => Some(ShootStatus::Completed),
            ShootStatus::Completed => Some(ShootStatus::Delivered),
            ShootStatus::Delivered | ShootStatus::Cancelled => None,
        }
    }

    /// A shoot advances one pipeline step at a time; cancellation is
    /// allowed from every non-terminal state.
    pub fn can_transition_to(&self, target: ShootStatus) -> bool {
        if target == ShootStatus::Cancelled {
            return !self.is_terminal();
        }
        self.next_in_pipeline() == Some(target)
    }
}

impl Display for ShootStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_advances_one_step_at_a_time() {
        let pipeline = [
            ShootStatus::Scheduled,
            ShootStatus::Confirmed,
            ShootStatus::InProgress,
            ShootStatus::Completed,
            ShootStatus::Delivered,
        ];
        for pair in pipeline.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]));
            assert_eq!(pair[0].next_in_pipeline(), Some(pair[1]));
        }
    }

    #[test]
    fn jumps_are_rejected() {
        assert!(!ShootStatus::Scheduled.can_transition_to(ShootStatus::Delivered));
        assert!(!ShootStatus::Scheduled.can_transition_to(ShootStatus::InProgress));
        assert!(!ShootStatus::Confirmed.can_transition_to(ShootStatus::Completed));
        assert!(!ShootStatus::Completed.can_transition_to(ShootStatus::Confirmed));
    }

    #[test]
    fn cancel_is_allowed_from_every_non_terminal_state() {
        for status in [
            ShootStatus::Scheduled,
            ShootStatus::Confirmed,
            ShootStatus::InProgress,
            ShootStatus::Completed,
        ] {
            assert!(status.can_transition_to(ShootStatus::Cancelled));
        }
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for status in [ShootStatus::Delivered, ShootStatus::Cancelled] {
            assert!(status.is_terminal());
            assert_eq!(status.next_in_pipeline(), None);
            assert!(!status.can_transition_to(ShootStatus::Cancelled));
        }
    }

    #[test]
    fn round_trips_through_strings() {
        for status in [
            ShootStatus::Scheduled,
            ShootStatus::Confirmed,
            ShootStatus::InProgress,
            ShootStatus::Completed,
            ShootStatus::Delivered,
            ShootStatus::Cancelled,
        ] {
            assert_eq!(ShootStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ShootStatus::from_str("shipped"), None);
    }
}
