use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Workflow stage of an inbound lead. Stored capitalized, matching the
/// values the intake pipeline has always written.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadStatus {
    #[default]
    Pending,
    Contacted,
    Qualified,
    Booked,
    Declined,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Pending => "Pending",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Booked => "Booked",
            LeadStatus::Declined => "Declined",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(LeadStatus::Pending),
            "Contacted" => Some(LeadStatus::Contacted),
            "Qualified" => Some(LeadStatus::Qualified),
            "Booked" => Some(LeadStatus::Booked),
            "Declined" => Some(LeadStatus::Declined),
            _ => None,
        }
    }

    /// Booked and Declined end the lead workflow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LeadStatus::Booked | LeadStatus::Declined)
    }
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
