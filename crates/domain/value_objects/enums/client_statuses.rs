use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
    PastDue,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Pending => "pending",
            ClientStatus::Active => "active",
            ClientStatus::Completed => "completed",
            ClientStatus::Cancelled => "cancelled",
            ClientStatus::PastDue => "past_due",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ClientStatus::Pending),
            "active" => Some(ClientStatus::Active),
            "completed" => Some(ClientStatus::Completed),
            "cancelled" => Some(ClientStatus::Cancelled),
            "past_due" => Some(ClientStatus::PastDue),
            _ => None,
        }
    }
}

impl Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
