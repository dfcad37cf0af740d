use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Service level a client is billed at. Pricing and deliverables for each
/// tier live in `value_objects::tiers::TierPlan`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Pilot,
    T1,
    T2,
    Vip,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Pilot => "pilot",
            Tier::T1 => "t1",
            Tier::T2 => "t2",
            Tier::Vip => "vip",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pilot" => Some(Tier::Pilot),
            "t1" => Some(Tier::T1),
            "t2" => Some(Tier::T2),
            "vip" => Some(Tier::Vip),
            _ => None,
        }
    }

    /// Display name used in invoice descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Pilot => "Pilot",
            Tier::T1 => "Tier 1",
            Tier::T2 => "Tier 2",
            Tier::Vip => "VIP",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
