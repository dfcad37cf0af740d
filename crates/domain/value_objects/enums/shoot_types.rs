use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShootType {
    Pilot,
    Standard,
    Premium,
    Vip,
}

impl ShootType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShootType::Pilot => "pilot",
            ShootType::Standard => "standard",
            ShootType::Premium => "premium",
            ShootType::Vip => "vip",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pilot" => Some(ShootType::Pilot),
            "standard" => Some(ShootType::Standard),
            "premium" => Some(ShootType::Premium),
            "vip" => Some(ShootType::Vip),
            _ => None,
        }
    }

    pub fn default_duration_minutes(&self) -> i32 {
        match self {
            ShootType::Pilot => 60,
            ShootType::Standard => 120,
            ShootType::Premium => 180,
            ShootType::Vip => 480,
        }
    }

    pub fn default_total_images(&self) -> i32 {
        match self {
            ShootType::Pilot => 10,
            ShootType::Standard => 25,
            ShootType::Premium => 50,
            ShootType::Vip => 100,
        }
    }
}

impl Display for ShootType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
