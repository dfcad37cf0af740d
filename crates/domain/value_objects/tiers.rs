use serde::Serialize;

use crate::domain::value_objects::enums::{billing_modes::BillingMode, tiers::Tier};

/// Price and deliverable envelope for a tier. This table is the only
/// source of pricing in the codebase; invoice generation, checkout and
/// the public DTOs all read from it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TierPlan {
    /// Whole USD. The pilot price is charged once; the rest monthly.
    pub price: i32,
    pub billing: BillingMode,
    /// None means unlimited.
    pub shoots_per_month: Option<i32>,
    /// None means unlimited.
    pub photos_per_month: Option<i32>,
    pub delivery_sla_hours: i32,
}

impl Tier {
    pub fn plan(&self) -> TierPlan {
        match self {
            Tier::Pilot => TierPlan {
                price: 345,
                billing: BillingMode::OneTime,
                shoots_per_month: Some(1),
                photos_per_month: Some(30),
                delivery_sla_hours: 72,
            },
            Tier::T1 => TierPlan {
                price: 445,
                billing: BillingMode::Monthly,
                shoots_per_month: Some(2),
                photos_per_month: Some(60),
                delivery_sla_hours: 72,
            },
            Tier::T2 => TierPlan {
                price: 695,
                billing: BillingMode::Monthly,
                shoots_per_month: Some(4),
                photos_per_month: Some(120),
                delivery_sla_hours: 48,
            },
            Tier::Vip => TierPlan {
                price: 995,
                billing: BillingMode::Monthly,
                shoots_per_month: None,
                photos_per_month: None,
                delivery_sla_hours: 24,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pilot_is_the_only_one_time_tier() {
        assert_eq!(Tier::Pilot.plan().billing, BillingMode::OneTime);
        for tier in [Tier::T1, Tier::T2, Tier::Vip] {
            assert_eq!(tier.plan().billing, BillingMode::Monthly);
        }
    }

    #[test]
    fn prices_match_the_published_rate_card() {
        assert_eq!(Tier::Pilot.plan().price, 345);
        assert_eq!(Tier::T1.plan().price, 445);
        assert_eq!(Tier::T2.plan().price, 695);
        assert_eq!(Tier::Vip.plan().price, 995);
    }

    #[test]
    fn slas_tighten_with_tier() {
        assert!(Tier::T2.plan().delivery_sla_hours < Tier::T1.plan().delivery_sla_hours);
        assert!(Tier::Vip.plan().delivery_sla_hours < Tier::T2.plan().delivery_sla_hours);
    }

    #[test]
    fn vip_is_unlimited() {
        let plan = Tier::Vip.plan();
        assert_eq!(plan.shoots_per_month, None);
        assert_eq!(plan.photos_per_month, None);
    }
}
