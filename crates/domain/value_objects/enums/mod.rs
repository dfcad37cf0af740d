pub mod billing_modes;
pub mod client_statuses;
pub mod invoice_statuses;
pub mod lead_statuses;
pub mod shoot_statuses;
pub mod shoot_types;
pub mod tiers;
