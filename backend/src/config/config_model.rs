use gettupp_core::domain::value_objects::enums::tiers::Tier;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub auth: Auth,
    pub stripe: Stripe,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Auth {
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct Stripe {
    pub secret_key: String,
    pub webhook_secret: String,
    pub success_url: String,
    pub cancel_url: String,
    pub price_pilot: String,
    pub price_t1: String,
    pub price_t2: String,
    pub price_vip: String,
}

impl Stripe {
    /// Stripe price id configured for the tier. Amounts come from the
    /// tier catalog; these ids are how Stripe knows the same numbers.
    pub fn price_id(&self, tier: Tier) -> &str {
        match tier {
            Tier::Pilot => &self.price_pilot,
            Tier::T1 => &self.price_t1,
            Tier::T2 => &self.price_t2,
            Tier::Vip => &self.price_vip,
        }
    }
}
