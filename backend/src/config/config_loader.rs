use anyhow::{Ok, Result};

use super::config_model::DotEnvyConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = super::config_model::BackendServer {
        port: std::env::var("SERVER_PORT_BACKEND")
            .expect("SERVER_PORT_BACKEND is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = super::config_model::Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let auth = super::config_model::Auth {
        jwt_secret: std::env::var("ADMIN_JWT_SECRET").expect("ADMIN_JWT_SECRET is invalid"),
    };

    let stripe = super::config_model::Stripe {
        secret_key: std::env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY is invalid"),
        webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET")
            .expect("STRIPE_WEBHOOK_SECRET is invalid"),
        success_url: std::env::var("STRIPE_SUCCESS_URL").expect("STRIPE_SUCCESS_URL is invalid"),
        cancel_url: std::env::var("STRIPE_CANCEL_URL").expect("STRIPE_CANCEL_URL is invalid"),
        price_pilot: std::env::var("STRIPE_PRICE_PILOT").expect("STRIPE_PRICE_PILOT is invalid"),
        price_t1: std::env::var("STRIPE_PRICE_T1").expect("STRIPE_PRICE_T1 is invalid"),
        price_t2: std::env::var("STRIPE_PRICE_T2").expect("STRIPE_PRICE_T2 is invalid"),
        price_vip: std::env::var("STRIPE_PRICE_VIP").expect("STRIPE_PRICE_VIP is invalid"),
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        auth,
        stripe,
    })
}
