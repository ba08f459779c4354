#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{figment::Figment, Build, Rocket};

use crate::config::{ConfigFairing, SessionFairing};
use crate::logging::LoggerFairing;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;

/// Build the server from `Rocket.toml` and the `ROCKET_*` environment.
pub fn build() -> Rocket<Build> {
    rocket_for_figment(rocket::Config::figment())
}

/// Build the server from an explicit configuration source.
pub fn rocket_for_figment(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .mount("/", api::routes())
        .register("/", api::catchers())
        .attach(ConfigFairing)
        .attach(SessionFairing)
        .attach(LoggerFairing)
}

/// Configuration used by every test server.
#[cfg(test)]
pub(crate) fn test_figment() -> Figment {
    use crate::model::{
        access_key::examples::HMAC_SECRET, address::examples::ADMIN_EXAMPLE,
        admin::examples::ADMIN_PASSWORD_HASH,
    };

    Figment::from(rocket::Config::debug_default())
        .merge(("jwt_secret", "test-jwt-secret"))
        .merge(("hmac_secret", HMAC_SECRET))
        .merge(("auth_ttl", 3600))
        .merge(("admin_address", ADMIN_EXAMPLE))
        .merge(("admin_password_hash", ADMIN_PASSWORD_HASH))
}

#[cfg(test)]
pub(crate) fn rocket_for_test() -> Rocket<Build> {
    rocket_for_figment(test_figment())
}
