use rocket::{http::Status, Catcher, Request, Route};

use crate::error::Error;

pub mod admin;
pub mod auth;
pub mod public;
pub mod voter;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(admin::routes());
    routes.extend(auth::routes());
    routes.extend(public::routes());
    routes.extend(voter::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    catchers![default_catcher]
}

/// Give requests that never reach a handler the same JSON error body as
/// those rejected by one.
#[catch(default)]
fn default_catcher(status: Status, req: &Request) -> Error {
    if status == Status::NotFound {
        Error::not_found(format!("{} {}", req.method(), req.uri()))
    } else {
        Error::Status(status, status.reason_lossy().to_string())
    }
}
