use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    error::{Error, Result},
    model::{
        access_key::{verify_access_key, VoterCredentials},
        admin::{verify_password, AdminCredentials},
        auth::{AdminUser, AuthToken, VoterUser, AUTH_TOKEN_COOKIE},
        workflow::Session,
    },
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![admin_login, voter_login, logout]
}

#[post("/auth/admin", data = "<credentials>", format = "json")]
pub async fn admin_login(
    cookies: &CookieJar<'_>,
    credentials: Json<AdminCredentials>,
    config: &State<Config>,
    session: &State<Session>,
) -> Result<()> {
    if !verify_password(config.admin_password_hash(), &credentials.password)? {
        return Err(Error::Status(
            Status::Unauthorized,
            "Incorrect administrator password".to_string(),
        ));
    }

    let admin = session.lock().await.admin();
    info!("Administrator {admin} logged in");
    let token = AuthToken::<AdminUser>::new(admin);
    cookies.add(token.into_cookie(config));

    Ok(())
}

/// Log in with an access key. Registration is not checked here; the
/// session rejects unregistered callers operation by operation.
#[post("/auth/voter", data = "<credentials>", format = "json")]
pub async fn voter_login(
    cookies: &CookieJar<'_>,
    credentials: Json<VoterCredentials>,
    config: &State<Config>,
) -> Result<()> {
    let credentials = credentials.into_inner();
    if !verify_access_key(
        config.hmac_secret(),
        &credentials.address,
        &credentials.access_key,
    ) {
        return Err(Error::Status(
            Status::Unauthorized,
            format!("Incorrect access key for {}", credentials.address),
        ));
    }

    let token = AuthToken::<VoterUser>::new(credentials.address);
    cookies.add(token.into_cookie(config));

    Ok(())
}

#[delete("/auth")]
pub fn logout(cookies: &CookieJar) -> Status {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Status::Ok
}
