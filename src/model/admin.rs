use argon2::{Config, Error as Argon2Error};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Administrator login request.
#[derive(Clone, Deserialize, Serialize)]
pub struct AdminCredentials {
    pub password: String,
}

/// Check a plaintext password against an argon2-encoded hash.
pub fn verify_password<T: AsRef<[u8]>>(password_hash: &str, password: T) -> Result<bool, Argon2Error> {
    argon2::verify_encoded(password_hash, password.as_ref())
}

/// Hash a password for the `admin_password_hash` setting.
pub fn hash_password<T: AsRef<[u8]>>(password: T) -> Result<String, Argon2Error> {
    // 16 bytes is recommended for password hashing:
    //  https://en.wikipedia.org/wiki/Argon2
    let mut salt = [0_u8; 16];
    rand::thread_rng().fill(&mut salt);
    argon2::hash_encoded(password.as_ref(), &salt, &Config::default())
}
