//! Argon2id hashing and verification of the admin access code.
//!
//! Only the PHC-formatted hash is configured (`ADMIN_ACCESS_CODE_HASH`); the
//! plaintext code never reaches the server's configuration.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash an access code using Argon2id with a random salt.
///
/// Returns the PHC string to put in `ADMIN_ACCESS_CODE_HASH`.
pub fn hash_access_code(code: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(code.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a submitted code against the configured PHC hash.
///
/// Returns `Ok(false)` on a mismatch and `Err` only when the stored hash is
/// unusable.
pub fn verify_access_code(code: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(code.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
