use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pathway_core::directory::Credential;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// PBKDF2-SHA256 rounds for newly hashed passwords. Stored credentials
/// keep the count they were derived with.
pub const PBKDF2_ITERATIONS: u32 = 100_000;
pub const DIGEST_LENGTH: usize = 32;

/// Derive a salted digest for a new password.
pub fn hash_password(password: &str) -> Credential {
    let salt = STANDARD.encode(Uuid::new_v4().as_bytes());
    let digest = derive(password, &salt, PBKDF2_ITERATIONS);
    Credential {
        salt,
        digest,
        iterations: PBKDF2_ITERATIONS,
    }
}

pub fn verify_password(credential: &Credential, password: &str) -> bool {
    let candidate = derive(password, &credential.salt, credential.iterations);
    candidate
        .as_bytes()
        .ct_eq(credential.digest.as_bytes())
        .into()
}

/// A fresh opaque session token.
pub fn issue_token() -> String {
    Uuid::new_v4().simple().to_string()
}

fn derive(password: &str, salt: &str, iterations: u32) -> String {
    let mut key = [0u8; DIGEST_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);
    STANDARD.encode(key)
}
