//! Argon2id credential hashing, verification, and strength validation.
//!
//! Hashes are stored as `hex(derived_key) + "." + hex(salt)`. The key is
//! derived with raw Argon2id from the password and a fresh 16-byte salt.
//! Verification re-derives with the stored salt and compares the derived
//! bytes in constant time; it never compares encoded strings.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

/// Salt length in bytes for newly created hashes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 64;

/// Separator between the hex key and the hex salt.
const SEPARATOR: char = '.';

/// Default memory cost in KiB (19 MiB, Argon2's recommended minimum).
const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;
/// Default number of passes.
const DEFAULT_ITERATIONS: u32 = 2;
/// Default degree of parallelism.
const DEFAULT_PARALLELISM: u32 = 1;

/// Errors from the key derivation step itself.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Invalid KDF parameters: {0}")]
    Params(String),

    #[error("Key derivation failed: {0}")]
    Derive(String),
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Number of lanes.
    pub parallelism: u32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_MEMORY_KIB,
            iterations: DEFAULT_ITERATIONS,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl KdfConfig {
    /// Load KDF cost parameters from environment variables.
    ///
    /// | Env Var           | Default |
    /// |-------------------|---------|
    /// | `KDF_MEMORY_KIB`  | `19456` |
    /// | `KDF_ITERATIONS`  | `2`     |
    /// | `KDF_PARALLELISM` | `1`     |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let memory_kib: u32 = std::env::var("KDF_MEMORY_KIB")
            .unwrap_or_else(|_| defaults.memory_kib.to_string())
            .parse()
            .expect("KDF_MEMORY_KIB must be a valid u32");

        let iterations: u32 = std::env::var("KDF_ITERATIONS")
            .unwrap_or_else(|_| defaults.iterations.to_string())
            .parse()
            .expect("KDF_ITERATIONS must be a valid u32");

        let parallelism: u32 = std::env::var("KDF_PARALLELISM")
            .unwrap_or_else(|_| defaults.parallelism.to_string())
            .parse()
            .expect("KDF_PARALLELISM must be a valid u32");

        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }
}

/// Derives and verifies salted password hashes.
///
/// Cheap to clone; the parameters are validated once in [`CredentialHasher::new`].
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    pub fn new(config: &KdfConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| PasswordError::Params(e.to_string()))?;
        Ok(Self { params })
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);

        let key = self.derive(password, &salt)?;
        Ok(format!("{}{SEPARATOR}{}", hex::encode(key), hex::encode(salt)))
    }

    /// Check a plaintext password against an encoded hash.
    ///
    /// Malformed input verifies as `false`.
    pub fn verify(&self, password: &str, encoded: &str) -> bool {
        let Some((key_hex, salt_hex)) = encoded.split_once(SEPARATOR) else {
            return false;
        };
        let (Ok(expected), Ok(salt)) = (hex::decode(key_hex), hex::decode(salt_hex)) else {
            return false;
        };
        if expected.len() != KEY_LEN || salt.len() < SALT_LEN {
            return false;
        }

        match self.derive(password, &salt) {
            Ok(actual) => constant_time_eq(&actual, &expected),
            Err(_) => false,
        }
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<[u8; KEY_LEN], PasswordError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let mut key = [0u8; KEY_LEN];
        argon2
            .hash_password_into(password.as_bytes(), salt, &mut key)
            .map_err(|e| PasswordError::Derive(e.to_string()))?;
        Ok(key)
    }
}

/// Byte comparison whose running time depends only on the input length.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
