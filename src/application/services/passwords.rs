use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use rand::rngs::OsRng;

/// Argon2id hashing with cost parameters taken from configuration.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> anyhow::Result<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {e}"))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Parameters embedded in the stored hash win over the configured ones,
    /// so hashes written under older settings keep verifying.
    pub fn verify(&self, password: &str, stored_hash: &str) -> anyhow::Result<bool> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::new(1024, 1, 1).unwrap()
    }

    #[test]
    fn hash_verifies_only_the_hashed_password() {
        let hasher = cheap();
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = cheap();
        let a = hasher.hash("secret").unwrap();
        let b = hasher.hash("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn hashes_from_other_parameters_still_verify() {
        let old = PasswordHasher::new(2048, 2, 1).unwrap();
        let hash = old.hash("secret").unwrap();
        assert!(cheap().verify("secret", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(cheap().verify("secret", "not-a-phc-string").is_err());
    }

    #[test]
    fn rejects_zero_parallelism() {
        assert!(PasswordHasher::new(1024, 1, 0).is_err());
    }
}
