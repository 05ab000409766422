use crate::error::{ApiError, Result};

/// Cost factor 12, matching what the stored hashes were generated with.
const BCRYPT_COST: u32 = 12;

pub struct PasswordService;

impl PasswordService {
    pub fn hash_password(password: &str) -> Result<String> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash_password("hunter2hunter2").unwrap();
        assert_ne!(hash, "hunter2hunter2");
        assert!(PasswordService::verify_password("hunter2hunter2", &hash).unwrap());
        assert!(!PasswordService::verify_password("wrong-password", &hash).unwrap());
    }
}
