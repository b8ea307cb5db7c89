//! Authentication service for the admin API bearer token.

use crate::error::AppError;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Validates bearer tokens against the configured admin token.
///
/// Only the SHA-256 digest of the admin token is kept in memory, and
/// candidates are compared digest-to-digest so the comparison time does not
/// depend on how many leading characters of the raw token match.
pub struct AuthService {
    token_digest: [u8; 32],
}

impl AuthService {
    /// Creates a new authentication service for `admin_token`.
    pub fn new(admin_token: &str) -> Self {
        Self {
            token_digest: digest(admin_token),
        }
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token does not match.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        let candidate = digest(token);

        let diff = candidate
            .iter()
            .zip(self.token_digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));

        if diff != 0 {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid token"}),
            ));
        }

        Ok(())
    }
}

fn digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let service = AuthService::new("admin-secret");

        assert!(service.authenticate("admin-secret").is_ok());
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let service = AuthService::new("admin-secret");

        let result = service.authenticate("admin-secre");
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));

        let result = service.authenticate("");
        assert!(result.is_err());
    }

    #[test]
    fn test_authenticate_is_case_sensitive() {
        let service = AuthService::new("Admin-Secret");

        assert!(service.authenticate("admin-secret").is_err());
    }
}
