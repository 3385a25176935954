//! Static shared key required on every request.

use std::fmt;

use super::crypto::constant_time_str_eq;
use super::errors::{AuthError, AuthResult};

/// The service's shared secret.
///
/// `Debug` is redacted so the key never reaches a log line.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Check a key supplied with a request
    pub fn verify(&self, supplied: Option<&str>) -> AuthResult<()> {
        let supplied = supplied.ok_or(AuthError::MissingKey)?;
        if constant_time_str_eq(supplied, &self.0) {
            Ok(())
        } else {
            Err(AuthError::InvalidKey)
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let key = ApiKey::new("s3cret");

        assert_eq!(key.verify(Some("s3cret")), Ok(()));
        assert_eq!(key.verify(Some("S3CRET")), Err(AuthError::InvalidKey));
        assert_eq!(key.verify(Some("")), Err(AuthError::InvalidKey));
        assert_eq!(key.verify(None), Err(AuthError::MissingKey));
    }

    #[test]
    fn test_debug_redacted() {
        let key = ApiKey::new("s3cret");
        assert!(!format!("{:?}", key).contains("s3cret"));
    }
}
