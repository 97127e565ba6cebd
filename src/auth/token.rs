use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id the token was issued for.
    sub: i32,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256 bearer tokens. Built once at startup from
/// the configured secret and shared across requests.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_days: i64,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &str, expiry_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_days,
        }
    }

    pub fn issue(&self, user_id: i32) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::days(self.expiry_days)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {e}"))
    }

    /// Returns the user id encoded in a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<i32> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {e}"))?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let issuer = TokenIssuer::new("test-secret", 7);
        let token = issuer.issue(42).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), 42);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = TokenIssuer::new("test-secret", 7);
        let other = TokenIssuer::new("different-secret", 7);

        let token = issuer.issue(42).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Negative expiry puts `exp` a full day in the past, well outside
        // the default leeway window.
        let issuer = TokenIssuer::new("test-secret", -1);
        let token = issuer.issue(42).unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let issuer = TokenIssuer::new("test-secret", 7);
        assert!(issuer.verify("not.a.token").is_err());
        assert!(issuer.verify("").is_err());
    }
}
