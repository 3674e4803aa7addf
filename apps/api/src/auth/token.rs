use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, stringified.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly issued session token plus its lifetime in seconds.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Signs and verifies HS256 session tokens with a fixed lifetime.
/// Stateless: there is no revocation — a token is valid until it expires.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        TokenSigner {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Issues a token for the given user, expiring `ttl_minutes` from now.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.ttl_minutes)).timestamp(),
        };
        let access_token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(IssuedToken {
            access_token,
            token_type: "bearer",
            expires_in: self.ttl_minutes * 60,
        })
    }

    /// Verifies signature and expiration. Zero leeway: a token is rejected
    /// the moment `exp` passes.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-at-least-32-bytes-long!!";

    #[test]
    fn test_issue_then_verify() {
        let signer = TokenSigner::new(SECRET, 30);
        let issued = signer.issue(42, "a@b.com").unwrap();
        let claims = signer.verify(&issued.access_token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(issued.expires_in, 30 * 60);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL puts exp in the past.
        let signer = TokenSigner::new(SECRET, -1);
        let issued = signer.issue(42, "a@b.com").unwrap();
        assert!(signer.verify(&issued.access_token).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let signer = TokenSigner::new(SECRET, 30);
        assert!(signer.verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = TokenSigner::new(SECRET, 30);
        let other = TokenSigner::new("another-secret-also-32-bytes-long!!!", 30);
        let issued = signer.issue(42, "a@b.com").unwrap();
        assert!(other.verify(&issued.access_token).is_err());
    }
}
