//! Session token authority.
//!
//! Session tokens are HS256-signed JWTs containing a [`Claims`] payload and
//! expiring a fixed [`SESSION_TTL_MINS`] minutes after issuance. Verification
//! is stateless: there is no session table and no revocation, so a token
//! stays valid until its `exp`.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::credentials::{Credential, CredentialChecker};

/// Session token lifetime in minutes.
pub const SESSION_TTL_MINS: i64 = 5;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the authenticated user name.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Symmetric key used both to sign and to verify session tokens.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode a standard (padded) base64 key.
    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("invalid user or password")]
    InvalidCredentials,

    #[error("failed to sign session token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("session token signature is invalid")]
    InvalidSignature,

    #[error("session token has expired")]
    Expired,

    /// Bad encoding, unexpected algorithm, missing claims, and so on.
    #[error("malformed session token: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies session tokens.
///
/// Owns the signing key and the credential checker consulted on login.
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    credentials: Arc<dyn CredentialChecker>,
}

impl TokenAuthority {
    pub fn new(key: &SigningKey, credentials: Arc<dyn CredentialChecker>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(key.as_bytes()),
            decoding: DecodingKey::from_secret(key.as_bytes()),
            validation,
            credentials,
        }
    }

    /// Check the credential and, if genuine, issue a session token for its user.
    pub fn login(&self, credential: &Credential) -> Result<IssuedToken, LoginError> {
        self.login_at(credential, Utc::now())
    }

    pub fn login_at(
        &self,
        credential: &Credential,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, LoginError> {
        if !self
            .credentials
            .validate_user(&credential.user, &credential.password)
        {
            return Err(LoginError::InvalidCredentials);
        }
        self.issue_at(&credential.user, now)
            .map_err(LoginError::Signing)
    }

    /// Sign a token for `user` that expires [`SESSION_TTL_MINS`] after `now`.
    pub fn issue_at(
        &self,
        user: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let expires_at = now + Duration::minutes(SESSION_TTL_MINS);
        let claims = Claims {
            sub: user.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a session token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature and claims, treating `now` as the current time.
    ///
    /// A token is expired once `now` is past its `exp` second; there is no
    /// leeway.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, VerifyError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                if matches!(e.kind(), ErrorKind::InvalidSignature) {
                    VerifyError::InvalidSignature
                } else {
                    VerifyError::Malformed(e)
                }
            })?
            .claims;

        if claims.exp < now.timestamp() {
            return Err(VerifyError::Expired);
        }
        Ok(claims)
    }
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("ttl_mins", &SESSION_TTL_MINS)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::auth::credentials::MirrorCredentials;

    fn authority(secret: &str) -> TokenAuthority {
        TokenAuthority::new(
            &SigningKey::new(secret.as_bytes()),
            Arc::new(MirrorCredentials),
        )
    }

    fn credential(user: &str, password: &str) -> Credential {
        Credential {
            user: user.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let authority = authority("test-secret-that-is-long-enough-for-hmac");
        let issued = authority
            .login(&credential("alice", "alice"))
            .expect("login should succeed");

        let claims = authority
            .verify(&issued.token)
            .expect("token validation should succeed");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_MINS * 60);
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let authority = authority("secret");
        assert_matches!(
            authority.login(&credential("alice", "bob")),
            Err(LoginError::InvalidCredentials)
        );
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let authority = authority("secret");
        let issued_at = Utc::now();
        let issued = authority.issue_at("alice", issued_at).unwrap();

        let at_four = issued_at + Duration::minutes(4);
        assert!(authority.verify_at(&issued.token, at_four).is_ok());

        let at_six = issued_at + Duration::minutes(6);
        assert_matches!(
            authority.verify_at(&issued.token, at_six),
            Err(VerifyError::Expired)
        );
    }

    #[test]
    fn test_different_secrets_fail_signature() {
        let alpha = authority("secret-alpha");
        let bravo = authority("secret-bravo");

        let issued = alpha.issue_at("alice", Utc::now()).unwrap();
        assert_matches!(
            bravo.verify(&issued.token),
            Err(VerifyError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let authority = authority("secret");
        assert_matches!(
            authority.verify("not-a-jwt"),
            Err(VerifyError::Malformed(_))
        );
    }

    #[test]
    fn test_other_algorithm_is_malformed() {
        let secret = "secret";
        let claims = Claims {
            sub: "alice".into(),
            exp: Utc::now().timestamp() + 60,
            iat: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_matches!(
            authority(secret).verify(&token),
            Err(VerifyError::Malformed(_))
        );
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = SigningKey::new("super-secret");
        assert!(!format!("{key:?}").contains("super-secret"));
        assert!(!format!("{:?}", authority("super-secret")).contains("super-secret"));
    }
}
