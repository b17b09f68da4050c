//! Session tokens.
//!
//! HS256-signed bearer tokens carrying the role claim. The server derives
//! the caller's identity from a verified token only, never from request
//! body fields. Tokens are stateless: there is no server-side revocation
//! list, and invalidation happens by the client discarding its copy.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::models::{AuthenticatedUser, Role, SessionContext};

type HmacSha256 = Hmac<Sha256>;

/// Token verification/issue errors.
#[derive(Error, Debug, PartialEq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("invalid signature")]
    Signature,

    #[error("token expired")]
    Expired,

    #[error("signing failed")]
    Signing,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Account id
    pub sub: String,
    /// Display name
    pub name: String,
    /// Role claim
    pub role: Role,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl From<Claims> for SessionContext {
    fn from(claims: Claims) -> Self {
        SessionContext {
            account_id: claims.sub,
            display_name: claims.name,
            role: claims.role,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Issues and verifies HS256 session tokens.
pub struct TokenService {
    secret: Vec<u8>,
    ttl_hours: i64,
}

impl TokenService {
    /// Create a service with the signing secret and token lifetime.
    pub fn new(secret: impl Into<Vec<u8>>, ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours,
        }
    }

    /// Issue a token for an authenticated user.
    pub fn issue(&self, user: &AuthenticatedUser) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.account_id.clone(),
            name: user.display_name.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl_hours * 3600,
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header {
            alg: "HS256".into(),
            typ: "JWT".into(),
        };
        let header_json = serde_json::to_string(&header).map_err(|_| TokenError::Signing)?;
        let claims_json = serde_json::to_string(claims).map_err(|_| TokenError::Signing)?;

        let message = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json.as_bytes()),
            URL_SAFE_NO_PAD.encode(claims_json.as_bytes())
        );

        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| TokenError::Signing)?;
        mac.update(message.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", message, signature))
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(TokenError::Malformed);
        }

        let message = format!("{}.{}", parts[0], parts[1]);
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| TokenError::Signing)?;
        mac.update(message.as_bytes());
        let expected = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        if parts[2] != expected {
            return Err(TokenError::Signature);
        }

        let claims_json = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&claims_json).map_err(|_| TokenError::Malformed)?;

        if claims.exp < chrono::Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
