//! Signed session tokens.
//!
//! A token is a base64url claims payload and an HMAC-SHA256 signature
//! over it, joined by a dot: `<payload>.<signature>`. The claims carry
//! the user id and an absolute expiry 7 days from issuance.
//!
//! Tokens are stateless bearers: there is no revocation list, so a
//! token stays valid until its expiry elapses. Logout is a client-side
//! discard. The signing secret is injected from configuration at
//! startup.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Token lifetime in days.
const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The authenticated user id.
    sub: Uuid,
    /// Expiry as unix seconds.
    exp: i64,
}

/// Issues and verifies signed session tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: Arc<[u8]>,
}

impl TokenService {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Arc::from(secret.as_ref()),
        }
    }

    /// Issues a token for the given user, expiring 7 days from now.
    pub fn issue(&self, user_id: Uuid) -> String {
        self.issue_at(user_id, Utc::now())
    }

    /// Verifies a token against the current clock.
    ///
    /// Malformed input, a bad signature, and an elapsed expiry all
    /// collapse to `None`; callers cannot distinguish the causes.
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        self.verify_at(token, Utc::now())
    }

    fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> String {
        let claims = Claims {
            sub: user_id,
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        // Claims are a plain struct of serializable fields; encoding
        // cannot fail.
        let payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).expect("claims serialize"));
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes()));

        format!("{payload}.{signature}")
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<Uuid> {
        let (payload, signature) = token.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        // verify_slice compares in constant time
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let claims: Claims =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).ok()?).ok()?;

        if claims.exp < now.timestamp() {
            return None;
        }

        Some(claims.sub)
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length
        HmacSha256::new_from_slice(&self.secret).expect("HMAC key")
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
