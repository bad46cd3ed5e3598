use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_VERSION: &str = "v1";
const MAX_TOKEN_LEN: usize = 512;

/// Credential pair for the admin panel, sourced from configuration rather
/// than baked into the code.
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    exp: i64,
}

/// Issues and validates expiring admin session tokens.
///
/// A token is `v1.<payload>.<sig>` where payload is the base64url-encoded
/// JSON claims and sig is an HMAC-SHA256 over the payload part, verified in
/// constant time. Anything malformed, tampered, or expired validates false.
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    pub fn issue(&self, now: DateTime<Utc>) -> String {
        let claims = TokenClaims {
            sub: "admin".to_string(),
            exp: now.timestamp() + self.ttl_secs,
        };
        // Claims are a fixed struct; serialization cannot fail.
        let payload_part =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).expect("serialize claims"));
        let sig_part = URL_SAFE_NO_PAD.encode(self.mac_for(&payload_part));
        format!("{TOKEN_VERSION}.{payload_part}.{sig_part}")
    }

    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> bool {
        if token.len() > MAX_TOKEN_LEN {
            return false;
        }
        let mut parts = token.splitn(3, '.');
        let (Some(version), Some(payload_part), Some(sig_part)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if version != TOKEN_VERSION {
            return false;
        }

        let Ok(supplied_sig) = URL_SAFE_NO_PAD.decode(sig_part) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(&self.secret) else {
            return false;
        };
        mac.update(payload_part.as_bytes());
        if mac.verify_slice(&supplied_sig).is_err() {
            return false;
        }

        let Ok(payload) = URL_SAFE_NO_PAD.decode(payload_part) else {
            return false;
        };
        let Ok(claims) = serde_json::from_slice::<TokenClaims>(&payload) else {
            return false;
        };
        claims.sub == "admin" && claims.exp > now.timestamp()
    }

    fn mac_for(&self, payload_part: &str) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(payload_part.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}
