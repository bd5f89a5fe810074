use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims carried by both halves of the token pair.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i32,
    pub exp: i64,
    pub iat: i64,
    pub kind: TokenKind,
}

impl Claims {
    fn new(user_id: i32, kind: TokenKind, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            kind,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issues a signed access/refresh pair; no server-side session state is kept.
pub fn issue_pair(secret: &str, user_id: i32) -> Result<TokenPair, AppError> {
    let key = EncodingKey::from_secret(secret.as_bytes());
    let access = encode(
        &Header::default(),
        &Claims::new(user_id, TokenKind::Access, Duration::minutes(60)),
        &key,
    )?;
    let refresh = encode(
        &Header::default(),
        &Claims::new(user_id, TokenKind::Refresh, Duration::days(1)),
        &key,
    )?;

    Ok(TokenPair { access, refresh })
}

/// Decodes a bearer token and rejects anything that is not an access token.
pub fn decode_access(secret: &str, token: &str) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    if data.claims.kind != TokenKind::Access {
        return Err(AppError::Unauthorized);
    }

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_access_token_decodes_to_the_user() {
        let pair = issue_pair(SECRET, 42).unwrap();
        let claims = decode_access(SECRET, &pair.access).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_is_not_accepted_as_access() {
        let pair = issue_pair(SECRET, 42).unwrap();
        assert!(decode_access(SECRET, &pair.refresh).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let pair = issue_pair("other-secret", 42).unwrap();
        assert!(decode_access(SECRET, &pair.access).is_err());
    }
}
