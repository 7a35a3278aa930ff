use anyhow::{Context, Result, bail};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Visitor tokens outlive any realistic browser session; the cookie that
/// carries them has no Max-Age, so the browser drops it first.
const VISITOR_TOKEN_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Identifies a logged-in user.
    Session,
    /// Identifies an anonymous browser for unique-visit counting.
    Visitor,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User id or visitor id, depending on kind
    pub kind: TokenKind,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

/// Signing keys for the cookies the app hands out.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    session_ttl: chrono::Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, session_ttl: chrono::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl,
        }
    }

    pub fn create_token(&self, subject: &str, kind: TokenKind) -> Result<String> {
        let now = chrono::Utc::now();
        let expiry = match kind {
            TokenKind::Session => now + self.session_ttl,
            TokenKind::Visitor => now + chrono::Duration::days(VISITOR_TOKEN_DAYS),
        };

        let claims = Claims {
            sub: subject.to_string(),
            kind,
            exp: expiry.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding).context("Failed to encode token")
    }

    pub fn validate_token(&self, token: &str, kind: TokenKind) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .context("Failed to decode token")?;

        if token_data.claims.kind != kind {
            bail!(
                "Expected a {:?} token, got {:?}",
                kind,
                token_data.claims.kind
            );
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret", chrono::Duration::hours(1))
    }

    #[test]
    fn session_token_round_trips_subject() {
        let keys = keys();
        let token = keys.create_token("aB3dE9", TokenKind::Session).unwrap();
        let claims = keys.validate_token(&token, TokenKind::Session).unwrap();
        assert_eq!(claims.sub, "aB3dE9");
        assert_eq!(claims.kind, TokenKind::Session);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn visitor_token_is_not_a_session() {
        let keys = keys();
        let token = keys.create_token("visitor", TokenKind::Visitor).unwrap();
        assert!(keys.validate_token(&token, TokenKind::Session).is_err());
        assert!(keys.validate_token(&token, TokenKind::Visitor).is_ok());
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = SessionKeys::new("other-secret", chrono::Duration::hours(1))
            .create_token("aB3dE9", TokenKind::Session)
            .unwrap();
        assert!(keys().validate_token(&token, TokenKind::Session).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = keys();
        let mut token = keys.create_token("aB3dE9", TokenKind::Session).unwrap();
        token.push('x');
        assert!(keys.validate_token(&token, TokenKind::Session).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Well past the default 60s leeway
        let keys = SessionKeys::new("test-secret", chrono::Duration::hours(-1));
        let token = keys.create_token("aB3dE9", TokenKind::Session).unwrap();
        assert!(keys.validate_token(&token, TokenKind::Session).is_err());
    }
}
