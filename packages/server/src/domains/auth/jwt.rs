use anyhow::{bail, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which half of the token pair a JWT is
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,     // Subject (username)
    pub kind: TokenKind, // Access or refresh
    pub exp: i64,        // Expiration timestamp
    pub iat: i64,        // Issued at timestamp
    pub iss: String,     // Issuer
    pub jti: String,     // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies access/refresh tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
}

impl JwtService {
    /// Create new JWT service with secret, issuer and token lifetimes
    pub fn new(
        secret: &str,
        issuer: String,
        access_ttl: chrono::Duration,
        refresh_ttl: chrono::Duration,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            access_ttl,
            refresh_ttl,
        }
    }

    fn create_token(
        &self,
        username: &str,
        kind: TokenKind,
        ttl: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            sub: username.to_string(),
            kind,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Short-lived token sent as `Authorization: Bearer`
    pub fn create_access_token(&self, username: &str) -> Result<String> {
        self.create_token(username, TokenKind::Access, self.access_ttl)
    }

    /// Long-lived token only accepted by the refresh endpoint
    pub fn create_refresh_token(&self, username: &str) -> Result<String> {
        self.create_token(username, TokenKind::Refresh, self.refresh_ttl)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if the token is valid, not expired and of the expected kind
    pub fn verify_token(&self, token: &str, kind: TokenKind) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)?;

        if claims.kind != kind {
            bail!("expected {:?} token, got {:?}", kind, claims.kind);
        }
        Ok(claims)
    }
}
