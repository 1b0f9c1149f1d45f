// ABOUTME: HS256 session token resolver backed by jsonwebtoken
// ABOUTME: Verifies signature and expiry, then maps claims to a Session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{RequestCredentials, SessionError, SessionResolver};
use crate::models::Session;
use crate::permissions::UserRole;

/// Claims consumed from an issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User identifier
    pub sub: String,
    /// Role claim; unknown or missing values decode to `viewer`
    #[serde(default)]
    pub role: UserRole,
    /// Expiry, seconds since the Unix epoch
    pub exp: u64,
}

/// Resolves sessions from HS256-signed tokens
pub struct JwtSessionResolver {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionResolver {
    /// Create a resolver sharing `secret` with the token issuer
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

#[async_trait]
impl SessionResolver for JwtSessionResolver {
    async fn resolve(
        &self,
        credentials: &RequestCredentials,
    ) -> Result<Option<Session>, SessionError> {
        let Some(token) = credentials.token.as_deref() else {
            return Ok(None);
        };

        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if !data.claims.sub.is_empty() => {
                Ok(Some(Session::new(data.claims.sub, data.claims.role)))
            }
            Ok(_) => {
                debug!("Session token rejected: empty subject");
                Ok(None)
            }
            Err(e) => {
                debug!(error = %e, "Session token rejected");
                Ok(None)
            }
        }
    }
}
