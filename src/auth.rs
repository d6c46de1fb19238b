//! JWT-backed request authentication.
//!
//! The auth service issues a signed token which is stored in the identity
//! cookie. `AuthenticatedUser` extracts and verifies it on every request;
//! handlers that take it as an argument are gated behind a valid session.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{Error, FromRequest, HttpRequest, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims carried by the auth service token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject, the user id as issued by the auth service.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload).into_inner();
        let config = req.app_data::<web::Data<ServerConfig>>().cloned();

        let result = identity
            .and_then(|identity| {
                identity
                    .id()
                    .map_err(|_| ErrorUnauthorized("missing identity"))
            })
            .and_then(|token| {
                let config =
                    config.ok_or_else(|| ErrorInternalServerError("server config not set"))?;
                AuthenticatedUser::from_jwt(&token, &config.secret)
                    .map_err(|_| ErrorUnauthorized("invalid token"))
            });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: usize) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: vec!["nexus".to_string(), "nexus_admin".to_string()],
            exp,
        }
    }

    fn future_exp() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn jwt_round_trip_preserves_claims() {
        let user = claims(future_exp());
        let token = user.to_jwt("secret").unwrap();
        let decoded = AuthenticatedUser::from_jwt(&token, "secret").unwrap();

        assert_eq!(decoded.email, user.email);
        assert_eq!(decoded.roles, user.roles);
    }

    #[test]
    fn jwt_rejects_wrong_secret() {
        let token = claims(future_exp()).to_jwt("secret").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "other").is_err());
    }

    #[test]
    fn jwt_rejects_expired_token() {
        let token = claims(1).to_jwt("secret").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "secret").is_err());
    }
}
