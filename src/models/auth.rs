//! Authenticated user extracted from the identity cookie.
//!
//! The external auth service issues an HS256 JWT which the login flow
//! stores as the Actix identity. Handlers receive the decoded claims via
//! the [`AuthenticatedUser`] extractor; role checks happen in the service
//! layer.

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// Subject: user identifier at the auth service.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Tenant the user is signed into.
    pub hub_id: i32,
    pub roles: Vec<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Encodes the claims back into a JWT. Used by tests and the signin
    /// callback.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }
}

/// Case-sensitive membership test against the user's role list.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload).into_inner();
        let secret = req
            .app_data::<web::Data<ServerConfig>>()
            .map(|config| config.secret.clone());

        std::future::ready((|| {
            let identity = identity.map_err(|_| ErrorUnauthorized("unauthorized"))?;
            let token = identity
                .id()
                .map_err(|_| ErrorUnauthorized("unauthorized"))?;
            let secret = secret.ok_or_else(|| ErrorInternalServerError("missing server config"))?;

            AuthenticatedUser::from_jwt(&token, &secret)
                .map_err(|_| ErrorUnauthorized("unauthorized"))
        })())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "42".to_string(),
            email: "broker@example.com".to_string(),
            name: "Broker".to_string(),
            hub_id: 1,
            roles: vec!["leasing".to_string()],
            exp: 4102444800, // 2100-01-01
        }
    }

    #[test]
    fn jwt_round_trip() {
        let user = sample_user();
        let token = user.to_jwt("0123456789abcdef").unwrap();
        let decoded = AuthenticatedUser::from_jwt(&token, "0123456789abcdef").unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn jwt_rejects_wrong_secret() {
        let token = sample_user().to_jwt("0123456789abcdef").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "another-secret!!").is_err());
    }

    #[test]
    fn check_role_matches_exactly() {
        let roles = vec!["leasing".to_string(), "leasing_admin".to_string()];
        assert!(check_role("leasing", &roles));
        assert!(check_role("leasing_admin", &roles));
        assert!(!check_role("Leasing", &roles));
        assert!(!check_role("billing", &roles));
    }
}
