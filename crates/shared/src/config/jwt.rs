use crate::{
    abstract_trait::{JwtServiceTrait, TokenType},
    errors::ServiceError,
    model::Role,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
    pub token_type: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    jwt_secret: String,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
        }
    }

    fn lifetime(token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => Duration::minutes(60),
            TokenType::Refresh => Duration::days(7),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(
        &self,
        user_id: Uuid,
        role: Role,
        token_type: TokenType,
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role: role.as_str().to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Self::lifetime(token_type)).timestamp() as usize,
            token_type: token_type.as_str().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str, expected_type: TokenType) -> Result<Claims, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::Jwt(err),
            })?;

        if token_data.claims.token_type != expected_type.as_str() {
            return Err(ServiceError::InvalidTokenType);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn access_token_round_trips_subject_and_role() {
        let jwt = JwtConfig::new("test-secret");
        let user_id = Uuid::new_v4();

        let token = jwt
            .generate_token(user_id, Role::Vendor, TokenType::Access)
            .unwrap();
        let claims = jwt.verify_token(&token, TokenType::Access).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "vendor");
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt
            .generate_token(Uuid::new_v4(), Role::User, TokenType::Refresh)
            .unwrap();

        assert_matches!(
            jwt.verify_token(&token, TokenType::Access),
            Err(ServiceError::InvalidTokenType)
        );
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let token = JwtConfig::new("one")
            .generate_token(Uuid::new_v4(), Role::Admin, TokenType::Access)
            .unwrap();

        assert_matches!(
            JwtConfig::new("two").verify_token(&token, TokenType::Access),
            Err(ServiceError::Jwt(_))
        );
    }
}
