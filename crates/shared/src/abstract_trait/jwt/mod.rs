use crate::{config::Claims, errors::ServiceError, model::Role};
use std::sync::Arc;
use uuid::Uuid;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

pub trait JwtServiceTrait: Send + Sync + std::fmt::Debug {
    fn generate_token(
        &self,
        user_id: Uuid,
        role: Role,
        token_type: TokenType,
    ) -> Result<String, ServiceError>;
    fn verify_token(&self, token: &str, expected_type: TokenType) -> Result<Claims, ServiceError>;
}
