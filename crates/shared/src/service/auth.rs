use crate::{
    abstract_trait::{
        AuthServiceTrait, DynHashing, DynJwtService, DynUserCommandRepository,
        DynUserQueryRepository, TokenType,
    },
    domain::{
        Identity,
        requests::{CreateUserRecord, LoginRequest, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Role, User},
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};

const EMAIL_TAKEN: &str = "User with this email already exists";

pub struct AuthServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
}

pub struct AuthService {
    hash: DynHashing,
    jwt: DynJwtService,
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    telemetry: ServiceTelemetry,
}

impl AuthService {
    pub fn new(deps: AuthServiceDeps, registry: &mut Registry) -> Self {
        let AuthServiceDeps {
            hash,
            jwt,
            user_query,
            user_command,
        } = deps;

        Self {
            hash,
            jwt,
            user_query,
            user_command,
            telemetry: ServiceTelemetry::new("auth-service", registry),
        }
    }

    fn issue_tokens(&self, user: User) -> Result<TokenResponse, ServiceError> {
        let access_token = self
            .jwt
            .generate_token(user.id, user.role, TokenType::Access)?;
        let refresh_token = self
            .jwt
            .generate_token(user.id, user.role, TokenType::Refresh)?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            user: UserResponse::from(user),
        })
    }

    async fn do_register(&self, req: &RegisterRequest) -> Result<User, ServiceError> {
        let email = req.email.trim().to_lowercase();

        if self.user_query.find_by_email(&email).await?.is_some() {
            warn!("⚠️ Registration rejected, email already in use: {email}");
            return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let password_hash = self.hash.hash_password(&req.password).await?;

        let record = CreateUserRecord {
            name: req.name.trim().to_string(),
            email,
            password_hash,
            role: Role::User,
        };

        self.user_command
            .create_user(&record)
            .await
            .map_err(|err| match err {
                RepositoryError::AlreadyExists(_) => ServiceError::Conflict(EMAIL_TAKEN.to_string()),
                other => ServiceError::Repo(other),
            })
    }

    async fn do_login(&self, req: &LoginRequest) -> Result<TokenResponse, ServiceError> {
        let user = self
            .user_query
            .find_by_email(req.email.trim())
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        self.hash
            .compare_password(&user.password, &req.password)
            .await?;

        if user.is_blocked {
            return Err(ServiceError::Forbidden("Your account has been blocked".into()));
        }

        self.user_command.touch_last_login(user.id).await?;

        self.issue_tokens(user)
    }

    async fn do_refresh(&self, refresh_token: &str) -> Result<TokenResponse, ServiceError> {
        let claims = self.jwt.verify_token(refresh_token, TokenType::Refresh)?;

        let user = self
            .user_query
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("User no longer exists".into()))?;

        if user.is_blocked {
            return Err(ServiceError::Unauthorized("Your account has been blocked".into()));
        }

        self.issue_tokens(user)
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("📝 Registering user: {}", req.email);

        let tracing_ctx = self.telemetry.start(
            "register",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", req.email.clone()),
            ],
        );

        let user = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "User registered",
            self.do_register(req).await,
        )?;

        Ok(ApiResponse::with_message(
            "User registered successfully",
            UserResponse::from(user),
        ))
    }

    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        info!("🔐 Login attempt: {}", req.email);

        let tracing_ctx = self.telemetry.start(
            "login",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", req.email.clone()),
            ],
        );

        let tokens = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "User logged in",
            self.do_login(req).await,
        )?;

        Ok(ApiResponse::with_message("Login successful", tokens))
    }

    async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let tracing_ctx = self
            .telemetry
            .start("refresh_token", vec![KeyValue::new("component", "auth")]);

        let tokens = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Token refreshed",
            self.do_refresh(refresh_token).await,
        )?;

        Ok(ApiResponse::with_message("Token refreshed", tokens))
    }

    async fn me(&self, actor: &Identity) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let user = self
            .user_query
            .find_by_id(actor.user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

        Ok(ApiResponse::success(UserResponse::from(user)))
    }

    async fn identify(&self, access_token: &str) -> Result<Identity, ServiceError> {
        let claims = self.jwt.verify_token(access_token, TokenType::Access)?;

        let user = self
            .user_query
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("User not found".into()))?;

        if user.is_blocked {
            return Err(ServiceError::Unauthorized("Your account has been blocked".into()));
        }

        Ok(Identity::from(&user))
    }
}
