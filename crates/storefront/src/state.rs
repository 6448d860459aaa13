use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{Config, ConnectionManager, Hashing, JwtConfig, StorageBackend},
    di::{DependenciesInject, DependenciesInjectDeps, Repositories},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let repos = match config.storage {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .context("Missing environment variable: DATABASE_URL")?;

                let pool = ConnectionManager::new_pool(database_url, config.db_max_connections)
                    .await
                    .context("Failed to initialize database pool")?;

                if config.run_migrations {
                    info!("🛠️ Running database migrations");
                    sqlx::migrate!("./migrations")
                        .run(&pool)
                        .await
                        .context("Failed to run migrations")?;
                }

                Repositories::postgres(pool)
            }
            StorageBackend::Memory => {
                info!("🧪 Using in-memory storage; data is lost on restart");
                Repositories::memory()
            }
        };

        let state = Self::with_repositories(repos, &config.jwt_secret, config.bcrypt_cost);

        if let Some(admin) = &config.admin {
            state
                .di_container
                .bootstrap_admin(admin)
                .await
                .context("Failed to bootstrap admin account")?;
        }

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        Ok(state)
    }

    /// Wires services over `repos` without touching the network.
    pub fn with_repositories(repos: Repositories, jwt_secret: &str, bcrypt_cost: u32) -> Self {
        let jwt_config = Arc::new(JwtConfig::new(jwt_secret)) as DynJwtService;
        let hash = Arc::new(Hashing::new(bcrypt_cost)) as DynHashing;

        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());
        system_metrics.register(&mut registry);

        let di_container = DependenciesInject::new(
            DependenciesInjectDeps {
                repos,
                hash,
                jwt: jwt_config.clone(),
            },
            &mut registry,
        );

        Self {
            jwt_config,
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            system_metrics,
        }
    }
}
