use crate::{
    abstract_trait::{DynHashing, DynUserCommandRepository, DynUserQueryRepository},
    config::AdminBootstrap,
    domain::requests::CreateUserRecord,
    model::Role,
    utils::generate_random_string,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

const GENERATED_PASSWORD_LEN: usize = 16;

/// Makes sure the configured admin account exists and carries the admin role.
pub async fn ensure_admin(
    admin: &AdminBootstrap,
    user_query: &DynUserQueryRepository,
    user_command: &DynUserCommandRepository,
    hash: &DynHashing,
) -> Result<()> {
    if let Some(user) = user_query
        .find_by_email(&admin.email)
        .await
        .context("Failed to look up admin account")?
    {
        if user.role != Role::Admin {
            user_command
                .update_role(user.id, Role::Admin)
                .await
                .context("Failed to promote admin account")?;
            info!("🔑 Promoted {} to admin", user.email);
        }
        return Ok(());
    }

    let password = match &admin.password {
        Some(password) => password.clone(),
        None => {
            let generated = generate_random_string(GENERATED_PASSWORD_LEN)?;
            warn!(
                "⚠️ ADMIN_PASSWORD not set, generated password for {}: {generated}",
                admin.email
            );
            generated
        }
    };

    let password_hash = hash
        .hash_password(&password)
        .await
        .context("Failed to hash admin password")?;

    let user = user_command
        .create_user(&CreateUserRecord {
            name: "Administrator".to_string(),
            email: admin.email.to_lowercase(),
            password_hash,
            role: Role::Admin,
        })
        .await
        .context("Failed to create admin account")?;

    info!("🔑 Created admin account {}", user.email);
    Ok(())
}
