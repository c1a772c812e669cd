use clap::Args;
use serde_json::json;

use crate::auth::hash_password_scrypt;
use crate::cli::utils::{connect, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::content::{default_landing_data, default_landing_seo};
use crate::database::models::{AdminRole, LandingStatus};
use crate::database::repository::{AdminRepository, LandingRepository, TenantRepository};
use crate::services::normalize_domain;

const DEFAULT_SEED_EMAIL: &str = "admin@poweramazonica.com";
const DEV_SEED_PASSWORD: &str = "admin123";

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[arg(long, help = "Tenant domain (defaults to DEFAULT_TENANT_DOMAIN)")]
    pub domain: Option<String>,

    #[arg(long, help = "Admin email (defaults to ADMIN_EMAIL)")]
    pub email: Option<String>,
}

/// Hash stored for the seeded admin: the configured hash, a hash of the
/// configured plaintext, or the development password outside production.
pub fn seed_password_hash(config: &AppConfig) -> anyhow::Result<String> {
    if let Some(hash) = config.security.admin_password_hash.as_deref() {
        return Ok(hash.to_string());
    }
    if let Some(plain) = config.security.admin_password_plain.as_deref() {
        return Ok(hash_password_scrypt(plain));
    }
    if config.is_production() {
        anyhow::bail!("ADMIN_PASSWORD_HASH o ADMIN_PASSWORD_PLAIN es requerido para seed en produccion");
    }
    Ok(hash_password_scrypt(DEV_SEED_PASSWORD))
}

pub async fn handle(args: SeedArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let (config, db) = connect().await?;
    db.migrate().await?;

    let domain = normalize_domain(args.domain.as_deref(), &config.tenant.default_domain);
    let email = args
        .email
        .or_else(|| config.security.admin_email.clone())
        .unwrap_or_else(|| DEFAULT_SEED_EMAIL.to_string())
        .trim()
        .to_lowercase();
    let password_hash = seed_password_hash(&config)?;

    let pool = db.pool().clone();
    let tenant = TenantRepository::new(pool.clone()).get_or_create(&domain).await?;
    let admin = AdminRepository::new(pool.clone())
        .upsert(tenant.id, &email, &password_hash, AdminRole::SuperAdmin)
        .await?;

    let landing = LandingRepository::new(pool);
    landing
        .upsert(
            tenant.id,
            LandingStatus::Draft,
            &default_landing_data(),
            &default_landing_seo(),
            Some(admin.id),
        )
        .await?;
    let (_, snapshot) = landing.publish(tenant.id, admin.id).await?;

    db.close().await;

    output_success(
        output_format,
        &format!("Seed completado para tenant {domain} con admin {email}"),
        Some(json!({
            "tenant": tenant.domain,
            "admin": admin.email,
            "snapshot": snapshot.id,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password_hash;
    use crate::config::Environment;

    #[test]
    fn configured_hash_is_used_verbatim() {
        let mut config = AppConfig::development();
        config.security.admin_password_hash = Some("scrypt$16384$8$1$aa$bb".to_string());
        config.security.admin_password_plain = Some("ignored".to_string());
        assert_eq!(seed_password_hash(&config).unwrap(), "scrypt$16384$8$1$aa$bb");
    }

    #[test]
    fn development_falls_back_to_default_password() {
        let config = AppConfig::development();
        let hash = seed_password_hash(&config).unwrap();
        assert!(verify_password_hash(DEV_SEED_PASSWORD, &hash));
    }

    #[test]
    fn production_requires_a_configured_secret() {
        let mut config = AppConfig::development();
        config.environment = Environment::Production;
        assert!(seed_password_hash(&config).is_err());

        config.security.admin_password_plain = Some("s3cret".to_string());
        let hash = seed_password_hash(&config).unwrap();
        assert!(verify_password_hash("s3cret", &hash));
    }
}
