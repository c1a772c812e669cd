use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Tenant;

#[derive(Clone, Debug)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent get-or-create keyed by the normalized domain.
    ///
    /// The conflict branch rewrites `domain` with itself so `RETURNING`
    /// yields the existing row without changing any data.
    pub async fn get_or_create(&self, domain: &str) -> Result<Tenant, DatabaseError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (domain)
            VALUES ($1)
            ON CONFLICT (domain) DO UPDATE SET domain = EXCLUDED.domain
            RETURNING id, domain, created_at, updated_at
            "#,
        )
        .bind(domain)
        .fetch_one(&self.pool)
        .await?;

        Ok(tenant)
    }
}
