use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{AdminRole, AdminUser};

const ADMIN_COLUMNS: &str = "id, tenant_id, email, password_hash, role, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create or refresh the admin account for `(tenant, email)`.
    ///
    /// An existing account gets the new hash and role; rows are never deleted.
    pub async fn upsert(
        &self,
        tenant_id: Uuid,
        email: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> Result<AdminUser, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO admin_users (tenant_id, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (tenant_id, email) DO UPDATE
                SET password_hash = EXCLUDED.password_hash,
                    role = EXCLUDED.role,
                    updated_at = now()
            RETURNING {ADMIN_COLUMNS}
            "#
        );

        let admin = sqlx::query_as::<_, AdminUser>(&sql)
            .bind(tenant_id)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(admin)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, DatabaseError> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admin_users WHERE id = $1");
        let admin = sqlx::query_as::<_, AdminUser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(admin)
    }
}
