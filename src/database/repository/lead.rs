use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Lead, NewLead};
use crate::leads::LeadFilter;

#[derive(Clone, Debug)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, tenant_id: Uuid, lead: &NewLead) -> Result<Uuid, DatabaseError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO leads (tenant_id, name, phone, email, message, source)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(tenant_id)
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(&lead.email)
        .bind(&lead.message)
        .bind(&lead.source)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Newest-first listing with case-insensitive substring filters.
    ///
    /// `search` matches any of name, phone, email, message or source;
    /// `source` narrows on the source column alone.
    pub async fn list(&self, tenant_id: Uuid, filter: &LeadFilter) -> Result<Vec<Lead>, DatabaseError> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT id, name, phone, email, message, source, created_at
            FROM leads
            WHERE tenant_id = $1
              AND ($2::text IS NULL OR source ILIKE $2 ESCAPE '\')
              AND (
                    $3::text IS NULL
                    OR name ILIKE $3 ESCAPE '\'
                    OR phone ILIKE $3 ESCAPE '\'
                    OR email ILIKE $3 ESCAPE '\'
                    OR message ILIKE $3 ESCAPE '\'
                    OR source ILIKE $3 ESCAPE '\'
              )
            ORDER BY created_at DESC, id DESC
            LIMIT $4
            "#,
        )
        .bind(tenant_id)
        .bind(filter.source.as_deref().map(contains_pattern))
        .bind(filter.search.as_deref().map(contains_pattern))
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }
}

/// `%needle%` with LIKE metacharacters in the needle escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
