use sqlx::{types::Json, PgExecutor, PgPool};
use uuid::Uuid;

use crate::content::{self, LandingData, LandingSeo};
use crate::database::manager::DatabaseError;
use crate::database::models::{LandingPage, LandingPageRow, LandingPublish, LandingPublishRow, LandingStatus};

const PAGE_SELECT: &str = r#"
    SELECT p.id, p.tenant_id, p.status, p.data, p.seo, p.updated_at, p.updated_by_id,
           u.email AS updated_by_email
    FROM page p
    LEFT JOIN admin_users u ON u.id = p.updated_by_id
"#;

const PUBLISH_SELECT: &str = r#"
    SELECT s.id, s.tenant_id, s.data, s.seo, s.published_at, s.published_by_id,
           u.email AS published_by_email
    FROM snapshot s
    LEFT JOIN admin_users u ON u.id = s.published_by_id
"#;

/// Draft/published singleton rows and the append-only publish history.
#[derive(Clone, Debug)]
pub struct LandingRepository {
    pool: PgPool,
}

impl LandingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the row for `status`, seeding it with the default template when absent.
    pub async fn get_or_create(
        &self,
        tenant_id: Uuid,
        status: LandingStatus,
    ) -> Result<LandingPage, DatabaseError> {
        let sql = format!(
            r#"
            WITH page AS (
                INSERT INTO landing_pages (tenant_id, status, data, seo)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (tenant_id, status) DO UPDATE SET tenant_id = EXCLUDED.tenant_id
                RETURNING *
            )
            {PAGE_SELECT}
            "#
        );

        let row = sqlx::query_as::<_, LandingPageRow>(&sql)
            .bind(tenant_id)
            .bind(status)
            .bind(Json(content::default_landing_data()))
            .bind(Json(content::default_landing_seo()))
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    pub async fn find(
        &self,
        tenant_id: Uuid,
        status: LandingStatus,
    ) -> Result<Option<LandingPage>, DatabaseError> {
        let sql = format!(
            r#"
            WITH page AS (
                SELECT * FROM landing_pages WHERE tenant_id = $1 AND status = $2
            )
            {PAGE_SELECT}
            "#
        );

        let row = sqlx::query_as::<_, LandingPageRow>(&sql)
            .bind(tenant_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn upsert(
        &self,
        tenant_id: Uuid,
        status: LandingStatus,
        data: &LandingData,
        seo: &LandingSeo,
        updated_by: Option<Uuid>,
    ) -> Result<LandingPage, DatabaseError> {
        let row = upsert_page(&self.pool, tenant_id, status, data, seo, updated_by).await?;
        Ok(row.into())
    }

    /// Copy the draft into the published row and append a snapshot, atomically.
    ///
    /// A missing or unreadable draft publishes the default template. Any
    /// failure rolls back both writes.
    pub async fn publish(
        &self,
        tenant_id: Uuid,
        publisher_id: Uuid,
    ) -> Result<(LandingPage, LandingPublish), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let draft: Option<(serde_json::Value, serde_json::Value)> = sqlx::query_as(
            "SELECT data, seo FROM landing_pages WHERE tenant_id = $1 AND status = $2",
        )
        .bind(tenant_id)
        .bind(LandingStatus::Draft)
        .fetch_optional(&mut *tx)
        .await?;

        let (data, seo) = match draft {
            Some((data, seo)) => (content::parse_landing_data(&data), content::parse_landing_seo(&seo)),
            None => (content::default_landing_data(), content::default_landing_seo()),
        };

        let published = upsert_page(
            &mut *tx,
            tenant_id,
            LandingStatus::Published,
            &data,
            &seo,
            Some(publisher_id),
        )
        .await?;

        let sql = format!(
            r#"
            WITH snapshot AS (
                INSERT INTO landing_publishes (tenant_id, data, seo, published_by_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            {PUBLISH_SELECT}
            "#
        );
        let snapshot = sqlx::query_as::<_, LandingPublishRow>(&sql)
            .bind(tenant_id)
            .bind(Json(&data))
            .bind(Json(&seo))
            .bind(publisher_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((published.into(), snapshot.into()))
    }

    /// Publish history, newest first.
    pub async fn list_publishes(
        &self,
        tenant_id: Uuid,
        limit: i64,
    ) -> Result<Vec<LandingPublish>, DatabaseError> {
        let sql = format!(
            r#"
            WITH snapshot AS (
                SELECT * FROM landing_publishes WHERE tenant_id = $1
            )
            {PUBLISH_SELECT}
            ORDER BY s.published_at DESC, s.id DESC
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, LandingPublishRow>(&sql)
            .bind(tenant_id)
            .bind(limit.max(1))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

async fn upsert_page<'e, E>(
    executor: E,
    tenant_id: Uuid,
    status: LandingStatus,
    data: &LandingData,
    seo: &LandingSeo,
    updated_by: Option<Uuid>,
) -> Result<LandingPageRow, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        r#"
        WITH page AS (
            INSERT INTO landing_pages (tenant_id, status, data, seo, updated_by_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (tenant_id, status) DO UPDATE
                SET data = EXCLUDED.data,
                    seo = EXCLUDED.seo,
                    updated_by_id = EXCLUDED.updated_by_id,
                    updated_at = now()
            RETURNING *
        )
        {PAGE_SELECT}
        "#
    );

    let row = sqlx::query_as::<_, LandingPageRow>(&sql)
        .bind(tenant_id)
        .bind(status)
        .bind(Json(data))
        .bind(Json(seo))
        .bind(updated_by)
        .fetch_one(executor)
        .await?;

    Ok(row)
}
