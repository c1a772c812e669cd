use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::cache::PublishedCache;
use super::tenant_service::TenantService;
use super::ServiceError;
use crate::content::validate_draft_payload;
use crate::database::models::{LandingPage, LandingPublish, LandingStatus, Tenant};
use crate::database::repository::LandingRepository;
use crate::database::DatabaseError;

pub const DEFAULT_PUBLISH_HISTORY: i64 = 20;

#[derive(Debug, Clone, Serialize)]
pub struct PublishResult {
    pub published: LandingPage,
    pub snapshot: LandingPublish,
}

/// Draft/publish lifecycle for a tenant's landing content.
#[derive(Clone, Debug)]
pub struct ContentService {
    landing: LandingRepository,
    tenants: TenantService,
    cache: PublishedCache,
}

impl ContentService {
    pub fn new(landing: LandingRepository, tenants: TenantService, cache: PublishedCache) -> Self {
        Self { landing, tenants, cache }
    }

    /// Current draft; a tenant without one gets the default template.
    pub async fn get_draft(&self, tenant_id: Uuid) -> Result<LandingPage, DatabaseError> {
        self.landing.get_or_create(tenant_id, LandingStatus::Draft).await
    }

    /// Validate `payload` and store it as the draft. Nothing is written on validation failure.
    pub async fn save_draft(
        &self,
        tenant_id: Uuid,
        payload: &Value,
        editor_id: Uuid,
    ) -> Result<LandingPage, ServiceError> {
        let payload = validate_draft_payload(payload).map_err(ServiceError::Validation)?;
        let page = self
            .landing
            .upsert(tenant_id, LandingStatus::Draft, &payload.data, &payload.seo, Some(editor_id))
            .await?;
        Ok(page)
    }

    /// Promote the draft to published and record a snapshot, then drop the
    /// tenant's cached public content.
    pub async fn publish(&self, tenant: &Tenant, publisher_id: Uuid) -> Result<PublishResult, DatabaseError> {
        let (published, snapshot) = self.landing.publish(tenant.id, publisher_id).await?;
        self.cache.invalidate(&tenant.domain).await;
        tracing::info!("Published landing for {} (snapshot {})", tenant.domain, snapshot.id);
        Ok(PublishResult { published, snapshot })
    }

    pub async fn list_publishes(
        &self,
        tenant_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<LandingPublish>, DatabaseError> {
        self.landing
            .list_publishes(tenant_id, limit.unwrap_or(DEFAULT_PUBLISH_HISTORY))
            .await
    }

    pub async fn get_published(&self, tenant_id: Uuid) -> Result<Option<LandingPage>, DatabaseError> {
        self.landing.find(tenant_id, LandingStatus::Published).await
    }

    /// Public content for a request host, served through the cache.
    ///
    /// Lookup failures are logged and reported as "nothing published" so the
    /// public page can still render its fallback.
    pub async fn published_for_domain(&self, raw_host: Option<&str>) -> (String, Option<LandingPage>) {
        let domain = self.tenants.normalize(raw_host);

        let generation = match self.cache.lookup(&domain).await {
            Ok(cached) => return (domain, cached),
            Err(generation) => generation,
        };

        let lookup = async {
            let tenant = self.tenants.get_or_create(&domain).await?;
            self.get_published(tenant.id).await
        };

        match lookup.await {
            Ok(landing) => {
                if !self.cache.insert(&domain, generation, landing.clone()).await {
                    tracing::debug!("Skipped stale cache fill for {}", domain);
                }
                (domain, landing)
            }
            Err(e) => {
                tracing::error!("No se pudo cargar landing publicada para {}: {}", domain, e);
                (domain, None)
            }
        }
    }
}
