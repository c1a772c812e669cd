use axum::http::HeaderMap;

use crate::database::models::Tenant;
use crate::database::repository::TenantRepository;
use crate::database::DatabaseError;

/// Lowercased host without port; blank input resolves to `default_domain`.
pub fn normalize_domain(raw: Option<&str>, default_domain: &str) -> String {
    let host = raw.map(str::trim).unwrap_or_default().to_lowercase();

    let without_port = if let Some(rest) = host.strip_prefix('[') {
        // [::1]:3000
        rest.split(']').next().unwrap_or_default().to_string()
    } else {
        host.split(':').next().unwrap_or_default().to_string()
    };

    if without_port.is_empty() {
        default_domain.to_string()
    } else {
        without_port
    }
}

/// Request host: `X-Forwarded-Host` first (first hop only), then `Host`.
pub fn host_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-forwarded-host")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| headers.get("host").and_then(|v| v.to_str().ok()))
}

/// Maps request hosts to tenant rows, creating tenants on first sight.
#[derive(Clone, Debug)]
pub struct TenantService {
    repo: TenantRepository,
    default_domain: String,
}

impl TenantService {
    pub fn new(repo: TenantRepository, default_domain: impl Into<String>) -> Self {
        Self {
            repo,
            default_domain: default_domain.into(),
        }
    }

    pub fn normalize(&self, raw: Option<&str>) -> String {
        normalize_domain(raw, &self.default_domain)
    }

    pub async fn get_or_create(&self, domain: &str) -> Result<Tenant, DatabaseError> {
        let domain = self.normalize(Some(domain));
        let tenant = self.repo.get_or_create(&domain).await?;
        tracing::debug!("Resolved tenant {} for domain {}", tenant.id, tenant.domain);
        Ok(tenant)
    }

    pub async fn resolve(&self, headers: &HeaderMap) -> Result<Tenant, DatabaseError> {
        let domain = self.normalize(host_from_headers(headers));
        self.repo.get_or_create(&domain).await
    }
}
