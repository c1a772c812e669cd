pub mod auth_service;
pub mod cache;
pub mod content_service;
pub mod lead_service;
pub mod tenant_service;

use thiserror::Error;

use crate::database::DatabaseError;
use crate::validation::ValidationErrors;

pub use auth_service::{AuthService, AuthenticatedAdmin, LoginResult};
pub use cache::PublishedCache;
pub use content_service::{ContentService, PublishResult};
pub use lead_service::LeadService;
pub use tenant_service::{host_from_headers, normalize_domain, TenantService};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Validation(ValidationErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
