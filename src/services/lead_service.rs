use uuid::Uuid;

use crate::database::models::{Lead, NewLead};
use crate::database::repository::LeadRepository;
use crate::database::DatabaseError;
use crate::leads::LeadFilter;

#[derive(Clone, Debug)]
pub struct LeadService {
    repo: LeadRepository,
}

impl LeadService {
    pub fn new(repo: LeadRepository) -> Self {
        Self { repo }
    }

    /// Store an already screened submission.
    pub async fn create(&self, tenant_id: Uuid, lead: &NewLead) -> Result<Uuid, DatabaseError> {
        self.repo.insert(tenant_id, lead).await
    }

    pub async fn list(&self, tenant_id: Uuid, filter: &LeadFilter) -> Result<Vec<Lead>, DatabaseError> {
        self.repo.list(tenant_id, filter).await
    }
}
