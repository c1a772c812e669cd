use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::content::{self, LandingData, LandingSeo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "landing_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LandingStatus {
    Draft,
    Published,
}

/// Admin that last touched a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    pub id: Uuid,
    pub email: String,
}

fn actor(id: Option<Uuid>, email: Option<String>) -> Option<ActorRef> {
    Some(ActorRef { id: id?, email: email? })
}

/// `landing_pages` row joined with the editor's email.
#[derive(Debug, Clone, FromRow)]
pub struct LandingPageRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub status: LandingStatus,
    pub data: Value,
    pub seo: Value,
    pub updated_at: DateTime<Utc>,
    pub updated_by_id: Option<Uuid>,
    pub updated_by_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    pub id: Uuid,
    pub status: LandingStatus,
    pub data: LandingData,
    pub seo: LandingSeo,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<ActorRef>,
}

impl From<LandingPageRow> for LandingPage {
    fn from(row: LandingPageRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            data: content::parse_landing_data(&row.data),
            seo: content::parse_landing_seo(&row.seo),
            updated_at: row.updated_at,
            updated_by: actor(row.updated_by_id, row.updated_by_email),
        }
    }
}

/// `landing_publishes` row joined with the publisher's email.
#[derive(Debug, Clone, FromRow)]
pub struct LandingPublishRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub data: Value,
    pub seo: Value,
    pub published_at: DateTime<Utc>,
    pub published_by_id: Option<Uuid>,
    pub published_by_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPublish {
    pub id: Uuid,
    pub published_at: DateTime<Utc>,
    pub data: LandingData,
    pub seo: LandingSeo,
    pub published_by: Option<ActorRef>,
}

impl From<LandingPublishRow> for LandingPublish {
    fn from(row: LandingPublishRow) -> Self {
        Self {
            id: row.id,
            published_at: row.published_at,
            data: content::parse_landing_data(&row.data),
            seo: content::parse_landing_seo(&row.seo),
            published_by: actor(row.published_by_id, row.published_by_email),
        }
    }
}
