use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::scope::Scope;

pub mod http;

pub use http::HttpApi;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("API key not configured")]
    MissingKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub email: String,
    #[serde(
        default,
        rename = "currentOrganization",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_organization: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
}

#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn user_by_id(&self, id: &Uuid) -> Result<User, ApiError>;

    async fn org_by_id(&self, org_id: &Uuid) -> Result<Organization, ApiError>;

    async fn roles_and_permissions(
        &self,
        scope: Scope,
        org_id: Option<&Uuid>,
    ) -> Result<PermissionEnvelope, ApiError>;

    async fn roles(&self, scope: Scope, org_id: Option<&Uuid>) -> Result<RoleEnvelope, ApiError>;
}
