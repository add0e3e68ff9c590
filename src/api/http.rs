use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::api::{ApiError, DirectoryApi, Organization, PermissionEnvelope, RoleEnvelope, User};
use crate::config::Config;
use crate::scope::Scope;

pub struct HttpApi {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(serde::Deserialize)]
struct OrganizationResponse {
    organization: Organization,
}

impl HttpApi {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let api_key = config.api_key.clone().ok_or(ApiError::MissingKey)?;
        Self::new(config.api_url.clone(), api_key, config.request_timeout_secs)
    }

    fn scope_query(scope: Scope, org_id: Option<&Uuid>) -> Vec<(&'static str, String)> {
        let mut query = vec![("scope", scope.as_str().to_string())];
        if let Some(org_id) = org_id {
            query.push(("orgId", org_id.to_string()));
        }
        query
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl DirectoryApi for HttpApi {
    async fn user_by_id(&self, id: &Uuid) -> Result<User, ApiError> {
        self.get_json(&format!("/api/v1/users/{}", id), &[]).await
    }

    async fn org_by_id(&self, org_id: &Uuid) -> Result<Organization, ApiError> {
        let response: OrganizationResponse = self
            .get_json(&format!("/api/v1/organizations/{}", org_id), &[])
            .await?;
        Ok(response.organization)
    }

    async fn roles_and_permissions(
        &self,
        scope: Scope,
        org_id: Option<&Uuid>,
    ) -> Result<PermissionEnvelope, ApiError> {
        self.get_json("/api/v1/roles-permissions", &Self::scope_query(scope, org_id))
            .await
    }

    async fn roles(&self, scope: Scope, org_id: Option<&Uuid>) -> Result<RoleEnvelope, ApiError> {
        self.get_json("/api/v1/roles", &Self::scope_query(scope, org_id))
            .await
    }
}
