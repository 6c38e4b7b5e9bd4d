use crate::{Client, ListCursorParams, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

/// A rate limit attached to a client key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectKeyRateLimit {
    pub window: i64,
    pub count: i64,
}

/// The DSN variants of a client key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectKeyDsn {
    pub secret: String,
    pub public: String,
    pub csp: String,
    pub security: String,
    pub minidump: String,
    pub cdn: String,
}

/// A client key (DSN) of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectKey {
    pub id: String,
    pub name: String,
    pub label: String,
    pub public: String,
    pub secret: String,
    pub project_id: i64,
    pub is_active: bool,
    pub rate_limit: Option<ProjectKeyRateLimit>,
    pub dsn: ProjectKeyDsn,
    pub date_created: Option<DateTime<Utc>>,
}

/// Body of [`ProjectKeys::create`] and [`ProjectKeys::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectKeyParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<ProjectKeyRateLimit>,
}

/// Client key endpoints.
pub struct ProjectKeys<'a> {
    pub(crate) client: &'a Client,
}

impl ProjectKeys<'_> {
    /// Lists the client keys of a project.
    pub async fn list(
        &self,
        organization_slug: &str,
        project_slug: &str,
        params: &ListCursorParams,
    ) -> Result<Response<Vec<ProjectKey>>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/keys/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(params.apply(request)).await
    }

    /// Creates a client key.
    pub async fn create(
        &self,
        organization_slug: &str,
        project_slug: &str,
        params: &ProjectKeyParams,
    ) -> Result<Response<ProjectKey>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/keys/");
        let request = self.client.new_request_with_body(Method::POST, &path, params)?;
        self.client.fetch(request).await
    }

    /// Updates a client key.
    pub async fn update(
        &self,
        organization_slug: &str,
        project_slug: &str,
        key_id: &str,
        params: &ProjectKeyParams,
    ) -> Result<Response<ProjectKey>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/keys/{key_id}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, params)?;
        self.client.fetch(request).await
    }

    /// Deletes a client key.
    pub async fn delete(
        &self,
        organization_slug: &str,
        project_slug: &str,
        key_id: &str,
    ) -> Result<Response<()>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/keys/{key_id}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}
