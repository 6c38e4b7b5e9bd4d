use crate::types::DynamicMap;
use crate::{Client, ListCursorParams, Request, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationRepositoryProvider {
    pub id: String,
    pub name: String,
}

/// A source code repository linked to an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationRepository {
    pub id: String,
    pub name: String,
    pub url: String,
    pub provider: OrganizationRepositoryProvider,
    pub status: String,
    pub date_created: Option<DateTime<Utc>>,
    pub integration_id: String,
    pub external_slug: String,
}

/// Query parameters of [`OrganizationRepositories::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOrganizationRepositoriesParams {
    pub page: ListCursorParams,
    /// Repository status, e.g. `active` or `deleted`.
    pub status: Option<String>,
    /// Free-text filter on the repository name.
    pub query: Option<String>,
}

impl ListOrganizationRepositoriesParams {
    fn apply(&self, request: Request) -> Request {
        let mut request = self.page.apply(request);
        if let Some(status) = &self.status {
            request = request.with_query_param("status", status);
        }
        if let Some(query) = &self.query {
            request = request.with_query_param("query", query);
        }
        request
    }
}

/// Organization repository endpoints.
pub struct OrganizationRepositories<'a> {
    pub(crate) client: &'a Client,
}

impl OrganizationRepositories<'_> {
    /// Lists the repositories linked to an organization.
    pub async fn list(
        &self,
        organization_slug: &str,
        params: &ListOrganizationRepositoriesParams,
    ) -> Result<Response<Vec<OrganizationRepository>>> {
        let path = format!("0/organizations/{organization_slug}/repos/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(params.apply(request)).await
    }

    /// Links a repository. The accepted fields depend on the provider.
    pub async fn create(
        &self,
        organization_slug: &str,
        params: &DynamicMap,
    ) -> Result<Response<OrganizationRepository>> {
        let path = format!("0/organizations/{organization_slug}/repos/");
        let request = self.client.new_request_with_body(Method::POST, &path, params)?;
        self.client.fetch(request).await
    }

    /// Unlinks a repository and returns it with its updated status.
    pub async fn delete(
        &self,
        organization_slug: &str,
        repo_id: &str,
    ) -> Result<Response<OrganizationRepository>> {
        let path = format!("0/organizations/{organization_slug}/repos/{repo_id}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.fetch(request).await
    }
}
