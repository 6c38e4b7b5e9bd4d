use super::OrganizationIntegrationProvider;
use crate::{Client, ListCursorParams, Request, Response, Result};
use http::Method;
use serde::{Deserialize, Serialize};

/// A mapping from stack trace paths to source paths in a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationCodeMapping {
    pub id: String,
    pub project_id: String,
    pub project_slug: String,
    pub repo_id: String,
    pub repo_name: String,
    pub integration_id: String,
    pub provider: Option<OrganizationIntegrationProvider>,
    pub stack_root: String,
    pub source_root: String,
    pub default_branch: String,
}

/// Body of [`OrganizationCodeMappings::create`] and [`OrganizationCodeMappings::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationCodeMappingParams {
    pub default_branch: String,
    pub stack_root: String,
    pub source_root: String,
    pub repository_id: String,
    pub integration_id: String,
    pub project_id: String,
}

/// Query parameters of [`OrganizationCodeMappings::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOrganizationCodeMappingsParams {
    pub page: ListCursorParams,
    pub integration_id: Option<String>,
}

impl ListOrganizationCodeMappingsParams {
    fn apply(&self, request: Request) -> Request {
        let request = self.page.apply(request);
        match &self.integration_id {
            Some(id) => request.with_query_param("integrationId", id),
            None => request,
        }
    }
}

/// Code mapping endpoints.
pub struct OrganizationCodeMappings<'a> {
    pub(crate) client: &'a Client,
}

impl OrganizationCodeMappings<'_> {
    /// Lists the code mappings of an organization.
    pub async fn list(
        &self,
        organization_slug: &str,
        params: &ListOrganizationCodeMappingsParams,
    ) -> Result<Response<Vec<OrganizationCodeMapping>>> {
        let path = format!("0/organizations/{organization_slug}/code-mappings/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(params.apply(request)).await
    }

    /// Creates a code mapping.
    pub async fn create(
        &self,
        organization_slug: &str,
        params: &OrganizationCodeMappingParams,
    ) -> Result<Response<OrganizationCodeMapping>> {
        let path = format!("0/organizations/{organization_slug}/code-mappings/");
        let request = self.client.new_request_with_body(Method::POST, &path, params)?;
        self.client.fetch(request).await
    }

    /// Updates a code mapping.
    pub async fn update(
        &self,
        organization_slug: &str,
        code_mapping_id: &str,
        params: &OrganizationCodeMappingParams,
    ) -> Result<Response<OrganizationCodeMapping>> {
        let path = format!("0/organizations/{organization_slug}/code-mappings/{code_mapping_id}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, params)?;
        self.client.fetch(request).await
    }

    /// Deletes a code mapping.
    pub async fn delete(
        &self,
        organization_slug: &str,
        code_mapping_id: &str,
    ) -> Result<Response<()>> {
        let path = format!("0/organizations/{organization_slug}/code-mappings/{code_mapping_id}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}
