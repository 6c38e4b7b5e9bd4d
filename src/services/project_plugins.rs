use crate::types::DynamicMap;
use crate::{Client, Response, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPluginAsset {
    pub url: String,
}

/// One configurable setting of a plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPluginConfig {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub help: String,
    pub placeholder: String,
    pub choices: Value,
    #[serde(rename = "readonly")]
    pub read_only: bool,
    pub default_value: Value,
    pub value: Value,
}

/// A legacy plugin installed on a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPlugin {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub can_disable: bool,
    pub is_testable: bool,
    pub metadata: DynamicMap,
    pub contexts: Vec<String>,
    pub status: String,
    pub assets: Vec<ProjectPluginAsset>,
    pub doc: String,
    pub config: Vec<ProjectPluginConfig>,
}

/// Project plugin endpoints.
pub struct ProjectPlugins<'a> {
    pub(crate) client: &'a Client,
}

impl ProjectPlugins<'_> {
    /// Lists the plugins of a project.
    pub async fn list(
        &self,
        organization_slug: &str,
        project_slug: &str,
    ) -> Result<Response<Vec<ProjectPlugin>>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/plugins/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Retrieves a plugin.
    pub async fn get(
        &self,
        organization_slug: &str,
        project_slug: &str,
        id: &str,
    ) -> Result<Response<ProjectPlugin>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/plugins/{id}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Updates plugin settings; `params` maps setting names to values.
    pub async fn update(
        &self,
        organization_slug: &str,
        project_slug: &str,
        id: &str,
        params: &DynamicMap,
    ) -> Result<Response<ProjectPlugin>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/plugins/{id}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, params)?;
        self.client.fetch(request).await
    }

    /// Enables a plugin.
    pub async fn enable(
        &self,
        organization_slug: &str,
        project_slug: &str,
        id: &str,
    ) -> Result<Response<()>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/plugins/{id}/");
        let request = self.client.new_request(Method::POST, &path)?;
        self.client.execute_empty(request).await
    }

    /// Disables a plugin.
    pub async fn disable(
        &self,
        organization_slug: &str,
        project_slug: &str,
        id: &str,
    ) -> Result<Response<()>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/plugins/{id}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}
