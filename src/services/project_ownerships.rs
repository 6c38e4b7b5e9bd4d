use crate::{Client, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

/// The ownership rules of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectOwnership {
    pub raw: String,
    #[serde(rename = "fallthrough")]
    pub fall_through: bool,
    pub date_created: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub auto_assignment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codeowners_auto_sync: Option<bool>,
}

/// Body of [`ProjectOwnerships::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectOwnershipParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(rename = "fallthrough", skip_serializing_if = "Option::is_none")]
    pub fall_through: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_assignment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codeowners_auto_sync: Option<bool>,
}

/// Project ownership endpoints.
pub struct ProjectOwnerships<'a> {
    pub(crate) client: &'a Client,
}

impl ProjectOwnerships<'_> {
    /// Retrieves the ownership configuration of a project.
    pub async fn get(
        &self,
        organization_slug: &str,
        project_slug: &str,
    ) -> Result<Response<ProjectOwnership>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/ownership/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Updates the ownership configuration of a project.
    pub async fn update(
        &self,
        organization_slug: &str,
        project_slug: &str,
        params: &UpdateProjectOwnershipParams,
    ) -> Result<Response<ProjectOwnership>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/ownership/");
        let request = self.client.new_request_with_body(Method::PUT, &path, params)?;
        self.client.fetch(request).await
    }
}
