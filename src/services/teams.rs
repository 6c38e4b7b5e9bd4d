use super::Avatar;
use crate::{Client, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

/// A team within an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_member: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_access: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
}

/// Body of [`Teams::create`] and [`Teams::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Team endpoints.
pub struct Teams<'a> {
    pub(crate) client: &'a Client,
}

impl Teams<'_> {
    /// Lists the teams of an organization.
    pub async fn list(&self, organization_slug: &str) -> Result<Response<Vec<Team>>> {
        let path = format!("0/organizations/{organization_slug}/teams/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Retrieves a team.
    pub async fn get(&self, organization_slug: &str, slug: &str) -> Result<Response<Team>> {
        let path = format!("0/teams/{organization_slug}/{slug}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Creates a team.
    pub async fn create(&self, organization_slug: &str, params: &TeamParams) -> Result<Response<Team>> {
        let path = format!("0/organizations/{organization_slug}/teams/");
        let request = self.client.new_request_with_body(Method::POST, &path, params)?;
        self.client.fetch(request).await
    }

    /// Updates a team.
    pub async fn update(
        &self,
        organization_slug: &str,
        slug: &str,
        params: &TeamParams,
    ) -> Result<Response<Team>> {
        let path = format!("0/teams/{organization_slug}/{slug}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, params)?;
        self.client.fetch(request).await
    }

    /// Schedules a team for deletion.
    pub async fn delete(&self, organization_slug: &str, slug: &str) -> Result<Response<()>> {
        let path = format!("0/teams/{organization_slug}/{slug}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}
