use super::{Avatar, Organization, Team};
use crate::types::DynamicMap;
use crate::{Client, ListCursorParams, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

/// A Sentry project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub name: String,

    pub is_public: bool,
    pub is_bookmarked: bool,
    pub color: String,

    pub date_created: Option<DateTime<Utc>>,
    pub first_event: Option<DateTime<Utc>>,

    pub features: Vec<String>,
    pub status: String,
    pub platform: Option<String>,

    pub is_internal: bool,
    pub is_member: bool,
    pub has_access: bool,

    pub avatar: Option<Avatar>,

    pub options: DynamicMap,

    pub digests_min_delay: i64,
    pub digests_max_delay: i64,
    pub subject_prefix: String,
    pub allowed_domains: Vec<String>,
    pub resolve_age: i64,
    pub data_scrubber: bool,
    pub data_scrubber_defaults: bool,
    pub fingerprinting_rules: String,
    pub grouping_enhancements: String,
    pub safe_fields: Vec<String>,
    pub sensitive_fields: Vec<String>,
    pub subject_template: String,
    pub security_token: String,
    pub security_token_header: Option<String>,
    #[serde(rename = "verifySSL")]
    pub verify_ssl: bool,
    #[serde(rename = "scrubIPAddresses")]
    pub scrub_ip_addresses: bool,
    #[serde(rename = "scrapeJavaScript")]
    pub scrape_javascript: bool,

    pub organization: Option<Organization>,
    pub processing_issues: i64,

    pub team: Option<Team>,
    pub teams: Vec<Team>,
}

/// The short team reference embedded in a [`ProjectSummary`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSummaryTeam {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// The condensed project shape embedded in other resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub is_bookmarked: bool,
    pub is_member: bool,
    pub has_access: bool,

    pub date_created: Option<DateTime<Utc>>,
    pub first_event: Option<DateTime<Utc>>,

    pub platform: Option<String>,
    pub platforms: Vec<String>,

    pub team: Option<ProjectSummaryTeam>,
    pub teams: Vec<ProjectSummaryTeam>,
}

/// Body of [`Projects::create`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateProjectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Body of [`Projects::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bookmarked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digests_min_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digests_max_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<DynamicMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprinting_rules: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping_enhancements: Option<String>,
}

/// Project endpoints.
pub struct Projects<'a> {
    pub(crate) client: &'a Client,
}

impl Projects<'_> {
    /// Lists the projects available to the caller.
    pub async fn list(&self, params: &ListCursorParams) -> Result<Response<Vec<Project>>> {
        let request = self.client.new_request(Method::GET, "0/projects/")?;
        self.client.fetch(params.apply(request)).await
    }

    /// Retrieves a project.
    pub async fn get(&self, organization_slug: &str, slug: &str) -> Result<Response<Project>> {
        let path = format!("0/projects/{organization_slug}/{slug}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Creates a project owned by the given team.
    pub async fn create(
        &self,
        organization_slug: &str,
        team_slug: &str,
        params: &CreateProjectParams,
    ) -> Result<Response<Project>> {
        let path = format!("0/teams/{organization_slug}/{team_slug}/projects/");
        let request = self.client.new_request_with_body(Method::POST, &path, params)?;
        self.client.fetch(request).await
    }

    /// Updates a project.
    pub async fn update(
        &self,
        organization_slug: &str,
        slug: &str,
        params: &UpdateProjectParams,
    ) -> Result<Response<Project>> {
        let path = format!("0/projects/{organization_slug}/{slug}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, params)?;
        self.client.fetch(request).await
    }

    /// Schedules a project for deletion.
    pub async fn delete(&self, organization_slug: &str, slug: &str) -> Result<Response<()>> {
        let path = format!("0/projects/{organization_slug}/{slug}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }

    /// Grants a team access to a project.
    pub async fn add_team(
        &self,
        organization_slug: &str,
        slug: &str,
        team_slug: &str,
    ) -> Result<Response<Project>> {
        let path = format!("0/projects/{organization_slug}/{slug}/teams/{team_slug}/");
        let request = self.client.new_request(Method::POST, &path)?;
        self.client.fetch(request).await
    }

    /// Revokes a team's access to a project.
    pub async fn remove_team(
        &self,
        organization_slug: &str,
        slug: &str,
        team_slug: &str,
    ) -> Result<Response<()>> {
        let path = format!("0/projects/{organization_slug}/{slug}/teams/{team_slug}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_tolerates_sparse_payload() {
        let project: Project = serde_json::from_str(
            r#"{"id": "2", "slug": "pump-station", "firstEvent": null, "verifySSL": true}"#,
        )
        .unwrap();

        assert_eq!(project.slug, "pump-station");
        assert!(project.first_event.is_none());
        assert!(project.verify_ssl);
        assert!(project.teams.is_empty());
    }

    #[test]
    fn test_update_params_skip_unset_fields() {
        let params = UpdateProjectParams {
            name: Some("Plane Proxy".to_string()),
            resolve_age: Some(0),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"name":"Plane Proxy","resolveAge":0}"#
        );
    }
}
