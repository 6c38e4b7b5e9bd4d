use crate::types::DynamicMap;
use crate::{Client, ListCursorParams, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

/// The user who created an issue alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueAlertCreatedBy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An issue alert rule. Also used as the create and update body.
///
/// Conditions, filters and actions are provider-specific objects keyed by
/// their `id` (e.g. `sentry.rules.conditions.first_seen_event.FirstSeenEventCondition`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueAlert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<DynamicMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<DynamicMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<DynamicMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<IssueAlertCreatedBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    /// Handle of the background task, set when the rule is created asynchronously.
    #[serde(rename = "uuid", skip_serializing_if = "Option::is_none")]
    pub task_uuid: Option<String>,
}

/// Issue alert endpoints.
pub struct IssueAlerts<'a> {
    pub(crate) client: &'a Client,
}

impl IssueAlerts<'_> {
    /// Lists the issue alert rules of a project.
    pub async fn list(
        &self,
        organization_slug: &str,
        project_slug: &str,
        params: &ListCursorParams,
    ) -> Result<Response<Vec<IssueAlert>>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/rules/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(params.apply(request)).await
    }

    /// Retrieves an issue alert rule.
    pub async fn get(
        &self,
        organization_slug: &str,
        project_slug: &str,
        id: &str,
    ) -> Result<Response<IssueAlert>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/rules/{id}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Creates an issue alert.
    ///
    /// Rules with slow actions are created in the background; the call then
    /// waits for the background task and returns the finished rule.
    pub async fn create(
        &self,
        organization_slug: &str,
        project_slug: &str,
        alert: &IssueAlert,
    ) -> Result<Response<IssueAlert>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/rules/");
        let request = self.client.new_request_with_body(Method::POST, &path, alert)?;
        let response = self.client.execute(request).await?;
        self.resolve(organization_slug, project_slug, response).await
    }

    /// Updates an issue alert, waiting for the background task if there is one.
    pub async fn update(
        &self,
        organization_slug: &str,
        project_slug: &str,
        id: &str,
        alert: &IssueAlert,
    ) -> Result<Response<IssueAlert>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/rules/{id}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, alert)?;
        let response = self.client.execute(request).await?;
        self.resolve(organization_slug, project_slug, response).await
    }

    /// Deletes an issue alert rule.
    pub async fn delete(
        &self,
        organization_slug: &str,
        project_slug: &str,
        id: &str,
    ) -> Result<Response<()>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/rules/{id}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }

    async fn resolve(
        &self,
        organization_slug: &str,
        project_slug: &str,
        response: Response<Option<IssueAlert>>,
    ) -> Result<Response<IssueAlert>> {
        self.client
            .resolve_deferred(
                response,
                |alert: &IssueAlert| alert.task_uuid.clone(),
                |uuid| format!("0/projects/{organization_slug}/{project_slug}/rule-task/{uuid}/"),
                "rule",
            )
            .await
    }
}
