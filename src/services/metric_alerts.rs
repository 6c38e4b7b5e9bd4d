use crate::{Client, ListCursorParams, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A metric alert rule. Also used as the create and update body.
///
/// Time windows and thresholds are kept as [`Number`] so that values like
/// `0.1` are sent back exactly as they were received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAlert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(rename = "dataset", skip_serializing_if = "Option::is_none")]
    pub data_set: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_threshold: Option<Number>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<MetricAlertTrigger>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    /// Handle of the background task, set when the rule is saved asynchronously.
    #[serde(rename = "uuid", skip_serializing_if = "Option::is_none")]
    pub task_uuid: Option<String>,
}

/// A threshold of a [`MetricAlert`] and the actions it fires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAlertTrigger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_rule_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_threshold: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    /// Always sent, even when empty.
    #[serde(default)]
    pub actions: Vec<MetricAlertTriggerAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAlertTriggerAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_rule_trigger_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    /// A user, team or integration target: a string or a number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_identifier: Option<Value>,
    #[serde(rename = "inputChannelId", skip_serializing_if = "Option::is_none")]
    pub input_channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentry_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(rename = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Metric alert endpoints.
pub struct MetricAlerts<'a> {
    pub(crate) client: &'a Client,
}

impl MetricAlerts<'_> {
    /// Lists the metric alert rules of a project.
    pub async fn list(
        &self,
        organization_slug: &str,
        project_slug: &str,
        params: &ListCursorParams,
    ) -> Result<Response<Vec<MetricAlert>>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/alert-rules/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(params.apply(request)).await
    }

    /// Retrieves a metric alert. Rules are addressed through the organization.
    pub async fn get(&self, organization_slug: &str, id: &str) -> Result<Response<MetricAlert>> {
        let path = format!("0/organizations/{organization_slug}/alert-rules/{id}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Creates a metric alert, waiting for the background task if there is one.
    pub async fn create(
        &self,
        organization_slug: &str,
        project_slug: &str,
        alert: &MetricAlert,
    ) -> Result<Response<MetricAlert>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/alert-rules/");
        let request = self.client.new_request_with_body(Method::POST, &path, alert)?;
        let response = self.client.execute(request).await?;
        self.resolve(organization_slug, project_slug, response).await
    }

    /// Updates a metric alert, waiting for the background task if there is one.
    pub async fn update(
        &self,
        organization_slug: &str,
        project_slug: &str,
        id: &str,
        alert: &MetricAlert,
    ) -> Result<Response<MetricAlert>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/alert-rules/{id}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, alert)?;
        let response = self.client.execute(request).await?;
        self.resolve(organization_slug, project_slug, response).await
    }

    /// Deletes a metric alert rule.
    pub async fn delete(
        &self,
        organization_slug: &str,
        project_slug: &str,
        id: &str,
    ) -> Result<Response<()>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/alert-rules/{id}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }

    async fn resolve(
        &self,
        organization_slug: &str,
        project_slug: &str,
        response: Response<Option<MetricAlert>>,
    ) -> Result<Response<MetricAlert>> {
        self.client
            .resolve_deferred(
                response,
                |alert: &MetricAlert| alert.task_uuid.clone(),
                |uuid| {
                    format!("0/projects/{organization_slug}/{project_slug}/alert-rule-task/{uuid}/")
                },
                "alertRule",
            )
            .await
    }
}
