use crate::{Client, ListCursorParams, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A custom dashboard. Also used as the create and update body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub widgets: Vec<DashboardWidget>,
}

/// A widget placed on a [`Dashboard`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWidget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<DashboardWidgetQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<DashboardWidgetLayout>,
}

/// Grid position and size of a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWidgetLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_h: Option<i64>,
}

/// One query feeding a widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWidgetQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregates: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(rename = "orderby", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

/// Validation messages keyed by widget field.
pub type DashboardWidgetErrors = HashMap<String, Vec<String>>;

/// Dashboard endpoints.
pub struct Dashboards<'a> {
    pub(crate) client: &'a Client,
}

impl Dashboards<'_> {
    /// Lists the custom dashboards of an organization.
    pub async fn list(
        &self,
        organization_slug: &str,
        params: &ListCursorParams,
    ) -> Result<Response<Vec<Dashboard>>> {
        let path = format!("0/organizations/{organization_slug}/dashboards/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(params.apply(request)).await
    }

    /// Retrieves a dashboard with its widgets.
    pub async fn get(&self, organization_slug: &str, id: &str) -> Result<Response<Dashboard>> {
        let path = format!("0/organizations/{organization_slug}/dashboards/{id}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Creates a dashboard.
    pub async fn create(
        &self,
        organization_slug: &str,
        dashboard: &Dashboard,
    ) -> Result<Response<Dashboard>> {
        let path = format!("0/organizations/{organization_slug}/dashboards/");
        let request = self.client.new_request_with_body(Method::POST, &path, dashboard)?;
        self.client.fetch(request).await
    }

    /// Replaces a dashboard, widgets included.
    pub async fn update(
        &self,
        organization_slug: &str,
        id: &str,
        dashboard: &Dashboard,
    ) -> Result<Response<Dashboard>> {
        let path = format!("0/organizations/{organization_slug}/dashboards/{id}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, dashboard)?;
        self.client.fetch(request).await
    }

    /// Deletes a dashboard.
    pub async fn delete(&self, organization_slug: &str, id: &str) -> Result<Response<()>> {
        let path = format!("0/organizations/{organization_slug}/dashboards/{id}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}

/// Dashboard widget endpoints.
pub struct DashboardWidgets<'a> {
    pub(crate) client: &'a Client,
}

impl DashboardWidgets<'_> {
    /// Checks a widget definition without saving it.
    ///
    /// Returns `None` when the widget is valid, or the validation messages
    /// otherwise.
    pub async fn validate(
        &self,
        organization_slug: &str,
        widget: &DashboardWidget,
    ) -> Result<Response<Option<DashboardWidgetErrors>>> {
        let path = format!("0/organizations/{organization_slug}/dashboards/widgets/");
        let request = self.client.new_request_with_body(Method::POST, &path, widget)?;
        let response = self.client.execute::<DashboardWidgetErrors>(request).await?;
        Ok(response.map(|errors| errors.filter(|errors| !errors.is_empty())))
    }
}
