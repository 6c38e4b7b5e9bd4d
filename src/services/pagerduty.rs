use crate::{Client, Response, Result};
use http::Method;
use serde::{Deserialize, Serialize};

/// One PagerDuty service routed from Sentry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerdutyServiceMapping {
    pub id: i64,
    pub service: String,
    pub integration_key: String,
}

/// Settings of a PagerDuty integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerdutyConfig {
    pub service_table: Vec<PagerdutyServiceMapping>,
}

/// An installed PagerDuty integration with its service table decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PagerdutyIntegration {
    pub id: String,
    pub name: String,
    pub config_data: PagerdutyConfig,
    pub external_id: String,
    pub organization_id: i64,
    pub organization_integration_status: String,
}

/// PagerDuty integration endpoints.
pub struct Pagerduty<'a> {
    pub(crate) client: &'a Client,
}

impl Pagerduty<'_> {
    /// Retrieves a PagerDuty integration of an organization.
    pub async fn get(
        &self,
        organization_slug: &str,
        integration_id: i64,
    ) -> Result<Response<PagerdutyIntegration>> {
        let path = format!("0/organizations/{organization_slug}/integrations/{integration_id}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }
}
