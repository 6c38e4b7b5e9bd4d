use crate::types::DynamicMap;
use crate::{Client, ListCursorParams, Request, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

/// The provider behind an installed integration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationIntegrationProvider {
    pub key: String,
    pub slug: String,
    pub name: String,
    pub can_add: bool,
    pub can_disable: bool,
    pub features: Vec<String>,
}

/// A third-party integration installed on an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationIntegration {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub domain_name: String,
    pub account_type: Option<String>,
    pub scopes: Vec<String>,
    pub status: String,
    pub provider: OrganizationIntegrationProvider,

    /// Provider-specific settings.
    pub config_data: Option<DynamicMap>,
    pub external_id: String,
    pub organization_id: i64,
    pub organization_integration_status: String,
    pub grace_period_end: Option<DateTime<Utc>>,
}

/// Query parameters of [`OrganizationIntegrations::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOrganizationIntegrationsParams {
    pub page: ListCursorParams,
    /// Only list integrations of this provider (e.g. `github`).
    pub provider_key: Option<String>,
}

impl ListOrganizationIntegrationsParams {
    fn apply(&self, request: Request) -> Request {
        let request = self.page.apply(request);
        match &self.provider_key {
            Some(key) => request.with_query_param("provider_key", key),
            None => request,
        }
    }
}

/// Organization integration endpoints.
pub struct OrganizationIntegrations<'a> {
    pub(crate) client: &'a Client,
}

impl OrganizationIntegrations<'_> {
    /// Lists the integrations installed on an organization.
    pub async fn list(
        &self,
        organization_slug: &str,
        params: &ListOrganizationIntegrationsParams,
    ) -> Result<Response<Vec<OrganizationIntegration>>> {
        let path = format!("0/organizations/{organization_slug}/integrations/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(params.apply(request)).await
    }

    /// Retrieves an installed integration.
    pub async fn get(
        &self,
        organization_slug: &str,
        integration_id: &str,
    ) -> Result<Response<OrganizationIntegration>> {
        let path = format!("0/organizations/{organization_slug}/integrations/{integration_id}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Replaces the provider-specific settings of an integration.
    pub async fn update_config(
        &self,
        organization_slug: &str,
        integration_id: &str,
        config: &DynamicMap,
    ) -> Result<Response<()>> {
        let path = format!("0/organizations/{organization_slug}/integrations/{integration_id}/");
        let request = self.client.new_request_with_body(Method::POST, &path, config)?;
        self.client.execute_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_list_params_query() {
        let params = ListOrganizationIntegrationsParams {
            page: ListCursorParams::with_cursor("100:1:0"),
            provider_key: Some("pagerduty".to_string()),
        };
        let url = Url::parse("https://sentry.io/api/0/organizations/acme/integrations/").unwrap();

        let request = params.apply(Request::new(Method::GET, url));

        assert_eq!(request.url.query(), Some("cursor=100%3A1%3A0&provider_key=pagerduty"));
    }
}
