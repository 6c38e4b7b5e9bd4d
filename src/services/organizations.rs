use super::Avatar;
use crate::{Client, ListCursorParams, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

/// The lifecycle status of an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationStatus {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Event quotas of an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationQuota {
    pub max_rate: Option<i64>,
    pub max_rate_interval: Option<i64>,
    pub account_limit: Option<i64>,
    pub project_limit: Option<i64>,
}

/// A role members of an organization can hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationAvailableRole {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A Sentry organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrganizationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_early_adopter: Option<bool>,
    #[serde(rename = "require2FA", skip_serializing_if = "Option::is_none")]
    pub require_2fa: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_email_verification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,

    // Detailed fields, only present on single-organization responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<OrganizationQuota>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_roles: Vec<OrganizationAvailableRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_membership: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_shared_issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_privacy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_scrubber: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_scrubber_defaults: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensitive_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safe_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrub_ip_addresses: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_access_requests: Option<i64>,
}

/// Body of [`Organizations::create`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agree_terms: Option<bool>,
}

/// Body of [`Organizations::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateOrganizationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Organization endpoints.
pub struct Organizations<'a> {
    pub(crate) client: &'a Client,
}

impl Organizations<'_> {
    /// Lists the organizations available to the caller, one page at a time.
    pub async fn list(&self, params: &ListCursorParams) -> Result<Response<Vec<Organization>>> {
        let request = self.client.new_request(Method::GET, "0/organizations/")?;
        self.client.fetch(params.apply(request)).await
    }

    /// Retrieves an organization by slug.
    pub async fn get(&self, slug: &str) -> Result<Response<Organization>> {
        let path = format!("0/organizations/{slug}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Creates an organization.
    pub async fn create(&self, params: &CreateOrganizationParams) -> Result<Response<Organization>> {
        let request = self
            .client
            .new_request_with_body(Method::POST, "0/organizations/", params)?;
        self.client.fetch(request).await
    }

    /// Updates an organization.
    pub async fn update(
        &self,
        slug: &str,
        params: &UpdateOrganizationParams,
    ) -> Result<Response<Organization>> {
        let path = format!("0/organizations/{slug}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, params)?;
        self.client.fetch(request).await
    }

    /// Schedules an organization for deletion.
    pub async fn delete(&self, slug: &str) -> Result<Response<()>> {
        let path = format!("0/organizations/{slug}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}
