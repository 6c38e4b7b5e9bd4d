use super::Avatar;
use crate::{Client, ListCursorParams, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const ROLE_MEMBER: &str = "member";
pub const ROLE_BILLING: &str = "billing";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_OWNER: &str = "owner";
pub const ROLE_MANAGER: &str = "manager";

/// An email address registered to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserEmail {
    pub id: String,
    pub email: String,
    pub is_verified: bool,
}

/// A Sentry user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub avatar_url: String,
    pub is_active: bool,
    pub has_password_auth: bool,
    pub is_managed: bool,
    pub date_joined: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    #[serde(rename = "has2fa")]
    pub has_2fa: bool,
    pub last_active: Option<DateTime<Utc>>,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub avatar: Option<Avatar>,
    pub emails: Vec<UserEmail>,
}

/// A member (or pending invitation) of an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationMember {
    pub id: String,
    pub email: String,
    pub name: String,
    pub user: Option<User>,
    pub role: String,
    pub role_name: String,
    pub pending: bool,
    pub expired: bool,
    pub flags: HashMap<String, bool>,
    pub date_created: Option<DateTime<Utc>>,
    pub invite_status: String,
    pub inviter_name: Option<String>,
    pub teams: Vec<String>,
}

/// Body of [`OrganizationMembers::create`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateOrganizationMemberParams {
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<String>,
}

/// Body of [`OrganizationMembers::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateOrganizationMemberParams {
    pub role: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<String>,
}

/// Organization member endpoints.
pub struct OrganizationMembers<'a> {
    pub(crate) client: &'a Client,
}

impl OrganizationMembers<'_> {
    /// Lists the members of an organization.
    pub async fn list(
        &self,
        organization_slug: &str,
        params: &ListCursorParams,
    ) -> Result<Response<Vec<OrganizationMember>>> {
        let path = format!("0/organizations/{organization_slug}/members/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(params.apply(request)).await
    }

    /// Retrieves a member.
    pub async fn get(
        &self,
        organization_slug: &str,
        member_id: &str,
    ) -> Result<Response<OrganizationMember>> {
        let path = format!("0/organizations/{organization_slug}/members/{member_id}/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Invites a new member.
    pub async fn create(
        &self,
        organization_slug: &str,
        params: &CreateOrganizationMemberParams,
    ) -> Result<Response<OrganizationMember>> {
        let path = format!("0/organizations/{organization_slug}/members/");
        let request = self.client.new_request_with_body(Method::POST, &path, params)?;
        self.client.fetch(request).await
    }

    /// Changes a member's role and team memberships.
    pub async fn update(
        &self,
        organization_slug: &str,
        member_id: &str,
        params: &UpdateOrganizationMemberParams,
    ) -> Result<Response<OrganizationMember>> {
        let path = format!("0/organizations/{organization_slug}/members/{member_id}/");
        let request = self.client.new_request_with_body(Method::PUT, &path, params)?;
        self.client.fetch(request).await
    }

    /// Removes a member from the organization.
    pub async fn delete(&self, organization_slug: &str, member_id: &str) -> Result<Response<()>> {
        let path = format!("0/organizations/{organization_slug}/members/{member_id}/");
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}
