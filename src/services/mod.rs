//! Typed resource services.
//!
//! Each service is a lightweight namespace borrowed from a [`Client`]; it
//! only supplies path templates and request/response shapes, and every call
//! goes through the client's shared request construction and dispatch.

mod dashboards;
mod issue_alerts;
mod metric_alerts;
mod organization_code_mappings;
mod organization_integrations;
mod organization_members;
mod organization_repositories;
mod organizations;
mod pagerduty;
mod project_filters;
mod project_keys;
mod project_ownerships;
mod project_plugins;
mod projects;
mod release_deployments;
mod teams;

pub use dashboards::*;
pub use issue_alerts::*;
pub use metric_alerts::*;
pub use organization_code_mappings::*;
pub use organization_integrations::*;
pub use organization_members::*;
pub use organization_repositories::*;
pub use organizations::*;
pub use pagerduty::*;
pub use project_filters::*;
pub use project_keys::*;
pub use project_ownerships::*;
pub use project_plugins::*;
pub use projects::*;
pub use release_deployments::*;
pub use teams::*;

use crate::Client;
use serde::{Deserialize, Serialize};

/// An avatar attached to organizations, teams and projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Avatar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_type: Option<String>,
    #[serde(rename = "avatarUuid", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

macro_rules! service_accessors {
    ($($(#[$doc:meta])* $method:ident => $service:ident;)*) => {
        impl Client {
            $(
                $(#[$doc])*
                pub fn $method(&self) -> $service<'_> {
                    $service { client: self }
                }
            )*
        }
    };
}

service_accessors! {
    /// Organizations the caller belongs to.
    organizations => Organizations;
    /// Organization members and invitations.
    organization_members => OrganizationMembers;
    /// Installed third-party integrations.
    organization_integrations => OrganizationIntegrations;
    /// Linked source code repositories.
    organization_repositories => OrganizationRepositories;
    /// Stack trace to source path mappings.
    organization_code_mappings => OrganizationCodeMappings;
    /// PagerDuty integrations with their service tables.
    pagerduty => Pagerduty;
    /// Teams within an organization.
    teams => Teams;
    /// Projects.
    projects => Projects;
    /// Client keys (DSNs) of a project.
    project_keys => ProjectKeys;
    /// Legacy project plugins.
    project_plugins => ProjectPlugins;
    /// Inbound data filters of a project.
    project_filters => ProjectFilters;
    /// Ownership rules of a project.
    project_ownerships => ProjectOwnerships;
    /// Deploys of a release.
    release_deployments => ReleaseDeployments;
    /// Custom dashboards.
    dashboards => Dashboards;
    /// Dashboard widget validation.
    dashboard_widgets => DashboardWidgets;
    /// Issue alert rules.
    issue_alerts => IssueAlerts;
    /// Metric alert rules.
    metric_alerts => MetricAlerts;
}
