use crate::{Client, Error, Response, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const BROWSER_EXTENSIONS: &str = "browser-extensions";
const LEGACY_BROWSERS: &str = "legacy-browsers";

/// An inbound data filter.
///
/// `active` is `true`/`false` for plain filters and a list of browser
/// identifiers for the legacy browsers filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFilter {
    pub id: String,
    pub active: Value,
}

/// The filter settings this client manages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub browser_extension: bool,
    pub legacy_browsers: Vec<String>,
}

impl FilterConfig {
    fn from_filters(filters: &[ProjectFilter]) -> std::result::Result<Self, serde_json::Error> {
        let mut config = FilterConfig::default();
        for filter in filters {
            match filter.id.as_str() {
                BROWSER_EXTENSIONS => config.browser_extension = filter.active == Value::Bool(true),
                LEGACY_BROWSERS if filter.active != Value::Bool(false) => {
                    config.legacy_browsers = serde_json::from_value(filter.active.clone())?;
                }
                _ => {}
            }
        }
        Ok(config)
    }
}

/// Project inbound filter endpoints.
pub struct ProjectFilters<'a> {
    pub(crate) client: &'a Client,
}

impl ProjectFilters<'_> {
    /// Lists every filter of a project.
    pub async fn get(
        &self,
        organization_slug: &str,
        project_slug: &str,
    ) -> Result<Response<Vec<ProjectFilter>>> {
        let path = format!("0/projects/{organization_slug}/{project_slug}/filters/");
        let request = self.client.new_request(Method::GET, &path)?;
        self.client.fetch(request).await
    }

    /// Reads the browser extension and legacy browser filter settings.
    pub async fn get_filter_config(
        &self,
        organization_slug: &str,
        project_slug: &str,
    ) -> Result<Response<FilterConfig>> {
        let response = self.get(organization_slug, project_slug).await?;
        let config = FilterConfig::from_filters(&response.data).map_err(|e| {
            Error::DeserializationFailed {
                raw_response: response.text(),
                serde_error: e.to_string(),
                status: response.status,
            }
        })?;
        Ok(response.map(|_| config))
    }

    /// Toggles the browser extensions filter.
    pub async fn update_browser_extensions(
        &self,
        organization_slug: &str,
        project_slug: &str,
        active: bool,
    ) -> Result<Response<()>> {
        let path =
            format!("0/projects/{organization_slug}/{project_slug}/filters/{BROWSER_EXTENSIONS}/");
        let body = json!({ "active": active });
        let request = self.client.new_request_with_body(Method::PUT, &path, &body)?;
        self.client.execute_empty(request).await
    }

    /// Replaces the set of filtered legacy browsers.
    pub async fn update_legacy_browsers(
        &self,
        organization_slug: &str,
        project_slug: &str,
        browsers: &[String],
    ) -> Result<Response<()>> {
        let path =
            format!("0/projects/{organization_slug}/{project_slug}/filters/{LEGACY_BROWSERS}/");
        let body = json!({ "subfilters": browsers });
        let request = self.client.new_request_with_body(Method::PUT, &path, &body)?;
        self.client.execute_empty(request).await
    }
}
