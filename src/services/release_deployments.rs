use crate::{Client, ListCursorParams, Response, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

/// A deploy of a release to an environment.
///
/// Also used as the body of [`ReleaseDeployments::create`]; unset fields are
/// left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaseDeployment {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_started: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_finished: Option<DateTime<Utc>>,
}

/// Release deploy endpoints.
pub struct ReleaseDeployments<'a> {
    pub(crate) client: &'a Client,
}

impl ReleaseDeployments<'_> {
    /// Finds a deploy of a release by id.
    ///
    /// The API has no single-deploy endpoint, so this walks the deploy
    /// listing page by page and stops at the first match. The returned
    /// envelope is the one of the last page read; its data is `None` when no
    /// page contains the deploy.
    pub async fn get(
        &self,
        organization_slug: &str,
        version: &str,
        deploy_id: &str,
    ) -> Result<Response<Option<ReleaseDeployment>>> {
        let path = format!("0/organizations/{organization_slug}/releases/{version}/deploys/");
        let mut page = ListCursorParams::default();

        loop {
            let request = page.apply(self.client.new_request(Method::GET, &path)?);
            let response = self.client.fetch::<Vec<ReleaseDeployment>>(request).await?;

            if response.iter().any(|deploy| deploy.id == deploy_id) {
                return Ok(response.map(|deploys| {
                    deploys.into_iter().find(|deploy| deploy.id == deploy_id)
                }));
            }
            if !response.has_next_page() {
                tracing::debug!(deploy_id, version, "Deploy not found in any page");
                return Ok(response.map(|_| None));
            }
            page.cursor = Some(response.cursor.clone());
        }
    }

    /// Records a new deploy of a release.
    pub async fn create(
        &self,
        organization_slug: &str,
        version: &str,
        params: &ReleaseDeployment,
    ) -> Result<Response<ReleaseDeployment>> {
        let path = format!("0/organizations/{organization_slug}/releases/{version}/deploys/");
        let request = self.client.new_request_with_body(Method::POST, &path, params)?;
        self.client.fetch(request).await
    }
}
