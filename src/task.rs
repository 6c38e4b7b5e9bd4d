//! Resolution of deferred mutations.
//!
//! Creating or updating an alert rule may answer `202 Accepted` with a task
//! handle (`{"uuid": "..."}`) instead of the rule itself. The task status
//! endpoint is then polled until it reports `success` with the resource,
//! reports `failed`, answers 404, or the [`PollPolicy`](crate::PollPolicy)
//! budget runs out.

use crate::client::require_data;
use crate::{Client, Error, Response, Result, TaskError};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const STATUS_SUCCESS: &str = "success";
const STATUS_FAILED: &str = "failed";

/// One task status report: `{status, <resource field>, error}`.
#[derive(Debug, Default)]
struct TaskStatus {
    status: Option<String>,
    resource: Option<Value>,
    error: Option<String>,
}

impl TaskStatus {
    fn from_body(body: Option<Map<String, Value>>, resource_field: &str) -> Self {
        let Some(mut body) = body else {
            return Self::default();
        };
        let text = |value: Option<Value>| match value {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        Self {
            status: text(body.remove("status")),
            resource: body.remove(resource_field).filter(|v| !v.is_null()),
            error: text(body.remove("error")),
        }
    }
}

impl Client {
    /// Polls a task status endpoint until the deferred mutation settles.
    ///
    /// Before each check the client waits as the configured poll policy
    /// says; the wait ends early with [`Error::Cancelled`] if the client's
    /// cancellation token fires.
    ///
    /// # Arguments
    ///
    /// * `path` - The task detail path, relative to the base URL
    /// * `uuid` - The task handle, used in error messages
    /// * `resource_field` - The body field holding the finished resource
    ///
    /// # Errors
    ///
    /// - [`TaskError::NotFound`] as soon as the status endpoint answers 404
    /// - [`TaskError::Failed`] when the task reports `failed`
    /// - [`TaskError::TimedOut`] when the poll budget is exhausted
    pub async fn poll_task<T>(
        &self,
        path: &str,
        uuid: &str,
        resource_field: &str,
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.new_request(Method::GET, path)?;
        let policy = self.poll_policy();
        let mut attempt = 0;

        while let Some(delay) = policy.delay_for_attempt(attempt + 1) {
            attempt += 1;

            tokio::select! {
                biased;
                _ = self.cancellation().cancelled() => return Err(Error::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }

            let mut response = match self.execute::<Map<String, Value>>(request.clone()).await {
                Ok(response) => response,
                Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                    tracing::warn!(uuid = %uuid, "Task not found");
                    return Err(TaskError::NotFound {
                        uuid: uuid.to_string(),
                    }
                    .into());
                }
                Err(e) => return Err(e),
            };

            let task = TaskStatus::from_body(response.data.take(), resource_field);

            tracing::info!(
                uuid = %uuid,
                attempt = attempt,
                status = task.status.as_deref().unwrap_or("unknown"),
                "Checked task status"
            );

            match (task.status.as_deref(), task.resource) {
                (Some(STATUS_SUCCESS), Some(resource)) => {
                    let data = serde_json::from_value::<T>(resource).map_err(|e| {
                        Error::DeserializationFailed {
                            raw_response: response.text(),
                            serde_error: e.to_string(),
                            status: response.status,
                        }
                    })?;
                    return Ok(response.map(|_| data));
                }
                (Some(STATUS_FAILED), _) => {
                    let message = task
                        .error
                        .filter(|message| !message.is_empty())
                        .unwrap_or_else(|| "error while running the task".to_string());
                    tracing::warn!(uuid = %uuid, error = %message, "Task failed");
                    return Err(TaskError::Failed { message }.into());
                }
                _ => {}
            }
        }

        tracing::warn!(uuid = %uuid, attempts = attempt, "Task did not complete in time");
        Err(TaskError::TimedOut {
            uuid: uuid.to_string(),
            attempts: attempt,
        }
        .into())
    }

    /// Completes a mutation that may have been deferred.
    ///
    /// A 202 response is resolved through [`poll_task`](Self::poll_task)
    /// using the handle returned by `handle`; any other response must carry
    /// the resource itself.
    ///
    /// # Errors
    ///
    /// - [`TaskError::MissingHandle`] for a 202 without a task handle
    /// - [`Error::EmptyBody`] for any other status without a body
    pub(crate) async fn resolve_deferred<T, H, P>(
        &self,
        response: Response<Option<T>>,
        handle: H,
        task_path: P,
        resource_field: &str,
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
        H: FnOnce(&T) -> Option<String>,
        P: FnOnce(&str) -> String,
    {
        if response.status != StatusCode::ACCEPTED {
            return require_data(response);
        }

        let uuid = response
            .data
            .as_ref()
            .and_then(handle)
            .ok_or(TaskError::MissingHandle)?;
        tracing::info!(uuid = %uuid, "Mutation deferred to a background task");
        self.poll_task(&task_path(&uuid), &uuid, resource_field).await
    }
}
