//! Core HTTP client for the GitHub users API

use chrono::{DateTime, Local, Utc};
use compact_str::{CompactString, format_compact};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
    resource::Resource,
};
use crate::{
    domain::{EventDto, ProfileDto, RepositoryDto},
    id::Handle,
};

/// Pure HTTP client for the profile endpoints
///
/// Every call issues exactly one GET; nothing is cached or retried.
#[derive(Debug)]
pub struct ProfileApi {
    client: Client,
    config: ClientConfig,
}

/// GitHub API error response format
#[derive(Debug, Deserialize)]
struct GithubApiError {
    message: CompactString,
}

impl ProfileApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request.timeout)
            .user_agent(config.request.user_agent.as_str())
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, config })
    }

    /// Get the account profile; any non-success status means the handle is unknown
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_profile(&self, handle: &Handle) -> Result<ProfileDto> {
        let profile: ProfileDto = self.get_json(Resource::Profile, handle).await?;
        debug!(login = %profile.login, "Fetched profile");
        Ok(profile)
    }

    /// Get the public repositories of an account, in service order
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_repositories(&self, handle: &Handle) -> Result<Vec<RepositoryDto>> {
        let repos: Vec<RepositoryDto> = self.get_json(Resource::Repositories, handle).await?;
        debug!(repo_count = repos.len(), "Fetched repositories");
        Ok(repos)
    }

    /// Number of elements in the starred list
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_starred_count(&self, handle: &Handle) -> Result<usize> {
        self.count(Resource::Starred, handle).await
    }

    /// Number of elements in the organization list
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_orgs_count(&self, handle: &Handle) -> Result<usize> {
        self.count(Resource::Organizations, handle).await
    }

    /// Creation time of the first public event, `None` when there are no events
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_latest_event_timestamp(
        &self,
        handle: &Handle,
    ) -> Result<Option<DateTime<Utc>>> {
        let events: Vec<EventDto> = self.get_json(Resource::Events, handle).await?;
        let latest = events.first().and_then(|e| e.created_at);
        debug!(event_count = events.len(), latest = ?latest, "Fetched public events");
        Ok(latest)
    }

    async fn count(&self, resource: Resource, handle: &Handle) -> Result<usize> {
        let items: Vec<serde_json::Value> = self.get_json(resource, handle).await?;
        debug!(resource = %resource, count = items.len(), "Fetched list");
        Ok(items.len())
    }

    /// Perform GET request and deserialize JSON response
    async fn get_json<T>(&self, resource: Resource, handle: &Handle) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = self.url(resource, handle);
        let response = self
            .request(&url)
            .send()
            .await
            .map_err(Self::transport_error)?;
        self.handle_response(resource, handle, response).await
    }

    fn url(&self, resource: Resource, handle: &Handle) -> CompactString {
        format_compact!("{}{}", self.config.api_root(), resource.path(handle))
    }

    fn request(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
    }

    /// Handle HTTP response and deserialize JSON
    async fn handle_response<T>(
        &self,
        resource: Resource,
        handle: &Handle,
        response: Response,
    ) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url_path = response.url().path().to_string();
        let status = response.status();
        let body = response.text().await.map_err(Self::transport_error)?;

        if self.config.debug.log_responses {
            self.log_response_to_file(&url_path, &body);
        }

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                warn!(endpoint = %url_path, error = %e, "Failed to parse response body");
                ClientError::json_parse(url_path, "Failed to parse response", e)
            })
        } else {
            Err(self.error_response(resource, handle, status.as_u16(), &body))
        }
    }

    /// Map a non-success status to the error kind of the resource
    fn error_response(
        &self,
        resource: Resource,
        handle: &Handle,
        status: u16,
        body: &str,
    ) -> ClientError {
        debug!(resource = %resource, status, "Non-success response");

        if resource.is_fatal() {
            return ClientError::not_found(handle.as_str());
        }

        let message = serde_json::from_str::<GithubApiError>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| body.into());
        ClientError::fetch_failed(resource, status, message)
    }

    fn transport_error(e: reqwest::Error) -> ClientError {
        if e.is_timeout() { ClientError::Timeout } else { ClientError::Http(e) }
    }

    /// Log HTTP response to file for debugging
    fn log_response_to_file(&self, path: &str, body: &str) {
        if let Some(log_dir) = &self.config.debug.log_directory {
            if !log_dir.exists()
                && let Err(e) = std::fs::create_dir_all(log_dir)
            {
                warn!("Failed to create response log directory: {}", e);
                return;
            }

            let filename = format!(
                "{}_{}.json",
                Local::now().format("%Y-%m-%d_%H-%M-%S%.3f"),
                path.replace('/', "_")
            );

            let log_path = log_dir.join(filename);

            if let Err(e) = std::fs::write(&log_path, body) {
                warn!("Failed to write response log to {:?}: {}", log_path, e);
            } else {
                debug!("Response logged to {:?}", log_path);
            }
        }
    }
}
