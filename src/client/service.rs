//! Profile aggregation pipeline

use std::sync::{Arc, mpsc::Sender};

use tokio::{runtime::Handle as RuntimeHandle, task::JoinHandle};
use tracing::{debug, info, instrument, warn};

use super::{
    api::ProfileApi,
    config::ClientConfig,
    error::{AggregationError, ClientError, Result},
    resource::Resource,
};
use crate::{
    dispatcher::Dispatcher,
    domain::AggregatedView,
    event::VibeEvent,
    id::{Handle, Slot},
};

/// Runs aggregation pipelines against a shared [`ProfileApi`]
///
/// Pipelines hold no shared mutable state, so any number can run at once.
#[derive(Debug, Clone)]
pub struct ProfileService {
    api: Arc<ProfileApi>,
    runtime: RuntimeHandle,
}

impl ProfileService {
    /// Create service from existing API client
    pub fn from_api(api: Arc<ProfileApi>) -> Result<Self> {
        let runtime = RuntimeHandle::try_current().map_err(|_| {
            ClientError::config("ProfileService must be created within a Tokio runtime context")
        })?;
        Ok(Self { api, runtime })
    }

    /// Create service and its API client from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::from_api(Arc::new(ProfileApi::new(config)?))
    }

    /// Fetch and merge everything shown for one handle.
    ///
    /// The profile lookup runs first and is the only fatal fetch: when it
    /// fails no other request is issued. The four secondary fetches then run
    /// concurrently and the first failure among them fails the pipeline.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn aggregate(
        &self,
        handle: &Handle,
    ) -> std::result::Result<AggregatedView, AggregationError> {
        let api = &self.api;

        let profile = api
            .get_profile(handle)
            .await
            .map_err(|e| Self::failed(Resource::Profile, e))?;

        let (repositories, starred_count, orgs_count, latest_event_at) = tokio::try_join!(
            async {
                api.get_repositories(handle)
                    .await
                    .map_err(|e| Self::failed(Resource::Repositories, e))
            },
            async {
                api.get_starred_count(handle)
                    .await
                    .map_err(|e| Self::failed(Resource::Starred, e))
            },
            async {
                api.get_orgs_count(handle)
                    .await
                    .map_err(|e| Self::failed(Resource::Organizations, e))
            },
            async {
                api.get_latest_event_timestamp(handle)
                    .await
                    .map_err(|e| Self::failed(Resource::Events, e))
            },
        )?;

        let view = AggregatedView::new(
            profile,
            &repositories,
            starred_count,
            orgs_count,
            latest_event_at,
        );

        info!(
            login = %view.profile.login,
            language_count = view.languages.len(),
            starred_count = view.starred_count,
            orgs_count = view.orgs_count,
            "Aggregated profile"
        );
        Ok(view)
    }

    /// Run a pipeline in the background and dispatch its outcome for `slot`
    ///
    /// Returns immediately; the caller can keep submitting other handles.
    pub fn spawn_aggregate(
        &self,
        slot: Slot,
        handle: Handle,
        sender: Sender<VibeEvent>,
    ) -> JoinHandle<()> {
        let service = self.clone();
        sender.dispatch(VibeEvent::ProfileRequested(slot, handle.clone()));

        self.runtime.spawn(async move {
            match service.aggregate(&handle).await {
                Ok(view) => {
                    debug!(slot = %slot, handle = %handle, "Dispatching aggregated profile");
                    sender.dispatch((slot, handle, view).into());
                },
                Err(e) => {
                    sender.dispatch(VibeEvent::ProfileFailed(slot, handle, e));
                },
            }
        })
    }

    fn failed(stage: Resource, source: ClientError) -> AggregationError {
        warn!(stage = %stage, error = %source, "Aggregation pipeline failed");
        AggregationError::new(stage, source)
    }
}
