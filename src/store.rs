use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{error, info};

use crate::config::Endpoint;
use crate::error::FetchFailure;
use crate::models::{decode_model_list, ModelId, ModelState, ModelStates};

/// Outcome of the most recent `fetch_data` call to resolve.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    NotStarted,
    Succeeded { at: DateTime<Utc>, count: usize },
    Failed { at: DateTime<Utc>, kind: String, error: String },
}

struct Inner {
    /// `None` until the first successful fetch or `update_single`.
    model_states: Option<ModelStates>,
    last_fetch: FetchStatus,
}

/// Holds the current model states and refreshes them from the backend.
///
/// Clones share state. Overlapping `fetch_data` calls are not sequenced:
/// whichever response resolves last is what the store ends up holding.
#[derive(Clone)]
pub struct ModelListStore {
    client: reqwest::Client,
    endpoint: Endpoint,
    inner: Arc<RwLock<Inner>>,
}

impl ModelListStore {
    pub fn new(client: reqwest::Client, endpoint: Endpoint) -> Self {
        Self {
            client,
            endpoint,
            inner: Arc::new(RwLock::new(Inner {
                model_states: None,
                last_fetch: FetchStatus::NotStarted,
            })),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Replace the whole mapping with the backend's current list.
    ///
    /// On failure the mapping is left as it was, the failure is logged and
    /// recorded in `last_fetch`, and returned to the caller.
    pub async fn fetch_data(&self) -> Result<usize, FetchFailure> {
        let url = self.endpoint.models_list_url();
        info!("[modelstore] Fetching model states from {}", url);

        match self.request_states(&url).await {
            Ok(states) => {
                let count = states.len();
                let mut inner = self.write();
                inner.model_states = Some(states);
                inner.last_fetch = FetchStatus::Succeeded {
                    at: Utc::now(),
                    count,
                };
                info!("[modelstore] Stored {} model states", count);
                Ok(count)
            }
            Err(e) => {
                error!("[modelstore] Error fetching model states: {}", e);
                self.write().last_fetch = FetchStatus::Failed {
                    at: Utc::now(),
                    kind: e.kind().to_string(),
                    error: e.to_string(),
                };
                Err(e)
            }
        }
    }

    async fn request_states(&self, url: &str) -> Result<ModelStates, FetchFailure> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchFailure::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.bytes().await?;
        decode_model_list(&body)
    }

    /// Insert or replace one entry by id. An uninitialized store becomes an
    /// empty mapping first.
    pub fn update_single(&self, model_state: ModelState) {
        let mut inner = self.write();
        inner
            .model_states
            .get_or_insert_with(HashMap::new)
            .insert(model_state.key(), model_state);
    }

    pub fn model_states(&self) -> Option<ModelStates> {
        self.read().model_states.clone()
    }

    pub fn get(&self, id: &ModelId) -> Option<ModelState> {
        self.read()
            .model_states
            .as_ref()
            .and_then(|states| states.get(id).cloned())
    }

    pub fn is_initialized(&self) -> bool {
        self.read().model_states.is_some()
    }

    pub fn len(&self) -> usize {
        self.read().model_states.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_fetch(&self) -> FetchStatus {
        self.read().last_fetch.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
