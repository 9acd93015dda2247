use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use report_core::{QueryId, SearchSlot, SearchableEntity, MIN_QUERY_CHARS};
use report_logging::{report_debug, report_trace, report_warn};

use crate::settings::{endpoint, SearchSettings, ServiceSettings};
use crate::{DirectoryError, EngineEvent, EventSink};

#[async_trait::async_trait]
pub trait EntityDirectory: Send + Sync {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchableEntity>, DirectoryError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestEntityDirectory {
    client: reqwest::Client,
    endpoint: url::Url,
    max_bytes: u64,
}

impl ReqwestEntityDirectory {
    pub fn new(service: &ServiceSettings, search: &SearchSettings) -> Result<Self, DirectoryError> {
        let endpoint = endpoint(&service.directory_base_url, "entities/search")
            .map_err(|err| DirectoryError::InvalidUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(service.connect_timeout)
            .timeout(search.request_timeout)
            .build()
            .map_err(|err| DirectoryError::Request(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            max_bytes: service.max_bytes,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DirectoryBody {
    List(Vec<SearchableEntity>),
    Wrapped { entities: Vec<SearchableEntity> },
}

#[async_trait::async_trait]
impl EntityDirectory for ReqwestEntityDirectory {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchableEntity>, DirectoryError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| DirectoryError::Request(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| DirectoryError::Request(err.to_string()))?;
            if bytes.len() as u64 + chunk.len() as u64 > self.max_bytes {
                return Err(DirectoryError::Decode("response too large".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }

        let body: DirectoryBody = serde_json::from_slice(&bytes)
            .map_err(|err| DirectoryError::Decode(err.to_string()))?;
        let mut entities = match body {
            DirectoryBody::List(entities) => entities,
            DirectoryBody::Wrapped { entities } => entities,
        };
        entities.truncate(limit);
        Ok(entities)
    }
}

/// Runs a lookup and swallows failures: search is advisory, so the caller
/// only ever sees "no matches".
pub async fn search_or_empty(
    directory: &dyn EntityDirectory,
    query: &str,
    limit: usize,
) -> Vec<SearchableEntity> {
    match directory.search(query, limit).await {
        Ok(entities) => entities,
        Err(err) => {
            report_warn!("Entity search for '{query}' failed: {err}");
            Vec::new()
        }
    }
}

/// Owns the pending lookup for one search slot and the id of the most
/// recently issued query. Scheduling a new query cancels the previous one.
pub struct SearchDebouncer {
    slot: SearchSlot,
    directory: Arc<dyn EntityDirectory>,
    settings: SearchSettings,
    pending: Option<CancellationToken>,
    latest: Arc<AtomicU64>,
}

impl SearchDebouncer {
    pub fn new(
        slot: SearchSlot,
        directory: Arc<dyn EntityDirectory>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            slot,
            directory,
            settings,
            pending: None,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn latest_query_id(&self) -> QueryId {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn schedule(
        &mut self,
        runtime: &Handle,
        query_id: QueryId,
        query: String,
        sink: Arc<dyn EventSink>,
    ) {
        self.cancel();
        self.latest.store(query_id, Ordering::SeqCst);
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            report_trace!("Search {query_id} on {:?} below minimum length", self.slot);
            return;
        }

        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let slot = self.slot;
        let directory = self.directory.clone();
        let latest = self.latest.clone();
        let quiet_period = self.settings.quiet_period;
        let limit = self.settings.limit;

        runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(quiet_period) => {}
            }
            report_debug!("Searching {slot:?} for '{query}' (query {query_id})");
            let entities = tokio::select! {
                biased;
                _ = token.cancelled() => return,
                entities = search_or_empty(directory.as_ref(), query.trim(), limit) => entities,
            };
            if token.is_cancelled() || latest.load(Ordering::SeqCst) != query_id {
                report_trace!("Dropping superseded search {query_id} on {slot:?}");
                return;
            }
            sink.emit(EngineEvent::SearchCompleted {
                slot,
                query_id,
                entities,
            });
        });
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
