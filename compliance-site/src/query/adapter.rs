/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Remote query adapter.
//!
//! A [`RemoteQuery`] owns the lifecycle of one read: it issues the request on
//! a tokio task, publishes progress through a `watch` channel, and guarantees
//! that nothing is published once it has been dropped or superseded.
//!
//! Supersession uses a generation counter next to the task handle. Aborting
//! the task stops most stale reads early; the generation check inside the
//! channel's write lock catches the one that already finished its I/O.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use compliance_content_client::ContentStore;
use compliance_content_types::QueryRequest;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::result::QueryResult;

/// Issues [`RemoteQuery`]s against the process-wide store.
///
/// Cloning is cheap; every clone shares the same store.
#[derive(Clone)]
pub struct QueryAdapter {
    store: Arc<dyn ContentStore>,
}

impl QueryAdapter {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Mount a query: starts `Loading` and issues exactly one read.
    ///
    /// **Important:** must be called from within a tokio runtime.
    pub fn watch<T>(&self, request: QueryRequest) -> RemoteQuery<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        RemoteQuery::start(self.store.clone(), request)
    }
}

/// One mounted read. Dropping it is the unmount.
pub struct RemoteQuery<T> {
    store: Arc<dyn ContentStore>,
    request: QueryRequest,
    state: Arc<watch::Sender<QueryResult<T>>>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl<T> RemoteQuery<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn start(store: Arc<dyn ContentStore>, request: QueryRequest) -> Self {
        let (state, _) = watch::channel(QueryResult::Loading);
        let mut query = Self {
            store,
            request,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        };
        query.issue();
        query
    }

    /// Replace the request parameters.
    ///
    /// Identical parameters are a no-op and issue no read, whether the
    /// previous read is still in flight or already settled. Different
    /// parameters abandon the previous read, reset to `Loading` and issue a
    /// new one. Returns whether a new read was issued.
    pub fn set_request(&mut self, request: QueryRequest) -> bool {
        if request == self.request {
            debug!("Request unchanged, keeping current read: {request}");
            return false;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.request = request;
        self.issue();
        true
    }

    pub fn request(&self) -> &QueryRequest {
        &self.request
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<QueryResult<T>> {
        self.state.subscribe()
    }

    /// Run `f` against the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&QueryResult<T>) -> R) -> R {
        f(&self.state.borrow())
    }

    fn issue(&mut self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(QueryResult::Loading);

        let store = self.store.clone();
        let request = self.request.clone();
        let state = self.state.clone();
        let current = self.generation.clone();

        self.task = Some(tokio::spawn(async move {
            let outcome = fetch::<T>(store.as_ref(), &request).await;
            state.send_if_modified(move |slot| {
                if current.load(Ordering::SeqCst) != generation {
                    debug!("Discarding superseded result for {request}");
                    return false;
                }
                *slot = outcome;
                true
            });
        }));
    }
}

impl<T> RemoteQuery<T>
where
    T: Clone + DeserializeOwned + Send + Sync + 'static,
{
    pub fn snapshot(&self) -> QueryResult<T> {
        self.state.borrow().clone()
    }

    /// Wait for the terminal state (`Ready` or `Failed`).
    ///
    /// A read that never resolves keeps this pending; callers that must not
    /// block render from [`snapshot`](Self::snapshot) instead.
    pub async fn settled(&self) -> QueryResult<T> {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(QueryResult::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }
}

impl<T> Drop for RemoteQuery<T> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn fetch<T: DeserializeOwned>(
    store: &dyn ContentStore,
    request: &QueryRequest,
) -> QueryResult<T> {
    match store.query(request).await {
        Ok(rows) => QueryResult::Ready(decode_rows(&request.collection, rows)),
        Err(err) => {
            warn!(
                collection = %request.collection,
                error = %err,
                "Content read failed, static content will be shown"
            );
            QueryResult::Failed(err.into())
        }
    }
}

/// Decode each row on its own; a row that does not fit `T` is skipped.
pub(crate) fn decode_rows<T: DeserializeOwned>(collection: &str, rows: Vec<Value>) -> Vec<T> {
    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(collection, index, error = %err, "Skipping undecodable row");
                None
            }
        })
        .collect();
    debug!(collection, total, kept = decoded.len(), "Decoded rows");
    decoded
}
