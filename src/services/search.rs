// src/services/search.rs

//! Debounce-guarded search against the Algolia proxy route.
//!
//! The debounce alone does not prevent an out-of-order response from a
//! slow earlier request overwriting fresher results, so every request is
//! tagged with a monotonically increasing sequence number and a response
//! is applied only while its sequence is still the newest issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::utils::http::send_json;
use crate::utils::join_endpoint;

/// Monotonic request-sequence guard.
#[derive(Debug, Default)]
pub struct SearchSequence {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl SearchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next sequence number for an outgoing request.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Whether no newer request has been issued since `seq`.
    pub fn is_current(&self, seq: u64) -> bool {
        self.issued.load(Ordering::Acquire) == seq
    }

    /// Attempt to apply the response for `seq`.
    ///
    /// Succeeds only while `seq` is the newest issued request and newer
    /// than anything already applied; otherwise the response is stale and
    /// must be dropped.
    pub fn try_apply(&self, seq: u64) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        let mut last = self.applied.load(Ordering::Acquire);
        loop {
            if seq <= last {
                return false;
            }
            match self.applied.compare_exchange_weak(
                last,
                seq,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => last = observed,
            }
        }
    }
}

/// The wire call behind the search client.
///
/// Production posts to the proxy route; tests inject fakes to script
/// response timing.
#[async_trait]
pub trait SearchDispatch: Send + Sync {
    async fn query(&self, payload: &serde_json::Value) -> Result<serde_json::Value>;
}

/// Dispatch posting to the credential-hiding proxy route.
struct ProxyDispatch {
    client: Client,
    proxy_base: String,
}

#[async_trait]
impl SearchDispatch for ProxyDispatch {
    async fn query(&self, payload: &serde_json::Value) -> Result<serde_json::Value> {
        let url = join_endpoint(&self.proxy_base, "/api/algolia");
        send_json(self.client.post(url).json(payload)).await
    }
}

/// Search client calling the credential-hiding proxy route.
pub struct AlgoliaSearchClient {
    dispatch: Arc<dyn SearchDispatch>,
    debounce: Duration,
    sequence: SearchSequence,
}

impl AlgoliaSearchClient {
    pub fn new(client: Client, proxy_base: impl Into<String>, debounce_ms: u64) -> Self {
        Self::with_dispatch(
            Arc::new(ProxyDispatch {
                client,
                proxy_base: proxy_base.into(),
            }),
            debounce_ms,
        )
    }

    /// Build a client over a custom dispatch.
    pub fn with_dispatch(dispatch: Arc<dyn SearchDispatch>, debounce_ms: u64) -> Self {
        Self {
            dispatch,
            debounce: Duration::from_millis(debounce_ms),
            sequence: SearchSequence::new(),
        }
    }

    pub fn sequence(&self) -> &SearchSequence {
        &self.sequence
    }

    /// Send one search request immediately.
    ///
    /// Returns `Ok(None)` when the response arrived stale and was
    /// dropped.
    pub async fn search(&self, payload: &serde_json::Value) -> Result<Option<serde_json::Value>> {
        let seq = self.sequence.begin();
        self.dispatch(seq, payload).await
    }

    /// Debounced variant for keystroke-driven search.
    ///
    /// Waits out the debounce interval first; if another search started
    /// in the meantime, the request is abandoned before it is ever sent.
    pub async fn search_debounced(
        &self,
        payload: &serde_json::Value,
    ) -> Result<Option<serde_json::Value>> {
        let seq = self.sequence.begin();
        tokio::time::sleep(self.debounce).await;
        if !self.sequence.is_current(seq) {
            return Ok(None);
        }
        self.dispatch(seq, payload).await
    }

    async fn dispatch(
        &self,
        seq: u64,
        payload: &serde_json::Value,
    ) -> Result<Option<serde_json::Value>> {
        let body = self.dispatch.query(payload).await?;
        if self.sequence.try_apply(seq) {
            Ok(Some(body))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    use futures::channel::oneshot;

    use super::*;

    /// Counts calls; the first one optionally blocks on a gate.
    #[derive(Default)]
    struct GatedDispatch {
        calls: AtomicUsize,
        first_gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    impl GatedDispatch {
        fn gated() -> (Arc<Self>, oneshot::Sender<()>) {
            let (release, gate) = oneshot::channel();
            let dispatch = Arc::new(Self {
                calls: AtomicUsize::new(0),
                first_gate: Mutex::new(Some(gate)),
            });
            (dispatch, release)
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SearchDispatch for GatedDispatch {
        async fn query(&self, payload: &serde_json::Value) -> Result<serde_json::Value> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                let gate = self.first_gate.lock().unwrap().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
            }
            Ok(serde_json::json!({"echo": payload, "call": call}))
        }
    }

    #[tokio::test]
    async fn superseded_debounce_abandons_without_sending() {
        let dispatch = Arc::new(GatedDispatch::default());
        let client = Arc::new(AlgoliaSearchClient::with_dispatch(
            Arc::clone(&dispatch) as Arc<dyn SearchDispatch>,
            50,
        ));

        let pending = {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .search_debounced(&serde_json::json!({"query": "mon"}))
                    .await
            })
        };

        // A newer keystroke arrives while the first is still debouncing.
        tokio::time::sleep(Duration::from_millis(5)).await;
        client.sequence().begin();

        let outcome = pending.await.unwrap().unwrap();
        assert_eq!(outcome, None, "superseded search must be abandoned");
        assert_eq!(dispatch.calls(), 0, "nothing may go over the wire");
    }

    #[tokio::test]
    async fn debounced_search_sends_once_settled() {
        let dispatch = Arc::new(GatedDispatch::default());
        let client = AlgoliaSearchClient::with_dispatch(
            Arc::clone(&dispatch) as Arc<dyn SearchDispatch>,
            1,
        );

        let outcome = client
            .search_debounced(&serde_json::json!({"query": "monet"}))
            .await
            .unwrap();
        assert!(outcome.is_some());
        assert_eq!(dispatch.calls(), 1);
    }

    #[tokio::test]
    async fn slow_response_overtaken_by_newer_search_is_dropped() {
        let (dispatch, release) = GatedDispatch::gated();
        let client = Arc::new(AlgoliaSearchClient::with_dispatch(
            Arc::clone(&dispatch) as Arc<dyn SearchDispatch>,
            0,
        ));

        // First search goes out and stalls on the wire.
        let slow = {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.search(&serde_json::json!({"query": "mo"})).await })
        };
        while dispatch.calls() == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        // Second search completes while the first is still in flight.
        let fresh = client
            .search(&serde_json::json!({"query": "monet"}))
            .await
            .unwrap();
        assert!(fresh.is_some(), "newest response is applied");

        release.send(()).unwrap();
        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale, None, "overtaken response must be dropped");
        assert_eq!(dispatch.calls(), 2);
    }

    #[test]
    fn stale_response_is_dropped() {
        let sequence = SearchSequence::new();
        let first = sequence.begin();
        let second = sequence.begin();

        // The slow first response arrives after the second was issued.
        assert!(!sequence.try_apply(first));
        assert!(sequence.try_apply(second));
    }

    #[test]
    fn response_applies_once() {
        let sequence = SearchSequence::new();
        let seq = sequence.begin();
        assert!(sequence.try_apply(seq));
        assert!(!sequence.try_apply(seq));
    }

    #[test]
    fn sequence_numbers_are_monotonic() {
        let sequence = SearchSequence::new();
        let a = sequence.begin();
        let b = sequence.begin();
        let c = sequence.begin();
        assert!(a < b && b < c);
    }

    #[test]
    fn newer_keystroke_invalidates_current() {
        let sequence = SearchSequence::new();
        let first = sequence.begin();
        assert!(sequence.is_current(first));
        let _second = sequence.begin();
        assert!(!sequence.is_current(first));
    }
}
