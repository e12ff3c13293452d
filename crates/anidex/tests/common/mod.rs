//! Shared test transport
//!
//! `ScriptedTransport` replays queued responses per endpoint and records
//! when every call started and how many calls overlapped.

#![allow(dead_code)]

use anidex::fetch_queue::{
    FetchQueueConfig, RateLimitedFetchQueue, Transport, TransportFailure, TransportResponse,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// A scripted outcome for one call
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Respond with a status and raw body
    Respond(u16, String),
    /// Fail at the network level
    Fail(String),
    /// Never answer within any sane timeout
    Hang,
    /// Panic inside the transport, tearing down the drain task
    Panic,
}

impl Scripted {
    pub fn ok(value: Value) -> Self {
        Self::Respond(200, value.to_string())
    }

    pub fn status(status: u16) -> Self {
        Self::Respond(status, json!({ "status": status }).to_string())
    }
}

/// One recorded transport call
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub endpoint: String,
    pub started_at: Instant,
}

#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    latency: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<CallRecord>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue an outcome for the next call to `endpoint`
    pub fn script(&self, endpoint: &str, outcome: Scripted) {
        self.scripts
            .lock()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// Delay every answer for `endpoint`
    pub fn set_latency(&self, endpoint: &str, latency: Duration) {
        self.latency.lock().insert(endpoint.to_string(), latency);
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, endpoint: &str) -> Result<TransportResponse, TransportFailure> {
        self.calls.lock().push(CallRecord {
            endpoint: endpoint.to_string(),
            started_at: Instant::now(),
        });
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        // decremented on drop, so a call abandoned by a timeout still counts down
        let _in_flight = InFlight(&self.in_flight);

        let latency = self.latency.lock().get(endpoint).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let outcome = self
            .scripts
            .lock()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Scripted::ok(json!({ "endpoint": endpoint })));

        match outcome {
            Scripted::Respond(status, body) => Ok(TransportResponse::new(status, body)),
            Scripted::Fail(message) => Err(TransportFailure::new(message)),
            Scripted::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(TransportFailure::new("hung connection finally dropped"))
            }
            Scripted::Panic => panic!("transport blew up on {}", endpoint),
        }
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Default queue: 400ms spacing, 1500ms backoff
pub fn queue_with(transport: &Arc<ScriptedTransport>) -> RateLimitedFetchQueue {
    queue_with_config(transport, FetchQueueConfig::default())
}

pub fn queue_with_config(
    transport: &Arc<ScriptedTransport>,
    config: FetchQueueConfig,
) -> RateLimitedFetchQueue {
    let transport: Arc<dyn Transport> = transport.clone();
    RateLimitedFetchQueue::new(config, transport)
}

/// Gaps between consecutive call starts
pub fn start_gaps(calls: &[CallRecord]) -> Vec<Duration> {
    calls
        .windows(2)
        .map(|pair| pair[1].started_at - pair[0].started_at)
        .collect()
}
