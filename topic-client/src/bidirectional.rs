/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Client pairing a sink topic with a source topic.

use crate::coder::{self, CoderError};
use crate::config::BidirectionalTopicConfig;
use crate::error::TopicClientError;
use crate::observability::{events, fields};
use crate::readiness::{DecodeFailedHook, ProbeRound, ReadinessCell, ReadinessListener};
use crate::topic::{
    CommInfrastructure, TopicEndpoint, TopicError, TopicListener, TopicSink, TopicSource,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

const COMPONENT: &str = "bidirectional_client";

/// Per-attempt wait used by [`BidirectionalTopicClient::await_ready_configured`]
/// unless overridden.
pub const DEFAULT_READY_WAIT: Duration = Duration::from_millis(4000);

/// Publishes on one topic and listens on another.
///
/// Besides plain passthroughs to both topics, the client can prove that the
/// pair is live: [`await_ready`](Self::await_ready) keeps publishing a probe
/// on the sink until the same message shows up on the source. The outcome is
/// decided once per client and shared by every caller.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use std::time::Duration;
/// use topic_client::topic::endpoint_manager::TopicEndpointManager;
/// use topic_client::topic::TopicSource;
/// use topic_client::BidirectionalTopicClient;
///
/// #[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
/// struct Probe {
///     text: String,
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let manager = TopicEndpointManager::new();
/// manager.add_noop_topic_sink("my-sink-topic");
/// let source = manager.add_noop_topic_source("my-source-topic");
///
/// let client =
///     BidirectionalTopicClient::new(&manager, "my-sink-topic", "my-source-topic").unwrap();
/// assert!(!client.is_ready());
///
/// let probe = Probe { text: "my-text".to_string() };
/// let waiting = client.await_ready(&probe, Duration::from_millis(1));
/// let echo = async {
///     tokio::time::sleep(Duration::from_millis(20)).await;
///     source.offer(r#"{"text":"my-text"}"#).await.unwrap();
/// };
/// let (ready, _) = tokio::join!(waiting, echo);
///
/// assert!(ready.unwrap());
/// assert!(client.is_ready());
/// # });
/// ```
pub struct BidirectionalTopicClient {
    sink_topic: String,
    source_topic: String,
    sink: Arc<dyn TopicSink>,
    source: Arc<dyn TopicSource>,
    sink_comm_infrastructure: CommInfrastructure,
    source_comm_infrastructure: CommInfrastructure,
    ready_wait: Duration,
    readiness: Arc<ReadinessCell>,
    round_lock: Mutex<()>,
    decode_failed: Option<DecodeFailedHook>,
}

impl BidirectionalTopicClient {
    /// Resolves exactly one sink for `sink_topic` and one source for
    /// `source_topic`.
    pub fn new(
        endpoint: &dyn TopicEndpoint,
        sink_topic: &str,
        source_topic: &str,
    ) -> Result<Self, TopicClientError> {
        let sink = Self::resolve_sink(endpoint, sink_topic)?;
        let source = Self::resolve_source(endpoint, source_topic)?;

        let sink_comm_infrastructure = sink.comm_infrastructure();
        let source_comm_infrastructure = source.comm_infrastructure();

        debug!(
            event = events::CLIENT_CREATE_OK,
            component = COMPONENT,
            sink_topic,
            source_topic,
            sink_infra = %sink_comm_infrastructure,
            source_infra = %source_comm_infrastructure,
            "bidirectional client created"
        );

        Ok(Self {
            sink_topic: sink_topic.to_string(),
            source_topic: source_topic.to_string(),
            sink,
            source,
            sink_comm_infrastructure,
            source_comm_infrastructure,
            ready_wait: DEFAULT_READY_WAIT,
            readiness: Arc::new(ReadinessCell::new()),
            round_lock: Mutex::new(()),
            decode_failed: None,
        })
    }

    pub fn from_config(
        endpoint: &dyn TopicEndpoint,
        config: &BidirectionalTopicConfig,
    ) -> Result<Self, TopicClientError> {
        Ok(Self::new(endpoint, &config.sink_topic, &config.source_topic)?
            .with_ready_wait(config.ready_wait()))
    }

    /// Overrides the per-attempt wait used by
    /// [`await_ready_configured`](Self::await_ready_configured).
    pub fn with_ready_wait(mut self, ready_wait: Duration) -> Self {
        self.ready_wait = ready_wait;
        self
    }

    /// Installs a callback for inbound probe traffic that fails to decode.
    pub fn with_decode_failed_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &CoderError) + Send + Sync + 'static,
    {
        self.decode_failed = Some(Arc::new(hook));
        self
    }

    fn resolve_sink(
        endpoint: &dyn TopicEndpoint,
        topic: &str,
    ) -> Result<Arc<dyn TopicSink>, TopicClientError> {
        let mut sinks = endpoint.get_topic_sinks(topic);
        match sinks.len() {
            0 => Err(Self::creation_failed(
                TopicClientError::NoSinks(topic.to_string()),
                fields::REASON_NO_SINKS,
            )),
            1 => Ok(sinks.remove(0)),
            _ => Err(Self::creation_failed(
                TopicClientError::TooManySinks(topic.to_string()),
                fields::REASON_TOO_MANY_SINKS,
            )),
        }
    }

    fn resolve_source(
        endpoint: &dyn TopicEndpoint,
        topic: &str,
    ) -> Result<Arc<dyn TopicSource>, TopicClientError> {
        let mut sources = endpoint.get_topic_sources(&[topic.to_string()]);
        match sources.len() {
            0 => Err(Self::creation_failed(
                TopicClientError::NoSources(topic.to_string()),
                fields::REASON_NO_SOURCES,
            )),
            1 => Ok(sources.remove(0)),
            _ => Err(Self::creation_failed(
                TopicClientError::TooManySources(topic.to_string()),
                fields::REASON_TOO_MANY_SOURCES,
            )),
        }
    }

    fn creation_failed(err: TopicClientError, reason: &str) -> TopicClientError {
        warn!(
            event = events::CLIENT_CREATE_FAILED,
            component = COMPONENT,
            reason,
            err = %err,
            "unable to create bidirectional client"
        );
        err
    }

    pub fn sink_topic(&self) -> &str {
        &self.sink_topic
    }

    pub fn source_topic(&self) -> &str {
        &self.source_topic
    }

    pub fn sink(&self) -> &Arc<dyn TopicSink> {
        &self.sink
    }

    pub fn source(&self) -> &Arc<dyn TopicSource> {
        &self.source
    }

    pub fn sink_comm_infrastructure(&self) -> CommInfrastructure {
        self.sink_comm_infrastructure
    }

    pub fn source_comm_infrastructure(&self) -> CommInfrastructure {
        self.source_comm_infrastructure
    }

    pub fn ready_wait(&self) -> Duration {
        self.ready_wait
    }

    pub async fn send(&self, message: &str) -> Result<bool, TopicError> {
        self.sink.send(message).await
    }

    pub async fn offer(&self, event: &str) -> Result<bool, TopicError> {
        self.source.offer(event).await
    }

    pub fn register(&self, listener: Arc<dyn TopicListener>) {
        self.source.register(listener);
    }

    pub fn unregister(&self, listener: &Arc<dyn TopicListener>) {
        self.source.unregister(listener);
    }

    /// `true` once a probe round has succeeded. Never waits.
    pub fn is_ready(&self) -> bool {
        self.readiness.get() == Some(true)
    }

    /// Decides the client as not ready, unblocking a running probe round.
    ///
    /// Has no effect once a decision exists.
    pub fn stop_waiting(&self) {
        if self.readiness.offer(false) {
            info!(
                event = events::READY_PROBE_STOPPED,
                component = COMPONENT,
                sink_topic = self.sink_topic.as_str(),
                source_topic = self.source_topic.as_str(),
                reason = fields::REASON_STOP_WAITING,
                "readiness decided by stop_waiting"
            );
        }
    }

    /// Same as [`await_ready`](Self::await_ready) using [`ready_wait`](Self::ready_wait).
    pub async fn await_ready_configured<T>(&self, message: &T) -> Result<bool, TopicClientError>
    where
        T: Serialize + DeserializeOwned + PartialEq + Clone + Send + Sync + 'static,
    {
        self.await_ready(message, self.ready_wait).await
    }

    /// Publishes `message` on the sink until it is received back on the
    /// source, waiting up to `wait` after each publish before trying again.
    ///
    /// Only the first call probes. Once a decision exists, every call returns
    /// it immediately, whatever the message. Concurrent callers queue behind
    /// the running round and then see its outcome.
    ///
    /// The round ends with `true` when a decoded inbound message equals
    /// `message`, or with `false` after [`stop_waiting`](Self::stop_waiting).
    /// Dropping the returned future mid-round also decides `false`. The
    /// only error is a failure to encode `message`.
    pub async fn await_ready<T>(&self, message: &T, wait: Duration) -> Result<bool, TopicClientError>
    where
        T: Serialize + DeserializeOwned + PartialEq + Clone + Send + Sync + 'static,
    {
        if let Some(ready) = self.readiness.get() {
            debug!(
                event = events::READY_CACHED,
                component = COMPONENT,
                source_topic = self.source_topic.as_str(),
                outcome = fields::format_outcome(Some(ready)),
                "returning decided readiness"
            );
            return Ok(ready);
        }

        let _round_permit = self.round_lock.lock().await;

        // Decided while this caller queued behind another round.
        if let Some(ready) = self.readiness.get() {
            return Ok(ready);
        }

        let probe = coder::encode(message)?;
        let round_id = Uuid::new_v4().to_string();
        let listener: Arc<dyn TopicListener> = Arc::new(ReadinessListener::new(
            &round_id,
            message.clone(),
            self.readiness.clone(),
            self.decode_failed.clone(),
        ));
        let round = ProbeRound::begin(
            &round_id,
            self.source.clone(),
            listener,
            self.readiness.clone(),
        );

        info!(
            event = events::READY_PROBE_START,
            component = COMPONENT,
            round_id = round_id.as_str(),
            sink_topic = self.sink_topic.as_str(),
            source_topic = self.source_topic.as_str(),
            wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
            "probing topic pair"
        );

        let mut attempt: u64 = 0;
        let ready = loop {
            attempt += 1;
            self.publish_probe(&round_id, attempt, &probe).await;

            if let Some(ready) = self.readiness.wait(wait).await {
                break ready;
            }

            debug!(
                event = events::READY_PROBE_RETRY,
                component = COMPONENT,
                round_id = round_id.as_str(),
                attempt,
                "no probe observed yet; publishing again"
            );
        };

        drop(round);

        info!(
            event = events::READY_PROBE_DONE,
            component = COMPONENT,
            round_id = round_id.as_str(),
            attempts = attempt,
            outcome = fields::format_outcome(Some(ready)),
            "probe round finished"
        );
        Ok(ready)
    }

    async fn publish_probe(&self, round_id: &str, attempt: u64, probe: &str) {
        match self.sink.send(probe).await {
            Ok(true) => {
                debug!(
                    event = events::READY_PROBE_PUBLISH,
                    component = COMPONENT,
                    round_id,
                    attempt,
                    sink_topic = self.sink_topic.as_str(),
                    "probe published"
                );
            }
            Ok(false) => {
                warn!(
                    event = events::READY_PROBE_PUBLISH_REJECTED,
                    component = COMPONENT,
                    round_id,
                    attempt,
                    sink_topic = self.sink_topic.as_str(),
                    "sink declined probe"
                );
            }
            Err(err) => {
                warn!(
                    event = events::READY_PROBE_PUBLISH_FAILED,
                    component = COMPONENT,
                    round_id,
                    attempt,
                    sink_topic = self.sink_topic.as_str(),
                    err = %err,
                    "unable to publish probe"
                );
            }
        }
    }
}
