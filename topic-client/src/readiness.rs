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

//! Building blocks of the readiness probe.
//!
//! [`ReadinessCell`] holds the single decision of a client. It starts unset
//! and accepts exactly one value; every later write is ignored. Readers may
//! peek at it at any time or wait, with a timeout, for the decision.
//!
//! [`ReadinessListener`] turns matching inbound traffic into a `true`
//! decision and [`ProbeRound`] keeps the listener registered for exactly as
//! long as a probing round is running.

use crate::coder::{self, CoderError};
use crate::observability::{events, fields};
use crate::topic::{CommInfrastructure, TopicListener, TopicSource};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

const COMPONENT: &str = "readiness";

/// Callback invoked with the raw event and the error whenever inbound probe
/// traffic cannot be decoded.
pub type DecodeFailedHook = Arc<dyn Fn(&str, &CoderError) + Send + Sync>;

/// Write-once cell holding the readiness decision.
pub(crate) struct ReadinessCell {
    state: watch::Sender<Option<bool>>,
}

impl ReadinessCell {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    /// Current decision, without waiting.
    pub(crate) fn get(&self) -> Option<bool> {
        *self.state.borrow()
    }

    /// Stores `ready` unless a decision already exists.
    ///
    /// Returns `true` when this call made the decision.
    pub(crate) fn offer(&self, ready: bool) -> bool {
        self.state.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(ready);
            true
        })
    }

    /// Waits up to `wait` for a decision. `None` means the wait timed out.
    pub(crate) async fn wait(&self, wait: Duration) -> Option<bool> {
        let mut receiver = self.state.subscribe();
        let decided = async move {
            receiver
                .wait_for(Option::is_some)
                .await
                .ok()
                .and_then(|decision| *decision)
        };
        tokio::time::timeout(wait, decided).await.ok().flatten()
    }
}

/// Listener comparing inbound events against the probe of one round.
pub(crate) struct ReadinessListener<T> {
    round_id: String,
    expected: T,
    readiness: Arc<ReadinessCell>,
    decode_failed: Option<DecodeFailedHook>,
}

impl<T> ReadinessListener<T> {
    pub(crate) fn new(
        round_id: &str,
        expected: T,
        readiness: Arc<ReadinessCell>,
        decode_failed: Option<DecodeFailedHook>,
    ) -> Self {
        Self {
            round_id: round_id.to_string(),
            expected,
            readiness,
            decode_failed,
        }
    }
}

#[async_trait]
impl<T> TopicListener for ReadinessListener<T>
where
    T: DeserializeOwned + PartialEq + Send + Sync + 'static,
{
    async fn on_topic_event(&self, infra: CommInfrastructure, topic: &str, event: &str) {
        match coder::decode::<T>(event) {
            Ok(decoded) if decoded == self.expected => {
                if self.readiness.offer(true) {
                    info!(
                        event = events::READY_PROBE_MATCHED,
                        component = COMPONENT,
                        round_id = self.round_id.as_str(),
                        topic,
                        comm_infra = %infra,
                        "probe observed on source topic"
                    );
                }
            }
            Ok(_) => {
                debug!(
                    event = events::READY_PROBE_MISMATCH,
                    component = COMPONENT,
                    round_id = self.round_id.as_str(),
                    topic,
                    payload = %fields::abbreviate_event(event),
                    "ignoring unrelated message"
                );
            }
            Err(err) => {
                warn!(
                    event = events::READY_PROBE_DECODE_FAILED,
                    component = COMPONENT,
                    round_id = self.round_id.as_str(),
                    topic,
                    payload = %fields::abbreviate_event(event),
                    err = %err,
                    "unable to decode inbound message"
                );
                if let Some(hook) = &self.decode_failed {
                    hook(event, &err);
                }
            }
        }
    }
}

/// Registration of a readiness listener for the duration of one round.
///
/// Dropping the round unregisters the listener. A round dropped before any
/// decision was made, because its future was cancelled, decides `false`.
pub(crate) struct ProbeRound {
    round_id: String,
    source: Arc<dyn TopicSource>,
    listener: Arc<dyn TopicListener>,
    readiness: Arc<ReadinessCell>,
}

impl ProbeRound {
    pub(crate) fn begin(
        round_id: &str,
        source: Arc<dyn TopicSource>,
        listener: Arc<dyn TopicListener>,
        readiness: Arc<ReadinessCell>,
    ) -> Self {
        source.register(listener.clone());
        Self {
            round_id: round_id.to_string(),
            source,
            listener,
            readiness,
        }
    }
}

impl Drop for ProbeRound {
    fn drop(&mut self) {
        if self.readiness.offer(false) {
            warn!(
                event = events::READY_PROBE_ABANDONED,
                component = COMPONENT,
                round_id = self.round_id.as_str(),
                reason = fields::REASON_CANCELLED,
                "probe round cancelled before a decision"
            );
        }
        self.source.unregister(&self.listener);
    }
}
