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

//! Publishes JSON-encoded objects on a single sink topic.

use crate::coder;
use crate::error::TopicClientError;
use crate::observability::{events, fields};
use crate::topic::{TopicEndpoint, TopicSink};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "sink_client";

/// Sends arbitrary serializable messages on one sink topic.
///
/// [`send`](Self::send) never fails: encode and transport problems are
/// logged and reported as `false`.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use topic_client::topic::endpoint_manager::TopicEndpointManager;
/// use topic_client::TopicSinkClient;
///
/// #[derive(Serialize)]
/// struct Heartbeat {
///     id: u32,
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let manager = TopicEndpointManager::new();
/// manager.add_noop_topic_sink("heartbeats");
///
/// let client = TopicSinkClient::new(&manager, "heartbeats").unwrap();
/// assert!(client.send(&Heartbeat { id: 7 }).await);
/// assert_eq!(client.topic(), "heartbeats");
/// # });
/// ```
pub struct TopicSinkClient {
    topic: String,
    sink: Arc<dyn TopicSink>,
}

impl TopicSinkClient {
    /// Binds to the first sink registered for `topic`.
    pub fn new(endpoint: &dyn TopicEndpoint, topic: &str) -> Result<Self, TopicClientError> {
        let sink = endpoint
            .get_topic_sinks(topic)
            .into_iter()
            .next()
            .ok_or_else(|| {
                warn!(
                    event = events::CLIENT_CREATE_FAILED,
                    component = COMPONENT,
                    topic,
                    reason = fields::REASON_NO_SINKS,
                    "unable to resolve sink topic"
                );
                TopicClientError::NoSinks(topic.to_string())
            })?;

        debug!(
            event = events::CLIENT_CREATE_OK,
            component = COMPONENT,
            topic,
            comm_infra = %sink.comm_infrastructure(),
            "sink client created"
        );

        Ok(Self {
            topic: topic.to_string(),
            sink,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn sink(&self) -> &Arc<dyn TopicSink> {
        &self.sink
    }

    /// Encodes `message` as JSON and publishes it.
    ///
    /// Returns `false` when encoding fails, when the transport errors or when
    /// it declines the message.
    pub async fn send<T: Serialize + ?Sized>(&self, message: &T) -> bool {
        let text = match coder::encode(message) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    event = events::SINK_CLIENT_ENCODE_FAILED,
                    component = COMPONENT,
                    topic = self.topic.as_str(),
                    err = %err,
                    "unable to encode message"
                );
                return false;
            }
        };

        match self.sink.send(&text).await {
            Ok(true) => true,
            Ok(false) => {
                warn!(
                    event = events::SINK_CLIENT_SEND_REJECTED,
                    component = COMPONENT,
                    topic = self.topic.as_str(),
                    payload = %fields::abbreviate_event(&text),
                    "sink declined message"
                );
                false
            }
            Err(err) => {
                warn!(
                    event = events::SINK_CLIENT_SEND_FAILED,
                    component = COMPONENT,
                    topic = self.topic.as_str(),
                    payload = %fields::abbreviate_event(&text),
                    err = %err,
                    "unable to publish message"
                );
                false
            }
        }
    }
}
