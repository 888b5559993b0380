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

//! Topic abstractions consumed by the clients.
//!
//! A topic is a named, unidirectional channel on a message bus. Sinks publish
//! text onto a topic, sources deliver inbound text to registered listeners.
//! Bus implementations live outside this crate except for the in-memory
//! [`noop`] infrastructure.

pub(crate) mod listener_identity;

pub mod endpoint_manager;
pub mod noop;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Bus implementation backing a topic.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommInfrastructure {
    Ueb,
    Dmaap,
    Kafka,
    Noop,
    Rest,
    Websocket,
}

impl fmt::Display for CommInfrastructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommInfrastructure::Ueb => "UEB",
            CommInfrastructure::Dmaap => "DMAAP",
            CommInfrastructure::Kafka => "KAFKA",
            CommInfrastructure::Noop => "NOOP",
            CommInfrastructure::Rest => "REST",
            CommInfrastructure::Websocket => "WEBSOCKET",
        };
        f.write_str(name)
    }
}

/// Transport-level failures surfaced by sinks and sources.
#[derive(Debug, Error)]
pub enum TopicError {
    #[error("topic {0} is not alive")]
    NotAlive(String),
    #[error("transport failure on topic {topic}: {reason}")]
    Transport { topic: String, reason: String },
}

/// Common view of a resolved topic handle.
pub trait Topic: Send + Sync {
    fn topic(&self) -> &str;

    fn comm_infrastructure(&self) -> CommInfrastructure;

    /// Most recent messages seen by this handle, oldest first.
    fn recent_events(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Outbound side of a topic.
#[async_trait]
pub trait TopicSink: Topic {
    /// Publishes `message`.
    ///
    /// `Ok(false)` means the transport declined the message, `Err` means the
    /// transport failed while trying.
    async fn send(&self, message: &str) -> Result<bool, TopicError>;
}

/// Inbound side of a topic.
#[async_trait]
pub trait TopicSource: Topic {
    /// Injects `event` as if it had arrived from the bus.
    async fn offer(&self, event: &str) -> Result<bool, TopicError>;

    fn register(&self, listener: Arc<dyn TopicListener>);

    fn unregister(&self, listener: &Arc<dyn TopicListener>);
}

/// Receives inbound events from a [`TopicSource`].
#[async_trait]
pub trait TopicListener: Send + Sync {
    async fn on_topic_event(&self, infra: CommInfrastructure, topic: &str, event: &str);
}

/// Resolves topic names to sink and source handles.
pub trait TopicEndpoint: Send + Sync {
    fn get_topic_sinks(&self, topic: &str) -> Vec<Arc<dyn TopicSink>>;

    fn get_topic_sources(&self, topics: &[String]) -> Vec<Arc<dyn TopicSource>>;
}

#[cfg(test)]
mod tests {
    use super::{CommInfrastructure, TopicError};

    #[test]
    fn comm_infrastructure_displays_upper_case_names() {
        assert_eq!(CommInfrastructure::Noop.to_string(), "NOOP");
        assert_eq!(CommInfrastructure::Kafka.to_string(), "KAFKA");
        assert_eq!(CommInfrastructure::Websocket.to_string(), "WEBSOCKET");
    }

    #[test]
    fn topic_error_names_the_topic() {
        let err = TopicError::NotAlive("my-topic".to_string());
        assert_eq!(err.to_string(), "topic my-topic is not alive");

        let err = TopicError::Transport {
            topic: "my-topic".to_string(),
            reason: "connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "transport failure on topic my-topic: connection reset"
        );
    }
}
