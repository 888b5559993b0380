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

//! In-memory topic registry.

use crate::observability::events;
use crate::topic::noop::{NoopTopicSink, NoopTopicSource};
use crate::topic::{TopicEndpoint, TopicSink, TopicSource};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const COMPONENT: &str = "endpoint_manager";

/// Registry of topic handles keyed by topic name.
///
/// A name may map to several handles, typically one per comm infrastructure.
/// Lookups return handles in registration order and an empty list for unknown
/// names; the clients decide what cardinality they accept.
///
/// # Examples
///
/// ```
/// use topic_client::topic::endpoint_manager::TopicEndpointManager;
/// use topic_client::topic::TopicEndpoint;
///
/// let manager = TopicEndpointManager::new();
/// manager.add_noop_topic_sink("my-sink-topic");
///
/// assert_eq!(manager.get_topic_sinks("my-sink-topic").len(), 1);
/// assert!(manager.get_topic_sinks("unknown").is_empty());
/// ```
#[derive(Default)]
pub struct TopicEndpointManager {
    sinks: RwLock<HashMap<String, Vec<Arc<dyn TopicSink>>>>,
    sources: RwLock<HashMap<String, Vec<Arc<dyn TopicSource>>>>,
}

impl TopicEndpointManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_topic_sink(&self, sink: Arc<dyn TopicSink>) {
        let topic = sink.topic().to_string();
        let infra = sink.comm_infrastructure();
        let mut sinks = self.sinks.write();
        let handles = sinks.entry(topic.clone()).or_default();
        handles.push(sink);
        debug!(
            event = events::ENDPOINT_ADD_SINK,
            component = COMPONENT,
            topic = topic.as_str(),
            comm_infra = %infra,
            handles = handles.len(),
            "topic sink added"
        );
    }

    pub fn add_topic_source(&self, source: Arc<dyn TopicSource>) {
        let topic = source.topic().to_string();
        let infra = source.comm_infrastructure();
        let mut sources = self.sources.write();
        let handles = sources.entry(topic.clone()).or_default();
        handles.push(source);
        debug!(
            event = events::ENDPOINT_ADD_SOURCE,
            component = COMPONENT,
            topic = topic.as_str(),
            comm_infra = %infra,
            handles = handles.len(),
            "topic source added"
        );
    }

    pub fn add_noop_topic_sink(&self, topic: &str) -> Arc<NoopTopicSink> {
        let sink = Arc::new(NoopTopicSink::new(topic));
        self.add_topic_sink(sink.clone());
        sink
    }

    pub fn add_noop_topic_source(&self, topic: &str) -> Arc<NoopTopicSource> {
        let source = Arc::new(NoopTopicSource::new(topic));
        self.add_topic_source(source.clone());
        source
    }

    /// Removes every sink registered under `topic`, returning how many were dropped.
    pub fn remove_topic_sinks(&self, topic: &str) -> usize {
        let removed = self.sinks.write().remove(topic).map_or(0, |h| h.len());
        debug!(
            event = events::ENDPOINT_REMOVE_SINKS,
            component = COMPONENT,
            topic,
            removed,
            "topic sinks removed"
        );
        removed
    }

    /// Removes every source registered under `topic`, returning how many were dropped.
    pub fn remove_topic_sources(&self, topic: &str) -> usize {
        let removed = self.sources.write().remove(topic).map_or(0, |h| h.len());
        debug!(
            event = events::ENDPOINT_REMOVE_SOURCES,
            component = COMPONENT,
            topic,
            removed,
            "topic sources removed"
        );
        removed
    }

    pub fn topic_sink_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sinks.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn topic_source_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sources.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl TopicEndpoint for TopicEndpointManager {
    fn get_topic_sinks(&self, topic: &str) -> Vec<Arc<dyn TopicSink>> {
        self.sinks.read().get(topic).cloned().unwrap_or_default()
    }

    fn get_topic_sources(&self, topics: &[String]) -> Vec<Arc<dyn TopicSource>> {
        let sources = self.sources.read();
        topics
            .iter()
            .filter_map(|topic| sources.get(topic))
            .flat_map(|handles| handles.iter().cloned())
            .collect()
    }
}
