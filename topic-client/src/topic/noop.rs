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

//! In-memory `NOOP` topics.
//!
//! Sinks record what they publish, sources dispatch offered events straight to
//! their listeners. Nothing leaves the process, which makes these topics the
//! default wiring for local runs and tests.

use crate::observability::{events, fields};
use crate::topic::listener_identity::ListenerIdentityKey;
use crate::topic::{
    CommInfrastructure, Topic, TopicError, TopicListener, TopicSink, TopicSource,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

/// Number of messages kept in a topic's recent-event history.
pub const RECENT_EVENTS_CAPACITY: usize = 10;

const COMPONENT: &str = "noop_topic";

struct TopicState {
    alive: bool,
    locked: bool,
    recent_events: VecDeque<String>,
}

/// Lifecycle, lock and history state shared by both NOOP topic kinds.
struct TopicBase {
    topic: String,
    state: Mutex<TopicState>,
}

impl TopicBase {
    fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            state: Mutex::new(TopicState {
                alive: true,
                locked: false,
                recent_events: VecDeque::with_capacity(RECENT_EVENTS_CAPACITY),
            }),
        }
    }

    fn start(&self) -> bool {
        let mut state = self.state.lock();
        if state.locked {
            return false;
        }
        state.alive = true;
        true
    }

    fn stop(&self) -> bool {
        let mut state = self.state.lock();
        let was_alive = state.alive;
        state.alive = false;
        was_alive
    }

    fn lock(&self) -> bool {
        let mut state = self.state.lock();
        state.locked = true;
        state.alive = false;
        true
    }

    fn unlock(&self) -> bool {
        let mut state = self.state.lock();
        state.locked = false;
        state.alive = true;
        true
    }

    fn is_alive(&self) -> bool {
        self.state.lock().alive
    }

    fn is_locked(&self) -> bool {
        self.state.lock().locked
    }

    /// Records `message` when the topic accepts traffic.
    ///
    /// Returns `Ok(false)` when locked and `Err` when stopped.
    fn admit(&self, message: &str) -> Result<bool, TopicError> {
        let mut state = self.state.lock();
        if state.locked {
            debug!(
                event = events::NOOP_TOPIC_DROPPED,
                component = COMPONENT,
                topic = self.topic.as_str(),
                reason = fields::REASON_LOCKED,
                "dropping message on locked topic"
            );
            return Ok(false);
        }
        if !state.alive {
            warn!(
                event = events::NOOP_TOPIC_DROPPED,
                component = COMPONENT,
                topic = self.topic.as_str(),
                reason = fields::REASON_NOT_ALIVE,
                "dropping message on stopped topic"
            );
            return Err(TopicError::NotAlive(self.topic.clone()));
        }

        if state.recent_events.len() == RECENT_EVENTS_CAPACITY {
            state.recent_events.pop_front();
        }
        state.recent_events.push_back(message.to_string());
        Ok(true)
    }

    fn recent_events(&self) -> Vec<String> {
        self.state.lock().recent_events.iter().cloned().collect()
    }
}

/// Sink that keeps published messages in memory.
pub struct NoopTopicSink {
    base: TopicBase,
}

impl NoopTopicSink {
    pub fn new(topic: &str) -> Self {
        Self {
            base: TopicBase::new(topic),
        }
    }

    pub fn start(&self) -> bool {
        self.base.start()
    }

    pub fn stop(&self) -> bool {
        self.base.stop()
    }

    pub fn lock(&self) -> bool {
        self.base.lock()
    }

    pub fn unlock(&self) -> bool {
        self.base.unlock()
    }

    pub fn is_alive(&self) -> bool {
        self.base.is_alive()
    }

    pub fn is_locked(&self) -> bool {
        self.base.is_locked()
    }
}

impl Topic for NoopTopicSink {
    fn topic(&self) -> &str {
        &self.base.topic
    }

    fn comm_infrastructure(&self) -> CommInfrastructure {
        CommInfrastructure::Noop
    }

    fn recent_events(&self) -> Vec<String> {
        self.base.recent_events()
    }
}

#[async_trait]
impl TopicSink for NoopTopicSink {
    async fn send(&self, message: &str) -> Result<bool, TopicError> {
        let accepted = self.base.admit(message)?;
        if accepted {
            debug!(
                event = events::NOOP_SINK_SEND,
                component = COMPONENT,
                topic = self.base.topic.as_str(),
                payload = %fields::abbreviate_event(message),
                "message published"
            );
        }
        Ok(accepted)
    }
}

/// Source whose events come from [`TopicSource::offer`].
pub struct NoopTopicSource {
    base: TopicBase,
    listeners: Mutex<Vec<ListenerIdentityKey>>,
}

impl NoopTopicSource {
    pub fn new(topic: &str) -> Self {
        Self {
            base: TopicBase::new(topic),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn start(&self) -> bool {
        self.base.start()
    }

    pub fn stop(&self) -> bool {
        self.base.stop()
    }

    pub fn lock(&self) -> bool {
        self.base.lock()
    }

    pub fn unlock(&self) -> bool {
        self.base.unlock()
    }

    pub fn is_alive(&self) -> bool {
        self.base.is_alive()
    }

    pub fn is_locked(&self) -> bool {
        self.base.is_locked()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl Topic for NoopTopicSource {
    fn topic(&self) -> &str {
        &self.base.topic
    }

    fn comm_infrastructure(&self) -> CommInfrastructure {
        CommInfrastructure::Noop
    }

    fn recent_events(&self) -> Vec<String> {
        self.base.recent_events()
    }
}

#[async_trait]
impl TopicSource for NoopTopicSource {
    async fn offer(&self, event: &str) -> Result<bool, TopicError> {
        if !self.base.admit(event)? {
            return Ok(false);
        }

        // Listeners may (un)register from inside their callback.
        let snapshot: Vec<Arc<dyn TopicListener>> = self
            .listeners
            .lock()
            .iter()
            .map(|key| key.listener().clone())
            .collect();

        debug!(
            event = events::NOOP_SOURCE_OFFER,
            component = COMPONENT,
            topic = self.base.topic.as_str(),
            listeners = snapshot.len(),
            payload = %fields::abbreviate_event(event),
            "dispatching offered event"
        );

        for listener in snapshot {
            listener
                .on_topic_event(CommInfrastructure::Noop, &self.base.topic, event)
                .await;
        }
        Ok(true)
    }

    fn register(&self, listener: Arc<dyn TopicListener>) {
        let key = ListenerIdentityKey::new(listener);
        let mut listeners = self.listeners.lock();
        if !listeners.contains(&key) {
            listeners.push(key);
            debug!(
                event = events::LISTENER_REGISTER,
                component = COMPONENT,
                topic = self.base.topic.as_str(),
                listeners = listeners.len(),
                "listener registered"
            );
        }
    }

    fn unregister(&self, listener: &Arc<dyn TopicListener>) {
        let key = ListenerIdentityKey::new(listener.clone());
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|registered| registered != &key);
        if listeners.len() != before {
            debug!(
                event = events::LISTENER_UNREGISTER,
                component = COMPONENT,
                topic = self.base.topic.as_str(),
                listeners = listeners.len(),
                "listener unregistered"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoopTopicSink, NoopTopicSource, RECENT_EVENTS_CAPACITY};
    use crate::topic::{
        CommInfrastructure, Topic, TopicError, TopicListener, TopicSink, TopicSource,
    };
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct CollectingListener {
        events: Mutex<Vec<(CommInfrastructure, String, String)>>,
    }

    #[async_trait]
    impl TopicListener for CollectingListener {
        async fn on_topic_event(&self, infra: CommInfrastructure, topic: &str, event: &str) {
            self.events
                .lock()
                .push((infra, topic.to_string(), event.to_string()));
        }
    }

    #[tokio::test]
    async fn sink_records_published_messages() {
        let sink = NoopTopicSink::new("my-sink-topic");

        assert!(sink.send("hello").await.unwrap());
        assert!(sink.send("world").await.unwrap());

        assert_eq!(sink.topic(), "my-sink-topic");
        assert_eq!(sink.comm_infrastructure(), CommInfrastructure::Noop);
        assert_eq!(sink.recent_events(), vec!["hello", "world"]);
    }

    #[tokio::test]
    async fn recent_events_drop_the_oldest_entries() {
        let sink = NoopTopicSink::new("my-sink-topic");

        for index in 0..RECENT_EVENTS_CAPACITY + 3 {
            sink.send(&format!("message-{index}")).await.unwrap();
        }

        let recent = sink.recent_events();
        assert_eq!(recent.len(), RECENT_EVENTS_CAPACITY);
        assert_eq!(recent.first().map(String::as_str), Some("message-3"));
    }

    #[tokio::test]
    async fn stopped_sink_fails_and_locked_sink_declines() {
        let sink = NoopTopicSink::new("my-sink-topic");

        assert!(sink.stop());
        assert!(!sink.stop());
        assert!(matches!(
            sink.send("dropped").await,
            Err(TopicError::NotAlive(topic)) if topic == "my-sink-topic"
        ));

        assert!(sink.start());
        assert!(sink.lock());
        assert!(!sink.start());
        assert!(!sink.send("declined").await.unwrap());

        assert!(sink.unlock());
        assert!(sink.is_alive());
        assert!(sink.send("accepted").await.unwrap());
        assert_eq!(sink.recent_events(), vec!["accepted"]);
    }

    #[tokio::test]
    async fn source_dispatches_offered_events_to_listeners() {
        let source = NoopTopicSource::new("my-source-topic");
        let collector = Arc::new(CollectingListener::default());
        let listener: Arc<dyn TopicListener> = collector.clone();

        source.register(listener.clone());
        source.register(listener.clone());
        assert_eq!(source.listener_count(), 1);

        assert!(source.offer("inbound").await.unwrap());
        assert_eq!(
            collector.events.lock().clone(),
            vec![(
                CommInfrastructure::Noop,
                "my-source-topic".to_string(),
                "inbound".to_string()
            )]
        );

        source.unregister(&listener);
        source.unregister(&listener);
        assert_eq!(source.listener_count(), 0);

        assert!(source.offer("unheard").await.unwrap());
        assert_eq!(collector.events.lock().len(), 1);
        assert_eq!(source.recent_events(), vec!["inbound", "unheard"]);
    }

    #[tokio::test]
    async fn locked_source_does_not_dispatch() {
        let source = NoopTopicSource::new("my-source-topic");
        let collector = Arc::new(CollectingListener::default());
        source.register(collector.clone());

        source.lock();
        assert!(!source.offer("inbound").await.unwrap());
        assert!(collector.events.lock().is_empty());
    }
}
