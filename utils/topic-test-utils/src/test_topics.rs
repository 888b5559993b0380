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

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use topic_client::topic::{
    CommInfrastructure, Topic, TopicError, TopicListener, TopicSink, TopicSource,
};
use tracing::debug;

fn same_listener(a: &Arc<dyn TopicListener>, b: &Arc<dyn TopicListener>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SendBehavior {
    Accept,
    Decline,
    Fail,
}

/// Sink that records every send attempt and answers per [`SendBehavior`].
pub struct RecordingTopicSink {
    topic: String,
    infra: CommInfrastructure,
    behavior: Mutex<SendBehavior>,
    sent: Mutex<Vec<String>>,
}

impl RecordingTopicSink {
    pub fn new(topic: &str, infra: CommInfrastructure) -> Self {
        Self {
            topic: topic.to_string(),
            infra,
            behavior: Mutex::new(SendBehavior::Accept),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_behavior(&self, behavior: SendBehavior) {
        *self.behavior.lock() = behavior;
    }

    /// Every message passed to `send`, including declined and failed ones.
    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().len()
    }
}

impl Topic for RecordingTopicSink {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn comm_infrastructure(&self) -> CommInfrastructure {
        self.infra
    }

    fn recent_events(&self) -> Vec<String> {
        self.sent_messages()
    }
}

#[async_trait]
impl TopicSink for RecordingTopicSink {
    async fn send(&self, message: &str) -> Result<bool, TopicError> {
        self.sent.lock().push(message.to_string());
        let behavior = *self.behavior.lock();
        match behavior {
            SendBehavior::Accept => Ok(true),
            SendBehavior::Decline => Ok(false),
            SendBehavior::Fail => Err(TopicError::Transport {
                topic: self.topic.clone(),
                reason: "simulated transport failure".to_string(),
            }),
        }
    }
}

/// Source that counts listener (un)registrations and dispatches offered events.
pub struct RecordingTopicSource {
    topic: String,
    infra: CommInfrastructure,
    listeners: Mutex<Vec<Arc<dyn TopicListener>>>,
    registrations: AtomicUsize,
    unregistrations: AtomicUsize,
}

impl RecordingTopicSource {
    pub fn new(topic: &str, infra: CommInfrastructure) -> Self {
        Self {
            topic: topic.to_string(),
            infra,
            listeners: Mutex::new(Vec::new()),
            registrations: AtomicUsize::new(0),
            unregistrations: AtomicUsize::new(0),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    pub fn unregistration_count(&self) -> usize {
        self.unregistrations.load(Ordering::SeqCst)
    }
}

impl Topic for RecordingTopicSource {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn comm_infrastructure(&self) -> CommInfrastructure {
        self.infra
    }
}

#[async_trait]
impl TopicSource for RecordingTopicSource {
    async fn offer(&self, event: &str) -> Result<bool, TopicError> {
        let snapshot: Vec<Arc<dyn TopicListener>> = self.listeners.lock().clone();
        for listener in snapshot {
            listener.on_topic_event(self.infra, &self.topic, event).await;
        }
        Ok(true)
    }

    fn register(&self, listener: Arc<dyn TopicListener>) {
        let mut listeners = self.listeners.lock();
        if !listeners.iter().any(|known| same_listener(known, &listener)) {
            listeners.push(listener);
            self.registrations.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn unregister(&self, listener: &Arc<dyn TopicListener>) {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|known| !same_listener(known, listener));
        if listeners.len() != before {
            self.unregistrations.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Sink that hands every message straight to a source, like a bus would.
///
/// The first `drop_first` messages are swallowed to simulate message loss.
pub struct LoopbackTopicSink {
    topic: String,
    target: Arc<dyn TopicSource>,
    drop_first: usize,
    sends: AtomicUsize,
}

impl LoopbackTopicSink {
    pub fn new(topic: &str, target: Arc<dyn TopicSource>) -> Self {
        Self::with_dropped_messages(topic, target, 0)
    }

    pub fn with_dropped_messages(
        topic: &str,
        target: Arc<dyn TopicSource>,
        drop_first: usize,
    ) -> Self {
        Self {
            topic: topic.to_string(),
            target,
            drop_first,
            sends: AtomicUsize::new(0),
        }
    }

    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

impl Topic for LoopbackTopicSink {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn comm_infrastructure(&self) -> CommInfrastructure {
        CommInfrastructure::Noop
    }
}

#[async_trait]
impl TopicSink for LoopbackTopicSink {
    async fn send(&self, message: &str) -> Result<bool, TopicError> {
        let sequence = self.sends.fetch_add(1, Ordering::SeqCst);
        if sequence < self.drop_first {
            debug!(topic = self.topic.as_str(), sequence, "loopback dropping message");
            return Ok(true);
        }
        self.target.offer(message).await
    }
}
