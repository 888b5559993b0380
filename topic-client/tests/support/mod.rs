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

use std::sync::Arc;
use std::time::Duration;
use topic_client::topic::CommInfrastructure;
use topic_client::{BidirectionalTopicClient, TopicEndpointManager};
use topic_test_utils::{RecordingTopicSink, RecordingTopicSource};

pub(crate) const SINK_TOPIC: &str = "my-sink-topic";
pub(crate) const SOURCE_TOPIC: &str = "my-source-topic";
#[allow(dead_code)]
pub(crate) const PROBE_JSON: &str = r#"{"text":"my-text"}"#;
#[allow(dead_code)]
pub(crate) const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) struct TopicPair {
    pub(crate) manager: TopicEndpointManager,
    pub(crate) sink: Arc<RecordingTopicSink>,
    #[allow(dead_code)]
    pub(crate) source: Arc<RecordingTopicSource>,
}

pub(crate) fn make_topic_pair() -> TopicPair {
    topic_test_utils::init_logging();

    let manager = TopicEndpointManager::new();
    let sink = Arc::new(RecordingTopicSink::new(SINK_TOPIC, CommInfrastructure::Kafka));
    let source = Arc::new(RecordingTopicSource::new(
        SOURCE_TOPIC,
        CommInfrastructure::Kafka,
    ));
    manager.add_topic_sink(sink.clone());
    manager.add_topic_source(source.clone());

    TopicPair {
        manager,
        sink,
        source,
    }
}

#[allow(dead_code)]
pub(crate) fn make_client(pair: &TopicPair) -> Arc<BidirectionalTopicClient> {
    Arc::new(
        BidirectionalTopicClient::new(&pair.manager, SINK_TOPIC, SOURCE_TOPIC)
            .expect("client creation should succeed"),
    )
}
