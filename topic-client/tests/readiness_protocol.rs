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

mod support;

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use support::{make_client, make_topic_pair, JOIN_TIMEOUT, PROBE_JSON, SINK_TOPIC, SOURCE_TOPIC};
use topic_client::topic::{CommInfrastructure, Topic, TopicSink, TopicSource};
use topic_client::{BidirectionalTopicClient, TopicEndpointManager};
use topic_test_utils::{
    wait_for_condition, LoopbackTopicSink, ProbeMessage, RecordingTopicSource, SendBehavior,
};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn probe_echoed_on_source_makes_client_ready() {
    let pair = make_topic_pair();
    let client = make_client(&pair);

    let prober = client.clone();
    let waiter = tokio::spawn(async move {
        prober
            .await_ready(&ProbeMessage::default(), Duration::from_millis(1))
            .await
    });

    assert!(wait_for_condition(JOIN_TIMEOUT, || pair.sink.send_count() >= 1).await);
    pair.source.offer(PROBE_JSON).await.unwrap();

    let ready = tokio::time::timeout(JOIN_TIMEOUT, waiter)
        .await
        .expect("await_ready should finish")
        .unwrap()
        .unwrap();

    assert!(ready);
    assert!(client.is_ready());
    assert_eq!(pair.source.registration_count(), 1);
    assert_eq!(pair.source.unregistration_count(), 1);
    assert_eq!(pair.source.listener_count(), 0);
    assert!(pair
        .sink
        .sent_messages()
        .iter()
        .all(|message| message == PROBE_JSON));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_round() {
    let pair = make_topic_pair();
    let client = make_client(&pair);

    let waiters: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .await_ready(&ProbeMessage::default(), Duration::from_millis(2))
                    .await
            })
        })
        .collect();

    assert!(wait_for_condition(JOIN_TIMEOUT, || pair.sink.send_count() >= 3).await);
    pair.source.offer(PROBE_JSON).await.unwrap();

    let outcomes = tokio::time::timeout(JOIN_TIMEOUT, join_all(waiters))
        .await
        .expect("every caller should finish");

    for outcome in outcomes {
        assert!(outcome.unwrap().unwrap());
    }
    assert_eq!(pair.source.registration_count(), 1);
    assert_eq!(pair.source.listener_count(), 0);

    let published = pair.sink.send_count();
    assert!(client
        .await_ready(&ProbeMessage::new("another-probe"), Duration::ZERO)
        .await
        .unwrap());
    assert_eq!(pair.sink.send_count(), published);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_stop_and_match_yield_one_answer() {
    for _ in 0..20 {
        let pair = make_topic_pair();
        let client = make_client(&pair);

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move {
                    client
                        .await_ready(&ProbeMessage::default(), Duration::from_millis(1))
                        .await
                })
            })
            .collect();

        assert!(wait_for_condition(JOIN_TIMEOUT, || pair.sink.send_count() >= 1).await);

        let stopper = {
            let client = client.clone();
            tokio::spawn(async move { client.stop_waiting() })
        };
        let source = pair.source.clone();
        let matcher = tokio::spawn(async move { source.offer(PROBE_JSON).await });
        stopper.await.unwrap();
        matcher.await.unwrap().unwrap();

        let outcomes: Vec<bool> = join_all(waiters)
            .await
            .into_iter()
            .map(|outcome| outcome.unwrap().unwrap())
            .collect();

        let decided = outcomes[0];
        assert!(outcomes.iter().all(|outcome| *outcome == decided));
        assert_eq!(client.is_ready(), decided);
        assert_eq!(pair.source.registration_count(), 1);
        assert_eq!(pair.source.listener_count(), 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lost_probes_are_published_again() {
    topic_test_utils::init_logging();
    let source = Arc::new(RecordingTopicSource::new(SOURCE_TOPIC, CommInfrastructure::Noop));
    let target: Arc<dyn TopicSource> = source.clone();
    let loopback = Arc::new(LoopbackTopicSink::with_dropped_messages(SINK_TOPIC, target, 3));

    let manager = TopicEndpointManager::new();
    manager.add_topic_sink(loopback.clone());
    manager.add_topic_source(source.clone());

    let client = BidirectionalTopicClient::new(&manager, SINK_TOPIC, SOURCE_TOPIC).unwrap();

    let ready = tokio::time::timeout(
        JOIN_TIMEOUT,
        client.await_ready(&ProbeMessage::default(), Duration::from_millis(5)),
    )
    .await
    .expect("loopback probe should come back")
    .unwrap();

    assert!(ready);
    assert_eq!(loopback.send_count(), 4);
    assert_eq!(source.listener_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failing_sink_keeps_the_round_alive() {
    let pair = make_topic_pair();
    pair.sink.set_behavior(SendBehavior::Fail);
    let client = make_client(&pair);

    let prober = client.clone();
    let waiter = tokio::spawn(async move {
        prober
            .await_ready(&ProbeMessage::default(), Duration::from_millis(2))
            .await
    });

    assert!(wait_for_condition(JOIN_TIMEOUT, || pair.sink.send_count() >= 3).await);
    assert!(!waiter.is_finished());

    pair.sink.set_behavior(SendBehavior::Decline);
    let declined_from = pair.sink.send_count();
    assert!(
        wait_for_condition(JOIN_TIMEOUT, || pair.sink.send_count() > declined_from + 1).await
    );
    assert!(!client.is_ready());

    pair.source.offer(PROBE_JSON).await.unwrap();
    assert!(tokio::time::timeout(JOIN_TIMEOUT, waiter)
        .await
        .unwrap()
        .unwrap()
        .unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancelled_round_is_not_ready_and_cleans_up() {
    let pair = make_topic_pair();
    let client = make_client(&pair);

    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        client.await_ready(&ProbeMessage::default(), Duration::from_millis(5)),
    )
    .await;

    assert!(outcome.is_err());
    assert!(!client.is_ready());
    assert_eq!(pair.source.registration_count(), 1);
    assert_eq!(pair.source.unregistration_count(), 1);

    let published = pair.sink.send_count();
    assert!(!client
        .await_ready(&ProbeMessage::default(), Duration::from_millis(5))
        .await
        .unwrap());
    assert_eq!(pair.sink.send_count(), published);
}

#[tokio::test]
async fn passthroughs_use_the_resolved_topics() {
    let pair = make_topic_pair();
    let client = make_client(&pair);

    assert!(client.send("raw text").await.unwrap());
    assert_eq!(pair.sink.sent_messages(), vec!["raw text"]);
    assert_eq!(client.sink().topic(), SINK_TOPIC);

    pair.sink.set_behavior(SendBehavior::Fail);
    assert!(client.send("raw text").await.is_err());
    assert!(pair.sink.send("direct").await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn configured_wait_drives_republishing() {
    let pair = make_topic_pair();
    let client = Arc::new(
        BidirectionalTopicClient::new(&pair.manager, SINK_TOPIC, SOURCE_TOPIC)
            .unwrap()
            .with_ready_wait(Duration::from_millis(3)),
    );

    let prober = client.clone();
    let waiter =
        tokio::spawn(async move { prober.await_ready_configured(&ProbeMessage::default()).await });

    assert!(wait_for_condition(JOIN_TIMEOUT, || pair.sink.send_count() >= 2).await);
    pair.source.offer(PROBE_JSON).await.unwrap();

    assert!(tokio::time::timeout(JOIN_TIMEOUT, waiter)
        .await
        .unwrap()
        .unwrap()
        .unwrap());
}
