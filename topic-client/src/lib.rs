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

//! # topic-client
//!
//! `topic-client` provides clients for publishing on and listening to message
//! bus topics.
//!
//! - [`TopicSinkClient`] publishes serializable objects as JSON on one sink
//!   topic and reports failures as `false` instead of errors.
//! - [`BidirectionalTopicClient`] pairs a sink topic with a source topic and
//!   can prove the pair is live by publishing a probe until it comes back.
//!
//! Topic handles are resolved through a [`TopicEndpoint`](topic::TopicEndpoint)
//! registry which is injected into every client. [`TopicEndpointManager`] is
//! the in-memory registry, and the `NOOP` topics in [`topic::noop`] the
//! in-memory bus.
//!
//! ## Readiness probe
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use topic_client::topic::TopicSource;
//! use topic_client::{BidirectionalTopicClient, TopicEndpointManager};
//!
//! #[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
//! struct Probe {
//!     text: String,
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let manager = TopicEndpointManager::new();
//! manager.add_noop_topic_sink("my-sink-topic");
//! let source = manager.add_noop_topic_source("my-source-topic");
//!
//! let client = Arc::new(
//!     BidirectionalTopicClient::new(&manager, "my-sink-topic", "my-source-topic").unwrap(),
//! );
//!
//! let prober = client.clone();
//! let probing = tokio::spawn(async move {
//!     let probe = Probe { text: "my-text".to_string() };
//!     prober.await_ready(&probe, Duration::from_millis(10)).await
//! });
//!
//! // Stand-in for the bus carrying the probe from the sink to the source.
//! tokio::time::sleep(Duration::from_millis(20)).await;
//! source.offer(r#"{"text":"my-text"}"#).await.unwrap();
//!
//! assert!(probing.await.unwrap().unwrap());
//! assert!(client.is_ready());
//! # });
//! ```
//!
//! A decision is made once per client: later calls return it immediately,
//! and [`BidirectionalTopicClient::stop_waiting`] decides `false` for a round
//! that should give up.
//!
//! ## Observability model
//!
//! Library code emits `tracing` events with canonical `event` and `component`
//! fields (see [`observability`]) and never installs a global subscriber.
//! Binaries and tests initialize `tracing_subscriber` once at process start.

mod bidirectional;
pub use bidirectional::{BidirectionalTopicClient, DEFAULT_READY_WAIT};

pub mod coder;
pub use coder::CoderError;

pub mod config;
pub use config::{BidirectionalTopicConfig, ConfigError, TopicClientsConfig};

mod error;
pub use error::TopicClientError;

#[doc(hidden)]
pub mod observability;

mod readiness;
pub use readiness::DecodeFailedHook;

mod sink_client;
pub use sink_client::TopicSinkClient;

pub mod topic;
pub use topic::endpoint_manager::TopicEndpointManager;
