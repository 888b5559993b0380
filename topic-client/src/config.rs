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

//! JSON5 configuration describing the topic clients a process needs.
//!
//! ```json5
//! {
//!     // probe pairs checked before the process starts serving
//!     bidirectional: [
//!         { sink_topic: "policy-pdp-pap", source_topic: "policy-pdp-pap", ready_wait_ms: 2000 },
//!     ],
//!     sink_topics: ["policy-notification"],
//! }
//! ```

use crate::bidirectional::{BidirectionalTopicClient, DEFAULT_READY_WAIT};
use crate::error::TopicClientError;
use crate::sink_client::TopicSinkClient;
use crate::topic::TopicEndpoint;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse config")]
    Parse(#[from] json5::Error),
}

fn default_ready_wait_ms() -> u64 {
    u64::try_from(DEFAULT_READY_WAIT.as_millis()).unwrap_or(u64::MAX)
}

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BidirectionalTopicConfig {
    pub sink_topic: String,
    pub source_topic: String,
    #[serde(default = "default_ready_wait_ms")]
    pub ready_wait_ms: u64,
}

impl BidirectionalTopicConfig {
    pub fn from_json5_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(json5::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json5_str(&read_config_file(path.as_ref())?)
    }

    pub fn ready_wait(&self) -> Duration {
        Duration::from_millis(self.ready_wait_ms)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TopicClientsConfig {
    #[serde(default)]
    pub bidirectional: Vec<BidirectionalTopicConfig>,
    #[serde(default)]
    pub sink_topics: Vec<String>,
}

impl TopicClientsConfig {
    pub fn from_json5_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(json5::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json5_str(&read_config_file(path.as_ref())?)
    }

    /// Builds one [`TopicSinkClient`] per configured sink topic, stopping at
    /// the first topic that does not resolve.
    pub fn build_sink_clients(
        &self,
        endpoint: &dyn TopicEndpoint,
    ) -> Result<Vec<TopicSinkClient>, TopicClientError> {
        self.sink_topics
            .iter()
            .map(|topic| TopicSinkClient::new(endpoint, topic))
            .collect()
    }

    /// Builds one [`BidirectionalTopicClient`] per configured pair, stopping at
    /// the first pair that does not resolve.
    pub fn build_bidirectional_clients(
        &self,
        endpoint: &dyn TopicEndpoint,
    ) -> Result<Vec<BidirectionalTopicClient>, TopicClientError> {
        self.bidirectional
            .iter()
            .map(|config| BidirectionalTopicClient::from_config(endpoint, config))
            .collect()
    }
}
