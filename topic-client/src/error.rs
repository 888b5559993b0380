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

//! Client-level error type.

use crate::coder::CoderError;
use thiserror::Error;

/// Failures raised by [`TopicSinkClient`](crate::TopicSinkClient) and
/// [`BidirectionalTopicClient`](crate::BidirectionalTopicClient).
#[derive(Debug, Error)]
pub enum TopicClientError {
    #[error("no sinks for topic: {0}")]
    NoSinks(String),
    #[error("too many sinks for topic: {0}")]
    TooManySinks(String),
    #[error("no sources for topic: {0}")]
    NoSources(String),
    #[error("too many sources for topic: {0}")]
    TooManySources(String),
    #[error(transparent)]
    Coder(#[from] CoderError),
}
