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

//! Canonical structured event names used across `topic-client`.

// Client construction events.
pub const CLIENT_CREATE_OK: &str = "client_create_ok";
pub const CLIENT_CREATE_FAILED: &str = "client_create_failed";

// Sink client events.
pub const SINK_CLIENT_ENCODE_FAILED: &str = "sink_client_encode_failed";
pub const SINK_CLIENT_SEND_REJECTED: &str = "sink_client_send_rejected";
pub const SINK_CLIENT_SEND_FAILED: &str = "sink_client_send_failed";

// Readiness probe events.
pub const READY_CACHED: &str = "ready_cached";
pub const READY_PROBE_START: &str = "ready_probe_start";
pub const READY_PROBE_PUBLISH: &str = "ready_probe_publish";
pub const READY_PROBE_PUBLISH_REJECTED: &str = "ready_probe_publish_rejected";
pub const READY_PROBE_PUBLISH_FAILED: &str = "ready_probe_publish_failed";
pub const READY_PROBE_RETRY: &str = "ready_probe_retry";
pub const READY_PROBE_MATCHED: &str = "ready_probe_matched";
pub const READY_PROBE_MISMATCH: &str = "ready_probe_mismatch";
pub const READY_PROBE_DECODE_FAILED: &str = "ready_probe_decode_failed";
pub const READY_PROBE_STOPPED: &str = "ready_probe_stopped";
pub const READY_PROBE_ABANDONED: &str = "ready_probe_abandoned";
pub const READY_PROBE_DONE: &str = "ready_probe_done";

// In-memory bus events.
pub const NOOP_SINK_SEND: &str = "noop_sink_send";
pub const NOOP_SOURCE_OFFER: &str = "noop_source_offer";
pub const NOOP_TOPIC_DROPPED: &str = "noop_topic_dropped";
pub const LISTENER_REGISTER: &str = "listener_register";
pub const LISTENER_UNREGISTER: &str = "listener_unregister";

// Endpoint manager events.
pub const ENDPOINT_ADD_SINK: &str = "endpoint_add_sink";
pub const ENDPOINT_ADD_SOURCE: &str = "endpoint_add_source";
pub const ENDPOINT_REMOVE_SINKS: &str = "endpoint_remove_sinks";
pub const ENDPOINT_REMOVE_SOURCES: &str = "endpoint_remove_sources";
