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

//! Canonical structured field values and value-format helpers.

pub const REASON_LOCKED: &str = "locked";
pub const REASON_NOT_ALIVE: &str = "not_alive";
pub const REASON_STOP_WAITING: &str = "stop_waiting";
pub const REASON_CANCELLED: &str = "cancelled";
pub const REASON_NO_SINKS: &str = "no_sinks";
pub const REASON_TOO_MANY_SINKS: &str = "too_many_sinks";
pub const REASON_NO_SOURCES: &str = "no_sources";
pub const REASON_TOO_MANY_SOURCES: &str = "too_many_sources";

pub const OUTCOME_READY: &str = "ready";
pub const OUTCOME_NOT_READY: &str = "not_ready";
pub const OUTCOME_UNSET: &str = "unset";

/// Longest slice of an event payload copied into a log record.
pub const MAX_LOGGED_EVENT_CHARS: usize = 128;

/// Shortens a bus payload for logging, marking the cut with `...`.
pub fn abbreviate_event(event: &str) -> String {
    match event.char_indices().nth(MAX_LOGGED_EVENT_CHARS) {
        Some((cut, _)) => format!("{}...", &event[..cut]),
        None => event.to_string(),
    }
}

pub fn format_outcome(outcome: Option<bool>) -> &'static str {
    match outcome {
        Some(true) => OUTCOME_READY,
        Some(false) => OUTCOME_NOT_READY,
        None => OUTCOME_UNSET,
    }
}
