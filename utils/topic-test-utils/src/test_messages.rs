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

use serde::{Deserialize, Serialize};

pub const PROBE_TEXT: &str = "my-text";

/// Probe payload used by readiness tests; encodes as `{"text":"..."}`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProbeMessage {
    pub text: String,
}

impl ProbeMessage {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl Default for ProbeMessage {
    fn default() -> Self {
        Self::new(PROBE_TEXT)
    }
}
