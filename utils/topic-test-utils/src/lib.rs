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

mod test_messages;
pub use test_messages::{ProbeMessage, PROBE_TEXT};

mod test_topics;
pub use test_topics::{LoopbackTopicSink, RecordingTopicSink, RecordingTopicSource, SendBehavior};

mod test_utils;
pub use test_utils::{init_logging, wait_for_condition};
